//! GitHub API service implementations.

mod environments;
mod organizations;
mod repositories;

pub use environments::*;
pub use organizations::*;
pub use repositories::*;
