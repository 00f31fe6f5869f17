//! Repository operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::pagination::{Page, PaginationParams};
use crate::types::{AccountKind, Repository};

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists one page of an account's repositories, from `/orgs/{account}/repos`
    /// or `/users/{account}/repos` depending on `kind`.
    pub async fn list_for_account(
        &self,
        kind: AccountKind,
        account: &str,
        params: &PaginationParams,
    ) -> GitHubResult<Page<Repository>> {
        self.client
            .get_page(&[kind.path_prefix(), account, "repos"], params)
            .await
    }
}
