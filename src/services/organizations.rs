//! Organization operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Requests the organization profile for `org`.
    ///
    /// `Ok` means the profile endpoint answered with a success status; the
    /// profile body itself is not read.
    pub async fn probe(&self, org: &str) -> GitHubResult<()> {
        self.client.probe(&["orgs", org]).await
    }
}
