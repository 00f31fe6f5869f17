use super::{SkipReason, Stage};
use crate::client::GitHubClient;
use crate::pagination::PaginationParams;
use crate::types::{AccountKind, RepositoryName};
use tracing::{debug, info};

/// Repositories found for an account.
#[derive(Debug)]
pub struct Resolution {
    /// Account name as given.
    pub account: String,
    /// Kind detected by the organization probe.
    pub kind: AccountKind,
    /// Repository full names in listing order.
    pub repositories: Vec<RepositoryName>,
    /// Number of non-empty listing pages received.
    pub pages_fetched: u32,
    /// Why the organization probe failed, when the account was taken for a user.
    pub probe_failure: Option<SkipReason>,
    /// Listing failure that ended pagination early, if any.
    pub stopped_by: Option<SkipReason>,
}

/// Finds every repository owned by an organization or a user.
pub struct AccountResolver<'a> {
    client: &'a GitHubClient,
}

impl<'a> AccountResolver<'a> {
    /// Creates a resolver using `client` and its credential.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Decides whether `account` is an organization.
    ///
    /// Any failure of the organization profile request, whatever its cause,
    /// classifies the account as a user.
    pub async fn detect_kind(&self, account: &str) -> (AccountKind, Option<SkipReason>) {
        match self.client.organizations().probe(account).await {
            Ok(()) => (AccountKind::Organization, None),
            Err(error) => {
                let reason = SkipReason::new(Stage::OrganizationProbe, account, error);
                reason.log();
                (AccountKind::User, Some(reason))
            }
        }
    }

    /// Lists all repositories of `account`, 100 per page, until a page comes
    /// back empty or fails. A failed page ends the listing; repositories from
    /// earlier pages are kept.
    pub async fn resolve(&self, account: &str) -> Resolution {
        let (kind, probe_failure) = self.detect_kind(account).await;
        info!(account = %account, "Detected account type: {}", kind);

        let repositories_service = self.client.repositories();
        let mut repositories = Vec::new();
        let mut pages_fetched = 0;
        let mut stopped_by = None;
        let mut page = 1;

        loop {
            let params = PaginationParams::full_page(page);
            match repositories_service
                .list_for_account(kind, account, &params)
                .await
            {
                Ok(listing) if listing.is_empty() => break,
                Ok(listing) => {
                    if let Some(last_page) = listing.last_page.filter(|_| page == 1) {
                        debug!(account = %account, last_page, "Repository listing spans several pages");
                    }
                    pages_fetched += 1;
                    repositories.extend(listing.into_iter().map(|repo| repo.full_name));
                    page += 1;
                }
                Err(error) => {
                    let reason = SkipReason::new(Stage::RepositoryListing, account, error);
                    reason.log();
                    stopped_by = Some(reason);
                    break;
                }
            }
        }

        info!(
            account = %account,
            kind = %kind,
            repositories = repositories.len(),
            pages = pages_fetched,
            "Resolved repositories"
        );

        Resolution {
            account: account.to_string(),
            kind,
            repositories,
            pages_fetched,
            probe_failure,
            stopped_by,
        }
    }
}
