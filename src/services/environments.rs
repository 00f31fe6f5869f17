//! Deployment environment operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::types::{
    Environment, EnvironmentsResponse, RepositoryName, Secret, SecretsResponse, Variable,
    VariablesResponse,
};

/// Service for deployment environments and their secrets and variables.
pub struct EnvironmentsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> EnvironmentsService<'a> {
    /// Creates a new environments service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists the deployment environments of a repository.
    pub async fn list(&self, repo: &RepositoryName) -> GitHubResult<Vec<Environment>> {
        let path = environment_path(repo, &[]);
        self.client.list_counted::<EnvironmentsResponse>(&path).await
    }

    /// Lists the secrets of an environment (names only).
    pub async fn list_secrets(
        &self,
        repo: &RepositoryName,
        environment: &str,
    ) -> GitHubResult<Vec<Secret>> {
        let path = environment_path(repo, &[environment, "secrets"]);
        self.client.list_counted::<SecretsResponse>(&path).await
    }

    /// Lists the variables of an environment.
    pub async fn list_variables(
        &self,
        repo: &RepositoryName,
        environment: &str,
    ) -> GitHubResult<Vec<Variable>> {
        let path = environment_path(repo, &[environment, "variables"]);
        self.client.list_counted::<VariablesResponse>(&path).await
    }
}

/// `repos/{owner}/{repo}/environments/{rest..}`
fn environment_path<'p>(repo: &'p RepositoryName, rest: &[&'p str]) -> Vec<&'p str> {
    let mut path = vec!["repos"];
    path.extend(repo.segments());
    path.push("environments");
    path.extend_from_slice(rest);
    path
}
