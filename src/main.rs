use anyhow::Context;
use clap::Parser;
use github_env_audit::auth::EnvCredentialProvider;
use github_env_audit::cli::Cli;
use github_env_audit::errors::AuditError;
use github_env_audit::runner;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    cli.logging()
        .init()
        .context("failed to initialise logging")?;

    let credentials = EnvCredentialProvider::from_github_token();
    match runner::run(&cli.run_config(), &credentials).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(error @ AuditError::MissingCredential(_)) => {
            eprintln!("{}", error);
            Ok(ExitCode::from(1))
        }
        Err(error) => Err(error).with_context(|| format!("audit of {} failed", cli.org)),
    }
}
