//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── sparkpost: SpConfig   # API key, base URL, timeout, user agent
//! └── command: Command      # schema | read | import | create | update | delete | lookup
//! ```
//!
//! Connection settings can be provided via CLI arguments or environment
//! variables.
//!
//! # Example
//!
//! ```bash
//! SPARKPOST_API_KEY=... sparkform create \
//!     --name "Molzait DEV" --target https://example.com/hook --event delivery,bounce
//!
//! sparkform --sparkpost-base-url https://api.eu.sparkpost.com read --id e4093700-...
//! ```

mod command;

use std::process;

use clap::Parser;
pub use command::{Command, IdArgs, UpdateArgs, WebhookArgs, WebhookCommand};
use serde::{Deserialize, Serialize};
use sparkform_client::SpConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "sparkform")]
#[command(about = "Manage SparkPost webhooks as declarative resources")]
#[command(version)]
pub struct Cli {
    /// SparkPost connection settings.
    #[clap(flatten)]
    pub sparkpost: SpConfig,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            command = self.command.name(),
            base_url = %self.sparkpost.base_url,
            timeout_secs = self.sparkpost.timeout_secs,
            user_agent = %self.sparkpost.effective_user_agent(),
            api_key_set = !self.sparkpost.api_key.trim().is_empty(),
            "SparkPost configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(["sparkform"].iter().chain(args)).unwrap()
    }

    #[test]
    fn parse_create_with_repeated_and_delimited_events() {
        let cli = parse(&[
            "--sparkpost-api-key",
            "key",
            "create",
            "--name",
            "Molzait DEV",
            "--target",
            "https://example.com/hook",
            "--event",
            "delivery,bounce",
            "--event",
            "open",
        ]);

        let Command::Webhook(WebhookCommand::Create(args)) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.name.as_deref(), Some("Molzait DEV"));
        assert_eq!(args.events, ["delivery", "bounce", "open"]);
        assert_eq!(args.active, None);
        assert_eq!(cli.sparkpost.api_key, "key");
    }

    #[test]
    fn parse_update_and_base_url() {
        let cli = parse(&[
            "--sparkpost-api-key",
            "key",
            "--sparkpost-base-url",
            "https://api.eu.sparkpost.com",
            "update",
            "--id",
            "abc",
            "--active",
            "false",
        ]);

        assert_eq!(cli.sparkpost.base_url, "https://api.eu.sparkpost.com");
        let Command::Webhook(WebhookCommand::Update(args)) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.id, "abc");
        assert_eq!(args.fields.active, Some(false));
        assert!(args.fields.name.is_none());
    }

    #[test]
    fn parse_schema() {
        let cli = parse(&["schema"]);
        assert!(matches!(cli.command, Command::Schema));
    }

    #[test]
    fn read_requires_id() {
        assert!(Cli::try_parse_from(["sparkform", "read"]).is_err());
    }
}
