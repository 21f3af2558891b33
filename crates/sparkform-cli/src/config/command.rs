//! Subcommands and their field flags.

use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};
use sparkform_provider::ResourceData;

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Print the schema of every resource type and data source as JSON.
    Schema,

    #[command(flatten)]
    Webhook(WebhookCommand),
}

impl Command {
    /// Returns the subcommand name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Webhook(command) => command.name(),
        }
    }
}

/// Lifecycle operations on `sparkpost_webhook`.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum WebhookCommand {
    /// Refresh a webhook from SparkPost.
    Read(IdArgs),

    /// Import an existing webhook by id.
    Import(IdArgs),

    /// Create a webhook.
    Create(WebhookArgs),

    /// Update a webhook; fields without a flag keep their current value.
    Update(UpdateArgs),

    /// Delete a webhook.
    Delete(IdArgs),

    /// Look up a webhook through the read-only data source.
    Lookup(IdArgs),
}

impl WebhookCommand {
    /// Returns the subcommand name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Read(_) => "read",
            Self::Import(_) => "import",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Lookup(_) => "lookup",
        }
    }
}

/// Identifies an existing webhook.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct IdArgs {
    /// Webhook id assigned by SparkPost
    #[arg(long)]
    pub id: String,
}

/// Configurable webhook fields.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct WebhookArgs {
    /// Display name (at most 1024 bytes)
    #[arg(long)]
    pub name: Option<String>,

    /// Target URL (http on port 80 or https on port 443)
    #[arg(long)]
    pub target: Option<String>,

    /// Event type; repeat the flag or separate values with commas
    #[arg(long = "event", value_delimiter = ',')]
    pub events: Vec<String>,

    /// Whether event batches are delivered
    #[arg(long)]
    pub active: Option<bool>,
}

impl WebhookArgs {
    /// Writes every given flag into `data`, leaving other attributes alone.
    pub fn apply(&self, data: &mut ResourceData) {
        if let Some(name) = &self.name {
            data.set("name", name.as_str());
        }
        if let Some(target) = &self.target {
            data.set("target", target.as_str());
        }
        if !self.events.is_empty() {
            data.set("events", self.events.clone());
        }
        if let Some(active) = self.active {
            data.set("active", active);
        }
    }
}

/// Webhook id plus the fields to change.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct UpdateArgs {
    /// Webhook id assigned by SparkPost
    #[arg(long)]
    pub id: String,

    #[clap(flatten)]
    pub fields: WebhookArgs,
}
