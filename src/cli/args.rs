use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Onboard a cloud account from a configuration file
    Create(CreateArgs),
    /// Fetch the current state of an onboarded account
    Read(ReadArgs),
    /// Push updated configuration to an onboarded account
    Update(UpdateArgs),
    /// Delete (or disable) an onboarded account
    Delete(DeleteArgs),
    /// Import an existing account by its composite id
    Import(ImportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ApiArgs {
    #[arg(long, env = "ONRAMP_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "ONRAMP_API_URL")]
    pub api_url: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Path to the account configuration (JSON)
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ReadArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Composite account id, e.g. `aws:123456789012`
    #[arg(long)]
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Composite account id, e.g. `aws:123456789012`
    #[arg(long)]
    pub id: String,

    /// Path to the account configuration (JSON)
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Composite account id, e.g. `aws:123456789012`
    #[arg(long)]
    pub id: String,

    /// Disable the account instead of deleting it
    #[arg(long)]
    pub disable: bool,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Composite account id, e.g. `aws:123456789012`
    #[arg(long)]
    pub id: String,
}
