mod cli;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use cli::{AccountCommand, ApiArgs, Cli};
use onramp::{AccountConfig, AccountIdentity, AccountManager, PlatformClient, render_account};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        AccountCommand::Create(args) => {
            let manager = manager_from(&args.api)?;
            let config = load_config(&args.config)?;
            let (identity, observed) = manager.create(&config).await?;
            println!("{}", identity);
            match observed {
                Some(account) => println!("{}", render_account(&account)),
                None => tracing::warn!(%identity, "account not readable after create"),
            }
        }
        AccountCommand::Read(args) => {
            let manager = manager_from(&args.api)?;
            let identity: AccountIdentity = args.id.parse()?;
            match manager.read(&identity).await? {
                Some(account) => println!("{}", render_account(&account)),
                None => tracing::warn!(%identity, "account does not exist, treat as absent"),
            }
        }
        AccountCommand::Update(args) => {
            let manager = manager_from(&args.api)?;
            let identity: AccountIdentity = args.id.parse()?;
            let config = load_config(&args.config)?;
            match manager.update(&identity, &config).await? {
                Some(account) => println!("{}", render_account(&account)),
                None => tracing::warn!(%identity, "account not readable after update"),
            }
        }
        AccountCommand::Delete(args) => {
            let manager = manager_from(&args.api)?;
            let identity: AccountIdentity = args.id.parse()?;
            manager.delete(&identity, args.disable).await?;
            tracing::info!(%identity, disabled = args.disable, "teardown complete");
        }
        AccountCommand::Import(args) => {
            // Import is pass-through: the composite id is the whole input.
            let manager = manager_from(&args.api)?;
            let identity: AccountIdentity = args.id.parse()?;
            match manager.read(&identity).await? {
                Some(account) => {
                    println!("{}", identity);
                    println!("{}", render_account(&account));
                }
                None => return Err(eyre!("cannot import {}: account does not exist", identity)),
            }
        }
    }

    Ok(())
}

fn manager_from(api: &ApiArgs) -> Result<AccountManager<PlatformClient>> {
    let token = api
        .token
        .clone()
        .ok_or_else(|| eyre!("No API token provided. Set ONRAMP_API_TOKEN or use --token flag"))?;

    let client = match &api.api_url {
        Some(url) => PlatformClient::with_base_url(token, url.clone())?,
        None => PlatformClient::new(token)?,
    };

    Ok(AccountManager::new(client))
}

fn load_config(path: &std::path::Path) -> Result<AccountConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: AccountConfig = serde_json::from_str(&text)?;
    Ok(config)
}
