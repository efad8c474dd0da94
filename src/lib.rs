//! onramp - Cloud Account Onboarding
//!
//! A library for managing the lifecycle of cloud accounts (AWS, Azure, GCP,
//! Alibaba) on a cloud-security platform: create, read, update, delete and
//! import, with Terraform-compatible composite identifiers.

pub mod account;
pub mod config;
pub mod diff;
pub mod identity;
pub mod lifecycle;
pub mod platform;

mod error;
mod output;

pub use account::{CloudAccountVariant, CloudType};
pub use config::{AccountConfig, ConfigError};
pub use diff::credentials_equivalent;
pub use error::OnrampError;
pub use identity::AccountIdentity;
pub use lifecycle::AccountManager;
pub use output::render_account;
pub use platform::{AccountApi, PlatformClient, PlatformError};
