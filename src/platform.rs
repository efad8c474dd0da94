mod client;
mod error;
mod types;

pub use client::PlatformClient;
pub use error::PlatformError;
pub use types::NameEntry;

use async_trait::async_trait;

use crate::account::{CloudAccountVariant, CloudType};

/// The cloud-account surface of the security platform's API.
///
/// The lifecycle orchestrator is written against this trait so tests can
/// substitute an in-memory implementation for the HTTP client.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn create(&self, account: &CloudAccountVariant) -> Result<(), PlatformError>;

    async fn update(&self, account: &CloudAccountVariant) -> Result<(), PlatformError>;

    async fn get(
        &self,
        cloud_type: CloudType,
        account_id: &str,
    ) -> Result<CloudAccountVariant, PlatformError>;

    async fn delete(&self, cloud_type: CloudType, account_id: &str) -> Result<(), PlatformError>;

    /// Reversible alternative to `delete`: the account stays registered but
    /// stops being monitored.
    async fn disable(&self, cloud_type: CloudType, account_id: &str) -> Result<(), PlatformError>;

    /// Resolve the platform-side account id from the platform-unique name.
    async fn identify(&self, cloud_type: CloudType, name: &str) -> Result<String, PlatformError>;
}
