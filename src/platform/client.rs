use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::types::{ApiErrorBody, NameEntry};
use super::{AccountApi, PlatformError};
use crate::account::{CloudAccountVariant, CloudType};

const PLATFORM_API_BASE: &str = "https://api.prismacloud.io";

/// Platform error code signalling that the submitted account is already
/// onboarded.
const DUPLICATE_ACCOUNT_CODE: &str = "duplicate_cloud_account";

#[derive(Clone)]
pub struct PlatformClient {
    client: reqwest::Client,
    base_url: String,
}

impl PlatformClient {
    pub fn new(token: String) -> Result<Self, PlatformError> {
        Self::with_base_url(token, PLATFORM_API_BASE.to_string())
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(token: String, base_url: String) -> Result<Self, PlatformError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        let header_value = HeaderValue::from_str(&auth_value).map_err(|_| PlatformError::Auth {
            message: "Invalid token format".to_string(),
        })?;
        headers.insert(AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PlatformError::Network)?;

        Ok(Self { client, base_url })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    fn account_url(&self, cloud_type: CloudType, account_id: &str) -> String {
        format!(
            "{}/cloud/{}/{}",
            self.base_url,
            cloud_type,
            urlencoding::encode(account_id)
        )
    }

    /// Map a non-success response onto the error taxonomy. `duplicate_name`
    /// is the submitted account name when the caller wants 409/duplicate
    /// responses classified as `Duplicate` (only meaningful on create).
    async fn error_from(
        &self,
        response: reqwest::Response,
        what: &str,
        duplicate_name: Option<&str>,
    ) -> PlatformError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();

        if status.as_u16() == 404 {
            return PlatformError::NotFound {
                what: what.to_string(),
            };
        }

        if let Some(name) = duplicate_name {
            if status.as_u16() == 409 || body.has_code(DUPLICATE_ACCOUNT_CODE) {
                return PlatformError::Duplicate {
                    name: name.to_string(),
                };
            }
        }

        let message = body
            .first_message()
            .unwrap_or("Unknown platform error")
            .to_string();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return PlatformError::Auth { message };
        }

        PlatformError::Api {
            status: status.as_u16(),
            message,
        }
    }

    fn body_of(account: &CloudAccountVariant) -> Result<serde_json::Value, PlatformError> {
        let value = match account {
            CloudAccountVariant::Aws(a) => serde_json::to_value(a),
            CloudAccountVariant::Azure(a) => serde_json::to_value(a),
            CloudAccountVariant::Gcp(a) => serde_json::to_value(a),
            CloudAccountVariant::Alibaba(a) => serde_json::to_value(a),
        };
        value.map_err(|e| PlatformError::Decode {
            message: format!("Failed to serialize account payload: {}", e),
        })
    }
}

#[async_trait]
impl AccountApi for PlatformClient {
    async fn create(&self, account: &CloudAccountVariant) -> Result<(), PlatformError> {
        let url = format!("{}/cloud/{}", self.base_url, account.cloud_type());
        let body = Self::body_of(account)?;

        let response = self.client.post(&url).json(&body).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        Err(self
            .error_from(response, "cloud account", Some(account.name()))
            .await)
    }

    async fn update(&self, account: &CloudAccountVariant) -> Result<(), PlatformError> {
        let url = self.account_url(account.cloud_type(), account.account_id());
        let body = Self::body_of(account)?;

        let response = self.client.put(&url).json(&body).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        let what = format!(
            "cloud account {}/{}",
            account.cloud_type(),
            account.account_id()
        );
        Err(self.error_from(response, &what, None).await)
    }

    async fn get(
        &self,
        cloud_type: CloudType,
        account_id: &str,
    ) -> Result<CloudAccountVariant, PlatformError> {
        let url = self.account_url(cloud_type, account_id);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let what = format!("cloud account {}/{}", cloud_type, account_id);
            return Err(self.error_from(response, &what, None).await);
        }

        let value: serde_json::Value = response.json().await.map_err(|e| PlatformError::Decode {
            message: format!("Failed to parse response: {}", e),
        })?;

        let decode = |e: serde_json::Error| PlatformError::Decode {
            message: format!("Failed to parse {} account: {}", cloud_type, e),
        };

        let variant = match cloud_type {
            CloudType::Aws => {
                CloudAccountVariant::Aws(serde_json::from_value(value).map_err(decode)?)
            }
            CloudType::Azure => {
                CloudAccountVariant::Azure(serde_json::from_value(value).map_err(decode)?)
            }
            CloudType::Gcp => {
                CloudAccountVariant::Gcp(serde_json::from_value(value).map_err(decode)?)
            }
            CloudType::Alibaba => {
                CloudAccountVariant::Alibaba(serde_json::from_value(value).map_err(decode)?)
            }
        };

        Ok(variant)
    }

    async fn delete(&self, cloud_type: CloudType, account_id: &str) -> Result<(), PlatformError> {
        let url = self.account_url(cloud_type, account_id);

        let response = self.client.delete(&url).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        let what = format!("cloud account {}/{}", cloud_type, account_id);
        Err(self.error_from(response, &what, None).await)
    }

    async fn disable(&self, cloud_type: CloudType, account_id: &str) -> Result<(), PlatformError> {
        let url = format!(
            "{}/status/false",
            self.account_url(cloud_type, account_id)
        );

        let response = self.client.patch(&url).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        let what = format!("cloud account {}/{}", cloud_type, account_id);
        Err(self.error_from(response, &what, None).await)
    }

    async fn identify(&self, cloud_type: CloudType, name: &str) -> Result<String, PlatformError> {
        let url = format!(
            "{}/cloud/name?cloudType={}&name={}",
            self.base_url,
            cloud_type,
            urlencoding::encode(name)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let what = format!("cloud account name '{}' ({})", name, cloud_type);
            return Err(self.error_from(response, &what, None).await);
        }

        let entries: Vec<NameEntry> =
            response.json().await.map_err(|e| PlatformError::Decode {
                message: format!("Failed to parse name index: {}", e),
            })?;

        // The name index is filtered server-side, but match both fields
        // again rather than trusting the first entry returned.
        entries
            .into_iter()
            .find(|entry| entry.cloud_type == cloud_type.as_str() && entry.name == name)
            .map(|entry| entry.id)
            .ok_or_else(|| PlatformError::NotFound {
                what: format!("cloud account name '{}' ({})", name, cloud_type),
            })
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
