use crate::account::CloudAccountVariant;
use crate::config::AccountConfig;
use crate::error::OnrampError;
use crate::identity::AccountIdentity;
use crate::platform::{AccountApi, PlatformError};

/// Drives the create/read/update/delete lifecycle of one cloud account
/// against the platform API.
///
/// The manager holds no mutable state; the composite [`AccountIdentity`]
/// returned by [`create`](AccountManager::create) is the only durable state
/// between calls and is owned by the caller. Operations on independent
/// identities may run concurrently; the caller must not issue overlapping
/// operations for the same identity.
pub struct AccountManager<C> {
    api: C,
}

impl<C: AccountApi> AccountManager<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    /// Onboard the configured account and resolve its identity.
    ///
    /// When `update_on_create` is set and the platform reports the account
    /// as a duplicate, the create falls back to an update of the existing
    /// account instead of failing. The returned state is a fresh read; it
    /// is `None` in the degenerate case where the account vanished between
    /// creation and the read back.
    pub async fn create(
        &self,
        config: &AccountConfig,
    ) -> Result<(AccountIdentity, Option<CloudAccountVariant>), OnrampError> {
        let (cloud_type, name, account) = config.decode()?;
        let mut successful_update = false;

        match self.api.create(&account).await {
            Ok(()) => {}
            Err(PlatformError::Duplicate { .. }) if config.update_on_create => {
                tracing::warn!(
                    %cloud_type,
                    name = %name,
                    "duplicate cloud account detected, attempting to update"
                );
                self.api.update(&account).await?;
                successful_update = true;
            }
            Err(err) => return Err(err.into()),
        }

        let platform_id = match self.api.identify(cloud_type, &name).await {
            Ok(id) => id,
            Err(PlatformError::NotFound { .. }) if successful_update => {
                // A renamed account can lag out of the platform's name
                // index even though the account itself was updated. Best
                // effort: use the id the account was submitted with.
                tracing::warn!(
                    %cloud_type,
                    name = %name,
                    "account missing from name index after update fallback, using submitted account id"
                );
                account.account_id().to_string()
            }
            Err(err) => return Err(err.into()),
        };

        let identity = AccountIdentity::new(cloud_type, platform_id);
        tracing::info!(identity = %identity, "cloud account onboarded");

        let observed = self.read(&identity).await?;
        Ok((identity, observed))
    }

    /// Fetch the current state of the account.
    ///
    /// `Ok(None)` means the account no longer exists on the platform; the
    /// caller should drop the stored identity and treat the resource as
    /// absent. This is not an error.
    pub async fn read(
        &self,
        identity: &AccountIdentity,
    ) -> Result<Option<CloudAccountVariant>, OnrampError> {
        match self.api.get(identity.cloud_type, &identity.account_id).await {
            Ok(account) => Ok(Some(account)),
            Err(PlatformError::NotFound { .. }) => {
                tracing::info!(identity = %identity, "cloud account no longer exists");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Push the configured state to the platform, then read it back.
    /// The identity is assumed unchanged by the update.
    pub async fn update(
        &self,
        identity: &AccountIdentity,
        config: &AccountConfig,
    ) -> Result<Option<CloudAccountVariant>, OnrampError> {
        let (_, _, account) = config.decode()?;
        self.api.update(&account).await?;
        self.read(identity).await
    }

    /// Tear the account down: disable it when `disable_on_destroy` is set,
    /// delete it otherwise. An account that is already gone counts as
    /// deleted, so teardown is idempotent.
    pub async fn delete(
        &self,
        identity: &AccountIdentity,
        disable_on_destroy: bool,
    ) -> Result<(), OnrampError> {
        let result = if disable_on_destroy {
            self.api
                .disable(identity.cloud_type, &identity.account_id)
                .await
        } else {
            self.api
                .delete(identity.cloud_type, &identity.account_id)
                .await
        };

        match result {
            Ok(()) => Ok(()),
            Err(PlatformError::NotFound { .. }) => {
                tracing::info!(identity = %identity, "cloud account already gone");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AwsAccount, CloudType};
    use crate::config::AwsBlock;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted platform double that records the calls it receives.
    #[derive(Default)]
    struct ScriptedApi {
        create_duplicate: bool,
        update_fails: bool,
        identify_not_found: bool,
        get_not_found: bool,
        delete_not_found: bool,
        identified_id: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn stored_account(&self, cloud_type: CloudType, account_id: &str) -> CloudAccountVariant {
            assert_eq!(cloud_type, CloudType::Aws, "scripted double only stores AWS");
            CloudAccountVariant::Aws(AwsAccount {
                account_id: account_id.to_string(),
                enabled: true,
                external_id: "ext-1".to_string(),
                group_ids: vec!["g1".to_string()],
                name: "aws-prod".to_string(),
                role_arn: "arn".to_string(),
                account_type: "account".to_string(),
                protection_mode: "MONITOR".to_string(),
            })
        }
    }

    #[async_trait]
    impl AccountApi for ScriptedApi {
        async fn create(&self, account: &CloudAccountVariant) -> Result<(), PlatformError> {
            self.record("create");
            if self.create_duplicate {
                return Err(PlatformError::Duplicate {
                    name: account.name().to_string(),
                });
            }
            Ok(())
        }

        async fn update(&self, _account: &CloudAccountVariant) -> Result<(), PlatformError> {
            self.record("update");
            if self.update_fails {
                return Err(PlatformError::Api {
                    status: 500,
                    message: "update failed".to_string(),
                });
            }
            Ok(())
        }

        async fn get(
            &self,
            cloud_type: CloudType,
            account_id: &str,
        ) -> Result<CloudAccountVariant, PlatformError> {
            self.record("get");
            if self.get_not_found {
                return Err(PlatformError::NotFound {
                    what: format!("cloud account {}/{}", cloud_type, account_id),
                });
            }
            Ok(self.stored_account(cloud_type, account_id))
        }

        async fn delete(
            &self,
            cloud_type: CloudType,
            account_id: &str,
        ) -> Result<(), PlatformError> {
            self.record("delete");
            if self.delete_not_found {
                return Err(PlatformError::NotFound {
                    what: format!("cloud account {}/{}", cloud_type, account_id),
                });
            }
            Ok(())
        }

        async fn disable(
            &self,
            _cloud_type: CloudType,
            _account_id: &str,
        ) -> Result<(), PlatformError> {
            self.record("disable");
            Ok(())
        }

        async fn identify(
            &self,
            cloud_type: CloudType,
            name: &str,
        ) -> Result<String, PlatformError> {
            self.record("identify");
            if self.identify_not_found {
                return Err(PlatformError::NotFound {
                    what: format!("cloud account name '{}' ({})", name, cloud_type),
                });
            }
            Ok(self
                .identified_id
                .clone()
                .unwrap_or_else(|| "123456789012".to_string()))
        }
    }

    fn aws_config(update_on_create: bool) -> AccountConfig {
        AccountConfig {
            aws: Some(AwsBlock {
                account_id: "123456789012".to_string(),
                enabled: true,
                external_id: "ext-1".to_string(),
                group_ids: vec!["g1".to_string()],
                name: "aws-prod".to_string(),
                role_arn: "arn".to_string(),
                account_type: "account".to_string(),
                protection_mode: "MONITOR".to_string(),
            }),
            update_on_create,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_resolves_identity_and_reads_back() {
        let api = ScriptedApi::default();
        let manager = AccountManager::new(api);

        let (identity, observed) = manager.create(&aws_config(false)).await.unwrap();

        assert_eq!(identity.to_string(), "aws:123456789012");
        assert!(observed.is_some());
        assert_eq!(
            manager.api.calls(),
            ["create", "identify", "get"],
            "create must be followed by identify and a full read"
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_without_opt_in_fails_without_update() {
        let api = ScriptedApi {
            create_duplicate: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let err = manager.create(&aws_config(false)).await.unwrap_err();

        assert!(matches!(
            err,
            OnrampError::Platform(PlatformError::Duplicate { .. })
        ));
        assert_eq!(
            manager.api.calls(),
            ["create"],
            "no update or identify may be issued after a refused duplicate"
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_with_opt_in_falls_back_to_update() {
        let api = ScriptedApi {
            create_duplicate: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let (identity, observed) = manager.create(&aws_config(true)).await.unwrap();

        assert_eq!(identity.cloud_type, CloudType::Aws);
        assert!(observed.is_some());
        assert_eq!(manager.api.calls(), ["create", "update", "identify", "get"]);
    }

    #[tokio::test]
    async fn test_create_fallback_derives_id_when_name_index_lags() {
        let api = ScriptedApi {
            create_duplicate: true,
            identify_not_found: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let (identity, observed) = manager.create(&aws_config(true)).await.unwrap();

        assert_eq!(
            identity.account_id, "123456789012",
            "identity must fall back to the submitted account id"
        );
        assert!(observed.is_some());
        assert_eq!(manager.api.calls(), ["create", "update", "identify", "get"]);
    }

    #[tokio::test]
    async fn test_create_identify_not_found_without_fallback_is_fatal() {
        let api = ScriptedApi {
            identify_not_found: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let err = manager.create(&aws_config(true)).await.unwrap_err();

        assert!(matches!(
            err,
            OnrampError::Platform(PlatformError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_fallback_update_failure_is_fatal() {
        let api = ScriptedApi {
            create_duplicate: true,
            update_fails: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let err = manager.create(&aws_config(true)).await.unwrap_err();

        assert!(matches!(
            err,
            OnrampError::Platform(PlatformError::Api { status: 500, .. })
        ));
        assert_eq!(manager.api.calls(), ["create", "update"]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_config() {
        let manager = AccountManager::new(ScriptedApi::default());
        let err = manager.create(&AccountConfig::default()).await.unwrap_err();
        assert!(matches!(err, OnrampError::Config(_)));
        assert!(manager.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_not_found_is_absent_not_error() {
        let api = ScriptedApi {
            get_not_found: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let identity = AccountIdentity::new(CloudType::Aws, "123456789012");
        let observed = manager.read(&identity).await.unwrap();
        assert!(observed.is_none());
    }

    #[tokio::test]
    async fn test_update_pushes_then_reads_back() {
        let manager = AccountManager::new(ScriptedApi::default());

        let identity = AccountIdentity::new(CloudType::Aws, "123456789012");
        let observed = manager
            .update(&identity, &aws_config(false))
            .await
            .unwrap();

        assert!(observed.is_some());
        assert_eq!(manager.api.calls(), ["update", "get"]);
    }

    #[tokio::test]
    async fn test_delete_not_found_is_success() {
        let api = ScriptedApi {
            delete_not_found: true,
            ..Default::default()
        };
        let manager = AccountManager::new(api);

        let identity = AccountIdentity::new(CloudType::Aws, "123456789012");
        manager.delete(&identity, false).await.unwrap();
        assert_eq!(manager.api.calls(), ["delete"]);
    }

    #[tokio::test]
    async fn test_delete_with_disable_on_destroy_disables() {
        let manager = AccountManager::new(ScriptedApi::default());

        let identity = AccountIdentity::new(CloudType::Aws, "123456789012");
        manager.delete(&identity, true).await.unwrap();
        assert_eq!(
            manager.api.calls(),
            ["disable"],
            "disable_on_destroy must substitute disable for delete"
        );
    }
}
