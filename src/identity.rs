use std::fmt;
use std::str::FromStr;

use crate::account::CloudType;
use crate::config::ConfigError;

/// Separator between cloud type and platform id. The platform never
/// issues account identifiers containing it.
const ID_SEPARATOR: char = ':';

/// The durable identity of an onboarded account: the cloud type plus the
/// platform-side account id, persisted between lifecycle calls as a single
/// opaque string (`aws:123456789012`). Import accepts the same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountIdentity {
    pub cloud_type: CloudType,
    pub account_id: String,
}

impl AccountIdentity {
    pub fn new(cloud_type: CloudType, account_id: impl Into<String>) -> Self {
        Self {
            cloud_type,
            account_id: account_id.into(),
        }
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.cloud_type, ID_SEPARATOR, self.account_id)
    }
}

impl FromStr for AccountIdentity {
    type Err = ConfigError;

    /// Exact inverse of `Display`: split on the first separator only, so a
    /// platform id containing further separators survives the round trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cloud_type, account_id) =
            s.split_once(ID_SEPARATOR).ok_or_else(|| ConfigError::MalformedId {
                input: s.to_string(),
            })?;

        let cloud_type = cloud_type
            .parse::<CloudType>()
            .map_err(|_| ConfigError::MalformedId {
                input: s.to_string(),
            })?;

        Ok(AccountIdentity {
            cloud_type,
            account_id: account_id.to_string(),
        })
    }
}
