use tabled::{Table, Tabled};

use crate::account::CloudAccountVariant;

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "CLOUD")]
    cloud: String,
    #[tabled(rename = "ACCOUNT ID")]
    account_id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ENABLED")]
    enabled: bool,
    #[tabled(rename = "GROUPS")]
    groups: String,
}

impl From<&CloudAccountVariant> for AccountRow {
    fn from(account: &CloudAccountVariant) -> Self {
        Self {
            cloud: account.cloud_type().to_string(),
            account_id: account.account_id().to_string(),
            name: account.name().to_string(),
            enabled: account.enabled(),
            groups: account.group_ids().join(", "),
        }
    }
}

/// One-line summary table of a fetched account. Secret fields are never
/// part of the summary.
pub fn render_account(account: &CloudAccountVariant) -> String {
    Table::new([AccountRow::from(account)]).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AlibabaAccount, AwsAccount};

    #[test]
    fn test_render_contains_identity_fields() {
        let account = CloudAccountVariant::Alibaba(AlibabaAccount {
            account_id: "ali-1".to_string(),
            group_ids: vec!["g1".to_string(), "g2".to_string()],
            name: "ali-prod".to_string(),
            ram_arn: "acs:ram::1:role/monitor".to_string(),
            enabled: true,
        });

        let table = render_account(&account);
        assert!(table.contains("alibaba"));
        assert!(table.contains("ali-1"));
        assert!(table.contains("ali-prod"));
        assert!(table.contains("g1, g2"));
    }

    #[test]
    fn test_render_never_contains_secrets() {
        let account = CloudAccountVariant::Aws(AwsAccount {
            account_id: "123456789012".to_string(),
            enabled: true,
            external_id: "super_secret_external_id".to_string(),
            group_ids: vec![],
            name: "aws-prod".to_string(),
            role_arn: "arn".to_string(),
            account_type: "account".to_string(),
            protection_mode: "MONITOR".to_string(),
        });

        let table = render_account(&account);
        assert!(!table.contains("super_secret_external_id"));
    }
}
