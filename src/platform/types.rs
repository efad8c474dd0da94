use serde::Deserialize;

/// One entry of the platform's account-name index (`GET /cloud/name`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameEntry {
    pub cloud_type: String,
    pub name: String,
    pub id: String,
}

/// Error body shape returned by the platform on failed requests.
#[derive(Debug, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiErrorBody {
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}
