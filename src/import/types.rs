use serde::{Deserialize, Serialize};

/// One user record of an import batch, after schema validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Emails of the users an import created and updated, in batch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: Vec<String>,
    pub updated: Vec<String>,
}

impl ImportSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.created.len().saturating_add(self.updated.len())
    }
}
