pub mod history;
pub mod http;
pub mod memory;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::session::result::TestResult;

pub use history::{HistoryView, ScoreHistory};
pub use http::HttpScoreStore;
pub use memory::MemoryScoreStore;

/// One stored test result, as the score backend exchanges it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opaque_id"
    )]
    pub id: Option<String>,
    pub user_id: String,
    pub words_per_minute: u32,
    #[serde(rename = "accuracy")]
    pub accuracy_percent: u32,
}

impl ScoreRecord {
    /// The body posted after a test: no id, accuracy rounded to a whole percent.
    pub fn submission(user_id: &str, result: &TestResult) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            words_per_minute: result.wpm,
            accuracy_percent: result.submitted_accuracy(),
        }
    }
}

/// Backends hand out ids as strings or numbers; both are kept as text.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreStoreError {
    #[error("Failed to {action}: {status} {text}")]
    Status {
        action: &'static str,
        status: u16,
        text: String,
    },
    #[error("invalid score API url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("this build has no network support")]
    Offline,
    #[cfg(feature = "network")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub trait ScoreStore: Send + Sync {
    fn fetch_scores(&self, user_id: &str) -> Result<Vec<ScoreRecord>, ScoreStoreError>;
    fn submit_score(&self, record: &ScoreRecord) -> Result<ScoreRecord, ScoreStoreError>;
}
