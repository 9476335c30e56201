use crate::score::{ScoreRecord, ScoreStore, ScoreStoreError};

/// Client for the score backend:
/// `GET {base}/typing-tests/{userId}` and `POST {base}/typing-tests`.
pub struct HttpScoreStore {
    #[cfg(feature = "network")]
    base: reqwest::Url,
    #[cfg(feature = "network")]
    client: crate::net::HttpClient,
}

impl HttpScoreStore {
    #[cfg(feature = "network")]
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ScoreStoreError> {
        let base = reqwest::Url::parse(base_url).map_err(|e| ScoreStoreError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ScoreStoreError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base url".to_string(),
            });
        }
        let client = crate::net::build_client(timeout_secs)?;
        Ok(Self { base, client })
    }

    #[cfg(not(feature = "network"))]
    pub fn new(_base_url: &str, _timeout_secs: u64) -> Result<Self, ScoreStoreError> {
        Err(ScoreStoreError::Offline)
    }

    /// Append path segments to the base, percent-encoding each one.
    #[cfg(feature = "network")]
    fn endpoint(&self, segments: &[&str]) -> reqwest::Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(feature = "network")]
impl ScoreStore for HttpScoreStore {
    fn fetch_scores(&self, user_id: &str) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        let response = self
            .client
            .get(self.endpoint(&["typing-tests", user_id]))
            .send()?;
        if !response.status().is_success() {
            let (status, text) = crate::net::describe_failure(response);
            return Err(ScoreStoreError::Status {
                action: "fetch scores",
                status,
                text,
            });
        }
        // A backend with no rows may answer `null`.
        let records: Option<Vec<ScoreRecord>> = response.json()?;
        Ok(records.unwrap_or_default())
    }

    fn submit_score(&self, record: &ScoreRecord) -> Result<ScoreRecord, ScoreStoreError> {
        let response = self
            .client
            .post(self.endpoint(&["typing-tests"]))
            .json(record)
            .send()?;
        if !response.status().is_success() {
            let (status, text) = crate::net::describe_failure(response);
            return Err(ScoreStoreError::Status {
                action: "submit score",
                status,
                text,
            });
        }
        Ok(response.json()?)
    }
}

#[cfg(not(feature = "network"))]
impl ScoreStore for HttpScoreStore {
    fn fetch_scores(&self, _user_id: &str) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        Err(ScoreStoreError::Offline)
    }

    fn submit_score(&self, _record: &ScoreRecord) -> Result<ScoreRecord, ScoreStoreError> {
        Err(ScoreStoreError::Offline)
    }
}
