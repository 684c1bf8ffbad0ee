//! Backend boundary.
//!
//! The traits are implemented by the browser `fetch` client in `feedback_web`
//! and by in-memory fakes in tests. Transport code only has to produce a
//! [`RawResponse`]; status classification and JSON decoding happen here so
//! both sides agree on the failure taxonomy.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dashboard::{DashboardStats, FeedbackListPage};
use crate::error::{FeedbackError, Result};
use crate::model::FeedbackRecord;

/// Status and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub feedback_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reviewed: Option<bool>,
    #[serde(default)]
    pub feedback_id: Option<i64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Non-2xx → `Server` carrying the backend's `{error}` text when present.
pub fn classify(resp: &RawResponse) -> Result<()> {
    if resp.ok() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(|b| b.error);
    Err(FeedbackError::Server {
        status: resp.status,
        message,
    })
}

/// Classify, then decode a 2xx body strictly.
pub fn decode_json<T: DeserializeOwned>(resp: &RawResponse) -> Result<T> {
    classify(resp)?;
    Ok(serde_json::from_str(&resp.body)?)
}

/// Classify, then decode a 2xx body that callers do not depend on.
pub fn decode_lenient<T: DeserializeOwned + Default>(resp: &RawResponse) -> Result<T> {
    classify(resp)?;
    match serde_json::from_str(&resp.body) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::debug!(status = resp.status, "ignoring unparsable ack body: {e}");
            Ok(T::default())
        }
    }
}

/// Customer-facing endpoint.
#[allow(async_fn_in_trait)]
pub trait SurveyApi {
    async fn submit(&self, record: &FeedbackRecord) -> Result<SubmitAck>;
}

/// Operator-facing endpoints.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    async fn stats(&self) -> Result<DashboardStats>;
    async fn feedback_page(&self, page: u32) -> Result<FeedbackListPage>;
    async fn toggle_reviewed(&self, feedback_id: i64) -> Result<ReviewAck>;
}
