//! `fetch`-backed implementation of the backend traits.

use feedback::api::{
    decode_json, decode_lenient, DashboardApi, RawResponse, ReviewAck, SubmitAck, SurveyApi,
};
use feedback::config::ClientConfig;
use feedback::dashboard::{DashboardStats, FeedbackListPage};
use feedback::error::{FeedbackError, Result};
use feedback::model::FeedbackRecord;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::dom;

#[derive(Clone)]
pub(super) struct FetchClient {
    config: ClientConfig,
}

impl FetchClient {
    pub(super) fn new(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    async fn send(&self, method: &str, url: &str, json_body: Option<String>) -> Result<RawResponse> {
        let init = RequestInit::new();
        init.set_method(method);
        if let Some(body) = &json_body {
            init.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &init)
            .map_err(|e| dom::js_err("request", e))?;
        if json_body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| dom::js_err("request headers", e))?;
        }

        // Anything that fails before a status arrives is a transport error.
        let value = JsFuture::from(dom::window()?.fetch_with_request(&request))
            .await
            .map_err(|e| FeedbackError::Transport(dom::describe(&e)))?;
        let resp: Response = value
            .dyn_into()
            .map_err(|_| FeedbackError::Transport("fetch: expected Response".to_string()))?;
        let text = resp
            .text()
            .map_err(|e| FeedbackError::Transport(dom::describe(&e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| FeedbackError::Transport(dom::describe(&e)))?
            .as_string()
            .unwrap_or_default();

        debug!(method, url, status = resp.status(), "response");
        Ok(RawResponse::new(resp.status(), body))
    }
}

impl SurveyApi for FetchClient {
    async fn submit(&self, record: &FeedbackRecord) -> Result<SubmitAck> {
        let body = record.to_json()?;
        let resp = self
            .send("POST", &self.config.submit_url(), Some(body))
            .await?;
        decode_lenient(&resp)
    }
}

impl DashboardApi for FetchClient {
    async fn stats(&self) -> Result<DashboardStats> {
        let resp = self.send("GET", &self.config.stats_url(), None).await?;
        decode_json(&resp)
    }

    async fn feedback_page(&self, page: u32) -> Result<FeedbackListPage> {
        let resp = self
            .send("GET", &self.config.feedback_page_url(page), None)
            .await?;
        decode_json(&resp)
    }

    async fn toggle_reviewed(&self, feedback_id: i64) -> Result<ReviewAck> {
        let resp = self
            .send("POST", &self.config.review_url(feedback_id), None)
            .await?;
        decode_lenient(&resp)
    }
}
