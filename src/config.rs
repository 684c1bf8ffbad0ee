//! Client configuration.
//!
//! Every field has a default so a partial (or empty) JSON override still
//! parses. The web crate reads overrides from `localStorage`.

use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means same origin.
    #[serde(default)]
    pub api_base: String,
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u32,
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u32,
    #[serde(default = "default_mobile_breakpoint_px")]
    pub mobile_breakpoint_px: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_auto_advance_ms() -> u32 {
    300
}

fn default_resize_debounce_ms() -> u32 {
    250
}

fn default_mobile_breakpoint_px() -> u32 {
    768
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            auto_advance_ms: default_auto_advance_ms(),
            resize_debounce_ms: default_resize_debounce_ms(),
            mobile_breakpoint_px: default_mobile_breakpoint_px(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: ClientConfig = serde_json::from_str(raw)?;
        if cfg.mobile_breakpoint_px == 0 {
            return Err(FeedbackError::Validation(
                "mobile_breakpoint_px must be positive".to_string(),
            ));
        }
        Ok(cfg)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub fn submit_url(&self) -> String {
        self.url("/api/feedback")
    }

    pub fn stats_url(&self) -> String {
        self.url("/dashboard/api/stats")
    }

    pub fn feedback_page_url(&self, page: u32) -> String {
        self.url(&format!("/dashboard/api/feedback?page={page}"))
    }

    pub fn review_url(&self, feedback_id: i64) -> String {
        self.url(&format!("/dashboard/api/feedback/{feedback_id}/review"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_yields_defaults() {
        let cfg = ClientConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.auto_advance_ms, 300);
        assert_eq!(cfg.resize_debounce_ms, 250);
        assert_eq!(cfg.mobile_breakpoint_px, 768);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ClientConfig::from_json(r#"{"api_base":"https://kiosk.example/","mobile_breakpoint_px":600}"#)
            .unwrap();
        assert_eq!(cfg.mobile_breakpoint_px, 600);
        assert_eq!(cfg.auto_advance_ms, 300);
        assert_eq!(cfg.stats_url(), "https://kiosk.example/dashboard/api/stats");
    }

    #[test]
    fn endpoint_paths_match_backend_routes() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.submit_url(), "/api/feedback");
        assert_eq!(cfg.feedback_page_url(3), "/dashboard/api/feedback?page=3");
        assert_eq!(cfg.review_url(42), "/dashboard/api/feedback/42/review");
    }

    #[test]
    fn rejects_zero_breakpoint_and_bad_json() {
        assert!(ClientConfig::from_json(r#"{"mobile_breakpoint_px":0}"#).is_err());
        assert!(matches!(
            ClientConfig::from_json("not json"),
            Err(FeedbackError::Decode(_))
        ));
    }
}
