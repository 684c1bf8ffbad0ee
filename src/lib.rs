//! # feedback
//!
//! Host-testable core of the customer feedback widget and the operator
//! dashboard. Nothing here touches the DOM; `feedback_web` binds these types
//! to the page.
//!
//! ## Quick Start
//!
//! ```
//! use feedback::prelude::*;
//!
//! let mut survey = SurveyController::new();
//! survey.start();
//! assert_eq!(survey.select_overall(OverallRating::Happy), Some(Step::Categories));
//!
//! let stars = survey.select_star(Category::Food, StarRating::new(3).unwrap());
//! assert_eq!(stars, Some([true, true, true, false, false]));
//!
//! assert_eq!(star_glyphs(4.6), "★★★★☆");
//! assert_eq!(NpsBand::from_score(55.0).label(), "Excellent");
//! ```
//!
//! ## Modules
//!
//! - [`survey`]: step controller and submit flow
//! - [`dashboard`]: stats panel, trend chart geometry, feedback table
//! - [`nav`]: responsive sidebar toggle
//! - [`api`]: backend traits and response classification
//! - [`config`]: client configuration

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod float_fmt;
pub mod model;
pub mod nav;
pub mod survey;

pub mod prelude {
    pub use crate::api::{DashboardApi, RawResponse, ReviewAck, SubmitAck, SurveyApi};
    pub use crate::config::ClientConfig;
    pub use crate::dashboard::{
        star_glyphs, Dashboard, DashboardStats, FeedbackListPage, ListView, NpsBand,
        PageButton, ReviewOutcome, StatsView, TrendSeries,
    };
    pub use crate::error::FeedbackError;
    pub use crate::model::{Category, FeedbackRecord, NpsScore, OverallRating, StarRating};
    pub use crate::nav::{MobileMenu, ResizeAction};
    pub use crate::survey::{Card, Phase, Step, StepInit, SubmitOutcome, SurveyController};
}
