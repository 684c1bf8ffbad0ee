//! Dashboard controller state and the load/toggle flows.
//!
//! The controller lives in a `RefCell` owned by the page. Flows only borrow it
//! between awaits so a click handler running while a request is pending never
//! trips over an outstanding borrow.

use std::cell::RefCell;

use hashbrown::HashSet;
use tracing::{debug, error, warn};

use super::list::ListView;
use super::stats::StatsView;
use crate::api::DashboardApi;
use crate::error::{FeedbackError, Result};

#[derive(Debug)]
pub struct Dashboard {
    current_page: u32,
    pending_reviews: HashSet<i64>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            pending_reviews: HashSet::new(),
        }
    }

    /// Page last loaded successfully (1 before any load).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_review_pending(&self, feedback_id: i64) -> bool {
        self.pending_reviews.contains(&feedback_id)
    }

    /// Returns false when a toggle for this row is already in flight.
    fn begin_review(&mut self, feedback_id: i64) -> bool {
        self.pending_reviews.insert(feedback_id)
    }

    fn end_review(&mut self, feedback_id: i64) {
        self.pending_reviews.remove(&feedback_id);
    }
}

pub async fn load_stats<A: DashboardApi>(api: &A) -> Result<StatsView> {
    debug!("loading dashboard stats");
    match api.stats().await {
        Ok(stats) => Ok(StatsView::from(&stats)),
        Err(e) => {
            error!("error loading dashboard data: {e}");
            Err(e)
        }
    }
}

/// Loads `page`; failures become the error placeholder.
pub async fn load_page<A: DashboardApi>(dash: &RefCell<Dashboard>, api: &A, page: u32) -> ListView {
    let page = page.max(1);
    debug!(page, "loading feedback list");
    match api.feedback_page(page).await {
        Ok(data) => {
            dash.borrow_mut().current_page = page;
            ListView::from_page(&data)
        }
        Err(e) => {
            error!(page, "error loading feedback: {e}");
            ListView::load_failed()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// A toggle for the same row was still pending.
    Ignored,
    /// Mutation accepted; the current page was fetched again.
    Reloaded(ListView),
    /// Logged only; nothing on screen changes.
    Failed(FeedbackError),
}

pub async fn toggle_reviewed<A: DashboardApi>(
    dash: &RefCell<Dashboard>,
    api: &A,
    feedback_id: i64,
) -> ReviewOutcome {
    if !dash.borrow_mut().begin_review(feedback_id) {
        debug!(feedback_id, "review toggle already in flight");
        return ReviewOutcome::Ignored;
    }

    let result = api.toggle_reviewed(feedback_id).await;
    dash.borrow_mut().end_review(feedback_id);

    match result {
        Ok(ack) => {
            debug!(feedback_id, reviewed = ?ack.reviewed, "review toggled");
            let page = dash.borrow().current_page();
            ReviewOutcome::Reloaded(load_page(dash, api, page).await)
        }
        Err(e) => {
            warn!(feedback_id, "error toggling review status: {e}");
            ReviewOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::api::ReviewAck;
    use crate::dashboard::{DashboardStats, FeedbackListPage};

    #[derive(Default)]
    struct FakeApi {
        toggles: Cell<u32>,
        page_loads: RefCell<Vec<u32>>,
        fail_toggle: bool,
        fail_pages: bool,
    }

    impl DashboardApi for FakeApi {
        async fn stats(&self) -> Result<DashboardStats> {
            Err(FeedbackError::Server {
                status: 500,
                message: Some("Error loading statistics".into()),
            })
        }

        async fn feedback_page(&self, page: u32) -> Result<FeedbackListPage> {
            self.page_loads.borrow_mut().push(page);
            if self.fail_pages {
                return Err(FeedbackError::Transport("offline".into()));
            }
            Ok(FeedbackListPage {
                feedback: vec![],
                current_page: page,
                pages: 3,
                total: 0,
                per_page: 20,
                has_next: false,
                has_prev: false,
            })
        }

        async fn toggle_reviewed(&self, feedback_id: i64) -> Result<ReviewAck> {
            self.toggles.set(self.toggles.get() + 1);
            if self.fail_toggle {
                return Err(FeedbackError::Server {
                    status: 404,
                    message: Some("Feedback not found".into()),
                });
            }
            Ok(ReviewAck {
                success: true,
                reviewed: Some(true),
                feedback_id: Some(feedback_id),
            })
        }
    }

    #[test]
    fn toggle_reloads_current_page_once() {
        let api = FakeApi::default();
        let dash = RefCell::new(Dashboard::new());

        pollster::block_on(load_page(&dash, &api, 2));
        assert_eq!(dash.borrow().current_page(), 2);

        let outcome = pollster::block_on(toggle_reviewed(&dash, &api, 11));
        assert!(matches!(outcome, ReviewOutcome::Reloaded(_)));
        assert_eq!(api.toggles.get(), 1);
        assert_eq!(*api.page_loads.borrow(), vec![2, 2]);
        assert!(!dash.borrow().is_review_pending(11));
    }

    #[test]
    fn failed_toggle_does_not_reload() {
        let api = FakeApi {
            fail_toggle: true,
            ..Default::default()
        };
        let dash = RefCell::new(Dashboard::new());

        let outcome = pollster::block_on(toggle_reviewed(&dash, &api, 5));
        assert!(matches!(outcome, ReviewOutcome::Failed(FeedbackError::Server { status: 404, .. })));
        assert_eq!(api.toggles.get(), 1);
        assert!(api.page_loads.borrow().is_empty());
        assert!(!dash.borrow().is_review_pending(5));
    }

    #[test]
    fn in_flight_toggle_is_ignored() {
        let api = FakeApi::default();
        let dash = RefCell::new(Dashboard::new());
        assert!(dash.borrow_mut().begin_review(3));

        let outcome = pollster::block_on(toggle_reviewed(&dash, &api, 3));
        assert_eq!(outcome, ReviewOutcome::Ignored);
        assert_eq!(api.toggles.get(), 0);
    }

    #[test]
    fn failed_load_keeps_page_and_shows_error_row() {
        let api = FakeApi {
            fail_pages: true,
            ..Default::default()
        };
        let dash = RefCell::new(Dashboard::new());

        let view = pollster::block_on(load_page(&dash, &api, 3));
        assert_eq!(view, ListView::load_failed());
        assert_eq!(dash.borrow().current_page(), 1);
    }

    #[test]
    fn stats_failure_is_surfaced() {
        let api = FakeApi::default();
        let err = pollster::block_on(load_stats(&api)).unwrap_err();
        assert!(matches!(err, FeedbackError::Server { status: 500, .. }));
    }
}
