//! Customer survey: one visible card at a time, answers accumulated into a
//! [`FeedbackRecord`] and submitted once.
//!
//! Step 1 (overall emoji) auto-advances; steps 2 and 3 move on through an
//! explicit "next"; step 4 ends with submit. A failed submit leaves the user on
//! step 4 so they can retry. After a successful submit the controller is
//! `Done` and ignores further input.

use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::api::{SubmitAck, SurveyApi};
use crate::error::{FeedbackError, Result};
use crate::model::{Category, FeedbackRecord, NpsScore, OverallRating, StarRating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Overall = 1,
    Categories = 2,
    Nps = 3,
    Comment = 4,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[Step::Overall, Step::Categories, Step::Nps, Step::Comment]
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Step::all().iter().copied().find(|s| s.number() == n)
    }

    pub fn card_id(self) -> String {
        format!("question-{}", self.number())
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }
}

/// A survey card; the thank-you card is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    Question(Step),
    ThankYou,
}

impl Card {
    pub fn element_id(self) -> String {
        match self {
            Card::Question(step) => step.card_id(),
            Card::ThankYou => THANK_YOU_ID.to_string(),
        }
    }
}

pub const THANK_YOU_ID: &str = "thank-you";

/// Widget setup the view performs after revealing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepInit {
    Nothing,
    /// Clear and rebuild the five star rows.
    BuildStars,
    /// Clear and rebuild the 0..=10 buttons.
    BuildNps,
    /// Attach the comment-length listener (first visit only).
    BindComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Landing view, before `start`.
    Idle,
    Step(Step),
    Submitting,
    Done,
}

#[derive(Debug)]
pub struct SurveyController {
    phase: Phase,
    record: FeedbackRecord,
    comment_bound: bool,
}

impl Default for SurveyController {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            record: FeedbackRecord::default(),
            comment_bound: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn record(&self) -> &FeedbackRecord {
        &self.record
    }

    /// Step whose card is currently shown (step 4 while submitting).
    pub fn current_step(&self) -> Option<Step> {
        match self.phase {
            Phase::Step(s) => Some(s),
            Phase::Submitting => Some(Step::Comment),
            Phase::Idle | Phase::Done => None,
        }
    }

    pub fn visible_card(&self) -> Option<Card> {
        match self.phase {
            Phase::Done => Some(Card::ThankYou),
            _ => self.current_step().map(Card::Question),
        }
    }

    fn accepting_input(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Step(_))
    }

    pub fn start(&mut self) -> Option<StepInit> {
        self.show_step(Step::Overall)
    }

    /// Reveals `step`. `None` when the survey no longer takes input.
    pub fn show_step(&mut self, step: Step) -> Option<StepInit> {
        if !self.accepting_input() {
            debug!(step = step.number(), "survey closed; ignoring step change");
            return None;
        }
        self.phase = Phase::Step(step);
        let init = match step {
            Step::Overall => StepInit::Nothing,
            Step::Categories => StepInit::BuildStars,
            Step::Nps => StepInit::BuildNps,
            Step::Comment if !self.comment_bound => {
                self.comment_bound = true;
                StepInit::BindComment
            }
            Step::Comment => StepInit::Nothing,
        };
        Some(init)
    }

    /// Records the overall rating and returns the step to auto-advance to.
    pub fn select_overall(&mut self, rating: OverallRating) -> Option<Step> {
        if !self.accepting_input() {
            return None;
        }
        self.record.overall_rating = Some(rating);
        Step::Overall.next()
    }

    /// Records a category rating and returns the star highlight states.
    pub fn select_star(&mut self, category: Category, rating: StarRating) -> Option<[bool; 5]> {
        if !self.accepting_input() {
            return None;
        }
        self.record.set_category_rating(category, rating);
        Some(rating.highlight())
    }

    pub fn select_nps(&mut self, score: NpsScore) -> bool {
        if !self.accepting_input() {
            return false;
        }
        self.record.nps_score = Some(score);
        true
    }

    /// Syncs the comment; returns the counter value (UTF-16 units, as the
    /// browser reports textarea length).
    pub fn set_comment(&mut self, text: &str) -> usize {
        if self.accepting_input() {
            self.record.comment = text.to_string();
        }
        text.encode_utf16().count()
    }

    /// Snapshot to send, `Ok(None)` if a submit is pending or already done.
    pub fn begin_submit(&mut self) -> Result<Option<FeedbackRecord>> {
        match self.phase {
            Phase::Submitting | Phase::Done => return Ok(None),
            Phase::Idle | Phase::Step(_) => {}
        }
        self.record.validate()?;
        self.phase = Phase::Submitting;
        Ok(Some(self.record.clone()))
    }

    pub fn finish_submit(&mut self, result: Result<SubmitAck>) -> SubmitOutcome {
        if self.phase != Phase::Submitting {
            warn!(phase = ?self.phase, "submit finished outside of submitting phase");
        }
        match result {
            Ok(ack) => {
                self.phase = Phase::Done;
                info!(feedback_id = ?ack.feedback_id, "feedback submitted");
                SubmitOutcome::Accepted(ack)
            }
            Err(e) => {
                self.phase = Phase::Step(Step::Comment);
                warn!("error submitting feedback: {e}");
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blocked client-side; nothing was sent.
    Invalid(FeedbackError),
    /// Already submitting or submitted.
    Ignored,
    Accepted(SubmitAck),
    Failed(FeedbackError),
}

impl SubmitOutcome {
    /// Alert text for outcomes the user must see.
    pub fn alert(&self) -> Option<String> {
        match self {
            SubmitOutcome::Invalid(e) | SubmitOutcome::Failed(e) => Some(e.user_message()),
            SubmitOutcome::Ignored | SubmitOutcome::Accepted(_) => None,
        }
    }
}

/// Validates, calls `on_send` (show the loading indicator) and submits.
pub async fn submit<A, F>(survey: &RefCell<SurveyController>, api: &A, on_send: F) -> SubmitOutcome
where
    A: SurveyApi,
    F: FnOnce(),
{
    let record = match survey.borrow_mut().begin_submit() {
        Ok(Some(record)) => record,
        Ok(None) => return SubmitOutcome::Ignored,
        Err(e) => return SubmitOutcome::Invalid(e),
    };

    on_send();
    debug!(?record, "submitting feedback");
    let result = api.submit(&record).await;
    survey.borrow_mut().finish_submit(result)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct FakeApi {
        calls: Cell<u32>,
        response: Result<SubmitAck>,
        last: RefCell<Option<FeedbackRecord>>,
    }

    impl FakeApi {
        fn answering(response: Result<SubmitAck>) -> Self {
            Self {
                calls: Cell::new(0),
                response,
                last: RefCell::new(None),
            }
        }
    }

    impl SurveyApi for FakeApi {
        async fn submit(&self, record: &FeedbackRecord) -> Result<SubmitAck> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some(record.clone());
            self.response.clone()
        }
    }

    fn ack() -> SubmitAck {
        SubmitAck {
            success: true,
            message: Some("Thank you for your feedback!".into()),
            feedback_id: Some(17),
        }
    }

    #[test]
    fn steps_request_their_widgets() {
        let mut s = SurveyController::new();
        assert_eq!(s.visible_card(), None);
        assert_eq!(s.start(), Some(StepInit::Nothing));
        assert_eq!(s.show_step(Step::Categories), Some(StepInit::BuildStars));
        assert_eq!(s.show_step(Step::Nps), Some(StepInit::BuildNps));
        assert_eq!(s.show_step(Step::Comment), Some(StepInit::BindComment));
        // Revisiting rebuilds stars but binds the comment listener only once.
        assert_eq!(s.show_step(Step::Categories), Some(StepInit::BuildStars));
        assert_eq!(s.show_step(Step::Comment), Some(StepInit::Nothing));
        assert_eq!(s.visible_card(), Some(Card::Question(Step::Comment)));
    }

    #[test]
    fn overall_selection_advances_to_categories() {
        let mut s = SurveyController::new();
        s.start();
        assert_eq!(s.select_overall(OverallRating::Neutral), Some(Step::Categories));
        assert_eq!(s.record().overall_rating, Some(OverallRating::Neutral));
    }

    #[test]
    fn comment_counter_tracks_length() {
        let mut s = SurveyController::new();
        s.show_step(Step::Comment);
        assert_eq!(s.set_comment("hello"), 5);
        assert_eq!(s.set_comment("café 😊"), 7);
        assert_eq!(s.record().comment, "café 😊");
    }

    #[test]
    fn missing_overall_never_reaches_network() {
        let survey = RefCell::new(SurveyController::new());
        survey.borrow_mut().show_step(Step::Comment);
        let api = FakeApi::answering(Ok(ack()));
        let sent = Cell::new(false);

        let outcome = pollster::block_on(submit(&survey, &api, || sent.set(true)));
        assert_eq!(outcome, SubmitOutcome::Invalid(FeedbackError::missing_overall()));
        assert_eq!(outcome.alert().as_deref(), Some("Please provide an overall rating"));
        assert_eq!(api.calls.get(), 0);
        assert!(!sent.get());
        assert_eq!(survey.borrow().phase(), Phase::Step(Step::Comment));
    }

    #[test]
    fn successful_submit_shows_only_thank_you() {
        let survey = RefCell::new(SurveyController::new());
        {
            let mut s = survey.borrow_mut();
            s.start();
            s.select_overall(OverallRating::Happy);
            s.show_step(Step::Categories);
            s.select_star(Category::Staff, StarRating::new(4).unwrap());
            s.show_step(Step::Nps);
            s.select_nps(NpsScore::new(9).unwrap());
            s.show_step(Step::Comment);
            s.set_comment("quick service");
        }
        let api = FakeApi::answering(Ok(ack()));

        let outcome = pollster::block_on(submit(&survey, &api, || {}));
        assert_eq!(outcome, SubmitOutcome::Accepted(ack()));
        assert_eq!(api.calls.get(), 1);
        assert_eq!(survey.borrow().visible_card(), Some(Card::ThankYou));

        let sent = api.last.borrow().clone().unwrap();
        assert_eq!(sent.staff_rating.map(StarRating::get), Some(4));
        assert_eq!(sent.comment, "quick service");

        // Done is terminal.
        assert_eq!(survey.borrow_mut().show_step(Step::Overall), None);
        let again = pollster::block_on(submit(&survey, &api, || {}));
        assert_eq!(again, SubmitOutcome::Ignored);
        assert_eq!(api.calls.get(), 1);
    }

    #[test]
    fn submit_while_in_flight_is_ignored_without_side_effects() {
        let survey = RefCell::new(SurveyController::new());
        survey.borrow_mut().select_overall(OverallRating::Happy);
        let pending = survey.borrow_mut().begin_submit().unwrap();
        assert!(pending.is_some());

        let api = FakeApi::answering(Ok(ack()));
        let sent = Cell::new(false);
        let outcome = pollster::block_on(submit(&survey, &api, || sent.set(true)));
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(outcome.alert(), None);
        assert!(!sent.get());
        assert_eq!(api.calls.get(), 0);
        assert_eq!(survey.borrow().phase(), Phase::Submitting);
    }

    #[test]
    fn failed_submit_returns_to_last_step() {
        let survey = RefCell::new(SurveyController::new());
        survey.borrow_mut().select_overall(OverallRating::Sad);
        survey.borrow_mut().show_step(Step::Comment);
        let api = FakeApi::answering(Err(FeedbackError::Server {
            status: 429,
            message: Some("Please wait 4 more minute(s) before submitting again".into()),
        }));

        let outcome = pollster::block_on(submit(&survey, &api, || {}));
        assert_eq!(
            outcome.alert().as_deref(),
            Some("Please wait 4 more minute(s) before submitting again")
        );
        assert_eq!(survey.borrow().phase(), Phase::Step(Step::Comment));

        // Retry is allowed.
        let retry = pollster::block_on(submit(&survey, &api, || {}));
        assert!(matches!(retry, SubmitOutcome::Failed(_)));
        assert_eq!(api.calls.get(), 2);
    }

    #[test]
    fn transport_failure_uses_connectivity_message() {
        let survey = RefCell::new(SurveyController::new());
        survey.borrow_mut().select_overall(OverallRating::Happy);
        let api = FakeApi::answering(Err(FeedbackError::Transport("Failed to fetch".into())));

        let outcome = pollster::block_on(submit(&survey, &api, || {}));
        assert_eq!(outcome.alert().as_deref(), Some(crate::error::MSG_NETWORK));
    }
}
