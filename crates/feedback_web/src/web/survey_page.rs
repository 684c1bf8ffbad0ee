//! Survey markup binding: cards, emoji row, star rows, NPS buttons, comment
//! box and submit.

use std::cell::RefCell;
use std::rc::Rc;

use feedback::config::ClientConfig;
use feedback::error::{FeedbackError, Result};
use feedback::model::{Category, NpsScore, OverallRating, StarRating};
use feedback::survey::{self, Card, Step, StepInit, SubmitOutcome, SurveyController};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlTextAreaElement};

use super::dom;
use super::http::FetchClient;

const HIDDEN: &str = "hidden";
const SELECTED: &str = "selected";
const ACTIVE: &str = "active";
const DATA_VALUE: &str = "data-value";
const DATA_SCORE: &str = "data-score";

pub(super) struct SurveyPage {
    survey: RefCell<SurveyController>,
    api: FetchClient,
    auto_advance_ms: u32,
    doc: Document,
    cards: Vec<Element>,
    questions: Vec<(Step, Element)>,
    thank_you: Element,
    loading: Element,
    star_rows: Vec<(Category, Element)>,
    nps_container: Option<Element>,
    submit_triggers: Vec<Element>,
    submit_buttons: Vec<HtmlButtonElement>,
}

impl SurveyPage {
    /// Resolves the markup once; a missing card or indicator is an error.
    pub(super) fn attach(doc: &Document, config: &ClientConfig) -> Result<Rc<Self>> {
        let questions = Step::all()
            .iter()
            .map(|&s| dom::require_id(doc, &s.card_id()).map(|el| (s, el)))
            .collect::<Result<Vec<_>>>()?;
        let thank_you = dom::require_id(doc, &Card::ThankYou.element_id())?;
        let loading = dom::require_id(doc, "loading")?;

        let mut star_rows: Vec<(Category, Element)> = Vec::new();
        for el in dom::query_all(doc, ".stars[data-category]") {
            let key = el.get_attribute("data-category").unwrap_or_default();
            match Category::from_key(&key) {
                Some(c) if star_rows.iter().all(|(seen, _)| *seen != c) => star_rows.push((c, el)),
                Some(_) => warn!(category = %key, "duplicate star container"),
                None => warn!(category = %key, "unknown star category"),
            }
        }
        for &c in Category::all() {
            if star_rows.iter().all(|(seen, _)| *seen != c) {
                warn!(category = c.key(), "no star container");
            }
        }

        let submit_triggers = dom::query_all(doc, "[data-action=\"submit\"]");
        let submit_buttons = submit_triggers
            .iter()
            .filter_map(|el| match el.clone().dyn_into::<HtmlButtonElement>() {
                Ok(b) => Some(b),
                Err(other) => {
                    warn!(
                        tag = %other.tag_name(),
                        "submit trigger is not a button; it cannot be disabled in flight"
                    );
                    None
                }
            })
            .collect();

        let page = Rc::new(Self {
            survey: RefCell::new(SurveyController::new()),
            api: FetchClient::new(config),
            auto_advance_ms: config.auto_advance_ms,
            doc: doc.clone(),
            cards: dom::query_all(doc, ".feedback-card"),
            questions,
            thank_you,
            loading,
            star_rows,
            nps_container: dom::by_id(doc, "nps-buttons"),
            submit_triggers,
            submit_buttons,
        });
        page.wire()?;
        Ok(page)
    }

    fn wire(self: &Rc<Self>) -> Result<()> {
        let emoji = dom::query_all(&self.doc, ".emoji-btn");
        for (i, button) in emoji.into_iter().enumerate() {
            let value = button
                .get_attribute("data-rating")
                .and_then(|v| v.trim().parse::<u8>().ok())
                .unwrap_or(i as u8 + 1);
            let rating = OverallRating::try_from(value)?;
            let page = Rc::clone(self);
            let target = button.clone();
            dom::listen(&button, "click", move |_| page.select_overall(rating, &target))?;
        }

        for button in dom::query_all(&self.doc, "[data-next]") {
            let step = button
                .get_attribute("data-next")
                .and_then(|v| v.trim().parse::<u8>().ok())
                .and_then(Step::from_number)
                .ok_or_else(|| FeedbackError::Dom("bad data-next value".to_string()))?;
            let page = Rc::clone(self);
            dom::listen(&button, "click", move |_| page.show_step(step))?;
        }

        for trigger in &self.submit_triggers {
            let page = Rc::clone(self);
            dom::listen(trigger, "click", move |_| page.submit())?;
        }

        // Stars and NPS buttons are rebuilt on every visit; their containers
        // are not.
        for (category, container) in &self.star_rows {
            let page = Rc::clone(self);
            let category = *category;
            dom::delegate(container, "click", ".star[data-value]", move |el| {
                if let Some(rating) = dom::data::<StarRating>(&el, DATA_VALUE) {
                    page.select_star(category, rating);
                }
            })?;
        }
        if let Some(container) = &self.nps_container {
            let page = Rc::clone(self);
            dom::delegate(container, "click", ".nps-btn[data-score]", move |el| {
                if let Some(score) = dom::data::<NpsScore>(&el, DATA_SCORE) {
                    page.select_nps(score, &el);
                }
            })?;
        }

        let start = dom::query_all(&self.doc, "[data-action=\"start\"]");
        if start.is_empty() {
            self.show_step(Step::Overall);
        }
        for button in start {
            let page = Rc::clone(self);
            dom::listen(&button, "click", move |_| page.start())?;
        }
        Ok(())
    }

    fn start(self: &Rc<Self>) {
        self.show_step(Step::Overall);
    }

    fn show_step(self: &Rc<Self>, step: Step) {
        let Some(init) = self.survey.borrow_mut().show_step(step) else {
            return;
        };
        self.reveal(Card::Question(step));

        let res = match init {
            StepInit::Nothing => Ok(()),
            StepInit::BuildStars => self.build_stars(),
            StepInit::BuildNps => self.build_nps(),
            StepInit::BindComment => self.bind_comment(),
        };
        if let Err(e) = res {
            warn!(step = step.number(), "step init failed: {e}");
        }
    }

    /// Hides every card, then shows `card`.
    fn reveal(&self, card: Card) {
        for c in &self.cards {
            dom::add_class(c, HIDDEN);
        }
        let el = match card {
            Card::ThankYou => Some(&self.thank_you),
            Card::Question(step) => self
                .questions
                .iter()
                .find(|(s, _)| *s == step)
                .map(|(_, el)| el),
        };
        if let Some(el) = el {
            dom::remove_class(el, HIDDEN);
        }
    }

    fn select_overall(self: &Rc<Self>, rating: OverallRating, target: &Element) {
        let Some(next) = self.survey.borrow_mut().select_overall(rating) else {
            return;
        };
        for b in dom::query_all(&self.doc, ".emoji-btn") {
            dom::remove_class(&b, SELECTED);
        }
        dom::add_class(target, SELECTED);

        let page = Rc::clone(self);
        if let Err(e) = dom::set_timeout(self.auto_advance_ms, move || page.show_step(next)) {
            warn!("auto-advance not scheduled: {e}");
            self.show_step(next);
        }
    }

    fn build_stars(&self) -> Result<()> {
        for (category, container) in &self.star_rows {
            dom::clear_children(container);
            for value in 1..=StarRating::MAX {
                let star = dom::create(&self.doc, "span")?;
                star.set_class_name("star");
                let _ = star.set_attribute(DATA_VALUE, &value.to_string());
                dom::set_text(&star, "★");
                dom::append(container, &star)?;
            }

            // Keep an earlier answer visible after a rebuild.
            if let Some(r) = self.survey.borrow().record().category_rating(*category) {
                paint_stars(container, r.highlight());
            }
        }
        Ok(())
    }

    fn select_star(&self, category: Category, rating: StarRating) {
        let Some(states) = self.survey.borrow_mut().select_star(category, rating) else {
            return;
        };
        if let Some((_, container)) = self.star_rows.iter().find(|(c, _)| *c == category) {
            paint_stars(container, states);
        }
    }

    fn build_nps(&self) -> Result<()> {
        let Some(container) = &self.nps_container else {
            debug!("no #nps-buttons container");
            return Ok(());
        };
        dom::clear_children(container);

        let current = self.survey.borrow().record().nps_score;
        for score in NpsScore::all() {
            let button = dom::create(&self.doc, "button")?;
            button.set_class_name("nps-btn");
            let text = score.get().to_string();
            let _ = button.set_attribute(DATA_SCORE, &text);
            dom::set_text(&button, &text);
            if current == Some(score) {
                dom::add_class(&button, SELECTED);
            }
            dom::append(container, &button)?;
        }
        Ok(())
    }

    fn select_nps(&self, score: NpsScore, target: &Element) {
        if !self.survey.borrow_mut().select_nps(score) {
            return;
        }
        for b in dom::query_all(&self.doc, ".nps-btn") {
            dom::remove_class(&b, SELECTED);
        }
        dom::add_class(target, SELECTED);
    }

    fn bind_comment(self: &Rc<Self>) -> Result<()> {
        let (Some(textarea), Some(counter)) = (
            dom::by_id(&self.doc, "comment"),
            dom::by_id(&self.doc, "char-count"),
        ) else {
            debug!("comment box not present");
            return Ok(());
        };
        let textarea = textarea
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| FeedbackError::Dom("#comment is not a textarea".to_string()))?;

        let page = Rc::clone(self);
        let source = textarea.clone();
        dom::listen(&textarea, "input", move |_| {
            let n = page.survey.borrow_mut().set_comment(&source.value());
            dom::set_text(&counter, &n.to_string());
        })
    }

    fn set_submitting(&self, on: bool) {
        for b in &self.submit_buttons {
            b.set_disabled(on);
        }
    }

    fn submit(self: &Rc<Self>) {
        let page = Rc::clone(self);
        spawn_local(async move {
            let outcome = survey::submit(&page.survey, &page.api, || {
                dom::remove_class(&page.loading, HIDDEN);
                page.set_submitting(true);
            })
            .await;

            // Another submit owns the indicator and the buttons.
            if outcome == SubmitOutcome::Ignored {
                return;
            }
            dom::add_class(&page.loading, HIDDEN);
            page.set_submitting(false);

            match outcome {
                SubmitOutcome::Accepted(_) => page.reveal(Card::ThankYou),
                other => {
                    if let Some(msg) = other.alert() {
                        dom::alert(&msg);
                    }
                }
            }
        });
    }
}

fn paint_stars(container: &Element, states: [bool; 5]) {
    for (star, on) in dom::query_all_in(container, ".star").iter().zip(states) {
        dom::set_class(star, ACTIVE, on);
    }
}
