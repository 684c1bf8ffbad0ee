//! Dashboard markup binding: stat slots, trend chart, feedback table and
//! pagination.

use std::cell::RefCell;
use std::rc::Rc;

use feedback::config::ClientConfig;
use feedback::dashboard::list::{split_timestamp, COLUMN_COUNT};
use feedback::dashboard::session::{self, Dashboard, ReviewOutcome};
use feedback::dashboard::stats::NPS_LABEL_SLOT;
use feedback::dashboard::{ListView, PageButton, RowView, StatsView};
use feedback::error::{Result, MSG_STATS_FAILED};
use js_sys::{Date, Object, Reflect};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement};

use super::chart::TrendChart;
use super::dom;
use super::http::FetchClient;

const LOCALE: &str = "en-US";
const DATA_ID: &str = "data-id";
const DATA_PAGE: &str = "data-page";
const REVIEW_SELECTOR: &str = "button.review-btn[data-id]";
const PAGE_SELECTOR: &str = "button[data-page]";
const COMMENT_STYLE: &str =
    "max-width: 200px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;";

pub(super) struct DashboardPage {
    dash: RefCell<Dashboard>,
    api: FetchClient,
    doc: Document,
    body: Option<Element>,
    pagination: Option<Element>,
    chart: RefCell<Option<TrendChart>>,
}

impl DashboardPage {
    pub(super) fn attach(doc: &Document, config: &ClientConfig) -> Result<Rc<Self>> {
        let page = Rc::new(Self {
            dash: RefCell::new(Dashboard::new()),
            api: FetchClient::new(config),
            doc: doc.clone(),
            body: dom::by_id(doc, "feedback-body"),
            pagination: dom::by_id(doc, "pagination"),
            chart: RefCell::new(None),
        });

        page.wire()?;
        page.show_current_date();
        if dom::by_id(doc, "today-count").is_some() {
            page.load_stats();
        }
        if page.body.is_some() {
            page.load_page(1);
        }
        Ok(page)
    }

    /// Rows and page buttons are rebuilt on every load, so their clicks are
    /// handled by one listener on each container.
    fn wire(self: &Rc<Self>) -> Result<()> {
        if let Some(body) = &self.body {
            let page = Rc::clone(self);
            dom::delegate(body, "click", REVIEW_SELECTOR, move |el| {
                let Some(id) = dom::data::<i64>(&el, DATA_ID) else {
                    warn!("review button without a feedback id");
                    return;
                };
                if let Ok(button) = el.dyn_into::<HtmlButtonElement>() {
                    page.toggle_reviewed(id, button);
                }
            })?;
        }
        if let Some(container) = &self.pagination {
            let page = Rc::clone(self);
            dom::delegate(container, "click", PAGE_SELECTOR, move |el| {
                if let Some(n) = dom::data::<u32>(&el, DATA_PAGE) {
                    page.load_page(n);
                }
            })?;
        }
        Ok(())
    }

    fn show_current_date(&self) {
        let Some(el) = dom::by_id(&self.doc, "current-date") else {
            return;
        };
        let opts = Object::new();
        for (k, v) in [
            ("weekday", "long"),
            ("year", "numeric"),
            ("month", "long"),
            ("day", "numeric"),
        ] {
            let _ = Reflect::set(&opts, &JsValue::from_str(k), &JsValue::from_str(v));
        }
        let text: String = Date::new_0().to_locale_date_string(LOCALE, &opts).into();
        dom::set_text(&el, &text);
    }

    fn load_stats(self: &Rc<Self>) {
        let page = Rc::clone(self);
        spawn_local(async move {
            match session::load_stats(&page.api).await {
                Ok(view) => page.paint_stats(&view),
                Err(_) => dom::alert(MSG_STATS_FAILED),
            }
        });
    }

    fn paint_stats(&self, view: &StatsView) {
        for slot in &view.slots {
            if let Some(el) = dom::by_id(&self.doc, &slot.id) {
                dom::set_text(&el, &slot.text);
            }
        }
        if let Some(label) = dom::by_id(&self.doc, NPS_LABEL_SLOT) {
            dom::set_color(&label, view.nps_band.color());
        }

        let Some(canvas) = dom::by_id(&self.doc, "weekChart")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            return;
        };
        let mut slot = self.chart.borrow_mut();
        if let Err(e) = TrendChart::replace(&mut slot, &canvas, &view.trend) {
            warn!("trend chart not drawn: {e}");
        }
    }

    fn load_page(self: &Rc<Self>, n: u32) {
        let page = Rc::clone(self);
        spawn_local(async move {
            let view = session::load_page(&page.dash, &page.api, n).await;
            page.render_list(&view);
        });
    }

    fn toggle_reviewed(self: &Rc<Self>, feedback_id: i64, button: HtmlButtonElement) {
        if self.dash.borrow().is_review_pending(feedback_id) {
            return;
        }
        button.set_disabled(true);
        let page = Rc::clone(self);
        spawn_local(async move {
            match session::toggle_reviewed(&page.dash, &page.api, feedback_id).await {
                ReviewOutcome::Reloaded(view) => page.render_list(&view),
                ReviewOutcome::Failed(_) => button.set_disabled(false),
                ReviewOutcome::Ignored => {}
            }
        });
    }

    fn render_list(&self, view: &ListView) {
        let Some(body) = &self.body else {
            return;
        };
        dom::clear_children(body);

        let res = match view {
            ListView::Placeholder(text) => self.placeholder_row(body, text),
            ListView::Rows { rows, .. } => rows
                .iter()
                .try_for_each(|row| self.append_row(body, row)),
        };
        if let Err(e) = res {
            warn!("feedback table render failed: {e}");
        }

        if let Err(e) = self.render_pagination(view.pagination()) {
            warn!("pagination render failed: {e}");
        }
    }

    fn placeholder_row(&self, body: &Element, text: &str) -> Result<()> {
        let tr = dom::create(&self.doc, "tr")?;
        let td = dom::create(&self.doc, "td")?;
        let _ = td.set_attribute("colspan", &COLUMN_COUNT.to_string());
        td.set_class_name("loading-cell");
        dom::set_text(&td, text);
        dom::append(&tr, &td)?;
        dom::append(body, &tr)
    }

    fn append_row(&self, body: &Element, row: &RowView) -> Result<()> {
        let tr = dom::create(&self.doc, "tr")?;

        let (date, time) = local_date_time(&row.timestamp);
        let td = self.cell("Date", &date)?;
        dom::append(&td, &dom::create(&self.doc, "br")?)?;
        let small = dom::create(&self.doc, "small")?;
        dom::set_text(&small, &time);
        dom::append(&td, &small)?;
        dom::append(&tr, &td)?;

        let td = self.cell("Overall", "")?;
        let badge = dom::create(&self.doc, "span")?;
        badge.set_class_name(&format!("rating-badge {}", row.badge_class));
        dom::set_text(&badge, row.emoji);
        dom::append(&td, &badge)?;
        dom::append(&tr, &td)?;

        for c in &row.cells {
            let td = self.cell(c.label, &c.text)?;
            if c.label == "Comment" {
                let _ = td.set_attribute("style", COMMENT_STYLE);
            }
            dom::append(&tr, &td)?;
        }

        let td = self.cell("Status", "")?;
        let button = dom::create(&self.doc, "button")?;
        button.set_class_name(row.review_class());
        let _ = button.set_attribute(DATA_ID, &row.id.to_string());
        dom::set_text(&button, row.review_label());
        dom::append(&td, &button)?;
        dom::append(&tr, &td)?;

        dom::append(body, &tr)
    }

    fn cell(&self, label: &str, text: &str) -> Result<Element> {
        let td = dom::create(&self.doc, "td")?;
        let _ = td.set_attribute("data-label", label);
        if !text.is_empty() {
            dom::set_text(&td, text);
        }
        Ok(td)
    }

    fn render_pagination(&self, buttons: &[PageButton]) -> Result<()> {
        let Some(container) = &self.pagination else {
            return Ok(());
        };
        dom::clear_children(container);
        for b in buttons {
            let el = dom::create(&self.doc, "button")?;
            dom::set_text(&el, &b.page.to_string());
            el.set_class_name(b.class());
            let _ = el.set_attribute(DATA_PAGE, &b.page.to_string());
            dom::append(container, &el)?;
        }
        Ok(())
    }
}

/// Browser-local date and time; falls back to splitting the raw timestamp
/// when `Date` cannot parse it.
fn local_date_time(ts: &str) -> (String, String) {
    let d = Date::new(&JsValue::from_str(ts));
    if d.get_time().is_nan() {
        return split_timestamp(ts);
    }
    (
        d.to_locale_date_string(LOCALE, &JsValue::UNDEFINED).into(),
        d.to_locale_time_string(LOCALE).into(),
    )
}
