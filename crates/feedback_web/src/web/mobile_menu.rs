use std::cell::{Cell, RefCell};
use std::rc::Rc;

use feedback::config::ClientConfig;
use feedback::error::{FeedbackError, Result};
use feedback::nav::{MobileMenu, ResizeAction};
use tracing::{debug, error, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use super::dom;

const SIDEBAR_OPEN: &str = "mobile-open";
const BODY_OPEN: &str = "menu-open";

/// Sidebar toggle shown on narrow viewports.
pub(super) struct MobileNav {
    state: RefCell<MobileMenu>,
    doc: Document,
    body: HtmlElement,
    sidebar: Element,
    toggle: RefCell<Option<Element>>,
    resize_timer: Cell<Option<i32>>,
    debounce_ms: u32,
}

impl MobileNav {
    pub(super) fn install(doc: &Document, config: &ClientConfig) -> Result<Rc<Self>> {
        let sidebar = dom::query_first(doc, ".sidebar").ok_or_else(|| {
            error!("sidebar not found");
            FeedbackError::Dom("missing .sidebar".to_string())
        })?;
        let body = doc
            .body()
            .ok_or_else(|| FeedbackError::Dom("no body".to_string()))?;

        let nav = Rc::new(Self {
            state: RefCell::new(MobileMenu::new(config.mobile_breakpoint_px)),
            doc: doc.clone(),
            body,
            sidebar,
            toggle: RefCell::new(None),
            resize_timer: Cell::new(None),
            debounce_ms: config.resize_debounce_ms,
        });

        if nav.state.borrow().should_create(dom::viewport_width()) {
            nav.create_toggle()?;
        }
        nav.wire()?;
        Ok(nav)
    }

    fn wire(self: &Rc<Self>) -> Result<()> {
        let nav = Rc::clone(self);
        dom::listen(&self.doc, "click", move |e| nav.on_document_click(&e))?;

        for link in dom::query_all_in(&self.sidebar, ".nav-menu a") {
            let nav = Rc::clone(self);
            dom::listen(&link, "click", move |_| {
                let closed = nav.state.borrow_mut().on_nav_link(dom::viewport_width());
                if closed {
                    nav.paint();
                }
            })?;
        }

        let nav = Rc::clone(self);
        dom::listen(&dom::window()?, "resize", move |_| nav.schedule_resize())
    }

    fn create_toggle(self: &Rc<Self>) -> Result<()> {
        if let Some(existing) = dom::query_first(&self.doc, ".menu-toggle") {
            debug!("menu toggle already present");
            self.state.borrow_mut().mark_created();
            *self.toggle.borrow_mut() = Some(existing);
            return Ok(());
        }

        let button = dom::create(&self.doc, "button")?;
        button.set_class_name("menu-toggle");
        let _ = button.set_attribute("aria-label", "Toggle menu");
        let nav = Rc::clone(self);
        dom::listen(&button, "click", move |e| {
            e.stop_propagation();
            nav.state.borrow_mut().toggle();
            nav.paint();
        })?;
        dom::append(&self.body, &button)?;

        self.state.borrow_mut().mark_created();
        *self.toggle.borrow_mut() = Some(button);
        self.paint();
        info!("mobile menu initialized");
        Ok(())
    }

    fn on_document_click(&self, e: &Event) {
        let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
        let target = target.as_ref();
        if self.sidebar.contains(target) {
            return;
        }
        if let Some(toggle) = self.toggle.borrow().as_ref() {
            if toggle.contains(target) {
                return;
            }
        }
        let closed = self.state.borrow_mut().close();
        if closed {
            self.paint();
        }
    }

    fn schedule_resize(self: &Rc<Self>) {
        if let Some(handle) = self.resize_timer.take() {
            dom::clear_timeout(handle);
        }
        let nav = Rc::clone(self);
        match dom::set_timeout(self.debounce_ms, move || nav.handle_resize()) {
            Ok(handle) => self.resize_timer.set(Some(handle)),
            Err(e) => debug!("resize debounce not scheduled: {e}"),
        }
    }

    fn handle_resize(self: &Rc<Self>) {
        self.resize_timer.set(None);
        let action = self.state.borrow_mut().on_resize(dom::viewport_width());
        match action {
            ResizeAction::Create => {
                if let Err(e) = self.create_toggle() {
                    error!("menu toggle not created: {e}");
                }
            }
            ResizeAction::Teardown => {
                if let Some(toggle) = self.toggle.borrow_mut().take() {
                    toggle.remove();
                }
                self.paint();
            }
            ResizeAction::Keep => {}
        }
    }

    /// Pushes the open state onto the sidebar, body and toggle glyph.
    fn paint(&self) {
        let state = self.state.borrow();
        dom::set_class(&self.sidebar, SIDEBAR_OPEN, state.is_open());
        dom::set_class(&self.body, BODY_OPEN, state.is_open());
        if let Some(toggle) = self.toggle.borrow().as_ref() {
            dom::set_text(toggle, state.glyph());
        }
    }
}
