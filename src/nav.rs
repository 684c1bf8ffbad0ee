//! Responsive sidebar toggle state. The toggle exists only at or below the
//! mobile breakpoint.

pub const GLYPH_CLOSED: &str = "☰";
pub const GLYPH_OPEN: &str = "✕";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAction {
    /// Build the toggle (mobile width, none present).
    Create,
    /// Remove the toggle and close the panel (desktop width).
    Teardown,
    Keep,
}

#[derive(Debug, Clone)]
pub struct MobileMenu {
    breakpoint_px: u32,
    toggle_present: bool,
    open: bool,
}

impl MobileMenu {
    pub fn new(breakpoint_px: u32) -> Self {
        Self {
            breakpoint_px,
            toggle_present: false,
            open: false,
        }
    }

    pub fn is_mobile(&self, width_px: f64) -> bool {
        width_px <= self.breakpoint_px as f64
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a toggle should be built now. Never true twice in a row.
    pub fn should_create(&self, width_px: f64) -> bool {
        self.is_mobile(width_px) && !self.toggle_present
    }

    pub fn mark_created(&mut self) {
        self.toggle_present = true;
        self.open = false;
    }

    pub fn glyph(&self) -> &'static str {
        if self.open {
            GLYPH_OPEN
        } else {
            GLYPH_CLOSED
        }
    }

    /// Flips the panel; returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the panel; returns true if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Nav links only close the panel on mobile widths.
    pub fn on_nav_link(&mut self, width_px: f64) -> bool {
        self.is_mobile(width_px) && self.close()
    }

    /// Called once the resize debounce settles.
    pub fn on_resize(&mut self, width_px: f64) -> ResizeAction {
        if !self.is_mobile(width_px) {
            self.toggle_present = false;
            self.open = false;
            ResizeAction::Teardown
        } else if !self.toggle_present {
            ResizeAction::Create
        } else {
            ResizeAction::Keep
        }
    }
}
