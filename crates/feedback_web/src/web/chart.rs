//! Canvas rendering of the weekly feedback trend.

use feedback::dashboard::{PlotArea, TrendSeries};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const LINE_COLOR: &str = "#6366f1";
const FILL_COLOR: &str = "rgba(99, 102, 241, 0.1)";
const GRID_COLOR: &str = "rgba(0, 0, 0, 0.08)";
const LABEL_COLOR: &str = "#6b7280";
const LABEL_FONT: &str = "11px system-ui, -apple-system, Segoe UI, Roboto, sans-serif";

/// A chart drawn on a canvas. Only one lives per canvas: drawing a new one
/// destroys the previous.
pub(super) struct TrendChart {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl TrendChart {
    pub(super) fn replace(
        slot: &mut Option<TrendChart>,
        canvas: &HtmlCanvasElement,
        series: &TrendSeries,
    ) -> Result<(), String> {
        if let Some(old) = slot.take() {
            old.destroy();
        }
        let chart = TrendChart::new(canvas)?;
        chart.draw(series)?;
        *slot = Some(chart);
        Ok(())
    }

    fn new(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        // Match the backing store to the laid-out width.
        let css_w = canvas.client_width();
        if css_w > 0 && css_w as u32 != canvas.width() {
            canvas.set_width(css_w as u32);
        }
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "get_context failed")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "cast failed")?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }

    fn destroy(self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn draw(&self, series: &TrendSeries) -> Result<(), String> {
        let ctx = &self.ctx;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        ctx.clear_rect(0.0, 0.0, w, h);

        let area = PlotArea::inset(w, h, 34.0, 26.0, 10.0);
        let axis = series.y_axis();

        // Y grid + integer tick labels, zero at the bottom.
        ctx.set_font(LABEL_FONT);
        ctx.set_line_width(1.0);
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");
        for tick in axis.ticks() {
            let y = area.y_for(tick as f64, &axis);
            ctx.set_stroke_style_str(GRID_COLOR);
            ctx.begin_path();
            ctx.move_to(area.left, y);
            ctx.line_to(area.right, y);
            ctx.stroke();
            ctx.set_fill_style_str(LABEL_COLOR);
            ctx.fill_text(&tick.to_string(), area.left - 6.0, y)
                .map_err(|_| "fill_text failed")?;
        }

        if series.is_empty() {
            return Ok(());
        }

        let points = series.points(&area);

        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        for ((x, _), label) in points.iter().zip(series.labels.iter()) {
            ctx.fill_text(label, *x, area.bottom + 8.0)
                .map_err(|_| "fill_text failed")?;
        }

        // Filled area under the line.
        ctx.set_fill_style_str(FILL_COLOR);
        ctx.begin_path();
        ctx.move_to(points[0].0, area.bottom);
        for &(x, y) in &points {
            ctx.line_to(x, y);
        }
        ctx.line_to(points[points.len() - 1].0, area.bottom);
        ctx.close_path();
        ctx.fill();

        ctx.set_stroke_style_str(LINE_COLOR);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        ctx.set_fill_style_str(LINE_COLOR);
        for &(x, y) in &points {
            ctx.begin_path();
            ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0).ok();
            ctx.fill();
        }

        Ok(())
    }
}
