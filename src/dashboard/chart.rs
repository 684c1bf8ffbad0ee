//! Geometry for the weekly trend chart. Drawing happens in `feedback_web`.

use super::stats::DailyPoint;

/// Upper bound on y-axis tick count before the step widens.
const MAX_Y_TICKS: u64 = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Zero-based y axis with an integer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YAxis {
    pub top: u64,
    pub step: u64,
}

impl YAxis {
    pub fn fit(values: &[f64]) -> Self {
        let max = values.iter().copied().fold(0.0_f64, f64::max).ceil() as u64;
        let max = max.max(1);
        let step = max.div_ceil(MAX_Y_TICKS).max(1);
        let top = max.div_ceil(step) * step;
        Self { top, step }
    }

    pub fn ticks(&self) -> Vec<u64> {
        (0..=self.top).step_by(self.step as usize).collect()
    }
}

/// Plot area inside the canvas, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn inset(width: f64, height: f64, pad_left: f64, pad_bottom: f64, pad: f64) -> Self {
        Self {
            left: pad_left,
            top: pad,
            right: (width - pad).max(pad_left + 1.0),
            bottom: (height - pad_bottom).max(pad + 1.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn y_for(&self, value: f64, axis: &YAxis) -> f64 {
        let norm = (value / axis.top as f64).clamp(0.0, 1.0);
        self.bottom - norm * self.height()
    }
}

impl TrendSeries {
    pub fn from_points(points: &[DailyPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| p.date.clone()).collect(),
            values: points.iter().map(|p| p.count as f64).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn y_axis(&self) -> YAxis {
        YAxis::fit(&self.values)
    }

    /// X position of each label; a single point is centred.
    pub fn x_positions(&self, area: &PlotArea) -> Vec<f64> {
        let n = self.values.len();
        match n {
            0 => Vec::new(),
            1 => vec![area.left + area.width() / 2.0],
            _ => {
                let step = area.width() / (n - 1) as f64;
                (0..n).map(|i| area.left + step * i as f64).collect()
            }
        }
    }

    pub fn points(&self, area: &PlotArea) -> Vec<(f64, f64)> {
        let axis = self.y_axis();
        self.x_positions(area)
            .into_iter()
            .zip(self.values.iter())
            .map(|(x, &v)| (x, area.y_for(v, &axis)))
            .collect()
    }
}
