//! Aggregate statistics and the text painted into the dashboard slots.

use serde::{Deserialize, Serialize};

use super::chart::TrendSeries;
use crate::float_fmt::{fmt_compact, fmt_fixed};
use crate::model::Category;

pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '☆';

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub count: u64,
    #[serde(default)]
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverages {
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub service: f64,
    #[serde(default)]
    pub staff: f64,
    #[serde(default)]
    pub cleanliness: f64,
    #[serde(default)]
    pub value: f64,
}

impl CategoryAverages {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Food => self.food,
            Category::Service => self.service,
            Category::Staff => self.staff,
            Category::Cleanliness => self.cleanliness,
            Category::Value => self.value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub count: u64,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today: PeriodSummary,
    pub week: PeriodSummary,
    #[serde(default)]
    pub month: Option<PeriodSummary>,
    #[serde(default)]
    pub daily_chart: Vec<DailyPoint>,
    pub categories: CategoryAverages,
    pub nps: f64,
    pub total_responses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpsBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl NpsBand {
    /// > 50 excellent, 0..=50 good, below zero needs improvement.
    pub fn from_score(nps: f64) -> Self {
        if nps > 50.0 {
            NpsBand::Excellent
        } else if nps >= 0.0 {
            NpsBand::Good
        } else {
            NpsBand::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NpsBand::Excellent => "Excellent",
            NpsBand::Good => "Good",
            NpsBand::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NpsBand::Excellent => "#10b981",
            NpsBand::Good => "#f59e0b",
            NpsBand::NeedsImprovement => "#ef4444",
        }
    }
}

/// `floor(rating)` full glyphs, plus one half glyph when the fractional part
/// is at least 0.5 and fewer than five full glyphs were drawn.
pub fn star_glyphs(rating: f64) -> String {
    let full = rating.floor();
    let mut out = String::new();
    if full > 0.0 {
        for _ in 0..full as u32 {
            out.push(FULL_STAR);
        }
    }
    if rating % 1.0 >= 0.5 && full < 5.0 {
        out.push(HALF_STAR);
    }
    out
}

/// One text write into an element looked up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotText {
    pub id: String,
    pub text: String,
}

impl SlotText {
    fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

pub const NPS_LABEL_SLOT: &str = "nps-label";

/// Everything the stats panel paints for one load.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub slots: Vec<SlotText>,
    pub nps_band: NpsBand,
    pub trend: TrendSeries,
}

impl StatsView {
    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.text.as_str())
    }
}

impl From<&DashboardStats> for StatsView {
    fn from(stats: &DashboardStats) -> Self {
        let band = NpsBand::from_score(stats.nps);
        let mut slots = vec![
            SlotText::new("today-count", stats.today.count.to_string()),
            SlotText::new("today-avg", fmt_fixed(stats.today.avg_rating, 1)),
            SlotText::new("week-count", stats.week.count.to_string()),
            SlotText::new("week-avg", fmt_fixed(stats.week.avg_rating, 1)),
        ];
        if let Some(month) = &stats.month {
            slots.push(SlotText::new("month-count", month.count.to_string()));
            slots.push(SlotText::new("month-avg", fmt_fixed(month.avg_rating, 1)));
        }
        slots.push(SlotText::new("nps-score", fmt_compact(stats.nps, 1)));
        slots.push(SlotText::new(NPS_LABEL_SLOT, band.label()));
        slots.push(SlotText::new(
            "total-count",
            stats.total_responses.to_string(),
        ));

        for &c in Category::all() {
            let rating = stats.categories.get(c);
            slots.push(SlotText::new(format!("cat-{}", c.key()), fmt_fixed(rating, 1)));
            slots.push(SlotText::new(format!("stars-{}", c.key()), star_glyphs(rating)));
        }

        Self {
            slots,
            nps_band: band,
            trend: TrendSeries::from_points(&stats.daily_chart),
        }
    }
}
