//! Operator dashboard: statistics panel, trend chart, feedback table.

pub mod chart;
pub mod list;
pub mod pagination;
pub mod session;
pub mod stats;

pub use chart::{PlotArea, TrendSeries, YAxis};
pub use list::{FeedbackListPage, FeedbackRow, ListView, RowView};
pub use pagination::{page_buttons, PageButton};
pub use session::{Dashboard, ReviewOutcome};
pub use stats::{star_glyphs, DashboardStats, NpsBand, StatsView};
