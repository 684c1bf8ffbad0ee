//! Paginated feedback rows and their table rendering.

use serde::{Deserialize, Serialize};

use super::pagination::{page_buttons, PageButton};
use crate::model::{Category, NpsScore, OverallRating, StarRating};

/// Columns in `#feedback-body` rows; placeholders span all of them.
pub const COLUMN_COUNT: u32 = 10;
pub const PLACEHOLDER_EMPTY: &str = "No feedback yet";
pub const PLACEHOLDER_ERROR: &str = "Error loading feedback. Check console.";
pub const DASH: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRow {
    pub id: i64,
    pub timestamp: String,
    pub overall_rating: OverallRating,
    #[serde(default)]
    pub food_rating: Option<StarRating>,
    #[serde(default)]
    pub service_rating: Option<StarRating>,
    #[serde(default)]
    pub staff_rating: Option<StarRating>,
    #[serde(default)]
    pub cleanliness_rating: Option<StarRating>,
    #[serde(default)]
    pub value_rating: Option<StarRating>,
    #[serde(default)]
    pub nps_score: Option<NpsScore>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reviewed: bool,
}

impl FeedbackRow {
    pub fn category_rating(&self, category: Category) -> Option<StarRating> {
        match category {
            Category::Food => self.food_rating,
            Category::Service => self.service_rating,
            Category::Staff => self.staff_rating,
            Category::Cleanliness => self.cleanliness_rating,
            Category::Value => self.value_rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackListPage {
    pub feedback: Vec<FeedbackRow>,
    pub current_page: u32,
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// A labelled text cell (`data-label` drives the stacked mobile layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub timestamp: String,
    pub emoji: &'static str,
    pub badge_class: &'static str,
    /// Category, NPS and comment cells in column order.
    pub cells: Vec<Cell>,
    pub reviewed: bool,
}

impl RowView {
    pub fn review_label(&self) -> &'static str {
        if self.reviewed {
            "✓ Reviewed"
        } else {
            "Mark Reviewed"
        }
    }

    pub fn review_class(&self) -> &'static str {
        if self.reviewed {
            "review-btn reviewed"
        } else {
            "review-btn"
        }
    }
}

impl From<&FeedbackRow> for RowView {
    fn from(row: &FeedbackRow) -> Self {
        let mut cells: Vec<Cell> = Category::all()
            .iter()
            .map(|&c| Cell {
                label: c.column_label(),
                text: row
                    .category_rating(c)
                    .map(|r| r.get().to_string())
                    .unwrap_or_else(|| DASH.to_string()),
            })
            .collect();
        cells.push(Cell {
            label: "NPS",
            text: row
                .nps_score
                .map(|s| s.get().to_string())
                .unwrap_or_else(|| DASH.to_string()),
        });
        cells.push(Cell {
            label: "Comment",
            text: row
                .comment
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(DASH)
                .to_string(),
        });

        Self {
            id: row.id,
            timestamp: row.timestamp.clone(),
            emoji: row.overall_rating.emoji(),
            badge_class: row.overall_rating.badge_class(),
            cells,
            reviewed: row.reviewed,
        }
    }
}

/// What `#feedback-body` and `#pagination` show after a load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// A single placeholder row spanning every column.
    Placeholder(&'static str),
    Rows {
        rows: Vec<RowView>,
        pagination: Vec<PageButton>,
    },
}

impl ListView {
    pub fn from_page(page: &FeedbackListPage) -> Self {
        if page.feedback.is_empty() {
            return ListView::Placeholder(PLACEHOLDER_EMPTY);
        }
        ListView::Rows {
            rows: page.feedback.iter().map(RowView::from).collect(),
            pagination: page_buttons(page.current_page, page.pages),
        }
    }

    pub fn load_failed() -> Self {
        ListView::Placeholder(PLACEHOLDER_ERROR)
    }

    pub fn pagination(&self) -> &[PageButton] {
        match self {
            ListView::Placeholder(_) => &[],
            ListView::Rows { pagination, .. } => pagination,
        }
    }
}

/// Date and time parts of an ISO-8601 timestamp, used when the browser
/// cannot parse it: `2024-05-06T14:03:22.512` → (`2024-05-06`, `14:03:22`).
pub fn split_timestamp(ts: &str) -> (String, String) {
    match ts.split_once('T').or_else(|| ts.split_once(' ')) {
        Some((date, rest)) => {
            let time = rest
                .split(['.', '+', 'Z'])
                .next()
                .unwrap_or(rest)
                .to_string();
            (date.to_string(), time)
        }
        None => (ts.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "feedback": [
            {"id": 9, "timestamp": "2024-05-06T14:03:22.512", "overall_rating": 3,
             "food_rating": 5, "service_rating": null, "staff_rating": 4,
             "cleanliness_rating": null, "value_rating": 2, "nps_score": 0,
             "comment": "Loved the soup", "reviewed": true},
            {"id": 8, "timestamp": "2024-05-06T09:00:00", "overall_rating": 1,
             "food_rating": null, "service_rating": null, "staff_rating": null,
             "cleanliness_rating": null, "value_rating": null, "nps_score": null,
             "comment": null, "reviewed": false}
        ],
        "total": 42, "pages": 3, "current_page": 2, "per_page": 20,
        "has_next": true, "has_prev": true
    }"#;

    fn texts(row: &RowView) -> Vec<&str> {
        row.cells.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn rows_render_values_and_dashes() {
        let page: FeedbackListPage = serde_json::from_str(PAGE).unwrap();
        let ListView::Rows { rows, pagination } = ListView::from_page(&page) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.emoji, "😊");
        assert_eq!(first.badge_class, "rating-high");
        assert_eq!(texts(first), vec!["5", "-", "4", "-", "2", "0", "Loved the soup"]);
        assert_eq!(first.review_label(), "✓ Reviewed");
        assert_eq!(first.review_class(), "review-btn reviewed");

        let second = &rows[1];
        assert_eq!(second.emoji, "😞");
        assert_eq!(second.badge_class, "rating-low");
        assert!(texts(second).iter().all(|t| *t == DASH));
        assert_eq!(second.review_label(), "Mark Reviewed");

        assert_eq!(pagination.len(), 3);
        assert!(pagination[1].active);
        // 2 fixed columns + 7 cells + status.
        assert_eq!(2 + first.cells.len() as u32 + 1, COLUMN_COUNT);
    }

    #[test]
    fn empty_page_is_a_placeholder() {
        let page = FeedbackListPage {
            feedback: vec![],
            current_page: 1,
            pages: 0,
            total: 0,
            per_page: 20,
            has_next: false,
            has_prev: false,
        };
        let view = ListView::from_page(&page);
        assert_eq!(view, ListView::Placeholder(PLACEHOLDER_EMPTY));
        assert!(view.pagination().is_empty());
    }

    #[test]
    fn minimal_page_shape_parses() {
        let page: FeedbackListPage =
            serde_json::from_str(r#"{"feedback": [], "current_page": 1, "pages": 1}"#).unwrap();
        assert_eq!(page.total, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn timestamp_fallback_split() {
        assert_eq!(
            split_timestamp("2024-05-06T14:03:22.512"),
            ("2024-05-06".to_string(), "14:03:22".to_string())
        );
        assert_eq!(
            split_timestamp("2024-05-06 09:00:00"),
            ("2024-05-06".to_string(), "09:00:00".to_string())
        );
        assert_eq!(split_timestamp("garbage"), ("garbage".to_string(), String::new()));
    }
}
