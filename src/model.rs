//! Survey answer types and the record that is submitted once per survey.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, Result};

/// Three-level overall rating picked from the emoji row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OverallRating {
    Sad = 1,
    Neutral = 2,
    Happy = 3,
}

impl OverallRating {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn emoji(self) -> &'static str {
        match self {
            OverallRating::Sad => "😞",
            OverallRating::Neutral => "😐",
            OverallRating::Happy => "😊",
        }
    }

    /// CSS class of the dashboard badge.
    pub fn badge_class(self) -> &'static str {
        match self {
            OverallRating::Sad => "rating-low",
            OverallRating::Neutral => "rating-mid",
            OverallRating::Happy => "rating-high",
        }
    }
}

impl TryFrom<u8> for OverallRating {
    type Error = FeedbackError;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            1 => Ok(OverallRating::Sad),
            2 => Ok(OverallRating::Neutral),
            3 => Ok(OverallRating::Happy),
            _ => Err(FeedbackError::Validation(format!(
                "overall rating out of range: {v}"
            ))),
        }
    }
}

impl From<OverallRating> for u8 {
    fn from(r: OverallRating) -> u8 {
        r.value()
    }
}

/// The five star-rated categories of step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Service,
    Staff,
    Cleanliness,
    Value,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Food,
            Category::Service,
            Category::Staff,
            Category::Cleanliness,
            Category::Value,
        ]
    }

    /// Key used in `data-category`, `cat-{key}` and `stars-{key}`.
    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Service => "service",
            Category::Staff => "staff",
            Category::Cleanliness => "cleanliness",
            Category::Value => "value",
        }
    }

    /// Column label in the dashboard table.
    pub fn column_label(self) -> &'static str {
        match self {
            Category::Food => "Food/Drink",
            Category::Service => "Service",
            Category::Staff => "Staff",
            Category::Cleanliness => "Clean",
            Category::Value => "Value",
        }
    }

    /// Parses a `data-category` value.
    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.trim();
        Category::all().iter().copied().find(|c| c.key() == key)
    }
}

/// A 1..=5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MAX: u8 = 5;

    pub fn new(v: u8) -> Result<Self> {
        if (1..=Self::MAX).contains(&v) {
            Ok(Self(v))
        } else {
            Err(FeedbackError::Validation(format!(
                "star rating out of range: {v}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Highlight state of the five star elements, left to right.
    pub fn highlight(self) -> [bool; 5] {
        let mut out = [false; 5];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = i < self.0 as usize;
        }
        out
    }
}

impl TryFrom<u8> for StarRating {
    type Error = FeedbackError;

    fn try_from(v: u8) -> Result<Self> {
        StarRating::new(v)
    }
}

impl From<StarRating> for u8 {
    fn from(r: StarRating) -> u8 {
        r.0
    }
}

/// Parses the `data-value` of a star element.
impl FromStr for StarRating {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self> {
        StarRating::new(parse_attr(s)?)
    }
}

/// A 0..=10 net promoter answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NpsScore(u8);

impl NpsScore {
    pub const MAX: u8 = 10;

    pub fn new(v: u8) -> Result<Self> {
        if v <= Self::MAX {
            Ok(Self(v))
        } else {
            Err(FeedbackError::Validation(format!("nps score out of range: {v}")))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = NpsScore> {
        (0..=Self::MAX).map(NpsScore)
    }
}

impl TryFrom<u8> for NpsScore {
    type Error = FeedbackError;

    fn try_from(v: u8) -> Result<Self> {
        NpsScore::new(v)
    }
}

impl From<NpsScore> for u8 {
    fn from(s: NpsScore) -> u8 {
        s.0
    }
}

/// Parses the `data-score` of an NPS button.
impl FromStr for NpsScore {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self> {
        NpsScore::new(parse_attr(s)?)
    }
}

fn parse_attr(s: &str) -> Result<u8> {
    s.trim()
        .parse::<u8>()
        .map_err(|_| FeedbackError::Validation(format!("not a rating: {s:?}")))
}

/// Answers accumulated over the survey steps; serialized as the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub overall_rating: Option<OverallRating>,
    pub food_rating: Option<StarRating>,
    pub service_rating: Option<StarRating>,
    pub staff_rating: Option<StarRating>,
    pub cleanliness_rating: Option<StarRating>,
    pub value_rating: Option<StarRating>,
    pub nps_score: Option<NpsScore>,
    #[serde(default)]
    pub comment: String,
}

impl FeedbackRecord {
    pub fn category_rating(&self, category: Category) -> Option<StarRating> {
        match category {
            Category::Food => self.food_rating,
            Category::Service => self.service_rating,
            Category::Staff => self.staff_rating,
            Category::Cleanliness => self.cleanliness_rating,
            Category::Value => self.value_rating,
        }
    }

    pub fn set_category_rating(&mut self, category: Category, rating: StarRating) {
        let slot = match category {
            Category::Food => &mut self.food_rating,
            Category::Service => &mut self.service_rating,
            Category::Staff => &mut self.staff_rating,
            Category::Cleanliness => &mut self.cleanliness_rating,
            Category::Value => &mut self.value_rating,
        };
        *slot = Some(rating);
    }

    /// Only the overall rating is required.
    pub fn validate(&self) -> Result<()> {
        if self.overall_rating.is_none() {
            return Err(FeedbackError::missing_overall());
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_serializes_all_nulls() {
        let v: serde_json::Value =
            serde_json::from_str(&FeedbackRecord::default().to_json().unwrap()).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        for key in [
            "food_rating",
            "service_rating",
            "staff_rating",
            "cleanliness_rating",
            "value_rating",
        ] {
            assert!(obj[key].is_null());
        }
        assert!(obj["overall_rating"].is_null());
        assert!(obj["nps_score"].is_null());
        assert_eq!(obj["comment"], "");
    }

    #[test]
    fn ratings_go_on_the_wire_as_integers() {
        let mut r = FeedbackRecord {
            overall_rating: Some(OverallRating::Happy),
            nps_score: Some(NpsScore::new(0).unwrap()),
            comment: "great coffee".into(),
            ..Default::default()
        };
        r.set_category_rating(Category::Cleanliness, StarRating::new(4).unwrap());

        let v: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert_eq!(v["overall_rating"], 3);
        assert_eq!(v["cleanliness_rating"], 4);
        assert_eq!(v["nps_score"], 0);
        assert!(v["food_rating"].is_null());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(StarRating::new(0).is_err());
        assert!(StarRating::new(6).is_err());
        assert!(NpsScore::new(11).is_err());
        assert!(OverallRating::try_from(4).is_err());
        assert!(serde_json::from_str::<StarRating>("7").is_err());
    }

    #[test]
    fn validation_requires_overall_only() {
        let mut r = FeedbackRecord::default();
        assert_eq!(r.validate(), Err(FeedbackError::missing_overall()));
        r.overall_rating = Some(OverallRating::Sad);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn category_keys_round_trip() {
        for &c in Category::all() {
            assert_eq!(Category::from_key(c.key()), Some(c));
        }
        assert_eq!(Category::from_key(" staff "), Some(Category::Staff));
        assert_eq!(Category::from_key("ambience"), None);
    }

    #[test]
    fn rating_attributes_parse_in_range_only() {
        assert_eq!("3".parse::<StarRating>().map(StarRating::get), Ok(3));
        assert_eq!(" 5".parse::<StarRating>().map(StarRating::get), Ok(5));
        assert!("0".parse::<StarRating>().is_err());
        assert!("".parse::<StarRating>().is_err());
        assert_eq!("0".parse::<NpsScore>().map(NpsScore::get), Ok(0));
        assert_eq!("10".parse::<NpsScore>().map(NpsScore::get), Ok(10));
        assert!("11".parse::<NpsScore>().is_err());
        assert!("-1".parse::<NpsScore>().is_err());
    }
}
