use feedback::dashboard::{page_buttons, star_glyphs};
use feedback::prelude::*;
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::all().to_vec())
}

proptest! {
    #[test]
    fn star_selection_highlights_prefix(cat in category(), rating in 1u8..=5) {
        let mut survey = SurveyController::new();
        survey.show_step(Step::Categories);
        let states = survey
            .select_star(cat, StarRating::new(rating).unwrap())
            .unwrap();

        for (i, active) in states.iter().enumerate() {
            prop_assert_eq!(*active, i < rating as usize);
        }
        prop_assert_eq!(states.iter().filter(|a| **a).count(), rating as usize);
        prop_assert_eq!(survey.record().category_rating(cat).map(StarRating::get), Some(rating));
    }

    #[test]
    fn reselecting_a_lower_star_clears_the_rest(cat in category(), hi in 1u8..=5, lo in 1u8..=5) {
        let mut survey = SurveyController::new();
        survey.select_star(cat, StarRating::new(hi).unwrap());
        let states = survey.select_star(cat, StarRating::new(lo).unwrap()).unwrap();
        prop_assert_eq!(states.iter().filter(|a| **a).count(), lo as usize);
    }

    #[test]
    fn glyphs_never_exceed_five_for_valid_averages(rating in 0.0f64..=5.0) {
        let glyphs = star_glyphs(rating);
        let full = glyphs.chars().filter(|c| *c == '★').count();
        let half = glyphs.chars().filter(|c| *c == '☆').count();
        prop_assert_eq!(full, rating.floor() as usize);
        prop_assert!(half <= 1);
        prop_assert!(full + half <= 5);
        prop_assert_eq!(half == 1, rating.fract() >= 0.5 && full < 5);
    }

    #[test]
    fn pagination_has_one_button_per_page(total in 2u32..60, pick in 0u32..60) {
        let current = pick % total + 1;
        let buttons = page_buttons(current, total);
        prop_assert_eq!(buttons.len(), total as usize);
        prop_assert_eq!(buttons.iter().filter(|b| b.active).count(), 1);
        prop_assert!(buttons[(current - 1) as usize].active);
    }

    #[test]
    fn nps_band_partitions_the_line(nps in -100.0f64..=100.0) {
        let band = NpsBand::from_score(nps);
        let expected = if nps > 50.0 {
            NpsBand::Excellent
        } else if nps >= 0.0 {
            NpsBand::Good
        } else {
            NpsBand::NeedsImprovement
        };
        prop_assert_eq!(band, expected);
    }
}
