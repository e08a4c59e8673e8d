//! Compatibility score for a composed name
//!
//! base + element alignment + family role + food + music + jitter, clamped.

use crate::reference::{ReferenceData, TasteHook};
use crate::types::{Element, SurveyData};
use serde::{Deserialize, Serialize};

/// Score constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFormula {
    pub base: i32,
    /// Granted whenever an element was resolved for the slot
    pub element_alignment: i32,
    pub family_role: i32,
    pub food: i32,
    pub music: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for ScoreFormula {
    fn default() -> Self {
        Self {
            base: 70,
            element_alignment: 15,
            family_role: 10,
            food: 5,
            music: 5,
            min: 60,
            max: 95,
        }
    }
}

/// Bonus terms before jitter, kept separate for tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub family_role: bool,
    pub food: bool,
    pub music: bool,
}

impl ScoreFormula {
    pub fn breakdown(&self, survey: &SurveyData, element: Element, reference: &ReferenceData) -> ScoreBreakdown {
        let family_role = survey
            .family_role
            .map(|role| reference.preferred_elements(role).contains(&element))
            .unwrap_or(false);

        ScoreBreakdown {
            family_role,
            food: taste_matches(survey.favorite_food.as_deref(), &reference.food_hooks, element),
            music: taste_matches(survey.favorite_music.as_deref(), &reference.music_hooks, element),
        }
    }

    pub fn score(&self, breakdown: ScoreBreakdown, jitter: i32) -> u8 {
        let mut score = self.base + self.element_alignment;
        if breakdown.family_role {
            score += self.family_role;
        }
        if breakdown.food {
            score += self.food;
        }
        if breakdown.music {
            score += self.music;
        }
        (score + jitter).clamp(self.min, self.max).clamp(0, u8::MAX as i32) as u8
    }
}

/// Only the first matching keyword counts, and only if its element matches
fn taste_matches(answer: Option<&str>, hooks: &[TasteHook], element: Element) -> bool {
    answer
        .and_then(|text| TasteHook::first_match(hooks, text))
        .map(|hook| hook.element == element)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FamilyRole, Gender};

    fn survey() -> SurveyData {
        SurveyData {
            english_name: "Sam".to_string(),
            nationality: "CN".to_string(),
            gender: Gender::Male,
            birth_date: "1990-01-01".to_string(),
            birth_time: "08:00".to_string(),
            family_role: Some(FamilyRole::Eldest),
            favorite_food: Some("Spicy noodles".to_string()),
            favorite_music: Some("Jazz".to_string()),
        }
    }

    #[test]
    fn test_breakdown_with_embedded_tables() {
        let reference = ReferenceData::embedded().unwrap();
        let formula = ScoreFormula::default();

        // eldest prefers wood; "spicy" is fire; "jazz" is water
        let wood = formula.breakdown(&survey(), Element::Wood, &reference);
        assert_eq!(wood, ScoreBreakdown { family_role: true, food: false, music: false });

        let fire = formula.breakdown(&survey(), Element::Fire, &reference);
        assert_eq!(fire, ScoreBreakdown { family_role: false, food: true, music: false });

        let water = formula.breakdown(&survey(), Element::Water, &reference);
        // "noodle" would be water, but "spicy" matches first
        assert_eq!(water, ScoreBreakdown { family_role: false, food: false, music: true });
    }

    #[test]
    fn test_score_clamped() {
        let formula = ScoreFormula::default();
        assert_eq!(formula.score(ScoreBreakdown::default(), 0), 85);
        assert_eq!(formula.score(ScoreBreakdown::default(), -5), 80);

        let all = ScoreBreakdown { family_role: true, food: true, music: true };
        assert_eq!(formula.score(all, 4), 95);
        assert_eq!(formula.score(all, -5), 95);

        let harsh = ScoreFormula { base: 30, ..ScoreFormula::default() };
        assert_eq!(harsh.score(ScoreBreakdown::default(), -5), 60);
    }
}
