//! Survey input and name candidate output types
//!
//! Wire names follow the survey UI (camelCase JSON); enumerations serialize
//! lowercase.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-element category
///
/// Declaration order is the canonical tally order (wood, fire, earth, metal, water).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// Position in the canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown element: {}", s))
    }
}

/// Gender as answered in the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Which root table a survey is composed from
///
/// Only two tables exist; `Gender::Other` is routed through
/// `ComposerPolicy::other_gender_bucket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderBucket {
    Male,
    Female,
}

impl FromStr for GenderBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(GenderBucket::Male),
            "female" => Ok(GenderBucket::Female),
            other => Err(format!("unknown gender bucket: {}", other)),
        }
    }
}

/// Birth order within the family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Eldest,
    Middle,
    Youngest,
    Only,
}

impl FromStr for FamilyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eldest" => Ok(FamilyRole::Eldest),
            "middle" => Ok(FamilyRole::Middle),
            "youngest" => Ok(FamilyRole::Youngest),
            "only" => Ok(FamilyRole::Only),
            other => Err(format!("unknown family role: {}", other)),
        }
    }
}

/// Submitted questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    #[serde(default)]
    pub english_name: String,
    /// Country code ("US", "CN") or a free label; only interpolated into text
    #[serde(default)]
    pub nationality: String,
    pub gender: Gender,
    /// "YYYY-MM-DD" (an RFC 3339 timestamp is also accepted)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birth_date: String,
    /// "HH:MM"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birth_time: String,
    #[serde(default, deserialize_with = "lenient_choice", skip_serializing_if = "Option::is_none")]
    pub family_role: Option<FamilyRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_food: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_music: Option<String>,
}

/// Missing birth fields reach the analyzer as "" and degrade there
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Select inputs post "" for "not answered"; unknown choices only lose their bonus
fn lenient_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.parse() {
            Ok(choice) => Ok(Some(choice)),
            Err(e) => {
                tracing::warn!("Ignoring survey choice: {}", e);
                Ok(None)
            }
        },
    }
}

/// One recommended name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCandidate {
    pub hangul: String,
    /// Root logograph followed by the suffix logograph
    pub hanja: [String; 2],
    pub meaning: String,
    pub pronunciation: String,
    /// Always within 60..=95
    pub score: u8,
    pub explanation: String,
}

impl NameCandidate {
    pub(crate) fn fixed(
        hangul: &str,
        hanja: [&str; 2],
        meaning: &str,
        pronunciation: &str,
        score: u8,
        explanation: &str,
    ) -> Self {
        Self {
            hangul: hangul.to_string(),
            hanja: hanja.map(str::to_string),
            meaning: meaning.to_string(),
            pronunciation: pronunciation.to_string(),
            score,
            explanation: explanation.to_string(),
        }
    }
}

/// The two least-represented elements, lowest count first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeficitList([Element; 2]);

impl DeficitList {
    /// Returned whenever birth data cannot be read
    pub const FALLBACK: DeficitList = DeficitList([Element::Wood, Element::Fire]);

    /// `None` when both entries are the same element
    pub fn new(first: Element, second: Element) -> Option<Self> {
        (first != second).then_some(DeficitList([first, second]))
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    pub fn first(&self) -> Element {
        self.0[0]
    }

    pub fn second(&self) -> Element {
        self.0[1]
    }
}

/// A value plus the reason a built-in fallback replaced it, if one did
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub fallback_reason: Option<String>,
}

impl<T> Outcome<T> {
    pub fn computed(value: T) -> Self {
        Self { value, fallback_reason: None }
    }

    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self { value, fallback_reason: Some(reason.into()) }
    }

    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_canonical_order() {
        let indices: Vec<usize> = Element::ALL.iter().map(|e| e.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(Element::Metal.to_string(), "metal");
        assert_eq!("Water".parse::<Element>().unwrap(), Element::Water);
    }

    #[test]
    fn test_survey_from_ui_payload() {
        let json = r#"{
            "englishName": "Emma",
            "nationality": "US",
            "gender": "female",
            "birthDate": "1995-03-10",
            "birthTime": "14:30",
            "familyRole": "",
            "favoriteFood": "Spicy kimchi",
            "occupation": "engineer"
        }"#;

        let survey: SurveyData = serde_json::from_str(json).unwrap();
        assert_eq!(survey.gender, Gender::Female);
        assert_eq!(survey.family_role, None);
        assert_eq!(survey.favorite_food.as_deref(), Some("Spicy kimchi"));
        assert_eq!(survey.favorite_music, None);
    }

    #[test]
    fn test_survey_ignores_unknown_role() {
        let json = r#"{"gender": "male", "birthDate": "1990-01-01", "birthTime": "10:00", "familyRole": "twin"}"#;
        let survey: SurveyData = serde_json::from_str(json).unwrap();
        assert_eq!(survey.family_role, None);
    }

    #[test]
    fn test_survey_tolerates_missing_birth_fields() {
        let survey: SurveyData = serde_json::from_str(r#"{"gender": "female", "birthTime": null}"#).unwrap();
        assert_eq!(survey.birth_date, "");
        assert_eq!(survey.birth_time, "");
    }

    #[test]
    fn test_deficit_list_distinct() {
        assert!(DeficitList::new(Element::Wood, Element::Wood).is_none());
        let list = DeficitList::new(Element::Fire, Element::Metal).unwrap();
        assert_eq!(serde_json::to_value(list).unwrap(), serde_json::json!(["fire", "metal"]));
    }
}
