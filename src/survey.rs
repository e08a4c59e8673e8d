//! Survey normalization for `POST /api/surveys`
//!
//! Nothing is stored; the normalized record is echoed back to the client.

use crate::types::{FamilyRole, Gender, SurveyData};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Cleaned survey; unanswered optionals serialize as `null`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSurvey {
    pub english_name: String,
    pub nationality: String,
    pub gender: Gender,
    pub birth_date: String,
    pub birth_time: String,
    pub family_role: Option<FamilyRole>,
    pub favorite_food: Option<String>,
    pub favorite_music: Option<String>,
    pub timestamp: String,
}

pub fn normalize(survey: &SurveyData, received_at: DateTime<Utc>) -> NormalizedSurvey {
    NormalizedSurvey {
        english_name: survey.english_name.trim().to_string(),
        nationality: survey.nationality.clone(),
        gender: survey.gender,
        birth_date: survey.birth_date.clone(),
        birth_time: survey.birth_time.clone(),
        family_role: survey.family_role,
        favorite_food: trimmed(survey.favorite_food.as_deref()),
        favorite_music: trimmed(survey.favorite_music.as_deref()),
        timestamp: received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_trims_and_nulls() {
        let survey = SurveyData {
            english_name: "  Emma Stone ".to_string(),
            nationality: "US".to_string(),
            gender: Gender::Female,
            birth_date: "1995-03-10".to_string(),
            birth_time: "14:30".to_string(),
            family_role: None,
            favorite_food: Some("   ".to_string()),
            favorite_music: Some(" jazz ".to_string()),
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let normalized = normalize(&survey, at);
        assert_eq!(normalized.english_name, "Emma Stone");
        assert_eq!(normalized.favorite_food, None);
        assert_eq!(normalized.favorite_music.as_deref(), Some("jazz"));
        assert_eq!(normalized.timestamp, "2024-05-01T12:00:00.000Z");

        let json = serde_json::to_value(&normalized).unwrap();
        assert!(json["familyRole"].is_null());
        assert!(json["favoriteFood"].is_null());
    }
}
