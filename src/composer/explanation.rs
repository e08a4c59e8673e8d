//! Rationale text attached to each candidate

use crate::types::{Element, Gender, SurveyData};

pub const TEMPLATE_COUNT: usize = 4;

fn impression(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => "우아하고 지혜로운",
        _ => "강건하고 의지가 굳은",
    }
}

/// Render template `template` (taken modulo `TEMPLATE_COUNT`)
pub fn explain(
    survey: &SurveyData,
    element: Element,
    root_meaning: &str,
    suffix_meaning: &str,
    template: usize,
) -> String {
    let element = element.as_str();
    match template % TEMPLATE_COUNT {
        0 => format!(
            "{} 기운을 보강하여 균형을 이루며, {}의 의미로 {} 인상을 줍니다.",
            element,
            root_meaning,
            impression(survey.gender)
        ),
        1 => format!(
            "전통 오행에서 {} 요소가 부족한 당신에게 필요한 기운을 담고 있으며, {}와 {}의 조화로 완성됩니다.",
            element, root_meaning, suffix_meaning
        ),
        2 => format!(
            "{} 출신으로서 한국 문화에 적응할 때 도움이 될 {} 기운과 함께, {}의 깊은 의미를 담았습니다.",
            survey.nationality, element, root_meaning
        ),
        _ => format!(
            "생년월일 분석 결과 {} 요소 보강이 필요하며, 이 이름은 {}과 {}의 의미로 균형잡힌 인생을 상징합니다.",
            element, root_meaning, suffix_meaning
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(gender: Gender) -> SurveyData {
        SurveyData {
            english_name: "Mia".to_string(),
            nationality: "American".to_string(),
            gender,
            birth_date: "1995-03-10".to_string(),
            birth_time: "14:30".to_string(),
            family_role: None,
            favorite_food: None,
            favorite_music: None,
        }
    }

    #[test]
    fn test_templates_interpolate() {
        let text = explain(&survey(Gender::Female), Element::Fire, "summer", "light", 0);
        assert!(text.starts_with("fire 기운을"));
        assert!(text.contains("우아하고"));

        let text = explain(&survey(Gender::Other), Element::Fire, "summer", "light", 0);
        assert!(text.contains("강건하고"));

        let text = explain(&survey(Gender::Male), Element::Water, "vast", "sea", 2);
        assert!(text.starts_with("American"));

        let text = explain(&survey(Gender::Male), Element::Water, "vast", "sea", 7);
        assert!(text.contains("vast") && text.contains("sea"));
    }
}
