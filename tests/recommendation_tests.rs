// Recommendation Pipeline Tests
//
// Purpose: End-to-end analyzer → composer runs against the embedded tables
// Run with: cargo test --test recommendation_tests

use name_composer_rust::{
    ComposerPolicy, DeficitAnalyzer, DeficitList, Element, Gender, GenderBucket, NameComposer, RandomSource,
    Recommender, ReferenceData, RngSource, ScriptedSource, SurveyData,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn reference() -> Arc<ReferenceData> {
    Arc::new(ReferenceData::embedded().expect("embedded reference data"))
}

fn survey(gender: Gender, birth_date: &str, birth_time: &str) -> SurveyData {
    SurveyData {
        english_name: "Taylor".to_string(),
        nationality: "American".to_string(),
        gender,
        birth_date: birth_date.to_string(),
        birth_time: birth_time.to_string(),
        family_role: None,
        favorite_food: None,
        favorite_music: None,
    }
}

#[test]
fn test_deficits_always_two_distinct_elements() {
    let analyzer = DeficitAnalyzer::new(reference());

    for year in 1940..2030 {
        for month in 1..=12 {
            for hour in [0, 5, 11, 14, 23] {
                let date = format!("{}-{:02}-15", year, month);
                let time = format!("{:02}:00", hour);
                let deficits = analyzer.analyze_deficits(&survey(Gender::Male, &date, &time));
                assert_ne!(deficits.first(), deficits.second(), "{} {}", date, time);
            }
        }
    }
}

#[test]
fn test_documented_fallback_inputs() {
    let analyzer = DeficitAnalyzer::new(reference());
    assert_eq!(analyzer.analyze_deficits(&survey(Gender::Male, "1990-06-15", "25:00")), DeficitList::FALLBACK);
    assert_eq!(analyzer.analyze_deficits(&survey(Gender::Male, "not-a-date", "10:00")), DeficitList::FALLBACK);
    assert_eq!(DeficitList::FALLBACK.as_slice(), &[Element::Wood, Element::Fire]);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let recommender = Recommender::new(reference(), ComposerPolicy::default());
    let input = survey(Gender::Female, "1995-03-10", "14:30");

    let first = recommender.recommend_with(&input, &mut RngSource(StdRng::seed_from_u64(42)));
    let second = recommender.recommend_with(&input, &mut RngSource(StdRng::seed_from_u64(42)));
    assert_eq!(first, second);
}

#[test]
fn test_random_draws_never_change_roots() {
    let reference = reference();
    let composer = NameComposer::new(reference.clone(), ComposerPolicy::default());
    let input = survey(Gender::Male, "1990-06-15", "14:00");
    let wood_root = &reference.roots(GenderBucket::Male, Element::Wood)[0];

    for seed in 0..20 {
        let mut rng = RngSource(StdRng::seed_from_u64(seed));
        let candidates = composer.compose_candidates(&input, &[Element::Wood, Element::Fire], &mut rng);
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].hanja[0], wood_root.hanja);
        assert!(candidates[0].hangul.starts_with(&wood_root.root));
        assert!(candidates.iter().all(|c| (60..=95).contains(&c.score)));
    }
}

#[test]
fn test_taste_bonuses_raise_score() {
    let composer = NameComposer::new(reference(), ComposerPolicy::default());
    let mut input = survey(Gender::Female, "1995-03-10", "14:30");
    input.favorite_food = Some("Spicy tteokbokki".to_string());
    input.favorite_music = Some("Rock ballads".to_string());

    // fire + food (+5) + music (+5), jitter -5: 70 + 15 + 5 + 5 - 5
    let candidates = composer.compose_candidates(&input, &[Element::Fire], &mut ScriptedSource::zeros());
    assert!(candidates.iter().all(|c| c.score == 90));

    // metal gets neither taste bonus
    let candidates = composer.compose_candidates(&input, &[Element::Metal], &mut ScriptedSource::zeros());
    assert!(candidates.iter().all(|c| c.score == 80));
}

/// Always picks the last index
struct LastPick;

impl RandomSource for LastPick {
    fn pick(&mut self, len: usize) -> usize {
        len - 1
    }
}

#[test]
fn test_custom_random_source() {
    let reference = reference();
    let composer = NameComposer::new(reference.clone(), ComposerPolicy::default());
    let input = survey(Gender::Male, "1990-06-15", "14:00");

    let candidates = composer.compose_candidates(&input, &[Element::Water], &mut LastPick);
    let last = reference.characters(Element::Water).last().unwrap();
    assert!(candidates.iter().all(|c| c.hanja[1] == last.character));
    // jitter +4: 70 + 15 + 4
    assert!(candidates.iter().all(|c| c.score == 89));
}
