//! Name Composer
//!
//! Builds name candidates from the deficit elements:
//! - element: round-robin over the deficits
//! - root: positional pick from (gender bucket, element)
//! - suffix: random pick from the element's character bank
//!
//! Slots whose tables are empty are skipped. When no slot produces a
//! candidate the gender fallback list is returned instead.

pub mod explanation;
pub mod fallback;
pub mod random;
pub mod scoring;

pub use fallback::{gender_fallback, static_recommendations};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use scoring::{ScoreBreakdown, ScoreFormula};

use crate::reference::ReferenceData;
use crate::types::{Element, Gender, GenderBucket, NameCandidate, Outcome, SurveyData};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("no deficit elements to compose from")]
    NoDeficits,

    #[error("no name roots or characters for elements {0:?}")]
    NoCandidates(Vec<Element>),
}

/// Upper bound on candidates per recommendation
pub const MAX_CANDIDATES: usize = 4;

/// Tunables for composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerPolicy {
    /// Capped at `MAX_CANDIDATES`
    pub candidate_count: usize,
    /// Root table used for `Gender::Other`
    pub other_gender_bucket: GenderBucket,
    pub score: ScoreFormula,
}

impl Default for ComposerPolicy {
    fn default() -> Self {
        Self {
            candidate_count: 4,
            other_gender_bucket: GenderBucket::Male,
            score: ScoreFormula::default(),
        }
    }
}

impl ComposerPolicy {
    pub fn bucket_for(&self, gender: Gender) -> GenderBucket {
        match gender {
            Gender::Female => GenderBucket::Female,
            Gender::Male => GenderBucket::Male,
            Gender::Other => self.other_gender_bucket,
        }
    }
}

pub struct NameComposer {
    reference: Arc<ReferenceData>,
    policy: ComposerPolicy,
}

impl NameComposer {
    pub fn new(reference: Arc<ReferenceData>, policy: ComposerPolicy) -> Self {
        Self { reference, policy }
    }

    pub fn policy(&self) -> &ComposerPolicy {
        &self.policy
    }

    /// Up to `candidate_count` candidates; the gender fallback list if none
    pub fn compose_candidates<R>(&self, survey: &SurveyData, deficits: &[Element], rng: &mut R) -> Vec<NameCandidate>
    where
        R: RandomSource + ?Sized,
    {
        self.compose(survey, deficits, rng).into_value()
    }

    /// Like `compose_candidates`, reporting when the fallback list was used
    pub fn compose<R>(&self, survey: &SurveyData, deficits: &[Element], rng: &mut R) -> Outcome<Vec<NameCandidate>>
    where
        R: RandomSource + ?Sized,
    {
        match self.try_compose(survey, deficits, rng) {
            Ok(candidates) => Outcome::computed(candidates),
            Err(e) => {
                tracing::warn!("Name composition failed, using fallback candidates: {}", e);
                let bucket = self.policy.bucket_for(survey.gender);
                Outcome::fallback(gender_fallback(bucket), e.to_string())
            }
        }
    }

    pub fn try_compose<R>(
        &self,
        survey: &SurveyData,
        deficits: &[Element],
        rng: &mut R,
    ) -> Result<Vec<NameCandidate>, CompositionError>
    where
        R: RandomSource + ?Sized,
    {
        if deficits.is_empty() {
            return Err(CompositionError::NoDeficits);
        }

        let bucket = self.policy.bucket_for(survey.gender);
        let count = self.policy.candidate_count.min(MAX_CANDIDATES);
        let mut candidates = Vec::with_capacity(count);

        for i in 0..count {
            let element = deficits[i % deficits.len()];
            match self.compose_slot(survey, bucket, element, i, rng) {
                Some(candidate) => candidates.push(candidate),
                None => tracing::debug!("Skipping slot {}: no {:?} tables for {}", i, bucket, element),
            }
        }

        if candidates.is_empty() {
            return Err(CompositionError::NoCandidates(deficits.to_vec()));
        }
        Ok(candidates)
    }

    fn compose_slot<R>(
        &self,
        survey: &SurveyData,
        bucket: GenderBucket,
        element: Element,
        slot: usize,
        rng: &mut R,
    ) -> Option<NameCandidate>
    where
        R: RandomSource + ?Sized,
    {
        let roots = self.reference.roots(bucket, element);
        let characters = self.reference.characters(element);
        if roots.is_empty() || characters.is_empty() {
            return None;
        }

        let root = &roots[slot % roots.len()];
        let suffix = &characters[rng.pick(characters.len())];
        let reading = self.reference.reading(&suffix.character);

        let breakdown = self.policy.score.breakdown(survey, element, &self.reference);
        let score = self.policy.score.score(breakdown, rng.jitter());
        let template = rng.pick(explanation::TEMPLATE_COUNT);

        Some(NameCandidate {
            hangul: format!("{}{}", root.root, reading),
            hanja: [root.hanja.clone(), suffix.character.clone()],
            meaning: format!("{}, {}", root.meaning, suffix.meaning),
            pronunciation: format!("{}-{}", root.root, suffix.pronunciation),
            score,
            explanation: explanation::explain(survey, element, &root.meaning, &suffix.meaning, template),
        })
    }
}
