//! Recommender - runs the deficit analyzer and the name composer in sequence
//!
//! Both stages recover locally; `Recommendation::degraded` records which ones
//! did so the caller can decide whether to tell the user.

use crate::analyzer::{BaziChart, DeficitAnalyzer};
use crate::composer::{static_recommendations, ComposerPolicy, NameComposer, RandomSource, RngSource};
use crate::reference::ReferenceData;
use crate::types::{DeficitList, Element, NameCandidate, SurveyData};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

/// Pipeline stage that fell back to built-in data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Analysis,
    Composition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub candidates: Vec<NameCandidate>,
    pub deficits: DeficitList,
    /// Absent when the analysis stage fell back
    pub chart: Option<BaziChart>,
    pub degraded: Vec<Stage>,
}

/// Survey → recommendation; the seam the HTTP layer depends on
pub trait NameRecommender: Send + Sync {
    fn recommend(&self, survey: &SurveyData) -> Result<Recommendation>;
}

pub struct Recommender {
    analyzer: DeficitAnalyzer,
    composer: NameComposer,
}

impl Recommender {
    pub fn new(reference: Arc<ReferenceData>, policy: ComposerPolicy) -> Self {
        Self {
            analyzer: DeficitAnalyzer::new(reference.clone()),
            composer: NameComposer::new(reference, policy),
        }
    }

    pub fn analyzer(&self) -> &DeficitAnalyzer {
        &self.analyzer
    }

    pub fn composer(&self) -> &NameComposer {
        &self.composer
    }

    /// Run the pipeline with an explicit random source
    pub fn recommend_with<R>(&self, survey: &SurveyData, rng: &mut R) -> Recommendation
    where
        R: RandomSource + ?Sized,
    {
        let mut degraded = Vec::new();

        let analysis = self.analyzer.analyze(survey);
        if analysis.used_fallback() {
            degraded.push(Stage::Analysis);
        }
        let (deficits, chart) = match analysis.value {
            Some(reading) => (reading.deficits, Some(reading.chart)),
            None => (DeficitList::FALLBACK, None),
        };
        tracing::info!("Deficit elements identified: {:?}", deficits.as_slice());

        let composition = self.composer.compose(survey, deficits.as_slice(), rng);
        if composition.used_fallback() {
            degraded.push(Stage::Composition);
        }
        tracing::info!("Name candidates generated: {}", composition.value.len());

        Recommendation {
            candidates: composition.value,
            deficits,
            chart,
            degraded,
        }
    }
}

impl NameRecommender for Recommender {
    fn recommend(&self, survey: &SurveyData) -> Result<Recommendation> {
        Ok(self.recommend_with(survey, &mut RngSource::thread()))
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub deficit_elements: Vec<Element>,
    pub total_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<BaziChart>,
}

/// Body of `POST /api/names/recommend`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub candidates: Vec<NameCandidate>,
    pub analysis: AnalysisSummary,
}

impl RecommendationResponse {
    /// Static payload served when the pipeline could not run at all
    pub fn fallback() -> Self {
        let candidates = static_recommendations();
        Self {
            success: true,
            analysis: AnalysisSummary {
                deficit_elements: DeficitList::FALLBACK.as_slice().to_vec(),
                total_candidates: candidates.len(),
                fallback: Some(true),
                degraded: Vec::new(),
                chart: None,
            },
            candidates,
        }
    }
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            success: true,
            analysis: AnalysisSummary {
                deficit_elements: rec.deficits.as_slice().to_vec(),
                total_candidates: rec.candidates.len(),
                fallback: None,
                degraded: rec.degraded,
                chart: rec.chart,
            },
            candidates: rec.candidates,
        }
    }
}
