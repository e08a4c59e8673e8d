//! Korean Name Recommender
//!
//! Rule-based pipeline that turns a survey into Korean given-name candidates.
//!
//! - `reference/`: Lookup tables (branches, name roots, hanja, taste hooks)
//! - `analyzer`: Five-element deficit analysis from birth date and time
//! - `composer/`: Candidate composition, scoring, explanations, fallbacks
//! - `recommender`: Analyzer → composer orchestration and wire format
//! - `survey`: Survey normalization
//! - `api_server`: Axum endpoints (feature `api`)

pub mod types;
pub mod reference;
pub mod analyzer;
pub mod composer;
pub mod recommender;
pub mod survey;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use types::{DeficitList, Element, FamilyRole, Gender, GenderBucket, NameCandidate, Outcome, SurveyData};
pub use reference::ReferenceData;
pub use analyzer::{AnalysisError, BaziChart, DeficitAnalyzer};
pub use composer::{ComposerPolicy, CompositionError, NameComposer, RandomSource, RngSource, ScriptedSource};
pub use recommender::{NameRecommender, Recommendation, RecommendationResponse, Recommender, Stage};
pub use config::ServerConfig;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
