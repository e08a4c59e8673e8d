//! Reference Data Loading
//!
//! Static lookup tables consumed read-only by the deficit analyzer and the
//! name composer. Tables are built once, then shared behind an `Arc`.
//!
//! Sources:
//! - embedded: JSON files under `data/` compiled into the binary
//! - directory: the same file set read from disk (`DATA_DIR`)

pub mod tables;

pub use tables::{BranchInfo, FamilyRoleContext, HanjaCharacter, NameRoot, TasteHook, YearBranch};

use crate::types::{Element, FamilyRole, GenderBucket};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tables::{BaziRulesFile, ElementsFile, FamilyContextFile, HanjaBank, RootTable, TasteHooksFile};

const ELEMENTS_FILE: &str = "elements.json";
const BAZI_RULES_FILE: &str = "bazi_rules.json";
const NAME_ROOTS_FILE: &str = "name_roots.json";
const HANJA_BANK_FILE: &str = "hanja_bank.json";
const HANJA_READINGS_FILE: &str = "hanja_readings.json";
const FAMILY_CONTEXT_FILE: &str = "family_context.json";
const TASTE_HOOKS_FILE: &str = "taste_hooks.json";
const SCORING_WEIGHTS_FILE: &str = "scoring_weights.json";

/// Reading used when a logograph has no entry in the readings table
pub const DEFAULT_READING: &str = "은";

/// All lookup tables
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Branch key → element and labels
    pub earthly_branches: FxHashMap<String, BranchInfo>,

    /// Year → branch; order matters for the `year mod len` fallback
    pub year_branches: Vec<YearBranch>,

    /// Month number (1-12) → branch
    pub month_branches: FxHashMap<u32, String>,

    /// Two-hour bucket ("23-01", "01-03", ...) → branch
    pub hour_branches: FxHashMap<String, String>,

    /// (gender bucket, element) → phonetic roots
    pub name_roots: FxHashMap<GenderBucket, FxHashMap<Element, Vec<NameRoot>>>,

    /// Element → suffix logographs
    pub hanja_bank: FxHashMap<Element, Vec<HanjaCharacter>>,

    /// Logograph → hangul reading
    pub hanja_readings: FxHashMap<String, String>,

    pub family_roles: FxHashMap<FamilyRole, FamilyRoleContext>,

    /// Food keywords, in file order
    pub food_hooks: Vec<TasteHook>,

    /// Music keywords, in file order
    pub music_hooks: Vec<TasteHook>,

    /// Named weights shipped with the tables. Not applied by the composer's
    /// score formula.
    pub scoring_weights: FxHashMap<String, f64>,
}

/// Table sizes, logged at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSummary {
    pub branches: usize,
    pub years: usize,
    pub roots: usize,
    pub characters: usize,
    pub readings: usize,
    pub family_roles: usize,
    pub taste_hooks: usize,
    pub scoring_weights: usize,
}

impl ReferenceData {
    /// Tables compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_sources(|name| {
            let contents = match name {
                ELEMENTS_FILE => include_str!("../../data/elements.json"),
                BAZI_RULES_FILE => include_str!("../../data/bazi_rules.json"),
                NAME_ROOTS_FILE => include_str!("../../data/name_roots.json"),
                HANJA_BANK_FILE => include_str!("../../data/hanja_bank.json"),
                HANJA_READINGS_FILE => include_str!("../../data/hanja_readings.json"),
                FAMILY_CONTEXT_FILE => include_str!("../../data/family_context.json"),
                TASTE_HOOKS_FILE => include_str!("../../data/taste_hooks.json"),
                SCORING_WEIGHTS_FILE => include_str!("../../data/scoring_weights.json"),
                other => anyhow::bail!("No embedded reference file named {}", other),
            };
            Ok(contents.to_string())
        })
    }

    /// Read every table from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        tracing::info!("Loading reference data from {:?}", dir);
        Self::from_sources(|name| {
            let path = dir.join(name);
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read reference file: {:?}", path))
        })
    }

    /// Directory tables when `dir` is given, embedded tables otherwise
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Self::embedded(),
        }
    }

    fn from_sources<F>(mut read: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let elements: ElementsFile = parse(ELEMENTS_FILE, &read(ELEMENTS_FILE)?)?;
        let rules: BaziRulesFile = parse(BAZI_RULES_FILE, &read(BAZI_RULES_FILE)?)?;
        let name_roots: RootTable = parse(NAME_ROOTS_FILE, &read(NAME_ROOTS_FILE)?)?;
        let hanja_bank: HanjaBank = parse(HANJA_BANK_FILE, &read(HANJA_BANK_FILE)?)?;
        let hanja_readings: FxHashMap<String, String> =
            parse(HANJA_READINGS_FILE, &read(HANJA_READINGS_FILE)?)?;
        let family: FamilyContextFile = parse(FAMILY_CONTEXT_FILE, &read(FAMILY_CONTEXT_FILE)?)?;
        let tastes: TasteHooksFile = parse(TASTE_HOOKS_FILE, &read(TASTE_HOOKS_FILE)?)?;
        let scoring_weights: FxHashMap<String, f64> =
            parse(SCORING_WEIGHTS_FILE, &read(SCORING_WEIGHTS_FILE)?)?;

        let data = Self {
            earthly_branches: elements.earthly_branches,
            year_branches: rules.year_branches,
            month_branches: rules.month_branches,
            hour_branches: rules.hour_branches,
            name_roots,
            hanja_bank,
            hanja_readings,
            family_roles: family.family_roles,
            food_hooks: tastes.food,
            music_hooks: tastes.music,
            scoring_weights,
        };
        data.warn_on_gaps();
        Ok(data)
    }

    /// Logs (gender, element) pairs that can never yield a candidate
    fn warn_on_gaps(&self) {
        for element in Element::ALL {
            if self.characters(element).is_empty() {
                tracing::warn!("No hanja characters for element {}", element);
            }
            for bucket in [GenderBucket::Male, GenderBucket::Female] {
                if self.roots(bucket, element).is_empty() {
                    tracing::warn!("No {:?} name roots for element {}", bucket, element);
                }
            }
        }
    }

    pub fn summary(&self) -> ReferenceSummary {
        ReferenceSummary {
            branches: self.earthly_branches.len(),
            years: self.year_branches.len(),
            roots: self.name_roots.values().flat_map(|m| m.values()).map(Vec::len).sum(),
            characters: self.hanja_bank.values().map(Vec::len).sum(),
            readings: self.hanja_readings.len(),
            family_roles: self.family_roles.len(),
            taste_hooks: self.food_hooks.len() + self.music_hooks.len(),
            scoring_weights: self.scoring_weights.len(),
        }
    }

    // Lookups

    pub fn branch_element(&self, branch: &str) -> Option<Element> {
        self.earthly_branches.get(branch).map(|info| info.element)
    }

    /// Exact year row, else row `year mod len`
    pub fn year_branch(&self, year: i32) -> Option<&str> {
        if let Some(row) = self.year_branches.iter().find(|row| row.year == year) {
            return Some(row.branch.as_str());
        }
        let len = self.year_branches.len();
        if len == 0 {
            return None;
        }
        let idx = (year as i64).rem_euclid(len as i64) as usize;
        Some(self.year_branches[idx].branch.as_str())
    }

    pub fn month_branch(&self, month: u32) -> Option<&str> {
        self.month_branches.get(&month).map(String::as_str)
    }

    pub fn hour_branch(&self, bucket: &str) -> Option<&str> {
        self.hour_branches.get(bucket).map(String::as_str)
    }

    pub fn roots(&self, bucket: GenderBucket, element: Element) -> &[NameRoot] {
        self.name_roots
            .get(&bucket)
            .and_then(|by_element| by_element.get(&element))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn characters(&self, element: Element) -> &[HanjaCharacter] {
        self.hanja_bank.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Hangul reading of a logograph, `DEFAULT_READING` when unmapped
    pub fn reading(&self, character: &str) -> &str {
        self.hanja_readings
            .get(character)
            .map(String::as_str)
            .unwrap_or(DEFAULT_READING)
    }

    pub fn preferred_elements(&self, role: FamilyRole) -> &[Element] {
        self.family_roles
            .get(&role)
            .map(|ctx| ctx.preferred_elements.as_slice())
            .unwrap_or(&[])
    }
}

fn parse<T: DeserializeOwned>(name: &str, contents: &str) -> Result<T> {
    serde_json::from_str(contents).with_context(|| format!("Failed to parse {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables_complete() {
        let data = ReferenceData::embedded().unwrap();
        let summary = data.summary();
        assert_eq!(summary.branches, 12);
        assert_eq!(data.month_branches.len(), 12);
        assert_eq!(data.hour_branches.len(), 12);
        assert_eq!(summary.family_roles, 4);
        assert_eq!(summary.scoring_weights, 5);

        for element in Element::ALL {
            assert!(!data.characters(element).is_empty(), "{} has no characters", element);
            assert!(!data.roots(GenderBucket::Male, element).is_empty());
            assert!(!data.roots(GenderBucket::Female, element).is_empty());
        }
    }

    #[test]
    fn test_every_branch_key_resolves() {
        let data = ReferenceData::embedded().unwrap();
        let keys = data
            .month_branches
            .values()
            .chain(data.hour_branches.values())
            .chain(data.year_branches.iter().map(|row| &row.branch));
        for key in keys {
            assert!(data.branch_element(key).is_some(), "branch {} has no element", key);
        }
    }

    #[test]
    fn test_year_branch_wraps_when_missing() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.year_branch(1990), Some("午"));

        let len = data.year_branches.len() as i32;
        let expected = data.year_branches[(2050 % len) as usize].branch.clone();
        assert_eq!(data.year_branch(2050), Some(expected.as_str()));

        let empty = ReferenceData::default();
        assert_eq!(empty.year_branch(1990), None);
    }

    #[test]
    fn test_reading_defaults_when_unmapped() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.reading("海"), "해");
        assert_eq!(data.reading("龍"), DEFAULT_READING);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ReferenceData::load(Path::new("/nonexistent/reference")).unwrap_err();
        assert!(format!("{:#}", err).contains("elements.json"));
    }
}
