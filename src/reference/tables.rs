//! Row types for the reference JSON files

use crate::types::{Element, GenderBucket};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Earthly branch entry (elements.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub element: Element,
    pub korean: String,
    pub animal: String,
}

/// Year → branch row (bazi_rules.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBranch {
    pub year: i32,
    pub branch: String,
}

/// Phonetic name root with its logograph (name_roots.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRoot {
    pub root: String,
    pub hanja: String,
    pub meaning: String,
    pub element: Element,
    pub gender: GenderBucket,
}

/// Suffix logograph (hanja_bank.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HanjaCharacter {
    pub character: String,
    pub element: Element,
    pub meaning: String,
    /// Romanized reading
    pub pronunciation: String,
    pub strokes: u8,
}

/// Family role context (family_context.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRoleContext {
    pub preferred_elements: Vec<Element>,
    #[serde(default)]
    pub description: String,
}

/// Taste keyword (taste_hooks.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteHook {
    /// Lowercase; matched as a substring of the lowercased answer
    pub keyword: String,
    pub element: Element,
    #[serde(default)]
    pub description: String,
}

impl TasteHook {
    /// First hook whose keyword occurs in `answer` (case-insensitive)
    pub fn first_match<'a>(hooks: &'a [TasteHook], answer: &str) -> Option<&'a TasteHook> {
        let answer = answer.to_lowercase();
        hooks.iter().find(|hook| answer.contains(&hook.keyword.to_lowercase()))
    }
}

// File layouts

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ElementsFile {
    pub earthly_branches: FxHashMap<String, BranchInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BaziRulesFile {
    pub year_branches: Vec<YearBranch>,
    pub month_branches: FxHashMap<u32, String>,
    pub hour_branches: FxHashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FamilyContextFile {
    pub family_roles: FxHashMap<crate::types::FamilyRole, FamilyRoleContext>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TasteHooksFile {
    #[serde(default)]
    pub food: Vec<TasteHook>,
    #[serde(default)]
    pub music: Vec<TasteHook>,
}

pub(super) type RootTable = FxHashMap<GenderBucket, FxHashMap<Element, Vec<NameRoot>>>;
pub(super) type HanjaBank = FxHashMap<Element, Vec<HanjaCharacter>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn hook(keyword: &str, element: Element) -> TasteHook {
        TasteHook { keyword: keyword.to_string(), element, description: String::new() }
    }

    #[test]
    fn test_first_match_is_case_insensitive() {
        let hooks = vec![hook("spicy", Element::Fire), hook("soup", Element::Water)];
        let hit = TasteHook::first_match(&hooks, "SPICY Soup").unwrap();
        assert_eq!(hit.element, Element::Fire);
        assert!(TasteHook::first_match(&hooks, "pasta").is_none());
    }
}
