//! University records as stored in the catalog.
//!
//! Records serialize with camelCase keys, the same shape kept in the remote
//! collection. Collection fields default to empty when a document omits them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// A university entry in the catalog.
///
/// The mission narrative exists in two schema variants: a single
/// `missionHistory` blob and split `mission` / `history` fields. Both are
/// optional and callers populate whichever they use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    /// Unique, immutable record id. Empty means "not assigned yet".
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_url: String,
    /// Free text, conventionally "city, country".
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub admissions: Admissions,
    #[serde(default)]
    pub cooperation: Cooperation,
    #[serde(default, rename = "tour3dUrl", skip_serializing_if = "Option::is_none")]
    pub tour_3d_url: Option<String>,
    #[serde(default)]
    pub programs: Vec<Program>,
}

/// A study program offered by a university. Owned by its university record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Id scoped within the owning university.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: String,
    /// Display text only, never parsed as an amount.
    #[serde(default)]
    pub tuition_fee: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admissions {
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub deadlines: Vec<String>,
    #[serde(default)]
    pub scholarships: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cooperation {
    #[serde(default)]
    pub partners: Vec<String>,
    #[serde(default)]
    pub exchange_programs: Vec<String>,
    #[serde(default)]
    pub foreign_student_info: String,
}

impl University {
    /// Returns the record with every optional field filled with its empty
    /// default, so a merge write never leaves a prior remote value behind.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.mission_history,
            &mut self.mission,
            &mut self.history,
            &mut self.tour_3d_url,
        ] {
            field.get_or_insert_with(String::new);
        }
        for program in &mut self.programs {
            program.faculty.get_or_insert_with(String::new);
        }
        self
    }

    /// Mission text for display: the split `mission` field when set,
    /// otherwise the combined `missionHistory` blob.
    pub fn mission_text(&self) -> Option<&str> {
        [&self.mission, &self.mission_history]
            .into_iter()
            .flatten()
            .map(|text| text.trim())
            .find(|text| !text.is_empty())
    }

    /// Finds a program of this university by its scoped id.
    pub fn program(&self, program_id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == program_id)
    }
}

/// Derives a url-safe id from free text.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and strips leading and trailing dashes.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
