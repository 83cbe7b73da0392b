//! Side-by-side comparison of up to three universities.

use serde::Serialize;

use crate::model::University;

/// Maximum number of universities compared at once.
pub const MAX_COMPARED: usize = 3;

/// Placeholder shown for an empty comparison cell.
pub const EMPTY_CELL: &str = "—";

/// Ordered selection of at most [`MAX_COMPARED`] university ids.
///
/// Behaves as a bounded queue: adding a fourth id evicts the oldest one.
/// Toggling an id that is already selected removes it rather than moving it
/// to the back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes `id`. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(position);
            return false;
        }

        self.ids.push(id.to_string());
        if self.ids.len() > MAX_COMPARED {
            self.ids.remove(0);
        }
        true
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Column header for one compared university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedUniversity {
    pub id: String,
    pub name: String,
    pub location: String,
    pub logo_url: String,
}

/// One labelled row with a cell per compared university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

/// Comparison table projected from the selected universities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub universities: Vec<ComparedUniversity>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Builds the table for `items`, one column per university in order.
    pub fn build(items: &[University]) -> Self {
        if items.is_empty() {
            return Self::default();
        }

        let universities = items
            .iter()
            .map(|u| ComparedUniversity {
                id: u.id.clone(),
                name: u.name.clone(),
                location: u.location.clone(),
                logo_url: u.logo_url.clone(),
            })
            .collect();

        let rows = vec![
            row(items, "Mission", |u| {
                u.mission_text().map(str::to_string).unwrap_or_default()
            }),
            row(items, "Programs", |u| {
                u.programs
                    .iter()
                    .take(3)
                    .map(|p| p.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
            row(items, "Tuition", |u| match u.programs.first() {
                Some(program) if !program.tuition_fee.is_empty() => {
                    format!("{} (varies)", program.tuition_fee)
                }
                _ => String::new(),
            }),
            row(items, "Scholarships", |u| {
                u.admissions.scholarships.join(", ")
            }),
            row(items, "Exchange", |u| {
                u.cooperation.exchange_programs.join(", ")
            }),
        ];

        Self { universities, rows }
    }

    /// Builds the table for the selected ids, in selection order.
    ///
    /// Ids that no longer resolve in `catalog` are skipped.
    pub fn for_selection(selection: &ComparisonSelection, catalog: &[University]) -> Self {
        let items: Vec<University> = selection
            .ids()
            .iter()
            .filter_map(|id| catalog.iter().find(|u| &u.id == id).cloned())
            .collect();
        Self::build(&items)
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }
}

fn row(items: &[University], label: &'static str, cell: impl Fn(&University) -> String) -> ComparisonRow {
    ComparisonRow {
        label,
        values: items
            .iter()
            .map(|u| {
                let value = cell(u);
                if value.is_empty() {
                    EMPTY_CELL.to_string()
                } else {
                    value
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::sample::sample_universities;

    #[test]
    fn test_fourth_toggle_evicts_oldest() {
        let mut selection = ComparisonSelection::new();
        for id in ["a", "b", "c", "d"] {
            assert!(selection.toggle(id));
        }
        assert_eq!(selection.ids(), ["b", "c", "d"]);
    }

    #[test]
    fn test_toggle_present_id_removes_it() {
        let mut selection = ComparisonSelection::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("c");

        assert!(!selection.toggle("a"));
        assert_eq!(selection.ids(), ["b", "c"]);

        // Re-adding goes to the back.
        assert!(selection.toggle("a"));
        assert_eq!(selection.ids(), ["b", "c", "a"]);
    }

    #[test]
    fn test_table_rows() {
        let catalog = sample_universities();
        let mut selection = ComparisonSelection::new();
        selection.toggle("aitu");
        selection.toggle("nu");

        let table = ComparisonTable::for_selection(&selection, &catalog);
        let names: Vec<&str> = table.universities.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Astana IT University", "Nazarbayev University"]);

        let labels: Vec<&str> = table.rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            ["Mission", "Programs", "Tuition", "Scholarships", "Exchange"]
        );

        assert_eq!(
            table.rows[1].values[0],
            "Software Engineering BSc, Cybersecurity BSc"
        );
        assert_eq!(table.rows[2].values[1], "$8,000 per year (varies)");
        assert_eq!(
            table.rows[4].values[0],
            "Tech internships, Erasmus+ mobility"
        );
        assert!(table.rows[0].values[1].starts_with("To be a leading center"));
    }

    #[test]
    fn test_table_skips_unknown_ids_and_fills_empty_cells() {
        let bare = University {
            id: "bare".to_string(),
            name: "Bare".to_string(),
            ..University::default()
        };
        let mut selection = ComparisonSelection::new();
        selection.toggle("gone");
        selection.toggle("bare");

        let table = ComparisonTable::for_selection(&selection, &[bare]);
        assert_eq!(table.universities.len(), 1);
        assert!(table.rows.iter().all(|r| r.values == [EMPTY_CELL]));
    }

    #[test]
    fn test_empty_selection_builds_empty_table() {
        let table = ComparisonTable::for_selection(&ComparisonSelection::new(), &sample_universities());
        assert!(table.is_empty());
        assert!(table.rows.is_empty());
    }

    proptest! {
        #[test]
        fn prop_selection_never_exceeds_limit(ids in prop::collection::vec("[a-f]", 0..40)) {
            let mut selection = ComparisonSelection::new();
            for id in &ids {
                selection.toggle(id);
                prop_assert!(selection.len() <= MAX_COMPARED);
            }
        }

        #[test]
        fn prop_double_toggle_restores_state(
            ids in prop::collection::vec("[a-f]", 0..6),
            extra in "[a-f]",
        ) {
            let mut selection = ComparisonSelection::new();
            for id in &ids {
                selection.toggle(id);
            }
            let before = selection.clone();

            // A fresh id added to a full selection evicts, so only check the
            // cases where no eviction happens.
            if selection.contains(&extra) || selection.len() < MAX_COMPARED {
                selection.toggle(&extra);
                selection.toggle(&extra);
                if before.contains(&extra) {
                    // Removed then appended: same members, moved to the back.
                    prop_assert_eq!(selection.len(), before.len());
                } else {
                    prop_assert_eq!(selection, before);
                }
            }
        }
    }
}
