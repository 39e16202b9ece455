//! Label vocabulary for merge PRs

use serde::Serialize;

/// Always applied to merge PRs
pub const AREA_INFRASTRUCTURE_LABEL: &str = "Area-Infrastructure";

/// Opt-in label that lets merge bots complete the PR on green
pub const AUTO_MERGE_LABEL: &str = "auto-merge";

/// Marks a PR that needs manual conflict resolution
pub const MERGE_CONFLICTS_LABEL: &str = "Merge Conflicts";

/// Whether `name` is the conflict label
///
/// GitHub label names are case-insensitive, so a hand-made `merge conflicts`
/// label counts too.
pub fn is_conflict_label(name: &str) -> bool {
    name.eq_ignore_ascii_case(MERGE_CONFLICTS_LABEL)
}

/// An insertion-ordered set of labels
///
/// Serializes as a plain JSON array, which is the body GitHub's
/// add-labels endpoint expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Empty set
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a label; duplicates (ignoring ASCII case) are ignored
    pub fn insert(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    /// Case-insensitive membership
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if no labels were added
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate labels in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for LabelSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut labels = LabelSet::new();
        assert!(labels.insert(AREA_INFRASTRUCTURE_LABEL));
        assert!(!labels.insert(AREA_INFRASTRUCTURE_LABEL));
        assert!(!labels.insert("area-infrastructure"));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let labels: LabelSet = [AREA_INFRASTRUCTURE_LABEL, AUTO_MERGE_LABEL, MERGE_CONFLICTS_LABEL]
            .into_iter()
            .collect();
        let names: Vec<_> = labels.iter().collect();
        assert_eq!(
            names,
            vec!["Area-Infrastructure", "auto-merge", "Merge Conflicts"]
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let labels: LabelSet = [AREA_INFRASTRUCTURE_LABEL, AUTO_MERGE_LABEL]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&labels).unwrap();
        assert_eq!(json, serde_json::json!(["Area-Infrastructure", "auto-merge"]));
    }

    #[test]
    fn test_conflict_label_match_ignores_case() {
        assert!(is_conflict_label("Merge Conflicts"));
        assert!(is_conflict_label("merge conflicts"));
        assert!(!is_conflict_label("Merge-Conflicts"));
    }
}
