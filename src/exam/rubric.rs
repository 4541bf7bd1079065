//! Evaluation rubric state
//!
//! A rubric is a checklist of binary yes/no criteria for grading a
//! spoken response. Criteria carry a checkbox state so the educator can
//! tick them off during a live exam; the checks are session-scoped and
//! not persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single binary evaluation criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub id: Uuid,
    pub text: String,
    /// Ticked during a live exam
    pub met: bool,
}

impl Criterion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            met: false,
        }
    }
}

/// Checklist of evaluation criteria
#[derive(Debug, Clone, Default)]
pub struct Rubric {
    criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all criteria (e.g. after generation)
    pub fn replace_all(&mut self, texts: Vec<String>) {
        self.criteria = texts
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .map(Criterion::new)
            .collect();
    }

    /// Append a criterion; blank text is ignored
    pub fn add(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.criteria.push(Criterion::new(text.trim().to_string()));
        }
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.criteria.len() {
            self.criteria.remove(index);
        }
    }

    /// Commit edited texts; emptied entries are dropped
    pub fn commit(&mut self, edits: &[String]) {
        let mut kept = Vec::with_capacity(self.criteria.len());
        for (criterion, edit) in self.criteria.iter().zip(edits) {
            let trimmed = edit.trim();
            if !trimmed.is_empty() {
                let mut c = criterion.clone();
                c.text = trimmed.to_string();
                kept.push(c);
            }
        }
        self.criteria = kept;
    }

    /// Toggle the checkbox state of the criterion at `index`
    pub fn toggle(&mut self, index: usize) {
        if let Some(c) = self.criteria.get_mut(index) {
            c.met = !c.met;
        }
    }

    /// Reset all checkboxes for the next candidate
    pub fn reset_checks(&mut self) {
        for c in &mut self.criteria {
            c.met = false;
        }
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Criterion> {
        self.criteria.iter_mut()
    }

    /// Current texts, for edit buffers
    pub fn texts(&self) -> Vec<String> {
        self.criteria.iter().map(|c| c.text.clone()).collect()
    }

    /// Number of criteria currently marked as met
    pub fn met_count(&self) -> usize {
        self.criteria.iter().filter(|c| c.met).count()
    }

    /// Export as a plain-text checklist
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for c in &self.criteria {
            let mark = if c.met { 'x' } else { ' ' };
            out.push_str(&format!("[{}] {}\n", mark, c.text));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_skips_blank() {
        let mut rubric = Rubric::new();
        rubric.replace_all(vec!["Defines the term".into(), "  ".into(), "Gives an example".into()]);
        assert_eq!(rubric.len(), 2);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut rubric = Rubric::new();
        rubric.replace_all(vec!["A".into(), "B".into()]);

        rubric.toggle(0);
        assert_eq!(rubric.met_count(), 1);

        rubric.reset_checks();
        assert_eq!(rubric.met_count(), 0);
    }

    #[test]
    fn test_commit_drops_emptied() {
        let mut rubric = Rubric::new();
        rubric.replace_all(vec!["Keep".into(), "Drop".into()]);
        rubric.commit(&["Keep".to_string(), "".to_string()]);
        assert_eq!(rubric.texts(), vec!["Keep"]);
    }

    #[test]
    fn test_export_checklist_format() {
        let mut rubric = Rubric::new();
        rubric.replace_all(vec!["States the law".into(), "Cites a source".into()]);
        rubric.toggle(1);
        assert_eq!(
            rubric.export_text(),
            "[ ] States the law\n[x] Cites a source\n"
        );
    }
}
