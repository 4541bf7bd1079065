//! Question list state and import/export
//!
//! The bank is an ordered list of questions held in memory for the
//! session. Edits go through per-item buffers in the UI and are committed
//! with [`QuestionBank::commit`], which enforces the one invariant: no
//! empty entries survive a save.

use crate::exam::parser;
use crate::{Result, VivaError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single candidate exam question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// Ordered, session-scoped list of exam questions
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list (e.g. after generation or import)
    pub fn replace_all(&mut self, texts: Vec<String>) {
        self.questions = texts
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .map(Question::new)
            .collect();
    }

    /// Append a question; blank text is ignored
    pub fn add(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.questions.push(Question::new(text.trim().to_string()));
        }
    }

    /// Remove the question at `index`, if it exists
    pub fn remove(&mut self, index: usize) {
        if index < self.questions.len() {
            self.questions.remove(index);
        }
    }

    /// Commit edited texts back into the bank
    ///
    /// `edits` holds one buffer per current question, in order. Entries
    /// whose text trims to empty are dropped, so the bank never contains
    /// an empty question after a save.
    pub fn commit(&mut self, edits: &[String]) {
        let mut kept = Vec::with_capacity(self.questions.len());
        for (question, edit) in self.questions.iter().zip(edits) {
            let trimmed = edit.trim();
            if !trimmed.is_empty() {
                let mut q = question.clone();
                q.text = trimmed.to_string();
                kept.push(q);
            }
        }
        self.questions = kept;
    }

    pub fn clear(&mut self) {
        self.questions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Current texts, for building edit buffers and prompts
    pub fn texts(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.text.clone()).collect()
    }

    /// Import a question list from uploaded file contents
    ///
    /// Accepts JSON (`{"questions": [...]}` or a bare array of strings)
    /// or newline-delimited plain text. JSON is tried first; anything
    /// that does not parse as JSON is treated as text, with numbering
    /// and bullets stripped so exported lists re-import unchanged.
    pub fn import(&mut self, contents: &str) -> Result<usize> {
        let texts = parse_upload(contents)?;
        if texts.is_empty() {
            return Err(VivaError::ParseError(
                "The uploaded file contains no questions".to_string(),
            ));
        }
        self.replace_all(texts);
        Ok(self.questions.len())
    }

    /// Export as newline-delimited plain text
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for (i, q) in self.questions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, q.text));
        }
        out
    }
}

/// Parse uploaded file contents into question texts
fn parse_upload(contents: &str) -> Result<Vec<String>> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return parse_json_upload(trimmed);
    }

    // Plain text goes through the same cleanup as model output, so
    // a previously exported (numbered) list round-trips.
    Ok(parser::parse_list(trimmed))
}

fn parse_json_upload(contents: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| VivaError::ParseError(format!("Invalid JSON: {}", e)))?;

    let array = match &value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map
            .get("questions")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                VivaError::ParseError("Expected a \"questions\" array".to_string())
            })?,
        _ => {
            return Err(VivaError::ParseError(
                "Expected a JSON array or object".to_string(),
            ))
        }
    };

    array
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.trim().to_string())
                .ok_or_else(|| VivaError::ParseError("Questions must be strings".to_string()))
        })
        .filter(|r| !matches!(r, Ok(s) if s.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_json_object() {
        let mut bank = QuestionBank::new();
        let n = bank
            .import(r#"{"questions": ["What is DNA?", "Define mitosis."]}"#)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(bank.get(0).unwrap().text, "What is DNA?");
    }

    #[test]
    fn test_import_json_bare_array() {
        let mut bank = QuestionBank::new();
        let n = bank.import(r#"["First?", "Second?"]"#).unwrap();
        assert_eq!(n, 2);
        assert_eq!(bank.texts(), vec!["First?", "Second?"]);
    }

    #[test]
    fn test_import_plain_text() {
        let mut bank = QuestionBank::new();
        let n = bank.import("What is an atom?\n\nWhat is a molecule?\n").unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn test_import_rejects_non_string_items() {
        let mut bank = QuestionBank::new();
        assert!(bank.import(r#"{"questions": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_import_rejects_empty() {
        let mut bank = QuestionBank::new();
        assert!(bank.import("").is_err());
        assert!(bank.import(r#"{"questions": []}"#).is_err());
    }

    #[test]
    fn test_import_export_round_trip() {
        let mut bank = QuestionBank::new();
        bank.import(r#"{"questions": ["Alpha?", "Beta?", "Gamma?"]}"#)
            .unwrap();

        let exported = bank.export_text();
        assert_eq!(exported, "1. Alpha?\n2. Beta?\n3. Gamma?\n");

        // Re-importing the numbered export must not keep the numbering
        let mut second = QuestionBank::new();
        second.import(&exported).unwrap();
        assert_eq!(second.texts(), vec!["Alpha?", "Beta?", "Gamma?"]);
    }

    #[test]
    fn test_import_plain_text_strips_numbering_and_bullets() {
        let mut bank = QuestionBank::new();
        let n = bank.import("1. What is DNA?\n- What is RNA?\n").unwrap();
        assert_eq!(n, 2);
        assert_eq!(bank.texts(), vec!["What is DNA?", "What is RNA?"]);
    }

    #[test]
    fn test_add_ignores_blank() {
        let mut bank = QuestionBank::new();
        bank.add("   ");
        bank.add("Real question?");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut bank = QuestionBank::new();
        bank.add("Only one");
        bank.remove(5);
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_commit_drops_emptied_entries() {
        let mut bank = QuestionBank::new();
        bank.replace_all(vec!["One".into(), "Two".into(), "Three".into()]);

        let edits = vec!["One edited".to_string(), "  ".to_string(), "Three".to_string()];
        bank.commit(&edits);

        assert_eq!(bank.texts(), vec!["One edited", "Three"]);
        assert!(bank.iter().all(|q| !q.text.trim().is_empty()));
    }

    #[test]
    fn test_commit_preserves_order_and_ids() {
        let mut bank = QuestionBank::new();
        bank.replace_all(vec!["A".into(), "B".into()]);
        let first_id = bank.get(0).unwrap().id;

        bank.commit(&["A2".to_string(), "B2".to_string()]);
        assert_eq!(bank.texts(), vec!["A2", "B2"]);
        assert_eq!(bank.get(0).unwrap().id, first_id);
    }
}
