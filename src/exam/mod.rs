//! Exam domain: question lists, rubrics, prompt templates, and the
//! parsing of loosely-structured model output into clean item lists.

pub mod parser;
pub mod prompts;
pub mod questions;
pub mod rubric;

pub use prompts::Difficulty;
pub use questions::{Question, QuestionBank};
pub use rubric::{Criterion, Rubric};
