//! Prompt templates for question, rubric, and follow-up generation

use std::fmt;

const BASE_INSTRUCTIONS: &str = "You are an assistant helping an educator prepare an oral examination. \
Respond with plain text only: one item per line, no numbering, no bullets, \
no markdown, no introduction or closing remarks.";

/// Build the system prompt, folding in an optional persona
///
/// The persona adjusts the bot's register (e.g. "a strict external
/// examiner", "a friendly lab supervisor") without changing the output
/// format rules.
pub fn system_prompt(persona: &str) -> String {
    let persona = persona.trim();
    if persona.is_empty() {
        BASE_INSTRUCTIONS.to_string()
    } else {
        format!(
            "{} Adopt the following persona when phrasing your output: {}.",
            BASE_INSTRUCTIONS, persona
        )
    }
}

/// Difficulty level for generated questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the prompt for generating exam questions
pub fn question_prompt(topic: &str, count: usize, difficulty: Difficulty) -> String {
    format!(
        "Write {count} open-ended oral exam questions at {level} level on the \
         following topic. Each question should be answerable in a short spoken \
         response and test understanding rather than recall.\n\nTopic: {topic}",
        count = count,
        level = difficulty.as_str(),
        topic = topic.trim(),
    )
}

/// Build the prompt for generating an evaluation rubric
pub fn rubric_prompt(topic: &str, questions: &[String]) -> String {
    let mut prompt = format!(
        "Write a grading rubric for an oral exam on the topic below. Produce \
         8 to 12 binary criteria, each phrased so it can be answered yes or no \
         while listening to a student (e.g. \"Defines the key term correctly\"). \
         Cover the content of the listed questions.\n\nTopic: {}\n\nQuestions:\n",
        topic.trim()
    );
    for q in questions {
        prompt.push_str(q);
        prompt.push('\n');
    }
    prompt
}

/// Build the prompt for follow-up questions probing a student's answer
pub fn follow_up_prompt(topic: &str, transcript: &str, questions: &[String]) -> String {
    let mut prompt = format!(
        "A student taking an oral exam on the topic below gave the spoken \
         answer transcribed underneath. Write 3 follow-up questions that \
         probe deeper understanding of what the student said, targeting any \
         gaps or claims worth pressing on.\n\nTopic: {}\n\nStudent's answer:\n{}\n",
        topic.trim(),
        transcript.trim()
    );
    if !questions.is_empty() {
        prompt.push_str("\nDo not repeat these questions already asked:\n");
        for q in questions {
            prompt.push_str(q);
            prompt.push('\n');
        }
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_includes_parameters() {
        let prompt = question_prompt("  the French Revolution ", 5, Difficulty::Advanced);
        assert!(prompt.contains("5 open-ended"));
        assert!(prompt.contains("advanced level"));
        assert!(prompt.contains("Topic: the French Revolution"));
    }

    #[test]
    fn test_rubric_prompt_lists_questions() {
        let questions = vec!["What caused it?".to_string(), "Who led it?".to_string()];
        let prompt = rubric_prompt("history", &questions);
        assert!(prompt.contains("What caused it?"));
        assert!(prompt.contains("Who led it?"));
        assert!(prompt.contains("yes or no"));
    }

    #[test]
    fn test_system_prompt_folds_in_persona() {
        let base = system_prompt("");
        assert!(base.contains("one item per line"));
        assert!(!base.contains("persona"));

        let styled = system_prompt("  a strict external examiner ");
        assert!(styled.starts_with(&base));
        assert!(styled.contains("a strict external examiner"));
    }

    #[test]
    fn test_follow_up_prompt_includes_answer_and_prior_questions() {
        let questions = vec!["What is osmosis?".to_string()];
        let prompt = follow_up_prompt("cell biology", "Water moves across membranes.", &questions);
        assert!(prompt.contains("Topic: cell biology"));
        assert!(prompt.contains("Water moves across membranes."));
        assert!(prompt.contains("What is osmosis?"));

        let bare = follow_up_prompt("cell biology", "An answer.", &[]);
        assert!(!bare.contains("already asked"));
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::Beginner.as_str(), "beginner");
        assert_eq!(Difficulty::default(), Difficulty::Intermediate);
        assert_eq!(Difficulty::ALL.len(), 3);
    }
}
