//! System prompts and user messages sent to the generation service

use super::types::Perspective;

const QUESTION_GENERATOR_PROMPT: &str = include_str!("../../prompts/question_generator.md");
const SCIENTIFIC_PROMPT: &str = include_str!("../../prompts/scientific.md");
const PHILOSOPHICAL_PROMPT: &str = include_str!("../../prompts/philosophical.md");
const MATHEMATICAL_PROMPT: &str = include_str!("../../prompts/mathematical.md");

/// System prompts resolved once per process, with the optional language directive applied
#[derive(Debug, Clone)]
pub struct PromptSet {
    question_generator: String,
    perspectives: [String; 3],
}

impl PromptSet {
    pub fn new(language: Option<&str>) -> Self {
        let apply = |base: &str| match language {
            Some(lang) if !lang.trim().is_empty() => format!(
                "{}\nRESPOND IN {} LANGUAGE.\n",
                base.trim_end(),
                lang.trim().to_uppercase()
            ),
            _ => base.to_string(),
        };

        Self {
            question_generator: apply(QUESTION_GENERATOR_PROMPT),
            perspectives: [
                apply(SCIENTIFIC_PROMPT),
                apply(PHILOSOPHICAL_PROMPT),
                apply(MATHEMATICAL_PROMPT),
            ],
        }
    }

    pub fn question_generator(&self) -> &str {
        &self.question_generator
    }

    pub fn perspective(&self, perspective: Perspective) -> &str {
        &self.perspectives[perspective.index()]
    }
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::new(None)
    }
}

pub fn question_request(topic: &str) -> String {
    format!("Generate 3 research questions about: {}", topic)
}

/// Re-ask used once when the first generation yields fewer than three questions
pub fn strict_question_request(topic: &str) -> String {
    format!(
        "Generate exactly 3 research questions about: {}. \
        Format them as: 'QUESTION 1: [question]', 'QUESTION 2: [question]', 'QUESTION 3: [question]'.",
        topic
    )
}

pub fn placeholder_question(topic: &str) -> String {
    format!("Additional research direction for {}", topic)
}

pub fn research_request(question: &str) -> String {
    format!("Research question: {}", question)
}
