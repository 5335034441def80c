mod questions;

pub use questions::{extract_questions, MAX_QUESTIONS};
