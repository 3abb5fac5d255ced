pub mod gemini;
pub mod offline;

mod prompts;
