pub mod api;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod sections;
