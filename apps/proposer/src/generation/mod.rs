pub mod content;
pub mod generator;
pub mod prompts;

pub use content::GeneratedContent;
pub use generator::{build_prompts, generate_content};
