//! YAML frontmatter handling for template files.

pub mod parser;
pub mod types;

pub use parser::parse_template;
pub use types::{ParsedTemplate, TemplateFrontmatter};
