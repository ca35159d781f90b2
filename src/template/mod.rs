//! Template text handling: placeholder detection, kind/hint heuristics,
//! preview rendering, and export substitution.

pub mod hints;
pub mod keys;
pub mod parser;
pub mod render;

pub use parser::{parse_template, ParsedTemplate};
