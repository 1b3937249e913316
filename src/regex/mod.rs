pub mod ast;
pub mod cache;
pub mod definitions;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod pattern;

pub use ast::Node;
pub use cache::PatternCache;
pub use definitions::{Definition, Definitions};
pub use error::CompileError;
pub use matcher::Extraction;
pub use parser::parse_regex;
pub use pattern::{ExtractFn, Pattern};
