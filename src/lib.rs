//! A small pattern matcher with a linear runtime.
//!
//! Patterns support a subset of the usual regular expression syntax and
//! always match a prefix of the input in one left-to-right pass. Repetition
//! is greedy and never gives input back; only the two branches of `|` are
//! ever tried at the same position.
//!
//! | Syntax      | Meaning                                         |
//! |-------------|-------------------------------------------------|
//! | `c`         | The character `c`                               |
//! | `.`         | Any one character                               |
//! | `[a-z_]`    | One character from the set                      |
//! | `[^abc]`    | One character not in the set                    |
//! | `\w` `\n` `\t` | Space or tab, newline or carriage return, tab |
//! | `(...)`     | Group; the text it matched is extracted         |
//! | `X?` `X*` `X+` | Zero or one, zero or more, one or more       |
//! | `A\|B`      | `A`, or else `B`; splits the whole enclosing sequence |
//! | `$`         | End of input; only valid as the last character  |
//!
//! A single-character name used as a set member can be bound with
//! [`Pattern::define`], either to another character or to a nested pattern
//! (a checkable) that is asked to match the remaining input itself:
//!
//! ```
//! let pair = remx::compile("[k]=[v]").unwrap();
//! pair.define('k', remx::compile("[a-z]+").unwrap());
//! pair.define('v', remx::compile("([0-9]+)").unwrap());
//!
//! let (prefix, items) = pair.extract("port=8080;");
//! assert_eq!(prefix, Some("port=8080"));
//! assert_eq!(items.len(), 2);
//! ```

pub mod config;
pub mod regex;

pub use config::Config;
pub use regex::{
    CompileError, Definition, Definitions, ExtractFn, Extraction, Node, Pattern, PatternCache,
};

/// Compiles `pattern` through the process-wide cache.
pub fn try_compile(pattern: &str) -> Result<Pattern, CompileError> {
    PatternCache::global().try_compile(pattern)
}

/// Compiles `pattern`, returning `None` if it is malformed.
pub fn compile(pattern: &str) -> Option<Pattern> {
    PatternCache::global().compile(pattern)
}

/// Compiles `pattern` and installs `extract_fn` on the result.
pub fn compile_with<F>(pattern: &str, extract_fn: F) -> Option<Pattern>
where
    F: Fn(Vec<Extraction>, &str) -> Vec<Extraction> + Send + Sync + 'static,
{
    let compiled = compile(pattern)?;
    compiled.set_extract_fn(extract_fn);
    Some(compiled)
}

/// Returns the prefix of `input` matched by `pattern`. A malformed pattern
/// matches nothing.
pub fn match_prefix<'a>(pattern: &str, input: &'a str) -> Option<&'a str> {
    compile(pattern)?.match_prefix(input)
}

pub fn is_match(pattern: &str, input: &str) -> bool {
    match_prefix(pattern, input).is_some()
}

/// Returns the matched prefix and extraction list for `pattern` against `input`.
pub fn extract<'a>(pattern: &str, input: &'a str) -> (Option<&'a str>, Vec<Extraction>) {
    match compile(pattern) {
        Some(compiled) => compiled.extract(input),
        None => (None, Vec::new()),
    }
}
