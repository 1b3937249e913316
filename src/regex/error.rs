use thiserror::Error;

/// Reasons a pattern fails to compile. Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unterminated bracket expression starting at {offset}")]
    UnterminatedBracket { offset: usize },
    #[error("unterminated group starting at {offset}")]
    UnterminatedGroup { offset: usize },
    #[error("unknown escape `\\{escape}` at {offset}")]
    UnknownEscape { escape: char, offset: usize },
    #[error("`$` at {offset} is not the final character of the pattern")]
    MisplacedAnchor { offset: usize },
    #[error("unexpected `{found}` at {offset}")]
    TrailingInput { found: char, offset: usize },
    #[error("unmatched `]` at {offset}")]
    StrayBracket { offset: usize },
    #[error("empty bracket expression at {offset}")]
    EmptyBracket { offset: usize },
    #[error("`{quantifier}` at {offset} has nothing to repeat")]
    DanglingQuantifier { quantifier: char, offset: usize },
    #[error("pattern ends with a lone `\\`")]
    DanglingEscape { offset: usize },
}

impl CompileError {
    pub fn offset(&self) -> usize {
        match *self {
            CompileError::UnterminatedBracket { offset }
            | CompileError::UnterminatedGroup { offset }
            | CompileError::UnknownEscape { offset, .. }
            | CompileError::MisplacedAnchor { offset }
            | CompileError::TrailingInput { offset, .. }
            | CompileError::StrayBracket { offset }
            | CompileError::EmptyBracket { offset }
            | CompileError::DanglingQuantifier { offset, .. }
            | CompileError::DanglingEscape { offset } => offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = CompileError::UnknownEscape { escape: 'q', offset: 3 };
        assert_eq!(err.to_string(), "unknown escape `\\q` at 3");
        assert_eq!(err.offset(), 3);

        let err = CompileError::DanglingQuantifier { quantifier: '*', offset: 0 };
        assert_eq!(err.to_string(), "`*` at 0 has nothing to repeat");
    }
}
