use crate::regex::ast::Node;
use crate::regex::error::CompileError;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

const WHITESPACE: [char; 2] = [' ', '\t'];
const NEWLINE: [char; 2] = ['\n', '\r'];
const TAB: [char; 1] = ['\t'];

// Characters `\x` turns back into literals.
const META: &str = ".*+?|()[]\\";
const BRACKET_META: &str = ".*+?|()[]\\^";

/// Parses pattern text into its node sequence.
///
/// Everything must be consumed: a `)` without an opening `(` is reported as
/// trailing input.
pub fn parse_regex(pattern: &str) -> Result<Vec<Node>, CompileError> {
    let mut parser = Parser {
        chars: pattern.chars().collect(),
        pos: 0,
    };
    let nodes = parser.parse_sequence()?;
    match parser.peek() {
        None => Ok(nodes),
        Some(found) => Err(CompileError::TrailingInput {
            found,
            offset: parser.pos,
        }),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Parses up to the end of the text or an unconsumed `)`.
    fn parse_sequence(&mut self) -> Result<Vec<Node>, CompileError> {
        let mut nodes = Vec::new();

        while let Some(c) = self.peek() {
            if c == ')' {
                break;
            }
            let offset = self.pos;
            self.pos += 1;

            match c {
                '(' => {
                    let inner = self.parse_sequence()?;
                    if self.bump() != Some(')') {
                        return Err(CompileError::UnterminatedGroup { offset });
                    }
                    nodes.push(Node::Group(inner));
                }
                '[' => nodes.push(self.parse_bracket(offset)?),
                ']' => return Err(CompileError::StrayBracket { offset }),
                '|' => {
                    // Lowest precedence: everything so far is the left branch,
                    // the rest of this level is the right one.
                    let left = std::mem::take(&mut nodes);
                    let right = self.parse_sequence()?;
                    nodes.push(Node::Alternation(left, right));
                }
                '?' | '*' | '+' => {
                    let Some(prev) = nodes.pop() else {
                        return Err(CompileError::DanglingQuantifier {
                            quantifier: c,
                            offset,
                        });
                    };
                    match c {
                        '?' => nodes.push(Node::Optional(vec![prev])),
                        '*' => nodes.push(Node::Repeat(vec![prev])),
                        _ => {
                            nodes.push(prev.clone());
                            nodes.push(Node::Repeat(vec![prev]));
                        }
                    }
                }
                '$' => {
                    if self.peek().is_some() {
                        return Err(CompileError::MisplacedAnchor { offset });
                    }
                    nodes.push(Node::EndAnchor);
                }
                '.' => nodes.push(Node::any()),
                '\\' => nodes.push(Node::CharSet(self.parse_escape(offset, META)?)),
                _ => nodes.push(Node::literal(c)),
            }
        }
        Ok(nodes)
    }

    /// Parses the body of `[...]` or `[^...]`; the opening `[` is already consumed.
    fn parse_bracket(&mut self, offset: usize) -> Result<Node, CompileError> {
        let negated = self.peek() == Some('^');
        if negated {
            self.pos += 1;
        }

        let mut members = Vec::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(CompileError::UnterminatedBracket { offset });
            };
            if let Some(range) = self.range_here() {
                extend_unique(&mut members, range);
                self.pos += 3;
                continue;
            }
            let escape_offset = self.pos;
            self.pos += 1;

            match c {
                ']' => break,
                '\\' => {
                    let set = match self.parse_escape(escape_offset, BRACKET_META) {
                        Err(CompileError::DanglingEscape { .. }) => {
                            return Err(CompileError::UnterminatedBracket { offset });
                        }
                        other => other?,
                    };
                    extend_unique(&mut members, set);
                }
                _ => extend_unique(&mut members, [c]),
            }
        }

        match (negated, members.is_empty()) {
            // An empty positive set would read as `.`
            (false, true) => Err(CompileError::EmptyBracket { offset }),
            (false, false) => Ok(Node::CharSet(members)),
            (true, _) => Ok(Node::NegCharSet(members)),
        }
    }

    /// Expands `a-z` style ranges at the cursor. Both ends must come from the
    /// same alphabet and be in ascending order, otherwise the characters are
    /// taken literally.
    fn range_here(&self) -> Option<Vec<char>> {
        let (start, dash, end) = (self.peek()?, self.peek_at(1)?, self.peek_at(2)?);
        if dash != '-' {
            return None;
        }
        [LOWERCASE, UPPERCASE, DIGITS]
            .into_iter()
            .find_map(|alphabet| {
                let from = alphabet.find(start)?;
                let to = alphabet.find(end)?;
                (from < to).then(|| alphabet[from..=to].chars().collect())
            })
    }

    /// Parses the character after a `\`; `offset` points at the backslash.
    fn parse_escape(&mut self, offset: usize, literals: &str) -> Result<Vec<char>, CompileError> {
        let escape = self
            .bump()
            .ok_or(CompileError::DanglingEscape { offset })?;
        match escape {
            'w' => Ok(WHITESPACE.to_vec()),
            'n' => Ok(NEWLINE.to_vec()),
            't' => Ok(TAB.to_vec()),
            c if literals.contains(c) => Ok(vec![c]),
            _ => Err(CompileError::UnknownEscape { escape, offset }),
        }
    }
}

fn extend_unique(members: &mut Vec<char>, chars: impl IntoIterator<Item = char>) {
    for c in chars {
        if !members.contains(&c) {
            members.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(c: char) -> Node {
        Node::literal(c)
    }

    fn set(s: &str) -> Node {
        Node::CharSet(s.chars().collect())
    }

    fn parse_err(pattern: &str) -> CompileError {
        parse_regex(pattern).expect_err("parse should fail")
    }

    #[test]
    fn parses_literals_and_wildcard() {
        assert_eq!(
            parse_regex("a.c").unwrap(),
            vec![lit('a'), Node::any(), lit('c')]
        );
        assert_eq!(parse_regex("").unwrap(), vec![]);
    }

    #[test]
    fn parses_escapes() {
        assert_eq!(
            parse_regex(r"\.\w\n\t\\").unwrap(),
            vec![lit('.'), set(" \t"), set("\n\r"), set("\t"), lit('\\')]
        );
        assert_eq!(
            parse_err(r"a\d"),
            CompileError::UnknownEscape { escape: 'd', offset: 1 }
        );
        assert_eq!(parse_err(r"ab\"), CompileError::DanglingEscape { offset: 2 });
    }

    #[test]
    fn parses_bracket_ranges() {
        assert_eq!(
            parse_regex("[a-cX-Z0-2_]").unwrap(),
            vec![set("abcXYZ012_")]
        );
        // Mixed alphabets and descending ranges are literal.
        assert_eq!(parse_regex("[a-Z]").unwrap(), vec![set("a-Z")]);
        assert_eq!(parse_regex("[z-a]").unwrap(), vec![set("z-a")]);
        assert_eq!(parse_regex("[a-]").unwrap(), vec![set("a-")]);
    }

    #[test]
    fn parses_negated_brackets_and_bracket_escapes() {
        assert_eq!(
            parse_regex(r"[^\]\^x]").unwrap(),
            vec![Node::NegCharSet(vec![']', '^', 'x'])]
        );
        assert_eq!(parse_regex(r"[\w]").unwrap(), vec![set(" \t")]);
        assert_eq!(parse_regex("[^]").unwrap(), vec![Node::NegCharSet(vec![])]);
        assert_eq!(parse_regex("[aa]").unwrap(), vec![set("a")]);
    }

    #[test]
    fn rejects_broken_brackets() {
        assert_eq!(parse_err("[a-z"), CompileError::UnterminatedBracket { offset: 0 });
        assert_eq!(parse_err(r"x[a\"), CompileError::UnterminatedBracket { offset: 1 });
        assert_eq!(
            parse_err(r"[\q]"),
            CompileError::UnknownEscape { escape: 'q', offset: 1 }
        );
        assert_eq!(parse_err("a]"), CompileError::StrayBracket { offset: 1 });
        assert_eq!(parse_err("[]"), CompileError::EmptyBracket { offset: 0 });
    }

    #[test]
    fn quantifiers_wrap_previous_node() {
        assert_eq!(
            parse_regex("ab?c*").unwrap(),
            vec![
                lit('a'),
                Node::Optional(vec![lit('b')]),
                Node::Repeat(vec![lit('c')]),
            ]
        );
    }

    #[test]
    fn plus_duplicates_then_repeats() {
        assert_eq!(
            parse_regex("a+").unwrap(),
            vec![lit('a'), Node::Repeat(vec![lit('a')])]
        );
        assert_eq!(
            parse_regex("(ab)+").unwrap(),
            vec![
                Node::Group(vec![lit('a'), lit('b')]),
                Node::Repeat(vec![Node::Group(vec![lit('a'), lit('b')])]),
            ]
        );
    }

    #[test]
    fn dangling_quantifiers_fail() {
        assert_eq!(
            parse_err("*a"),
            CompileError::DanglingQuantifier { quantifier: '*', offset: 0 }
        );
        assert_eq!(
            parse_err("a|?"),
            CompileError::DanglingQuantifier { quantifier: '?', offset: 2 }
        );
    }

    #[test]
    fn alternation_splits_whole_sequence() {
        assert_eq!(
            parse_regex("ab|cd").unwrap(),
            vec![Node::Alternation(
                vec![lit('a'), lit('b')],
                vec![lit('c'), lit('d')]
            )]
        );
    }

    #[test]
    fn alternation_nests_to_the_right() {
        assert_eq!(
            parse_regex("a|b|c").unwrap(),
            vec![Node::Alternation(
                vec![lit('a')],
                vec![Node::Alternation(vec![lit('b')], vec![lit('c')])]
            )]
        );
    }

    #[test]
    fn alternation_stops_at_group_end() {
        assert_eq!(
            parse_regex("x(a|b)y").unwrap(),
            vec![
                lit('x'),
                Node::Group(vec![Node::Alternation(vec![lit('a')], vec![lit('b')])]),
                lit('y'),
            ]
        );
    }

    #[test]
    fn groups_must_balance() {
        assert_eq!(parse_err("a(bc"), CompileError::UnterminatedGroup { offset: 1 });
        assert_eq!(
            parse_err("ab)c"),
            CompileError::TrailingInput { found: ')', offset: 2 }
        );
        assert_eq!(
            parse_err("a|b)"),
            CompileError::TrailingInput { found: ')', offset: 3 }
        );
    }

    #[test]
    fn end_anchor_only_at_the_very_end() {
        assert_eq!(parse_regex("ab$").unwrap(), vec![lit('a'), lit('b'), Node::EndAnchor]);
        assert_eq!(parse_err("a$b"), CompileError::MisplacedAnchor { offset: 1 });
        assert_eq!(parse_err("(a$)"), CompileError::MisplacedAnchor { offset: 2 });
    }
}
