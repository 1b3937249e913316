use tracing::{trace, warn};

use crate::regex::ast::Node;
use crate::regex::definitions::{Definition, Definitions};
use crate::regex::pattern::Pattern;

/// One entry of an extraction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Text consumed by a group.
    Text(String),
    /// Result of a checkable named `name`, with its own extraction list.
    Sub { name: char, items: Vec<Extraction> },
}

impl Extraction {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Extraction::Text(text) => Some(text.as_str()),
            Extraction::Sub { .. } => None,
        }
    }
}

struct MatchCtx<'d> {
    definitions: &'d Definitions,
    depth: usize,
    max_depth: usize,
}

/// Matches the pattern against the start of `text`, returning the number of
/// bytes consumed and the raw extraction list.
pub(crate) fn match_nodes(pattern: &Pattern, text: &str) -> Option<(usize, Vec<Extraction>)> {
    MatchCtx {
        definitions: pattern.definitions(),
        depth: 0,
        max_depth: pattern.max_depth(),
    }
    .match_sequence(pattern.nodes(), text)
}

impl MatchCtx<'_> {
    // A failing node fails the whole sequence; earlier nodes are never revisited.
    fn match_sequence(&self, nodes: &[Node], text: &str) -> Option<(usize, Vec<Extraction>)> {
        let mut rest = text;
        let mut extracted = Vec::new();
        for node in nodes {
            let used = self.match_node(node, rest, &mut extracted)?;
            rest = &rest[used..];
        }
        Some((text.len() - rest.len(), extracted))
    }

    fn match_node(
        &self,
        node: &Node,
        text: &str,
        extracted: &mut Vec<Extraction>,
    ) -> Option<usize> {
        match node {
            Node::CharSet(members) => self.match_set(members, text, extracted),
            Node::NegCharSet(members) => self.match_negated_set(members, text),
            Node::Optional(inner) => match self.match_sequence(inner, text) {
                Some((used, items)) => {
                    extracted.extend(items);
                    Some(used)
                }
                None => Some(0),
            },
            Node::Repeat(inner) => {
                // Greedy, and what is taken is never given back.
                let mut total = 0;
                while let Some((used, items)) = self.match_sequence(inner, &text[total..]) {
                    if used == 0 {
                        break;
                    }
                    extracted.extend(items);
                    total += used;
                }
                Some(total)
            }
            Node::Alternation(left, right) => {
                let (used, items) = self
                    .match_sequence(left, text)
                    .or_else(|| self.match_sequence(right, text))?;
                extracted.extend(items);
                Some(used)
            }
            Node::EndAnchor => text.is_empty().then_some(0),
            Node::Group(inner) => {
                let (used, items) = self.match_sequence(inner, text)?;
                extracted.push(Extraction::Text(text[..used].to_string()));
                extracted.extend(items);
                Some(used)
            }
        }
    }

    /// First member that matches wins. An empty set matches any character.
    fn match_set(
        &self,
        members: &[char],
        text: &str,
        extracted: &mut Vec<Extraction>,
    ) -> Option<usize> {
        let c = text.chars().next()?;
        if members.is_empty() {
            return Some(c.len_utf8());
        }

        for &member in members {
            match self.definitions.get(member) {
                None if c == member => return Some(c.len_utf8()),
                Some(Definition::Literal(alias)) if c == alias => return Some(c.len_utf8()),
                Some(Definition::Checkable(pattern)) => {
                    if let Some((used, items)) = self.run_checkable(&pattern, member, text) {
                        extracted.push(Extraction::Sub { name: member, items });
                        return Some(used);
                    }
                }
                _ => {}
            }
        }
        trace!(?c, ?members, "no set member matched");
        None
    }

    /// Consumes one character unless it equals a member (or a member's
    /// literal alias), or a member's checkable matches here.
    fn match_negated_set(&self, members: &[char], text: &str) -> Option<usize> {
        let c = text.chars().next()?;
        for &member in members {
            let excluded = match self.definitions.get(member) {
                None => c == member,
                Some(Definition::Literal(alias)) => c == alias,
                Some(Definition::Checkable(pattern)) => {
                    self.run_checkable(&pattern, member, text).is_some()
                }
            };
            if excluded {
                trace!(?c, member = ?member, "excluded by negated set");
                return None;
            }
        }
        Some(c.len_utf8())
    }

    fn run_checkable(
        &self,
        pattern: &Pattern,
        name: char,
        text: &str,
    ) -> Option<(usize, Vec<Extraction>)> {
        if self.depth >= self.max_depth {
            warn!(
                name = ?name,
                max_depth = self.max_depth,
                "checkable nesting limit reached; treating as no match"
            );
            return None;
        }
        MatchCtx {
            definitions: pattern.definitions(),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
        .match_sequence(pattern.nodes(), text)
    }
}
