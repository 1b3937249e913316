/// One element of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `a`, `[abc]`, `\w`. An empty set is `.` and matches any character.
    CharSet(Vec<char>),
    NegCharSet(Vec<char>),             // [^abc]
    Optional(Vec<Node>),               // ?
    Repeat(Vec<Node>),                 // *, and the tail of +
    Alternation(Vec<Node>, Vec<Node>), // |
    EndAnchor,                         // $
    Group(Vec<Node>),                  // (...)
}

impl Node {
    /// `.`
    pub fn any() -> Self {
        Node::CharSet(Vec::new())
    }

    pub fn literal(c: char) -> Self {
        Node::CharSet(vec![c])
    }
}
