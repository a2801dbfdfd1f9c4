use std::fmt;

/// A path-matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches exactly this path.
    Exact(String),
    /// Matches `prefix` followed by one path segment, which may be empty
    /// but never contains `/`.
    Segment { prefix: String, name: String },
}

/// Result of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The captured trailing segment, for segment patterns.
    pub param: Option<&'a str>,
}

impl Pattern {
    pub fn exact(path: impl Into<String>) -> Self {
        Pattern::Exact(path.into())
    }

    /// `Pattern::segment("/echo/", "value")` matches `/echo/<value>`.
    pub fn segment(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Pattern::Segment {
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    /// Matches the whole of `path` against this pattern.
    pub fn matches<'a>(&self, path: &'a str) -> Option<RouteMatch<'a>> {
        match self {
            Pattern::Exact(literal) => (literal == path).then_some(RouteMatch { param: None }),
            Pattern::Segment { prefix, .. } => path
                .strip_prefix(prefix.as_str())
                .filter(|rest| !rest.contains('/'))
                .map(|rest| RouteMatch { param: Some(rest) }),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Exact(literal) => f.write_str(literal),
            Pattern::Segment { prefix, name } => write!(f, "{prefix}<{name}>"),
        }
    }
}
