//! Segment matching logic.
//!
//! # Responsibilities
//! - Match a literal path segment (case-insensitive unless configured)
//! - Match the end of the path for index routes
//! - Pass through for the root and pathless layouts
//!
//! # Design Decisions
//! - Matchers report how many segments they consume, never allocate
//! - Empty condition = always matches, consumes nothing
//! - No regex, no parameters: every declared path is static

use super::route::Segment;

/// Condition a route places on the remaining path segments.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Number of leading segments consumed, or `None` if the route does not match.
    fn consume(&self, segments: &[&str]) -> Option<usize>;
}

/// Matches one literal segment.
#[derive(Debug, Clone)]
pub struct StaticMatcher {
    segment: String,
    case_sensitive: bool,
}

impl StaticMatcher {
    pub fn new(segment: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            segment: segment.into(),
            case_sensitive,
        }
    }
}

impl Matcher for StaticMatcher {
    fn consume(&self, segments: &[&str]) -> Option<usize> {
        let first = segments.first()?;
        let hit = if self.case_sensitive {
            *first == self.segment
        } else {
            first.eq_ignore_ascii_case(&self.segment)
        };
        hit.then_some(1)
    }
}

/// Matches only the end of the path.
#[derive(Debug, Clone, Copy)]
pub struct IndexMatcher;

impl Matcher for IndexMatcher {
    fn consume(&self, segments: &[&str]) -> Option<usize> {
        segments.is_empty().then_some(0)
    }
}

/// Always matches without consuming anything.
#[derive(Debug, Clone, Copy)]
pub struct PassThroughMatcher;

impl Matcher for PassThroughMatcher {
    fn consume(&self, _segments: &[&str]) -> Option<usize> {
        Some(0)
    }
}

/// Compile a declared segment into its matcher.
pub fn compile(segment: Segment, case_sensitive: bool) -> Box<dyn Matcher> {
    match segment {
        Segment::Root | Segment::Pathless => Box::new(PassThroughMatcher),
        Segment::Index => Box::new(IndexMatcher),
        Segment::Static(s) => Box::new(StaticMatcher::new(s, case_sensitive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_matcher() {
        let matcher = StaticMatcher::new("about", false);
        assert_eq!(matcher.consume(&["about"]), Some(1));
        assert_eq!(matcher.consume(&["About", "team"]), Some(1)); // Case insensitive
        assert_eq!(matcher.consume(&["profile"]), None);
        assert_eq!(matcher.consume(&[]), None);

        let strict = StaticMatcher::new("about", true);
        assert_eq!(strict.consume(&["About"]), None);
    }

    #[test]
    fn test_index_matcher() {
        assert_eq!(IndexMatcher.consume(&[]), Some(0));
        assert_eq!(IndexMatcher.consume(&["about"]), None);
    }

    #[test]
    fn test_pass_through_matcher() {
        assert_eq!(PassThroughMatcher.consume(&[]), Some(0));
        assert_eq!(PassThroughMatcher.consume(&["payment"]), Some(0));
    }
}
