//! Predicates for matching input events and accumulated buffers.
//!
//! A rule selects itself by testing its predicate against the incoming
//! symbol (event rules) or against the text accumulated by a buffering
//! state (buffer rules). All predicate kinds are pure: matching has no
//! side effects and is deterministic for a given input.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A matching condition over a string-like value.
///
/// The same enum serves both event rules (`Predicate<T>` over the input
/// symbol type) and buffer rules (`Predicate<String>` over accumulated
/// text). Negation is expressed by wrapping any predicate in [`Predicate::Not`].
///
/// # Example
///
/// ```rust
/// use lexion::core::Predicate;
///
/// let digit = Predicate::regex("^[0-9]$").unwrap();
/// assert!(digit.matches(&"7".to_string()));
/// assert!(!digit.matches(&"x".to_string()));
///
/// let not_brace = Predicate::literal("{".to_string()).negate();
/// assert!(not_brace.matches(&"a".to_string()));
/// assert!(!not_brace.matches(&"{".to_string()));
/// ```
#[derive(Clone)]
pub enum Predicate<T> {
    /// Matches any value.
    Always,
    /// Matches a single literal value by equality.
    Literal(T),
    /// Matches any value in a fixed set of literals.
    OneOf(Vec<T>),
    /// Matches when the compiled pattern finds a match in the value's text.
    Matches(Regex),
    /// Caller-supplied boolean function.
    Test(Arc<dyn Fn(&T) -> bool + Send + Sync>),
    /// Inverts the wrapped predicate.
    Not(Box<Predicate<T>>),
}

impl<T> Predicate<T> {
    /// A predicate that matches every value.
    pub fn always() -> Self {
        Self::Always
    }

    /// Exact-equality predicate.
    pub fn literal(value: T) -> Self {
        Self::Literal(value)
    }

    /// Set-membership predicate.
    pub fn one_of<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::OneOf(values.into_iter().collect())
    }

    /// Regular-expression predicate. Fails if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Matches(Regex::new(pattern)?))
    }

    /// Predicate from a caller-supplied function.
    ///
    /// The function must be deterministic for a given input, since the
    /// engine may test the same value more than once per event.
    pub fn test<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Test(Arc::new(f))
    }

    /// Invert this predicate.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Test the predicate against a value.
    pub fn matches(&self, value: &T) -> bool
    where
        T: PartialEq + AsRef<str>,
    {
        match self {
            Self::Always => true,
            Self::Literal(literal) => literal == value,
            Self::OneOf(set) => set.contains(value),
            Self::Matches(pattern) => pattern.is_match(value.as_ref()),
            Self::Test(f) => f(value),
            Self::Not(inner) => !inner.matches(value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::OneOf(set) => f.debug_tuple("OneOf").field(set).finish(),
            Self::Matches(pattern) => f.debug_tuple("Matches").field(&pattern.as_str()).finish(),
            Self::Test(_) => f.write_str("Test(..)"),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn always_matches_anything() {
        let p: Predicate<String> = Predicate::always();
        assert!(p.matches(&s("")));
        assert!(p.matches(&s("x")));
        assert!(p.matches(&s("many chars")));
    }

    #[test]
    fn literal_matches_by_equality() {
        let p = Predicate::literal(s("{"));
        assert!(p.matches(&s("{")));
        assert!(!p.matches(&s("}")));
    }

    #[test]
    fn one_of_matches_set_members() {
        let p = Predicate::one_of(["if", "else", "while"].map(s));
        assert!(p.matches(&s("if")));
        assert!(p.matches(&s("while")));
        assert!(!p.matches(&s("ifx")));
    }

    #[test]
    fn regex_matches_value_text() {
        let p: Predicate<String> = Predicate::regex("^[a-zA-Z_]$").unwrap();
        assert!(p.matches(&s("a")));
        assert!(p.matches(&s("_")));
        assert!(!p.matches(&s("9")));
    }

    #[test]
    fn regex_rejects_bad_pattern() {
        assert!(Predicate::<String>::regex("[unclosed").is_err());
    }

    #[test]
    fn test_predicate_runs_function() {
        let p = Predicate::test(|value: &String| value.len() > 2);
        assert!(p.matches(&s("abc")));
        assert!(!p.matches(&s("ab")));
    }

    #[test]
    fn negate_inverts_result() {
        let p = Predicate::one_of(["a", "b"].map(s)).negate();
        assert!(!p.matches(&s("a")));
        assert!(p.matches(&s("c")));
    }

    #[test]
    fn double_negation_restores_result() {
        let p = Predicate::literal(s("x")).negate().negate();
        assert!(p.matches(&s("x")));
        assert!(!p.matches(&s("y")));
    }

    #[test]
    fn matching_is_deterministic() {
        let p: Predicate<String> = Predicate::regex("^[0-9]$").unwrap();
        let value = s("5");
        assert_eq!(p.matches(&value), p.matches(&value));
    }
}
