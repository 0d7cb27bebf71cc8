//! Route pattern compilation.
//!
//! Patterns are slash-delimited templates. A segment starting with `:` is a named
//! parameter that captures one or more non-slash characters; the default capture can
//! be replaced by an inline group written straight after the name:
//!
//! ```text
//! /cats/:id            →  ^/cats/([^/]+)
//! /cats/:id([0-9]+)    →  ^/cats/([0-9]+)
//! ```
//!
//! Literal segments are copied verbatim and are *not* escaped, so a literal containing
//! regex metacharacters is interpreted as regex.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Marks a parameter segment.
pub const PARAM_MARKER: char = ':';

/// Capture used when a parameter carries no inline override.
pub const DEFAULT_PARAM_EXPR: &str = "([^/]+)";

/// A pattern compiled into a left-anchored regex plus its positional parameter names.
///
/// `param_names[i]` names capture group `i + 1` of `regex`.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub param_names: Vec<Arc<str>>,
}

impl CompiledPattern {
    /// The regex source the pattern was rewritten into.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Registration-time pattern failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The rewritten expression is not a valid regex.
    InvalidRegex {
        pattern: String,
        expression: String,
        reason: String,
    },
    /// A `:` segment with nothing before the override (`/:` or `/:([0-9]+)`).
    EmptyParamName { pattern: String, segment: String },
    /// An override added or removed capture groups, so captures no longer line up
    /// with parameter names.
    GroupCountMismatch {
        pattern: String,
        params: usize,
        groups: usize,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidRegex {
                pattern,
                expression,
                reason,
            } => write!(
                f,
                "route pattern '{pattern}' compiles to invalid expression '{expression}': {reason}"
            ),
            PatternError::EmptyParamName { pattern, segment } => write!(
                f,
                "route pattern '{pattern}' has parameter segment '{segment}' without a name"
            ),
            PatternError::GroupCountMismatch {
                pattern,
                params,
                groups,
            } => write!(
                f,
                "route pattern '{pattern}' declares {params} parameter(s) but its expression has {groups} capture group(s)"
            ),
        }
    }
}

impl std::error::Error for PatternError {}

/// Compile a route pattern.
///
/// # Errors
///
/// See [`PatternError`].
pub fn compile_pattern(pattern: &str) -> Result<CompiledPattern, PatternError> {
    let mut param_names: Vec<Arc<str>> = Vec::with_capacity(pattern.matches(PARAM_MARKER).count());
    let mut parts: Vec<&str> = Vec::new();

    for segment in pattern.split('/') {
        let Some(param) = segment.strip_prefix(PARAM_MARKER) else {
            parts.push(segment);
            continue;
        };
        let (name, expr) = match param.find('(') {
            Some(idx) => (&param[..idx], &param[idx..]),
            None => (param, DEFAULT_PARAM_EXPR),
        };
        if name.is_empty() {
            return Err(PatternError::EmptyParamName {
                pattern: pattern.to_string(),
                segment: segment.to_string(),
            });
        }
        param_names.push(Arc::from(name));
        parts.push(expr);
    }

    let mut expression = String::with_capacity(pattern.len() + param_names.len() * 8 + 1);
    expression.push('^');
    expression.push_str(&parts.join("/"));

    let regex = Regex::new(&expression).map_err(|e| PatternError::InvalidRegex {
        pattern: pattern.to_string(),
        expression: expression.clone(),
        reason: e.to_string(),
    })?;

    // captures_len counts the implicit whole-match group
    let groups = regex.captures_len() - 1;
    if groups != param_names.len() {
        return Err(PatternError::GroupCountMismatch {
            pattern: pattern.to_string(),
            params: param_names.len(),
            groups,
        });
    }

    Ok(CompiledPattern { regex, param_names })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let compiled = compile_pattern("/cats").unwrap();
        assert_eq!(compiled.as_str(), "^/cats");
        assert!(compiled.param_names.is_empty());
    }

    #[test]
    fn test_root_pattern() {
        let compiled = compile_pattern("/").unwrap();
        assert_eq!(compiled.as_str(), "^/");
        assert!(compiled.regex.is_match("/"));
    }

    #[test]
    fn test_default_param_expression() {
        let compiled = compile_pattern("/cats/:id").unwrap();
        assert_eq!(compiled.as_str(), "^/cats/([^/]+)");
        assert_eq!(compiled.param_names, vec![Arc::<str>::from("id")]);
    }

    #[test]
    fn test_override_truncates_name() {
        let compiled = compile_pattern("/cats/:id([0-9]+)").unwrap();
        assert_eq!(compiled.as_str(), "^/cats/([0-9]+)");
        assert_eq!(&*compiled.param_names[0], "id");
    }

    #[test]
    fn test_names_follow_segment_order() {
        let compiled = compile_pattern("/users/:user/posts/:post([a-z]+)/:rev").unwrap();
        let names: Vec<&str> = compiled.param_names.iter().map(|n| &**n).collect();
        assert_eq!(names, vec!["user", "post", "rev"]);
        assert_eq!(compiled.regex.captures_len(), 4);
    }

    #[test]
    fn test_literal_is_not_escaped() {
        let compiled = compile_pattern("/v1.0/items").unwrap();
        assert!(compiled.regex.is_match("/v1x0/items"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = compile_pattern("/cats/:id([0-9+)").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
        assert!(err.to_string().contains("/cats/:id([0-9+)"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = compile_pattern("/cats/:([0-9]+)").unwrap_err();
        assert_eq!(
            err,
            PatternError::EmptyParamName {
                pattern: "/cats/:([0-9]+)".into(),
                segment: ":([0-9]+)".into(),
            }
        );
    }

    #[test]
    fn test_extra_groups_in_override_are_rejected() {
        let err = compile_pattern("/files/:name(([a-z]+)\\.txt)").unwrap_err();
        assert_eq!(
            err,
            PatternError::GroupCountMismatch {
                pattern: "/files/:name(([a-z]+)\\.txt)".into(),
                params: 1,
                groups: 2,
            }
        );
    }

    #[test]
    fn test_non_capturing_override_is_rejected() {
        let err = compile_pattern("/cats/:id(?:[0-9]+)").unwrap_err();
        assert!(matches!(
            err,
            PatternError::GroupCountMismatch { params: 1, groups: 0, .. }
        ));
    }
}
