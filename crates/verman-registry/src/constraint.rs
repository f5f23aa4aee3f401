//! Version-range constraint parsing and matching.
//!
//! Constraints use the semver operator grammar (`=`, `>`, `>=`, `<`, `<=`,
//! `^`, `~`, comma-separated conjunctions) with one adjustment: a bare
//! version string means exact match, where `semver::VersionReq` alone would
//! give it caret semantics.

use std::fmt;

use semver::{Comparator, Op, Version, VersionReq};
use verman_util::errors::{VermanError, VermanResult};

/// A parsed version-range constraint.
#[derive(Debug, Clone)]
pub struct Constraint {
    expression: String,
    req: VersionReq,
}

impl Constraint {
    /// Parse an expression. The input is used verbatim; nothing is trimmed,
    /// so a sentinel file with a trailing newline fails to parse.
    pub fn parse(expression: &str) -> VermanResult<Self> {
        if let Ok(version) = Version::parse(expression) {
            return Ok(Self {
                expression: expression.to_string(),
                req: exact(&version),
            });
        }
        let req = VersionReq::parse(expression).map_err(|e| VermanError::InvalidConstraint {
            expression: expression.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            expression: expression.to_string(),
            req,
        })
    }

    /// Whether `version` satisfies this constraint.
    pub fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// The original expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

fn exact(version: &Version) -> VersionReq {
    VersionReq {
        comparators: vec![Comparator {
            op: Op::Exact,
            major: version.major,
            minor: Some(version.minor),
            patch: Some(version.patch),
            pre: version.pre.clone(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[test]
    fn bare_version_is_exact() {
        let c = Constraint::parse("1.0.0").unwrap();
        assert!(c.matches(&v("1.0.0")));
        assert!(!c.matches(&v("1.0.1")));
        assert!(!c.matches(&v("1.1.0")));
    }

    #[test]
    fn explicit_equals() {
        let c = Constraint::parse("=2.0.0").unwrap();
        assert!(c.matches(&v("2.0.0")));
        assert!(!c.matches(&v("2.0.1")));
    }

    #[test]
    fn lower_bound() {
        let c = Constraint::parse(">=1.0.0").unwrap();
        assert!(c.matches(&v("1.0.0")));
        assert!(c.matches(&v("2.5.0")));
        assert!(!c.matches(&v("0.9.9")));
    }

    #[test]
    fn conjunction() {
        let c = Constraint::parse(">=1.0.0, <2.0.0").unwrap();
        assert!(c.matches(&v("1.0.0")));
        assert!(c.matches(&v("1.9.9")));
        assert!(!c.matches(&v("2.0.0")));
    }

    #[test]
    fn caret_and_tilde() {
        let caret = Constraint::parse("^1.2.0").unwrap();
        assert!(caret.matches(&v("1.9.0")));
        assert!(!caret.matches(&v("2.0.0")));

        let tilde = Constraint::parse("~1.2.3").unwrap();
        assert!(tilde.matches(&v("1.2.9")));
        assert!(!tilde.matches(&v("1.3.0")));
    }

    #[test]
    fn bare_prerelease_is_exact() {
        let c = Constraint::parse("1.0.0-rc.1").unwrap();
        assert!(c.matches(&v("1.0.0-rc.1")));
        assert!(!c.matches(&v("1.0.0")));
    }

    #[test]
    fn unparsable_expression() {
        let err = Constraint::parse(">=banana").unwrap_err();
        assert!(matches!(err, VermanError::InvalidConstraint { .. }));
    }

    #[test]
    fn trailing_newline_is_unparsable() {
        // sentinel contents are used verbatim
        let err = Constraint::parse("1.0.0\n").unwrap_err();
        assert!(matches!(err, VermanError::InvalidConstraint { .. }));
    }

    #[test]
    fn display_preserves_expression() {
        let c = Constraint::parse(">=1.0.0, <2.0.0").unwrap();
        assert_eq!(c.to_string(), ">=1.0.0, <2.0.0");
        assert_eq!(c.expression(), ">=1.0.0, <2.0.0");
    }
}
