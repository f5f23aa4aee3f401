use serde::{Deserialize, Serialize};

/// Filter for a `list` call: which packages and which of their versions to
/// include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Exact package name to match. `None` lists every package.
    #[serde(default)]
    pub name: Option<String>,
    /// Which versions of each matched package to include.
    #[serde(default)]
    pub version: VersionSelector,
}

/// How `list` selects versions within a package.
///
/// Modeled as a tagged variant so the three-way branch in the resolver is
/// exhaustive: requesting both an expression and "latest" at once is
/// unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSelector {
    /// Every directory name that parses as a semantic version.
    #[default]
    All,
    /// Only versions satisfying a version-range expression
    /// (e.g. `">=1.0.0"`, `"=2.0.0"`, or a bare version meaning exact match).
    Expression(String),
    /// The newest version: resolved through the package's `latest` sentinel
    /// file when one exists, by numeric maximum otherwise.
    Latest,
}

/// Exact lookup for a `get` call. Both fields are matched verbatim as path
/// segments; no range semantics apply here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetQuery {
    pub name: String,
    pub version: String,
}

impl ListQuery {
    /// Query scoped to one package by exact name.
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: VersionSelector::All,
        }
    }

    /// Replace the version selector.
    pub fn with_version(mut self, version: VersionSelector) -> Self {
        self.version = version;
        self
    }
}

impl GetQuery {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}
