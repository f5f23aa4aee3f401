use serde::{Deserialize, Serialize};
use url::Url;

/// A package discovered in the repository, with the versions that survived
/// the query's filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// One version of a package.
///
/// `number` preserves the original directory-name text, not a normalized
/// re-serialization of the parsed version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub number: String,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// A file available under a package version, addressable at `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub location: Url,
}

impl Package {
    /// A package with no versions attached yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: Vec::new(),
        }
    }
}

impl Version {
    /// A version with no files attached. `list` results never carry files.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            files: Vec::new(),
        }
    }
}
