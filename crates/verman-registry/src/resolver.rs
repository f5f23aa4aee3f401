//! The query engine: package/version discovery and file enumeration.

use std::path::{Path, PathBuf};

use semver::Version as SemverVersion;
use url::Url;
use verman_core::{FileEntry, GetQuery, ListQuery, Package, Version, VersionSelector};
use verman_util::errors::{VermanError, VermanResult};

use crate::constraint::Constraint;
use crate::store::DirectoryStore;

/// Per-package sentinel file consulted when a query asks for `latest`.
const LATEST_SENTINEL: &str = "latest";

/// Resolves queries against a repository laid out as
/// `<root>/<package>/<version>/<files...>`.
///
/// Stateless between calls: every call is one synchronous traversal of the
/// underlying store, and nothing is cached. Concurrent calls are safe
/// whenever the store is safe for concurrent reads.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    store: S,
    root: PathBuf,
}

impl<S: DirectoryStore> Resolver<S> {
    pub fn new(store: S, root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            root: root.into(),
        }
    }

    /// Enumerate packages and versions matching `query`.
    ///
    /// Version directories whose names do not parse as semantic versions are
    /// skipped, and a package whose filtered version set comes out empty is
    /// omitted from the result entirely. Results follow directory-listing
    /// order.
    pub fn list(&self, query: &ListQuery) -> VermanResult<Vec<Package>> {
        tracing::debug!("listing packages under {}", self.root.display());

        // an unparsable expression aborts before any traversal
        let expression_constraint = match &query.version {
            VersionSelector::Expression(expression) => Some(Constraint::parse(expression)?),
            VersionSelector::All | VersionSelector::Latest => None,
        };

        let mut packages = Vec::new();
        for entry in self.store.read_dir(&self.root)? {
            if !entry.is_dir {
                continue;
            }
            if let Some(name) = &query.name {
                if *name != entry.name {
                    continue;
                }
            }

            let versions =
                self.package_versions(&entry.name, &query.version, expression_constraint.as_ref())?;
            if versions.is_empty() {
                tracing::trace!("package {} has no matching versions, skipping", entry.name);
                continue;
            }
            packages.push(Package {
                name: entry.name,
                versions,
            });
        }
        Ok(packages)
    }

    /// Enumerate the files of one exact package version.
    ///
    /// Both query fields are used verbatim as path segments; no range
    /// semantics apply.
    pub fn get(&self, query: &GetQuery) -> VermanResult<Package> {
        tracing::debug!("reading files of {} {}", query.name, query.version);

        let version_dir = self.root.join(&query.name).join(&query.version);
        if !self.store.exists(&version_dir)? {
            return Err(VermanError::not_found(version_dir));
        }

        let mut files = Vec::new();
        for entry in self.store.read_dir(&version_dir)? {
            if entry.is_dir {
                continue;
            }
            let location = file_location(&version_dir.join(&entry.name))?;
            files.push(FileEntry {
                name: entry.name,
                location,
            });
        }

        Ok(Package {
            name: query.name.clone(),
            versions: vec![Version {
                number: query.version.clone(),
                files,
            }],
        })
    }

    /// The versions of one package that survive the selector.
    fn package_versions(
        &self,
        package: &str,
        selector: &VersionSelector,
        expression_constraint: Option<&Constraint>,
    ) -> VermanResult<Vec<Version>> {
        let package_dir = self.root.join(package);
        let entries = self.store.read_dir(&package_dir)?;

        // latest mode takes the sentinel file's constraint when one exists;
        // without a sentinel it falls back to the numeric maximum
        let mut constraint = expression_constraint.cloned();
        let mut take_maximum = false;
        if matches!(selector, VersionSelector::Latest) {
            match self.store.read_file(&package_dir.join(LATEST_SENTINEL)) {
                Ok(bytes) => {
                    let expression =
                        String::from_utf8(bytes).map_err(|e| VermanError::InvalidConstraint {
                            expression: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                            message: "sentinel contents are not valid UTF-8".to_string(),
                        })?;
                    // sentinel contents are the expression, verbatim
                    tracing::debug!("{}: latest sentinel constraint {:?}", package, expression);
                    constraint = Some(Constraint::parse(&expression)?);
                }
                Err(err) if err.is_not_found() => take_maximum = true,
                Err(err) => return Err(err),
            }
        }

        let mut candidates: Vec<(SemverVersion, String)> = Vec::new();
        for entry in entries {
            if !entry.is_dir {
                continue;
            }
            let Ok(parsed) = SemverVersion::parse(&entry.name) else {
                tracing::trace!("skipping {}/{}: not a semantic version", package, entry.name);
                continue;
            };
            if let Some(constraint) = &constraint {
                if !constraint.matches(&parsed) {
                    continue;
                }
            }
            candidates.push((parsed, entry.name));
        }

        if take_maximum && !candidates.is_empty() {
            candidates.sort_by(|a, b| a.0.cmp(&b.0));
            candidates = candidates.split_off(candidates.len() - 1);
        }

        Ok(candidates
            .into_iter()
            .map(|(_, number)| Version::new(number))
            .collect())
    }
}

/// Build the `file://` URL addressing a repository file.
///
/// A relative repository root produces a URL rooted at `/`, mirroring the
/// shape of the on-disk layout contract.
fn file_location(path: &Path) -> VermanResult<Url> {
    let text = path.to_str().ok_or_else(|| VermanError::Location {
        path: path.to_path_buf(),
    })?;
    let raw = if path.is_absolute() {
        format!("file://{text}")
    } else {
        format!("file:///{text}")
    };
    Url::parse(&raw).map_err(|_| VermanError::Location {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_location() {
        let url = file_location(Path::new("repo/cat/1.0.0/file.txt")).unwrap();
        assert_eq!(url.as_str(), "file:///repo/cat/1.0.0/file.txt");
    }

    #[test]
    fn absolute_path_location() {
        let url = file_location(Path::new("/var/repo/cat/1.0.0/file.txt")).unwrap();
        assert_eq!(url.as_str(), "file:///var/repo/cat/1.0.0/file.txt");
    }

    #[test]
    fn location_encodes_spaces() {
        let url = file_location(Path::new("repo/cat/1.0.0/read me.txt")).unwrap();
        assert_eq!(url.as_str(), "file:///repo/cat/1.0.0/read%20me.txt");
    }
}
