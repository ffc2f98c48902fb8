//! Search-path resolution of logical asset names.
//!
//! A search path is an ordered list of directories. Each logical name is probed
//! against the directories in order and the first directory holding a regular
//! file with the expected extension wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// A logical name that was found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedAsset {
    name: String,
    path: PathBuf,
    search_index: usize,
}

impl ResolvedAsset {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Index into the search path of the directory this asset was found in.
    pub fn search_index(&self) -> usize {
        self.search_index
    }
}

/// A logical name that no search path entry contained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnresolvedReference {
    name: String,
}

impl UnresolvedReference {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of resolving a set of names. Every input name lands in exactly
/// one of the two lists.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Resolution {
    pub resolved: Vec<ResolvedAsset>,
    pub unresolved: Vec<UnresolvedReference>,
}

impl Resolution {
    pub fn len(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved file paths, in resolution order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.resolved.iter().map(ResolvedAsset::path)
    }
}

/// Resolves logical names against an ordered list of candidate directories.
#[derive(Debug, Clone)]
pub struct PathResolver {
    search_path: Vec<PathBuf>,
    verbose: bool,
}

impl PathResolver {
    pub fn new<I, P>(search_path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        PathResolver {
            search_path: search_path.into_iter().map(Into::into).collect(),
            verbose: false,
        }
    }

    /// When set, successful resolutions are reported too, not only misses.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Find the first search path entry containing `name` + `extension` as a
    /// regular file.
    pub fn find(&self, name: &str, extension: &str) -> Option<(usize, PathBuf)> {
        let file_name = format!("{name}{extension}");
        self.search_path
            .iter()
            .map(|dir| dir.join(&file_name))
            .enumerate()
            .find(|(_, candidate)| candidate.is_file())
    }

    /// Resolve every name in `names`. Misses are reported as diagnostics and
    /// collected in [`Resolution::unresolved`].
    pub fn resolve(&self, names: &HashSet<String>, extension: &str) -> Resolution {
        let width = names.iter().map(|name| name.len()).max().unwrap_or(0);

        let mut resolution = Resolution::default();
        for name in names {
            match self.find(name, extension) {
                Some((search_index, path)) => {
                    if self.verbose {
                        info!(" - {}", path.display());
                    }
                    resolution.resolved.push(ResolvedAsset {
                        name: name.clone(),
                        path,
                        search_index,
                    });
                }
                None => {
                    warn!(" - {name:<width$}\t[File Not Found]");
                    resolution
                        .unresolved
                        .push(UnresolvedReference { name: name.clone() });
                }
            }
        }

        resolution
    }
}
