//! Locating and validating a libsodium.js corpus.
//!
//! A corpus root is either a directory the caller already has (a libsodium.js
//! checkout) or a release archive downloaded into a scratch directory for the
//! duration of one run.

use super::fetch::{ArchiveFetcher, DownloadProgress, HttpFetcher, NoProgress, extract_archive};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::version::check_version;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `<root>/wrapper/symbols`
pub fn symbols_dir(root: &Path) -> PathBuf {
    root.join("wrapper").join("symbols")
}

/// `<root>/wrapper/constants.json`
pub fn constants_file(root: &Path) -> PathBuf {
    root.join("wrapper").join("constants.json")
}

/// `<root>/package.json`
pub fn package_file(root: &Path) -> PathBuf {
    root.join("package.json")
}

/// Validate the corpus layout under `root` and return its package version.
pub fn check_source(root: &Path) -> Result<String> {
    let symbols = symbols_dir(root);
    let entries = fs::read_dir(&symbols)
        .map_err(|_| Error::integrity(&symbols, "symbols directory not found"))?;

    let constants = constants_file(root);
    if fs::read(&constants).is_err() {
        return Err(Error::integrity(&constants, "constants file not found"));
    }

    let has_descriptor = entry_paths(&symbols, entries.map(|e| e.map(|e| e.path())))?
        .iter()
        .any(|p| {
            p.file_name()
                .is_some_and(|name| name.to_string_lossy().contains("json"))
        });
    if !has_descriptor {
        return Err(Error::integrity(&symbols, "no symbol descriptor files found"));
    }

    read_package_version(root)
}

/// Collect directory entries, failing on the first one that could not be read.
pub(super) fn entry_paths<I>(dir: &Path, entries: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    entries
        .into_iter()
        .map(|entry| entry.map_err(|e| Error::parse(dir, e)))
        .collect()
}

/// Read the `version` field of `<root>/package.json`.
pub fn read_package_version(root: &Path) -> Result<String> {
    let path = package_file(root);
    let raw = fs::read_to_string(&path)
        .map_err(|e| Error::metadata(&path, format!("could not read package metadata: {}", e)))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| Error::metadata(&path, format!("invalid JSON: {}", e)))?;

    value
        .get("version")
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| Error::metadata(&path, "missing \"version\" string"))
}

/// Scratch directory removed when dropped. Removal failures are logged only.
#[derive(Debug)]
struct Scratch {
    path: PathBuf,
    // Taken in `drop` so it can be closed explicitly.
    dir: Option<TempDir>,
}

impl Scratch {
    fn new(dir: TempDir) -> Self {
        Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => tracing::debug!(path = %self.path.display(), "removed scratch directory"),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    "could not remove scratch directory: {}",
                    e
                ),
            }
        }
    }
}

/// A validated corpus. Downloaded corpora are deleted when this is dropped.
#[derive(Debug)]
pub struct CorpusRoot {
    path: PathBuf,
    version: String,
    scratch: Option<Scratch>,
}

impl CorpusRoot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version read from the corpus' own package metadata.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the corpus lives in a scratch directory owned by this value.
    pub fn is_ephemeral(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Resolves a [`CorpusRoot`] from a local path or a release archive.
pub struct SourceProvider<'a> {
    config: &'a GeneratorConfig,
    fetcher: Box<dyn ArchiveFetcher + 'a>,
    progress: Box<dyn DownloadProgress + 'a>,
}

impl<'a> SourceProvider<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            fetcher: Box::new(HttpFetcher::default()),
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_fetcher(mut self, fetcher: impl ArchiveFetcher + 'a) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    pub fn with_progress(mut self, progress: impl DownloadProgress + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Use `local` as-is, or download `version` (default from config).
    ///
    /// A requested version is gated before any network access. The version found in
    /// the corpus metadata is gated too.
    pub fn resolve(&self, local: Option<&Path>, version: Option<&str>) -> Result<CorpusRoot> {
        let root = match local {
            Some(path) => {
                if let Some(v) = version {
                    tracing::warn!(
                        "ignoring requested version {} because a local corpus was given",
                        v
                    );
                }
                CorpusRoot {
                    path: path.to_path_buf(),
                    version: String::new(),
                    scratch: None,
                }
            }
            None => {
                let version = version.unwrap_or(&self.config.default_version);
                check_version(version, &self.config.minimum_version)?;
                self.download(version)?
            }
        };

        let version = check_source(&root.path)?;
        check_version(&version, &self.config.minimum_version)?;
        tracing::info!(version = %version, root = %root.path.display(), "using libsodium.js corpus");

        Ok(CorpusRoot { version, ..root })
    }

    fn download(&self, version: &str) -> Result<CorpusRoot> {
        let url = self.config.archive_url(version);
        tracing::info!("Downloading {} from \"{}\" ...", self.config.library, url);

        let dir = tempfile::Builder::new()
            .prefix("sodium-typegen-")
            .tempdir()
            .map_err(|e| Error::fetch(&url, format!("could not create temp dir: {}", e)))?;
        let scratch = Scratch::new(dir);

        let archive = scratch.path().join("libsodium.zip");
        self.fetcher.fetch(&url, &archive, self.progress.as_ref())?;
        extract_archive(&archive, scratch.path())?;
        if let Err(e) = fs::remove_file(&archive) {
            tracing::warn!(path = %archive.display(), "could not remove downloaded archive: {}", e);
        }

        Ok(CorpusRoot {
            path: scratch
                .path()
                .join(format!("{}-{}", self.config.library, version)),
            version: version.to_string(),
            scratch: Some(scratch),
        })
    }
}
