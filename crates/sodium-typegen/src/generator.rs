//! End-to-end generation: resolve a corpus, load it, assemble and write the module.

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::input::{
    ArchiveFetcher, DownloadProgress, HttpFetcher, NoProgress, SourceProvider, load_corpus,
};
use crate::ir::Profile;
use crate::output::Assembler;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Inputs of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output file, or a directory to place the default file name in.
    pub output: PathBuf,
    /// Local libsodium.js checkout. When unset the release archive is downloaded.
    pub base: Option<PathBuf>,
    /// Version to download. Ignored with `base`.
    pub version: Option<String>,
    pub profile: Profile,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub version: String,
    pub profile: Profile,
    pub constants: usize,
    pub functions: usize,
    pub overloads: usize,
}

pub struct TypeGenerator<'a> {
    config: GeneratorConfig,
    catalog: Catalog,
    fetcher: Box<dyn ArchiveFetcher + 'a>,
    progress: Box<dyn DownloadProgress + 'a>,
}

impl<'a> TypeGenerator<'a> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            catalog: Catalog::libsodium(),
            fetcher: Box::new(HttpFetcher::default()),
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_fetcher(mut self, fetcher: impl ArchiveFetcher + 'a) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    pub fn with_progress(mut self, progress: impl DownloadProgress + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline.
    ///
    /// The output is persisted only once the document is complete. A downloaded corpus
    /// is deleted before this returns, on success and on failure.
    pub fn generate(&self, options: &GenerateOptions) -> Result<GenerateReport> {
        let provider = SourceProvider::new(&self.config)
            .with_fetcher(self.fetcher.as_ref())
            .with_progress(self.progress.as_ref());
        let root = provider.resolve(options.base.as_deref(), options.version.as_deref())?;

        let corpus = load_corpus(root.path(), &self.catalog)?;
        let document =
            Assembler::new(&self.catalog).assemble(&corpus, options.profile, root.version());
        let text = document.render();

        let output = resolve_output_path(&options.output, options.profile);
        write_atomically(&output, text.as_bytes())?;
        tracing::info!(path = %output.display(), "declarations written");

        Ok(GenerateReport {
            output,
            version: root.version().to_string(),
            profile: options.profile,
            constants: document.constants.len(),
            functions: document.functions.len(),
            overloads: document.functions.iter().map(|f| f.overloads.len()).sum(),
        })
    }
}

/// Directories get the profile's default file name appended.
pub fn resolve_output_path(output: &Path, profile: Profile) -> PathBuf {
    if output.is_dir() {
        output.join(profile.default_file_name())
    } else {
        output.to_path_buf()
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |reason: String| Error::OutputWrite {
        path: path.to_path_buf(),
        reason,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
    file.write_all(contents)
        .map_err(|e| write_error(e.to_string()))?;
    file.persist(path)
        .map_err(|e| write_error(e.error.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_output_gets_profile_file_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_output_path(dir.path(), Profile::Standard),
            dir.path().join("libsodium-wrappers.d.ts")
        );
        assert_eq!(
            resolve_output_path(dir.path(), Profile::Extended),
            dir.path().join("libsodium-wrappers-sumo.d.ts")
        );
        let file = dir.path().join("sodium.d.ts");
        assert_eq!(resolve_output_path(&file, Profile::Extended), file);
    }

    #[test]
    fn unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.d.ts");
        match write_atomically(&path, b"x").unwrap_err() {
            Error::OutputWrite { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn atomic_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.d.ts");
        std::fs::write(&path, "old").unwrap();
        write_atomically(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
