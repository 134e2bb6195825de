//! Corpus acquisition: locating a corpus root and reading its descriptors.

mod corpus;
mod fetch;
mod source;

pub use corpus::load_corpus;
pub use fetch::{
    ArchiveFetcher, DownloadProgress, HttpFetcher, NoProgress, TransferStats, extract_archive,
};
pub use source::{
    CorpusRoot, SourceProvider, check_source, constants_file, package_file, read_package_version,
    symbols_dir,
};
