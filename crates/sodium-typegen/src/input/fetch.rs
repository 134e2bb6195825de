//! Archive download and extraction.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Snapshot of a running download.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferStats {
    pub transferred: u64,
    /// From `Content-Length`, when the server sent one.
    pub total: Option<u64>,
    pub elapsed: Duration,
}

impl TransferStats {
    /// Completion in the range `0.0..=100.0`.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(100.0),
            Some(total) => Some(self.transferred as f64 * 100.0 / total as f64),
            None => None,
        }
    }

    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.transferred as f64 / secs
        } else {
            0.0
        }
    }
}

/// Receives download progress.
pub trait DownloadProgress: Send + Sync {
    fn start(&self, _url: &str, _total: Option<u64>) {}
    fn advance(&self, _stats: &TransferStats) {}
    fn finish(&self, _stats: &TransferStats) {}
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {}

/// Transport that stores the body at `url` into `dest`.
pub trait ArchiveFetcher: Send + Sync {
    fn fetch(&self, url: &str, dest: &Path, progress: &dyn DownloadProgress) -> Result<()>;
}

impl<F: ArchiveFetcher + ?Sized> ArchiveFetcher for &F {
    fn fetch(&self, url: &str, dest: &Path, progress: &dyn DownloadProgress) -> Result<()> {
        (**self).fetch(url, dest, progress)
    }
}

impl<P: DownloadProgress + ?Sized> DownloadProgress for &P {
    fn start(&self, url: &str, total: Option<u64>) {
        (**self).start(url, total)
    }

    fn advance(&self, stats: &TransferStats) {
        (**self).advance(stats)
    }

    fn finish(&self, stats: &TransferStats) {
        (**self).finish(stats)
    }
}

/// Plain HTTPS transport. Redirects are followed; the final status must be 200.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            user_agent: concat!("sodium-typegen/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path, progress: &dyn DownloadProgress) -> Result<()> {
        let response = match ureq::get(url).set("User-Agent", &self.user_agent).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => {
                return Err(Error::fetch(url, format!("status code {}", code)));
            }
            Err(e) => return Err(Error::fetch(url, e)),
        };

        if response.status() != 200 {
            return Err(Error::fetch(
                url,
                format!("status code {}", response.status()),
            ));
        }

        let total = response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok());
        progress.start(url, total);

        let mut file = File::create(dest).map_err(|e| Error::fetch(url, e))?;
        let stats = copy_with_progress(&mut response.into_reader(), &mut file, total, progress)
            .map_err(|e| Error::fetch(url, e))?;
        file.flush().map_err(|e| Error::fetch(url, e))?;

        progress.finish(&stats);
        tracing::debug!(bytes = stats.transferred, "download complete");
        Ok(())
    }
}

fn copy_with_progress(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    total: Option<u64>,
    progress: &dyn DownloadProgress,
) -> std::io::Result<TransferStats> {
    let started = Instant::now();
    let mut buf = vec![0u8; 64 * 1024];
    let mut stats = TransferStats {
        transferred: 0,
        total,
        elapsed: Duration::ZERO,
    };

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        stats.transferred += n as u64;
        stats.elapsed = started.elapsed();
        progress.advance(&stats);
    }

    Ok(stats)
}

/// Unpack the zip at `archive` into `dest`.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let source = archive.display().to_string();
    let file = File::open(archive).map_err(|e| Error::fetch(&source, e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| Error::fetch(&source, e))?;
    zip.extract(dest).map_err(|e| Error::fetch(&source, e))?;
    tracing::debug!(entries = zip.len(), dest = %dest.display(), "archive extracted");
    Ok(())
}
