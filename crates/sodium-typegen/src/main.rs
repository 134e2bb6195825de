use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use sodium_typegen::input::{DownloadProgress, TransferStats};
use sodium_typegen::{GenerateOptions, GeneratorConfig, Profile, TypeGenerator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate TypeScript declarations for libsodium.js.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Output file, or a directory to write the default file name into
    #[arg(short, long)]
    output: PathBuf,

    /// Local libsodium.js checkout (skips the download)
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Declare the sumo build (libsodium-wrappers-sumo)
    #[arg(short, long)]
    sumo: bool,

    /// Release to download
    #[arg(short = 'v', long, value_name = "VERSION")]
    setversion: Option<String>,

    /// Oldest accepted release
    #[arg(long, value_name = "VERSION")]
    min_version: Option<String>,

    /// Configuration file (defaults to the user config, if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Download progress drawn on stderr.
struct ProgressSink {
    bar: ProgressBar,
}

impl ProgressSink {
    fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl DownloadProgress for ProgressSink {
    fn start(&self, _url: &str, total: Option<u64>) {
        let style = match total {
            Some(len) => {
                self.bar.set_length(len);
                ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} ({bytes_per_sec})")
            }
            None => ProgressStyle::with_template("{spinner} {bytes} ({bytes_per_sec})"),
        };
        if let Ok(style) = style {
            self.bar.set_style(style);
        }
        self.bar
            .set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn advance(&self, stats: &TransferStats) {
        self.bar.set_position(stats.transferred);
    }

    fn finish(&self, _stats: &TransferStats) {
        self.bar.finish_and_clear();
    }
}

fn run(cli: Cli) -> sodium_typegen::Result<()> {
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;
    if let Some(min) = cli.min_version {
        config.minimum_version = min;
    }

    let generator = TypeGenerator::new(config).with_progress(ProgressSink::new());
    let report = generator.generate(&GenerateOptions {
        output: cli.output,
        base: cli.base,
        version: cli.setversion,
        profile: Profile::from_sumo(cli.sumo),
    })?;

    println!(
        "Success! The declaration file for libsodium.js v{}{} is now available at \"{}\".",
        report.version,
        if report.profile.is_extended() { " (sumo)" } else { "" },
        report.output.display()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["sodium-typegen", "-o", "out", "-s", "-v", "0.7.6"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("out"));
        assert!(cli.sumo);
        assert_eq!(cli.setversion.as_deref(), Some("0.7.6"));
    }
}
