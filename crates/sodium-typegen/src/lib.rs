//! TypeScript declaration generation for libsodium.js.
//!
//! `sodium-typegen` reads the symbol and constant descriptors shipped with a
//! libsodium.js source tree and emits an ambient module declaration
//! (`libsodium-wrappers.d.ts`, or the sumo variant).
//!
//! # Architecture
//!
//! ```text
//! Input                       IR                      Output
//! ───────────────────     ──────────────────      ──────────────────
//! local checkout   ─┐                          ┌─> type aliases, enums
//!                   ├─> Corpus ─> TypeMapper ──┼─> interfaces (records, handles)
//! release archive  ─┘   (descriptor.rs)        ├─> constants
//!   (fetch, unzip)      Catalog (catalog.rs)   └─> function overloads
//! ```
//!
//! The [`Catalog`] carries every hand-authored fact about libsodium.js (composite
//! shapes, auxiliary helpers, the sumo-only denylist) and is injected rather than
//! looked up globally, so alternative catalogs can be used in tests.
//!
//! # Example
//!
//! ```no_run
//! use sodium_typegen::{GenerateOptions, GeneratorConfig, Profile, TypeGenerator};
//!
//! let generator = TypeGenerator::new(GeneratorConfig::default());
//! let report = generator
//!     .generate(&GenerateOptions {
//!         output: "types".into(),
//!         base: Some("libsodium.js".into()),
//!         profile: Profile::Extended,
//!         ..Default::default()
//!     })
//!     .unwrap();
//! println!("wrote {}", report.output.display());
//! ```
//!
//! # Feature Flags
//!
//! - `cli` (default) - the `sodium-typegen` binary (clap, tracing-subscriber, indicatif)

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod input;
pub mod ir;
pub mod mapping;
pub mod output;
pub mod version;

pub use catalog::Catalog;
pub use config::GeneratorConfig;
pub use error::{Error, Result, VersionError};
pub use generator::{GenerateOptions, GenerateReport, TypeGenerator};
pub use ir::Profile;
pub use mapping::TypeMapper;
pub use output::{Assembler, Document};
