//! TypeScript declaration module assembly.
//!
//! [`Assembler`] turns a loaded [`Corpus`] into a [`Document`]; rendering the document
//! is a pure text pass. The layout is fixed:
//!
//! ```text
//! // header comments
//! declare module 'libsodium-wrappers' {
//!   type ...          aliases
//!   enum ... { }      enums
//!   interface ... { } composite records (binary, text), then state handles
//!   const ...;        constants, profile-filtered
//!   function ...;     functions, profile-filtered, dual returns as two overloads
//! }
//! ```

use crate::catalog::Catalog;
use crate::descriptor::Corpus;
use crate::ir::{EnumDecl, OutputFormat, Overload, Profile, Record, Type, TypeAlias};
use crate::mapping::{TypeMapper, map_type};
use std::fmt::{self, Write};

const PROJECT_URL: &str = "https://github.com/jedisct1/libsodium.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDecl {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub overloads: Vec<Overload>,
}

/// A complete declaration module, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub module: String,
    pub version: String,
    pub aliases: Vec<TypeAlias>,
    pub enums: Vec<EnumDecl>,
    pub records: Vec<Record>,
    pub constants: Vec<ConstantDecl>,
    pub functions: Vec<FunctionDecl>,
}

impl Document {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Type definitions for {} {}", self.module, self.version)?;
        writeln!(f, "// Project: {}", PROJECT_URL)?;
        writeln!(f, "// Generated by sodium-typegen")?;
        writeln!(f)?;
        writeln!(f, "declare module '{}' {{", self.module)?;

        for alias in &self.aliases {
            writeln!(f, "  type {} = {};", alias.name, alias.ty)?;
        }
        writeln!(f)?;

        for decl in &self.enums {
            writeln!(f, "  enum {} {{", decl.name)?;
            for member in &decl.members {
                writeln!(f, "    {},", member)?;
            }
            writeln!(f, "  }}")?;
            writeln!(f)?;
        }

        for record in &self.records {
            writeln!(f, "  interface {} {{", record.name)?;
            for field in &record.fields {
                writeln!(f, "    {}: {};", field.name, field.ty)?;
            }
            writeln!(f, "  }}")?;
            writeln!(f)?;
        }

        for constant in &self.constants {
            writeln!(f, "  const {}: {};", constant.name, constant.ty)?;
        }
        writeln!(f)?;

        for function in &self.functions {
            for overload in &function.overloads {
                writeln!(
                    f,
                    "  function {}({}): {};",
                    function.name,
                    render_params(overload),
                    overload.returns
                )?;
            }
        }

        writeln!(f, "}}")
    }
}

fn render_params(overload: &Overload) -> String {
    let mut out = String::new();
    for (i, param) in overload.all_params().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{}", param);
    }
    out
}

/// Builds [`Document`]s from a corpus and an injected [`Catalog`].
#[derive(Debug, Clone)]
pub struct Assembler<'a> {
    catalog: &'a Catalog,
    mapper: TypeMapper,
}

impl<'a> Assembler<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            mapper: TypeMapper::new(catalog),
        }
    }

    pub fn mapper(&self) -> &TypeMapper {
        &self.mapper
    }

    /// Assemble declarations for `profile`. `version` is only used in the header.
    pub fn assemble(&self, corpus: &Corpus, profile: Profile, version: &str) -> Document {
        let records = self
            .catalog
            .shapes
            .iter()
            .flat_map(|shape| {
                [
                    shape.record(OutputFormat::Binary),
                    shape.record(OutputFormat::Text),
                ]
            })
            .chain(self.catalog.handle_records())
            .collect();

        let constants: Vec<ConstantDecl> = corpus
            .constants
            .iter()
            .filter(|c| self.catalog.includes(&c.name, profile))
            .map(|c| ConstantDecl {
                name: c.name.clone(),
                ty: map_type(&c.ty),
            })
            .collect();

        let functions: Vec<FunctionDecl> = corpus
            .functions
            .iter()
            .filter(|f| self.catalog.includes(&f.name, profile))
            .map(|f| FunctionDecl {
                name: f.name.clone(),
                overloads: self.mapper.overloads(f),
            })
            .collect();

        tracing::debug!(
            profile = ?profile,
            constants_skipped = corpus.constants.len() - constants.len(),
            functions_skipped = corpus.functions.len() - functions.len(),
            "applied profile filter"
        );

        Document {
            module: profile.module_name().to_string(),
            version: version.to_string(),
            aliases: self.catalog.aliases.clone(),
            enums: self.catalog.enums.clone(),
            records,
            constants,
            functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ConstantDescriptor, ParameterDescriptor, SymbolDescriptor};

    fn corpus() -> Corpus {
        Corpus {
            functions: vec![
                SymbolDescriptor {
                    name: "crypto_box_easy".into(),
                    inputs: vec![
                        ParameterDescriptor::new("message", "unsized_buf"),
                        ParameterDescriptor::new("nonce", "buf"),
                        ParameterDescriptor::new("publicKey", "buf"),
                        ParameterDescriptor::new("privateKey", "buf"),
                    ],
                    returns: Some("_format_output(ciphertext, outputFormat)".into()),
                    ..Default::default()
                },
                SymbolDescriptor {
                    name: "crypto_generichash".into(),
                    inputs: vec![
                        ParameterDescriptor::new("hash_length", "uint"),
                        ParameterDescriptor::new("message", "unsized_buf"),
                        ParameterDescriptor::new("key", "unsized_buf_optional"),
                    ],
                    returns: Some("_format_output(hash, outputFormat)".into()),
                    ..Default::default()
                },
                SymbolDescriptor {
                    name: "crypto_hash_sha256".into(),
                    inputs: vec![ParameterDescriptor::new("message", "unsized_buf")],
                    returns: Some("_format_output(hash, outputFormat)".into()),
                    ..Default::default()
                },
                SymbolDescriptor::helper("memzero", &[("bytes", "Uint8Array")], None),
                SymbolDescriptor {
                    name: "randombytes_random".into(),
                    returns: Some("random_value".into()),
                    ..Default::default()
                },
            ],
            constants: vec![
                ConstantDescriptor::new("CRYPTO_HASH_SHA256_BYTES", "uint"),
                ConstantDescriptor::new("SODIUM_VERSION_STRING", "string"),
                ConstantDescriptor::new("crypto_box_SEEDBYTES", "uint"),
                ConstantDescriptor::new("ready", "Promise<void>"),
            ],
        }
    }

    #[test]
    fn renders_functions() {
        let catalog = Catalog::libsodium();
        let doc = Assembler::new(&catalog).assemble(&corpus(), Profile::Standard, "0.7.6");
        let text = doc.render();

        assert!(text.contains(
            "  function crypto_box_easy(message: string | Uint8Array | undefined, nonce: Uint8Array, publicKey: Uint8Array, privateKey: Uint8Array, outputFormat?: Uint8ArrayOutputFormat | null): Uint8Array;\n"
        ));
        assert!(text.contains(
            "  function crypto_box_easy(message: string | Uint8Array | undefined, nonce: Uint8Array, publicKey: Uint8Array, privateKey: Uint8Array, outputFormat: StringOutputFormat | null): string;\n"
        ));
        assert!(text.contains(
            "  function crypto_generichash(hash_length: number, message: string | Uint8Array | undefined, key: string | Uint8Array | undefined | null, outputFormat?: Uint8ArrayOutputFormat | null): Uint8Array;\n"
        ));
        assert!(text.contains("  function memzero(bytes: Uint8Array): void;\n"));
        assert!(text.contains("  function randombytes_random(): number;\n"));
    }

    #[test]
    fn renders_preamble_in_order() {
        let catalog = Catalog::libsodium();
        let text = Assembler::new(&catalog)
            .assemble(&corpus(), Profile::Standard, "0.7.6")
            .render();

        assert!(text.starts_with(
            "// Type definitions for libsodium-wrappers 0.7.6\n\
             // Project: https://github.com/jedisct1/libsodium.js\n\
             // Generated by sodium-typegen\n\
             \n\
             declare module 'libsodium-wrappers' {\n\
             \x20 type Uint8ArrayOutputFormat = 'uint8array';\n\
             \x20 type StringOutputFormat = 'text' | 'hex' | 'base64';\n\
             \x20 type KeyType = 'curve25519' | 'ed25519' | 'x25519';\n\
             \n\
             \x20 enum base64_variants {\n\
             \x20   ORIGINAL,\n\
             \x20   ORIGINAL_NO_PADDING,\n\
             \x20   URLSAFE,\n\
             \x20   URLSAFE_NO_PADDING,\n\
             \x20 }\n\
             \n\
             \x20 interface CryptoBox {\n\
             \x20   ciphertext: Uint8Array;\n\
             \x20   mac: Uint8Array;\n\
             \x20 }\n\
             \n\
             \x20 interface StringCryptoBox {\n\
             \x20   ciphertext: string;\n\
             \x20   mac: string;\n\
             \x20 }\n"
        ));
        assert!(text.contains("  interface sign_state_address {\n    name: string;\n  }\n"));
        assert!(text.ends_with("}\n"));

        let interfaces = text.find("  interface ").unwrap();
        let constants = text.find("  const ").unwrap();
        let functions = text.find("  function ").unwrap();
        assert!(interfaces < constants && constants < functions);
    }

    #[test]
    fn standard_profile_drops_denylisted_names() {
        let catalog = Catalog::libsodium();
        let assembler = Assembler::new(&catalog);

        let standard = assembler.assemble(&corpus(), Profile::Standard, "0.7.6");
        assert!(standard.functions.iter().all(|f| f.name != "crypto_hash_sha256"));
        assert!(
            standard
                .constants
                .iter()
                .all(|c| c.name != "CRYPTO_HASH_SHA256_BYTES")
        );

        let extended = assembler.assemble(&corpus(), Profile::Extended, "0.7.6");
        assert_eq!(extended.module, "libsodium-wrappers-sumo");
        assert!(extended.functions.iter().any(|f| f.name == "crypto_hash_sha256"));
        assert!(
            extended
                .constants
                .iter()
                .any(|c| c.name == "CRYPTO_HASH_SHA256_BYTES")
        );

        // Aliases, enums and records are never filtered.
        assert_eq!(standard.aliases, extended.aliases);
        assert_eq!(standard.enums, extended.enums);
        assert_eq!(standard.records, extended.records);
    }

    #[test]
    fn constants_use_closed_lookup() {
        let catalog = Catalog::libsodium();
        let doc = Assembler::new(&catalog).assemble(&corpus(), Profile::Standard, "0.7.6");
        let rendered: Vec<String> = doc
            .constants
            .iter()
            .map(|c| format!("{}: {}", c.name, c.ty))
            .collect();
        assert_eq!(
            rendered,
            [
                "SODIUM_VERSION_STRING: string",
                "crypto_box_SEEDBYTES: number",
                "ready: Promise<void>",
            ]
        );
    }
}
