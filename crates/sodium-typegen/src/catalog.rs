//! Hand-authored declarations that do not come from the corpus.
//!
//! A [`Catalog`] is plain immutable data handed to the loader, mapper and assembler.
//! [`Catalog::libsodium`] describes libsodium.js; tests build smaller ones.

use crate::descriptor::{ConstantDescriptor, SymbolDescriptor};
use crate::ir::{
    BINARY_FORMAT_ALIAS, DualShape, EnumDecl, Field, OutputFormat, Profile, Record,
    TEXT_FORMAT_ALIAS, Type, TypeAlias,
};
use std::collections::BTreeSet;

/// Leaf type of a composite field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// `Uint8Array` in the binary variant, `string` in the text variant.
    Buffer,
    /// Same type in both variants.
    Fixed(Type),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeField {
    pub name: String,
    pub leaf: Leaf,
}

/// Multi-field return value with a binary and a text variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeShape {
    pub binary_name: String,
    pub text_name: String,
    /// Return expressions starting with this text produce the shape.
    pub return_prefix: String,
    pub fields: Vec<ShapeField>,
}

impl CompositeShape {
    fn new(binary_name: &str, return_prefix: &str, fields: &[(&str, Leaf)]) -> Self {
        Self {
            binary_name: binary_name.to_string(),
            text_name: format!("String{}", binary_name),
            return_prefix: return_prefix.to_string(),
            fields: fields
                .iter()
                .map(|(name, leaf)| ShapeField {
                    name: name.to_string(),
                    leaf: leaf.clone(),
                })
                .collect(),
        }
    }

    pub fn dual(&self) -> DualShape {
        DualShape {
            binary: Type::named(&self.binary_name),
            text: Type::named(&self.text_name),
        }
    }

    /// The record definition for one variant.
    pub fn record(&self, format: OutputFormat) -> Record {
        let (name, buffer) = match format {
            OutputFormat::Binary => (&self.binary_name, Type::Binary),
            OutputFormat::Text => (&self.text_name, Type::String),
        };
        Record {
            name: name.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| Field {
                    name: f.name.clone(),
                    ty: match &f.leaf {
                        Leaf::Buffer => buffer.clone(),
                        Leaf::Fixed(ty) => ty.clone(),
                    },
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub aliases: Vec<TypeAlias>,
    pub enums: Vec<EnumDecl>,
    pub shapes: Vec<CompositeShape>,
    /// Opaque streaming-state handles, emitted as `{ name: string }` records.
    pub handles: Vec<String>,
    /// Helpers implemented in JavaScript by the wrapper, absent from the corpus.
    pub auxiliary_symbols: Vec<SymbolDescriptor>,
    /// Completion signal appended to the constants.
    pub ready: ConstantDescriptor,
    /// Lowercased names only present in the extended build.
    extended_only: BTreeSet<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::libsodium()
    }
}

impl Catalog {
    /// Catalog for the libsodium.js wrappers.
    pub fn libsodium() -> Self {
        Self {
            aliases: vec![
                TypeAlias::literals(BINARY_FORMAT_ALIAS, &["uint8array"]),
                TypeAlias::literals(TEXT_FORMAT_ALIAS, &["text", "hex", "base64"]),
                TypeAlias::literals("KeyType", &["curve25519", "ed25519", "x25519"]),
            ],
            enums: vec![EnumDecl {
                name: "base64_variants".to_string(),
                members: ["ORIGINAL", "ORIGINAL_NO_PADDING", "URLSAFE", "URLSAFE_NO_PADDING"]
                    .map(String::from)
                    .to_vec(),
            }],
            shapes: vec![
                CompositeShape::new(
                    "CryptoBox",
                    "_format_output({ciphertext: ciphertext, mac: mac}",
                    &[("ciphertext", Leaf::Buffer), ("mac", Leaf::Buffer)],
                ),
                CompositeShape::new(
                    "CryptoKX",
                    "_format_output({sharedRx: sharedRx, sharedTx: sharedTx}",
                    &[("sharedRx", Leaf::Buffer), ("sharedTx", Leaf::Buffer)],
                ),
                CompositeShape::new(
                    "KeyPair",
                    "{publicKey: _format_output",
                    &[
                        ("keyType", Leaf::Fixed(Type::named("KeyType"))),
                        ("privateKey", Leaf::Buffer),
                        ("publicKey", Leaf::Buffer),
                    ],
                ),
                CompositeShape::new(
                    "SecretBox",
                    "_format_output({mac: mac, cipher: cipher}",
                    &[("cipher", Leaf::Buffer), ("mac", Leaf::Buffer)],
                ),
            ],
            handles: [
                "generichash_state_address",
                "onetimeauth_state_address",
                "state_address",
                "secretstream_xchacha20poly1305_state_address",
                "sign_state_address",
            ]
            .map(String::from)
            .to_vec(),
            auxiliary_symbols: auxiliary_symbols(),
            ready: ConstantDescriptor::new("ready", "Promise<void>"),
            extended_only: EXTENDED_ONLY.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    /// Replace the extended-only denylist.
    pub fn with_extended_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extended_only = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Case-insensitive denylist lookup.
    pub fn is_extended_only(&self, name: &str) -> bool {
        self.extended_only.contains(&name.to_lowercase())
    }

    /// Whether a constant or function named `name` is emitted for `profile`.
    pub fn includes(&self, name: &str, profile: Profile) -> bool {
        profile.is_extended() || !self.is_extended_only(name)
    }

    /// Opaque handle records.
    pub fn handle_records(&self) -> impl Iterator<Item = Record> + '_ {
        self.handles.iter().map(|name| Record {
            name: name.clone(),
            fields: vec![Field {
                name: "name".to_string(),
                ty: Type::String,
            }],
        })
    }
}

fn auxiliary_symbols() -> Vec<SymbolDescriptor> {
    use SymbolDescriptor as S;

    let bytes = [("bytes", "Uint8Array")];
    let pair = [("b1", "Uint8Array"), ("b2", "Uint8Array")];
    let padding = [("buf", "Uint8Array"), ("blocksize", "number")];

    vec![
        S::helper("add", &[("a", "Uint8Array"), ("b", "Uint8Array")], None),
        S::helper("compare", &pair, Some("number")),
        S::helper(
            "from_base64",
            &[("input", "string"), ("variant", "base64_variants")],
            Some("Uint8Array"),
        ),
        S::helper("from_hex", &[("input", "string")], Some("string")),
        S::helper("from_string", &[("str", "string")], Some("Uint8Array")),
        S::helper("increment", &bytes, None),
        S::helper("is_zero", &bytes, Some("boolean")),
        S::helper("memcmp", &pair, Some("boolean")),
        S::helper("memzero", &bytes, None),
        S::helper(
            "output_formats",
            &[],
            Some("Array<Uint8ArrayOutputFormat | StringOutputFormat>"),
        ),
        S::helper("pad", &padding, Some("Uint8Array")),
        S::helper(
            "to_base64",
            &[("input", "string | Uint8Array"), ("variant", "base64_variants")],
            Some("string"),
        ),
        S::helper("to_hex", &[("input", "string | Uint8Array")], Some("string")),
        S::helper("to_string", &bytes, Some("string")),
        S::helper("unpad", &padding, Some("Uint8Array")),
    ]
}

/// Symbols shipped only by `libsodium-wrappers-sumo`.
const EXTENDED_ONLY: &[&str] = &[
    "crypto_auth_hmacsha256",
    "crypto_auth_hmacsha256_bytes",
    "crypto_auth_hmacsha256_final",
    "crypto_auth_hmacsha256_init",
    "crypto_auth_hmacsha256_keybytes",
    "crypto_auth_hmacsha256_keygen",
    "crypto_auth_hmacsha256_update",
    "crypto_auth_hmacsha256_verify",
    "crypto_auth_hmacsha512",
    "crypto_auth_hmacsha512_bytes",
    "crypto_auth_hmacsha512_final",
    "crypto_auth_hmacsha512_init",
    "crypto_auth_hmacsha512_keybytes",
    "crypto_auth_hmacsha512_keygen",
    "crypto_auth_hmacsha512_update",
    "crypto_auth_hmacsha512_verify",
    "crypto_box_curve25519xchacha20poly1305_beforenmbytes",
    "crypto_box_curve25519xchacha20poly1305_easy",
    "crypto_box_curve25519xchacha20poly1305_keypair",
    "crypto_box_curve25519xchacha20poly1305_macbytes",
    "crypto_box_curve25519xchacha20poly1305_noncebytes",
    "crypto_box_curve25519xchacha20poly1305_open_easy",
    "crypto_box_curve25519xchacha20poly1305_publickeybytes",
    "crypto_box_curve25519xchacha20poly1305_seal",
    "crypto_box_curve25519xchacha20poly1305_seal_open",
    "crypto_box_curve25519xchacha20poly1305_sealbytes",
    "crypto_box_curve25519xchacha20poly1305_secretkeybytes",
    "crypto_box_curve25519xchacha20poly1305_seed_keypair",
    "crypto_box_curve25519xchacha20poly1305_seedbytes",
    "crypto_core_ed25519_add",
    "crypto_core_ed25519_bytes",
    "crypto_core_ed25519_from_hash",
    "crypto_core_ed25519_from_uniform",
    "crypto_core_ed25519_hashbytes",
    "crypto_core_ed25519_is_valid_point",
    "crypto_core_ed25519_nonreducedscalarbytes",
    "crypto_core_ed25519_random",
    "crypto_core_ed25519_scalar_add",
    "crypto_core_ed25519_scalar_complement",
    "crypto_core_ed25519_scalar_invert",
    "crypto_core_ed25519_scalar_mul",
    "crypto_core_ed25519_scalar_negate",
    "crypto_core_ed25519_scalar_random",
    "crypto_core_ed25519_scalar_reduce",
    "crypto_core_ed25519_scalar_sub",
    "crypto_core_ed25519_scalarbytes",
    "crypto_core_ed25519_sub",
    "crypto_core_ed25519_uniformbytes",
    "crypto_core_hchacha20",
    "crypto_core_hchacha20_constbytes",
    "crypto_core_hchacha20_inputbytes",
    "crypto_core_hchacha20_keybytes",
    "crypto_core_hchacha20_outputbytes",
    "crypto_core_hsalsa20",
    "crypto_core_hsalsa20_constbytes",
    "crypto_core_hsalsa20_inputbytes",
    "crypto_core_hsalsa20_keybytes",
    "crypto_core_hsalsa20_outputbytes",
    "crypto_core_ristretto255_add",
    "crypto_core_ristretto255_bytes",
    "crypto_core_ristretto255_from_hash",
    "crypto_core_ristretto255_hashbytes",
    "crypto_core_ristretto255_is_valid_point",
    "crypto_core_ristretto255_nonreducedscalarbytes",
    "crypto_core_ristretto255_random",
    "crypto_core_ristretto255_scalar_add",
    "crypto_core_ristretto255_scalar_complement",
    "crypto_core_ristretto255_scalar_invert",
    "crypto_core_ristretto255_scalar_mul",
    "crypto_core_ristretto255_scalar_negate",
    "crypto_core_ristretto255_scalar_random",
    "crypto_core_ristretto255_scalar_reduce",
    "crypto_core_ristretto255_scalar_sub",
    "crypto_core_ristretto255_scalarbytes",
    "crypto_core_ristretto255_sub",
    "crypto_generichash_blake2b_salt_personal",
    "crypto_hash_sha256",
    "crypto_hash_sha256_bytes",
    "crypto_hash_sha256_final",
    "crypto_hash_sha256_init",
    "crypto_hash_sha256_update",
    "crypto_hash_sha512",
    "crypto_hash_sha512_bytes",
    "crypto_hash_sha512_final",
    "crypto_hash_sha512_init",
    "crypto_hash_sha512_update",
    "crypto_onetimeauth",
    "crypto_onetimeauth_bytes",
    "crypto_onetimeauth_final",
    "crypto_onetimeauth_init",
    "crypto_onetimeauth_keybytes",
    "crypto_onetimeauth_keygen",
    "crypto_onetimeauth_update",
    "crypto_onetimeauth_verify",
    "crypto_pwhash_scryptsalsa208sha256",
    "crypto_pwhash_scryptsalsa208sha256_bytes_max",
    "crypto_pwhash_scryptsalsa208sha256_bytes_min",
    "crypto_pwhash_scryptsalsa208sha256_ll",
    "crypto_pwhash_scryptsalsa208sha256_memlimit_interactive",
    "crypto_pwhash_scryptsalsa208sha256_memlimit_max",
    "crypto_pwhash_scryptsalsa208sha256_memlimit_min",
    "crypto_pwhash_scryptsalsa208sha256_memlimit_sensitive",
    "crypto_pwhash_scryptsalsa208sha256_opslimit_interactive",
    "crypto_pwhash_scryptsalsa208sha256_opslimit_max",
    "crypto_pwhash_scryptsalsa208sha256_opslimit_min",
    "crypto_pwhash_scryptsalsa208sha256_opslimit_sensitive",
    "crypto_pwhash_scryptsalsa208sha256_passwd_max",
    "crypto_pwhash_scryptsalsa208sha256_passwd_min",
    "crypto_pwhash_scryptsalsa208sha256_saltbytes",
    "crypto_pwhash_scryptsalsa208sha256_str",
    "crypto_pwhash_scryptsalsa208sha256_str_needs_rehash",
    "crypto_pwhash_scryptsalsa208sha256_str_verify",
    "crypto_pwhash_scryptsalsa208sha256_strbytes",
    "crypto_pwhash_scryptsalsa208sha256_strprefix",
    "crypto_scalarmult_ed25519",
    "crypto_scalarmult_ed25519_base",
    "crypto_scalarmult_ed25519_base_noclamp",
    "crypto_scalarmult_ed25519_bytes",
    "crypto_scalarmult_ed25519_noclamp",
    "crypto_scalarmult_ed25519_scalarbytes",
    "crypto_scalarmult_ristretto255",
    "crypto_scalarmult_ristretto255_base",
    "crypto_scalarmult_ristretto255_bytes",
    "crypto_scalarmult_ristretto255_scalarbytes",
    "crypto_shorthash_siphashx24",
    "crypto_shorthash_siphashx24_bytes",
    "crypto_shorthash_siphashx24_keybytes",
    "crypto_sign_ed25519_sk_to_pk",
    "crypto_sign_ed25519_sk_to_seed",
    "crypto_stream_chacha20",
    "crypto_stream_chacha20_ietf_ext_keybytes",
    "crypto_stream_chacha20_ietf_ext_noncebytes",
    "crypto_stream_chacha20_ietf_xor",
    "crypto_stream_chacha20_ietf_xor_ic",
    "crypto_stream_chacha20_keybytes",
    "crypto_stream_chacha20_keygen",
    "crypto_stream_chacha20_noncebytes",
    "crypto_stream_chacha20_xor",
    "crypto_stream_chacha20_xor_ic",
    "crypto_stream_keygen",
    "crypto_stream_xchacha20_keybytes",
    "crypto_stream_xchacha20_keygen",
    "crypto_stream_xchacha20_noncebytes",
    "crypto_stream_xchacha20_xor",
    "crypto_stream_xchacha20_xor_ic",
];
