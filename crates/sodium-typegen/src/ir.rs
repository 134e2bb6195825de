//! Intermediate representation of the emitted declarations.
//!
//! The mapping engine produces these values and the assembler renders them; nothing
//! here knows about corpus files.

use std::fmt;

/// Name of the alias accepted by the binary-output overload.
pub const BINARY_FORMAT_ALIAS: &str = "Uint8ArrayOutputFormat";
/// Name of the alias accepted by the text-output overload.
pub const TEXT_FORMAT_ALIAS: &str = "StringOutputFormat";
/// Parameter name of the trailing output-format selector.
pub const FORMAT_PARAM: &str = "outputFormat";

/// A structural type in the declaration language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Number,
    Boolean,
    String,
    /// Fixed-length byte buffer (`Uint8Array`).
    Binary,
    Null,
    Undefined,
    /// String literal type, rendered quoted.
    Literal(String),
    /// Already-valid type expression taken verbatim from the corpus or catalog.
    Named(String),
    Union(Vec<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// Union this type with `null`, flattening into an existing union.
    pub fn or_null(self) -> Self {
        match self {
            Type::Union(mut members) => {
                members.push(Type::Null);
                Type::Union(members)
            }
            other => Type::Union(vec![other, Type::Null]),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number => f.write_str("number"),
            Type::Boolean => f.write_str("boolean"),
            Type::String => f.write_str("string"),
            Type::Binary => f.write_str("Uint8Array"),
            Type::Null => f.write_str("null"),
            Type::Undefined => f.write_str("undefined"),
            Type::Literal(value) => write!(f, "'{}'", value),
            Type::Named(name) => f.write_str(name),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
        }
    }
}

/// Output encoding a caller selects at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Binary,
    Text,
}

impl OutputFormat {
    /// The trailing selector parameter for an overload of this format.
    ///
    /// The binary selector may be omitted entirely since it is the runtime default.
    pub fn selector(self) -> Param {
        match self {
            OutputFormat::Binary => Param {
                name: FORMAT_PARAM.to_string(),
                ty: Type::named(BINARY_FORMAT_ALIAS).or_null(),
                optional: true,
            },
            OutputFormat::Text => Param {
                name: FORMAT_PARAM.to_string(),
                ty: Type::named(TEXT_FORMAT_ALIAS).or_null(),
                optional: false,
            },
        }
    }
}

/// Return type whose physical shape depends on the caller's output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualShape {
    pub binary: Type,
    pub text: Type,
}

impl DualShape {
    pub fn get(&self, format: OutputFormat) -> &Type {
        match format {
            OutputFormat::Binary => &self.binary,
            OutputFormat::Text => &self.text,
        }
    }
}

/// Result of mapping a return expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    Plain(Type),
    Dual(DualShape),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    /// Rendered as `name?:`.
    pub optional: bool,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.optional { "?" } else { "" };
        write!(f, "{}{}: {}", self.name, marker, self.ty)
    }
}

/// One declared signature of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload {
    /// Parameters from the descriptor, in call order.
    pub params: Vec<Param>,
    /// Set when this overload is one half of a dual-shape pair.
    pub format: Option<OutputFormat>,
    pub returns: Type,
}

impl Overload {
    /// All rendered parameters, including the trailing selector when present.
    pub fn all_params(&self) -> impl Iterator<Item = Param> + '_ {
        self.params
            .iter()
            .cloned()
            .chain(self.format.map(OutputFormat::selector))
    }
}

/// `type Name = ...;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: Type,
}

impl TypeAlias {
    /// Alias for a closed union of string literals.
    pub fn literals(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            ty: Type::Union(
                values
                    .iter()
                    .map(|v| Type::Literal(v.to_string()))
                    .collect(),
            ),
        }
    }
}

/// `enum Name { A, B }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// `interface Name { field: type; }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Symbol inclusion scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// The default `libsodium-wrappers` build.
    #[default]
    Standard,
    /// The `libsodium-wrappers-sumo` build with every symbol.
    Extended,
}

impl Profile {
    pub fn from_sumo(sumo: bool) -> Self {
        if sumo {
            Profile::Extended
        } else {
            Profile::Standard
        }
    }

    pub fn is_extended(self) -> bool {
        self == Profile::Extended
    }

    /// Module name the declarations are written for.
    pub fn module_name(self) -> &'static str {
        match self {
            Profile::Standard => "libsodium-wrappers",
            Profile::Extended => "libsodium-wrappers-sumo",
        }
    }

    /// File name used when the output path is a directory.
    pub fn default_file_name(self) -> String {
        format!("{}.d.ts", self.module_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_rendering_flattens_null() {
        let ty = Type::Union(vec![Type::String, Type::Binary, Type::Undefined]).or_null();
        assert_eq!(ty.to_string(), "string | Uint8Array | undefined | null");
        assert_eq!(Type::Number.or_null().to_string(), "number | null");
    }

    #[test]
    fn selectors() {
        assert_eq!(
            OutputFormat::Binary.selector().to_string(),
            "outputFormat?: Uint8ArrayOutputFormat | null"
        );
        assert_eq!(
            OutputFormat::Text.selector().to_string(),
            "outputFormat: StringOutputFormat | null"
        );
    }

    #[test]
    fn profile_file_names() {
        assert_eq!(Profile::Standard.default_file_name(), "libsodium-wrappers.d.ts");
        assert_eq!(
            Profile::Extended.default_file_name(),
            "libsodium-wrappers-sumo.d.ts"
        );
        assert_eq!(Profile::from_sumo(true), Profile::Extended);
    }
}
