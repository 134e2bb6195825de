//! Corpus type tokens to declaration types.
//!
//! Parameter and constant tokens go through a closed lookup. Return expressions are
//! matched against an ordered rule table where the first matching rule wins:
//!
//! 1. composite-shape prefixes (from the [`Catalog`]) give a [`DualShape`] of records
//! 2. exactly `random_value` gives `number`
//! 3. containing `=== 0` gives `boolean`
//! 4. containing `stringify` gives `string`
//! 5. containing `_format_output` gives a [`DualShape`] of `Uint8Array` / `string`
//!
//! Anything else is taken verbatim as a type name.

use crate::catalog::Catalog;
use crate::descriptor::SymbolDescriptor;
use crate::ir::{DualShape, OutputFormat, Overload, Param, ReturnShape, Type};

/// Map a corpus type token without the optional-null rule (used for constants).
pub fn map_type(token: &str) -> Type {
    match token {
        "uint" => Type::Number,
        "buf" | "randombytes_implementation" => Type::Binary,
        "unsized_buf" | "unsized_buf_optional" => {
            Type::Union(vec![Type::String, Type::Binary, Type::Undefined])
        }
        other => Type::named(other),
    }
}

/// Map a parameter type token. Tokens mentioning `optional` also accept `null`.
pub fn map_param_type(token: &str) -> Type {
    let ty = map_type(token);
    if token.contains("optional") {
        ty.or_null()
    } else {
        ty
    }
}

/// How a rule tests a return expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Prefix(String),
    Exact(String),
    Contains(String),
}

impl Pattern {
    pub fn matches(&self, expr: &str) -> bool {
        match self {
            Pattern::Prefix(p) => expr.starts_with(p.as_str()),
            Pattern::Exact(p) => expr == p,
            Pattern::Contains(p) => expr.contains(p.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRule {
    pub pattern: Pattern,
    pub outcome: ReturnShape,
}

impl ReturnRule {
    fn new(pattern: Pattern, outcome: ReturnShape) -> Self {
        Self { pattern, outcome }
    }
}

/// Return-type rules plus overload expansion.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    rules: Vec<ReturnRule>,
}

impl TypeMapper {
    pub fn new(catalog: &Catalog) -> Self {
        let mut rules: Vec<ReturnRule> = catalog
            .shapes
            .iter()
            .map(|shape| {
                ReturnRule::new(
                    Pattern::Prefix(shape.return_prefix.clone()),
                    ReturnShape::Dual(shape.dual()),
                )
            })
            .collect();

        rules.push(ReturnRule::new(
            Pattern::Exact("random_value".into()),
            ReturnShape::Plain(Type::Number),
        ));
        rules.push(ReturnRule::new(
            Pattern::Contains("=== 0".into()),
            ReturnShape::Plain(Type::Boolean),
        ));
        rules.push(ReturnRule::new(
            Pattern::Contains("stringify".into()),
            ReturnShape::Plain(Type::String),
        ));
        rules.push(ReturnRule::new(
            Pattern::Contains("_format_output".into()),
            ReturnShape::Dual(DualShape {
                binary: Type::Binary,
                text: Type::String,
            }),
        ));

        Self { rules }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[ReturnRule] {
        &self.rules
    }

    pub fn map_return_type(&self, expr: &str) -> ReturnShape {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(expr))
            .map(|rule| rule.outcome.clone())
            .unwrap_or_else(|| ReturnShape::Plain(Type::named(expr)))
    }

    /// Declared signatures for a function: one, or a binary/text pair.
    pub fn overloads(&self, symbol: &SymbolDescriptor) -> Vec<Overload> {
        let params: Vec<Param> = symbol
            .inputs
            .iter()
            .map(|input| Param {
                name: input.name.clone(),
                ty: map_param_type(&input.ty),
                optional: false,
            })
            .collect();

        let expr = symbol.returns.as_deref().unwrap_or("void");

        match self.map_return_type(expr) {
            ReturnShape::Plain(returns) => vec![Overload {
                params,
                format: None,
                returns,
            }],
            ReturnShape::Dual(dual) if symbol.no_output_format => vec![Overload {
                params,
                format: None,
                returns: dual.binary,
            }],
            ReturnShape::Dual(dual) => [OutputFormat::Binary, OutputFormat::Text]
                .into_iter()
                .map(|format| Overload {
                    params: params.clone(),
                    format: Some(format),
                    returns: dual.get(format).clone(),
                })
                .collect(),
        }
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new(&Catalog::libsodium())
    }
}
