//! Declaration output.
//!
//! Takes a loaded corpus plus the catalog and produces the `.d.ts` module text.

pub mod declaration;

pub use declaration::{Assembler, ConstantDecl, Document, FunctionDecl};
