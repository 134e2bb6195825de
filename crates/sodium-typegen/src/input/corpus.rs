//! Loading symbol and constant descriptors from a corpus root.

use super::source::{constants_file, entry_paths, symbols_dir};
use crate::catalog::Catalog;
use crate::descriptor::{ConstantDescriptor, Corpus, SymbolDescriptor};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Read every symbol file and the constants file under `root`, merge in the catalog's
/// auxiliary symbols and `ready` constant, and sort both collections by name.
///
/// Symbol files are parsed in parallel; the first failure aborts the load.
pub fn load_corpus(root: &Path, catalog: &Catalog) -> Result<Corpus> {
    let mut functions = load_symbols(root)?;
    functions.extend(catalog.auxiliary_symbols.iter().cloned());
    functions.sort_by(|a, b| a.name.cmp(&b.name));
    ensure_unique(&functions, root)?;

    let mut constants = load_constants(root)?;
    constants.push(catalog.ready.clone());
    constants.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        functions = functions.len(),
        constants = constants.len(),
        "corpus loaded"
    );

    Ok(Corpus {
        functions,
        constants,
    })
}

fn load_symbols(root: &Path) -> Result<Vec<SymbolDescriptor>> {
    let dir = symbols_dir(root);
    let entries = fs::read_dir(&dir)
        .map_err(|_| Error::integrity(&dir, "symbols directory not found"))?;

    let files: Vec<PathBuf> = entry_paths(&dir, entries.map(|e| e.map(|e| e.path())))?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();

    files.par_iter().map(|path| parse_symbol(path)).collect()
}

fn parse_symbol(path: &Path) -> Result<SymbolDescriptor> {
    let raw = fs::read_to_string(path).map_err(|e| Error::parse(path, e))?;
    serde_json::from_str(&raw).map_err(|e| Error::parse(path, e))
}

fn load_constants(root: &Path) -> Result<Vec<ConstantDescriptor>> {
    let path = constants_file(root);
    let raw = fs::read_to_string(&path).map_err(|e| Error::parse(&path, e))?;
    serde_json::from_str(&raw).map_err(|e| Error::parse(&path, e))
}

/// Names must be unique across corpus and auxiliary symbols.
fn ensure_unique(functions: &[SymbolDescriptor], root: &Path) -> Result<()> {
    let mut seen = HashSet::new();
    for f in functions {
        if !seen.insert(f.name.as_str()) {
            return Err(Error::integrity(
                symbols_dir(root),
                format!("duplicate symbol name \"{}\"", f.name),
            ));
        }
    }
    Ok(())
}
