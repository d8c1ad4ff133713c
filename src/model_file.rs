//! JSON model files → `TypeModel`.
//!
//! ```json
//! {
//!   "wrap_root_value": false,
//!   "types": [
//!     { "kind": "object", "name": "com.acme.Person",
//!       "members": [ { "name": "age", "type": { "primitive": "whole_number" } } ] },
//!     { "kind": "enum", "name": "com.acme.Color", "values": ["RED", "GREEN"] }
//!   ]
//! }
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ModelError;
use crate::model::{TypeDef, TypeModel};

#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    wrap_root_value: bool,
    #[serde(default)]
    types: Vec<TypeDef>,
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str, origin: &str) -> Result<T, ModelError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| ModelError::Decode {
        origin: origin.to_string(),
        json_path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

pub fn parse_model(src: &str) -> Result<TypeModel, ModelError> {
    let mut model = TypeModel::new();
    merge_document(&mut model, src, "<inline>")?;
    check_chains(model)
}

/// Load and merge every file matched by `patterns`. Later files replace
/// earlier definitions of the same name.
pub fn load_models<I>(patterns: I) -> Result<TypeModel, ModelError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut model = TypeModel::new();
    for path in resolve_file_path_patterns(patterns)? {
        load_into(&mut model, &path)?;
    }
    check_chains(model)
}

/// Reject models whose simple-base or supertype chains loop. Runs after all
/// documents are merged, since a later file may replace a definition.
fn check_chains(model: TypeModel) -> Result<TypeModel, ModelError> {
    if let Some(name) = model.find_cycle() {
        return Err(ModelError::Cycle(name.to_string()));
    }
    Ok(model)
}

pub fn load_into(model: &mut TypeModel, path: &Path) -> Result<(), ModelError> {
    let src = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    merge_document(model, &src, &path.display().to_string())
}

fn merge_document(model: &mut TypeModel, src: &str, origin: &str) -> Result<(), ModelError> {
    let doc: ModelDocument = from_str_with_path(src, origin)?;
    model.wrap_root_value |= doc.wrap_root_value;
    for def in doc.types {
        if let Some(previous) = model.insert(def) {
            tracing::debug!(type_name = previous.name(), origin, "replacing earlier definition");
        }
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, ModelError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(ModelError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
