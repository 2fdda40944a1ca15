//! Object loader: read manifest files and decode them into typed objects and policies.
//!
//! This crate is allowed to do filesystem IO. Files are parsed in parallel; the
//! returned objects always follow input path order, then document order.

#![forbid(unsafe_code)]

mod decode;
mod discover;
mod error;
mod policy;

use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use vapguard_domain::{GroupVersionKind, TypeRegistry, TypedObject, Value, parse_api_version};
use vapguard_types::ManifestPath;

pub use decode::{Document, parse_documents};
pub use discover::expand_paths;
pub use error::LoadError;
pub use policy::{PolicyBinding, PolicySet};

/// Fuzz-friendly API for testing decoding robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a target manifest and return the number of objects.
    pub fn parse_manifest(text: &str) -> Result<usize, LoadError> {
        let docs = decode::parse_documents("fuzz.yaml", text)?;
        Ok(docs.len())
    }

    /// Parse arbitrary text as a policy manifest.
    pub fn parse_policies(text: &str) -> Result<PolicySet, LoadError> {
        let source = ManifestPath::new("fuzz.yaml");
        let docs = decode::parse_documents(source.as_str(), text)?;
        let mut set = PolicySet::default();
        policy::collect_policy_documents(&source, docs, &mut set)?;
        Ok(set)
    }
}

/// Load every target object under `paths`.
///
/// Objects that carry `apiVersion` and `kind` must name a type known to
/// `registry`; objects without type metadata are passed through for shape
/// inference by the resolver.
pub fn load_objects(
    paths: &[Utf8PathBuf],
    registry: &TypeRegistry,
) -> Result<Vec<TypedObject>, LoadError> {
    let files = expand_paths(paths)?;
    let per_file: Vec<Result<Vec<TypedObject>, LoadError>> = files
        .par_iter()
        .map(|file| load_object_file(file, registry))
        .collect();

    let mut out = Vec::new();
    for objects in per_file {
        out.extend(objects?);
    }
    tracing::debug!(files = files.len(), objects = out.len(), "loaded targets");
    Ok(out)
}

/// Load every `ValidatingAdmissionPolicy` and binding under `paths`.
pub fn load_policies(paths: &[Utf8PathBuf]) -> Result<PolicySet, LoadError> {
    let files = expand_paths(paths)?;
    let per_file: Vec<Result<(ManifestPath, Vec<Document>), LoadError>> = files
        .par_iter()
        .map(|file| read_documents(file).map(|docs| (ManifestPath::from(file.as_path()), docs)))
        .collect();

    let mut set = PolicySet::default();
    for parsed in per_file {
        let (source, docs) = parsed?;
        policy::collect_policy_documents(&source, docs, &mut set)?;
    }
    tracing::debug!(
        files = files.len(),
        policies = set.policies.len(),
        bindings = set.bindings.len(),
        "loaded policies"
    );
    Ok(set)
}

fn read_documents(file: &Utf8Path) -> Result<Vec<Document>, LoadError> {
    tracing::debug!(path = %file, "reading manifest");
    let text = std::fs::read_to_string(file).map_err(|source| discover::io_error(file, source))?;
    decode::parse_documents(file.as_str(), &text)
}

fn load_object_file(
    file: &Utf8Path,
    registry: &TypeRegistry,
) -> Result<Vec<TypedObject>, LoadError> {
    let source = ManifestPath::from(file);
    let mut out = Vec::new();
    for doc in read_documents(file)? {
        if !doc.value.is_object() {
            return Err(LoadError::Decode {
                path: source.to_string(),
                document: doc.index,
                reason: "expected a mapping at the document root".to_string(),
            });
        }
        let obj = TypedObject::new(source.clone(), Value::from(doc.value));
        if let (Some(api_version), Some(kind)) = (obj.api_version.as_deref(), obj.kind.as_deref()) {
            let (group, version) = parse_api_version(api_version);
            if !registry.contains(&GroupVersionKind::new(&group, &version, kind)) {
                return Err(LoadError::UnknownType {
                    path: source.to_string(),
                    kind: kind.to_string(),
                    version: api_version.to_string(),
                });
            }
        }
        out.push(obj);
    }
    Ok(out)
}
