use crate::LoadError;
use serde::Deserialize;

/// A non-empty document and its 1-based position in the file.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub index: usize,
    pub value: serde_json::Value,
}

/// Split a manifest file into documents.
///
/// `.json` files are read as a stream of JSON values; everything else as
/// `---`-separated YAML. Empty documents are dropped.
pub fn parse_documents(path: &str, text: &str) -> Result<Vec<Document>, LoadError> {
    if path.ends_with(".json") {
        parse_json_stream(path, text)
    } else {
        parse_yaml_stream(path, text)
    }
}

fn parse_yaml_stream(path: &str, text: &str) -> Result<Vec<Document>, LoadError> {
    let mut out = Vec::new();
    for (i, de) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value =
            serde_json::Value::deserialize(de).map_err(|source| LoadError::Malformed {
                path: path.to_string(),
                document: i + 1,
                source: Box::new(source),
            })?;
        if !value.is_null() {
            out.push(Document {
                index: i + 1,
                value,
            });
        }
    }
    Ok(out)
}

fn parse_json_stream(path: &str, text: &str) -> Result<Vec<Document>, LoadError> {
    let mut out = Vec::new();
    let stream = serde_json::Deserializer::from_str(text).into_iter::<serde_json::Value>();
    for (i, value) in stream.enumerate() {
        let value = value.map_err(|source| LoadError::Malformed {
            path: path.to_string(),
            document: i + 1,
            source: Box::new(source),
        })?;
        if !value.is_null() {
            out.push(Document {
                index: i + 1,
                value,
            });
        }
    }
    Ok(out)
}
