use crate::LoadError;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Expand input paths into the files to read.
///
/// A file is taken as is. A directory contributes the regular files directly
/// inside it (no recursion), sorted by file name. Input order is preserved.
/// A directory entry whose name is not UTF-8 is a read error.
pub fn expand_paths(paths: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>, LoadError> {
    let mut out = Vec::new();
    for path in paths {
        let meta = std::fs::metadata(path).map_err(|source| io_error(path, source))?;
        if !meta.is_dir() {
            out.push(path.clone());
            continue;
        }

        let before = out.len();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                io_error(path, source)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(|raw| {
                LoadError::Read {
                    path: raw.to_string_lossy().into_owned(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "file name is not valid UTF-8",
                    ),
                }
            })?;
            out.push(file);
        }
        tracing::debug!(dir = %path, files = out.len() - before, "expanded directory");
    }
    Ok(out)
}

pub(crate) fn io_error(path: &Utf8Path, source: std::io::Error) -> LoadError {
    if source.kind() == std::io::ErrorKind::NotFound {
        LoadError::NotFound {
            path: path.to_string(),
        }
    } else {
        LoadError::Read {
            path: path.to_string(),
            source,
        }
    }
}
