use std::fs::ReadDir;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Lazily yields the `.rst` source files in a directory.
///
/// Single level, no recursion. Extension matching is case-sensitive, so
/// `page.RST` is not a source file. Entries come back in directory-listing
/// order; callers must not rely on any particular ordering. The scan is
/// single-pass; rescanning means constructing a new `SourceScan`.
#[derive(Debug)]
pub struct SourceScan {
    dir: PathBuf,
    entries: ReadDir,
}

impl SourceScan {
    pub fn new(dir: &Path) -> Result<Self, SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|source| SourceError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }
}

impl Iterator for SourceScan {
    type Item = Result<PathBuf, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(SourceError::ReadEntry {
                        path: self.dir.clone(),
                        source,
                    }));
                }
            };

            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "rst") {
                continue;
            }

            match entry.file_type() {
                Ok(file_type) if file_type.is_file() => return Some(Ok(path)),
                Ok(_) => continue,
                Err(source) => {
                    return Some(Err(SourceError::ReadEntry {
                        path: self.dir.clone(),
                        source,
                    }));
                }
            }
        }
    }
}
