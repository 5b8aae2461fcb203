use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed metadata in {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("metadata in {path} is not a JSON object")]
    MetadataNotObject { path: PathBuf },
}

/// A source document parsed from a single `.rst` file.
///
/// The file starts with a JSON metadata segment terminated by a `---` line;
/// everything after the separator is the content body. A file with no
/// separator is all metadata and has an empty body.
#[derive(Debug)]
pub struct SourceDocument {
    /// The path the document was read from
    pub path: PathBuf,
    /// Parsed metadata; `None` when the metadata segment is empty or `null`
    pub metadata: Option<Map<String, Value>>,
    /// The content body, trimmed of leading/trailing blank lines
    pub content: String,
}

impl SourceDocument {
    /// Read and parse the document at `path`.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (metadata_blob, content_region) = split_at_separator(&raw);

        let metadata = if metadata_blob.trim().is_empty() {
            None
        } else {
            let value: Value =
                serde_json::from_str(metadata_blob).map_err(|source| DocumentError::Metadata {
                    path: path.to_path_buf(),
                    source,
                })?;
            match value {
                Value::Null => None,
                Value::Object(map) => Some(map),
                _ => {
                    return Err(DocumentError::MetadataNotObject {
                        path: path.to_path_buf(),
                    });
                }
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            metadata,
            content: content_region.unwrap_or("").trim().to_string(),
        })
    }
}

/// Split a raw document at the first line that trims to `---`.
///
/// Returns the metadata segment (line terminators intact, separator excluded)
/// and the content region after the separator. `None` content means the
/// separator was never found, in which case the whole file is metadata.
fn split_at_separator(raw: &str) -> (&str, Option<&str>) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        if line.trim() == "---" {
            return (&raw[..offset], Some(&raw[offset + line.len()..]));
        }
        offset += line.len();
    }
    (raw, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_doc(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_metadata_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            dir.path(),
            "contact.rst",
            "{\"title\": \"Contact us!\", \"layout\": \"base.html\"}\n---\nWrite an email to contact@example.com.\n",
        );

        let doc = SourceDocument::read(&path).unwrap();
        let metadata = doc.metadata.unwrap();
        assert_eq!(metadata["title"], "Contact us!");
        assert_eq!(metadata["layout"], "base.html");
        assert_eq!(doc.content, "Write an email to contact@example.com.");
    }

    #[test]
    fn surrounding_blank_lines_do_not_affect_content() {
        let dir = tempfile::tempdir().unwrap();
        let header = "{\"title\": \"Contact us!\", \"layout\": \"base.html\"}\n---\n";
        let body = "Write an email to contact@example.com.";

        let p1 = write_doc(dir.path(), "a.rst", &format!("{header}{body}"));
        let p2 = write_doc(dir.path(), "b.rst", &format!("{header}\n\n{body}"));
        let p3 = write_doc(dir.path(), "c.rst", &format!("{header}\n\n\n{body}\n\n\n"));

        let c1 = SourceDocument::read(&p1).unwrap().content;
        let c2 = SourceDocument::read(&p2).unwrap().content;
        let c3 = SourceDocument::read(&p3).unwrap().content;

        assert_eq!(c1, body);
        assert_eq!(c1, c2);
        assert_eq!(c2, c3);
    }

    #[test]
    fn content_trimming_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "a.rst", "{}\n---\n\n  body text  \n\n");

        let content = SourceDocument::read(&path).unwrap().content;
        assert_eq!(content.trim(), content);
    }

    #[test]
    fn empty_metadata_segment_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "a.rst", "---\nJust content.\n");

        let doc = SourceDocument::read(&path).unwrap();
        assert!(doc.metadata.is_none());
        assert_eq!(doc.content, "Just content.");
    }

    #[test]
    fn whitespace_only_metadata_segment_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "a.rst", "\n  \n---\nContent.\n");

        let doc = SourceDocument::read(&path).unwrap();
        assert!(doc.metadata.is_none());
        assert_eq!(doc.content, "Content.");
    }

    #[test]
    fn explicit_null_metadata_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "a.rst", "null\n---\nContent.\n");

        let doc = SourceDocument::read(&path).unwrap();
        assert!(doc.metadata.is_none());
    }

    #[test]
    fn missing_separator_means_whole_file_is_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "a.rst", "{\"layout\": \"base.html\"}\n");

        let doc = SourceDocument::read(&path).unwrap();
        assert_eq!(doc.metadata.unwrap()["layout"], "base.html");
        assert_eq!(doc.content, "");
    }

    #[test]
    fn malformed_metadata_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "broken.rst", "{\"title\": }\n---\nContent.\n");

        let err = SourceDocument::read(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Metadata { .. }));
        assert!(err.to_string().contains("broken.rst"));
    }

    #[test]
    fn non_object_metadata_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "a.rst", "[1, 2, 3]\n---\nContent.\n");

        let err = SourceDocument::read(&path).unwrap_err();
        assert!(matches!(err, DocumentError::MetadataNotObject { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceDocument::read(&dir.path().join("absent.rst")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn separator_matching_ignores_surrounding_whitespace() {
        assert_eq!(split_at_separator("{}\n  ---  \nbody\n"), ("{}\n", Some("body\n")));
        assert_eq!(split_at_separator("{}\n---"), ("{}\n", Some("")));
    }

    #[test]
    fn longer_dash_runs_are_not_separators() {
        let (metadata, content) = split_at_separator("{}\n----\nbody\n");
        assert_eq!(metadata, "{}\n----\nbody\n");
        assert!(content.is_none());
    }

    #[test]
    fn only_first_separator_splits() {
        let (metadata, content) = split_at_separator("{}\n---\none\n---\ntwo\n");
        assert_eq!(metadata, "{}\n");
        assert_eq!(content, Some("one\n---\ntwo\n"));
    }
}
