use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::types::PublishError;

/// Read the whole content file as UTF-8.
///
/// A missing file is reported as `ContentNotFound`; every other I/O problem
/// (permissions, invalid UTF-8, directories) as `ContentRead`.
pub fn load_content(path: impl AsRef<Path>) -> Result<String, PublishError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("Loaded {} bytes from {}", content.len(), path.display());
            Ok(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(PublishError::ContentNotFound(path.to_path_buf()))
        }
        Err(source) => Err(PublishError::ContentRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# 제목\n\n본문").unwrap();

        let content = load_content(file.path()).unwrap();
        assert_eq!(content, "# 제목\n\n본문");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = load_content(&path).unwrap_err();
        assert!(matches!(err, PublishError::ContentNotFound(p) if p == path));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0xfd]).unwrap();

        let err = load_content(file.path()).unwrap_err();
        assert!(matches!(err, PublishError::ContentRead { .. }));
    }
}
