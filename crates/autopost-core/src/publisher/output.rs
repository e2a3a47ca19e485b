use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::types::{PublishError, PublishResult};

/// Append `post_id=` and `post_url=` lines to a CI step output file.
pub fn append_outputs(path: &Path, result: &PublishResult) -> Result<(), PublishError> {
    let sink_error = |source| PublishError::OutputSink {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(sink_error)?;

    write!(
        file,
        "post_id={}\npost_url={}\n",
        result.post_id, result.post_url
    )
    .map_err(sink_error)?;

    info!("Wrote step outputs to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_after_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "previous=1\n").unwrap();

        let result = PublishResult {
            post_id: "42".to_string(),
            post_url: "http://x/42".to_string(),
        };
        append_outputs(&path, &result).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "previous=1\npost_id=42\npost_url=http://x/42\n");
    }

    #[test]
    fn test_unwritable_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("output");
        let result = PublishResult {
            post_id: "1".to_string(),
            post_url: "u".to_string(),
        };

        let err = append_outputs(&path, &result).unwrap_err();
        assert!(matches!(err, PublishError::OutputSink { .. }));
    }
}
