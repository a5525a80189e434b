//! File reading
//!
//! Lossy UTF-8: binary or mixed-encoding files degrade to replacement
//! characters instead of failing the whole read.

use super::RawResult;
use codescout_core::Result;
use std::path::Path;
use tracing::info;

pub async fn run(path: &Path) -> Result<RawResult> {
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    info!("read {} ({} lines)", path.display(), lines.len());
    Ok(RawResult::new(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "one\ntwo\nthree").unwrap();
        let result = run(&file).await.unwrap();
        assert_eq!(result.items, vec!["one", "two", "three"]);
        assert_eq!(result.total_count, 3);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, codescout_core::Error::Io(_)));
    }

    #[tokio::test]
    async fn invalid_utf8_degrades_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bin");
        std::fs::write(&file, b"ok\xff\xfeline").unwrap();
        let result = run(&file).await.unwrap();
        assert_eq!(result.total_count, 1);
        assert!(result.items[0].contains('\u{FFFD}'));
    }
}
