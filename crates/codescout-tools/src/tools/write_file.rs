//! File writing
//!
//! Creates parent directories as needed and reports bytes written.
//! `total_count` counts bytes here, not items; the single status line is
//! the whole payload.

use super::RawResult;
use codescout_core::Result;
use std::path::Path;
use tracing::info;

pub async fn run(path: &Path, content: &str) -> Result<RawResult> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;

    let bytes = content.len();
    info!("wrote {} bytes to {}", bytes, path.display());
    Ok(RawResult {
        total_count: bytes,
        items: vec![format!("Wrote {} bytes to {}", bytes, path.display())],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");
        let result = run(&file, "hello").await.unwrap();
        assert_eq!(result.total_count, 5);
        assert_eq!(result.items.len(), 1);
        assert!(result.items[0].contains("5 bytes"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deep/nested/out.txt");
        run(&file, "x").await.unwrap();
        assert!(file.exists());
    }

    #[tokio::test]
    async fn overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");
        run(&file, "first version").await.unwrap();
        run(&file, "second").await.unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "second");
    }
}
