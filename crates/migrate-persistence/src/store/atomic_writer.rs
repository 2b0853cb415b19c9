use migrate_core::MigrateResult;
use std::path::Path;
use tokio::fs;

/// Writes files through a temporary sibling and a rename, so readers never
/// see a half-written audit.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Replaces `path` with `data`, creating missing parent directories.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> MigrateResult<()> {
        // Temp file must share the target's filesystem for the rename
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).await?;

        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    pub async fn read_all(path: &Path) -> MigrateResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("audit.json");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let read_data = AtomicWriter::read_all(&file_path).await.unwrap();
        assert_eq!(read_data, b"Second");
    }

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("runs").join("today").join("audit.json");

        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();

        assert!(file_path.exists());
        let leftovers = std::fs::read_dir(file_path.parent().unwrap())
            .unwrap()
            .count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = AtomicWriter::read_all(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(migrate_core::MigrateError::Io(_))));
    }
}
