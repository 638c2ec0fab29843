//! Resume file storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Destination for uploaded resumes.
#[async_trait]
pub trait ResumeStorage: Send + Sync {
    /// Persist a resume and return the path it is reachable under.
    async fn save(&self, student_id: Uuid, contents: &[u8]) -> std::io::Result<String>;
}

/// Stores resumes as `<dir>/<student_id>.pdf` on the local disk.
///
/// Re-uploading overwrites the previous file.
#[derive(Debug, Clone)]
pub struct LocalResumeStorage {
    dir: PathBuf,
}

impl LocalResumeStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ResumeStorage for LocalResumeStorage {
    async fn save(&self, student_id: Uuid, contents: &[u8]) -> std::io::Result<String> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(format!("{student_id}.pdf"));
        let mut file = fs::File::create(&path).await?;
        file.write_all(contents).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Resume stored");
        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = std::env::temp_dir().join(format!("cscoupler-test-{}", Uuid::new_v4()));
        let storage = LocalResumeStorage::new(&dir);
        let student_id = Uuid::new_v4();

        let path = storage.save(student_id, b"%PDF-1.4 test").await.unwrap();

        assert!(path.ends_with(&format!("{student_id}.pdf")));
        assert_eq!(fs::read(&path).await.unwrap(), b"%PDF-1.4 test");

        let _ = fs::remove_dir_all(&dir).await;
    }
}
