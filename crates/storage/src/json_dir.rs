use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{Question, QuizFile, QuizFileHeader, QuizId, sort_newest_first};
use tracing::{debug, warn};

use crate::repository::{QuestionStore, QuizWriter, StorageError};

/// Quiz files kept as individual `*.json` documents in one directory.
///
/// Every read rescans the directory so files dropped in while the app is
/// running show up on the next listing. Files that fail to parse are skipped.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

fn io_err(e: io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

impl JsonDirStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every parseable quiz file, in file-name order.
    ///
    /// A missing directory counts as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory exists but cannot be listed.
    pub async fn load_all(&self) -> Result<Vec<QuizFile>, StorageError> {
        let entries = self.scan().await?;
        Ok(entries.into_iter().map(|(_, file)| file).collect())
    }

    /// Parseable quiz files together with the path each was read from.
    async fn scan(&self) -> Result<Vec<(PathBuf, QuizFile)>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(root = %self.root.display(), "quiz directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_err(e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match read_quiz_file(&path).await {
                Ok(file) => files.push((path, file)),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable quiz file");
                }
            }
        }
        debug!(root = %self.root.display(), count = files.len(), "scanned quiz directory");
        Ok(files)
    }

    fn path_for(&self, id: &QuizId) -> PathBuf {
        self.root.join(format!("{}.json", file_stem_for(id)))
    }

    /// Where a save of `id` lands: the file already holding that id, or
    /// the id's own encoded file name.
    async fn target_for(&self, id: &QuizId) -> Result<PathBuf, StorageError> {
        let entries = self.scan().await?;
        if let Some((path, _)) = entries.iter().find(|(_, file)| file.id == *id) {
            return Ok(path.clone());
        }

        let path = self.path_for(id);
        if let Some((_, other)) = entries.iter().find(|(existing, _)| *existing == path) {
            warn!(path = %path.display(), quiz = %id, holder = %other.id, "file name taken by another quiz");
            return Err(StorageError::Conflict(other.id.to_string()));
        }
        Ok(path)
    }
}

async fn read_quiz_file(path: &Path) -> Result<QuizFile, StorageError> {
    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// File names keep ASCII letters, digits and `-`; every other byte becomes
/// `_XX` (uppercase hex), so distinct ids never share a file.
fn file_stem_for(id: &QuizId) -> String {
    let mut stem = String::with_capacity(id.as_str().len());
    for byte in id.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02X}"));
        }
    }
    stem
}

#[async_trait]
impl QuestionStore for JsonDirStore {
    async fn list_headers(&self) -> Result<Vec<QuizFileHeader>, StorageError> {
        let mut headers: Vec<_> = self.load_all().await?.iter().map(QuizFile::header).collect();
        sort_newest_first(&mut headers);
        Ok(headers)
    }

    async fn load_by_id(&self, id: &QuizId) -> Result<Option<Vec<Question>>, StorageError> {
        let found = self
            .load_all()
            .await?
            .into_iter()
            .find(|file| file.id == *id)
            .map(|file| file.questions);
        Ok(found)
    }
}

#[async_trait]
impl QuizWriter for JsonDirStore {
    async fn save_quiz(&self, quiz: &QuizFile) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;
        let body = serde_json::to_vec_pretty(quiz)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let path = self.target_for(&quiz.id).await?;
        tokio::fs::write(&path, body).await.map_err(io_err)?;
        debug!(path = %path.display(), "wrote quiz file");
        Ok(())
    }
}
