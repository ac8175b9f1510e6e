use crate::domain::document::StudentDocument;
use crate::domain::ports::{DocumentStore, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

const EMPTY_DOCUMENT: &[u8] = b"{}";

/// Loads and saves student documents as pretty-printed JSON through a [`Storage`].
#[derive(Debug, Clone)]
pub struct JsonDocumentStore<S: Storage> {
    storage: S,
}

impl<S: Storage> JsonDocumentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> DocumentStore for JsonDocumentStore<S> {
    /// A path that does not exist yet is created holding an empty object.
    async fn load_document(&self, path: &str) -> Result<StudentDocument> {
        if !self.storage.exists(path).await {
            tracing::info!("📄 {} does not exist, creating it", path);
            self.storage.write_file(path, EMPTY_DOCUMENT).await?;
            return Ok(StudentDocument::new());
        }

        let data = self.storage.read_file(path).await?;
        let document = StudentDocument::from_slice(&data)?;
        tracing::debug!("Loaded {} bytes from {}", data.len(), path);
        Ok(document)
    }

    async fn save_document(&self, path: &str, document: &StudentDocument) -> Result<()> {
        let data = document.to_vec_pretty()?;
        self.storage.write_file(path, &data).await?;
        tracing::info!("💾 Saved document to {}", path);
        Ok(())
    }
}
