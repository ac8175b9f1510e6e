use crate::domain::document::StudentDocument;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load_document(&self, path: &str) -> Result<StudentDocument>;
    async fn save_document(&self, path: &str, document: &StudentDocument) -> Result<()>;
}
