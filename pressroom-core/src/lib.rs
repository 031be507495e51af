pub mod repository;
pub mod template;

pub use repository::{CatalogStore, TemplateStore};
pub use template::AuthoringTemplate;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage backend error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
