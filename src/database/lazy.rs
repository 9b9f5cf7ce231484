use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::database::{Document, DocumentStore, StoreError, WriteResult};

/// A document store that isn't constructed until the first write
///
/// The constructed store is kept for the life of the process. If building it
/// fails the error is returned from that write and the next write tries again.
pub struct LazyDocumentStore<D, F> {
    store: OnceCell<D>,
    init: F,
}

impl<D, F> LazyDocumentStore<D, F>
where
    F: Fn() -> Result<D, StoreError>,
{
    pub fn new(init: F) -> Self {
        Self {
            store: OnceCell::new(),
            init,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.store.initialized()
    }

    async fn store(&self) -> Result<&D, StoreError> {
        self.store
            .get_or_try_init(|| async {
                tracing::info!("initialising document store client");
                (self.init)()
            })
            .await
    }
}

#[async_trait]
impl<D, F> DocumentStore for LazyDocumentStore<D, F>
where
    D: DocumentStore,
    F: Fn() -> Result<D, StoreError> + Send + Sync,
{
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: Document,
    ) -> Result<WriteResult, StoreError> {
        self.store().await?.set(collection, key, document).await
    }
}
