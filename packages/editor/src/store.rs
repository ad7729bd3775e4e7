//! # Document storage
//!
//! [`DocumentApi`] is the seam to wherever block collections live. The HTTP
//! implementation lives in `potatopay-client`; [`InMemoryApi`] keeps
//! everything in process.

use crate::{BlockCollection, EditorError};
use potatopay_schema::Surface;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The API answered with `success: false` or an error status
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided message when there is one, else a generic message
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message: Some(message) } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Remote storage of surface block collections
pub trait DocumentApi: Send + Sync + 'static {
    fn fetch(&self, surface: Surface) -> impl Future<Output = Result<BlockCollection, ApiError>> + Send;

    fn store(
        &self,
        surface: Surface,
        blocks: &BlockCollection,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl<A: DocumentApi> DocumentApi for Arc<A> {
    fn fetch(&self, surface: Surface) -> impl Future<Output = Result<BlockCollection, ApiError>> + Send {
        (**self).fetch(surface)
    }

    fn store(
        &self,
        surface: Surface,
        blocks: &BlockCollection,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).store(surface, blocks)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: HashMap<Surface, BlockCollection>,
    stored: Vec<(Surface, BlockCollection)>,
    fail_fetch: Option<ApiError>,
    fail_store: Option<ApiError>,
}

/// In-process [`DocumentApi`] that records every store call.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApi {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, surface: Surface, blocks: BlockCollection) -> Self {
        self.lock().documents.insert(surface, blocks);
        self
    }

    pub fn document(&self, surface: Surface) -> Option<BlockCollection> {
        self.lock().documents.get(&surface).cloned()
    }

    /// Every collection passed to `store`, oldest first
    pub fn stored(&self) -> Vec<(Surface, BlockCollection)> {
        self.lock().stored.clone()
    }

    pub fn store_count(&self) -> usize {
        self.lock().stored.len()
    }

    /// Make subsequent fetches fail with `error` (`None` restores success)
    pub fn fail_fetch(&self, error: Option<ApiError>) {
        self.lock().fail_fetch = error;
    }

    /// Make subsequent stores fail with `error` (`None` restores success)
    pub fn fail_store(&self, error: Option<ApiError>) {
        self.lock().fail_store = error;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentApi for InMemoryApi {
    async fn fetch(&self, surface: Surface) -> Result<BlockCollection, ApiError> {
        let state = self.lock();
        if let Some(error) = &state.fail_fetch {
            return Err(error.clone());
        }
        state
            .documents
            .get(&surface)
            .cloned()
            .ok_or_else(|| ApiError::Rejected {
                message: Some(format!("No {} document", surface)),
            })
    }

    async fn store(&self, surface: Surface, blocks: &BlockCollection) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.stored.push((surface, blocks.clone()));
        if let Some(error) = &state.fail_store {
            return Err(error.clone());
        }
        state.documents.insert(surface, blocks.clone());
        Ok(())
    }
}

/// Load and save surface collections through a [`DocumentApi`]
#[derive(Debug, Clone)]
pub struct BlockCollectionStore<A> {
    api: A,
}

impl<A: DocumentApi> BlockCollectionStore<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch a surface's collection; failures are logged and yield `None`
    pub async fn load(&self, surface: Surface) -> Option<BlockCollection> {
        match self.api.fetch(surface).await {
            Ok(collection) => {
                let duplicates = collection.duplicate_types();
                if !duplicates.is_empty() {
                    tracing::warn!(%surface, ?duplicates, "Duplicate block types; only the first of each is editable");
                }
                tracing::debug!(%surface, blocks = collection.len(), "Loaded block collection");
                Some(collection)
            }
            Err(e) => {
                tracing::error!(%surface, "Failed to load block collection: {}", e);
                None
            }
        }
    }

    pub async fn save(&self, surface: Surface, collection: &BlockCollection) -> Result<(), EditorError> {
        self.api.store(surface, collection).await?;
        tracing::debug!(%surface, blocks = collection.len(), "Saved block collection");
        Ok(())
    }
}
