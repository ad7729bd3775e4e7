//! # Autosave Controller
//!
//! Dirty tracking and debounced persistence for one surface.
//!
//! ```text
//!            mutation (dirty)            debounce elapsed / save_now
//!   Clean ─────────────────────▶ Dirty ─────────────────────────────▶ Saving
//!     ▲                           ▲  ▲                                  │
//!     │ mutation (clean again)    │  └──────── failure ─────────────────┤
//!     └───────────────────────────┘                                     │
//!                                        Saved ◀──────── success ───────┘
//! ```
//!
//! - Every mutation while dirty and enabled restarts the debounce timer, so
//!   rapid edits coalesce into one save of the state at fire time.
//! - Disabling autosave cancels the pending timer and keeps the dirty flag.
//! - A save that has started is never cancelled; edits made meanwhile stay
//!   dirty and schedule their own save.
//! - Autosave failures are only logged. Manual saves publish [`Notice`]s and
//!   return their error.
//! - There is no retry; the next mutation or manual save tries again.

use crate::{BlockCollection, BlockCollectionStore, BlockMutation, DocumentApi, EditorError, SurfaceSession};
use potatopay_schema::Surface;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

const NOTICE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Clean,
    Dirty,
    Saving,
    /// Last save succeeded and nothing changed since
    Saved,
}

/// User-facing notifications of manual saves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ManualSaveStarted,
    ManualSaveSucceeded,
    ManualSaveFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveConfig {
    pub debounce: Duration,
    pub enabled: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            enabled: true,
        }
    }
}

struct State {
    session: SurfaceSession,
    enabled: bool,

    /// Sleeping debounce task, if any
    pending: Option<AbortHandle>,

    /// Bumped whenever the pending timer is superseded
    generation: u64,

    /// Sequence numbers of started and of applied saves
    save_seq: u64,
    applied_seq: u64,
}

impl State {
    fn cancel_pending(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

struct Shared<A: DocumentApi> {
    store: BlockCollectionStore<A>,
    surface: Surface,
    debounce: Duration,
    state: Mutex<State>,
    status: watch::Sender<SaveStatus>,
    notices: broadcast::Sender<Notice>,
}

impl<A: DocumentApi> Shared<A> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Recompute status after a change and (re)arm the debounce timer
    fn changed(self: &Arc<Self>, state: &mut State) {
        state.cancel_pending();

        let dirty = state.session.is_dirty();
        self.status
            .send_replace(if dirty { SaveStatus::Dirty } else { SaveStatus::Clean });

        if !(dirty && state.enabled) {
            return;
        }

        let generation = state.generation;
        let shared = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            shared.autosave(generation).await;
        });
        state.pending = Some(handle.abort_handle());
        tracing::debug!(surface = %self.surface, version = state.session.version(), "Autosave scheduled");
    }

    /// Snapshot the working collection for a save and mark it in flight
    fn begin_save(&self, state: &mut State) -> (BlockCollection, String, u64) {
        let (collection, serialized) = state.session.snapshot();
        state.save_seq += 1;
        self.status.send_replace(SaveStatus::Saving);
        (collection, serialized, state.save_seq)
    }

    /// `saved` is the sent serialization on success, `None` on failure
    fn finish_save(&self, saved: Option<String>, seq: u64) {
        let mut state = self.lock();
        if let Some(serialized) = saved {
            if seq > state.applied_seq {
                state.applied_seq = seq;
                state.session.mark_saved(serialized);
            }
        }

        let status = match (state.session.is_dirty(), seq <= state.applied_seq) {
            (true, _) => SaveStatus::Dirty,
            (false, true) => SaveStatus::Saved,
            (false, false) => SaveStatus::Clean,
        };
        self.status.send_replace(status);
    }

    async fn autosave(self: Arc<Self>, generation: u64) {
        let (collection, serialized, seq) = {
            let mut state = self.lock();
            if state.generation != generation {
                return;
            }
            // From here on the save belongs to no timer and cannot be aborted
            state.pending = None;
            if !state.session.is_dirty() {
                return;
            }
            self.begin_save(&mut state)
        };

        tracing::debug!(surface = %self.surface, "Autosaving");
        match self.store.save(self.surface, &collection).await {
            Ok(()) => self.finish_save(Some(serialized), seq),
            Err(e) => {
                tracing::error!(surface = %self.surface, "Autosave failed: {}", e);
                self.finish_save(None, seq);
            }
        }
    }
}

/// Owns one surface's editing session and its debounced persistence.
///
/// Must be used from within a tokio runtime. Dropping the controller cancels
/// a pending (not yet started) autosave.
pub struct AutosaveController<A: DocumentApi> {
    shared: Arc<Shared<A>>,
}

impl<A: DocumentApi> AutosaveController<A> {
    /// Fetch the surface and start clean; `None` if the fetch failed
    pub async fn load(api: A, surface: Surface, config: AutosaveConfig) -> Option<Self> {
        let store = BlockCollectionStore::new(api);
        let collection = store.load(surface).await?;
        Some(Self::with_collection(store, surface, collection, config))
    }

    /// Start clean from an already loaded collection
    pub fn with_collection(
        store: BlockCollectionStore<A>,
        surface: Surface,
        collection: BlockCollection,
        config: AutosaveConfig,
    ) -> Self {
        let (status, _) = watch::channel(SaveStatus::Clean);
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        let state = State {
            session: SurfaceSession::new(surface, collection),
            enabled: config.enabled,
            pending: None,
            generation: 0,
            save_seq: 0,
            applied_seq: 0,
        };

        Self {
            shared: Arc::new(Shared {
                store,
                surface,
                debounce: config.debounce,
                state: Mutex::new(state),
                status,
                notices,
            }),
        }
    }

    pub fn surface(&self) -> Surface {
        self.shared.surface
    }

    pub fn apply(&self, mutation: &BlockMutation) -> Result<(), EditorError> {
        let mut state = self.shared.lock();
        state.session.apply(mutation)?;
        self.shared.changed(&mut state);
        Ok(())
    }

    /// Swap in a whole new collection
    pub fn replace(&self, collection: BlockCollection) {
        let mut state = self.shared.lock();
        state.session.replace(collection);
        self.shared.changed(&mut state);
    }

    /// Disabling cancels the pending autosave; re-enabling waits for the next change
    pub fn set_autosave(&self, enabled: bool) {
        let mut state = self.shared.lock();
        state.enabled = enabled;
        if !enabled {
            state.cancel_pending();
        }
        tracing::debug!(surface = %self.shared.surface, enabled, "Autosave toggled");
    }

    pub fn autosave_enabled(&self) -> bool {
        self.shared.lock().enabled
    }

    /// Save immediately, regardless of the autosave toggle
    pub async fn save_now(&self) -> Result<(), EditorError> {
        let (collection, serialized, seq) = {
            let mut state = self.shared.lock();
            state.cancel_pending();
            self.shared.begin_save(&mut state)
        };
        let _ = self.shared.notices.send(Notice::ManualSaveStarted);

        match self.shared.store.save(self.shared.surface, &collection).await {
            Ok(()) => {
                self.shared.finish_save(Some(serialized), seq);
                let _ = self.shared.notices.send(Notice::ManualSaveSucceeded);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(surface = %self.shared.surface, "Manual save failed: {}", e);
                self.shared.finish_save(None, seq);
                let _ = self.shared.notices.send(Notice::ManualSaveFailed {
                    message: e.user_message(),
                });
                Err(e)
            }
        }
    }

    pub fn status(&self) -> SaveStatus {
        *self.shared.status.borrow()
    }

    pub fn is_dirty(&self) -> bool {
        self.shared.lock().session.is_dirty()
    }

    pub fn version(&self) -> u64 {
        self.shared.lock().session.version()
    }

    pub fn collection(&self) -> BlockCollection {
        self.shared.lock().session.collection().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.shared.status.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.shared.notices.subscribe()
    }

    /// Cancel the pending autosave. A save already in flight completes.
    pub fn shutdown(&self) {
        self.shared.lock().cancel_pending();
    }
}

impl<A: DocumentApi> Drop for AutosaveController<A> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
