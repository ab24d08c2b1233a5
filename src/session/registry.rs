//! Driver lifecycle registry
//!
//! Explicit per-execution-context ownership map: one slot per context, the
//! registry is the sole mutator. Per context the lifecycle is
//! `UNINITIALIZED -> ACTIVE -> CLOSED`: initialize fills the slot (idempotent
//! while active), quit empties it unconditionally.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::config::BrowserKind;
use crate::session::traits::{DriverSession, SessionFactory};
use crate::{Error, Result};

/// Identifier of one unit of test execution
///
/// Commonly one per test; a session handle is bound to exactly one context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId(String);

impl ContextId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Context derived from the calling OS thread
    pub fn for_current_thread() -> Self {
        Self(format!("{:?}", std::thread::current().id()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-context session slots plus the injected factory
pub struct DriverRegistry {
    slots: RwLock<HashMap<ContextId, Arc<dyn DriverSession>>>,
    factory: Arc<dyn SessionFactory>,
}

impl DriverRegistry {
    pub fn new(factory: Arc<dyn SessionFactory>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            factory,
        }
    }

    /// Create a session for `context`, or return the existing one
    ///
    /// Re-initializing an active context is a warning no-op returning the
    /// existing handle, so duplicate sessions cannot leak. Construction
    /// failures propagate as `DriverInit` and leave the slot empty.
    pub async fn initialize(
        &self,
        context: &ContextId,
        browser: BrowserKind,
    ) -> Result<Arc<dyn DriverSession>> {
        if let Some(existing) = self.slots.read().await.get(context) {
            warn!(%context, "WebDriver already initialized for this context");
            return Ok(existing.clone());
        }

        let session = self.factory.create(browser).await?;

        let mut slots = self.slots.write().await;
        // A concurrent initialize for the same context is outside the
        // ownership contract; keep the first session rather than leak two.
        if let Some(existing) = slots.get(context) {
            warn!(%context, "WebDriver already initialized for this context");
            let duplicate = session;
            drop(slots);
            if let Err(e) = duplicate.quit().await {
                error!(%context, error = %e, "Failed to quit duplicate session");
            }
            return self.current(context).await;
        }
        slots.insert(context.clone(), session.clone());
        info!(%context, session = session.id(), "WebDriver initialized");

        Ok(session)
    }

    /// Session handle owned by `context`
    ///
    /// Fails with `NotInitialized` while the slot is empty (never initialized,
    /// or already quit).
    pub async fn current(&self, context: &ContextId) -> Result<Arc<dyn DriverSession>> {
        self.slots
            .read()
            .await
            .get(context)
            .cloned()
            .ok_or_else(|| Error::not_initialized(context.to_string()))
    }

    /// Quit the context's session and release its slot
    ///
    /// The slot is released before the underlying close is attempted; a close
    /// failure is logged, never propagated, so a reused context can never
    /// observe a stale handle.
    pub async fn quit(&self, context: &ContextId) {
        let session = self.slots.write().await.remove(context);

        match session {
            Some(session) => {
                info!(%context, session = session.id(), "Quitting WebDriver");
                if let Err(e) = session.quit().await {
                    error!(%context, error = %e, "Error while quitting WebDriver");
                }
            }
            None => {
                warn!(%context, "Attempted to quit a context with no active WebDriver");
            }
        }
    }

    /// Whether the context currently owns a session
    pub async fn is_active(&self, context: &ContextId) -> bool {
        self.slots.read().await.contains_key(context)
    }

    /// Number of occupied slots
    pub async fn active_count(&self) -> usize {
        self.slots.read().await.len()
    }
}
