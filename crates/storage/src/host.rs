use async_trait::async_trait;
use std::sync::Arc;

use crate::repository::{StorageBackend, StorageError, StudentRecord};

/// Storage capability an embedding host can provide.
///
/// When the application runs inside a shell that owns durable storage, the
/// shell injects an implementation of this trait and the engine uses it
/// exclusively, never touching the local store.
#[async_trait]
pub trait HostStorage: Send + Sync {
    /// Persist the roster. `Ok(false)` means the host declined the write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the host call itself fails.
    async fn save_roster(&self, roster: &[StudentRecord]) -> Result<bool, StorageError>;

    /// Load the previously stored roster. `Ok(None)` means no prior data.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the host call itself fails.
    async fn load_roster(&self) -> Result<Option<Vec<StudentRecord>>, StorageError>;
}

/// Backend over an injected [`HostStorage`] capability.
pub struct HostBridgeBackend {
    bridge: Arc<dyn HostStorage>,
}

impl HostBridgeBackend {
    #[must_use]
    pub fn new(bridge: Arc<dyn HostStorage>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl StorageBackend for HostBridgeBackend {
    async fn save_roster(&self, roster: &[StudentRecord]) -> Result<(), StorageError> {
        if self.bridge.save_roster(roster).await? {
            Ok(())
        } else {
            Err(StorageError::WriteRejected)
        }
    }

    async fn load_roster(&self) -> Result<Option<Vec<StudentRecord>>, StorageError> {
        self.bridge.load_roster().await
    }
}
