use std::sync::Arc;

use classtrack_core::model::Roster;

use crate::host::{HostBridgeBackend, HostStorage};
use crate::repository::{StorageBackend, StorageError, StudentRecord};
use crate::sqlite::{LocalKeyValueBackend, SqliteInitError};

/// Loads the roster at startup and persists it after every mutation.
///
/// Wraps whichever backend was selected at startup. Loading never fails:
/// any backend error or unreadable snapshot degrades to the seed roster.
/// Saving is best-effort: failures are logged at warn level, swallowed, and
/// never retried.
#[derive(Clone)]
pub struct PersistenceAdapter {
    backend: Arc<dyn StorageBackend>,
}

impl PersistenceAdapter {
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Selects the backend once: the host-provided capability when present,
    /// the local key/value store otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the local store cannot be opened.
    pub async fn detect(
        host: Option<Arc<dyn HostStorage>>,
        database_url: &str,
    ) -> Result<Self, SqliteInitError> {
        let backend: Arc<dyn StorageBackend> = match host {
            Some(bridge) => Arc::new(HostBridgeBackend::new(bridge)),
            None => Arc::new(LocalKeyValueBackend::open(database_url).await?),
        };
        Ok(Self::new(backend))
    }

    /// Loads the roster, substituting the seed roster when the backend has
    /// no data or fails.
    pub async fn load(&self) -> Roster {
        match self.backend.load_roster().await {
            Ok(Some(records)) => match into_roster(records) {
                Ok(roster) => roster,
                Err(err) => {
                    tracing::warn!(error = %err, "stored roster is unreadable, using seed data");
                    Roster::seed()
                }
            },
            Ok(None) => Roster::seed(),
            Err(err) => {
                tracing::warn!(error = %err, "roster load failed, using seed data");
                Roster::seed()
            }
        }
    }

    /// Writes a full roster snapshot and waits for the backend to finish.
    pub async fn save(&self, roster: &Roster) {
        let records = to_records(roster);
        if let Err(err) = self.backend.save_roster(&records).await {
            tracing::warn!(error = %err, "roster save failed");
        }
    }

    /// Fire-and-forget variant of [`save`](Self::save).
    ///
    /// The snapshot is taken synchronously; the write runs on a detached
    /// task. Overlapping detached saves may complete out of order; the
    /// persisted copy is last-write-wins.
    pub fn save_detached(&self, roster: &Roster) {
        let records = to_records(roster);
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Err(err) = backend.save_roster(&records).await {
                tracing::warn!(error = %err, "roster save failed");
            }
        });
    }
}

fn to_records(roster: &Roster) -> Vec<StudentRecord> {
    roster.iter().map(StudentRecord::from_student).collect()
}

fn into_roster(records: Vec<StudentRecord>) -> Result<Roster, StorageError> {
    let students = records
        .into_iter()
        .map(|record| {
            record
                .into_student()
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Roster::new(students))
}
