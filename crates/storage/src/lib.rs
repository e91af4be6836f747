#![forbid(unsafe_code)]

//! Persistence for the roster snapshot: the backend contract, the two
//! interchangeable backends, and the adapter that hides both behind a
//! never-failing load/save surface.

pub mod adapter;
pub mod host;
pub mod repository;
pub mod sqlite;

pub use adapter::PersistenceAdapter;
pub use host::{HostBridgeBackend, HostStorage};
pub use repository::{InMemoryBackend, StorageBackend, StorageError, StudentRecord};
pub use sqlite::{LocalKeyValueBackend, SqliteInitError};
