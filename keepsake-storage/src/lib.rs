//! Storage seam for Keepsake.
//!
//! Couples the field-level codec from `keepsake-crypto` with an opaque
//! id-keyed record store. Backends implement [`RecordStore`] and stay
//! blind to record contents.

mod error;
mod record_store;
mod vault;

pub use error::{StorageError, StorageResult};
pub use record_store::{MemoryRecordStore, RecordStore};
pub use vault::SecretVault;
