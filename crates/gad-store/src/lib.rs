//! GAD Databank binary object store
//!
//! Durable keyed storage for raw uploaded file bytes, addressable only by
//! submission id.
//!
//! # Core Concepts
//!
//! - [`BlobStore`]: one JSON document per submission id under a local
//!   directory, written atomically (temp file + rename)
//! - [`StoredBlob`]: the persisted value, reversibly encoded content plus
//!   the original file name, content type and byte length
//! - [`StoreError`]: quota and serialization failures are distinguishable so
//!   a caller can abort a whole submission instead of leaving a metadata
//!   record with no backing bytes
//!
//! The store never enumerates itself for business logic; listing and
//! filtering belong to the metadata registry. `get` exists for the viewer
//! and for tests.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod blob;
mod error;
pub mod persist;
mod store;

pub use blob::StoredBlob;
pub use error::StoreError;
pub use store::{BlobStore, StoreConfig};
