//! Content-addressed objects
//!
//! Two kinds of objects live in the object store:
//!
//! - **Blob**: the raw bytes of one tracked file version
//! - **Commit**: a message, a timestamp, up to two parents and a tree mapping
//!   paths to blob ids
//!
//! An object's id is the SHA-1 of its serialized form. Blobs serialize to their
//! raw content, so a blob id is the digest of the file bytes themselves.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
