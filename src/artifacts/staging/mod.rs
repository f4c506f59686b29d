//! Staging area file format
//!
//! The staging area is persisted as a single binary record under
//! `staging/state`. All integers are big-endian.
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Added entries count (4 bytes)
//!   - Removed entries count (4 bytes)
//!
//! Added entries:
//!   - Path length (2 bytes), path bytes, blob id (40 hex bytes)
//!
//! Removed entries:
//!   - Path length (2 bytes), path bytes
//!
//! Pending merge:
//!   - Flag (1 byte), followed by a commit id (40 hex bytes) when the flag is 1
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod staging_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the staging header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying staging files
pub const SIGNATURE: &str = "STAG";

/// Staging file format version
pub const VERSION: u32 = 1;
