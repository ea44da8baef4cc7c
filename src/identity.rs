//! Package identity generation.
//!
//! Every run gets a fresh `urn:uuid:` identifier and a UTC modification
//! timestamp. Both are embedded in the package manifest and the legacy table
//! of contents but never persisted anywhere else.

use chrono::Utc;
use uuid::Uuid;

/// Identifier and timestamp for one packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// `urn:uuid:` + lowercase hyphenated v4 UUID.
    pub identifier: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`, UTC.
    pub modified: String,
}

impl PackageIdentity {
    /// Generate a fresh identity from OS randomness and the current UTC time.
    pub fn generate() -> Self {
        Self {
            identifier: format!("urn:uuid:{}", Uuid::new_v4()),
            modified: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}
