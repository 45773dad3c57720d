//! Artifact emitter trait.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ArtifactError;
use crate::types::TicketRecord;

/// Turns one ticket record into a file.
///
/// File names derive deterministically from the passenger name; emitting a
/// record whose name collides with an earlier one overwrites it.
#[async_trait]
pub trait ArtifactEmitter: Send + Sync {
    async fn emit(&self, record: &TicketRecord) -> Result<PathBuf, ArtifactError>;
}
