//! Checkpoint and resume for engine runtime state.
//!
//! A host that re-runs the machine over a whole document on every edit
//! wastes work; one that snapshots the frame stack at known positions
//! (say, once per line) can restart classification from the nearest
//! snapshot instead. A checkpoint captures the complete frame stack and
//! nothing else: the program stays with the engine and host methods are
//! never serialized.

use crate::core::StateName;
use crate::engine::{Engine, Frame};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the checkpoint format.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable copy of one frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "C: Serialize", deserialize = "C: DeserializeOwned"))]
pub struct FrameSnapshot<C> {
    pub state: StateName,
    pub buffer: Option<String>,
    pub ctx: Option<C>,
    pub prev_ctx: Option<C>,
    pub origin: Option<C>,
    pub entered_state: Option<StateName>,
    pub entered_ctx: Option<C>,
}

impl<C: Clone> From<&Frame<C>> for FrameSnapshot<C> {
    fn from(frame: &Frame<C>) -> Self {
        Self {
            state: frame.state.clone(),
            buffer: frame.buffer.clone(),
            ctx: frame.ctx.clone(),
            prev_ctx: frame.prev_ctx.clone(),
            origin: frame.origin.clone(),
            entered_state: frame.entered_state.clone(),
            entered_ctx: frame.entered_ctx.clone(),
        }
    }
}

impl<C> From<FrameSnapshot<C>> for Frame<C> {
    fn from(snapshot: FrameSnapshot<C>) -> Self {
        let mut frame = Frame::new(snapshot.state);
        frame.buffer = snapshot.buffer;
        frame.ctx = snapshot.ctx;
        frame.prev_ctx = snapshot.prev_ctx;
        frame.origin = snapshot.origin;
        frame.entered_state = snapshot.entered_state;
        frame.entered_ctx = snapshot.entered_ctx;
        frame
    }
}

/// Snapshot of an engine's full frame stack at one point in the event
/// stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "C: Serialize", deserialize = "C: DeserializeOwned"))]
pub struct Checkpoint<C> {
    /// Checkpoint format version.
    pub version: u32,
    /// Unique checkpoint identifier.
    pub id: String,
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
    /// The frame stack, bottom first.
    pub frames: Vec<FrameSnapshot<C>>,
}

impl<C> Checkpoint<C> {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError>
    where
        C: Serialize,
    {
        serde_json::to_string(self).map_err(|e| CheckpointError::EncodingFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError>
    where
        C: DeserializeOwned,
    {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DecodingFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Encode as a compact binary blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError>
    where
        C: Serialize,
    {
        bincode::serialize(self).map_err(|e| CheckpointError::EncodingFailed(e.to_string()))
    }

    /// Decode from a binary blob, rejecting unsupported versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError>
    where
        C: DeserializeOwned,
    {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DecodingFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<T, C: Clone, A> Engine<T, C, A> {
    /// Snapshot the current frame stack.
    ///
    /// The snapshot is independent of the engine: mutating the engine
    /// afterwards does not affect it.
    pub fn checkpoint(&self) -> Checkpoint<C> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            frames: self.stack.iter().map(FrameSnapshot::from).collect(),
        }
    }

    /// Replace the engine's frame stack with a snapshot's.
    ///
    /// The snapshot must carry a supported version, at least one frame,
    /// and only states the engine's program defines. On success the
    /// engine continues exactly as the snapshotted one would have; on
    /// error the engine is left untouched.
    pub fn restore(&mut self, checkpoint: &Checkpoint<C>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;
        if checkpoint.frames.is_empty() {
            return Err(CheckpointError::Rejected(
                "snapshot has no frames".to_string(),
            ));
        }
        for snapshot in &checkpoint.frames {
            if self.program.state(&snapshot.state).is_none() {
                return Err(CheckpointError::Rejected(format!(
                    "snapshot references state `{}` unknown to this program",
                    snapshot.state
                )));
            }
            if let Some(entered) = &snapshot.entered_state {
                if self.program.state(entered).is_none() {
                    return Err(CheckpointError::Rejected(format!(
                        "snapshot references state `{entered}` unknown to this program"
                    )));
                }
            }
        }

        self.stack = checkpoint
            .frames
            .iter()
            .cloned()
            .map(Frame::from)
            .collect();
        debug!(
            target: "lexion::engine",
            id = %checkpoint.id,
            depth = self.stack.len(),
            "restored from checkpoint"
        );
        Ok(())
    }
}
