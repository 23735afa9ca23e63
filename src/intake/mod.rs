//! Image intake domain — the bounded, validated image batch.
//!
//! Every input channel (file picker, drag-drop, clipboard paste) funnels
//! through the same `submit` contract, so validation and limits are
//! channel-independent. Accepted files are encoded to base64 data URIs in
//! independent tasks; a failed encode never aborts its siblings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Fewest images an analysis can run on.
pub const MIN_IMAGES: usize = 5;
/// Batch ceiling — submissions beyond this are truncated.
pub const MAX_IMAGES: usize = 20;
/// Per-file size ceiling: 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SUPPORTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// One validated, encoded image in the batch.
#[derive(Debug, Clone)]
pub struct CandidateImage {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    /// `data:image/...;base64,...`
    pub data_uri: String,
}

/// A user-supplied file before validation: picker and drag-drop channels
/// deliver paths, clipboard paste delivers bytes.
#[derive(Debug)]
pub struct RawFile {
    pub name: String,
    pub media_type: String,
    source: FileSource,
}

#[derive(Debug)]
enum FileSource {
    Memory(Vec<u8>),
    Path(PathBuf),
}

impl RawFile {
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Memory(bytes),
        }
    }

    pub fn from_path(name: impl Into<String>, media_type: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Path(path),
        }
    }

    async fn size_bytes(&self) -> std::io::Result<u64> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.len() as u64),
            FileSource::Path(path) => Ok(tokio::fs::metadata(path).await?.len()),
        }
    }
}

impl FileSource {
    async fn read(self) -> std::io::Result<Vec<u8>> {
        match self {
            FileSource::Memory(bytes) => Ok(bytes),
            FileSource::Path(path) => tokio::fs::read(path).await,
        }
    }
}

/// Why one file was dropped from a submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("unsupported file type")]
    UnsupportedType,
    #[error("file exceeds the 10 MiB limit")]
    FileTooLarge,
    #[error("batch is full (max 20 images)")]
    BatchFull,
    #[error("read failed: {0}")]
    ReadFailure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedFile {
    pub name: String,
    pub reason: RejectReason,
}

/// Result of one `submit` call. Rejections are per-file and non-fatal to
/// the batch; `truncated` counts valid files that lost out to the ceiling
/// so the caller can show a partial-acceptance notice.
#[derive(Debug, Default)]
pub struct SubmitOutcome {
    /// Files that passed validation and were scheduled for encoding.
    pub accepted: usize,
    /// Valid files dropped because the batch was full.
    pub truncated: usize,
    pub rejected: Vec<RejectedFile>,
}

/// Thread-safe storage for the batch under construction.
///
/// Each accepted file reserves a slot and a sequence number up front, so
/// the batch never exceeds `MAX_IMAGES` and upload order survives
/// out-of-order encode completion. Removal by id is safe to interleave
/// with in-flight encodes — a result arriving after removal is dropped.
#[derive(Clone)]
pub struct ImageIntake {
    inner: Arc<Mutex<BatchInner>>,
}

#[derive(Default)]
struct BatchInner {
    /// Ready images, ordered by reservation sequence (= upload order).
    images: Vec<(u64, CandidateImage)>,
    /// Reserved slots whose encodes are still in flight.
    pending: HashMap<Uuid, u64>,
    next_seq: u64,
}

impl ImageIntake {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BatchInner::default())),
        }
    }

    /// Validate and ingest a set of files.
    ///
    /// Type and size rejections drop only the offending file. Once the
    /// batch (ready + in-flight) hits the ceiling, remaining valid files
    /// are reported as `BatchFull`. Encoding fans out one task per file.
    pub async fn submit(&self, files: Vec<RawFile>) -> SubmitOutcome {
        let mut outcome = SubmitOutcome::default();
        let mut scheduled = Vec::new();

        for file in files {
            if !SUPPORTED_TYPES.contains(&file.media_type.as_str()) {
                log::warn!("[INTAKE] {} rejected — unsupported type {}", file.name, file.media_type);
                outcome.rejected.push(RejectedFile {
                    name: file.name,
                    reason: RejectReason::UnsupportedType,
                });
                continue;
            }

            let size = match file.size_bytes().await {
                Ok(size) => size,
                Err(e) => {
                    log::warn!("[INTAKE] {} rejected — unreadable: {}", file.name, e);
                    outcome.rejected.push(RejectedFile {
                        name: file.name,
                        reason: RejectReason::ReadFailure(e.to_string()),
                    });
                    continue;
                }
            };
            if size > MAX_FILE_SIZE {
                log::warn!(
                    "[INTAKE] {} rejected — {} exceeds the 10 MiB limit",
                    file.name,
                    format_size(size)
                );
                outcome.rejected.push(RejectedFile {
                    name: file.name,
                    reason: RejectReason::FileTooLarge,
                });
                continue;
            }

            // Reserve a slot + sequence number, or report the batch full.
            let reservation = {
                let mut inner = self.inner.lock().unwrap();
                if inner.images.len() + inner.pending.len() >= MAX_IMAGES {
                    None
                } else {
                    let id = Uuid::new_v4();
                    let seq = inner.next_seq;
                    inner.next_seq += 1;
                    inner.pending.insert(id, seq);
                    Some((id, seq))
                }
            };
            match reservation {
                Some((id, seq)) => scheduled.push((id, seq, size, file)),
                None => {
                    outcome.truncated += 1;
                    outcome.rejected.push(RejectedFile {
                        name: file.name,
                        reason: RejectReason::BatchFull,
                    });
                }
            }
        }

        if outcome.truncated > 0 {
            log::warn!(
                "[INTAKE] Batch ceiling reached — {} valid file(s) not added",
                outcome.truncated
            );
        }

        outcome.accepted = scheduled.len();

        // Fan out encoding, one task per file. Failures are independent.
        let mut encodes = JoinSet::new();
        for (id, seq, size, file) in scheduled {
            let inner = Arc::clone(&self.inner);
            let RawFile { name, media_type, source } = file;
            encodes.spawn(async move {
                let bytes = match source.read().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        inner.lock().unwrap().pending.remove(&id);
                        return Some(RejectedFile {
                            name,
                            reason: RejectReason::ReadFailure(e.to_string()),
                        });
                    }
                };
                let encoded = general_purpose::STANDARD.encode(&bytes);
                let data_uri = format!("data:{media_type};base64,{encoded}");

                let mut inner = inner.lock().unwrap();
                if inner.pending.remove(&id).is_some() {
                    let at = inner.images.partition_point(|(s, _)| *s < seq);
                    inner.images.insert(
                        at,
                        (seq, CandidateImage { id, name, size_bytes: size, data_uri }),
                    );
                } else {
                    // Removed while encoding — drop the result.
                    log::debug!("[INTAKE] {} removed mid-encode, result dropped", name);
                }
                None
            });
        }
        while let Some(joined) = encodes.join_next().await {
            if let Ok(Some(rejected)) = joined {
                log::warn!("[INTAKE] {} failed to encode — {}", rejected.name, rejected.reason);
                outcome.rejected.push(rejected);
            }
        }

        log::info!(
            "[INTAKE] Submit done: {} accepted, {} rejected, batch now {}",
            outcome.accepted,
            outcome.rejected.len(),
            self.count()
        );
        outcome
    }

    /// Remove one image by id. Idempotent — removing an unknown or already
    /// removed id is a no-op, including ids whose encode is still in flight.
    pub fn remove(&self, id: Uuid) {
        let mut inner = self.inner.lock().unwrap();
        inner.images.retain(|(_, image)| image.id != id);
        inner.pending.remove(&id);
    }

    /// Number of ready images. Pure query — gating happens in the session.
    pub fn count(&self) -> usize {
        self.inner.lock().unwrap().images.len()
    }

    /// Snapshot of the batch in upload order.
    pub fn images(&self) -> Vec<CandidateImage> {
        let inner = self.inner.lock().unwrap();
        inner.images.iter().map(|(_, image)| image.clone()).collect()
    }

    /// Base64 payloads in upload order, for building an analysis request.
    pub fn payloads(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .images
            .iter()
            .map(|(_, image)| image.data_uri.clone())
            .collect()
    }

    /// Drop every image and reservation.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.images.clear();
        inner.pending.clear();
    }
}

impl Default for ImageIntake {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable byte size for log and notice text.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
