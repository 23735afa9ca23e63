//! Analysis session — the collect → analyze → present state machine.
//!
//! Each session is its own value; nothing here touches global state or a
//! rendering surface. The session owns the image batch and at most one
//! report, and it is the sole gate on issuing an analysis: the Analyzing
//! state guarantees at-most-one request in flight.
//!
//! The caller drives the cycle with explicit commands:
//!   try_begin_analysis → (perform the request) → complete_analysis / fail_analysis

use thiserror::Error;

use crate::intake::{ImageIntake, RawFile, SubmitOutcome, MIN_IMAGES};
use crate::llm::AnalysisReport;

/// Where the session is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Batch mutable; analysis may be requested once it is large enough.
    Collecting,
    /// Exactly one analysis request outstanding; batch frozen.
    Analyzing,
    /// Holding a report; batch frozen until reset or re-entry.
    Presenting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("at least 5 images are required, got {count}")]
    InsufficientImages { count: usize },
    #[error("an analysis is already in flight")]
    AlreadyAnalyzing,
    #[error("batch is only mutable while collecting")]
    NotCollecting,
    #[error("no analysis is in flight")]
    NotAnalyzing,
}

/// The immutable request built from the batch at analysis time.
/// Not retained after the request completes.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub images: Vec<String>,
}

pub struct AnalysisSession {
    state: SessionState,
    intake: ImageIntake,
    report: Option<AnalysisReport>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Collecting,
            intake: ImageIntake::new(),
            report: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn image_count(&self) -> usize {
        self.intake.count()
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    /// Batch access for read-only consumers (previews, counts).
    pub fn intake(&self) -> &ImageIntake {
        &self.intake
    }

    /// Whether the analyze action should be offered right now.
    pub fn can_analyze(&self) -> bool {
        self.state == SessionState::Collecting && self.intake.count() >= MIN_IMAGES
    }

    /// Ingest files from any input channel. Only legal while collecting —
    /// this is what gates clipboard paste outside the upload step.
    pub async fn submit(&self, files: Vec<RawFile>) -> Result<SubmitOutcome, SessionError> {
        if self.state != SessionState::Collecting {
            return Err(SessionError::NotCollecting);
        }
        Ok(self.intake.submit(files).await)
    }

    /// Remove one image by id; no-op for unknown ids.
    pub fn remove(&self, id: uuid::Uuid) -> Result<(), SessionError> {
        if self.state != SessionState::Collecting {
            return Err(SessionError::NotCollecting);
        }
        self.intake.remove(id);
        Ok(())
    }

    /// Attempt the Collecting → Analyzing transition.
    ///
    /// Succeeds only with enough images and no request in flight; on
    /// success the returned request snapshot is the caller's to send.
    /// A failed attempt leaves the state unchanged.
    pub fn try_begin_analysis(&mut self) -> Result<AnalysisRequest, SessionError> {
        match self.state {
            SessionState::Analyzing => return Err(SessionError::AlreadyAnalyzing),
            SessionState::Presenting => return Err(SessionError::NotCollecting),
            SessionState::Collecting => {}
        }
        let count = self.intake.count();
        if count < MIN_IMAGES {
            return Err(SessionError::InsufficientImages { count });
        }
        self.state = SessionState::Analyzing;
        log::info!("[SESSION] Analyzing {} images", count);
        Ok(AnalysisRequest {
            images: self.intake.payloads(),
        })
    }

    /// Resolve the in-flight analysis with a report → Presenting.
    pub fn complete_analysis(&mut self, report: AnalysisReport) -> Result<(), SessionError> {
        if self.state != SessionState::Analyzing {
            return Err(SessionError::NotAnalyzing);
        }
        self.report = Some(report);
        self.state = SessionState::Presenting;
        log::info!("[SESSION] Analysis complete — presenting");
        Ok(())
    }

    /// Resolve the in-flight analysis with a failure → back to Collecting.
    /// The batch is preserved so the user can retry or adjust it.
    pub fn fail_analysis(&mut self, reason: &str) -> Result<(), SessionError> {
        if self.state != SessionState::Analyzing {
            return Err(SessionError::NotAnalyzing);
        }
        self.state = SessionState::Collecting;
        log::warn!("[SESSION] Analysis failed — back to collecting: {reason}");
        Ok(())
    }

    /// Discard the report but keep the batch, so the user can add or
    /// remove images and analyze again.
    pub fn back_to_collecting(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Analyzing {
            return Err(SessionError::AlreadyAnalyzing);
        }
        self.report = None;
        self.state = SessionState::Collecting;
        Ok(())
    }

    /// Start over: clear batch and report.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Analyzing {
            return Err(SessionError::AlreadyAnalyzing);
        }
        self.intake.clear();
        self.report = None;
        self.state = SessionState::Collecting;
        log::info!("[SESSION] Reset");
        Ok(())
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}
