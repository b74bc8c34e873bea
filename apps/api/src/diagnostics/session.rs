#![allow(dead_code)]

//! Diagnostic session: the wizard flow as a small state machine.
//!
//! ```text
//! CategorySelection <-> DescriptionEntry -> Analyzing -> ResultsDisplayed
//!                             ^                              |    |
//!                             +----------- retry ------------+    +-> BookingHandoff
//! ```
//!
//! `Analyzing` needs a category and a non-blank description, and only ever
//! resolves to `ResultsDisplayed`.

use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::models::{
    DeviceCategory, DiagnosticRequest, DiagnosticSolution, MediaAttachment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStep {
    CategorySelection,
    DescriptionEntry,
    Analyzing,
    ResultsDisplayed,
    BookingHandoff,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} from step {from:?}")]
    InvalidTransition {
        from: DiagnosticStep,
        action: &'static str,
    },

    #[error("no device category selected")]
    MissingCategory,

    #[error("problem description is empty")]
    EmptyDescription,

    #[error("an analysis is already running")]
    AnalysisInProgress,
}

#[derive(Debug, Clone)]
pub struct DiagnosticSession {
    step: DiagnosticStep,
    device: Option<DeviceCategory>,
    description: String,
    media: Option<MediaAttachment>,
    solutions: Vec<DiagnosticSolution>,
}

impl Default for DiagnosticSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSession {
    pub fn new() -> Self {
        Self {
            step: DiagnosticStep::CategorySelection,
            device: None,
            description: String::new(),
            media: None,
            solutions: Vec::new(),
        }
    }

    pub fn step(&self) -> DiagnosticStep {
        self.step
    }

    pub fn solutions(&self) -> &[DiagnosticSolution] {
        &self.solutions
    }

    fn expect_step(&self, expected: DiagnosticStep, action: &'static str) -> Result<(), SessionError> {
        if self.step == DiagnosticStep::Analyzing && expected != DiagnosticStep::Analyzing {
            return Err(SessionError::AnalysisInProgress);
        }
        if self.step != expected {
            return Err(SessionError::InvalidTransition {
                from: self.step,
                action,
            });
        }
        Ok(())
    }

    pub fn select_category(&mut self, device: DeviceCategory) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::CategorySelection, "select a category")?;
        self.device = Some(device);
        self.step = DiagnosticStep::DescriptionEntry;
        Ok(())
    }

    /// Back navigation from description entry. Category stays selected.
    pub fn back(&mut self) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::DescriptionEntry, "go back")?;
        self.step = DiagnosticStep::CategorySelection;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::DescriptionEntry, "edit the description")?;
        self.description = description.into();
        Ok(())
    }

    /// At most one attachment: a new one replaces the old.
    pub fn attach_media(&mut self, media: MediaAttachment) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::DescriptionEntry, "attach media")?;
        self.media = Some(media);
        Ok(())
    }

    pub fn clear_media(&mut self) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::DescriptionEntry, "remove media")?;
        self.media = None;
        Ok(())
    }

    /// Freezes the inputs and hands back the request to run.
    pub fn begin_analysis(&mut self) -> Result<DiagnosticRequest, SessionError> {
        self.expect_step(DiagnosticStep::DescriptionEntry, "start analysis")?;
        let device = self.device.ok_or(SessionError::MissingCategory)?;
        if self.description.trim().is_empty() {
            return Err(SessionError::EmptyDescription);
        }
        self.step = DiagnosticStep::Analyzing;
        Ok(DiagnosticRequest {
            device,
            description: self.description.clone(),
            media: self.media.clone(),
        })
    }

    /// Replaces any previous result set in one go.
    pub fn complete(&mut self, solutions: Vec<DiagnosticSolution>) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::Analyzing, "show results")?;
        self.solutions = solutions;
        self.step = DiagnosticStep::ResultsDisplayed;
        Ok(())
    }

    /// "Try another description": results stay until the next analysis.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.expect_step(DiagnosticStep::ResultsDisplayed, "retry")?;
        self.step = DiagnosticStep::DescriptionEntry;
        Ok(())
    }

    /// Summary carried into the booking form on escalation.
    pub fn booking_summary(&self) -> Option<&str> {
        (self.step == DiagnosticStep::ResultsDisplayed).then_some(self.description.as_str())
    }

    pub fn escalate(&mut self) -> Result<String, SessionError> {
        self.expect_step(DiagnosticStep::ResultsDisplayed, "book a repair")?;
        self.step = DiagnosticStep::BookingHandoff;
        Ok(self.description.clone())
    }

    pub fn into_solutions(self) -> Vec<DiagnosticSolution> {
        self.solutions
    }
}
