//! Session state for the single active user session.
//!
//! The session owns the two pieces of mutable state the app has: the current
//! credential and the last result text, plus the submission workflow
//! Idle -> Submitted -> {Succeeded | Failed} -> Idle.
//!
//! Submissions are uuid-tagged. Starting a new submission supersedes any
//! outstanding one, and completions carrying a stale id are dropped, so the
//! result slot is only ever written by the newest submission. A failed
//! submission leaves the previous result text untouched.

use uuid::Uuid;

/// State of the current (or most recent) submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitted {
        id: Uuid,
    },
    Succeeded {
        id: Uuid,
    },
    Failed {
        id: Uuid,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct Session {
    credential: Option<String>,
    result: Option<String>,
    submission: SubmissionState,
}

impl Session {
    /// Record the key typed in the UI. An empty key clears the credential;
    /// a present credential is always non-empty.
    pub fn set_credential(&mut self, key: &str) {
        self.credential = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitted { .. })
    }

    /// Begin a new submission, superseding any outstanding one.
    pub fn begin_submission(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        if let SubmissionState::Submitted { id: old } = self.submission {
            log::info!("Submission {} superseded by {}", old, id);
        }
        self.submission = SubmissionState::Submitted { id };
        id
    }

    /// Record a successful result for submission `id`. Returns false and
    /// leaves the result slot untouched when `id` is stale.
    pub fn complete_submission(&mut self, id: Uuid, text: String) -> bool {
        match self.submission {
            SubmissionState::Submitted { id: current } if current == id => {
                self.result = Some(text);
                self.submission = SubmissionState::Succeeded { id };
                true
            }
            _ => {
                log::debug!("Dropping stale completion for submission {}", id);
                false
            }
        }
    }

    /// Record a failure for submission `id`. The previous result text is
    /// preserved either way.
    pub fn fail_submission(&mut self, id: Uuid, message: String) -> bool {
        match self.submission {
            SubmissionState::Submitted { id: current } if current == id => {
                self.submission = SubmissionState::Failed { id, message };
                true
            }
            _ => {
                log::debug!("Dropping stale failure for submission {}", id);
                false
            }
        }
    }
}
