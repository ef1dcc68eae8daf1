//! Output modes for processed meeting audio.
//!
//! Two modes are offered: a literal transcription of the recording, or a
//! structured meeting-minutes summary. Each mode maps to a fixed instruction
//! template in [`prompt`].

pub mod prompt;

use serde::{Deserialize, Serialize};

/// How the uploaded audio should be rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Literal transcription, keeping the structure of the speakers' turns.
    #[default]
    Transcription,

    /// Structured meeting minutes: overview, discussion points, task table,
    /// decisions, next steps. Formatted as Markdown.
    Summary,
}

impl OutputMode {
    /// Display label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            OutputMode::Transcription => "Transcrição literal",
            OutputMode::Summary => "Resumo de reunião",
        }
    }

    /// All available modes in display order.
    pub fn all() -> &'static [OutputMode] {
        &[OutputMode::Transcription, OutputMode::Summary]
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
