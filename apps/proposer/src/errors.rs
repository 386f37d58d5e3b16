use std::fmt;

use thiserror::Error;

use crate::llm_client::LlmError;

/// The pipeline stage an error belongs to. Used in log lines and failure states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Startup,
    Parse,
    Generate,
    Assemble,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Startup => "startup",
            Stage::Parse => "parse",
            Stage::Generate => "generate",
            Stage::Assemble => "assemble",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// Application-level error type.
/// Every variant aborts the pipeline; the message names the stage and the cause.
#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// `line` is 1-based; 0 means the problem is not tied to a single line
    /// (for example a required field that never appeared).
    #[error("Malformed brief (line {line}): {reason}")]
    MalformedBrief { line: usize, reason: String },

    #[error("Authentication with the language model API failed: {0}")]
    Authentication(String),

    #[error("Content generation failed: {0}")]
    Generation(String),

    #[error("Language model returned an empty response for '{0}'")]
    EmptyResponse(String),

    #[error("Document assembly failed: {0}")]
    Assembly(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

impl ProposalError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ProposalError::MalformedBrief {
            line,
            reason: reason.into(),
        }
    }

    /// Maps a client error for `slot` into the pipeline taxonomy.
    pub fn from_llm(slot: &str, err: LlmError) -> Self {
        match err {
            LlmError::Unauthorized { message, .. } => ProposalError::Authentication(message),
            LlmError::EmptyContent => ProposalError::EmptyResponse(slot.to_string()),
            other => ProposalError::Generation(format!("{slot}: {other}")),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ProposalError::Config(_) => Stage::Startup,
            ProposalError::MalformedBrief { .. } => Stage::Parse,
            ProposalError::Authentication(_)
            | ProposalError::Generation(_)
            | ProposalError::EmptyResponse(_) => Stage::Generate,
            ProposalError::Assembly(_) => Stage::Assemble,
            ProposalError::Render(_) => Stage::Render,
        }
    }
}

impl From<genpdf::error::Error> for ProposalError {
    fn from(err: genpdf::error::Error) -> Self {
        ProposalError::Render(err.to_string())
    }
}
