//! Proposal pipeline: drives one brief through every stage.
//!
//! Flow: load_brief → build_prompts → generate_content → assemble → render.
//! States advance Pending → Parsed → Prompted → Generated → Assembled → Rendered.
//! The first failing stage moves the pipeline to `Failed` and nothing after it runs.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::brief::load_brief;
use crate::document::{assemble, StyleRegistry};
use crate::errors::{ProposalError, Stage};
use crate::generation::{build_prompts, generate_content};
use crate::llm_client::TextGenerator;
use crate::render::{render, FontSource};

const DEFAULT_FILE_STEM: &str = "proposal";

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Pending,
    Parsed,
    Prompted,
    Generated,
    Assembled,
    Rendered,
    Failed { stage: Stage, reason: String },
}

impl PipelineState {
    /// The stage that runs next from this state; `None` once finished or failed.
    fn next_stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Pending => Some(Stage::Parse),
            PipelineState::Parsed => Some(Stage::Generate),
            PipelineState::Prompted => Some(Stage::Generate),
            PipelineState::Generated => Some(Stage::Assemble),
            PipelineState::Assembled => Some(Stage::Render),
            PipelineState::Rendered | PipelineState::Failed { .. } => None,
        }
    }
}

/// Inputs for a single invocation.
#[derive(Debug, Clone)]
pub struct ProposalJob {
    pub brief_path: PathBuf,
    pub output_dir: PathBuf,
    pub date: NaiveDate,
}

pub struct Pipeline<'a> {
    generator: &'a dyn TextGenerator,
    styles: StyleRegistry,
    fonts: FontSource,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    pub fn new(generator: &'a dyn TextGenerator, styles: StyleRegistry, fonts: FontSource) -> Self {
        Self {
            generator,
            styles,
            fonts,
            state: PipelineState::Pending,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Runs every stage and returns the path of the written PDF.
    pub async fn run(&mut self, job: &ProposalJob) -> Result<PathBuf, ProposalError> {
        match self.run_stages(job).await {
            Ok(path) => Ok(path),
            Err(err) => {
                let stage = self.state.next_stage().unwrap_or_else(|| err.stage());
                error!("Pipeline failed during {stage} stage: {err}");
                self.state = PipelineState::Failed {
                    stage,
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    async fn run_stages(&mut self, job: &ProposalJob) -> Result<PathBuf, ProposalError> {
        let brief = load_brief(&job.brief_path)?;
        self.advance(PipelineState::Parsed);

        let prompts = build_prompts(&brief)?;
        self.advance(PipelineState::Prompted);

        let content = generate_content(&prompts, self.generator).await?;
        self.advance(PipelineState::Generated);

        let blocks = assemble(&brief, &content, job.date)?;
        self.advance(PipelineState::Assembled);

        let output = job
            .output_dir
            .join(output_file_name(&brief.customer.name, job.date));
        render(&blocks, &self.styles, &self.fonts, &output)?;
        self.advance(PipelineState::Rendered);

        Ok(output)
    }

    fn advance(&mut self, next: PipelineState) {
        info!("Pipeline: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// `<Customer_Name>_<YYYYMMDD>.pdf`, keeping only ASCII alphanumerics, `-` and `_`.
pub fn output_file_name(customer: &str, date: NaiveDate) -> String {
    let stem: String = customer
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };

    format!("{}_{}.pdf", stem, date.format("%Y%m%d"))
}
