//! Mississippi expungement eligibility checker.
//!
//! A questionnaire submission flows one way through the pipeline:
//! form → prompt → completion → rendered report → exported PDF.

pub mod completion;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod render;
pub mod transport;
pub mod validation;

use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::error::Result;
use crate::export::DocumentExporter;
use crate::models::{EligibilityRequest, Evaluation};
use crate::transport::Transport;

pub struct ExpungementService {
    completion: CompletionClient,
    exporter: DocumentExporter,
}

impl ExpungementService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let transport = transport::from_config(&cfg.completion)?;
        Ok(Self::with_transport(
            transport,
            cfg.completion.model.clone(),
            DocumentExporter::new(cfg.export.dir.clone()),
        ))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        model: String,
        exporter: DocumentExporter,
    ) -> Self {
        Self {
            completion: CompletionClient::new(transport, model),
            exporter,
        }
    }

    pub fn exporter(&self) -> &DocumentExporter {
        &self.exporter
    }

    /// Run one submission through the pipeline. A failed completion stops it
    /// before anything is rendered or written. A failed export does not: the
    /// rendered report is returned with the export error in its place.
    pub async fn evaluate(&self, req: &EligibilityRequest) -> Result<Evaluation> {
        tracing::info!(
            "Evaluating eligibility: {} {} in {} County",
            req.offense_type,
            req.charge,
            req.county
        );

        let prompt = prompt::build_prompt(req);
        let report = self.completion.complete(&prompt).await?;
        let rendered = render::render_report(&report);
        let document = self.exporter.export(&req.charge, &report).await;

        match &document {
            Ok(doc) => {
                tracing::info!("Analysis complete. Summary saved with ID: {}", doc.file_id)
            }
            Err(e) => tracing::error!("Report rendered but summary export failed: {}", e),
        }

        Ok(Evaluation {
            report,
            rendered,
            document,
        })
    }
}
