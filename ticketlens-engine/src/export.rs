use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::charts::ChartRenderer;
use crate::document::ReportDocument;
use crate::error::EngineError;
use crate::pipeline::PromptResult;

/// Files written for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptArtefacts {
    pub charts: Vec<PathBuf>,
    pub document: Option<PathBuf>,
}

/// Writes chart SVGs and report documents into an output directory.
pub struct ArtefactExporter {
    out_dir: PathBuf,
    charts: bool,
    renderer: ChartRenderer,
}

impl ArtefactExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            charts: true,
            renderer: ChartRenderer::default(),
        }
    }

    pub fn with_charts(mut self, charts: bool) -> Self {
        self.charts = charts;
        self
    }

    pub fn with_renderer(mut self, renderer: ChartRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Only a generated report gets a document; charts are drawn for any
    /// non-empty subset.
    pub fn export(&self, result: &PromptResult) -> Result<PromptArtefacts, EngineError> {
        fs::create_dir_all(&self.out_dir).map_err(|err| EngineError::from_io(&self.out_dir, err))?;

        let mut artefacts = PromptArtefacts::default();
        if self.charts {
            let prefix = format!("prompt-{}", result.number);
            artefacts.charts = self
                .renderer
                .render_all(&result.summary, &self.out_dir, &prefix)?;
        }

        if result.report.is_generated() {
            let document = ReportDocument::new(result);
            let path = self.out_dir.join(document.file_name());
            fs::write(&path, document.render()).map_err(|err| EngineError::from_io(&path, err))?;
            artefacts.document = Some(path);
        }

        info!(
            prompt = result.number,
            charts = artefacts.charts.len(),
            document = artefacts.document.is_some(),
            "artefacts written"
        );
        Ok(artefacts)
    }
}
