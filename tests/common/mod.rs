pub mod fixtures;
pub mod pdf_assertions;

use jarlabel::{LabelConfig, LabelGenerator, RenderOutcome};
use lopdf::Document as LopdfDocument;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Load the sheet a render call saved
    pub fn from_outcome(outcome: &RenderOutcome) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(&outcome.path)?)
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

/// A generator writing to `<dir>/output/labels.pdf`, reading artwork from
/// `dir` and never launching a viewer.
pub fn generator_in(dir: &Path) -> Result<LabelGenerator, jarlabel::LabelError> {
    generator_with(dir, |_| {})
}

pub fn generator_with(
    dir: &Path,
    adjust: impl FnOnce(&mut LabelConfig),
) -> Result<LabelGenerator, jarlabel::LabelError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config = LabelConfig::default();
    config.output_path = dir.join("output/labels.pdf");
    config.resource_root = dir.to_path_buf();
    config.auto_open = false;
    adjust(&mut config);
    LabelGenerator::new(config)
}
