use jarlabel_pdf_composer::ComposerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Failed to import reference page: {0}")]
    Composer(#[from] ComposerError),
    #[error("Artwork '{path}' could not be drawn: {reason}")]
    Artwork { path: String, reason: String },
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
