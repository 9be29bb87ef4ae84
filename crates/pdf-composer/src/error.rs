use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Reference document has no pages")]
    NoPages,

    #[error("Reference page is unusable: {0}")]
    InvalidPage(String),
}
