use jarlabel_layout::LayoutError;
use jarlabel_render_lopdf::RenderError;
use jarlabel_types::{BrandId, Category, TierId, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between loading configuration and saving
/// a label sheet.
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("The label queue is empty; add entries before generating")]
    EmptyQueue,

    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("No queue entry at position {index} (queue holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] LayoutError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A {category} brand named '{name}' already exists")]
    DuplicateBrand { name: String, category: Category },

    #[error("Brand {brand} already has a tier named '{name}'")]
    DuplicateTier { brand: BrandId, name: String },

    #[error("No brand with id {0}")]
    MissingBrand(BrandId),

    #[error("No tier with id {0}")]
    MissingTier(TierId),

    #[error("No {category} brand named '{name}'")]
    UnknownBrand { name: String, category: Category },

    #[error("Brand '{brand}' has no tier named '{tier}'")]
    UnknownTier { brand: String, tier: String },

    #[error("Inconsistent catalog: {0}")]
    Inconsistent(String),
}
