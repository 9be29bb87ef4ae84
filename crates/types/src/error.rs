use thiserror::Error;

/// Raised when a record fails validation at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("THC percentage must be a non-negative number, got {0}")]
    InvalidThc(f64),

    #[error("Unknown classification '{0}' (expected Sativa, Sativa Hybrid, Hybrid, Indica Hybrid or Indica)")]
    UnknownClassification(String),

    #[error("Unknown category '{0}' (expected REC or MED)")]
    UnknownCategory(String),

    #[error("Nametag top margin must be a non-negative number of inches, got {0}")]
    InvalidMargin(f32),

    #[error("Tier '{tier}' belongs to brand {tier_brand}, not to brand {brand}")]
    BrandMismatch {
        tier: String,
        tier_brand: u32,
        brand: u32,
    },
}
