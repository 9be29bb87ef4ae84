//! Record types shared by every jarlabel crate.
//!
//! Records are validated when they are constructed (and when they are
//! deserialized), so downstream layout code can assume:
//! - strain names are non-empty and THC is a finite, non-negative number
//! - a queue entry's tier belongs to its brand
//! - price tables only contain the recognized weight buckets

pub mod brand;
pub mod color;
pub mod entry;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod prices;
pub mod strain;

pub use brand::{Brand, BrandId, Category, Tier, TierId, DEFAULT_NAMETAG_TOP_MARGIN};
pub use color::Color;
pub use entry::QueueEntry;
pub use error::ValidationError;
pub use geometry::{Rect, Size, INCH};
pub use palette::TierPalette;
pub use prices::{PriceBucket, PriceRow, PriceTable};
pub use strain::{Classification, Strain};
