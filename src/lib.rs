//! Nametag and pricetag label sheets for cannabis retail.
//!
//! A [`LabelGenerator`] owns a queue of (strain, brand, tier) entries. It
//! lays them out with [`jarlabel_layout`], draws them with
//! [`jarlabel_render_lopdf`] and saves one paged PDF, clearing the queue
//! once the file is in place.
//!
//! ```no_run
//! use jarlabel::{CatalogStore, JobFile, LabelConfig, LabelGenerator};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), jarlabel::LabelError> {
//! let config = LabelConfig::load()?;
//! let store = CatalogStore::open("catalog.json")?;
//! let job = JobFile::load(Path::new("job.json"))?;
//!
//! let mut generator = LabelGenerator::new(config)?;
//! for entry in job.resolve(store.catalog())? {
//!     generator.add_entry(entry);
//! }
//! let outcome = generator.generate()?;
//! println!("{} pages at {}", outcome.page_count, outcome.path.display());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod queue;
pub mod viewer;

pub use self::catalog::{Catalog, CatalogStore, JobEntry, JobFile, TierDraft};
pub use self::config::LabelConfig;
pub use self::error::{CatalogError, ConfigError, LabelError, QueueError};
pub use self::generator::{LabelGenerator, RenderOutcome, RenderState};
pub use self::queue::LabelQueue;
pub use self::viewer::{DocumentViewer, SystemViewer, ViewerStatus};

pub use jarlabel_layout as layout;
pub use jarlabel_render_lopdf as render;
pub use jarlabel_types as types;
