//! PDF output for planned label sheets.
//!
//! [`AssetStore`] loads and decodes logos and backgrounds (JPEG, PNG or a
//! reference PDF page) and answers the layout engine's size probes.
//! [`LabelRenderer`] then draws a [`jarlabel_layout::SheetPlan`] with the
//! standard Helvetica fonts into an in-memory document.

pub mod assets;
mod error;
mod helpers;
mod images;
mod renderer;

pub use assets::{decode_asset, jpeg_color, Asset, AssetStore, EmbeddableImage, ImageEncoding, JpegColor};
pub use error::RenderError;
pub use renderer::{LabelRenderer, RenderOptions, RenderedDocument};
