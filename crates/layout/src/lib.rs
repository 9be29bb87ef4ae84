//! Label layout: text fitting, vertical stacking, pagination and the
//! composer that turns queue entries into positioned page elements.
//!
//! Everything here is pure computation over the queue snapshot. Drawing is
//! left to a renderer, which consumes a [`SheetPlan`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid sheet geometry: {0}")]
    InvalidSheet(String),
    #[error("Invalid layout settings: {0}")]
    InvalidLayout(String),
}

pub mod compose;
pub mod config;
pub mod elements;
pub mod fit;
pub mod fonts;
pub mod pagination;
pub mod sheet;
pub mod stack;
pub mod warning;

pub use self::compose::{
    ArtworkProbe, LabelComposer, LabelPlan, PagePlan, SheetPlan, SlotPlan, LINE_HEIGHT, PRICE_SEPARATOR,
};
pub use self::config::{FontRoles, FontSpec, LayoutConfig, LayoutMode, VerticalPolicy};
pub use self::elements::{ArtworkRef, ArtworkRole, LabelElement, PositionedElement, TextRun};
pub use self::fit::{fit_font_size, FitResult};
pub use self::fonts::{win_ansi_byte, Standard14Metrics, StandardFont, TextMeasure};
pub use self::pagination::{is_page_break, page_count, slot_for, SlotPosition};
pub use self::sheet::SheetGeometry;
pub use self::stack::{layout_stack, Block, BlockKind, PlacedBlock, StackLayout, StackPolicy};
pub use self::warning::{LabelSide, RenderWarning};
