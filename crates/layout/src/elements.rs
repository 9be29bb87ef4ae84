use crate::fonts::StandardFont;
use crate::stack::BlockKind;
use jarlabel_types::{Color, Rect};
use std::fmt;
use std::path::PathBuf;

/// A single drawable item on a page, in absolute page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub rect: Rect,
    pub element: LabelElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelElement {
    Text(TextRun),
    /// An image or reference PDF page scaled to fill `rect`.
    Artwork(ArtworkRef),
    /// A filled bar, used for underlines.
    Rule(Color),
}

/// One line of text. It starts at the element's `rect.x` on `baseline`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub kind: BlockKind,
    pub content: String,
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
    pub baseline: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkRef {
    pub path: PathBuf,
    pub role: ArtworkRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkRole {
    Logo,
    NametagBackground,
    PricetagBackground,
}

impl fmt::Display for ArtworkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtworkRole::Logo => "logo",
            ArtworkRole::NametagBackground => "nametag background",
            ArtworkRole::PricetagBackground => "pricetag background",
        })
    }
}

impl fmt::Display for LabelElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelElement::Text(t) => write!(f, "Text(\"{}\" {}pt)", t.content, t.size),
            LabelElement::Artwork(a) => write!(f, "Artwork({}, {})", a.role, a.path.display()),
            LabelElement::Rule(_) => write!(f, "Rule"),
        }
    }
}
