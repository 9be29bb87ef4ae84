use crate::elements::ArtworkRole;
use crate::stack::BlockKind;
use std::fmt;
use std::path::PathBuf;

/// Which half of a label pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSide {
    Nametag,
    Pricetag,
}

impl fmt::Display for LabelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LabelSide::Nametag => "nametag",
            LabelSide::Pricetag => "pricetag",
        })
    }
}

/// A problem that did not stop the document from being produced.
///
/// `entry` is the zero-based queue position the problem belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// Artwork that does not exist or cannot be decoded. The element is left out.
    MissingResource {
        entry: usize,
        path: PathBuf,
        role: ArtworkRole,
        reason: String,
    },
    /// Text still wider than its line at the floor size. It is drawn in full.
    TextOverflow {
        entry: usize,
        kind: BlockKind,
        text: String,
        size: f32,
        width: f32,
        max_width: f32,
    },
    /// Content taller than the label. Blocks keep their order without overlapping.
    StackOverflow {
        entry: usize,
        side: LabelSide,
        excess: f32,
    },
}

impl RenderWarning {
    /// Queue position of the entry the warning belongs to.
    pub fn entry(&self) -> usize {
        match self {
            RenderWarning::MissingResource { entry, .. }
            | RenderWarning::TextOverflow { entry, .. }
            | RenderWarning::StackOverflow { entry, .. } => *entry,
        }
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::MissingResource {
                entry,
                path,
                role,
                reason,
            } => write!(
                f,
                "entry {}: skipped {} '{}': {}",
                entry + 1,
                role,
                path.display(),
                reason
            ),
            RenderWarning::TextOverflow {
                entry,
                kind,
                text,
                size,
                width,
                max_width,
            } => write!(
                f,
                "entry {}: {} \"{}\" is {:.1}pt wide at {}pt, only {:.1}pt available",
                entry + 1,
                kind,
                text,
                width,
                size,
                max_width
            ),
            RenderWarning::StackOverflow { entry, side, excess } => write!(
                f,
                "entry {}: {} content runs {:.1}pt past the label",
                entry + 1,
                side,
                excess
            ),
        }
    }
}
