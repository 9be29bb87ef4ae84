//! Vertical placement of the lines and artwork on one label.

use std::fmt;

/// What a block on a label holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Logo,
    TierName,
    StrainName,
    Lineage,
    Classification,
    Thc,
    BrandName,
    /// Logo and brand name sharing one row.
    BrandHeader,
    PriceLine,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::Logo => "logo",
            BlockKind::TierName => "tier name",
            BlockKind::StrainName => "strain name",
            BlockKind::Lineage => "lineage",
            BlockKind::Classification => "classification",
            BlockKind::Thc => "THC",
            BlockKind::BrandName => "brand name",
            BlockKind::BrandHeader => "brand header",
            BlockKind::PriceLine => "price line",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub height: f32,
    /// Distance from the block top down to its text baseline.
    pub ascent: f32,
}

impl Block {
    pub fn new(kind: BlockKind, height: f32, ascent: f32) -> Self {
        Self { kind, height, ascent }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StackPolicy {
    /// Fixed spacing from the top, switching to `tight_spacing` once the
    /// content fills `density_threshold` of the span or more.
    Compressed {
        spacing: f32,
        tight_spacing: f32,
        density_threshold: f32,
    },
    /// Equal gaps above, between and below the blocks.
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    pub top: f32,
    pub bottom: f32,
    pub baseline: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackLayout {
    pub blocks: Vec<PlacedBlock>,
    /// Sum of the block heights, gaps excluded.
    pub content_height: f32,
    /// How far the stack runs past the bottom of the span. Zero when it fits.
    pub overflow: f32,
}

/// Places `blocks` top to bottom inside the span between `top` and
/// `bottom` (page coordinates, `top > bottom`). Blocks never overlap; a
/// stack that cannot fit runs past `bottom` and reports by how much.
pub fn layout_stack(blocks: &[Block], top: f32, bottom: f32, policy: StackPolicy) -> StackLayout {
    if blocks.is_empty() {
        return StackLayout::default();
    }

    let span = top - bottom;
    let content_height: f32 = blocks.iter().map(|b| b.height).sum();
    let gaps = (blocks.len() - 1) as f32;

    let (first_offset, gap) = match policy {
        StackPolicy::Compressed {
            spacing,
            tight_spacing,
            density_threshold,
        } => {
            let spacing = if content_height + gaps * spacing < density_threshold * span {
                spacing
            } else {
                tight_spacing
            };
            (0.0, spacing)
        }
        StackPolicy::Even => {
            let gap = ((span - content_height) / (blocks.len() as f32 + 1.0)).max(0.0);
            (gap, gap)
        }
    };

    let mut cursor = top - first_offset;
    let mut placed = Vec::with_capacity(blocks.len());
    for block in blocks {
        let block_top = cursor;
        let block_bottom = block_top - block.height;
        placed.push(PlacedBlock {
            kind: block.kind,
            top: block_top,
            bottom: block_bottom,
            baseline: block_top - block.ascent,
        });
        cursor = block_bottom - gap;
    }

    let last_bottom = placed.last().map(|b| b.bottom).unwrap_or(top);
    StackLayout {
        blocks: placed,
        content_height,
        overflow: (bottom - last_bottom).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED: StackPolicy = StackPolicy::Compressed {
        spacing: 7.2,
        tight_spacing: 3.6,
        density_threshold: 0.8,
    };

    fn text(kind: BlockKind, size: f32) -> Block {
        Block::new(kind, size * 1.2, size)
    }

    fn assert_no_overlap(layout: &StackLayout) {
        for pair in layout.blocks.windows(2) {
            assert!(pair[1].top <= pair[0].bottom + 1e-4, "{:?} overlaps {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_empty_stack() {
        let layout = layout_stack(&[], 100.0, 0.0, StackPolicy::Even);
        assert!(layout.blocks.is_empty());
        assert_eq!(layout.content_height, 0.0);
    }

    #[test]
    fn test_compressed_uses_normal_spacing_when_sparse() {
        let blocks = [text(BlockKind::TierName, 10.0), text(BlockKind::Thc, 10.0)];
        let layout = layout_stack(&blocks, 200.0, 0.0, COMPRESSED);
        assert_eq!(layout.blocks[0].top, 200.0);
        assert_eq!(layout.blocks[0].baseline, 190.0);
        assert!((layout.blocks[1].top - (200.0 - 12.0 - 7.2)).abs() < 1e-4);
        assert_eq!(layout.overflow, 0.0);
    }

    #[test]
    fn test_compressed_tightens_when_dense() {
        // 3 x 24 = 72 content + 2 x 7.2 spacing = 86.4 > 0.8 x 100
        let blocks = [text(BlockKind::TierName, 20.0); 3];
        let layout = layout_stack(&blocks, 100.0, 0.0, COMPRESSED);
        let gap = layout.blocks[0].bottom - layout.blocks[1].top;
        assert!((gap - 3.6).abs() < 1e-4);
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_compressed_tightens_at_exact_threshold() {
        let policy = StackPolicy::Compressed {
            spacing: 8.0,
            tight_spacing: 4.0,
            density_threshold: 0.75,
        };
        // 2 x 33.5 content + 8 spacing = 75 = 0.75 x 100
        let blocks = [Block::new(BlockKind::TierName, 33.5, 30.0); 2];
        let layout = layout_stack(&blocks, 100.0, 0.0, policy);
        assert_eq!(layout.blocks[0].bottom - layout.blocks[1].top, 4.0);

        let sparse = [Block::new(BlockKind::TierName, 33.0, 30.0); 2];
        let layout = layout_stack(&sparse, 100.0, 0.0, policy);
        assert_eq!(layout.blocks[0].bottom - layout.blocks[1].top, 8.0);
    }

    #[test]
    fn test_even_distribution_gaps() {
        let blocks = [Block::new(BlockKind::Logo, 20.0, 0.0), text(BlockKind::TierName, 10.0)];
        // span 100, content 32, gap = 68 / 3
        let layout = layout_stack(&blocks, 100.0, 0.0, StackPolicy::Even);
        let gap = 68.0 / 3.0;
        assert!((layout.blocks[0].top - (100.0 - gap)).abs() < 1e-4);
        assert!((layout.blocks[1].bottom - gap).abs() < 1e-3);
        assert_eq!(layout.overflow, 0.0);
    }

    #[test]
    fn test_even_clamps_negative_gap() {
        let blocks = [text(BlockKind::StrainName, 30.0), text(BlockKind::Thc, 30.0)];
        let layout = layout_stack(&blocks, 50.0, 0.0, StackPolicy::Even);
        assert_eq!(layout.blocks[0].top, 50.0);
        assert_eq!(layout.blocks[1].top, layout.blocks[0].bottom);
        assert!((layout.overflow - 22.0).abs() < 1e-4);
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_single_block_in_too_small_span_is_still_placed() {
        let blocks = [text(BlockKind::StrainName, 22.0)];
        let layout = layout_stack(&blocks, 10.0, 0.0, COMPRESSED);
        assert_eq!(layout.blocks.len(), 1);
        assert!(layout.overflow > 0.0);
    }

    #[test]
    fn test_omitting_a_block_removes_its_height() {
        let with = [
            text(BlockKind::TierName, 11.0),
            text(BlockKind::Lineage, 10.0),
            text(BlockKind::Thc, 10.0),
        ];
        let without = [with[0], with[2]];
        let a = layout_stack(&with, 150.0, 0.0, COMPRESSED);
        let b = layout_stack(&without, 150.0, 0.0, COMPRESSED);
        assert!((a.content_height - b.content_height - 12.0).abs() < 1e-4);
        assert_eq!(b.blocks.len(), 2);
    }
}
