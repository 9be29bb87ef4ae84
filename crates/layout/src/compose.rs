//! Turns queue entries into positioned label elements, page by page.

use crate::config::{FontSpec, LayoutConfig, LayoutMode};
use crate::elements::{ArtworkRef, ArtworkRole, LabelElement, PositionedElement, TextRun};
use crate::fit::{fit_font_size, FitResult};
use crate::fonts::{StandardFont, TextMeasure};
use crate::pagination::{is_page_break, slot_for, SlotPosition};
use crate::sheet::SheetGeometry;
use crate::stack::{layout_stack, Block, BlockKind, PlacedBlock};
use crate::warning::{LabelSide, RenderWarning};
use jarlabel_types::{Color, QueueEntry, Rect, Size, INCH};
use std::path::{Path, PathBuf};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.2;
/// Joins the two halves of a paired price line.
pub const PRICE_SEPARATOR: &str = " | ";

const UNDERLINE_OFFSET: f32 = 0.1;
const UNDERLINE_THICKNESS: f32 = 0.05;

/// Reports the intrinsic size of a logo or background without drawing it.
///
/// An `Err` carries a human readable reason and makes the composer leave the
/// artwork out.
pub trait ArtworkProbe {
    fn probe(&self, path: &Path) -> Result<Size, String>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetPlan {
    pub pages: Vec<PagePlan>,
    pub warnings: Vec<RenderWarning>,
}

impl SheetPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub index: usize,
    pub slots: Vec<SlotPlan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotPlan {
    /// Queue position of the entry in this slot.
    pub entry: usize,
    pub position: SlotPosition,
    pub nametag: LabelPlan,
    pub pricetag: LabelPlan,
}

/// Everything drawn inside one label, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlan {
    pub side: LabelSide,
    pub bounds: Rect,
    pub elements: Vec<PositionedElement>,
}

impl LabelPlan {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| match &e.element {
            LabelElement::Text(run) => Some(run),
            _ => None,
        })
    }

    /// First text run of the given kind.
    pub fn text(&self, kind: BlockKind) -> Option<&TextRun> {
        self.text_runs().find(|run| run.kind == kind)
    }

    pub fn artwork(&self, role: ArtworkRole) -> Option<&PositionedElement> {
        self.elements
            .iter()
            .find(|e| matches!(&e.element, LabelElement::Artwork(a) if a.role == role))
    }

    pub fn rules(&self) -> impl Iterator<Item = &PositionedElement> {
        self.elements
            .iter()
            .filter(|e| matches!(e.element, LabelElement::Rule(_)))
    }
}

/// A fitted line waiting for its vertical position.
struct Line {
    kind: BlockKind,
    content: String,
    font: StandardFont,
    fit: FitResult,
    color: Color,
    underline: bool,
}

impl Line {
    fn block(&self) -> Block {
        Block::new(self.kind, self.fit.size * LINE_HEIGHT, self.fit.size)
    }
}

struct Logo {
    path: PathBuf,
    size: Size,
}

/// A block's content, kept in stack order next to the block list.
enum Slot {
    Line(Line),
    Logo(Logo),
    /// Logo on the left, brand name beside it.
    Header { logo: Logo, brand: Line },
}

pub struct LabelComposer<'a> {
    sheet: &'a SheetGeometry,
    config: &'a LayoutConfig,
    measure: &'a dyn TextMeasure,
    artwork: &'a dyn ArtworkProbe,
}

impl<'a> LabelComposer<'a> {
    pub fn new(
        sheet: &'a SheetGeometry,
        config: &'a LayoutConfig,
        measure: &'a dyn TextMeasure,
        artwork: &'a dyn ArtworkProbe,
    ) -> Self {
        Self {
            sheet,
            config,
            measure,
            artwork,
        }
    }

    /// Lays out every entry in queue order. Pure apart from artwork probing,
    /// so planning the same entries twice gives the same plan.
    pub fn plan(&self, entries: &[QueueEntry]) -> SheetPlan {
        let mut plan = SheetPlan::default();
        let per_page = self.sheet.entries_per_page;

        for (index, entry) in entries.iter().enumerate() {
            let position = slot_for(index, per_page);
            if index == 0 || is_page_break(index, per_page) {
                log::debug!("Starting page {}", position.page + 1);
                plan.pages.push(PagePlan {
                    index: position.page,
                    slots: Vec::with_capacity(per_page),
                });
            }
            let slot = self.compose_slot(index, position, entry, &mut plan.warnings);
            if let Some(page) = plan.pages.last_mut() {
                page.slots.push(slot);
            }
        }
        plan
    }

    pub fn compose_slot(
        &self,
        index: usize,
        position: SlotPosition,
        entry: &QueueEntry,
        warnings: &mut Vec<RenderWarning>,
    ) -> SlotPlan {
        log::debug!(
            "Placing entry {} '{}' on page {} slot {}",
            index,
            entry.strain().name(),
            position.page + 1,
            position.slot
        );
        SlotPlan {
            entry: index,
            position,
            nametag: self.compose_nametag(index, position.slot, entry, warnings),
            pricetag: self.compose_pricetag(index, position.slot, entry, warnings),
        }
    }

    fn compose_nametag(
        &self,
        index: usize,
        slot: usize,
        entry: &QueueEntry,
        warnings: &mut Vec<RenderWarning>,
    ) -> LabelPlan {
        let bounds = self.sheet.nametag_rect(slot);
        let inner = self.config.inner_margin;
        let max_width = bounds.width - 2.0 * inner;
        let top = bounds.top() - inner - entry.tier().nametag_top_margin() * INCH;
        let bottom = bounds.y + inner;
        let fonts = &self.config.fonts;
        let tier_color = self.tier_color(entry);

        let mut elements = Vec::new();
        self.push_background(
            &mut elements,
            bounds,
            entry.tier().nametag_background(),
            ArtworkRole::NametagBackground,
            index,
            warnings,
        );

        let mut content = Vec::new();
        if self.config.mode == LayoutMode::CenterStack
            && let Some(logo) = self.logo_size(index, entry, top - bottom, warnings)
        {
            content.push(Slot::Logo(logo));
        }

        let mut line = |kind, text: String, font, spec, color, underline| {
            Slot::Line(self.fit_line(index, kind, text, font, spec, max_width, color, underline, warnings))
        };
        content.push(line(
            BlockKind::TierName,
            entry.tier().name().to_string(),
            StandardFont::HelveticaBold,
            fonts.tier_name,
            tier_color,
            false,
        ));
        content.push(line(
            BlockKind::StrainName,
            entry.strain().name().to_uppercase(),
            StandardFont::HelveticaBold,
            fonts.strain_name,
            self.config.ink,
            true,
        ));
        if let Some(lineage) = entry.strain().lineage() {
            content.push(line(
                BlockKind::Lineage,
                format!("({})", lineage),
                StandardFont::Helvetica,
                fonts.lineage,
                self.config.ink,
                false,
            ));
        }
        content.push(line(
            BlockKind::Classification,
            entry.strain().classification().to_string(),
            StandardFont::Helvetica,
            fonts.classification,
            self.config.ink,
            false,
        ));
        content.push(line(
            BlockKind::Thc,
            entry.strain().thc_label(),
            StandardFont::Helvetica,
            fonts.thc,
            self.config.ink,
            false,
        ));

        self.stack(index, LabelSide::Nametag, bounds, top, bottom, content, &mut elements, warnings);
        LabelPlan {
            side: LabelSide::Nametag,
            bounds,
            elements,
        }
    }

    fn compose_pricetag(
        &self,
        index: usize,
        slot: usize,
        entry: &QueueEntry,
        warnings: &mut Vec<RenderWarning>,
    ) -> LabelPlan {
        let bounds = self.sheet.pricetag_rect(slot);
        let inner = self.config.inner_margin;
        let max_width = bounds.width - 2.0 * inner;
        let top = bounds.top() - inner;
        let bottom = bounds.y + inner;
        let fonts = &self.config.fonts;

        let mut elements = Vec::new();
        self.push_background(
            &mut elements,
            bounds,
            entry.tier().pricetag_background(),
            ArtworkRole::PricetagBackground,
            index,
            warnings,
        );

        let mut content = Vec::new();
        let header_logo = match self.config.mode {
            LayoutMode::LogoLeft => self.logo_size(index, entry, top - bottom, warnings),
            LayoutMode::CenterStack => None,
        };
        match header_logo {
            Some(logo) => {
                let brand_width = (max_width - logo.size.width - self.config.logo_gap).max(0.0);
                let brand = self.fit_line(
                    index,
                    BlockKind::BrandName,
                    entry.brand().name().to_string(),
                    StandardFont::HelveticaBold,
                    fonts.brand_name,
                    brand_width,
                    self.config.ink,
                    true,
                    warnings,
                );
                content.push(Slot::Header { logo, brand });
            }
            None => content.push(Slot::Line(self.fit_line(
                index,
                BlockKind::BrandName,
                entry.brand().name().to_string(),
                StandardFont::HelveticaBold,
                fonts.brand_name,
                max_width,
                self.config.ink,
                true,
                warnings,
            ))),
        }

        content.push(Slot::Line(self.fit_line(
            index,
            BlockKind::TierName,
            entry.tier().name().to_string(),
            StandardFont::HelveticaBold,
            fonts.tier_name,
            max_width,
            self.tier_color(entry),
            true,
            warnings,
        )));

        for row in entry.tier().prices().rows() {
            content.push(Slot::Line(self.fit_line(
                index,
                BlockKind::PriceLine,
                row.label(PRICE_SEPARATOR),
                StandardFont::Helvetica,
                fonts.price_line,
                max_width,
                self.config.ink,
                false,
                warnings,
            )));
        }

        self.stack(index, LabelSide::Pricetag, bounds, top, bottom, content, &mut elements, warnings);
        LabelPlan {
            side: LabelSide::Pricetag,
            bounds,
            elements,
        }
    }

    /// Stacks `content` vertically and emits its elements.
    #[allow(clippy::too_many_arguments)]
    fn stack(
        &self,
        index: usize,
        side: LabelSide,
        bounds: Rect,
        top: f32,
        bottom: f32,
        content: Vec<Slot>,
        elements: &mut Vec<PositionedElement>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        let leads_with_logo = matches!(content.first(), Some(Slot::Logo(_) | Slot::Header { .. }));
        let blocks: Vec<Block> = content.iter().map(|slot| self.block_for(slot)).collect();
        let layout = layout_stack(&blocks, top, bottom, self.config.stack_policy(leads_with_logo));

        if layout.overflow > 0.0 {
            log::warn!(
                "Entry {} {} content runs {:.1}pt past the label",
                index,
                side,
                layout.overflow
            );
            warnings.push(RenderWarning::StackOverflow {
                entry: index,
                side,
                excess: layout.overflow,
            });
        }

        let left = bounds.x + self.config.inner_margin;
        for (slot, placed) in content.into_iter().zip(layout.blocks) {
            match slot {
                Slot::Line(line) => {
                    let x = bounds.center_x() - line.fit.width / 2.0;
                    push_line(elements, line, x, &placed);
                }
                Slot::Logo(logo) => {
                    let x = bounds.center_x() - logo.size.width / 2.0;
                    elements.push(logo_element(logo, x, placed.top));
                }
                Slot::Header { logo, brand } => {
                    let header_height = placed.top - placed.bottom;
                    let logo_top = placed.top - (header_height - logo.size.height) / 2.0;
                    let x = left + logo.size.width + self.config.logo_gap;
                    elements.push(logo_element(logo, left, logo_top));
                    push_line(elements, brand, x, &placed);
                }
            }
        }
    }

    fn block_for(&self, slot: &Slot) -> Block {
        match slot {
            Slot::Line(line) => line.block(),
            Slot::Logo(logo) => Block::new(BlockKind::Logo, logo.size.height, 0.0),
            Slot::Header { logo, brand } => {
                let line_height = brand.fit.size * LINE_HEIGHT;
                let height = logo.size.height.max(line_height);
                Block::new(
                    BlockKind::BrandHeader,
                    height,
                    (height - line_height) / 2.0 + brand.fit.size,
                )
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fit_line(
        &self,
        index: usize,
        kind: BlockKind,
        content: String,
        font: StandardFont,
        spec: FontSpec,
        max_width: f32,
        color: Color,
        underline: bool,
        warnings: &mut Vec<RenderWarning>,
    ) -> Line {
        let fit = fit_font_size(self.measure, &content, font, spec.size, spec.floor, max_width);
        log::debug!("Fitted {} '{}' at {}pt", kind, content, fit.size);
        if fit.overflow {
            log::warn!(
                "Entry {}: {} '{}' overflows at {}pt ({:.1} > {:.1})",
                index,
                kind,
                content,
                fit.size,
                fit.width,
                max_width
            );
            warnings.push(RenderWarning::TextOverflow {
                entry: index,
                kind,
                text: content.clone(),
                size: fit.size,
                width: fit.width,
                max_width,
            });
        }
        Line {
            kind,
            content,
            font,
            fit,
            color,
            underline,
        }
    }

    fn tier_color(&self, entry: &QueueEntry) -> Color {
        self.config
            .palette
            .tier_color(entry.brand().category(), entry.tier().name())
            .unwrap_or(self.config.ink)
    }

    /// Logo dimensions: capped in width by the label, in height by `span`,
    /// keeping the image aspect ratio.
    fn logo_size(
        &self,
        index: usize,
        entry: &QueueEntry,
        span: f32,
        warnings: &mut Vec<RenderWarning>,
    ) -> Option<Logo> {
        let path = entry.brand().logo_path()?;
        let intrinsic = self.probe(path, ArtworkRole::Logo, index, warnings)?;
        let aspect = intrinsic.aspect_ratio();

        let mut width = self
            .config
            .logo_max_width
            .min(self.config.logo_width_fraction * self.sheet.label_width);
        let mut height = width / aspect;
        let max_height = (self.config.logo_height_fraction * span).max(0.0);
        if height > max_height {
            height = max_height;
            width = height * aspect;
        }
        Some(Logo {
            path: path.to_path_buf(),
            size: Size::new(width, height),
        })
    }

    fn push_background(
        &self,
        elements: &mut Vec<PositionedElement>,
        bounds: Rect,
        path: Option<&Path>,
        role: ArtworkRole,
        index: usize,
        warnings: &mut Vec<RenderWarning>,
    ) {
        let Some(path) = path else { return };
        if self.probe(path, role, index, warnings).is_some() {
            elements.push(PositionedElement {
                rect: bounds,
                element: LabelElement::Artwork(ArtworkRef {
                    path: path.to_path_buf(),
                    role,
                }),
            });
        }
    }

    fn probe(
        &self,
        path: &Path,
        role: ArtworkRole,
        index: usize,
        warnings: &mut Vec<RenderWarning>,
    ) -> Option<Size> {
        match self.artwork.probe(path) {
            Ok(size) => Some(size),
            Err(reason) => {
                log::warn!("Skipping {} '{}': {}", role, path.display(), reason);
                warnings.push(RenderWarning::MissingResource {
                    entry: index,
                    path: path.to_path_buf(),
                    role,
                    reason,
                });
                None
            }
        }
    }
}

fn logo_element(logo: Logo, x: f32, top: f32) -> PositionedElement {
    PositionedElement {
        rect: Rect::from_top_left(x, top, logo.size.width, logo.size.height),
        element: LabelElement::Artwork(ArtworkRef {
            path: logo.path,
            role: ArtworkRole::Logo,
        }),
    }
}

/// Emits a text run starting at `x` on the block's baseline, plus its
/// underline when it has one.
fn push_line(elements: &mut Vec<PositionedElement>, line: Line, x: f32, placed: &PlacedBlock) {
    let size = line.fit.size;
    let baseline = placed.baseline;
    let line_top = baseline + size;
    elements.push(PositionedElement {
        rect: Rect::from_top_left(x, line_top, line.fit.width, size * LINE_HEIGHT),
        element: LabelElement::Text(TextRun {
            kind: line.kind,
            content: line.content,
            font: line.font,
            size,
            color: line.color,
            baseline,
        }),
    });
    if line.underline {
        let thickness = size * UNDERLINE_THICKNESS;
        elements.push(PositionedElement {
            rect: Rect::from_top_left(x, baseline - size * UNDERLINE_OFFSET, line.fit.width, thickness),
            element: LabelElement::Rule(line.color),
        });
    }
}
