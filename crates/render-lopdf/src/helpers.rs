//! Content stream construction for one page.

use jarlabel_layout::{win_ansi_byte, StandardFont};
use jarlabel_types::{Color, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(StandardFont, f32)>,
    fill_color: Option<Color>,
}

/// Accumulates drawing operations for a page, skipping redundant font and
/// color changes.
pub(crate) struct PageContext {
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    pub(crate) fn new() -> Self {
        Self {
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((font, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", vec![color.r.into(), color.g.into(), color.b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    /// Draws `text` starting at `x` on `baseline`.
    pub(crate) fn draw_text(&mut self, text: &str, font: StandardFont, size: f32, color: Color, x: f32, baseline: f32) {
        if text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.set_fill_color(color);
        self.push("Td", vec![x.into(), baseline.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        self.push(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        );
        self.push("f", vec![]);
    }

    /// Paints a named XObject through the matrix `[a 0 0 d e f]`.
    pub(crate) fn paint_xobject(&mut self, name: &str, a: f32, d: f32, e: f32, f: f32) {
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![a.into(), 0.into(), 0.into(), d.into(), e.into(), f.into()],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        // Q restores whatever the XObject changed, so the cached state holds.
        self.push("Q", vec![]);
    }
}

/// Encodes text for the standard fonts' WinAnsiEncoding. Characters the
/// encoding lacks become `?`.
pub(crate) fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(ctx: PageContext) -> Vec<String> {
        ctx.finish()
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect()
    }

    #[test]
    fn test_font_and_color_changes_are_cached() {
        let mut ctx = PageContext::new();
        ctx.draw_text("One", StandardFont::Helvetica, 10.0, Color::INK, 10.0, 10.0);
        ctx.draw_text("Two", StandardFont::Helvetica, 10.0, Color::INK, 10.0, 20.0);
        ctx.draw_text("Three", StandardFont::HelveticaBold, 10.0, Color::INK, 10.0, 30.0);
        let ops = operators(ctx);
        assert_eq!(ops.iter().filter(|o| *o == "Tf").count(), 2);
        assert_eq!(ops.iter().filter(|o| *o == "rg").count(), 1);
        assert_eq!(ops.iter().filter(|o| *o == "Tj").count(), 3);
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let mut ctx = PageContext::new();
        ctx.draw_text("   ", StandardFont::Helvetica, 10.0, Color::INK, 0.0, 0.0);
        assert!(operators(ctx).is_empty());
    }

    #[test]
    fn test_xobject_is_wrapped_in_graphics_state() {
        let mut ctx = PageContext::new();
        ctx.paint_xobject("Im1", 100.0, 50.0, 10.0, 20.0);
        assert_eq!(operators(ctx), vec!["q", "cm", "Do", "Q"]);
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(to_win_ansi("THC: 20.50%"), b"THC: 20.50%".to_vec());
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("a→b"), b"a?b".to_vec());
        assert_eq!(to_win_ansi("Mom’s “OG” – 5€"), b"Mom\x92s \x93OG\x94 \x96 5\x80".to_vec());
    }
}
