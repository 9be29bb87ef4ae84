use crate::fonts::{StandardFont, TextMeasure};

/// Outcome of fitting one line of text to a width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub size: f32,
    /// Measured width at `size`.
    pub width: f32,
    /// Still wider than the bound at the floor size. The text is drawn
    /// anyway, never truncated.
    pub overflow: bool,
}

/// Shrinks `text` one point at a time from `start` until it fits in
/// `max_width` or `floor` is reached.
pub fn fit_font_size(
    measure: &dyn TextMeasure,
    text: &str,
    font: StandardFont,
    start: f32,
    floor: f32,
    max_width: f32,
) -> FitResult {
    let floor = floor.min(start);
    let mut size = start;
    let mut width = measure.text_width(text, font, size);
    while width > max_width && size > floor {
        size = (size - 1.0).max(floor);
        width = measure.text_width(text, font, size);
    }
    FitResult {
        size,
        width,
        overflow: width > max_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Standard14Metrics;

    const M: Standard14Metrics = Standard14Metrics;

    #[test]
    fn test_short_text_keeps_start_size() {
        let r = fit_font_size(&M, "OG", StandardFont::HelveticaBold, 22.0, 12.0, 200.0);
        assert_eq!(r.size, 22.0);
        assert!(!r.overflow);
    }

    #[test]
    fn test_long_text_shrinks_deterministically() {
        let text = "GRANDDADDY PURPLE PUNCH";
        let a = fit_font_size(&M, text, StandardFont::HelveticaBold, 22.0, 12.0, 223.2);
        let b = fit_font_size(&M, text, StandardFont::HelveticaBold, 22.0, 12.0, 223.2);
        assert_eq!(a, b);
        assert!(a.size < 22.0 && a.size >= 12.0);
        assert!(a.width <= 223.2);
        // One point larger would not have fit.
        assert!(M.text_width(text, StandardFont::HelveticaBold, a.size + 1.0) > 223.2);
    }

    #[test]
    fn test_overflow_at_floor_is_reported() {
        let text = "SUPERCALIFRAGILISTICEXPIALIDOCIOUS KUSH CAKE";
        let r = fit_font_size(&M, text, StandardFont::HelveticaBold, 22.0, 12.0, 100.0);
        assert_eq!(r.size, 12.0);
        assert!(r.overflow);
        assert!(r.width > 100.0);
    }

    #[test]
    fn test_fractional_start_lands_on_floor() {
        let r = fit_font_size(&M, "WWWWWWWWWW", StandardFont::Helvetica, 12.5, 8.0, 1.0);
        assert_eq!(r.size, 8.0);
    }

    #[test]
    fn test_wider_text_never_gets_a_larger_size() {
        let samples = ["A", "Blue Dream", "WEDDING CAKE", "MMMMMMMMMMMMMMMM", "Sour Diesel x OG Kush"];
        for a in samples {
            for b in samples {
                let wa = M.text_width(a, StandardFont::HelveticaBold, 22.0);
                let wb = M.text_width(b, StandardFont::HelveticaBold, 22.0);
                if wa >= wb {
                    let fa = fit_font_size(&M, a, StandardFont::HelveticaBold, 22.0, 12.0, 150.0);
                    let fb = fit_font_size(&M, b, StandardFont::HelveticaBold, 22.0, 12.0, 150.0);
                    assert!(fa.size <= fb.size, "{a} fit larger than {b}");
                }
            }
        }
    }
}
