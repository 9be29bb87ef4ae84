//! Advance widths of the two standard PDF fonts labels are set in.
//!
//! Labels reference the base-14 Type1 fonts instead of embedding font
//! files, so the widths a viewer will use are the published Adobe Font
//! Metrics. Tables cover the printable ASCII range (0x20..=0x7E) and the
//! WinAnsiEncoding punctuation block (0x80..=0x9F), in thousandths of an em.

/// A standard PDF Type1 font used on labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The `/BaseFont` name written into the PDF font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the shared page resources dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of one character in 1/1000 em. Characters outside the
    /// tables measure as the font's average width.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as u32;
        if (0x20..=0x7E).contains(&code) {
            return self.widths()[(code - 0x20) as usize] as f32;
        }
        match WIN_ANSI_SPECIALS.iter().find(|special| special.ch == c) {
            Some(special) => match self {
                StandardFont::Helvetica => special.regular as f32,
                StandardFont::HelveticaBold => special.bold as f32,
            },
            None => self.average_width(),
        }
    }

    pub fn average_width(&self) -> f32 {
        let widths = self.widths();
        widths.iter().map(|w| *w as f32).sum::<f32>() / widths.len() as f32
    }
}

/// Measures rendered text width. The layout engine only sees this trait,
/// so tests and alternative font sources can supply their own metrics.
pub trait TextMeasure {
    /// Width in points of `text` set in `font` at `size` points.
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32;
}

/// [`TextMeasure`] backed by the built-in AFM tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Standard14Metrics;

impl TextMeasure for Standard14Metrics {
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| font.char_width(c)).sum();
        units * size / 1000.0
    }
}

/// WinAnsiEncoding byte for `c`, or `None` when the standard fonts cannot
/// show it.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => Some(code as u8),
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|special| special.ch == c)
            .map(|special| special.code),
    }
}

struct WinAnsiSpecial {
    ch: char,
    code: u8,
    regular: u16,
    bold: u16,
}

const fn special(ch: char, code: u8, regular: u16, bold: u16) -> WinAnsiSpecial {
    WinAnsiSpecial { ch, code, regular, bold }
}

// Where WinAnsi departs from Latin-1.
#[rustfmt::skip]
static WIN_ANSI_SPECIALS: [WinAnsiSpecial; 27] = [
    special('\u{20AC}', 0x80, 556, 556),  // Euro
    special('\u{201A}', 0x82, 222, 278),  // quotesinglbase
    special('\u{0192}', 0x83, 556, 556),  // florin
    special('\u{201E}', 0x84, 333, 500),  // quotedblbase
    special('\u{2026}', 0x85, 1000, 1000), // ellipsis
    special('\u{2020}', 0x86, 556, 556),  // dagger
    special('\u{2021}', 0x87, 556, 556),  // daggerdbl
    special('\u{02C6}', 0x88, 333, 333),  // circumflex
    special('\u{2030}', 0x89, 1000, 1000), // perthousand
    special('\u{0160}', 0x8A, 667, 667),  // Scaron
    special('\u{2039}', 0x8B, 333, 333),  // guilsinglleft
    special('\u{0152}', 0x8C, 1000, 1000), // OE
    special('\u{017D}', 0x8E, 611, 611),  // Zcaron
    special('\u{2018}', 0x91, 222, 278),  // quoteleft
    special('\u{2019}', 0x92, 222, 278),  // quoteright
    special('\u{201C}', 0x93, 333, 500),  // quotedblleft
    special('\u{201D}', 0x94, 333, 500),  // quotedblright
    special('\u{2022}', 0x95, 350, 350),  // bullet
    special('\u{2013}', 0x96, 556, 556),  // endash
    special('\u{2014}', 0x97, 1000, 1000), // emdash
    special('\u{02DC}', 0x98, 333, 333),  // tilde
    special('\u{2122}', 0x99, 1000, 1000), // trademark
    special('\u{0161}', 0x9A, 500, 556),  // scaron
    special('\u{203A}', 0x9B, 333, 333),  // guilsinglright
    special('\u{0153}', 0x9C, 944, 944),  // oe
    special('\u{017E}', 0x9E, 500, 500),  // zcaron
    special('\u{0178}', 0x9F, 667, 667),  // Ydieresis
];

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];
