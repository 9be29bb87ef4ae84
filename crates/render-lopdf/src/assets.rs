//! Loading and classification of label artwork.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use jarlabel_layout::ArtworkProbe;
use jarlabel_pdf_composer::PageGeometry;
use jarlabel_traits::ResourceProvider;
use jarlabel_types::Size;
use lopdf::Document;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// Decoded artwork, ready to embed.
#[derive(Debug)]
pub enum Asset {
    Image(EmbeddableImage),
    /// A reference PDF; only its first page is ever drawn.
    Page { document: Document, geometry: PageGeometry },
}

impl Asset {
    /// Intrinsic size in points (pixels count as points for images).
    pub fn size(&self) -> Size {
        match self {
            Asset::Image(image) => Size::new(image.width as f32, image.height as f32),
            Asset::Page { geometry, .. } => Size::new(geometry.width(), geometry.height()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddableImage {
    pub width: u32,
    pub height: u32,
    pub encoding: ImageEncoding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageEncoding {
    /// The original JPEG stream, embedded as-is with DCTDecode.
    Jpeg { data: Vec<u8>, color: JpegColor },
    /// Flate-compressed 8-bit RGB with an optional Flate-compressed alpha mask.
    Raster { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

/// Colour layout of a JPEG stream, read from its frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColor {
    Gray,
    Rgb,
    /// Four components. Adobe-written files store the channels inverted.
    Cmyk { inverted: bool },
}

/// Loads artwork through a [`ResourceProvider`] and remembers the outcome
/// per path, so each file is read and decoded at most once per render.
#[derive(Debug)]
pub struct AssetStore {
    provider: Arc<dyn ResourceProvider>,
    cache: RefCell<HashMap<PathBuf, Result<Rc<Asset>, String>>>,
}

impl AssetStore {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Loads and decodes the artwork at `path`. Errors are human readable
    /// reasons, suitable for a missing-resource warning.
    pub fn load(&self, path: &Path) -> Result<Rc<Asset>, String> {
        if let Some(cached) = self.cache.borrow().get(path) {
            log::debug!("Asset cache hit for {}", path.display());
            return cached.clone();
        }
        let result = self.load_uncached(path).map(Rc::new);
        self.cache.borrow_mut().insert(path.to_path_buf(), result.clone());
        result
    }

    /// Forgets every loaded asset, so changed files are picked up again.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    fn load_uncached(&self, path: &Path) -> Result<Asset, String> {
        let bytes = self.provider.load(path).map_err(|e| e.to_string())?;
        decode_asset(&bytes)
    }
}

impl ArtworkProbe for AssetStore {
    fn probe(&self, path: &Path) -> Result<Size, String> {
        self.load(path).map(|asset| asset.size())
    }
}

/// Classifies `bytes` as a reference PDF or a JPEG/PNG image and decodes it.
pub fn decode_asset(bytes: &[u8]) -> Result<Asset, String> {
    if bytes.starts_with(b"%PDF") {
        let document = jarlabel_pdf_composer::load_reference(bytes).map_err(|e| e.to_string())?;
        let geometry = jarlabel_pdf_composer::first_page_geometry(&document).map_err(|e| e.to_string())?;
        return Ok(Asset::Page { document, geometry });
    }

    let format = image::guess_format(bytes).map_err(|e| format!("unrecognized artwork: {e}"))?;
    match format {
        image::ImageFormat::Jpeg | image::ImageFormat::Png => {}
        other => return Err(format!("unsupported image format {other:?}")),
    }
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| e.to_string())?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err("image has no pixels".to_string());
    }

    // The decoder converts CMYK to RGB, so the colour space comes from the
    // stream itself.
    if format == image::ImageFormat::Jpeg {
        let color = jpeg_color(bytes)?;
        return Ok(Asset::Image(EmbeddableImage {
            width,
            height,
            encoding: ImageEncoding::Jpeg {
                data: bytes.to_vec(),
                color,
            },
        }));
    }

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        has_alpha |= a != 255;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    Ok(Asset::Image(EmbeddableImage {
        width,
        height,
        encoding: ImageEncoding::Raster {
            rgb: flate_compress(&rgb).map_err(|e| e.to_string())?,
            alpha: if has_alpha {
                Some(flate_compress(&alpha).map_err(|e| e.to_string())?)
            } else {
                None
            },
        },
    }))
}

/// Walks the JPEG marker segments up to the first frame header and reports
/// its component count, noting an Adobe APP14 segment on the way.
pub fn jpeg_color(bytes: &[u8]) -> Result<JpegColor, String> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return Err("missing JPEG start marker".to_string());
    }
    let mut adobe = false;
    let mut pos = 2;
    while pos + 1 < bytes.len() {
        if bytes[pos] != 0xFF {
            return Err(format!("malformed JPEG marker at byte {pos}"));
        }
        let marker = bytes[pos + 1];
        match marker {
            // Fill byte before a marker.
            0xFF => {
                pos += 1;
                continue;
            }
            0x01 | 0xD0..=0xD8 => {
                pos += 2;
                continue;
            }
            0xD9 | 0xDA => break,
            _ => {}
        }

        let length = match bytes.get(pos + 2..pos + 4) {
            Some(&[hi, lo]) => u16::from_be_bytes([hi, lo]) as usize,
            _ => return Err("truncated JPEG segment".to_string()),
        };
        if length < 2 {
            return Err(format!("invalid JPEG segment length at byte {pos}"));
        }
        let segment = bytes
            .get(pos + 4..pos + 2 + length)
            .ok_or_else(|| "truncated JPEG segment".to_string())?;

        match marker {
            0xEE if segment.starts_with(b"Adobe") => adobe = true,
            // SOF0..SOF15, minus DHT, JPG and DAC.
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                let components = *segment
                    .get(5)
                    .ok_or_else(|| "truncated JPEG frame header".to_string())?;
                return match components {
                    1 => Ok(JpegColor::Gray),
                    3 => Ok(JpegColor::Rgb),
                    4 => Ok(JpegColor::Cmyk { inverted: adobe }),
                    n => Err(format!("unsupported JPEG with {n} colour components")),
                };
            }
            _ => {}
        }
        pos += 2 + length;
    }
    Err("JPEG has no frame header".to_string())
}

pub(crate) fn flate_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
