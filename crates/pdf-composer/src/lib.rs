//! Reuse of existing PDF artwork inside generated label documents.
//!
//! Label backgrounds may be designed as one-page PDFs. Their first page is
//! deep-copied into the output document as a Form XObject, which the
//! renderer then paints behind a label like any other image.

mod error;

pub use error::ComposerError;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// US Letter, used when a page carries no usable MediaBox.
const FALLBACK_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// The visible region of a page and how a viewer turns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// CropBox (or MediaBox), `[x0, y0, x1, y1]` in the page's own space.
    pub bbox: [f32; 4],
    /// Clockwise display rotation: 0, 90, 180 or 270.
    pub rotation: u16,
}

impl PageGeometry {
    /// Displayed width, after rotation.
    pub fn width(&self) -> f32 {
        if self.quarter_turned() { self.box_height() } else { self.box_width() }
    }

    /// Displayed height, after rotation.
    pub fn height(&self) -> f32 {
        if self.quarter_turned() { self.box_width() } else { self.box_height() }
    }

    /// Form matrix placing the rotated page upright with its lower-left
    /// corner at the origin.
    pub fn matrix(&self) -> [f32; 6] {
        let [x0, y0, x1, y1] = self.bbox;
        match self.rotation {
            90 => [0.0, -1.0, 1.0, 0.0, -y0, x1],
            180 => [-1.0, 0.0, 0.0, -1.0, x1, y1],
            270 => [0.0, 1.0, -1.0, 0.0, y1, -x0],
            _ => [1.0, 0.0, 0.0, 1.0, -x0, -y0],
        }
    }

    fn quarter_turned(&self) -> bool {
        matches!(self.rotation, 90 | 270)
    }

    fn box_width(&self) -> f32 {
        self.bbox[2] - self.bbox[0]
    }

    fn box_height(&self) -> f32 {
        self.bbox[3] - self.bbox[1]
    }
}

/// A page copied into a target document as a Form XObject. Painting the
/// form through a unit matrix covers `[0, 0, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportedPage {
    pub form_id: ObjectId,
    pub geometry: PageGeometry,
}

impl ImportedPage {
    pub fn width(&self) -> f32 {
        self.geometry.width()
    }

    pub fn height(&self) -> f32 {
        self.geometry.height()
    }
}

/// Copies objects from one document into another, giving each copied
/// object a fresh id and following references recursively.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the id before recursing so reference cycles terminate.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;

        match self.target_doc.objects.get_mut(&new_id) {
            Some(target_obj) => *target_obj = new_obj,
            None => return Err(lopdf::Error::ObjectNotFound(new_id)),
        }
        Ok(new_id)
    }

    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => arr
                .into_iter()
                .map(|o| self.remap_references(o))
                .collect::<Result<Vec<_>, _>>()
                .map(Object::Array),
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.remap_dictionary(dict)?)),
            Object::Stream(mut stream) => {
                stream.dict = self.remap_dictionary(stream.dict)?;
                Ok(Object::Stream(stream))
            }
            other => Ok(other),
        }
    }

    fn remap_dictionary(&mut self, mut dict: Dictionary) -> Result<Dictionary, lopdf::Error> {
        for (_, value) in dict.iter_mut() {
            *value = self.remap_references(value.clone())?;
        }
        Ok(dict)
    }
}

/// Parses a reference PDF held in memory.
pub fn load_reference(bytes: &[u8]) -> Result<Document, ComposerError> {
    Ok(Document::load_mem(bytes)?)
}

/// Visible box and rotation of the first page of `source`.
pub fn first_page_geometry(source: &Document) -> Result<PageGeometry, ComposerError> {
    let pages = source.get_pages();
    let (_, &page_id) = pages.iter().next().ok_or(ComposerError::NoPages)?;
    let page = source.get_object(page_id)?.as_dict()?;
    page_geometry(source, page)
}

fn page_geometry(source: &Document, page: &Dictionary) -> Result<PageGeometry, ComposerError> {
    let media = inherited(source, page, b"MediaBox")
        .and_then(|obj| rectangle(source, obj))
        .unwrap_or(FALLBACK_MEDIA_BOX);
    if media[2] <= media[0] || media[3] <= media[1] {
        return Err(ComposerError::InvalidPage(format!("empty MediaBox {:?}", media)));
    }

    // A CropBox only counts where it overlaps the MediaBox.
    let bbox = inherited(source, page, b"CropBox")
        .and_then(|obj| rectangle(source, obj))
        .map(|crop| {
            [
                crop[0].max(media[0]),
                crop[1].max(media[1]),
                crop[2].min(media[2]),
                crop[3].min(media[3]),
            ]
        })
        .filter(|b| b[2] > b[0] && b[3] > b[1])
        .unwrap_or(media);

    let rotate = inherited(source, page, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0);
    let rotation = match rotate.rem_euclid(360) {
        r @ (0 | 90 | 180 | 270) => r as u16,
        other => {
            log::warn!("Ignoring page rotation of {other} degrees");
            0
        }
    };
    Ok(PageGeometry { bbox, rotation })
}

/// Decoded content streams of a page, one per line.
fn page_content(source: &Document, page_id: ObjectId) -> Vec<u8> {
    let mut content = Vec::new();
    for stream_id in source.get_page_contents(page_id) {
        let Ok(stream) = source.get_object(stream_id).and_then(Object::as_stream) else {
            continue;
        };
        if !content.is_empty() {
            content.push(b'\n');
        }
        match stream.decompressed_content() {
            Ok(data) => content.extend_from_slice(&data),
            Err(_) => content.extend_from_slice(&stream.content),
        }
    }
    content
}

/// Copies the first page of `source` into `target` as a Form XObject.
///
/// The page's content streams are concatenated into the form and its
/// resources are deep-copied. The visible box becomes the form's BBox and
/// the page rotation its Matrix. Later pages are ignored.
pub fn import_first_page_as_form(
    target: &mut Document,
    source: &Document,
) -> Result<ImportedPage, ComposerError> {
    let pages = source.get_pages();
    let (_, &page_id) = pages.iter().next().ok_or(ComposerError::NoPages)?;
    if pages.len() > 1 {
        log::debug!("Reference document has {} pages, using the first", pages.len());
    }

    let page = source.get_object(page_id)?.as_dict()?;
    let geometry = page_geometry(source, page)?;
    let content = page_content(source, page_id);

    let mut copier = ObjectCopier::new(source, target);
    let resources = match inherited(source, page, b"Resources") {
        Some(obj) => copier.remap_references(obj.clone())?,
        None => Object::Dictionary(Dictionary::new()),
    };

    let form = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "FormType" => 1,
            "BBox" => geometry.bbox.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
            "Matrix" => geometry.matrix().iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
            "Resources" => resources,
        },
        content,
    );
    let form_id = target.add_object(form);
    Ok(ImportedPage { form_id, geometry })
}

/// Looks `key` up on a page, walking up the page tree for inheritable
/// attributes.
fn inherited<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut node = page;
    // Page trees are shallow; the bound stops malformed parent cycles.
    for _ in 0..32 {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_object(parent).and_then(Object::as_dict).ok()?;
    }
    None
}

fn rectangle(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let values = obj.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut bbox = [0.0; 4];
    for (slot, value) in bbox.iter_mut().zip(values) {
        *slot = match value {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => return None,
        };
    }
    let [a, b, c, d] = bbox;
    Some([a.min(c), b.min(d), a.max(c), b.max(d)])
}
