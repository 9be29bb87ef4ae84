use crate::assets::{flate_compress, Asset, AssetStore};
use crate::error::RenderError;
use crate::helpers::PageContext;
use crate::images::embed_image;
use jarlabel_layout::{LabelElement, LabelPlan, SheetGeometry, SheetPlan, StandardFont};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Flate-compress page content streams.
    pub compress_streams: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            compress_streams: true,
        }
    }
}

/// A finished PDF held in memory.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Draws a [`SheetPlan`] into a single PDF document.
#[derive(Debug, Clone, Default)]
pub struct LabelRenderer {
    options: RenderOptions,
}

impl LabelRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders every page of `plan`. Artwork is loaded through `assets`;
    /// the plan only references artwork that probed successfully, so a
    /// failure here is an error rather than a warning.
    pub fn render(
        &self,
        plan: &SheetPlan,
        sheet: &SheetGeometry,
        assets: &AssetStore,
    ) -> Result<RenderedDocument, RenderError> {
        let mut builder = DocumentBuilder::new(self.options);
        for page in &plan.pages {
            let mut ctx = PageContext::new();
            for slot in &page.slots {
                builder.draw_label(&mut ctx, &slot.nametag, assets)?;
                builder.draw_label(&mut ctx, &slot.pricetag, assets)?;
            }
            builder.add_page(ctx, sheet.page_width, sheet.page_height)?;
        }
        let page_count = builder.page_ids.len();
        let bytes = builder.finish()?;
        log::debug!("Rendered {} pages into {} bytes", page_count, bytes.len());
        Ok(RenderedDocument { bytes, page_count })
    }
}

#[derive(Debug, Clone, Copy)]
enum XObjectKind {
    Image,
    Form { width: f32, height: f32 },
}

#[derive(Debug, Clone)]
struct XObjectRef {
    name: String,
    kind: XObjectKind,
}

/// Builds the document's object graph. All pages share one resources
/// dictionary holding both fonts and every embedded XObject.
struct DocumentBuilder {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    xobjects: HashMap<PathBuf, XObjectRef>,
    xobject_dict: Dictionary,
    options: RenderOptions,
}

impl DocumentBuilder {
    fn new(options: RenderOptions) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            xobjects: HashMap::new(),
            xobject_dict: Dictionary::new(),
            options,
        }
    }

    fn draw_label(
        &mut self,
        ctx: &mut PageContext,
        label: &LabelPlan,
        assets: &AssetStore,
    ) -> Result<(), RenderError> {
        for el in &label.elements {
            match &el.element {
                LabelElement::Text(run) => {
                    ctx.draw_text(&run.content, run.font, run.size, run.color, el.rect.x, run.baseline)
                }
                LabelElement::Rule(color) => ctx.fill_rect(el.rect, *color),
                LabelElement::Artwork(artwork) => {
                    let xobject = self.xobject_for(&artwork.path, assets)?;
                    let rect = el.rect;
                    match xobject.kind {
                        XObjectKind::Image => {
                            ctx.paint_xobject(&xobject.name, rect.width, rect.height, rect.x, rect.y)
                        }
                        // The form's own matrix already moves it to the origin.
                        XObjectKind::Form { width, height } => ctx.paint_xobject(
                            &xobject.name,
                            rect.width / width,
                            rect.height / height,
                            rect.x,
                            rect.y,
                        ),
                    }
                }
            }
        }
        Ok(())
    }

    /// Embeds the artwork at `path` on first use and returns its resource name.
    fn xobject_for(&mut self, path: &Path, assets: &AssetStore) -> Result<XObjectRef, RenderError> {
        if let Some(existing) = self.xobjects.get(path) {
            return Ok(existing.clone());
        }
        let asset = assets.load(path).map_err(|reason| RenderError::Artwork {
            path: path.display().to_string(),
            reason,
        })?;
        let n = self.xobjects.len() + 1;
        let (xobject, id) = match asset.as_ref() {
            Asset::Image(image) => {
                let id = embed_image(&mut self.document, image);
                (
                    XObjectRef {
                        name: format!("Im{n}"),
                        kind: XObjectKind::Image,
                    },
                    id,
                )
            }
            Asset::Page { document, .. } => {
                let imported = jarlabel_pdf_composer::import_first_page_as_form(&mut self.document, document)?;
                (
                    XObjectRef {
                        name: format!("Fm{n}"),
                        kind: XObjectKind::Form {
                            width: imported.width(),
                            height: imported.height(),
                        },
                    },
                    imported.form_id,
                )
            }
        };
        log::debug!("Embedded {} as /{}", path.display(), xobject.name);
        self.xobject_dict.set(xobject.name.as_bytes().to_vec(), id);
        self.xobjects.insert(path.to_path_buf(), xobject.clone());
        Ok(xobject)
    }

    fn add_page(&mut self, ctx: PageContext, width: f32, height: f32) -> Result<(), RenderError> {
        let encoded = ctx.finish().encode()?;
        let content_stream = if self.options.compress_streams {
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, flate_compress(&encoded)?)
        } else {
            Stream::new(dictionary! {}, encoded)
        };
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let mut fonts = Dictionary::new();
        for font in [StandardFont::Helvetica, StandardFont::HelveticaBold] {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources = dictionary! {
            "Font" => fonts,
            "XObject" => self.xobject_dict,
        };
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        let info_id = self.document.add_object(dictionary! {
            "Producer" => Object::string_literal("jarlabel"),
            "Title" => Object::string_literal("Labels"),
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
