use image::{ImageBuffer, ImageFormat, Rgb, Rgba};
use jarlabel::types::{
    Brand, BrandId, Category, Classification, PriceTable, QueueEntry, Strain, Tier, TierId,
};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Cursor;
use std::path::PathBuf;

/// A PNG with a translucent fill, so it carries a soft mask when embedded
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgba([200u8, 30, 30, 128]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png fixture");
    bytes
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([240u8, 220, 120]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("encode jpeg fixture");
    bytes
}

/// A reference document whose pages are `width` x `height` points.
pub fn reference_pdf(pages: usize, width: i64, height: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for i in 0..pages {
        let content = format!("0 0 {} rg 0 0 {width} {height} re f", i % 2).into_bytes();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Resources" => dictionary! {},
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save reference pdf fixture");
    bytes
}

/// Builds queue entries with sensible defaults.
pub struct EntryBuilder {
    strain: String,
    classification: Classification,
    thc: f64,
    lineage: Option<String>,
    brand: String,
    category: Category,
    tier: String,
    logo: Option<PathBuf>,
    nametag_background: Option<PathBuf>,
    pricetag_background: Option<PathBuf>,
    prices: Vec<(&'static str, &'static str)>,
}

impl EntryBuilder {
    pub fn new(strain: &str) -> Self {
        Self {
            strain: strain.to_string(),
            classification: Classification::Hybrid,
            thc: 20.5,
            lineage: None,
            brand: "Cherry".to_string(),
            category: Category::Med,
            tier: "Red Tier".to_string(),
            logo: None,
            nametag_background: None,
            pricetag_background: None,
            prices: Vec::new(),
        }
    }

    pub fn lineage(mut self, lineage: &str) -> Self {
        self.lineage = Some(lineage.to_string());
        self
    }

    pub fn rec(mut self, brand: &str, tier: &str) -> Self {
        self.category = Category::Rec;
        self.brand = brand.to_string();
        self.tier = tier.to_string();
        self
    }

    pub fn logo(mut self, path: &str) -> Self {
        self.logo = Some(path.into());
        self
    }

    pub fn backgrounds(mut self, nametag: Option<&str>, pricetag: Option<&str>) -> Self {
        self.nametag_background = nametag.map(PathBuf::from);
        self.pricetag_background = pricetag.map(PathBuf::from);
        self
    }

    pub fn prices(mut self, prices: &[(&'static str, &'static str)]) -> Self {
        self.prices = prices.to_vec();
        self
    }

    pub fn build(self) -> QueueEntry {
        let strain = Strain::new(self.strain, self.classification, self.thc, self.lineage).expect("valid strain");
        let brand = Brand::new(BrandId(1), self.brand, self.category, self.logo).expect("valid brand");
        let prices: PriceTable = self.prices.into_iter().collect();
        let tier = Tier::new(
            TierId(1),
            BrandId(1),
            self.tier,
            self.nametag_background,
            self.pricetag_background,
            0.5,
            prices,
        )
        .expect("valid tier");
        QueueEntry::new(strain, brand, tier).expect("matching brand")
    }
}
