use crate::error::ValidationError;
use crate::prices::PriceTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top margin of the nametag content, in inches, when a tier does not set one.
pub const DEFAULT_NAMETAG_TOP_MARGIN: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(pub u32);

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Retail category. Only medical tiers get palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Rec,
    Med,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rec => "REC",
            Category::Med => "MED",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REC" => Ok(Category::Rec),
            "MED" => Ok(Category::Med),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

fn non_blank_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty() && !p.to_string_lossy().trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BrandRecord", into = "BrandRecord")]
pub struct Brand {
    id: BrandId,
    name: String,
    category: Category,
    logo_path: Option<PathBuf>,
}

impl Brand {
    pub fn new(
        id: BrandId,
        name: impl Into<String>,
        category: Category,
        logo_path: Option<PathBuf>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("brand name"));
        }
        Ok(Self {
            id,
            name,
            category,
            logo_path: non_blank_path(logo_path),
        })
    }

    pub fn id(&self) -> BrandId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn logo_path(&self) -> Option<&Path> {
        self.logo_path.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BrandRecord {
    id: BrandId,
    name: String,
    category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logo_path: Option<PathBuf>,
}

impl TryFrom<BrandRecord> for Brand {
    type Error = ValidationError;

    fn try_from(r: BrandRecord) -> Result<Self, Self::Error> {
        Brand::new(r.id, r.name, r.category, r.logo_path)
    }
}

impl From<Brand> for BrandRecord {
    fn from(b: Brand) -> Self {
        BrandRecord {
            id: b.id,
            name: b.name,
            category: b.category,
            logo_path: b.logo_path,
        }
    }
}

/// A price tier of one brand, with its label backgrounds and prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierRecord", into = "TierRecord")]
pub struct Tier {
    id: TierId,
    brand_id: BrandId,
    name: String,
    nametag_background: Option<PathBuf>,
    pricetag_background: Option<PathBuf>,
    nametag_top_margin: f32,
    prices: PriceTable,
}

impl Tier {
    pub fn new(
        id: TierId,
        brand_id: BrandId,
        name: impl Into<String>,
        nametag_background: Option<PathBuf>,
        pricetag_background: Option<PathBuf>,
        nametag_top_margin: f32,
        prices: PriceTable,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("tier name"));
        }
        if !nametag_top_margin.is_finite() || nametag_top_margin < 0.0 {
            return Err(ValidationError::InvalidMargin(nametag_top_margin));
        }
        Ok(Self {
            id,
            brand_id,
            name,
            nametag_background: non_blank_path(nametag_background),
            pricetag_background: non_blank_path(pricetag_background),
            nametag_top_margin,
            prices,
        })
    }

    pub fn id(&self) -> TierId {
        self.id
    }

    pub fn brand_id(&self) -> BrandId {
        self.brand_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nametag_background(&self) -> Option<&Path> {
        self.nametag_background.as_deref()
    }

    pub fn pricetag_background(&self) -> Option<&Path> {
        self.pricetag_background.as_deref()
    }

    /// Top margin of the nametag content in inches.
    pub fn nametag_top_margin(&self) -> f32 {
        self.nametag_top_margin
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }
}

fn default_top_margin() -> f32 {
    DEFAULT_NAMETAG_TOP_MARGIN
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TierRecord {
    id: TierId,
    brand_id: BrandId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nametag_background: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pricetag_background: Option<PathBuf>,
    #[serde(default = "default_top_margin")]
    nametag_top_margin: f32,
    #[serde(default)]
    prices: PriceTable,
}

impl TryFrom<TierRecord> for Tier {
    type Error = ValidationError;

    fn try_from(r: TierRecord) -> Result<Self, Self::Error> {
        Tier::new(
            r.id,
            r.brand_id,
            r.name,
            r.nametag_background,
            r.pricetag_background,
            r.nametag_top_margin,
            r.prices,
        )
    }
}

impl From<Tier> for TierRecord {
    fn from(t: Tier) -> Self {
        TierRecord {
            id: t.id,
            brand_id: t.brand_id,
            name: t.name,
            nametag_background: t.nametag_background,
            pricetag_background: t.pricetag_background,
            nametag_top_margin: t.nametag_top_margin,
            prices: t.prices,
        }
    }
}
