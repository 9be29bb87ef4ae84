//! JSON-file backed brand and tier catalog, and the job files that refer
//! to it by name.

use crate::error::CatalogError;
use crate::generator::save_atomically;
use jarlabel_types::{
    Brand, BrandId, Category, PriceTable, QueueEntry, Strain, Tier, TierId, DEFAULT_NAMETAG_TOP_MARGIN,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const REC_BRANDS: &[(&str, &[&str])] = &[
    ("710 Labs", &["710 Labs Deli"]),
    ("Antero", &["Antero Popcorn", "Antero Premium Buds"]),
    ("Boulder Built", &["Boulder Built"]),
    ("Cherry", &["Cherry"]),
    ("Legacy Grown", &["Popcorn", "Buds", "Premium"]),
    ("Locol Love", &["Locol Love"]),
    ("Natty Rems", &["Natty Rems"]),
    ("Petrol", &["Petrol"]),
];

const MED_BRANDS: &[(&str, &[&str])] = &[
    ("Boulder Built", &["Red Tier", "Yellow Tier", "Pink Tier"]),
    ("Canna Club", &["Red Tier"]),
    ("Cherry", &["Red Tier", "Purple Tier"]),
    ("Karmaceuticals", &["Green Tier"]),
    ("Legacy Grown", &["Red Tier", "Orange Tier", "Yellow Tier", "Green Tier"]),
    ("Natty Rems", &["Purple Tier"]),
    ("Leiffa", &["Orange Tier", "Yellow Tier"]),
    ("NuHi", &["Red Tier"]),
    ("Petrol", &["Pink Tier"]),
    ("Shift", &["Yellow Tier"]),
    ("Vera", &["Red Tier"]),
    ("Long Gone Farms", &["Red Tier"]),
];

/// Everything needed to add a tier besides its id.
#[derive(Debug, Clone)]
pub struct TierDraft {
    pub brand_id: BrandId,
    pub name: String,
    pub nametag_background: Option<PathBuf>,
    pub pricetag_background: Option<PathBuf>,
    /// Inches.
    pub nametag_top_margin: f32,
    pub prices: PriceTable,
}

impl TierDraft {
    pub fn new(brand_id: BrandId, name: impl Into<String>) -> Self {
        Self {
            brand_id,
            name: name.into(),
            nametag_background: None,
            pricetag_background: None,
            nametag_top_margin: DEFAULT_NAMETAG_TOP_MARGIN,
            prices: PriceTable::new(),
        }
    }
}

impl From<&Tier> for TierDraft {
    fn from(tier: &Tier) -> Self {
        Self {
            brand_id: tier.brand_id(),
            name: tier.name().to_string(),
            nametag_background: tier.nametag_background().map(Path::to_path_buf),
            pricetag_background: tier.pricetag_background().map(Path::to_path_buf),
            nametag_top_margin: tier.nametag_top_margin(),
            prices: tier.prices().clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    brands: Vec<Brand>,
    #[serde(default)]
    tiers: Vec<Tier>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shop's REC and MED brand lists, without artwork or prices.
    pub fn seeded() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for (category, brands) in [(Category::Rec, REC_BRANDS), (Category::Med, MED_BRANDS)] {
            for (brand, tiers) in brands {
                let brand_id = catalog.add_brand(*brand, category, None)?;
                for tier in *tiers {
                    catalog.add_tier(TierDraft::new(brand_id, *tier))?;
                }
            }
        }
        log::debug!(
            "Seeded {} brands and {} tiers",
            catalog.brands.len(),
            catalog.tiers.len()
        );
        Ok(catalog)
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn brand(&self, id: BrandId) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id() == id)
    }

    /// Case-insensitive lookup within one category.
    pub fn find_brand(&self, category: Category, name: &str) -> Option<&Brand> {
        let name = name.trim();
        self.brands
            .iter()
            .find(|b| b.category() == category && b.name().eq_ignore_ascii_case(name))
    }

    pub fn find_tier(&self, brand: BrandId, name: &str) -> Option<&Tier> {
        let name = name.trim();
        self.tiers_for(brand).find(|t| t.name().eq_ignore_ascii_case(name))
    }

    pub fn tiers_for(&self, brand: BrandId) -> impl Iterator<Item = &Tier> {
        self.tiers.iter().filter(move |t| t.brand_id() == brand)
    }

    /// Adds a brand. Names are unique within a category.
    pub fn add_brand(
        &mut self,
        name: &str,
        category: Category,
        logo_path: Option<PathBuf>,
    ) -> Result<BrandId, CatalogError> {
        if self.find_brand(category, name).is_some() {
            return Err(CatalogError::DuplicateBrand {
                name: name.trim().to_string(),
                category,
            });
        }
        let id = BrandId(self.brands.iter().map(|b| b.id().0).max().unwrap_or(0) + 1);
        self.brands.push(Brand::new(id, name, category, logo_path)?);
        Ok(id)
    }

    /// Adds a tier to an existing brand. Names are unique within a brand.
    pub fn add_tier(&mut self, draft: TierDraft) -> Result<TierId, CatalogError> {
        if self.brand(draft.brand_id).is_none() {
            return Err(CatalogError::MissingBrand(draft.brand_id));
        }
        if self.find_tier(draft.brand_id, &draft.name).is_some() {
            return Err(CatalogError::DuplicateTier {
                brand: draft.brand_id,
                name: draft.name.trim().to_string(),
            });
        }
        let id = TierId(self.tiers.iter().map(|t| t.id().0).max().unwrap_or(0) + 1);
        self.tiers.push(Tier::new(
            id,
            draft.brand_id,
            draft.name,
            draft.nametag_background,
            draft.pricetag_background,
            draft.nametag_top_margin,
            draft.prices,
        )?);
        Ok(id)
    }

    /// Replaces the settings of an existing tier, keeping its id. The draft
    /// may move the tier to another brand.
    pub fn update_tier(&mut self, id: TierId, draft: TierDraft) -> Result<(), CatalogError> {
        let index = self
            .tiers
            .iter()
            .position(|t| t.id() == id)
            .ok_or(CatalogError::MissingTier(id))?;
        if self.brand(draft.brand_id).is_none() {
            return Err(CatalogError::MissingBrand(draft.brand_id));
        }
        if self
            .find_tier(draft.brand_id, &draft.name)
            .is_some_and(|other| other.id() != id)
        {
            return Err(CatalogError::DuplicateTier {
                brand: draft.brand_id,
                name: draft.name.trim().to_string(),
            });
        }
        self.tiers[index] = Tier::new(
            id,
            draft.brand_id,
            draft.name,
            draft.nametag_background,
            draft.pricetag_background,
            draft.nametag_top_margin,
            draft.prices,
        )?;
        Ok(())
    }

    pub fn remove_tier(&mut self, id: TierId) -> Result<Tier, CatalogError> {
        let index = self
            .tiers
            .iter()
            .position(|t| t.id() == id)
            .ok_or(CatalogError::MissingTier(id))?;
        Ok(self.tiers.remove(index))
    }

    /// Removes a brand and every tier it owns.
    pub fn remove_brand(&mut self, id: BrandId) -> Result<Brand, CatalogError> {
        let index = self
            .brands
            .iter()
            .position(|b| b.id() == id)
            .ok_or(CatalogError::MissingBrand(id))?;
        let before = self.tiers.len();
        self.tiers.retain(|t| t.brand_id() != id);
        let brand = self.brands.remove(index);
        log::debug!(
            "Removed brand '{}' and {} tier(s)",
            brand.name(),
            before - self.tiers.len()
        );
        Ok(brand)
    }

    /// Looks up the brand and tier a job entry names and builds the queue
    /// entry.
    pub fn resolve(&self, job: &JobEntry) -> Result<QueueEntry, CatalogError> {
        let brand = self
            .find_brand(job.category, &job.brand)
            .ok_or_else(|| CatalogError::UnknownBrand {
                name: job.brand.clone(),
                category: job.category,
            })?;
        let tier = self
            .find_tier(brand.id(), &job.tier)
            .ok_or_else(|| CatalogError::UnknownTier {
                brand: brand.name().to_string(),
                tier: job.tier.clone(),
            })?;
        Ok(QueueEntry::new(job.strain.clone(), brand.clone(), tier.clone())?)
    }

    /// Rejects duplicate ids, duplicate names and tiers without a brand.
    pub fn check(&self) -> Result<(), CatalogError> {
        let mut brand_ids = HashSet::new();
        let mut brand_names = HashSet::new();
        for brand in &self.brands {
            if !brand_ids.insert(brand.id()) {
                return Err(CatalogError::Inconsistent(format!("brand id {} is used twice", brand.id())));
            }
            if !brand_names.insert((brand.category(), brand.name().to_ascii_lowercase())) {
                return Err(CatalogError::DuplicateBrand {
                    name: brand.name().to_string(),
                    category: brand.category(),
                });
            }
        }

        let mut tier_ids = HashSet::new();
        let mut tier_names = HashSet::new();
        for tier in &self.tiers {
            if !tier_ids.insert(tier.id()) {
                return Err(CatalogError::Inconsistent(format!("tier id {} is used twice", tier.id())));
            }
            if !brand_ids.contains(&tier.brand_id()) {
                return Err(CatalogError::Inconsistent(format!(
                    "tier '{}' belongs to missing brand {}",
                    tier.name(),
                    tier.brand_id()
                )));
            }
            if !tier_names.insert((tier.brand_id(), tier.name().to_ascii_lowercase())) {
                return Err(CatalogError::DuplicateTier {
                    brand: tier.brand_id(),
                    name: tier.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// An owned catalog bound to the file it is saved to.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogStore {
    /// Reads the catalog at `path`. A missing file is an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let catalog = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            let catalog: Catalog = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
                path: path.clone(),
                source,
            })?;
            catalog.check()?;
            catalog
        } else {
            log::info!("No catalog at {}; starting empty", path.display());
            Catalog::new()
        };
        Ok(Self { path, catalog })
    }

    /// A store for `catalog` that has not been written yet.
    pub fn with_catalog(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            path: path.into(),
            catalog,
        }
    }

    pub fn save(&self) -> Result<(), CatalogError> {
        let json = serde_json::to_vec_pretty(&self.catalog).map_err(|source| CatalogError::Json {
            path: self.path.clone(),
            source,
        })?;
        save_atomically(&self.path, &json).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Saved catalog to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }
}

/// A batch of labels to print, naming brands and tiers by catalog name.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub entries: Vec<JobEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobEntry {
    pub category: Category,
    pub brand: String,
    pub tier: String,
    pub strain: Strain,
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves every entry, stopping at the first that does not match the
    /// catalog.
    pub fn resolve(&self, catalog: &Catalog) -> Result<Vec<QueueEntry>, CatalogError> {
        self.entries.iter().map(|entry| catalog.resolve(entry)).collect()
    }
}
