use crate::brand::{Brand, Tier};
use crate::error::ValidationError;
use crate::strain::Strain;

/// One label request: a strain sold under a brand's tier.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    strain: Strain,
    brand: Brand,
    tier: Tier,
}

impl QueueEntry {
    /// Fails when the tier is not owned by the brand.
    pub fn new(strain: Strain, brand: Brand, tier: Tier) -> Result<Self, ValidationError> {
        if tier.brand_id() != brand.id() {
            return Err(ValidationError::BrandMismatch {
                tier: tier.name().to_string(),
                tier_brand: tier.brand_id().0,
                brand: brand.id().0,
            });
        }
        Ok(Self { strain, brand, tier })
    }

    pub fn strain(&self) -> &Strain {
        &self.strain
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    pub fn tier(&self) -> &Tier {
        &self.tier
    }

    /// One-line description, e.g.
    /// `MED - Cherry - Red Tier - Strain: Gelato (Hybrid, THC 20.50%, Lineage: None)`.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {} - Strain: {} ({}, THC {:.2}%, Lineage: {})",
            self.brand.category(),
            self.brand.name(),
            self.tier.name(),
            self.strain.name(),
            self.strain.classification(),
            self.strain.thc_percent(),
            self.strain.lineage().unwrap_or("None"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{BrandId, Category, TierId};
    use crate::prices::PriceTable;
    use crate::strain::Classification;

    fn strain() -> Strain {
        Strain::new("Gelato", Classification::Hybrid, 20.5, None).unwrap()
    }

    fn tier(brand: u32) -> Tier {
        Tier::new(TierId(7), BrandId(brand), "Red Tier", None, None, 0.5, PriceTable::new()).unwrap()
    }

    #[test]
    fn test_tier_must_belong_to_brand() {
        let brand = Brand::new(BrandId(1), "Cherry", Category::Med, None).unwrap();
        let err = QueueEntry::new(strain(), brand, tier(2)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BrandMismatch {
                tier: "Red Tier".into(),
                tier_brand: 2,
                brand: 1
            }
        );
    }

    #[test]
    fn test_summary() {
        let brand = Brand::new(BrandId(1), "Cherry", Category::Med, None).unwrap();
        let entry = QueueEntry::new(strain(), brand, tier(1)).unwrap();
        assert_eq!(
            entry.summary(),
            "MED - Cherry - Red Tier - Strain: Gelato (Hybrid, THC 20.50%, Lineage: None)"
        );
    }
}
