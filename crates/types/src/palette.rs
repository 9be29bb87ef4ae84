use crate::brand::Category;
use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Tier-name colors for medical labels.
///
/// The two revisions only differ in the yellow tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierPalette {
    #[default]
    Revised,
    Classic,
}

impl TierPalette {
    /// The color a tier name is printed in, or `None` when it should use
    /// the default ink (recreational tiers and unknown tier names).
    pub fn tier_color(&self, category: Category, tier_name: &str) -> Option<Color> {
        if category != Category::Med {
            return None;
        }
        let color = match tier_name.trim().to_ascii_lowercase().as_str() {
            "green tier" => Color::rgb(0.0, 0.5, 0.0),
            "red tier" => Color::rgb(1.0, 0.0, 0.0),
            "yellow tier" => match self {
                TierPalette::Revised => Color::rgb(1.0, 0.8, 0.0),
                TierPalette::Classic => Color::rgb(1.0, 1.0, 0.0),
            },
            "orange tier" => Color::rgb(1.0, 0.65, 0.0),
            "pink tier" => Color::rgb(1.0, 0.08, 0.58),
            "purple tier" => Color::rgb(0.5, 0.0, 0.5),
            _ => return None,
        };
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rec_tiers_use_ink() {
        assert_eq!(TierPalette::Revised.tier_color(Category::Rec, "Red Tier"), None);
    }

    #[test]
    fn test_yellow_differs_by_revision() {
        assert_eq!(
            TierPalette::Revised.tier_color(Category::Med, "Yellow Tier"),
            Some(Color::rgb(1.0, 0.8, 0.0))
        );
        assert_eq!(
            TierPalette::Classic.tier_color(Category::Med, "Yellow Tier"),
            Some(Color::rgb(1.0, 1.0, 0.0))
        );
    }

    #[test]
    fn test_unknown_med_tier_uses_ink() {
        assert_eq!(TierPalette::Revised.tier_color(Category::Med, "Gold Tier"), None);
        assert_eq!(
            TierPalette::Revised.tier_color(Category::Med, "red tier"),
            Some(Color::rgb(1.0, 0.0, 0.0))
        );
    }
}
