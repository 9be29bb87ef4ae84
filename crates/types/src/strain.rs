use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five strain classifications a label may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Classification {
    Sativa,
    SativaHybrid,
    Hybrid,
    IndicaHybrid,
    Indica,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Sativa,
        Classification::SativaHybrid,
        Classification::Hybrid,
        Classification::IndicaHybrid,
        Classification::Indica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Sativa => "Sativa",
            Classification::SativaHybrid => "Sativa Hybrid",
            Classification::Hybrid => "Hybrid",
            Classification::IndicaHybrid => "Indica Hybrid",
            Classification::Indica => "Indica",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = ValidationError;

    /// Accepts the display names case-insensitively, with any run of
    /// whitespace, `-` or `_` between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Classification::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ValidationError::UnknownClassification(s.to_string()))
    }
}

impl TryFrom<String> for Classification {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.as_str().to_string()
    }
}

/// A product strain as entered at the counter. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrainRecord", into = "StrainRecord")]
pub struct Strain {
    name: String,
    classification: Classification,
    thc_percent: f64,
    lineage: Option<String>,
}

impl Strain {
    pub fn new(
        name: impl Into<String>,
        classification: Classification,
        thc_percent: f64,
        lineage: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("strain name"));
        }
        if !thc_percent.is_finite() || thc_percent < 0.0 {
            return Err(ValidationError::InvalidThc(thc_percent));
        }
        let lineage = lineage
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Ok(Self {
            name,
            classification,
            thc_percent,
            lineage,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn thc_percent(&self) -> f64 {
        self.thc_percent
    }

    /// The lineage, or `None` when it was absent or blank.
    pub fn lineage(&self) -> Option<&str> {
        self.lineage.as_deref()
    }

    /// THC formatted the way every label prints it, e.g. `THC: 20.50%`.
    pub fn thc_label(&self) -> String {
        format!("THC: {:.2}%", self.thc_percent)
    }
}

/// Wire shape of a strain, used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StrainRecord {
    name: String,
    classification: Classification,
    thc_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lineage: Option<String>,
}

impl TryFrom<StrainRecord> for Strain {
    type Error = ValidationError;

    fn try_from(r: StrainRecord) -> Result<Self, Self::Error> {
        Strain::new(r.name, r.classification, r.thc_percent, r.lineage)
    }
}

impl From<Strain> for StrainRecord {
    fn from(s: Strain) -> Self {
        StrainRecord {
            name: s.name,
            classification: s.classification,
            thc_percent: s.thc_percent,
            lineage: s.lineage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_parsing_is_lenient_about_separators() {
        assert_eq!("sativa hybrid".parse::<Classification>().unwrap(), Classification::SativaHybrid);
        assert_eq!("Indica-Hybrid".parse::<Classification>().unwrap(), Classification::IndicaHybrid);
        assert_eq!(" HYBRID ".parse::<Classification>().unwrap(), Classification::Hybrid);
        assert!("Ruderalis".parse::<Classification>().is_err());
    }

    #[test]
    fn test_strain_rejects_negative_and_nan_thc() {
        assert_eq!(
            Strain::new("Blue Dream", Classification::Hybrid, -1.0, None),
            Err(ValidationError::InvalidThc(-1.0))
        );
        assert!(Strain::new("Blue Dream", Classification::Hybrid, f64::NAN, None).is_err());
    }

    #[test]
    fn test_strain_requires_name() {
        assert_eq!(
            Strain::new("   ", Classification::Indica, 10.0, None),
            Err(ValidationError::EmptyField("strain name"))
        );
    }

    #[test]
    fn test_blank_lineage_is_absent() {
        let s = Strain::new("Gelato", Classification::Hybrid, 20.5, Some("  ".into())).unwrap();
        assert_eq!(s.lineage(), None);
        let s = Strain::new("Gelato", Classification::Hybrid, 20.5, Some("Sunset x Thin Mint".into())).unwrap();
        assert_eq!(s.lineage(), Some("Sunset x Thin Mint"));
    }

    #[test]
    fn test_thc_label_has_two_decimals() {
        let s = Strain::new("Gelato", Classification::Hybrid, 20.5, None).unwrap();
        assert_eq!(s.thc_label(), "THC: 20.50%");
        let s = Strain::new("Gelato", Classification::Hybrid, 0.0, None).unwrap();
        assert_eq!(s.thc_label(), "THC: 0.00%");
        // Rounds the double value, as the menu system does.
        let s = Strain::new("Gelato", Classification::Hybrid, 12.345, None).unwrap();
        assert_eq!(s.thc_label(), "THC: 12.34%");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Strain = serde_json::from_str(
            r#"{"name": "Gelato", "classification": "Indica Hybrid", "thc_percent": 22.1}"#,
        )
        .unwrap();
        assert_eq!(ok.classification(), Classification::IndicaHybrid);

        let bad: Result<Strain, _> = serde_json::from_str(
            r#"{"name": "Gelato", "classification": "Hybrid", "thc_percent": -3}"#,
        );
        assert!(bad.is_err());
    }
}
