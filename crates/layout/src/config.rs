use crate::stack::StackPolicy;
use crate::LayoutError;
use jarlabel_types::{Color, TierPalette, INCH};
use serde::Deserialize;

/// Where the brand logo goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Logo first in the nametag stack, every line centered.
    #[default]
    CenterStack,
    /// Logo at the left of the pricetag header with the brand name beside it.
    LogoLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalPolicy {
    /// Even distribution when the stack leads with a logo, compressed otherwise.
    #[default]
    Auto,
    Compressed,
    Even,
}

/// Starting size and floor for one text role, in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSpec {
    pub size: f32,
    pub floor: f32,
}

impl FontSpec {
    pub const fn new(size: f32, floor: f32) -> Self {
        Self { size, floor }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontRoles {
    pub tier_name: FontSpec,
    pub strain_name: FontSpec,
    pub lineage: FontSpec,
    pub classification: FontSpec,
    pub thc: FontSpec,
    pub brand_name: FontSpec,
    pub price_line: FontSpec,
}

impl Default for FontRoles {
    fn default() -> Self {
        Self {
            tier_name: FontSpec::new(11.0, 8.0),
            strain_name: FontSpec::new(22.0, 12.0),
            lineage: FontSpec::new(10.0, 8.0),
            classification: FontSpec::new(10.0, 8.0),
            thc: FontSpec::new(10.0, 8.0),
            brand_name: FontSpec::new(16.0, 10.0),
            price_line: FontSpec::new(12.0, 8.0),
        }
    }
}

impl FontRoles {
    fn iter(&self) -> impl Iterator<Item = (&'static str, FontSpec)> {
        [
            ("tier_name", self.tier_name),
            ("strain_name", self.strain_name),
            ("lineage", self.lineage),
            ("classification", self.classification),
            ("thc", self.thc),
            ("brand_name", self.brand_name),
            ("price_line", self.price_line),
        ]
        .into_iter()
    }
}

/// Tunables for composing a single label. Lengths are in points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub vertical_policy: VerticalPolicy,
    /// Padding between the label edge and its content, on every side.
    pub inner_margin: f32,
    pub spacing: f32,
    pub tight_spacing: f32,
    /// Fraction of the span above which compressed stacks use `tight_spacing`.
    pub density_threshold: f32,
    pub logo_max_width: f32,
    /// Logo width cap as a fraction of the label width.
    pub logo_width_fraction: f32,
    /// Logo height cap as a fraction of the available vertical span.
    pub logo_height_fraction: f32,
    /// Horizontal gap between logo and brand name in `logo-left` mode.
    pub logo_gap: f32,
    pub palette: TierPalette,
    /// Color of all text that carries no tier color.
    pub ink: Color,
    pub fonts: FontRoles,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            vertical_policy: VerticalPolicy::default(),
            inner_margin: 0.1 * INCH,
            spacing: 0.1 * INCH,
            tight_spacing: 0.05 * INCH,
            density_threshold: 0.8,
            logo_max_width: 1.5 * INCH,
            logo_width_fraction: 0.4,
            logo_height_fraction: 0.3,
            logo_gap: 0.1 * INCH,
            palette: TierPalette::default(),
            ink: Color::INK,
            fonts: FontRoles::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let non_negative = [
            ("inner_margin", self.inner_margin),
            ("spacing", self.spacing),
            ("tight_spacing", self.tight_spacing),
            ("logo_gap", self.logo_gap),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidLayout(format!("{name} must not be negative, got {value}")));
            }
        }
        let fractions = [
            ("density_threshold", self.density_threshold),
            ("logo_width_fraction", self.logo_width_fraction),
            ("logo_height_fraction", self.logo_height_fraction),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(LayoutError::InvalidLayout(format!("{name} must be in (0, 1], got {value}")));
            }
        }
        if !(self.logo_max_width > 0.0) {
            return Err(LayoutError::InvalidLayout(format!(
                "logo_max_width must be positive, got {}",
                self.logo_max_width
            )));
        }
        for (role, spec) in self.fonts.iter() {
            if !(spec.floor > 0.0) || !spec.size.is_finite() {
                return Err(LayoutError::InvalidLayout(format!(
                    "{role} font sizes must be positive, got {} / {}",
                    spec.size, spec.floor
                )));
            }
            if spec.floor > spec.size {
                return Err(LayoutError::InvalidLayout(format!(
                    "{role} floor {} is larger than its starting size {}",
                    spec.floor, spec.size
                )));
            }
        }
        Ok(())
    }

    /// The stack policy for a label, given whether its stack leads with a logo.
    pub fn stack_policy(&self, leads_with_logo: bool) -> StackPolicy {
        let compressed = StackPolicy::Compressed {
            spacing: self.spacing,
            tight_spacing: self.tight_spacing,
            density_threshold: self.density_threshold,
        };
        match self.vertical_policy {
            VerticalPolicy::Auto if leads_with_logo => StackPolicy::Even,
            VerticalPolicy::Auto | VerticalPolicy::Compressed => compressed,
            VerticalPolicy::Even => StackPolicy::Even,
        }
    }
}
