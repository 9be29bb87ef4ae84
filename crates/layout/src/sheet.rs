use crate::LayoutError;
use jarlabel_types::{Rect, INCH};
use serde::Deserialize;

/// Physical layout of a label sheet, in points.
///
/// Each slot holds a nametag on the left and its pricetag directly to the
/// right. Slots run down the page from the top margin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub label_width: f32,
    pub label_height: f32,
    pub entries_per_page: usize,
    /// Slot pitch as a multiple of the label height.
    pub slot_gap_factor: f32,
}

impl Default for SheetGeometry {
    /// US Letter with half inch margins and four 3.5 x 2.25 in pairs.
    fn default() -> Self {
        Self {
            page_width: 8.5 * INCH,
            page_height: 11.0 * INCH,
            margin: 0.5 * INCH,
            label_width: 3.5 * INCH,
            label_height: 2.25 * INCH,
            entries_per_page: 4,
            slot_gap_factor: 1.05,
        }
    }
}

impl SheetGeometry {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let lengths = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("label_width", self.label_width),
            ("label_height", self.label_height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidSheet(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(LayoutError::InvalidSheet(format!(
                "margin must not be negative, got {}",
                self.margin
            )));
        }
        if self.entries_per_page == 0 {
            return Err(LayoutError::InvalidSheet("entries_per_page must be at least 1".into()));
        }
        if !self.slot_gap_factor.is_finite() || self.slot_gap_factor < 1.0 {
            return Err(LayoutError::InvalidSheet(format!(
                "slot_gap_factor must be at least 1, got {}",
                self.slot_gap_factor
            )));
        }
        let needed_width = 2.0 * self.label_width;
        let available_width = self.page_width - 2.0 * self.margin;
        if needed_width > available_width {
            return Err(LayoutError::InvalidSheet(format!(
                "two {:.1}pt labels need {:.1}pt but only {:.1}pt fit between the margins",
                self.label_width, needed_width, available_width
            )));
        }
        let last_bottom = self.slot_top(self.entries_per_page - 1) - self.label_height;
        if last_bottom < self.margin - 1e-3 {
            return Err(LayoutError::InvalidSheet(format!(
                "{} slots run {:.1}pt into the bottom margin",
                self.entries_per_page,
                self.margin - last_bottom
            )));
        }
        Ok(())
    }

    /// Top edge of the given slot in page coordinates.
    pub fn slot_top(&self, slot: usize) -> f32 {
        self.page_height - self.margin - slot as f32 * self.label_height * self.slot_gap_factor
    }

    pub fn nametag_rect(&self, slot: usize) -> Rect {
        Rect::from_top_left(self.margin, self.slot_top(slot), self.label_width, self.label_height)
    }

    pub fn pricetag_rect(&self, slot: usize) -> Rect {
        Rect::from_top_left(
            self.margin + self.label_width,
            self.slot_top(slot),
            self.label_width,
            self.label_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_is_valid() {
        let sheet = SheetGeometry::default();
        assert!(sheet.validate().is_ok());
        assert_eq!(sheet.page_width, 612.0);
        assert_eq!(sheet.page_height, 792.0);
    }

    #[test]
    fn test_slot_positions() {
        let sheet = SheetGeometry::default();
        assert_eq!(sheet.slot_top(0), 756.0);
        assert!((sheet.slot_top(2) - (756.0 - 2.0 * 162.0 * 1.05)).abs() < 1e-3);

        let name = sheet.nametag_rect(1);
        let price = sheet.pricetag_rect(1);
        assert_eq!(name.x, 36.0);
        assert_eq!(price.x, 36.0 + 252.0);
        assert_eq!(name.top(), price.top());
        assert_eq!(name.height, 162.0);
    }

    #[test]
    fn test_rejects_too_many_slots() {
        let sheet = SheetGeometry {
            entries_per_page: 5,
            ..Default::default()
        };
        assert!(matches!(sheet.validate(), Err(LayoutError::InvalidSheet(_))));
    }

    #[test]
    fn test_rejects_labels_wider_than_page() {
        let sheet = SheetGeometry {
            label_width: 4.0 * INCH,
            ..Default::default()
        };
        assert!(sheet.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_slots_and_small_gap() {
        let zero = SheetGeometry {
            entries_per_page: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
        let gap = SheetGeometry {
            slot_gap_factor: 0.9,
            ..Default::default()
        };
        assert!(gap.validate().is_err());
    }
}
