/// Points per inch. All layout lengths are PDF points.
pub const INCH: f32 = 72.0;

/// An axis-aligned rectangle in page space.
///
/// The origin is the bottom-left corner of the page, matching PDF user
/// space, so `y` is the bottom edge and `top()` is `y + height`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rectangle from its top-left corner, growing downwards.
    pub fn from_top_left(x: f32, top: f32, width: f32, height: f32) -> Self {
        Self { x, y: top - height, width, height }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or 1.0 for degenerate sizes.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_top_left() {
        let r = Rect::from_top_left(10.0, 100.0, 50.0, 30.0);
        assert_eq!(r.y, 70.0);
        assert_eq!(r.top(), 100.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.center_x(), 35.0);
    }

    #[test]
    fn test_aspect_ratio_of_degenerate_size() {
        assert_eq!(Size::default().aspect_ratio(), 1.0);
        assert_eq!(Size::new(200.0, 100.0).aspect_ratio(), 2.0);
    }
}
