//! Axis-aligned rectangles in image coordinates.

/// Rectangle `(x, y, width, height)` with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Center point in pixel coordinates, e.g. for issuing a tap.
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersection_area(&self, other: &Region) -> usize {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        x1.saturating_sub(x0) * y1.saturating_sub(y0)
    }

    /// Intersection over union in `[0, 1]`; zero when either side is empty.
    pub fn iou(&self, other: &Region) -> f32 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union == 0 {
            return 0.0;
        }
        inter as f32 / union as f32
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn iou_of_identical_regions_is_one() {
        let r = Region::new(3, 4, 10, 10);
        assert!((r.iou(&r) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn iou_of_disjoint_regions_is_zero() {
        let a = Region::new(0, 0, 5, 5);
        let b = Region::new(5, 0, 5, 5);
        assert_eq!(a.intersection_area(&b), 0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn iou_of_half_shifted_regions() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 0, 10, 10);
        // 50 / 150
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);
        assert!(Region::new(0, 0, 20, 20).contains(&b));
        assert!(!a.contains(&b));
    }
}
