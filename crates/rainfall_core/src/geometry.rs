//! Layout geometry

/// A measured size in layout units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (not yet laid out)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Divide both dimensions by an integer factor
    ///
    /// A nonzero dimension never scales below one unit.
    pub fn scaled_down(&self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        let scale = |value: u32| if value == 0 { 0 } else { (value / divisor).max(1) };
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}
