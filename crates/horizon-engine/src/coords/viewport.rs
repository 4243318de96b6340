/// Drawable area in physical pixels, origin top-left.
///
/// The frame presenter queries this from the backend every frame so that
/// resizes are picked up without any extra signalling.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport (minimized window) cannot be rendered to.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(Viewport::new(800, 0).is_empty());
        assert!(!Viewport::new(800, 600).is_empty());
    }

    #[test]
    fn from_physical_size() {
        let v: Viewport = winit::dpi::PhysicalSize::new(640u32, 480u32).into();
        assert_eq!(v, Viewport::new(640, 480));
    }
}
