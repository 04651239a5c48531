//! Auth popup placement.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// Screen dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

/// Size and position of the auth popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupGeometry {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
}

impl PopupGeometry {
    /// Centre a `width` x `height` popup on `screen`.
    ///
    /// Offsets go negative when the popup is larger than the screen; browsers
    /// clamp them.
    #[must_use]
    pub fn centered(screen: ScreenSize, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            left: half(screen.width) - half(width),
            top: half(screen.height) - half(height),
        }
    }

    /// `window.open` feature string.
    #[must_use]
    pub fn features(&self) -> String {
        format!(
            "width={},height={},top={},left={}",
            self.width, self.height, self.top, self.left
        )
    }
}

fn half(value: u32) -> i32 {
    i32::try_from(value / 2).unwrap_or(i32::MAX)
}
