use std::fmt;
use std::ops::BitOr;

use crate::time::TimeStep;

/// Window style flags for the hosted child window.
///
/// Values are the Win32 `WS_*` bits; other platforms map them onto the nearest
/// window attribute (or ignore them).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct WindowStyle(u32);

impl WindowStyle {
    pub const CHILD: Self = Self(0x4000_0000);
    pub const VISIBLE: Self = Self(0x1000_0000);
    pub const BORDER: Self = Self(0x0080_0000);
    pub const VSCROLL: Self = Self(0x0020_0000);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for WindowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::CHILD | Self::VISIBLE
    }
}

impl fmt::Debug for WindowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::CHILD, "CHILD"),
            (Self::VISIBLE, "VISIBLE"),
            (Self::BORDER, "BORDER"),
            (Self::VSCROLL, "VSCROLL"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "WindowStyle({})", set.join(" | "))
    }
}

/// Hosted surface configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Child window size in physical pixels.
    pub width: u32,
    pub height: u32,

    /// Position relative to the parent's client origin.
    pub x: i32,
    pub y: i32,

    pub style: WindowStyle,

    /// How the animation timer advances per tick.
    pub time_step: TimeStep,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            x: 0,
            y: 0,
            style: WindowStyle::default(),
            time_step: TimeStep::default(),
        }
    }
}

impl SurfaceConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_time_step(mut self, time_step: TimeStep) -> Self {
        self.time_step = time_step;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_visible_child_without_decoration() {
        let style = WindowStyle::default();
        assert_eq!(style.bits(), 0x5000_0000);
        assert!(style.contains(WindowStyle::CHILD));
        assert!(!style.contains(WindowStyle::BORDER));
        assert!(!style.contains(WindowStyle::VSCROLL));
    }

    #[test]
    fn debug_lists_flags() {
        let style = WindowStyle::CHILD | WindowStyle::BORDER;
        assert_eq!(format!("{style:?}"), "WindowStyle(CHILD | BORDER)");
    }

    #[test]
    fn default_surface_matches_observed_configuration() {
        let config = SurfaceConfig::default();
        assert_eq!((config.width, config.height, config.x, config.y), (1024, 1024, 0, 0));
        assert_eq!(config.time_step, TimeStep::Fixed(16.0));
    }
}
