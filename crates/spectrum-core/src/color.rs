use crate::constants::{DEFAULT_BOTTOM_COLOR, DEFAULT_TOP_COLOR};

/// Linear RGB color with channels in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Blend from `start` to `end`; `alpha` 0 yields `start`, 1 yields `end`.
    ///
    /// Written as `(1 - a) * start + a * end` so both endpoints are exact.
    pub fn lerp(start: Color, end: Color, alpha: f32) -> Color {
        let mix = |s: f32, e: f32| (1.0 - alpha) * s + alpha * e;
        Color::new(mix(start.r, end.r), mix(start.g, end.g), mix(start.b, end.b))
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Color::from_array(rgb)
    }
}

/// Bottom/top color pair used to shade every bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bottom: Color,
    pub top: Color,
}

impl Palette {
    pub const fn new(bottom: Color, top: Color) -> Self {
        Self { bottom, top }
    }

    /// Top color of a bar whose normalized magnitude is `alpha`.
    #[inline]
    pub fn top_for(&self, alpha: f32) -> Color {
        Color::lerp(self.bottom, self.top, alpha)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            Color::from_array(DEFAULT_BOTTOM_COLOR),
            Color::from_array(DEFAULT_TOP_COLOR),
        )
    }
}
