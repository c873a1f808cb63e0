use crate::color::{Color, Palette};
use crate::constants::{MAX_SAMPLE_VALUE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use glam::Vec3;

/// Placement and shading of the bar for one frequency bin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    /// Left-bottom-front corner.
    pub position: Vec3,
    /// Width, height and depth (depth is 0 for flat bars).
    pub size: Vec3,
    pub bottom_color: Color,
    pub top_color: Color,
}

/// Magnitude sample scaled to [0, 1].
#[inline]
pub fn normalize(value: u8) -> f32 {
    value as f32 / MAX_SAMPLE_VALUE
}

/// Bar height in viewport units; full scale spans the whole viewport.
#[inline]
pub fn bar_height(value: u8) -> f32 {
    VIEWPORT_HEIGHT * normalize(value)
}

/// Width of each bar when `bin_count` bars share the viewport.
#[inline]
pub fn bar_width(bin_count: usize) -> f32 {
    if bin_count == 0 {
        return 0.0;
    }
    VIEWPORT_WIDTH / bin_count as f32
}

/// Lay out one bar per bin left to right starting at `origin`.
///
/// Empty input yields no bars.
pub fn layout_bars(samples: &[u8], origin: Vec3, depth: f32, palette: &Palette) -> Vec<Bar> {
    let width = bar_width(samples.len());
    samples
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let alpha = normalize(value);
            Bar {
                position: Vec3::new(origin.x + i as f32 * width, origin.y, origin.z),
                size: Vec3::new(width, bar_height(value), depth),
                bottom_color: palette.bottom,
                top_color: palette.top_for(alpha),
            }
        })
        .collect()
}
