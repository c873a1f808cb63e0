//! Spectrum visualizations: one bar per frequency bin, rebuilt on every update.
//!
//! All three variants share one interface (`init`, `update`, `draw`,
//! `destroy`). The extended variant keeps earlier frames and stacks each new
//! one `depth` closer to the viewer, moving the camera by the same amount so
//! the newest frame stays in view.

use crate::camera::PerspectiveCamera;
use crate::color::Palette;
use crate::config::{ConfigError, VisualizerConfig};
use crate::constants::VIEWPORT_ORIGIN;
use crate::primitive::{BufferAllocator, DrawTarget, Primitive};
use crate::spectrum::{layout_bars, Bar};
use glam::{Mat4, Vec3};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualizationKind {
    Flat2D,
    Simple3D,
    Extended3D,
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 3] = [
        VisualizationKind::Flat2D,
        VisualizationKind::Simple3D,
        VisualizationKind::Extended3D,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VisualizationKind::Flat2D => "2d",
            VisualizationKind::Simple3D => "3d",
            VisualizationKind::Extended3D => "3d-extended",
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualizationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2d" => Ok(VisualizationKind::Flat2D),
            "3d" | "3d-simple" => Ok(VisualizationKind::Simple3D),
            "3d-extended" => Ok(VisualizationKind::Extended3D),
            _ => Err(ConfigError::UnknownVisualization(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Variant {
    Flat2D,
    Simple3D { origin: Vec3, depth: f32 },
    Extended3D { depth: f32, depth_offset: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
}

pub struct SpectrumVisualization<B> {
    variant: Variant,
    palette: Palette,
    history_limit: Option<usize>,
    frames: VecDeque<Vec<Primitive<B>>>,
    lifecycle: Lifecycle,
}

impl<B> SpectrumVisualization<B> {
    /// Rectangles along one row across the viewport.
    pub fn flat_2d(palette: Palette) -> Self {
        Self::with_variant(Variant::Flat2D, palette, None)
    }

    /// Cuboids of fixed `depth` starting at `origin`.
    pub fn simple_3d(origin: Vec3, depth: f32, palette: Palette) -> Self {
        Self::with_variant(Variant::Simple3D { origin, depth }, palette, None)
    }

    /// Cuboids stacked towards the viewer on every update. With a
    /// `history_limit` the oldest frames are released once exceeded; a limit
    /// of 0 is treated as 1 so the newest frame always stays drawn.
    pub fn extended_3d(depth: f32, palette: Palette, history_limit: Option<usize>) -> Self {
        Self::with_variant(
            Variant::Extended3D {
                depth,
                depth_offset: 0.0,
            },
            palette,
            history_limit,
        )
    }

    pub fn from_config(kind: VisualizationKind, config: &VisualizerConfig) -> Self {
        match kind {
            VisualizationKind::Flat2D => Self::flat_2d(config.palette),
            VisualizationKind::Simple3D => {
                Self::simple_3d(config.simple_origin, config.depth, config.palette)
            }
            VisualizationKind::Extended3D => {
                Self::extended_3d(config.depth, config.palette, config.history_limit)
            }
        }
    }

    fn with_variant(variant: Variant, palette: Palette, history_limit: Option<usize>) -> Self {
        Self {
            variant,
            palette,
            history_limit,
            frames: VecDeque::new(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn kind(&self) -> VisualizationKind {
        match self.variant {
            Variant::Flat2D => VisualizationKind::Flat2D,
            Variant::Simple3D { .. } => VisualizationKind::Simple3D,
            Variant::Extended3D { .. } => VisualizationKind::Extended3D,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Cumulative stacking offset; `None` for variants that do not stack.
    pub fn depth_offset(&self) -> Option<f32> {
        match self.variant {
            Variant::Extended3D { depth_offset, .. } => Some(depth_offset),
            _ => None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    /// Primitives of every held frame, oldest frame first.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive<B>> {
        self.frames.iter().flatten()
    }

    pub fn init(&mut self) {
        if let Variant::Extended3D { depth_offset, .. } = &mut self.variant {
            *depth_offset = 0.0;
        }
        self.lifecycle = Lifecycle::Ready;
        log::debug!("[viz] {} ready", self.kind());
    }

    /// Replace (or, for the extended variant, extend) the bars from one frame
    /// of magnitude samples.
    pub fn update<A>(&mut self, allocator: &mut A, camera: &mut PerspectiveCamera, samples: &[u8])
    where
        A: BufferAllocator<Buffer = B>,
    {
        if !self.is_ready() {
            log::debug!("[viz] {} update ignored before init", self.kind());
            return;
        }
        let (origin, depth) = match self.variant {
            Variant::Flat2D => (VIEWPORT_ORIGIN, 0.0),
            Variant::Simple3D { origin, depth } => (origin, depth),
            Variant::Extended3D {
                depth,
                depth_offset,
            } => (
                Vec3::new(VIEWPORT_ORIGIN.x, VIEWPORT_ORIGIN.y, depth_offset),
                depth,
            ),
        };
        if self.kind() != VisualizationKind::Extended3D {
            self.release_frames(allocator);
        }

        let flat = self.kind() == VisualizationKind::Flat2D;
        let frame: Vec<Primitive<B>> = layout_bars(samples, origin, depth, &self.palette)
            .into_iter()
            .map(|bar| {
                let mut primitive = build_primitive(&bar, flat);
                primitive.init(allocator);
                primitive
            })
            .collect();
        log::trace!("[viz] {} update: {} bars", self.kind(), frame.len());
        self.frames.push_back(frame);

        if let Variant::Extended3D {
            depth,
            depth_offset,
        } = &mut self.variant
        {
            *depth_offset += *depth;
            let step = Vec3::new(0.0, 0.0, *depth);
            camera.set_position(camera.position() + step);
            self.trim_history(allocator);
        }
    }

    pub fn draw<T>(&self, target: &mut T, view_projection: &Mat4)
    where
        T: DrawTarget<Buffer = B>,
    {
        if !self.is_ready() {
            return;
        }
        target.set_view_projection(view_projection);
        for primitive in self.primitives() {
            primitive.draw(target);
        }
    }

    /// Release every primitive and return to the uninitialized state.
    pub fn destroy<A>(&mut self, allocator: &mut A)
    where
        A: BufferAllocator<Buffer = B>,
    {
        self.release_frames(allocator);
        self.lifecycle = Lifecycle::Uninitialized;
        log::debug!("[viz] {} destroyed", self.kind());
    }

    fn release_frames<A>(&mut self, allocator: &mut A)
    where
        A: BufferAllocator<Buffer = B>,
    {
        for mut frame in self.frames.drain(..) {
            for primitive in frame.iter_mut() {
                primitive.destroy(allocator);
            }
        }
    }

    fn trim_history<A>(&mut self, allocator: &mut A)
    where
        A: BufferAllocator<Buffer = B>,
    {
        let Some(limit) = self.history_limit else {
            return;
        };
        let keep = limit.max(1);
        while self.frames.len() > keep {
            if let Some(mut oldest) = self.frames.pop_front() {
                for primitive in oldest.iter_mut() {
                    primitive.destroy(allocator);
                }
            }
        }
    }
}

fn build_primitive<B>(bar: &Bar, flat: bool) -> Primitive<B> {
    if flat {
        Primitive::rectangle(
            bar.position.truncate(),
            bar.size.truncate(),
            bar.bottom_color,
            bar.top_color,
        )
    } else {
        Primitive::cuboid(bar.position, bar.size, bar.bottom_color, bar.top_color)
    }
}
