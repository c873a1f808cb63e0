// Host-side tests for the spectrum visualizations, with a counting fake GPU.

use glam::{Mat4, Vec3};
use spectrum_core::{
    BufferAllocator, Color, DrawTarget, Lifecycle, Palette, PerspectiveCamera,
    SpectrumVisualization, Vertex, VisualizationKind, VisualizerConfig,
};
use std::collections::BTreeSet;

#[derive(Default)]
struct FakeGpu {
    next_id: u32,
    live: BTreeSet<u32>,
    created: usize,
    released: usize,
}

impl BufferAllocator for FakeGpu {
    type Buffer = u32;

    fn create_vertex_buffer(&mut self, _vertices: &[Vertex]) -> u32 {
        self.alloc()
    }

    fn create_index_buffer(&mut self, _indices: &[u16]) -> u32 {
        self.alloc()
    }

    fn release(&mut self, buffer: u32) {
        assert!(self.live.remove(&buffer), "buffer {} released twice", buffer);
        self.released += 1;
    }
}

impl FakeGpu {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.created += 1;
        self.live.insert(self.next_id);
        self.next_id
    }
}

#[derive(Default)]
struct RecordingTarget {
    view_projections: Vec<Mat4>,
    draws: Vec<(u32, u32, u32)>,
}

impl DrawTarget for RecordingTarget {
    type Buffer = u32;

    fn set_view_projection(&mut self, view_projection: &Mat4) {
        self.view_projections.push(*view_projection);
    }

    fn draw_indexed(&mut self, vertices: &u32, indices: &u32, index_count: u32) {
        self.draws.push((*vertices, *indices, index_count));
    }
}

fn camera() -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0);
    camera.set_position(Vec3::new(0.0, 0.0, 2.0));
    camera
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn top_y(vertices: &[Vertex]) -> f32 {
    vertices
        .iter()
        .map(|v| v.position[1])
        .fold(f32::MIN, f32::max)
}

#[test]
fn flat_bars_follow_sample_heights_and_palette() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::flat_2d(Palette::default());
    viz.init();
    viz.update(&mut gpu, &mut cam, &[0, 128, 255]);

    let prims: Vec<_> = viz.primitives().collect();
    assert_eq!(prims.len(), 3);
    let heights: Vec<f32> = prims
        .iter()
        .map(|p| top_y(p.mesh().vertices()) + 1.0)
        .collect();
    assert!(close(heights[0], 0.0));
    assert!(close(heights[1], 2.0 * 128.0 / 255.0));
    assert!(close(heights[2], 2.0));

    // Vertices 2 and 3 of a rectangle carry the top color
    let tops: Vec<[f32; 3]> = prims.iter().map(|p| p.mesh().vertices()[2].color).collect();
    assert_eq!(tops[0], Color::GREEN.to_array());
    assert!(close(tops[1][0], 128.0 / 255.0));
    assert!(close(tops[1][1], 1.0 - 128.0 / 255.0));
    assert!(close(tops[1][2], 0.0));
    assert_eq!(tops[2], Color::RED.to_array());
    for p in &prims {
        assert_eq!(p.mesh().vertices()[0].color, Color::GREEN.to_array());
    }
}

#[test]
fn flat_bars_tile_the_viewport_without_gaps() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::flat_2d(Palette::default());
    viz.init();
    let samples = [10u8; 8];
    viz.update(&mut gpu, &mut cam, &samples);

    let mut right_edge = -1.0f32;
    for p in viz.primitives() {
        let xs: Vec<f32> = p.mesh().vertices().iter().map(|v| v.position[0]).collect();
        let left = xs.iter().copied().fold(f32::MAX, f32::min);
        let right = xs.iter().copied().fold(f32::MIN, f32::max);
        assert!(close(left, right_edge));
        assert!(close(right - left, 2.0 / 8.0));
        right_edge = right;
    }
    assert!(close(right_edge, 1.0));
}

#[test]
fn non_extended_variants_replace_previous_frame() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::simple_3d(Vec3::new(-1.0, -1.0, 0.0), 0.05, Palette::default());
    viz.init();
    viz.update(&mut gpu, &mut cam, &[1, 2, 3, 4]);
    viz.update(&mut gpu, &mut cam, &[5, 6, 7, 8]);

    assert_eq!(viz.frame_count(), 1);
    assert_eq!(viz.primitive_count(), 4);
    assert_eq!(gpu.released, 8);
    assert_eq!(gpu.live.len(), 8);
    assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn destroy_releases_every_buffer_exactly_once() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    for kind in VisualizationKind::ALL {
        let mut viz = SpectrumVisualization::from_config(kind, &VisualizerConfig::default());
        viz.init();
        viz.update(&mut gpu, &mut cam, &[3, 200, 17]);
        viz.update(&mut gpu, &mut cam, &[9, 9, 9]);
        viz.destroy(&mut gpu);

        assert_eq!(viz.primitive_count(), 0, "{}", kind);
        assert_eq!(viz.lifecycle(), Lifecycle::Uninitialized);
        assert!(gpu.live.is_empty(), "{} leaked buffers", kind);
        // Second destroy has nothing left to release
        viz.destroy(&mut gpu);
    }
    assert_eq!(gpu.created, gpu.released);
}

#[test]
fn extended_stacks_frames_and_camera_follows() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let start = cam.position();
    let depth = 0.05;
    let mut viz = SpectrumVisualization::extended_3d(depth, Palette::default(), None);
    viz.init();
    assert_eq!(viz.depth_offset(), Some(0.0));

    for n in 1..=4 {
        viz.update(&mut gpu, &mut cam, &[100, 50]);
        let offset = viz.depth_offset().unwrap_or_default();
        assert!(close(offset, n as f32 * depth));
        assert!(close(cam.position().z - start.z, offset));
    }
    assert_eq!(viz.frame_count(), 4);
    assert_eq!(cam.position().x, start.x);
    assert_eq!(cam.position().y, start.y);

    // Frame k sits with its front face at k * depth
    let fronts: Vec<f32> = viz
        .primitives()
        .map(|p| p.mesh().vertices()[0].position[2])
        .collect();
    for (i, z) in fronts.iter().enumerate() {
        assert!(close(*z, (i / 2) as f32 * depth));
    }
}

#[test]
fn extended_history_limit_releases_oldest_frames() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::extended_3d(0.1, Palette::default(), Some(2));
    viz.init();
    for _ in 0..5 {
        viz.update(&mut gpu, &mut cam, &[1, 2, 3]);
    }
    assert_eq!(viz.frame_count(), 2);
    assert_eq!(gpu.live.len(), 2 * 3 * 2);
    assert!(close(viz.depth_offset().unwrap_or_default(), 0.5));
}

#[test]
fn init_resets_extended_offset() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::extended_3d(0.2, Palette::default(), None);
    viz.init();
    viz.update(&mut gpu, &mut cam, &[1]);
    viz.destroy(&mut gpu);
    viz.init();
    assert_eq!(viz.depth_offset(), Some(0.0));
}

#[test]
fn update_and_draw_before_init_do_nothing() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut target = RecordingTarget::default();
    let mut viz = SpectrumVisualization::extended_3d(0.05, Palette::default(), None);

    viz.update(&mut gpu, &mut cam, &[255, 255]);
    viz.draw(&mut target, &Mat4::IDENTITY);

    assert_eq!(gpu.created, 0);
    assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 2.0));
    assert!(target.view_projections.is_empty());
    assert!(target.draws.is_empty());
}

#[test]
fn empty_samples_produce_no_primitives() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::flat_2d(Palette::default());
    viz.init();
    viz.update(&mut gpu, &mut cam, &[]);
    assert_eq!(viz.primitive_count(), 0);
    assert_eq!(gpu.created, 0);
}

#[test]
fn extended_empty_samples_still_advance_depth() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let start = cam.position();
    let depth = 0.05;
    let mut viz = SpectrumVisualization::extended_3d(depth, Palette::default(), Some(3));
    viz.init();
    viz.update(&mut gpu, &mut cam, &[]);
    assert_eq!(viz.primitive_count(), 0);
    assert_eq!(gpu.created, 0);
    assert!(close(viz.depth_offset().unwrap_or_default(), depth));
    assert!(close(cam.position().z - start.z, depth));

    // An empty frame still counts towards the history
    viz.update(&mut gpu, &mut cam, &[10, 20]);
    assert_eq!(viz.frame_count(), 2);
    assert_eq!(viz.primitive_count(), 2);
    viz.destroy(&mut gpu);
    assert!(gpu.live.is_empty());
}

#[test]
fn zero_history_limit_keeps_newest_frame() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut viz = SpectrumVisualization::extended_3d(0.1, Palette::default(), Some(0));
    viz.init();
    for _ in 0..3 {
        viz.update(&mut gpu, &mut cam, &[1, 2]);
    }
    assert_eq!(viz.frame_count(), 1);
    assert_eq!(viz.primitive_count(), 2);
    assert_eq!(gpu.live.len(), 2 * 2);
    assert_eq!(gpu.released, gpu.created - 2 * 2);
}

#[test]
fn draw_sets_matrix_once_and_draws_each_primitive() {
    let mut gpu = FakeGpu::default();
    let mut cam = camera();
    let mut target = RecordingTarget::default();

    let mut flat = SpectrumVisualization::flat_2d(Palette::default());
    flat.init();
    flat.update(&mut gpu, &mut cam, &[1, 2, 3]);
    let vp = cam.view_projection_matrix();
    flat.draw(&mut target, &vp);
    assert_eq!(target.view_projections, vec![vp]);
    assert_eq!(target.draws.len(), 3);
    assert!(target.draws.iter().all(|&(_, _, n)| n == 6));

    let mut target = RecordingTarget::default();
    let mut cubes = SpectrumVisualization::simple_3d(Vec3::new(-1.0, -1.0, 0.0), 0.05, Palette::default());
    cubes.init();
    cubes.update(&mut gpu, &mut cam, &[1, 2]);
    cubes.draw(&mut target, &vp);
    assert_eq!(target.draws.len(), 2);
    assert!(target.draws.iter().all(|&(_, _, n)| n == 36));
    // Vertex and index buffers are distinct handles
    assert!(target.draws.iter().all(|&(v, i, _)| v != i));
}

#[test]
fn kind_names_round_trip_through_from_str() {
    for kind in VisualizationKind::ALL {
        assert_eq!(kind.name().parse::<VisualizationKind>(), Ok(kind));
    }
    assert_eq!("3D-Simple".parse(), Ok(VisualizationKind::Simple3D));
    assert!("4d".parse::<VisualizationKind>().is_err());
}
