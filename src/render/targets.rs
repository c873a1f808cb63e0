use super::helpers;
use wgpu;

/// Offscreen attachments that follow the surface size.
///
/// Only a depth buffer is needed: bars and cuboids render straight into the
/// swapchain texture, and the depth test keeps stacked history frames ordered.
pub(crate) struct RenderTargets {
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (depth_tex, depth_view) =
            helpers::create_depth_texture(device, "scene_depth", width, height);
        Self {
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_tex.destroy();
        (self.depth_tex, self.depth_view) =
            helpers::create_depth_texture(device, "scene_depth", width, height);
    }
}
