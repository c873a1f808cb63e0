use crate::audio::{Analysis, AudioPlayer};
use crate::constants::{ANALYSIS_INTERVAL_MS, MAX_FRAME_DT_SEC};
use crate::core::{
    CameraController, PerspectiveCamera, SpectrumVisualization, VisualizationKind,
    VisualizerConfig,
};
use crate::render;
use crate::ui;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the frame loop, the analysis timer and the event handlers share.
pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub audio_ctx: web::AudioContext,
    pub analysis: Analysis,
    pub player: Option<Rc<RefCell<AudioPlayer>>>,

    pub config: VisualizerConfig,
    pub camera: PerspectiveCamera,
    pub controller: CameraController,
    pub visualization: SpectrumVisualization<wgpu::Buffer>,

    pub gpu: render::GpuState,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        audio_ctx: web::AudioContext,
        analysis: Analysis,
        config: VisualizerConfig,
        gpu: render::GpuState,
    ) -> Self {
        let camera = config.build_camera(gpu.aspect());
        let controller = CameraController::from_config(&config);
        let kind = config.initial_kind;
        let mut visualization = SpectrumVisualization::from_config(kind, &config);
        visualization.init();
        ui::set_visualization(&document, kind);
        log::info!("[viz] {}", kind);
        Self {
            canvas,
            document,
            audio_ctx,
            analysis,
            player: None,
            config,
            camera,
            controller,
            visualization,
            gpu,
            last_instant: Instant::now(),
        }
    }

    /// One display refresh: move the camera, follow the canvas size, draw.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        self.controller.step(&mut self.camera, dt_sec);

        if self
            .gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height())
        {
            self.camera.set_aspect(self.gpu.aspect());
        }

        let view_projection = self.camera.view_projection_matrix();
        match self.gpu.render(&self.visualization, &view_projection) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }

        if let Some(player) = &self.player {
            let p = player.borrow();
            if p.is_playing() {
                ui::set_time(&self.document, p.current_time());
            }
        }
    }

    /// One analysis window: snapshot the analyser and rebuild the bars.
    pub fn analyse(&mut self) {
        let bins = self.analysis.capture();
        self.visualization
            .update(&mut self.gpu, &mut self.camera, bins);
    }

    /// Replace the active variant and move the camera to its pose.
    pub fn switch_visualization(&mut self, kind: VisualizationKind) {
        self.visualization.destroy(&mut self.gpu);
        self.visualization = SpectrumVisualization::from_config(kind, &self.config);
        self.config.pose_for(kind).apply(&mut self.camera);
        self.visualization.init();
        ui::set_visualization(&self.document, kind);
        log::info!(
            "[viz] {} (live buffers after switch: {})",
            kind,
            self.gpu.live_buffers()
        );
    }

    /// Start the current variant over, e.g. after a new file was loaded.
    pub fn reset_visualization(&mut self) {
        self.switch_visualization(self.visualization.kind());
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

pub fn start_analysis_timer(frame_ctx: Rc<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().analyse();
    }) as Box<dyn FnMut()>);
    if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        ANALYSIS_INTERVAL_MS,
    ) {
        log::error!("[audio] analysis timer error: {:?}", e);
    }
    closure.forget();
}
