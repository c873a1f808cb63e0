use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use crate::core::{PlayerEvent, StopAction, Transport, TransportAction};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Analyser between every player and the destination, plus its byte buffer.
pub struct Analysis {
    pub analyser: web::AnalyserNode,
    pub bins: Vec<u8>,
}

impl Analysis {
    pub fn new(audio_ctx: &web::AudioContext) -> anyhow::Result<Self> {
        let analyser = web::AnalyserNode::new(audio_ctx).map_err(js_err)?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        analyser
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(js_err)?;
        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        log::info!("[audio] analyser fft={} bins={}", ANALYSER_FFT_SIZE, bins.len());
        Ok(Self { analyser, bins })
    }

    /// Pull the current magnitude-per-bin snapshot.
    pub fn capture(&mut self) -> &[u8] {
        let n = self.analyser.frequency_bin_count() as usize;
        if self.bins.len() != n {
            self.bins.resize(n, 0);
        }
        self.analyser.get_byte_frequency_data(&mut self.bins);
        &self.bins
    }
}

/// Read a user-selected file and decode it with the context's decoder.
pub async fn decode_file(
    audio_ctx: &web::AudioContext,
    file: &web::File,
) -> anyhow::Result<web::AudioBuffer> {
    let data = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    let data: js_sys::ArrayBuffer = data.dyn_into().map_err(js_err)?;
    let promise = audio_ctx.decode_audio_data(&data).map_err(js_err)?;
    let decoded = JsFuture::from(promise).await.map_err(js_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(js_err)
}

/// Plays one decoded buffer through `destination`.
///
/// Pause and resume suspend the whole context; every start creates a fresh
/// buffer source because a source node can only be started once.
pub struct AudioPlayer {
    ctx: web::AudioContext,
    buffer: web::AudioBuffer,
    destination: web::AudioNode,
    source: Option<web::AudioBufferSourceNode>,
    on_ended: Option<Closure<dyn FnMut()>>,
    start_time: f64,
    transport: Transport,
    // Set while a start, pause or resume awaits the context
    pending: bool,
    listener: Rc<dyn Fn(PlayerEvent)>,
}

impl AudioPlayer {
    pub fn new(
        ctx: web::AudioContext,
        buffer: web::AudioBuffer,
        destination: web::AudioNode,
        listener: Rc<dyn Fn(PlayerEvent)>,
    ) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            ctx,
            buffer,
            destination,
            source: None,
            on_ended: None,
            start_time: 0.0,
            transport: Transport::new(),
            pending: false,
            listener,
        }))
    }

    pub fn duration(&self) -> f64 {
        self.buffer.duration()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Seconds since the current source was started.
    pub fn current_time(&self) -> f64 {
        self.ctx.current_time() - self.start_time
    }

    fn start(this: &Rc<RefCell<Self>>) -> anyhow::Result<()> {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let mut p = this.borrow_mut();
        let source = p.ctx.create_buffer_source().map_err(js_err)?;
        source.set_buffer(Some(&p.buffer));
        source
            .connect_with_audio_node(&p.destination)
            .map_err(js_err)?;
        // Fires on natural end and after an explicit stop
        let on_ended = Closure::wrap(Box::new(move || {
            if let Some(player) = weak.upgrade() {
                player.borrow_mut().handle_ended();
            }
        }) as Box<dyn FnMut()>);
        source.set_onended(Some(on_ended.as_ref().unchecked_ref()));
        p.start_time = p.ctx.current_time();
        source.start().map_err(js_err)?;
        p.source = Some(source);
        p.on_ended = Some(on_ended);
        Ok(())
    }

    fn handle_ended(&mut self) {
        if let Some(source) = self.source.take() {
            source.set_onended(None);
            _ = source.disconnect();
        }
        // on_ended is still executing here; the next start replaces it
        let event = self.transport.ended();
        log::info!("[audio] playback stopped");
        (self.listener)(event);
    }

    /// Start, pause or resume depending on the transport state.
    ///
    /// The transport only advances once the context call succeeded. Presses
    /// arriving while a transition is in flight are ignored.
    pub async fn play_or_pause(this: Rc<RefCell<Self>>) -> anyhow::Result<()> {
        let (action, ctx) = {
            let mut p = this.borrow_mut();
            if p.pending {
                return Ok(());
            }
            p.pending = true;
            (p.transport.next_action(), p.ctx.clone())
        };
        let result = Self::apply(&this, &ctx, action).await;
        let event = {
            let mut p = this.borrow_mut();
            p.pending = false;
            result?;
            // The source may have ended while the context call was pending
            if p.transport.next_action() != action {
                return Ok(());
            }
            p.transport.commit(action)
        };
        log::info!("[audio] {:?}", event);
        let listener = this.borrow().listener.clone();
        listener(event);
        Ok(())
    }

    async fn apply(
        this: &Rc<RefCell<Self>>,
        ctx: &web::AudioContext,
        action: TransportAction,
    ) -> anyhow::Result<()> {
        let promise = match action {
            // Contexts created before a user gesture start out suspended
            TransportAction::Start | TransportAction::Resume => ctx.resume(),
            TransportAction::Pause => ctx.suspend(),
        };
        JsFuture::from(promise.map_err(js_err)?)
            .await
            .map_err(js_err)?;
        if action == TransportAction::Start {
            Self::start(this)?;
        }
        Ok(())
    }

    /// Stop reporting events; used before a player is replaced so its late
    /// `ended` event cannot touch the UI of the next file.
    pub fn detach_listener(&mut self) {
        self.listener = Rc::new(|_| {});
    }

    /// Stop playback; completion is reported through the source's `ended` event.
    pub async fn stop(this: Rc<RefCell<Self>>) -> anyhow::Result<()> {
        let (action, ctx) = {
            let p = this.borrow();
            (p.transport.request_stop(), p.ctx.clone())
        };
        match action {
            StopAction::Ignore => return Ok(()),
            StopAction::ResumeThenStop => {
                // The context, not the source, is suspended while paused
                JsFuture::from(ctx.resume().map_err(js_err)?)
                    .await
                    .map_err(js_err)?;
            }
            StopAction::StopSource => {}
        }
        let source = this.borrow().source.clone();
        if let Some(source) = source {
            source.stop().map_err(js_err)?;
        }
        Ok(())
    }
}
