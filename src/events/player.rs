use crate::audio::{self, AudioPlayer};
use crate::constants::{FILE_INPUT_ID, PLAY_PAUSE_BUTTON_ID, STOP_BUTTON_ID};
use crate::core::PlayerEvent;
use crate::dom;
use crate::frame::FrameContext;
use crate::ui;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub fn play_pause(app: &Rc<RefCell<FrameContext>>) {
    let Some(player) = app.borrow().player.clone() else {
        log::info!("[audio] no file loaded");
        return;
    };
    spawn_local(async move {
        if let Err(e) = AudioPlayer::play_or_pause(player).await {
            log::error!("[audio] play/pause error: {:?}", e);
        }
    });
}

pub fn stop(app: &Rc<RefCell<FrameContext>>) {
    let Some(player) = app.borrow().player.clone() else {
        return;
    };
    spawn_local(async move {
        if let Err(e) = AudioPlayer::stop(player).await {
            log::error!("[audio] stop error: {:?}", e);
        }
    });
}

/// Decode `file` and make it the current track.
///
/// No `FrameContext` borrow is held across an await.
pub async fn load_file(app: Rc<RefCell<FrameContext>>, file: web::File) -> anyhow::Result<()> {
    let (document, audio_ctx, analyser, previous) = {
        let a = app.borrow();
        (
            a.document.clone(),
            a.audio_ctx.clone(),
            a.analysis.analyser.clone(),
            a.player.clone(),
        )
    };
    ui::set_status(&document, "Loading...");
    log::info!("[audio] loading {} ({} bytes)", file.name(), file.size());
    if let Some(previous) = previous {
        // Its ended event lands after the new track is shown
        previous.borrow_mut().detach_listener();
        AudioPlayer::stop(previous).await?;
    }

    let buffer = audio::decode_file(&audio_ctx, &file).await?;
    let listener_doc = document.clone();
    let listener: Rc<dyn Fn(PlayerEvent)> =
        Rc::new(move |event| ui::apply_player_event(&listener_doc, event));
    let player = AudioPlayer::new(audio_ctx, buffer, analyser.into(), listener);
    let duration = player.borrow().duration();
    {
        let mut a = app.borrow_mut();
        a.player = Some(player);
        a.reset_visualization();
    }

    ui::set_duration(&document, duration);
    ui::set_time(&document, 0.0);
    ui::set_status(&document, "Ready");
    log::info!("[audio] ready ({:.1}s)", duration);
    Ok(())
}

pub fn wire_file_input(app: Rc<RefCell<FrameContext>>) {
    let document = app.borrow().document.clone();
    let Some(input) = document
        .get_element_by_id(FILE_INPUT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        log::warn!("[dom] missing #{}", FILE_INPUT_ID);
        return;
    };
    let input_for_change = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(file) = dom::selected_file(&input_for_change) else {
            return;
        };
        let app = app.clone();
        spawn_local(async move {
            let document = app.borrow().document.clone();
            if let Err(e) = load_file(app, file).await {
                log::error!("[audio] load error: {:?}", e);
                ui::set_status(&document, "Could not load file");
            }
        });
    }) as Box<dyn FnMut()>);
    _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_transport_buttons(app: Rc<RefCell<FrameContext>>) {
    let document = app.borrow().document.clone();
    let app_play = app.clone();
    dom::add_click_listener(&document, PLAY_PAUSE_BUTTON_ID, move || {
        play_pause(&app_play);
    });
    dom::add_click_listener(&document, STOP_BUTTON_ID, move || {
        stop(&app);
    });
}
