use crate::core::{is_play_pause_key, kind_for_digit, motion_for_key, CameraMotion};
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn is_arrow(motion: CameraMotion) -> bool {
    matches!(
        motion,
        CameraMotion::YawLeft
            | CameraMotion::YawRight
            | CameraMotion::PitchUp
            | CameraMotion::PitchDown
    )
}

fn typing_into_input(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some()
}

pub fn handle_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<FrameContext>>) {
    if typing_into_input(ev) {
        return;
    }
    let key = ev.key();
    if let Some(motion) = motion_for_key(&key) {
        if app.borrow_mut().controller.press(motion) {
            log::debug!("[keys] hold {:?}", motion);
        }
        if is_arrow(motion) {
            ev.prevent_default();
        }
        return;
    }
    if let Some(kind) = kind_for_digit(&key) {
        app.borrow_mut().switch_visualization(kind);
        return;
    }
    if is_play_pause_key(&key) {
        super::player::play_pause(app);
        ev.prevent_default();
    }
}

pub fn handle_keyup(ev: &web::KeyboardEvent, app: &Rc<RefCell<FrameContext>>) {
    if let Some(motion) = motion_for_key(&ev.key()) {
        app.borrow_mut().controller.release(motion);
    }
}

pub fn wire_keyboard(app: Rc<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };

    let app_down = app.clone();
    let keydown = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &app_down);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    let app_up = app.clone();
    let keyup = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keyup(&ev, &app_up);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
    keyup.forget();

    // Keyup never arrives once focus leaves the page
    let blur = Closure::wrap(Box::new(move || {
        app.borrow_mut().controller.clear();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
    blur.forget();
}
