use crate::constants::{
    DURATION_LABEL_ID, PLAY_PAUSE_BUTTON_ID, STATUS_LABEL_ID, TIME_LABEL_ID,
    VISUALIZATION_LABEL_ID,
};
use crate::core::{format_time, PlayerEvent, VisualizationKind};
use crate::dom;
use web_sys as web;

#[inline]
pub fn set_status(document: &web::Document, status: &str) {
    dom::set_text(document, STATUS_LABEL_ID, status);
}

#[inline]
pub fn set_time(document: &web::Document, seconds: f64) {
    dom::set_text(document, TIME_LABEL_ID, &format_time(seconds));
}

#[inline]
pub fn set_duration(document: &web::Document, seconds: f64) {
    dom::set_text(document, DURATION_LABEL_ID, &format_time(seconds));
}

pub fn set_visualization(document: &web::Document, kind: VisualizationKind) {
    dom::set_text(document, VISUALIZATION_LABEL_ID, kind.name());
}

/// Reflect a transport transition in the status label and play button.
pub fn apply_player_event(document: &web::Document, event: PlayerEvent) {
    let (status, button) = match event {
        PlayerEvent::Started | PlayerEvent::Resumed => ("Playing", "Pause"),
        PlayerEvent::Paused => ("Paused", "Play"),
        PlayerEvent::Stopped => ("Stopped", "Play"),
    };
    set_status(document, status);
    dom::set_text(document, PLAY_PAUSE_BUTTON_ID, button);
    if event == PlayerEvent::Stopped {
        set_time(document, 0.0);
    }
}
