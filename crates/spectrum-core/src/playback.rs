//! Transport state for a single loaded track.
//!
//! The web player asks the transport what a button press means, performs
//! the matching WebAudio call and commits the action only once that call
//! succeeded; the returned `PlayerEvent` drives the UI.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What the player must do for a play/pause press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportAction {
    /// Create a fresh source and start it from the beginning.
    Start,
    /// Suspend the audio context.
    Pause,
    /// Resume the audio context.
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    Started,
    Paused,
    Resumed,
    Stopped,
}

/// How a stop request has to be carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopAction {
    /// Nothing is playing.
    Ignore,
    /// Stop the source; completion arrives through `ended`.
    StopSource,
    /// The context is suspended and must be resumed before stopping.
    ResumeThenStop,
}

#[derive(Clone, Debug, Default)]
pub struct Transport {
    state: PlaybackState,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// What a play/pause press means in the current state. Nothing changes
    /// until the player reports success through [`Transport::commit`].
    pub fn next_action(&self) -> TransportAction {
        match self.state {
            PlaybackState::Stopped => TransportAction::Start,
            PlaybackState::Playing => TransportAction::Pause,
            PlaybackState::Paused => TransportAction::Resume,
        }
    }

    /// Record that `action` was carried out.
    pub fn commit(&mut self, action: TransportAction) -> PlayerEvent {
        let (next, event) = match action {
            TransportAction::Start => (PlaybackState::Playing, PlayerEvent::Started),
            TransportAction::Pause => (PlaybackState::Paused, PlayerEvent::Paused),
            TransportAction::Resume => (PlaybackState::Playing, PlayerEvent::Resumed),
        };
        log::debug!("[transport] {:?} -> {:?}", self.state, next);
        self.state = next;
        event
    }

    /// State is left untouched; the source reports completion via `ended`.
    pub fn request_stop(&self) -> StopAction {
        match self.state {
            PlaybackState::Stopped => StopAction::Ignore,
            PlaybackState::Playing => StopAction::StopSource,
            PlaybackState::Paused => StopAction::ResumeThenStop,
        }
    }

    /// Playback finished naturally or after a stop request.
    pub fn ended(&mut self) -> PlayerEvent {
        log::debug!("[transport] {:?} -> Stopped", self.state);
        self.state = PlaybackState::Stopped;
        PlayerEvent::Stopped
    }
}

/// Format a playback position as `mm:ss`.
///
/// Negative and non-finite inputs format as `00:00`; minutes wrap at one hour.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let minutes = (total / 60) % 60;
    let secs = total % 60;
    format!("{:02}:{:02}", minutes, secs)
}
