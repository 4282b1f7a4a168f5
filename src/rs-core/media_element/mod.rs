use crate::adaptive::ConnectionInfo;
use crate::bindings::{ErrorKind, TimerId, TimerReason};
use crate::dispatcher::MediaObservation;
use crate::utils::url::MediaUrl;
use crate::wasm_bindgen;

/// Commands and reads the controller needs from the underlying HTMLMediaElement.
///
/// The controller is the only one allowed to drive it: UI actions have to go through the
/// controller's own commands instead.
pub(crate) trait MediaElement {
    /// Set (`Some`) or remove (`None`) the current source of the media element.
    fn set_source(&mut self, url: Option<&MediaUrl>);

    fn load(&mut self);

    /// Ask for playback. Rejections (e.g. autoplay policies) are reported asynchronously.
    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, position: f64);

    /// Synchronously produce a `MediaObservation` from the current state of the media element.
    fn observe(&self) -> MediaObservation;

    fn request_fullscreen(&mut self);

    fn exit_fullscreen(&mut self);

    /// Add or remove hints allowing the media to play inline instead of in a native fullscreen
    /// player.
    fn set_inline_playback(&mut self, enabled: bool);

    fn set_native_controls(&mut self, visible: bool);

    fn set_context_menu_blocked(&mut self, blocked: bool);
}

/// Deferred callbacks.
///
/// Once elapsed, a timer is reported back to the controller through its `on_timer_ended`
/// method with the same `TimerId` and `TimerReason`.
pub(crate) trait Timers {
    fn start_timer(&mut self, duration_ms: f64, reason: TimerReason) -> TimerId;
    fn clear_timer(&mut self, id: TimerId);
}

/// Events sent outward, to whoever is in charge of the user interface.
pub(crate) trait PlayerEvents {
    /// The content can be played. `duration` is in seconds (`NaN` if unknown, `inf` for live).
    fn on_ready(&mut self, duration: f64);
    fn on_play(&mut self);
    fn on_pause(&mut self);
    fn on_ended(&mut self);
    fn on_time_update(&mut self, current_time: f64, duration: f64);
    fn on_buffering_change(&mut self, is_buffering: bool);
    fn on_error(&mut self, kind: ErrorKind, message: &str);
}

/// Optional source of network information.
pub(crate) trait ConnectionMonitor {
    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo::default()
    }
}

/// Everything the `PlaybackController` relies on.
pub(crate) trait PlaybackHost: MediaElement + Timers + PlayerEvents + ConnectionMonitor {}

impl<T: MediaElement + Timers + PlayerEvents + ConnectionMonitor> PlaybackHost for T {}

/// The `readyState` of an HTMLMediaElement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ReadyState {
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl From<u8> for ReadyState {
    fn from(val: u8) -> Self {
        match val {
            0 => ReadyState::HaveNothing,
            1 => ReadyState::HaveMetadata,
            2 => ReadyState::HaveCurrentData,
            3 => ReadyState::HaveFutureData,
            _ => ReadyState::HaveEnoughData,
        }
    }
}

/// HTMLMediaElement event which lead to a `MediaObservation` being sent.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    /// The HTMLMediaElement's "loadstart" event has just been triggered
    LoadStart = 0,
    /// The HTMLMediaElement's "loadedmetadata" event has just been triggered
    LoadedMetadata = 1,
    /// The HTMLMediaElement's "canplay" event has just been triggered
    CanPlay = 2,
    /// The HTMLMediaElement's "canplaythrough" event has just been triggered
    CanPlayThrough = 3,
    /// The HTMLMediaElement's "play" event has just been triggered
    Play = 4,
    /// The HTMLMediaElement's "playing" event has just been triggered
    Playing = 5,
    /// The HTMLMediaElement's "pause" event has just been triggered
    Pause = 6,
    /// The HTMLMediaElement's "waiting" event has just been triggered
    Waiting = 7,
    /// The HTMLMediaElement's "stalled" event has just been triggered
    Stalled = 8,
    /// The HTMLMediaElement's "progress" event has just been triggered
    Progress = 9,
    /// The HTMLMediaElement's "timeupdate" event has just been triggered
    TimeUpdate = 10,
    /// The HTMLMediaElement's "seeking" event has just been triggered
    Seeking = 11,
    /// The HTMLMediaElement's "seeked" event has just been triggered
    Seeked = 12,
    /// The HTMLMediaElement's "ended" event has just been triggered
    Ended = 13,
}

/// `code` property of a `MediaError`, as set on the HTMLMediaElement's `error` attribute.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaErrorCode {
    /// The fetching of the resource was aborted by the user agent.
    Aborted = 1,
    /// A network error prevented the resource from being fetched.
    Network = 2,
    /// The resource could not be decoded.
    Decode = 3,
    /// The resource or its format is not supported.
    SrcNotSupported = 4,
}

impl MediaErrorCode {
    /// Returns `true` for errors which may go away by loading the resource again.
    pub(crate) fn is_transient(self) -> bool {
        self == MediaErrorCode::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_ordering() {
        assert!(ReadyState::from(3) >= ReadyState::HaveFutureData);
        assert!(ReadyState::from(2) < ReadyState::HaveFutureData);
        assert_eq!(ReadyState::from(9), ReadyState::HaveEnoughData);
    }

    #[test]
    fn test_transient_errors() {
        assert!(MediaErrorCode::Network.is_transient());
        assert!(!MediaErrorCode::Decode.is_transient());
        assert!(!MediaErrorCode::SrcNotSupported.is_transient());
        assert!(!MediaErrorCode::Aborted.is_transient());
    }
}
