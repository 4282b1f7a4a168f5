use crate::{
    adaptive::ConnectionInfo,
    dispatcher::MediaObservation,
    media_element::{ConnectionMonitor, MediaElement, PlayerEvents, Timers},
    utils::url::MediaUrl,
};

use super::js_functions::*;

/// `PlaybackHost` relying on the JavaScript-side: every call is a `js*` function.
pub(crate) struct JsPlaybackHost;

impl MediaElement for JsPlaybackHost {
    fn set_source(&mut self, url: Option<&MediaUrl>) {
        jsSetSource(url.map(|u| u.get_ref().to_owned()));
    }

    fn load(&mut self) {
        jsLoad();
    }

    fn play(&mut self) {
        jsPlay();
    }

    fn pause(&mut self) {
        jsPause();
    }

    fn seek(&mut self, position: f64) {
        jsSeek(position);
    }

    fn observe(&self) -> MediaObservation {
        jsGetMediaObservation()
    }

    fn request_fullscreen(&mut self) {
        jsRequestFullscreen();
    }

    fn exit_fullscreen(&mut self) {
        jsExitFullscreen();
    }

    fn set_inline_playback(&mut self, enabled: bool) {
        jsSetInlinePlayback(enabled);
    }

    fn set_native_controls(&mut self, visible: bool) {
        jsSetNativeControls(visible);
    }

    fn set_context_menu_blocked(&mut self, blocked: bool) {
        jsSetContextMenuBlocked(blocked);
    }
}

impl Timers for JsPlaybackHost {
    fn start_timer(&mut self, duration_ms: f64, reason: TimerReason) -> TimerId {
        jsTimer(duration_ms, reason)
    }

    fn clear_timer(&mut self, id: TimerId) {
        jsClearTimer(id);
    }
}

impl PlayerEvents for JsPlaybackHost {
    fn on_ready(&mut self, duration: f64) {
        jsAnnounceReady(duration);
    }

    fn on_play(&mut self) {
        jsAnnouncePlay();
    }

    fn on_pause(&mut self) {
        jsAnnouncePause();
    }

    fn on_ended(&mut self) {
        jsAnnounceEnded();
    }

    fn on_time_update(&mut self, current_time: f64, duration: f64) {
        jsAnnounceTimeUpdate(current_time, duration);
    }

    fn on_buffering_change(&mut self, is_buffering: bool) {
        jsAnnounceBufferingChange(is_buffering);
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        jsSendError(kind, message);
    }
}

impl ConnectionMonitor for JsPlaybackHost {
    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo::new(
            jsGetConnectionEffectiveType().as_deref(),
            jsGetConnectionDownlink(),
        )
    }
}
