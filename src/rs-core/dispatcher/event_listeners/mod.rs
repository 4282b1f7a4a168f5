use crate::{
    adaptive::ConnectionInfo,
    bindings::{TimerId, TimerReason},
    dispatcher::Dispatcher,
    media_element::{MediaErrorCode, MediaEvent},
    wasm_bindgen,
};

/// Methods triggered on JavaScript events by the JavaScript code.
#[wasm_bindgen]
impl Dispatcher {
    /// The JS code should call this method each time one of the listened HTMLMediaElement
    /// events is triggered.
    ///
    /// # Arguments
    ///
    /// * `event` - The event which was just triggered.
    ///
    /// * `observation` - The state of the HTMLMediaElement, as read right after that event.
    pub fn on_media_event(&mut self, event: MediaEvent, observation: MediaObservation) {
        self.controller.on_media_event(event, observation);
    }

    /// The JS code should call this method when the HTMLMediaElement emits an "error" event.
    ///
    /// # Arguments
    ///
    /// * `code` - The `code` property of its `error` attribute.
    ///
    /// * `message` - The `message` property of its `error` attribute, if one.
    pub fn on_media_error(&mut self, code: MediaErrorCode, message: Option<String>) {
        self.controller.on_media_error(code, message);
    }

    /// The JS code should call this method when the Promise returned by a `play` call
    /// (performed through `jsPlay`) rejects.
    ///
    /// # Arguments
    ///
    /// * `not_allowed` - `true` if it rejected with a `NotAllowedError`, which happens when
    ///   autoplay policies prevented playback.
    pub fn on_play_rejected(&mut self, not_allowed: bool) {
        self.controller.on_play_rejected(not_allowed);
    }

    /// The JS code should call this method each time a timer started with the `jsTimer`
    /// function finished.
    ///
    /// # Arguments
    ///
    /// * `id` - The `TimerId` given by `jsTimer` when the timer was
    ///   started. This allows the `Dispatcher` to identify which timer
    ///   actually finished.
    ///
    /// * `reason` - The `TimerReason` given by the Rust code when that timer
    ///   was started.
    pub fn on_timer_ended(&mut self, id: TimerId, reason: TimerReason) {
        self.controller.on_timer_ended(id, reason);
    }

    /// The JS code should call this method when `navigator.connection` emits a "change" event.
    ///
    /// # Arguments
    ///
    /// * `effective_type` - Its new `effectiveType` property, if available.
    ///
    /// * `downlink` - Its new `downlink` property in Mbps, if available.
    pub fn on_connection_change(&mut self, effective_type: Option<String>, downlink: Option<f64>) {
        let info = ConnectionInfo::new(effective_type.as_deref(), downlink);
        self.controller.on_connection_change(info);
    }

    /// The JS code should call this method when the media element (or its container) entered
    /// or exited fullscreen.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.controller.on_fullscreen_change(is_fullscreen);
    }
}

/// Snapshot of the HTMLMediaElement's state.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct MediaObservation {
    current_time: f64,
    ready_state: u8,
    buffered: Vec<(f64, f64)>,
    paused: bool,
    seeking: bool,
    ended: bool,
    duration: f64,
}

#[wasm_bindgen]
impl MediaObservation {
    /// # Arguments
    ///
    /// * `buffered` - The `buffered` attribute of the media element, as flat `start, end`
    ///   pairs. A trailing lone value is ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(
        current_time: f64,
        ready_state: u8,
        buffered: &[f64],
        paused: bool,
        seeking: bool,
        ended: bool,
        duration: f64,
    ) -> Self {
        let buffered = buffered
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self {
            current_time,
            ready_state,
            buffered,
            paused,
            seeking,
            ended,
            duration,
        }
    }
}

impl MediaObservation {
    pub(crate) fn set_current_time(&mut self, current_time: f64) {
        self.current_time = current_time;
    }

    #[inline(always)]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[inline(always)]
    pub fn ready_state(&self) -> u8 {
        self.ready_state
    }

    #[inline(always)]
    pub fn buffered(&self) -> &[(f64, f64)] {
        &self.buffered
    }

    #[inline(always)]
    pub fn paused(&self) -> bool {
        self.paused
    }

    #[inline(always)]
    pub fn seeking(&self) -> bool {
        self.seeking
    }

    #[inline(always)]
    pub fn ended(&self) -> bool {
        self.ended
    }

    #[inline(always)]
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_pairs() {
        let obs = MediaObservation::new(3., 4, &[0., 5., 8., 12., 20.], false, false, false, 60.);
        assert_eq!(obs.buffered(), &[(0., 5.), (8., 12.)]);
        assert_eq!(obs.current_time(), 3.);
        assert_eq!(obs.duration(), 60.);
    }
}
