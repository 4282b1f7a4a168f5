use crate::{
    adaptive::NetworkClass,
    controller::{BufferingConfiguration, ConfigurationError, PlaybackState},
    utils::logger::LoggerLevel,
    wasm_bindgen, Logger,
};

use super::Dispatcher;

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There's
/// also "event_listeners" which as its name point at, should be called when particular
/// events happen. Such "event_listeners" are defined in its own file.
#[wasm_bindgen]
impl Dispatcher {
    /// Create a new `Dispatcher` allowing to play a content on the HTMLMediaElement that should be
    /// linked to it on the JavaScript-side.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Dispatcher::with_configuration(BufferingConfiguration::default())
    }

    /// Start playing the media at the given URL.
    ///
    /// An empty URL stops the current content instead, like `reset` would.
    pub fn assign_source(&mut self, url: &str, autoplay: bool) {
        self.controller.assign_source(url, autoplay);
    }

    /// Stop the currently loaded content.
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn user_play(&mut self) {
        self.controller.user_play();
    }

    pub fn user_pause(&mut self) {
        self.controller.user_pause();
    }

    pub fn user_seek(&mut self, position: f64) {
        self.controller.user_seek(position);
    }

    /// To call when the user starts dragging the progress bar.
    pub fn user_scrub_start(&mut self) {
        self.controller.user_scrub_start();
    }

    pub fn user_scrub_end(&mut self) {
        self.controller.user_scrub_end();
    }

    pub fn request_fullscreen_toggle(&mut self) {
        self.controller.request_fullscreen_toggle();
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn current_position(&self) -> f64 {
        self.controller.current_position()
    }

    pub fn buffer_ahead(&self) -> f64 {
        self.controller.buffer_ahead()
    }

    pub fn buffer_target(&self) -> f64 {
        self.controller.buffer_target()
    }

    pub fn network_class(&self) -> NetworkClass {
        self.controller.network_class()
    }

    pub fn retry_count(&self) -> u32 {
        self.controller.retry_count()
    }

    /// Returns the currently assigned source, `None` if there's none.
    pub fn source(&self) -> Option<String> {
        self.controller.source().map(|u| u.get_ref().to_owned())
    }

    /// Set the buffer targets, in seconds, for respectively slow, medium and fast networks.
    pub fn set_buffer_targets(&mut self, slow: f64, medium: f64, fast: f64) {
        let res = self.controller.set_buffer_targets(slow, medium, fast);
        log_rejected_value(res);
    }

    pub fn set_critical_buffer_fraction(&mut self, fraction: f64) {
        let res = self
            .controller
            .config_mut()
            .update_critical_buffer_fraction(fraction);
        log_rejected_value(res);
    }

    pub fn set_resume_threshold(&mut self, threshold: f64) {
        let res = self.controller.config_mut().update_resume_threshold(threshold);
        log_rejected_value(res);
    }

    pub fn set_max_retries(&mut self, max_retries: u32) {
        self.controller.config_mut().update_max_retries(max_retries);
    }

    pub fn set_backoff_base(&mut self, base_ms: f64) {
        let res = self.controller.config_mut().update_backoff_base(base_ms);
        log_rejected_value(res);
    }

    pub fn set_backoff_max(&mut self, max_ms: f64) {
        let res = self.controller.config_mut().update_backoff_max(max_ms);
        log_rejected_value(res);
    }

    pub fn set_prefetch_enabled(&mut self, enabled: bool) {
        self.controller.config_mut().update_prefetch_enabled(enabled);
    }

    /// Enable (with an interval in milliseconds) or disable (`None`) the periodic re-application
    /// of presentation hints. Takes effect on the next assigned source.
    pub fn set_presentation_guard(&mut self, interval_ms: Option<f64>, block_context_menu: bool) {
        let res = self
            .controller
            .config_mut()
            .update_presentation_guard(interval_ms, block_context_menu);
        log_rejected_value(res);
    }

    /// Update the maximum level of logs emitted. `0` disables logs, `4` enables every debug log.
    pub fn set_log_level(&self, level: u8) {
        Logger::set_logger_level(LoggerLevel::from(level));
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn log_rejected_value(res: Result<(), ConfigurationError>) {
    if let Err(e) = res {
        Logger::warn(&format!("API: Ignoring configuration update: {e}"));
    }
}
