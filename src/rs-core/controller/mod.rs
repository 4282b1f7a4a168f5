use thiserror::Error;

use crate::{
    adaptive::{ConnectionInfo, NetworkClass, NetworkEstimate},
    bindings::{ErrorKind, TimerId, TimerReason},
    dispatcher::MediaObservation,
    media_element::{MediaErrorCode, MediaEvent, PlaybackHost, ReadyState},
    utils::{time_ranges::TimeRanges, url::MediaUrl},
    wasm_bindgen, Logger,
};

use self::{
    presentation::{PresentationGuard, PresentationMode, PresentationState},
    session::MediaSession,
};

pub(crate) use self::configuration::{BufferingConfiguration, ConfigurationError};

mod configuration;
#[cfg(test)]
pub(crate) mod mock;
mod presentation;
mod retry;
mod session;

/// Margin, in seconds, under which the buffered data is considered to reach the end of the
/// content.
const END_OF_CONTENT_MARGIN: f64 = 0.001;

/// Identify the playback-related state the `PlaybackController` is in.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No valid source is currently assigned.
    Idle = 0,
    /// A source is assigned but not enough data is available to play it yet.
    Loading = 1,
    /// Enough data is available to play, but we're not playing.
    Ready = 2,
    /// The media element is playing.
    Playing = 3,
    /// Playback is paused until enough data is buffered again.
    Buffering = 4,
    /// A network error happened, the content will be reloaded once a timer elapses.
    Retrying = 5,
    /// A non-recoverable error happened. Nothing will be done until a new source is assigned.
    Errored = 6,
    /// The end of the content has been reached.
    Ended = 7,
}

/// Pending seek-ahead prefetch: the position has been moved temporarily to load data further
/// ahead and will be restored soon.
#[derive(Clone, Copy, Debug)]
struct PrefetchSeek {
    original_position: f64,
}

/// Keeps playback of a single media element free of stalls.
///
/// The `PlaybackController` observes buffered ranges through `MediaObservation`s, decides when to
/// pause for rebuffering and when to resume, keeps data loading while paused, and reloads the
/// content with an exponential backoff on network errors.
///
/// Every method is expected to be called from the same event loop. Each of them runs to
/// completion, so there's no other synchronization needed.
pub(crate) struct PlaybackController<H: PlaybackHost> {
    /// Collaborators: media element, timers, UI events and connection information.
    host: H,

    config: BufferingConfiguration,

    state: PlaybackState,

    /// The one live session, reset in place each time a source is assigned.
    session: MediaSession,

    network: NetworkEstimate,

    /// Stores the last `MediaObservation` received.
    last_observation: Option<MediaObservation>,

    /// Buffered ranges of the last observation.
    buffered: TimeRanges,

    /// Timers currently pending. A timer not in that list when it elapses is stale.
    timers: Vec<(TimerId, TimerReason)>,

    prefetch: Option<PrefetchSeek>,

    /// A prefetch has been done recently: no other one should be done for now.
    prefetch_cooling_down: bool,

    /// The user is currently dragging the progress bar.
    scrubbing: bool,

    presentation: PresentationState,
}

impl<H: PlaybackHost> PlaybackController<H> {
    pub(crate) fn new(host: H, config: BufferingConfiguration) -> Self {
        let network =
            NetworkEstimate::from_connection(&host.connection_info(), &config.buffer_targets);
        Self {
            host,
            config,
            state: PlaybackState::Idle,
            session: MediaSession::default(),
            network,
            last_observation: None,
            buffered: TimeRanges::new(),
            timers: vec![],
            prefetch: None,
            prefetch_cooling_down: false,
            scrubbing: false,
            presentation: PresentationState::default(),
        }
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub(crate) fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub(crate) fn config_mut(&mut self) -> &mut BufferingConfiguration {
        &mut self.config
    }

    pub(crate) fn network_class(&self) -> NetworkClass {
        self.network.class()
    }

    /// Seconds of data we currently want to have buffered ahead of the current position.
    pub(crate) fn buffer_target(&self) -> f64 {
        self.network.buffer_target()
    }

    pub(crate) fn retry_count(&self) -> u32 {
        self.session.retry.count()
    }

    pub(crate) fn source(&self) -> Option<&MediaUrl> {
        self.session.url()
    }

    /// Returns the current playback position as it should be seen from the outside.
    ///
    /// While a seek-ahead prefetch is pending, this is the position from before that seek.
    pub(crate) fn current_position(&self) -> f64 {
        match self.prefetch {
            Some(prefetch) => prefetch.original_position,
            None => self
                .last_observation
                .as_ref()
                .map(|o| o.current_time())
                .unwrap_or(0.),
        }
    }

    /// Returns the amount of data in seconds buffered ahead of the current position.
    pub(crate) fn buffer_ahead(&self) -> f64 {
        self.buffered
            .buffer_ahead(self.current_position(), self.config.range_epsilon)
    }

    /// Update the buffer targets and the current estimate accordingly.
    pub(crate) fn set_buffer_targets(
        &mut self,
        slow: f64,
        medium: f64,
        fast: f64,
    ) -> Result<(), ConfigurationError> {
        self.config.update_buffer_targets(slow, medium, fast)?;
        self.network = NetworkEstimate::new(self.network.class(), &self.config.buffer_targets);
        Ok(())
    }

    /// Start playing a new source, or stop everything if `url` is not a valid source.
    ///
    /// Every pending timer and every bit of state linked to the previous source is dropped
    /// before the new one is considered.
    pub(crate) fn assign_source(&mut self, url: &str, autoplay: bool) {
        let had_source = self.session.url().is_some();
        self.clear_all_timers();
        self.prefetch = None;
        self.prefetch_cooling_down = false;
        self.scrubbing = false;
        self.presentation.cancel_transition();
        self.last_observation = None;
        self.buffered = TimeRanges::new();

        let url = MediaUrl::parse(url);
        self.session.reset(url.clone(), autoplay);
        match url {
            None => {
                Logger::info("Ctrl: No valid source, going idle");
                if had_source {
                    self.host.set_source(None);
                }
                self.set_state(PlaybackState::Idle);
            }
            Some(url) => {
                Logger::info(&format!(
                    "Ctrl: Assigning source {} (autoplay: {autoplay})",
                    url.filename()
                ));
                if !url.is_absolute() {
                    Logger::debug(&format!("Ctrl: {url} is relative to the page"));
                }
                self.host.set_source(Some(&url));
                self.host.load();
                self.refresh_network_estimate();
                self.set_state(PlaybackState::Loading);
                self.enforce_presentation();
            }
        }
    }

    /// Stop the current content, if one.
    pub(crate) fn reset(&mut self) {
        self.assign_source("", false);
    }

    pub(crate) fn user_play(&mut self) {
        self.session.user_interacted = true;
        self.restore_prefetch();
        match self.state {
            PlaybackState::Loading | PlaybackState::Ready => self.host.play(),
            PlaybackState::Ended => {
                Logger::info("Ctrl: Restarting ended content");
                self.host.seek(0.);
                self.host.play();
            }
            PlaybackState::Playing | PlaybackState::Buffering => {}
            PlaybackState::Idle | PlaybackState::Retrying | PlaybackState::Errored => {
                Logger::debug(&format!("Ctrl: Ignoring play in {:?} state", self.state));
            }
        }
    }

    pub(crate) fn user_pause(&mut self) {
        self.session.user_interacted = true;
        self.restore_prefetch();
        match self.state {
            PlaybackState::Buffering => {
                // The media element is already paused by us
                self.stop_rebuffering();
                self.set_state(PlaybackState::Ready);
                self.host.on_pause();
            }
            PlaybackState::Playing | PlaybackState::Loading | PlaybackState::Ready => {
                self.session.pending_user_pause = true;
                self.host.pause();
            }
            PlaybackState::Retrying => self.session.resume_playback = false,
            PlaybackState::Idle | PlaybackState::Errored | PlaybackState::Ended => {}
        }
    }

    pub(crate) fn user_seek(&mut self, position: f64) {
        self.session.user_interacted = true;
        if matches!(self.state, PlaybackState::Idle | PlaybackState::Errored) {
            return;
        }
        if self.prefetch.take().is_some() {
            self.clear_timers_with(TimerReason::PrefetchRestore);
        }
        let duration = self
            .last_observation
            .as_ref()
            .map(|o| o.duration())
            .unwrap_or(f64::NAN);
        let mut target = f64::max(position, 0.);
        if duration.is_finite() {
            target = f64::min(target, duration);
        }
        Logger::debug(&format!("Ctrl: User seek to {target}"));
        self.host.seek(target);
        if self.state == PlaybackState::Ended && !(duration.is_finite() && target >= duration) {
            self.set_state(PlaybackState::Ready);
        }
    }

    pub(crate) fn user_scrub_start(&mut self) {
        self.session.user_interacted = true;
        self.scrubbing = true;
        self.restore_prefetch();
    }

    pub(crate) fn user_scrub_end(&mut self) {
        self.scrubbing = false;
    }

    pub(crate) fn request_fullscreen_toggle(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        self.session.user_interacted = true;
        let target = match self.presentation.toggle_target() {
            Some(target) => target,
            None => {
                Logger::debug("Ctrl: Fullscreen transition already pending, ignoring toggle");
                return;
            }
        };
        let was_playing = matches!(self.state, PlaybackState::Playing | PlaybackState::Buffering);
        let settle_timer = self.start_timer(
            self.config.fullscreen_settle_delay,
            TimerReason::FullscreenSettle,
        );
        self.presentation
            .start_transition(target, was_playing, settle_timer);
        match target {
            PresentationMode::Fullscreen => {
                self.host.set_inline_playback(false);
                self.host.request_fullscreen();
            }
            PresentationMode::Inline => self.host.exit_fullscreen(),
        }
    }

    /// Method to call when the media element emitted `event`, with an observation made right
    /// after it.
    pub(crate) fn on_media_event(&mut self, event: MediaEvent, observation: MediaObservation) {
        if matches!(self.state, PlaybackState::Idle | PlaybackState::Errored) {
            Logger::debug(&format!("Ctrl: Ignoring {event:?} in {:?} state", self.state));
            return;
        }
        Logger::lazy_debug(&|| {
            format!(
                "Ctrl: {:?} received, t: {}, rs: {}",
                event,
                observation.current_time(),
                observation.ready_state()
            )
        });
        self.set_observation(observation);

        if self.prefetch.is_some()
            && matches!(
                event,
                MediaEvent::Seeking | MediaEvent::Seeked | MediaEvent::TimeUpdate
            )
        {
            return;
        }

        match event {
            MediaEvent::LoadStart | MediaEvent::Play => {}
            MediaEvent::LoadedMetadata => self.restore_resume_position(),
            MediaEvent::CanPlay | MediaEvent::CanPlayThrough => self.on_can_play(),
            MediaEvent::Playing => self.on_playing(),
            MediaEvent::Pause => self.on_pause(),
            MediaEvent::Waiting
            | MediaEvent::Stalled
            | MediaEvent::Progress
            | MediaEvent::Seeking
            | MediaEvent::Seeked => self.check_buffer(),
            MediaEvent::TimeUpdate => {
                self.check_buffer();
                self.announce_time_update();
            }
            MediaEvent::Ended => self.on_ended(),
        }
    }

    /// Method to call when the media element reports an error.
    pub(crate) fn on_media_error(&mut self, code: MediaErrorCode, message: Option<String>) {
        match self.state {
            PlaybackState::Idle | PlaybackState::Errored => return,
            PlaybackState::Retrying => {
                Logger::debug("Ctrl: Error received while waiting to retry, ignoring");
                return;
            }
            _ => {}
        }
        let message = message.unwrap_or_else(|| "Unknown error".to_owned());
        if code == MediaErrorCode::Aborted {
            Logger::info(&format!("Ctrl: Media loading aborted: {message}"));
            return;
        }
        if !code.is_transient() {
            self.fail(PlaybackError::from_fatal_code(code, message));
            return;
        }

        let position = self.current_position();
        let retry_delay = self.session.retry.next_attempt(
            self.config.max_retries,
            self.config.backoff_base,
            self.config.backoff_max,
        );
        match retry_delay {
            Some(delay) => {
                Logger::warn(&format!(
                    "Ctrl: Network error, retrying in {delay}ms (attempt {}): {message}",
                    self.session.retry.count()
                ));
                // After a reload, the previous wish is kept
                match self.state {
                    PlaybackState::Playing | PlaybackState::Buffering => {
                        self.session.resume_playback = true
                    }
                    PlaybackState::Loading => {}
                    _ => self.session.resume_playback = false,
                }
                if position > 0. {
                    self.session.resume_position = Some(position);
                }
                self.stop_rebuffering();
                self.drop_prefetch();
                self.set_state(PlaybackState::Retrying);
                self.start_timer(delay, TimerReason::RetryLoad);
            }
            None => self.fail(PlaybackError::NetworkRetriesExhausted {
                attempts: self.session.retry.count(),
                message,
            }),
        }
    }

    /// Method to call when a `play` call was rejected by the platform.
    ///
    /// `not_allowed` is `true` when it was due to autoplay policies, which is an expected case.
    pub(crate) fn on_play_rejected(&mut self, not_allowed: bool) {
        if not_allowed {
            Logger::debug("Ctrl: Play rejected by autoplay policy, awaiting user action");
        } else {
            Logger::info("Ctrl: Play call rejected");
        }
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Ready);
        }
    }

    /// Method to call once a timer started through the `Timers` collaborator elapsed.
    pub(crate) fn on_timer_ended(&mut self, id: TimerId, reason: TimerReason) {
        let tracked = match self.take_timer(id) {
            Some(tracked) => tracked,
            None => {
                Logger::debug(&format!("Ctrl: Ignoring stale {reason:?} timer"));
                return;
            }
        };
        match tracked {
            TimerReason::RetryLoad => self.on_retry_timer(),
            TimerReason::ResumeCheck => self.on_resume_check_timer(),
            TimerReason::PrefetchRestore => self.restore_prefetch(),
            TimerReason::PrefetchCooldown => self.prefetch_cooling_down = false,
            TimerReason::FullscreenSettle => self.on_fullscreen_settled(),
            TimerReason::PresentationGuard => self.enforce_presentation(),
        }
    }

    /// Method to call when the platform notified us of a connection change.
    pub(crate) fn on_connection_change(&mut self, info: ConnectionInfo) {
        self.update_network_estimate(info);
    }

    /// Method to call when the media element entered or exited fullscreen.
    pub(crate) fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        let mode = if is_fullscreen {
            PresentationMode::Fullscreen
        } else {
            PresentationMode::Inline
        };
        let transition = self.presentation.complete(mode);
        if let Some(t) = transition {
            self.clear_timer(t.settle_timer);
            if t.target != mode {
                Logger::warn(&format!("Ctrl: Asked for {:?}, got {:?}", t.target, mode));
            }
        }
        if mode == PresentationMode::Inline {
            self.host.set_inline_playback(true);
        }
        if transition.map(|t| t.resume_needed).unwrap_or(false) {
            self.resume_after_transition();
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            Logger::debug(&format!("Ctrl: State {:?} -> {:?}", self.state, state));
            self.state = state;
        }
    }

    fn set_observation(&mut self, observation: MediaObservation) {
        self.buffered = TimeRanges::from_pairs(observation.buffered());
        self.last_observation = Some(observation);
    }

    fn ready_state(&self) -> ReadyState {
        self.last_observation
            .as_ref()
            .map(|o| ReadyState::from(o.ready_state()))
            .unwrap_or(ReadyState::HaveNothing)
    }

    fn refresh_network_estimate(&mut self) {
        let info = self.host.connection_info();
        self.update_network_estimate(info);
    }

    fn update_network_estimate(&mut self, info: ConnectionInfo) {
        let estimate = NetworkEstimate::from_connection(&info, &self.config.buffer_targets);
        if estimate != self.network {
            Logger::info(&format!(
                "Net: Network now considered {}, buffer target: {}s",
                estimate.class(),
                estimate.buffer_target()
            ));
            self.network = estimate;
        }
    }

    fn on_can_play(&mut self) {
        match self.state {
            PlaybackState::Loading => {
                self.set_state(PlaybackState::Ready);
                if !self.session.ready_announced {
                    self.session.ready_announced = true;
                    let duration = self
                        .last_observation
                        .as_ref()
                        .map(|o| o.duration())
                        .unwrap_or(f64::NAN);
                    self.host.on_ready(duration);
                }
                self.check_autoplay();
            }
            PlaybackState::Ready => self.check_autoplay(),
            PlaybackState::Buffering => self.check_resume(),
            _ => {}
        }
    }

    /// Issue a `play` if autoplay was asked for and not yet attempted on this source.
    fn check_autoplay(&mut self) {
        if self.session.should_autoplay() && self.ready_state() >= ReadyState::HaveCurrentData {
            Logger::info("Ctrl: Attempting autoplay");
            self.session.autoplay_attempted = true;
            self.restore_prefetch();
            self.host.play();
        }
    }

    fn on_playing(&mut self) {
        self.session.retry.reset();
        match self.state {
            PlaybackState::Loading | PlaybackState::Ready | PlaybackState::Ended => {
                self.set_state(PlaybackState::Playing);
                self.host.on_play();
            }
            PlaybackState::Buffering => {
                Logger::info("Ctrl: Playback resumed from outside while rebuffering");
                self.stop_rebuffering();
                self.set_state(PlaybackState::Playing);
            }
            _ => {}
        }
    }

    fn on_pause(&mut self) {
        if self.session.expected_pause {
            self.session.expected_pause = false;
            return;
        }
        let is_user_pause = self.session.pending_user_pause;
        self.session.pending_user_pause = false;
        if !is_user_pause && self.presentation.on_unexpected_pause() {
            Logger::info("Ctrl: Pause received during fullscreen transition, will resume");
            return;
        }
        match self.state {
            PlaybackState::Playing => {
                self.set_state(PlaybackState::Ready);
                self.host.on_pause();
            }
            PlaybackState::Buffering => {
                self.stop_rebuffering();
                self.set_state(PlaybackState::Ready);
                self.host.on_pause();
            }
            _ => {}
        }
    }

    fn on_ended(&mut self) {
        if self.state == PlaybackState::Ended {
            return;
        }
        self.stop_rebuffering();
        self.drop_prefetch();
        self.set_state(PlaybackState::Ended);
        self.host.on_ended();
    }

    /// Re-evaluate the buffer situation after the last observation.
    fn check_buffer(&mut self) {
        if self.last_observation.is_none() {
            return;
        }
        match self.state {
            PlaybackState::Playing => self.check_stall(),
            PlaybackState::Buffering => self.check_resume(),
            PlaybackState::Ready => self.check_prefetch(),
            _ => {}
        }
    }

    fn check_stall(&mut self) {
        let (paused, ended, duration) = match self.last_observation.as_ref() {
            Some(obs) => (obs.paused(), obs.ended(), obs.duration()),
            None => return,
        };
        let position = self.current_position();
        let buffer_ahead = self.buffer_ahead();
        let critical = self.config.critical_buffer(self.buffer_target());
        if buffer_ahead >= critical
            || self.ready_state() >= ReadyState::HaveFutureData
            || ended
            || reaches_end(position, buffer_ahead, duration)
        {
            return;
        }
        Logger::info(&format!(
            "Ctrl: Starting rebuffering period. bg: {buffer_ahead}, critical: {critical}"
        ));
        self.set_state(PlaybackState::Buffering);
        if !paused {
            self.session.expected_pause = true;
            self.host.pause();
        }
        self.host.on_buffering_change(true);
        self.arm_resume_check();
    }

    fn check_resume(&mut self) {
        let duration = match self.last_observation.as_ref() {
            Some(obs) => obs.duration(),
            None => return,
        };
        let buffer_ahead = self.buffer_ahead();
        let enough_data = buffer_ahead > self.config.resume_threshold
            && self.ready_state() >= ReadyState::HaveFutureData;
        if enough_data || reaches_end(self.current_position(), buffer_ahead, duration) {
            Logger::info(&format!("Ctrl: Quitting rebuffering period. bg: {buffer_ahead}"));
            self.stop_rebuffering();
            self.set_state(PlaybackState::Playing);
            self.host.play();
        }
    }

    /// Clean-up what was put in place when rebuffering started.
    fn stop_rebuffering(&mut self) {
        self.clear_timers_with(TimerReason::ResumeCheck);
        if self.state == PlaybackState::Buffering {
            self.host.on_buffering_change(false);
        }
    }

    fn arm_resume_check(&mut self) {
        if !self.has_timer(TimerReason::ResumeCheck) {
            self.start_timer(self.config.resume_check_interval, TimerReason::ResumeCheck);
        }
    }

    fn on_resume_check_timer(&mut self) {
        if self.state != PlaybackState::Buffering {
            return;
        }
        let observation = self.host.observe();
        self.set_observation(observation);
        self.check_resume();
        if self.state == PlaybackState::Buffering {
            self.arm_resume_check();
        }
    }

    /// While paused, move the position ahead for a short time so the media element loads data
    /// there too.
    fn check_prefetch(&mut self) {
        if !self.config.prefetch_enabled
            || self.scrubbing
            || self.prefetch.is_some()
            || self.prefetch_cooling_down
            || self.presentation.is_transitioning()
        {
            return;
        }
        let (paused, seeking, ended, duration) = match self.last_observation.as_ref() {
            Some(obs) => (obs.paused(), obs.seeking(), obs.ended(), obs.duration()),
            None => return,
        };
        if !paused || seeking || ended || self.ready_state() < ReadyState::HaveMetadata {
            return;
        }
        if !duration.is_finite() || duration <= 0. {
            return;
        }
        let target = self.buffer_target();
        if self.buffer_ahead() >= target {
            return;
        }
        let position = self.current_position();
        let seek_to = f64::min(position + target, duration);
        if seek_to <= position
            || self
                .buffered
                .range_for(seek_to, self.config.range_epsilon)
                .is_some()
        {
            return;
        }
        Logger::debug(&format!("Ctrl: Prefetching around {seek_to} (from {position})"));
        self.prefetch = Some(PrefetchSeek {
            original_position: position,
        });
        self.host.seek(seek_to);
        self.start_timer(self.config.prefetch_restore_delay, TimerReason::PrefetchRestore);
    }

    /// Go back to the position we were at before a seek-ahead prefetch, if one is pending.
    fn restore_prefetch(&mut self) {
        if let Some(prefetch) = self.prefetch.take() {
            self.clear_timers_with(TimerReason::PrefetchRestore);
            if let Some(obs) = self.last_observation.as_mut() {
                // Until the element reports again, it is where we just sent it back
                obs.set_current_time(prefetch.original_position);
            }
            self.host.seek(prefetch.original_position);
            self.prefetch_cooling_down = true;
            self.start_timer(self.config.prefetch_cooldown, TimerReason::PrefetchCooldown);
        }
    }

    /// Forget a pending prefetch without seeking back.
    fn drop_prefetch(&mut self) {
        if self.prefetch.take().is_some() {
            self.clear_timers_with(TimerReason::PrefetchRestore);
        }
    }

    fn restore_resume_position(&mut self) {
        if self.ready_state() < ReadyState::HaveMetadata {
            return;
        }
        if let Some(position) = self.session.resume_position.take() {
            Logger::info(&format!("Ctrl: Going back to {position} after reload"));
            self.host.seek(position);
        }
    }

    fn on_retry_timer(&mut self) {
        if self.state != PlaybackState::Retrying {
            return;
        }
        Logger::info(&format!(
            "Ctrl: Reloading content (attempt {})",
            self.session.retry.count()
        ));
        self.last_observation = None;
        self.buffered = TimeRanges::new();
        self.set_state(PlaybackState::Loading);
        self.host.load();
        if self.session.resume_playback {
            self.host.play();
        }
    }

    fn announce_time_update(&mut self) {
        if let Some(obs) = self.last_observation.as_ref() {
            let (current_time, duration) = (obs.current_time(), obs.duration());
            self.host.on_time_update(current_time, duration);
        }
    }

    fn resume_after_transition(&mut self) {
        if self.state == PlaybackState::Playing {
            Logger::info("Ctrl: Resuming playback paused by a fullscreen transition");
            self.host.play();
        }
    }

    fn on_fullscreen_settled(&mut self) {
        if let Some(transition) = self.presentation.settle() {
            Logger::warn("Ctrl: Fullscreen transition was never confirmed");
            if self.presentation.mode() == PresentationMode::Inline {
                self.host.set_inline_playback(true);
            }
            if transition.resume_needed {
                self.resume_after_transition();
            }
        }
    }

    /// Apply presentation hints and schedule the next enforcement, if that guard is enabled.
    fn enforce_presentation(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        let guard = PresentationGuard::new(
            self.config.presentation_guard_interval,
            self.config.block_context_menu,
        );
        if let Some(guard) = guard {
            guard.enforce(&mut self.host);
            if !self.has_timer(TimerReason::PresentationGuard) {
                self.start_timer(guard.interval, TimerReason::PresentationGuard);
            }
        }
    }

    fn fail(&mut self, error: PlaybackError) {
        Logger::error(&format!("Ctrl: {error}"));
        self.stop_rebuffering();
        self.drop_prefetch();
        self.clear_all_timers();
        self.set_state(PlaybackState::Errored);
        self.host.on_error(error.kind(), &error.to_string());
    }

    fn start_timer(&mut self, duration_ms: f64, reason: TimerReason) -> TimerId {
        let id = self.host.start_timer(duration_ms, reason);
        self.timers.push((id, reason));
        id
    }

    fn has_timer(&self, reason: TimerReason) -> bool {
        self.timers.iter().any(|t| t.1 == reason)
    }

    /// Stop tracking the timer with the given id and returns its reason, `None` if it wasn't
    /// tracked.
    fn take_timer(&mut self, id: TimerId) -> Option<TimerReason> {
        let idx = self.timers.iter().position(|t| t.0 == id)?;
        Some(self.timers.remove(idx).1)
    }

    fn clear_timer(&mut self, id: TimerId) {
        if self.take_timer(id).is_some() {
            self.host.clear_timer(id);
        }
    }

    fn clear_timers_with(&mut self, reason: TimerReason) {
        let host = &mut self.host;
        self.timers.retain(|t| {
            if t.1 == reason {
                host.clear_timer(t.0);
                false
            } else {
                true
            }
        });
    }

    fn clear_all_timers(&mut self) {
        while let Some((id, _)) = self.timers.pop() {
            self.host.clear_timer(id);
        }
    }
}

/// Returns `true` if data is buffered until the end of the content.
fn reaches_end(position: f64, buffer_ahead: f64, duration: f64) -> bool {
    duration.is_finite() && position + buffer_ahead >= duration - END_OF_CONTENT_MARGIN
}

/// Error reported outward once no automatic recovery is possible anymore.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum PlaybackError {
    #[error("Network error, giving up after {attempts} retries: {message}")]
    NetworkRetriesExhausted { attempts: u32, message: String },
    #[error("The media could not be decoded: {message}")]
    Decode { message: String },
    #[error("The media source is not supported: {message}")]
    SourceNotSupported { message: String },
}

impl PlaybackError {
    fn from_fatal_code(code: MediaErrorCode, message: String) -> Self {
        match code {
            MediaErrorCode::SrcNotSupported => PlaybackError::SourceNotSupported { message },
            _ => PlaybackError::Decode { message },
        }
    }

    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            PlaybackError::NetworkRetriesExhausted { .. } => ErrorKind::Network,
            PlaybackError::Decode { .. } => ErrorKind::Decode,
            PlaybackError::SourceNotSupported { .. } => ErrorKind::SourceNotSupported,
        }
    }
}
