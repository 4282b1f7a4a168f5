use crate::{
    adaptive::ConnectionInfo,
    bindings::{ErrorKind, TimerId, TimerReason},
    dispatcher::MediaObservation,
    media_element::{ConnectionMonitor, MediaElement, PlayerEvents, Timers},
    utils::url::MediaUrl,
};

/// Command sent to the media element.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    SetSource(Option<String>),
    Load,
    Play,
    Pause,
    Seek(f64),
    RequestFullscreen,
    ExitFullscreen,
    SetInlinePlayback(bool),
    SetNativeControls(bool),
    SetContextMenuBlocked(bool),
}

/// Event sent outward.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Ready(f64),
    Play,
    Pause,
    Ended,
    TimeUpdate(f64, f64),
    BufferingChange(bool),
    Error(ErrorKind, String),
}

/// `PlaybackHost` recording everything the controller asks of it.
///
/// Timers never elapse on their own: tests fire them by calling the controller's
/// `on_timer_ended` with what `pending_timer` returns.
#[derive(Default)]
pub(crate) struct MockHost {
    pub(crate) commands: Vec<Command>,
    pub(crate) events: Vec<Event>,

    /// Timers started and not yet cleared, with their duration.
    pub(crate) timers: Vec<(TimerId, f64, TimerReason)>,
    pub(crate) cleared_timers: Vec<TimerId>,
    next_timer_id: TimerId,

    /// Returned by `observe`.
    pub(crate) observation: Option<MediaObservation>,
    pub(crate) connection: ConnectionInfo,
}

impl MockHost {
    pub(crate) fn with_connection(connection: ConnectionInfo) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }

    pub(crate) fn count_commands(&self, cmd: &Command) -> usize {
        self.commands.iter().filter(|c| *c == cmd).count()
    }

    pub(crate) fn count_events(&self, evt: &Event) -> usize {
        self.events.iter().filter(|e| *e == evt).count()
    }

    /// Forget about every command and event recorded until now.
    pub(crate) fn clear_history(&mut self) {
        self.commands.clear();
        self.events.clear();
    }

    /// Returns the id and duration of the first pending timer with the given reason, and
    /// consider it as elapsed.
    pub(crate) fn pending_timer(&mut self, reason: TimerReason) -> Option<(TimerId, f64)> {
        let idx = self.timers.iter().position(|t| t.2 == reason)?;
        let (id, duration, _) = self.timers.remove(idx);
        Some((id, duration))
    }

    pub(crate) fn has_timer(&self, reason: TimerReason) -> bool {
        self.timers.iter().any(|t| t.2 == reason)
    }
}

impl MediaElement for MockHost {
    fn set_source(&mut self, url: Option<&MediaUrl>) {
        self.commands
            .push(Command::SetSource(url.map(|u| u.get_ref().to_owned())));
    }

    fn load(&mut self) {
        self.commands.push(Command::Load);
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.commands.push(Command::Seek(position));
    }

    fn observe(&self) -> MediaObservation {
        self.observation
            .clone()
            .unwrap_or_else(|| ObservationBuilder::at(0.).ready_state(0).build())
    }

    fn request_fullscreen(&mut self) {
        self.commands.push(Command::RequestFullscreen);
    }

    fn exit_fullscreen(&mut self) {
        self.commands.push(Command::ExitFullscreen);
    }

    fn set_inline_playback(&mut self, enabled: bool) {
        self.commands.push(Command::SetInlinePlayback(enabled));
    }

    fn set_native_controls(&mut self, visible: bool) {
        self.commands.push(Command::SetNativeControls(visible));
    }

    fn set_context_menu_blocked(&mut self, blocked: bool) {
        self.commands.push(Command::SetContextMenuBlocked(blocked));
    }
}

impl Timers for MockHost {
    fn start_timer(&mut self, duration_ms: f64, reason: TimerReason) -> TimerId {
        self.next_timer_id += 1.;
        self.timers.push((self.next_timer_id, duration_ms, reason));
        self.next_timer_id
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.timers.retain(|t| t.0 != id);
        self.cleared_timers.push(id);
    }
}

impl PlayerEvents for MockHost {
    fn on_ready(&mut self, duration: f64) {
        self.events.push(Event::Ready(duration));
    }

    fn on_play(&mut self) {
        self.events.push(Event::Play);
    }

    fn on_pause(&mut self) {
        self.events.push(Event::Pause);
    }

    fn on_ended(&mut self) {
        self.events.push(Event::Ended);
    }

    fn on_time_update(&mut self, current_time: f64, duration: f64) {
        self.events.push(Event::TimeUpdate(current_time, duration));
    }

    fn on_buffering_change(&mut self, is_buffering: bool) {
        self.events.push(Event::BufferingChange(is_buffering));
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        self.events.push(Event::Error(kind, message.to_owned()));
    }
}

impl ConnectionMonitor for MockHost {
    fn connection_info(&self) -> ConnectionInfo {
        self.connection
    }
}

/// Builds `MediaObservation`s for tests, defaulting to a playing 100 seconds content with
/// enough data.
#[derive(Clone, Debug)]
pub(crate) struct ObservationBuilder {
    current_time: f64,
    ready_state: u8,
    buffered: Vec<f64>,
    paused: bool,
    seeking: bool,
    ended: bool,
    duration: f64,
}

impl ObservationBuilder {
    pub(crate) fn at(current_time: f64) -> Self {
        Self {
            current_time,
            ready_state: 4,
            buffered: vec![],
            paused: false,
            seeking: false,
            ended: false,
            duration: 100.,
        }
    }

    pub(crate) fn ready_state(mut self, ready_state: u8) -> Self {
        self.ready_state = ready_state;
        self
    }

    /// Buffered ranges as flat `start, end` pairs.
    pub(crate) fn buffered(mut self, buffered: &[f64]) -> Self {
        self.buffered = buffered.to_vec();
        self
    }

    pub(crate) fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub(crate) fn seeking(mut self, seeking: bool) -> Self {
        self.seeking = seeking;
        self
    }

    pub(crate) fn ended(mut self, ended: bool) -> Self {
        self.ended = ended;
        self
    }

    pub(crate) fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub(crate) fn build(&self) -> MediaObservation {
        MediaObservation::new(
            self.current_time,
            self.ready_state,
            &self.buffered,
            self.paused,
            self.seeking,
            self.ended,
            self.duration,
        )
    }
}
