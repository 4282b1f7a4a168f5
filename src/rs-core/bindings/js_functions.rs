use crate::dispatcher::MediaObservation;
use crate::wasm_bindgen;

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.
///
/// None of them should be called from the controller itself: they are only reached through the
/// `JsPlaybackHost` implementation of the collaborator traits.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Starts a timer for the number of milliseconds indicated by the `duration` argument.
    //
    // Once this timer has elapsed, and unless `jsClearTimer` has been called since with
    // the `TimerId` returned by this function, the `on_timer_ended` method of the
    // `Dispatcher` will be called with both the corresponding `TimerId` and `reason`.
    pub fn jsTimer(duration: f64, reason: TimerReason) -> TimerId;

    // Clear a timer started with `jsTimer`.
    pub fn jsClearTimer(id: TimerId);

    // Set the `src` attribute of the media element linked to the `Dispatcher`.
    // `None` removes the current source (and the corresponding attribute) entirely.
    pub fn jsSetSource(url: Option<String>);

    // Call the `HTMLMediaElement.prototype.load` API.
    pub fn jsLoad();

    // Call the `HTMLMediaElement.prototype.play` API.
    //
    // If the returned Promise rejects, the `on_play_rejected` method of the `Dispatcher` has to
    // be called.
    pub fn jsPlay();

    // Call the `HTMLMediaElement.prototype.pause` API.
    pub fn jsPause();

    // Set the `currentTime` attribute of the media element.
    pub fn jsSeek(position: f64);

    // Synchronously build a `MediaObservation` from the current media element's attributes.
    pub fn jsGetMediaObservation() -> MediaObservation;

    // Ask for the media element (or its container) to be displayed in fullscreen.
    //
    // The `on_fullscreen_change` method of the `Dispatcher` will be called once done.
    pub fn jsRequestFullscreen();

    // Exit fullscreen mode if enabled.
    pub fn jsExitFullscreen();

    // Add (`true`) or remove (`false`) inline playback hints (e.g. the `playsinline`
    // attribute) from the media element.
    pub fn jsSetInlinePlayback(enabled: bool);

    // Show or hide the native controls of the media element.
    pub fn jsSetNativeControls(visible: bool);

    // Block or unblock the context menu on the media element.
    pub fn jsSetContextMenuBlocked(blocked: bool);

    // Returns the `effectiveType` property of `navigator.connection`, `None` if not available.
    pub fn jsGetConnectionEffectiveType() -> Option<String>;

    // Returns the `downlink` property of `navigator.connection` (in Mbps), `None` if not
    // available.
    pub fn jsGetConnectionDownlink() -> Option<f64>;

    pub fn jsAnnounceReady(duration: f64);
    pub fn jsAnnouncePlay();
    pub fn jsAnnouncePause();
    pub fn jsAnnounceEnded();
    pub fn jsAnnounceTimeUpdate(current_time: f64, duration: f64);
    pub fn jsAnnounceBufferingChange(is_buffering: bool);

    // Send a terminal error. No automatic action will be taken on that content anymore.
    pub fn jsSendError(kind: ErrorKind, message: &str);
}

/// "Reason" associated to a timer started by the `Dispatcher`.
///
/// This can then help to identify what the timer was for once resolved.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerReason {
    /// A network error happened and the content has to be reloaded.
    RetryLoad = 0,

    /// Fallback check performed while buffering, in case media events stop being sent.
    ResumeCheck = 1,

    /// Position has to be restored after a seek-ahead prefetch.
    PrefetchRestore = 2,

    /// A prefetch was just done, another one may now be performed.
    PrefetchCooldown = 3,

    /// A fullscreen transition took too long to be announced.
    FullscreenSettle = 4,

    /// Presentation hints have to be enforced again.
    PresentationGuard = 5,
}

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Category of a terminal error sent through `jsSendError`.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network errors happened and retries have been exhausted.
    Network = 0,
    /// The media could not be decoded.
    Decode = 1,
    /// The source is not supported by the media element.
    SourceNotSupported = 2,
}

/// Identify a pending timer.
pub type TimerId = f64;
