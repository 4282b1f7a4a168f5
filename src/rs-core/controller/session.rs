use super::retry::RetryState;
use crate::utils::url::MediaUrl;

/// Per-source bookkeeping of the `PlaybackController`.
///
/// Only one `MediaSession` exists for the whole lifetime of a controller: it is reset in place
/// each time a new source is assigned.
#[derive(Debug, Default)]
pub(crate) struct MediaSession {
    /// Currently assigned source. `None` when no valid source is set.
    url: Option<MediaUrl>,

    /// Autoplay was asked for this source.
    pub(crate) autoplay_requested: bool,

    /// A `play` command was already issued for autoplay purposes on this source.
    pub(crate) autoplay_attempted: bool,

    /// The user called one of the playback commands since the source was assigned.
    pub(crate) user_interacted: bool,

    /// `on_ready` was already sent for this source.
    pub(crate) ready_announced: bool,

    /// A pause asked through `user_pause` whose "pause" event has not been received yet.
    pub(crate) pending_user_pause: bool,

    /// A pause issued by the controller itself (e.g. to rebuffer) whose "pause" event has not
    /// been received yet.
    pub(crate) expected_pause: bool,

    /// Position to go back to once the content has been reloaded after an error.
    pub(crate) resume_position: Option<f64>,

    /// Playback was wanted when the content had to be reloaded after an error.
    pub(crate) resume_playback: bool,

    pub(crate) retry: RetryState,
}

impl MediaSession {
    /// Forget everything about the previous source and start tracking `url`.
    pub(crate) fn reset(&mut self, url: Option<MediaUrl>, autoplay: bool) {
        *self = Self {
            url,
            autoplay_requested: autoplay,
            ..Self::default()
        };
    }

    pub(crate) fn url(&self) -> Option<&MediaUrl> {
        self.url.as_ref()
    }

    /// Returns `true` if autoplay should be attempted right now.
    pub(crate) fn should_autoplay(&self) -> bool {
        self.autoplay_requested && !self.autoplay_attempted && !self.user_interacted
    }
}
