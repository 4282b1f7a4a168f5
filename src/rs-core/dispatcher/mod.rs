use crate::{
    bindings::JsPlaybackHost,
    controller::{BufferingConfiguration, PlaybackController},
    wasm_bindgen,
};

mod api;
mod event_listeners;

pub(crate) use event_listeners::MediaObservation;

/// The `Dispatcher` is the player Interface exported to the JavaScript-side,
/// providing an API to load contents and influence various parameters about playback.
///
/// It is a thin layer: every call is forwarded to a `PlaybackController` driving the
/// HTMLMediaElement through the `js*` functions.
#[wasm_bindgen]
pub struct Dispatcher {
    controller: PlaybackController<JsPlaybackHost>,
}

impl Dispatcher {
    fn with_configuration(config: BufferingConfiguration) -> Self {
        Self {
            controller: PlaybackController::new(JsPlaybackHost, config),
        }
    }
}
