use crate::bindings::TimerId;
use crate::media_element::MediaElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PresentationMode {
    Inline,
    Fullscreen,
}

/// A fullscreen enter or exit which has been asked but not yet confirmed by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Transition {
    pub(crate) target: PresentationMode,

    /// Playback was wanted when the transition started.
    pub(crate) was_playing: bool,

    /// A pause not asked by anyone was received during the transition.
    pub(crate) resume_needed: bool,

    pub(crate) settle_timer: TimerId,
}

/// Tracks fullscreen transitions so they never alter playback.
#[derive(Debug)]
pub(crate) struct PresentationState {
    mode: PresentationMode,
    transition: Option<Transition>,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Inline,
            transition: None,
        }
    }
}

impl PresentationState {
    pub(crate) fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub(crate) fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Target of a new toggle, or `None` if a transition is already pending.
    pub(crate) fn toggle_target(&self) -> Option<PresentationMode> {
        if self.transition.is_some() {
            return None;
        }
        Some(match self.mode {
            PresentationMode::Inline => PresentationMode::Fullscreen,
            PresentationMode::Fullscreen => PresentationMode::Inline,
        })
    }

    pub(crate) fn start_transition(
        &mut self,
        target: PresentationMode,
        was_playing: bool,
        settle_timer: TimerId,
    ) {
        self.transition = Some(Transition {
            target,
            was_playing,
            resume_needed: false,
            settle_timer,
        });
    }

    /// Called on a pause no one asked for. Returns `true` if it happened during a transition
    /// while playing, in which case it is recorded and should not be considered as a real pause.
    pub(crate) fn on_unexpected_pause(&mut self) -> bool {
        match self.transition.as_mut() {
            Some(transition) if transition.was_playing => {
                transition.resume_needed = true;
                true
            }
            _ => false,
        }
    }

    /// End the current transition (if one) and set the new mode.
    ///
    /// Returns the transition which just ended.
    pub(crate) fn complete(&mut self, mode: PresentationMode) -> Option<Transition> {
        self.mode = mode;
        self.transition.take()
    }

    /// End the current transition without knowing the resulting mode (the platform never told
    /// us).
    pub(crate) fn settle(&mut self) -> Option<Transition> {
        self.transition.take()
    }

    /// Drop any pending transition, keeping the current mode.
    pub(crate) fn cancel_transition(&mut self) {
        self.transition = None;
    }
}

/// Re-applies presentation hints that some platforms keep resetting (native controls showing up
/// again, context menu re-enabled...).
///
/// It is independent from the buffering logic: the controller just calls `enforce` at a fixed
/// cadence when it is enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PresentationGuard {
    pub(crate) interval: f64,
    pub(crate) block_context_menu: bool,
}

impl PresentationGuard {
    pub(crate) fn new(interval: Option<f64>, block_context_menu: bool) -> Option<Self> {
        interval.map(|interval| Self {
            interval,
            block_context_menu,
        })
    }

    pub(crate) fn enforce(&self, element: &mut impl MediaElement) {
        element.set_native_controls(false);
        if self.block_context_menu {
            element.set_context_menu_blocked(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_ignored_while_transitioning() {
        let mut state = PresentationState::default();
        assert_eq!(state.toggle_target(), Some(PresentationMode::Fullscreen));
        state.start_transition(PresentationMode::Fullscreen, true, 1.);
        assert_eq!(state.toggle_target(), None);
        assert!(state.is_transitioning());

        let ended = state.complete(PresentationMode::Fullscreen).unwrap();
        assert_eq!(ended.target, PresentationMode::Fullscreen);
        assert_eq!(state.mode(), PresentationMode::Fullscreen);
        assert_eq!(state.toggle_target(), Some(PresentationMode::Inline));
    }

    #[test]
    fn test_unexpected_pause_only_matters_when_playing() {
        let mut state = PresentationState::default();
        assert!(!state.on_unexpected_pause());

        state.start_transition(PresentationMode::Fullscreen, false, 1.);
        assert!(!state.on_unexpected_pause());
        assert!(!state.settle().unwrap().resume_needed);

        state.start_transition(PresentationMode::Fullscreen, true, 2.);
        assert!(state.on_unexpected_pause());
        assert!(state.settle().unwrap().resume_needed);
        assert_eq!(state.mode(), PresentationMode::Inline);
    }

    #[test]
    fn test_cancel_keeps_mode() {
        let mut state = PresentationState::default();
        state.start_transition(PresentationMode::Fullscreen, true, 1.);
        state.cancel_transition();
        assert!(!state.is_transitioning());
        assert_eq!(state.mode(), PresentationMode::Inline);
        assert!(state.settle().is_none());
    }

    #[test]
    fn test_guard_creation() {
        assert_eq!(PresentationGuard::new(None, true), None);
        let guard = PresentationGuard::new(Some(500.), false).unwrap();
        assert_eq!(guard.interval, 500.);
    }
}
