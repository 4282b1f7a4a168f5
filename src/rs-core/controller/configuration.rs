use thiserror::Error;

use crate::adaptive::BufferTargets;

const DEFAULT_CRITICAL_BUFFER_FRACTION: f64 = 0.5;
const DEFAULT_RESUME_THRESHOLD: f64 = 2.;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE: f64 = 1000.;
const DEFAULT_BACKOFF_MAX: f64 = 30_000.;

/// Inner configuration on which the `PlaybackController` relies.
///
/// All values are heuristics: only their relative ordering matters.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BufferingConfiguration {
    /// Amount of buffer, ahead of the current position, we want to build in seconds, depending
    /// on the estimated network speed.
    pub(crate) buffer_targets: BufferTargets,

    /// Fraction of the current buffer target under which, if the media element also reports not
    /// having enough data, we consider playback as stalled.
    pub(crate) critical_buffer_fraction: f64,

    /// When rebuffering, amount of buffer ahead in seconds needed before resuming playback.
    pub(crate) resume_threshold: f64,

    /// Tolerance in seconds used when looking for the buffered range containing the current
    /// position.
    pub(crate) range_epsilon: f64,

    /// Amount of times the content is reloaded on network errors: `1` meaning it will be
    /// retried once, `2` twice, `0` never retried etc.
    pub(crate) max_retries: u32,

    /// Delay in milliseconds before the first reload after a network error.
    /// That delay is then doubled at each consecutive retry.
    pub(crate) backoff_base: f64,

    /// Maximum delay in milliseconds the backoff delay can reach.
    pub(crate) backoff_max: f64,

    /// Interval in milliseconds at which we check if playback can resume while rebuffering,
    /// regardless of media events.
    pub(crate) resume_check_interval: f64,

    /// If `true`, data keeps being loaded while paused through seek-ahead prefetches.
    pub(crate) prefetch_enabled: bool,

    /// Delay in milliseconds after which the position is restored after a seek-ahead prefetch.
    pub(crate) prefetch_restore_delay: f64,

    /// Minimum delay in milliseconds between two seek-ahead prefetches.
    pub(crate) prefetch_cooldown: f64,

    /// Maximum time in milliseconds a fullscreen transition can take before we consider it done.
    pub(crate) fullscreen_settle_delay: f64,

    /// Interval in milliseconds at which presentation hints are enforced again.
    /// `None` to disable that guard.
    pub(crate) presentation_guard_interval: Option<f64>,

    /// If `true`, the presentation guard also keeps the context menu blocked.
    pub(crate) block_context_menu: bool,
}

impl Default for BufferingConfiguration {
    fn default() -> Self {
        Self {
            buffer_targets: BufferTargets::default(),
            critical_buffer_fraction: DEFAULT_CRITICAL_BUFFER_FRACTION,
            resume_threshold: DEFAULT_RESUME_THRESHOLD,
            range_epsilon: 0.1,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
            backoff_max: DEFAULT_BACKOFF_MAX,
            resume_check_interval: 1000.,
            prefetch_enabled: true,
            prefetch_restore_delay: 50.,
            prefetch_cooldown: 2000.,
            fullscreen_settle_delay: 1500.,
            presentation_guard_interval: None,
            block_context_menu: false,
        }
    }
}

/// Error returned when trying to set an invalid configuration value.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum ConfigurationError {
    #[error("Buffer targets must be positive and ordered (slow > medium >= fast), got {slow}/{medium}/{fast}")]
    UnorderedBufferTargets { slow: f64, medium: f64, fast: f64 },
    #[error("Critical buffer fraction must be in the ]0, 1] interval, got {0}")]
    InvalidCriticalFraction(f64),
    #[error("`{name}` must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("Maximum backoff delay ({max}) cannot be lower than the base delay ({base})")]
    BackoffMaxUnderBase { base: f64, max: f64 },
}

impl BufferingConfiguration {
    pub(crate) fn update_buffer_targets(
        &mut self,
        slow: f64,
        medium: f64,
        fast: f64,
    ) -> Result<(), ConfigurationError> {
        let targets = BufferTargets { slow, medium, fast };
        if !targets.is_ordered() || !slow.is_finite() {
            return Err(ConfigurationError::UnorderedBufferTargets { slow, medium, fast });
        }
        self.buffer_targets = targets;
        Ok(())
    }

    pub(crate) fn update_critical_buffer_fraction(
        &mut self,
        fraction: f64,
    ) -> Result<(), ConfigurationError> {
        if !(fraction > 0. && fraction <= 1.) {
            return Err(ConfigurationError::InvalidCriticalFraction(fraction));
        }
        self.critical_buffer_fraction = fraction;
        Ok(())
    }

    pub(crate) fn update_resume_threshold(&mut self, threshold: f64) -> Result<(), ConfigurationError> {
        self.resume_threshold = check_positive("resume_threshold", threshold)?;
        Ok(())
    }

    pub(crate) fn update_max_retries(&mut self, max_retries: u32) {
        self.max_retries = max_retries;
    }

    pub(crate) fn update_backoff_base(&mut self, base: f64) -> Result<(), ConfigurationError> {
        let base = check_positive("backoff_base", base)?;
        if base > self.backoff_max {
            return Err(ConfigurationError::BackoffMaxUnderBase {
                base,
                max: self.backoff_max,
            });
        }
        self.backoff_base = base;
        Ok(())
    }

    pub(crate) fn update_backoff_max(&mut self, max: f64) -> Result<(), ConfigurationError> {
        let max = check_positive("backoff_max", max)?;
        if max < self.backoff_base {
            return Err(ConfigurationError::BackoffMaxUnderBase {
                base: self.backoff_base,
                max,
            });
        }
        self.backoff_max = max;
        Ok(())
    }

    pub(crate) fn update_prefetch_enabled(&mut self, enabled: bool) {
        self.prefetch_enabled = enabled;
    }

    pub(crate) fn update_presentation_guard(
        &mut self,
        interval: Option<f64>,
        block_context_menu: bool,
    ) -> Result<(), ConfigurationError> {
        self.presentation_guard_interval = match interval {
            Some(val) => Some(check_positive("presentation_guard_interval", val)?),
            None => None,
        };
        self.block_context_menu = block_context_menu;
        Ok(())
    }

    /// Minimum buffer ahead, in seconds, under which playback may be considered as stalled.
    pub(crate) fn critical_buffer(&self, buffer_target: f64) -> f64 {
        buffer_target * self.critical_buffer_fraction
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(ConfigurationError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = BufferingConfiguration::default();
        assert!(config.buffer_targets.is_ordered());
        assert!(config.resume_threshold < config.critical_buffer(config.buffer_targets.fast));
        assert!(config.backoff_base <= config.backoff_max);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_update_buffer_targets() {
        let mut config = BufferingConfiguration::default();
        assert!(config.update_buffer_targets(30., 15., 15.).is_ok());
        assert_eq!(config.buffer_targets.medium, 15.);
        assert_eq!(
            config.update_buffer_targets(5., 10., 2.),
            Err(ConfigurationError::UnorderedBufferTargets {
                slow: 5.,
                medium: 10.,
                fast: 2.
            })
        );
        assert!(config.update_buffer_targets(f64::INFINITY, 10., 2.).is_err());
        assert_eq!(config.buffer_targets.slow, 30.);
    }

    #[test]
    fn test_update_critical_fraction() {
        let mut config = BufferingConfiguration::default();
        assert!(config.update_critical_buffer_fraction(0.).is_err());
        assert!(config.update_critical_buffer_fraction(1.5).is_err());
        assert!(config.update_critical_buffer_fraction(f64::NAN).is_err());
        assert!(config.update_critical_buffer_fraction(0.25).is_ok());
        assert_eq!(config.critical_buffer(12.), 3.);
    }

    #[test]
    fn test_update_backoff() {
        let mut config = BufferingConfiguration::default();
        assert!(config.update_backoff_max(500.).is_err());
        assert!(config.update_backoff_base(-1.).is_err());
        assert!(config.update_backoff_base(200.).is_ok());
        assert!(config.update_backoff_max(500.).is_ok());
        assert!(config.update_backoff_base(800.).is_err());
        assert_eq!(config.backoff_base, 200.);
        assert_eq!(config.backoff_max, 500.);
    }

    #[test]
    fn test_update_presentation_guard() {
        let mut config = BufferingConfiguration::default();
        assert!(config.update_presentation_guard(Some(0.), true).is_err());
        assert_eq!(config.presentation_guard_interval, None);
        assert!(config.update_presentation_guard(Some(250.), true).is_ok());
        assert_eq!(config.presentation_guard_interval, Some(250.));
        assert!(config.block_context_menu);
    }
}
