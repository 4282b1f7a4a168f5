use std::fmt;

use crate::wasm_bindgen;

/// Downlink under which the network is considered slow, in Mbps.
const SLOW_DOWNLINK_MBPS: f64 = 1.;

/// Downlink under which the network is considered of medium speed, in Mbps.
const MEDIUM_DOWNLINK_MBPS: f64 = 5.;

/// Value of the `effectiveType` property of the Network Information API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EffectiveType {
    Slow2g,
    TwoG,
    ThreeG,
    FourG,
}

impl EffectiveType {
    /// Parse an `effectiveType` string. Unknown values are ignored (`None`).
    pub(crate) fn parse(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => Some(EffectiveType::Slow2g),
            "2g" => Some(EffectiveType::TwoG),
            "3g" => Some(EffectiveType::ThreeG),
            "4g" => Some(EffectiveType::FourG),
            _ => None,
        }
    }
}

/// What the platform told us about the current connection. Both fields are optional as
/// support varies a lot between platforms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ConnectionInfo {
    pub(crate) effective_type: Option<EffectiveType>,
    /// Estimated downlink, in megabits per second.
    pub(crate) downlink_mbps: Option<f64>,
}

impl ConnectionInfo {
    pub(crate) fn new(effective_type: Option<&str>, downlink_mbps: Option<f64>) -> Self {
        Self {
            effective_type: effective_type.and_then(EffectiveType::parse),
            downlink_mbps: downlink_mbps.filter(|d| d.is_finite() && *d >= 0.),
        }
    }

    fn has_signal(&self) -> bool {
        self.effective_type.is_some() || self.downlink_mbps.is_some()
    }
}

/// Rough classification of the network speed.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkClass {
    Slow = 0,
    Medium = 1,
    Fast = 2,
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NetworkClass::Slow => "slow",
                NetworkClass::Medium => "medium",
                NetworkClass::Fast => "fast",
            }
        )
    }
}

impl NetworkClass {
    /// Classify the given connection information.
    ///
    /// Defaults to `Medium` when the platform gives no signal at all.
    pub(crate) fn classify(info: &ConnectionInfo) -> Self {
        if !info.has_signal() {
            return NetworkClass::Medium;
        }
        let downlink = info.downlink_mbps;
        let eff = info.effective_type;
        if downlink.map(|d| d < SLOW_DOWNLINK_MBPS).unwrap_or(false)
            || matches!(eff, Some(EffectiveType::Slow2g | EffectiveType::TwoG))
        {
            NetworkClass::Slow
        } else if downlink.map(|d| d < MEDIUM_DOWNLINK_MBPS).unwrap_or(false)
            || eff == Some(EffectiveType::ThreeG)
        {
            NetworkClass::Medium
        } else {
            NetworkClass::Fast
        }
    }
}

/// Buffer target, in seconds, wanted for each `NetworkClass`.
///
/// Slower networks get a deeper cushion as each fetch takes longer to complete.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BufferTargets {
    pub(crate) slow: f64,
    pub(crate) medium: f64,
    pub(crate) fast: f64,
}

impl Default for BufferTargets {
    fn default() -> Self {
        Self {
            slow: 20.,
            medium: 12.,
            fast: 8.,
        }
    }
}

impl BufferTargets {
    pub(crate) fn for_class(&self, class: NetworkClass) -> f64 {
        match class {
            NetworkClass::Slow => self.slow,
            NetworkClass::Medium => self.medium,
            NetworkClass::Fast => self.fast,
        }
    }

    /// Returns `true` if targets are positive and ordered: slow > medium >= fast.
    pub(crate) fn is_ordered(&self) -> bool {
        self.fast > 0. && self.slow > self.medium && self.medium >= self.fast
    }
}

/// Current network estimate and the buffer target deduced from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NetworkEstimate {
    class: NetworkClass,
    buffer_target: f64,
}

impl NetworkEstimate {
    pub(crate) fn new(class: NetworkClass, targets: &BufferTargets) -> Self {
        Self {
            class,
            buffer_target: targets.for_class(class),
        }
    }

    pub(crate) fn from_connection(info: &ConnectionInfo, targets: &BufferTargets) -> Self {
        Self::new(NetworkClass::classify(info), targets)
    }

    pub(crate) fn class(&self) -> NetworkClass {
        self.class
    }

    /// Seconds of data wanted ahead of the current position.
    pub(crate) fn buffer_target(&self) -> f64 {
        self.buffer_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, NetworkClass::Medium)]
    #[case(Some("slow-2g"), None, NetworkClass::Slow)]
    #[case(Some("2g"), None, NetworkClass::Slow)]
    #[case(Some("3g"), None, NetworkClass::Medium)]
    #[case(Some("4g"), None, NetworkClass::Fast)]
    #[case(None, Some(0.4), NetworkClass::Slow)]
    #[case(None, Some(2.5), NetworkClass::Medium)]
    #[case(None, Some(5.), NetworkClass::Fast)]
    #[case(Some("4g"), Some(0.8), NetworkClass::Slow)]
    #[case(Some("4g"), Some(3.), NetworkClass::Medium)]
    #[case(Some("2g"), Some(50.), NetworkClass::Slow)]
    #[case(Some("5g"), None, NetworkClass::Medium)]
    #[case(Some("wifi"), Some(12.), NetworkClass::Fast)]
    #[case(None, Some(f64::NAN), NetworkClass::Medium)]
    fn test_classify(
        #[case] effective_type: Option<&str>,
        #[case] downlink: Option<f64>,
        #[case] expected: NetworkClass,
    ) {
        let info = ConnectionInfo::new(effective_type, downlink);
        assert_eq!(NetworkClass::classify(&info), expected);
    }

    #[test]
    fn test_default_targets_ordering() {
        let targets = BufferTargets::default();
        let slow = NetworkEstimate::new(NetworkClass::Slow, &targets).buffer_target();
        let medium = NetworkEstimate::new(NetworkClass::Medium, &targets).buffer_target();
        let fast = NetworkEstimate::new(NetworkClass::Fast, &targets).buffer_target();
        assert!(slow > medium);
        assert!(medium >= fast);
        assert!(targets.is_ordered());
    }

    #[test]
    fn test_unordered_targets() {
        let targets = BufferTargets {
            slow: 8.,
            medium: 12.,
            fast: 20.,
        };
        assert!(!targets.is_ordered());
        let targets = BufferTargets {
            slow: 10.,
            medium: 0.,
            fast: 0.,
        };
        assert!(!targets.is_ordered());
    }
}
