//! Network classification.
//!
//! Connection metadata is read once at startup and folded into an immutable
//! [`NetworkProfile`]. Controllers that care about bandwidth receive the
//! profile as a parameter; nothing reads connection state ad hoc.
//!
//! Missing metadata is normal (most desktop browsers do not expose it) and
//! classifies as a full-capability connection.

use std::fmt;

/// Connection metadata as reported by the environment.
///
/// Every field is optional because browsers expose different subsets of the
/// Network Information API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// `saveData`: the user asked for reduced data usage
    pub save_data: Option<bool>,
    /// `type`: physical connection type ("wifi", "cellular", ...)
    pub connection_type: Option<String>,
    /// `effectiveType`: effective bandwidth tier ("4g", "3g", ...)
    pub effective_type: Option<String>,
}

impl ConnectionInfo {
    /// Parsed connection type, if reported.
    #[must_use]
    pub fn connection_type(&self) -> Option<ConnectionType> {
        self.connection_type.as_deref().map(ConnectionType::parse)
    }

    /// Parsed effective bandwidth tier, if reported.
    #[must_use]
    pub fn effective_type(&self) -> Option<EffectiveType> {
        self.effective_type.as_deref().map(EffectiveType::parse)
    }
}

/// Physical connection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    /// Mobile data
    Cellular,
    /// Wireless LAN
    Wifi,
    /// Wired
    Ethernet,
    /// Bluetooth tethering
    Bluetooth,
    /// WiMAX
    Wimax,
    /// Offline
    None,
    /// Reported, but not one of the above
    Other,
    /// Browser could not determine the type
    Unknown,
}

impl ConnectionType {
    /// Parses a reported type. Never fails; unrecognized values are [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "cellular" => Self::Cellular,
            "wifi" => Self::Wifi,
            "ethernet" => Self::Ethernet,
            "bluetooth" => Self::Bluetooth,
            "wimax" => Self::Wimax,
            "none" => Self::None,
            "unknown" | "" => Self::Unknown,
            _ => Self::Other,
        }
    }
}

/// Effective bandwidth tier (`navigator.connection.effectiveType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectiveType {
    /// "slow-2g"
    Slow2g,
    /// "2g"
    Tier2g,
    /// "3g"
    Tier3g,
    /// "4g"
    Tier4g,
    /// Unrecognized tier
    Other,
}

impl EffectiveType {
    /// Parses a reported tier. Never fails; unrecognized values are [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "slow-2g" => Self::Slow2g,
            "2g" => Self::Tier2g,
            "3g" => Self::Tier3g,
            "4g" => Self::Tier4g,
            _ => Self::Other,
        }
    }

    /// Whether this tier is too slow for heavy embeds.
    #[must_use]
    pub fn is_low_bandwidth(self) -> bool {
        matches!(self, Self::Slow2g | Self::Tier2g | Self::Tier3g)
    }
}

/// Immutable network classification shared by the controllers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NetworkProfile {
    /// The user requested reduced data usage
    pub lite_mode: bool,
    /// The connection is cellular or has a low-bandwidth tier
    pub poor_network: bool,
}

impl NetworkProfile {
    /// Profile with full functionality enabled.
    pub const FULL: Self = Self {
        lite_mode: false,
        poor_network: false,
    };

    /// Classifies the reported connection.
    ///
    /// `None` means the runtime has no connection metadata at all, which
    /// classifies as [`NetworkProfile::FULL`].
    #[must_use]
    pub fn classify(connection: Option<&ConnectionInfo>) -> Self {
        let Some(info) = connection else {
            return Self::FULL;
        };

        let lite_mode = info.save_data == Some(true);
        let cellular = info.connection_type() == Some(ConnectionType::Cellular);
        let slow = info
            .effective_type()
            .is_some_and(EffectiveType::is_low_bandwidth);

        Self {
            lite_mode,
            poor_network: cellular || slow,
        }
    }

    /// Whether heavy third-party embeds should be withheld.
    #[must_use]
    pub fn should_withhold_embeds(&self) -> bool {
        self.lite_mode || self.poor_network
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lite_mode={} poor_network={}",
            self.lite_mode, self.poor_network
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(save_data: Option<bool>, ty: Option<&str>, effective: Option<&str>) -> ConnectionInfo {
        ConnectionInfo {
            save_data,
            connection_type: ty.map(String::from),
            effective_type: effective.map(String::from),
        }
    }

    #[test]
    fn test_missing_metadata_fails_open() {
        assert_eq!(NetworkProfile::classify(None), NetworkProfile::FULL);
        assert_eq!(
            NetworkProfile::classify(Some(&ConnectionInfo::default())),
            NetworkProfile::FULL
        );
    }

    #[test]
    fn test_cellular_is_poor_regardless_of_tier() {
        let profile = NetworkProfile::classify(Some(&info(None, Some("cellular"), Some("4g"))));
        assert!(profile.poor_network);
        assert!(!profile.lite_mode);
    }

    #[test]
    fn test_slow_tier_on_wifi_is_poor() {
        for tier in ["slow-2g", "2g", "3g"] {
            let profile = NetworkProfile::classify(Some(&info(None, Some("wifi"), Some(tier))));
            assert!(profile.poor_network, "tier {tier} should be poor");
        }

        let profile = NetworkProfile::classify(Some(&info(None, Some("wifi"), Some("4g"))));
        assert!(!profile.poor_network);
    }

    #[test]
    fn test_save_data_enables_lite_mode() {
        let profile = NetworkProfile::classify(Some(&info(Some(true), None, None)));
        assert!(profile.lite_mode);
        assert!(!profile.poor_network);
        assert!(profile.should_withhold_embeds());

        let profile = NetworkProfile::classify(Some(&info(Some(false), None, Some("4g"))));
        assert!(!profile.lite_mode);
        assert!(!profile.should_withhold_embeds());
    }

    #[test]
    fn test_unrecognized_values() {
        assert_eq!(ConnectionType::parse("mixed"), ConnectionType::Other);
        assert_eq!(ConnectionType::parse(""), ConnectionType::Unknown);
        assert_eq!(EffectiveType::parse("5g"), EffectiveType::Other);
        assert!(!EffectiveType::Other.is_low_bandwidth());
    }
}
