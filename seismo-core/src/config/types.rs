//! Configuration type definitions

/// Default report interval: periodic reporting disabled until configured
pub const DEFAULT_REPORT_INTERVAL_MS: u32 = 0;

/// Default inactivity timeout
pub const DEFAULT_INACTIVITY_TIMEOUT_MS: u32 = 30_000;

/// Keys identifying the persisted settings records
///
/// Each key maps to a fixed, non-overlapping offset in the settings
/// region. The offsets are part of the storage layout contract and must
/// never change between firmware versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    /// Period of the telemetry report timer (milliseconds)
    ReportInterval,
    /// Inactivity timeout ending a running cycle (milliseconds)
    InactivityTimeout,
}

impl SettingKey {
    /// Fixed record offset in the settings region
    pub const fn offset(self) -> u32 {
        match self {
            SettingKey::ReportInterval => 0x02,
            SettingKey::InactivityTimeout => 0x08,
        }
    }

    /// Default value substituted when the stored record is invalid
    pub const fn default_ms(self) -> u32 {
        match self {
            SettingKey::ReportInterval => DEFAULT_REPORT_INTERVAL_MS,
            SettingKey::InactivityTimeout => DEFAULT_INACTIVITY_TIMEOUT_MS,
        }
    }
}

/// Timing configuration, loaded once at boot
///
/// Mutated only by explicit save operations from the command interface.
/// A value of 0 disables the respective timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Period of the telemetry report timer (0 = disabled)
    pub report_interval_ms: u32,
    /// Inactivity timeout ending a running cycle (0 = no auto-finish)
    pub inactivity_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            inactivity_timeout_ms: DEFAULT_INACTIVITY_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_do_not_overlap() {
        // 5-byte records: [0x02, 0x07) and [0x08, 0x0D)
        let a = SettingKey::ReportInterval.offset();
        let b = SettingKey::InactivityTimeout.offset();
        assert!(a + super::super::store::RECORD_LEN as u32 <= b);
    }

    #[test]
    fn test_defaults_match_original_layout() {
        assert_eq!(SettingKey::ReportInterval.offset(), 0x02);
        assert_eq!(SettingKey::InactivityTimeout.offset(), 0x08);
        assert_eq!(SettingKey::ReportInterval.default_ms(), 0);
        assert_eq!(SettingKey::InactivityTimeout.default_ms(), 30_000);
    }
}
