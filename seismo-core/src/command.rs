//! Command handlers for the serial configuration interface
//!
//! Three commands, each with a read (`?`) and, where applicable, a
//! write form taking a decimal number of seconds:
//!
//! - `SENDINT` - telemetry report interval (0 disables reporting)
//! - `TOUT` - inactivity timeout (0 disables auto-finish)
//! - `STATUS` - read-only device status dump
//!
//! The hosting shell owns line framing and tokenization; handlers
//! receive the already-split argument list and write their response
//! through `core::fmt::Write`. Values are exchanged in seconds on the
//! wire and kept in milliseconds internally.

use core::fmt::Write;

use crate::config::{SettingKey, SettingsError, SettingsStore, TimingConfig};
use crate::report::Reading;
use crate::traits::SettingsFlash;

/// Errors reported back to the command caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Invalid argument or wrong argument count; nothing was changed
    Param,
    /// The new value could not be persisted; nothing was changed
    Save(SettingsError),
}

/// A configuration value that changed through a write command
///
/// Returned to the embedding firmware so it can re-arm the affected
/// timer; handlers themselves never touch the cycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigChange {
    /// New report interval in milliseconds (0 = disable reporting)
    ReportInterval(u32),
    /// New inactivity timeout in milliseconds (0 = no auto-finish)
    InactivityTimeout(u32),
}

/// Live device values for the `STATUS` dump
#[derive(Debug, Clone, Copy)]
pub struct StatusSnapshot<'a> {
    /// Hardware model identifier
    pub model: &'a str,
    /// Firmware version string
    pub version: &'a str,
    /// Current sensor/battery/status values
    pub reading: Reading,
}

/// Command interface over the settings store
///
/// Owns the authoritative in-RAM copy of the timing configuration,
/// loaded once at construction. Writes persist first and mutate the
/// RAM copy only on success.
pub struct CommandInterface<F> {
    store: SettingsStore<F>,
    config: TimingConfig,
}

impl<F: SettingsFlash> CommandInterface<F> {
    /// Create the interface, loading (and if needed healing) both
    /// persisted parameters
    pub fn new(mut store: SettingsStore<F>) -> Self {
        let config = store.load_config();
        Self { store, config }
    }

    /// Current timing configuration
    pub fn config(&self) -> TimingConfig {
        self.config
    }

    /// `SENDINT` - get/set the telemetry report interval
    pub fn send_interval<W: Write>(
        &mut self,
        args: &[&str],
        out: &mut W,
    ) -> Result<Option<ConfigChange>, CommandError> {
        match args {
            ["?"] => {
                let _ = write!(out, "SENDINT={}", self.config.report_interval_ms / 1000);
                Ok(None)
            }
            [arg] => {
                let interval_ms = parse_seconds(arg)?;
                self.store
                    .save(SettingKey::ReportInterval, interval_ms)
                    .map_err(CommandError::Save)?;
                self.config.report_interval_ms = interval_ms;
                Ok(Some(ConfigChange::ReportInterval(interval_ms)))
            }
            _ => Err(CommandError::Param),
        }
    }

    /// `TOUT` - get/set the inactivity timeout
    pub fn inactivity_timeout<W: Write>(
        &mut self,
        args: &[&str],
        out: &mut W,
    ) -> Result<Option<ConfigChange>, CommandError> {
        match args {
            ["?"] => {
                let _ = write!(out, "TOUT={}", self.config.inactivity_timeout_ms / 1000);
                Ok(None)
            }
            [arg] => {
                let timeout_ms = parse_seconds(arg)?;
                self.store
                    .save(SettingKey::InactivityTimeout, timeout_ms)
                    .map_err(CommandError::Save)?;
                self.config.inactivity_timeout_ms = timeout_ms;
                Ok(Some(ConfigChange::InactivityTimeout(timeout_ms)))
            }
            _ => Err(CommandError::Param),
        }
    }

    /// `STATUS` - read-only device status dump
    pub fn status<W: Write>(
        &self,
        args: &[&str],
        snapshot: &StatusSnapshot<'_>,
        out: &mut W,
    ) -> Result<(), CommandError> {
        match args {
            ["?"] => {
                let (x, y, z) = snapshot.reading.axes;
                let _ = writeln!(out, "Device Status:");
                let _ = writeln!(out, "{}", snapshot.model);
                let _ = writeln!(out, "{}", snapshot.version);
                let _ = writeln!(out, "Interval: {} s", self.config.report_interval_ms / 1000);
                let _ = writeln!(
                    out,
                    "Timeout: {} s",
                    self.config.inactivity_timeout_ms / 1000
                );
                let _ = writeln!(out, "Cycle: {}", snapshot.reading.status.label());
                let _ = writeln!(out, "Acc: {} {} {} g", x, y, z);
                let _ = writeln!(out, "Batt: {} mV", snapshot.reading.battery_mv);
                Ok(())
            }
            _ => Err(CommandError::Param),
        }
    }
}

/// Parse a write argument: decimal seconds, digits only
fn parse_seconds(arg: &str) -> Result<u32, CommandError> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::Param);
    }
    let seconds: u32 = arg.parse().map_err(|_| CommandError::Param)?;
    Ok(seconds.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::state::CycleState;
    use crate::traits::StorageError;
    use heapless::String;

    /// Settings region image; the failure counter lives outside so a
    /// test can inject faults after the interface is built
    struct MockFlash<'a> {
        region: &'a mut [u8; 32],
        fail_writes: &'a Cell<u32>,
    }

    impl SettingsFlash for MockFlash<'_> {
        fn read_record(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), StorageError> {
            let start = offset as usize;
            buffer.copy_from_slice(&self.region[start..start + buffer.len()]);
            Ok(())
        }

        fn write_record(&mut self, offset: u32, data: &[u8]) -> Result<(), StorageError> {
            let remaining = self.fail_writes.get();
            if remaining > 0 {
                self.fail_writes.set(remaining - 1);
                return Err(StorageError::Write);
            }
            let start = offset as usize;
            self.region[start..start + data.len()].copy_from_slice(data);
            Ok(())
        }
    }

    fn interface<'a>(
        region: &'a mut [u8; 32],
        fail_writes: &'a Cell<u32>,
    ) -> CommandInterface<MockFlash<'a>> {
        CommandInterface::new(SettingsStore::new(MockFlash {
            region,
            fail_writes,
        }))
    }

    fn snapshot() -> StatusSnapshot<'static> {
        StatusSnapshot {
            model: "SEISMO-WM",
            version: "0.1.0",
            reading: Reading {
                battery_mv: 4100,
                axes: (0.0, 0.0, 1.0),
                status: CycleState::Running,
            },
        }
    }

    #[test]
    fn test_write_then_read_interval() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let mut iface = interface(&mut region, &fail);
        let mut out: String<64> = String::new();

        let change = iface.send_interval(&["60"], &mut out).unwrap();
        assert_eq!(change, Some(ConfigChange::ReportInterval(60_000)));
        assert_eq!(iface.config().report_interval_ms, 60_000);

        iface.send_interval(&["?"], &mut out).unwrap();
        assert_eq!(out.as_str(), "SENDINT=60");
    }

    #[test]
    fn test_write_persists() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        {
            let mut iface = interface(&mut region, &fail);
            let mut out: String<64> = String::new();
            iface.inactivity_timeout(&["300"], &mut out).unwrap();
        }

        // A fresh interface over the same flash sees the new value
        let iface = interface(&mut region, &fail);
        assert_eq!(iface.config().inactivity_timeout_ms, 300_000);
    }

    #[test]
    fn test_non_digit_argument_rejected() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let mut iface = interface(&mut region, &fail);
        let mut out: String<64> = String::new();

        let before = iface.config();
        assert_eq!(
            iface.send_interval(&["12x"], &mut out),
            Err(CommandError::Param)
        );
        assert_eq!(iface.config(), before);

        // Stored configuration is untouched too
        iface.send_interval(&["?"], &mut out).unwrap();
        assert_eq!(out.as_str(), "SENDINT=0");
    }

    #[test]
    fn test_wrong_argument_count_rejected() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let mut iface = interface(&mut region, &fail);
        let mut out: String<64> = String::new();

        assert_eq!(iface.send_interval(&[], &mut out), Err(CommandError::Param));
        assert_eq!(
            iface.inactivity_timeout(&["5", "6"], &mut out),
            Err(CommandError::Param)
        );
    }

    #[test]
    fn test_zero_disables_reporting() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let mut iface = interface(&mut region, &fail);
        let mut out: String<64> = String::new();

        // Enable, then disable
        iface.send_interval(&["60"], &mut out).unwrap();
        let change = iface.send_interval(&["0"], &mut out).unwrap();
        assert_eq!(change, Some(ConfigChange::ReportInterval(0)));
        assert_eq!(iface.config().report_interval_ms, 0);
    }

    #[test]
    fn test_save_failure_propagates_and_preserves_config() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let mut iface = interface(&mut region, &fail);
        let mut out: String<64> = String::new();

        fail.set(2); // first try + retry
        let before = iface.config();
        assert!(matches!(
            iface.send_interval(&["60"], &mut out),
            Err(CommandError::Save(SettingsError::WriteFailed(_)))
        ));
        assert_eq!(iface.config(), before);
    }

    #[test]
    fn test_status_dump() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let iface = interface(&mut region, &fail);
        let mut out: String<256> = String::new();

        iface.status(&["?"], &snapshot(), &mut out).unwrap();
        assert!(out.contains("SEISMO-WM"));
        assert!(out.contains("Cycle: running"));
        assert!(out.contains("Batt: 4100 mV"));
    }

    #[test]
    fn test_status_rejects_write_form() {
        let mut region = [0xFF; 32];
        let fail = Cell::new(0);
        let iface = interface(&mut region, &fail);
        let mut out: String<256> = String::new();
        assert_eq!(
            iface.status(&["1"], &snapshot(), &mut out),
            Err(CommandError::Param)
        );
    }
}
