//! Persisted settings store
//!
//! Each parameter lives in a 5-byte record at its key's fixed offset:
//! 4 value bytes little-endian followed by the marker byte 0xAA. The
//! marker distinguishes an initialized record from erased flash.
//!
//! `load` is self-healing: an unreadable or unmarked record is replaced
//! by the key's default, which is persisted on the spot so the next
//! load takes the valid path. `save` retries a failed write once and
//! then reports the failure to the caller.

use crate::traits::{SettingsFlash, StorageError};

use super::types::{SettingKey, TimingConfig};

/// Record length: 4 value bytes + marker
pub const RECORD_LEN: usize = 5;

/// Marker byte written after the value bytes of a valid record
pub const RECORD_MARKER: u8 = 0xAA;

/// Errors surfaced by the settings store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Write failed and the retry failed too
    WriteFailed(StorageError),
}

/// Settings store over a raw flash backend
pub struct SettingsStore<F> {
    flash: F,
}

impl<F: SettingsFlash> SettingsStore<F> {
    /// Create a store over the given backend
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Load one parameter
    ///
    /// Never fails: an invalid record yields the key's default, and the
    /// default is written back immediately. A failure of that healing
    /// write is not surfaced either; the next load will retry it.
    pub fn load(&mut self, key: SettingKey) -> u32 {
        let mut record = [0u8; RECORD_LEN];

        let valid = self
            .flash
            .read_record(key.offset(), &mut record)
            .is_ok()
            && record[4] == RECORD_MARKER;

        if !valid {
            let value = key.default_ms();
            let _ = self.save(key, value);
            return value;
        }

        u32::from_le_bytes([record[0], record[1], record[2], record[3]])
    }

    /// Load both parameters into a [`TimingConfig`]
    pub fn load_config(&mut self) -> TimingConfig {
        TimingConfig {
            report_interval_ms: self.load(SettingKey::ReportInterval),
            inactivity_timeout_ms: self.load(SettingKey::InactivityTimeout),
        }
    }

    /// Save one parameter
    ///
    /// Retries a failed write once. A second failure is propagated;
    /// records at other offsets are untouched either way.
    pub fn save(&mut self, key: SettingKey, value: u32) -> Result<(), SettingsError> {
        let record = encode_record(value);

        match self.flash.write_record(key.offset(), &record) {
            Ok(()) => Ok(()),
            Err(_) => self
                .flash
                .write_record(key.offset(), &record)
                .map_err(SettingsError::WriteFailed),
        }
    }
}

/// Encode a value into its on-flash record
fn encode_record(value: u32) -> [u8; RECORD_LEN] {
    let bytes = value.to_le_bytes();
    [bytes[0], bytes[1], bytes[2], bytes[3], RECORD_MARKER]
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use proptest::prelude::*;

    /// Settings region image with injectable write failures
    struct MockFlash {
        region: [u8; 32],
        fail_writes: u32,
        write_count: u32,
    }

    impl MockFlash {
        fn erased() -> Self {
            Self {
                region: [0xFF; 32],
                fail_writes: 0,
                write_count: 0,
            }
        }

        fn failing_next(mut self, count: u32) -> Self {
            self.fail_writes = count;
            self
        }
    }

    impl SettingsFlash for MockFlash {
        fn read_record(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), StorageError> {
            let start = offset as usize;
            buffer.copy_from_slice(&self.region[start..start + buffer.len()]);
            Ok(())
        }

        fn write_record(&mut self, offset: u32, data: &[u8]) -> Result<(), StorageError> {
            self.write_count += 1;
            if self.fail_writes > 0 {
                self.fail_writes -= 1;
                return Err(StorageError::Write);
            }
            let start = offset as usize;
            self.region[start..start + data.len()].copy_from_slice(data);
            Ok(())
        }
    }

    #[test]
    fn test_load_uninitialized_returns_default() {
        let mut store = SettingsStore::new(MockFlash::erased());
        assert_eq!(store.load(SettingKey::InactivityTimeout), 30_000);
        assert_eq!(store.load(SettingKey::ReportInterval), 0);
    }

    #[test]
    fn test_load_heals_storage() {
        let mut store = SettingsStore::new(MockFlash::erased());

        // First load takes the invalid path and persists the default
        assert_eq!(store.load(SettingKey::InactivityTimeout), 30_000);
        let writes_after_heal = store.flash.write_count;
        assert_eq!(writes_after_heal, 1);

        // Second load takes the valid path: same value, no new write
        assert_eq!(store.load(SettingKey::InactivityTimeout), 30_000);
        assert_eq!(store.flash.write_count, writes_after_heal);
    }

    #[test]
    fn test_records_persist_independently() {
        let mut store = SettingsStore::new(MockFlash::erased());
        store.save(SettingKey::ReportInterval, 60_000).unwrap();
        store.save(SettingKey::InactivityTimeout, 300_000).unwrap();

        // Rewriting one record leaves the other's bytes untouched
        let before: [u8; RECORD_LEN] = store.flash.region[0x08..0x0D].try_into().unwrap();
        store.save(SettingKey::ReportInterval, 120_000).unwrap();
        let after: [u8; RECORD_LEN] = store.flash.region[0x08..0x0D].try_into().unwrap();
        assert_eq!(before, after);

        assert_eq!(store.load(SettingKey::ReportInterval), 120_000);
        assert_eq!(store.load(SettingKey::InactivityTimeout), 300_000);
    }

    #[test]
    fn test_record_layout() {
        let mut store = SettingsStore::new(MockFlash::erased());
        store.save(SettingKey::ReportInterval, 60_000).unwrap();

        // 60000 = 0x0000EA60 little-endian, marker last
        assert_eq!(
            &store.flash.region[0x02..0x07],
            &[0x60, 0xEA, 0x00, 0x00, RECORD_MARKER]
        );
    }

    #[test]
    fn test_save_retries_once_then_succeeds() {
        let mut store = SettingsStore::new(MockFlash::erased().failing_next(1));
        assert_eq!(store.save(SettingKey::ReportInterval, 5000), Ok(()));
        assert_eq!(store.load(SettingKey::ReportInterval), 5000);
    }

    #[test]
    fn test_save_propagates_persistent_failure() {
        let mut store = SettingsStore::new(MockFlash::erased().failing_next(2));
        assert_eq!(
            store.save(SettingKey::ReportInterval, 5000),
            Err(SettingsError::WriteFailed(StorageError::Write))
        );
    }

    #[test]
    fn test_load_config() {
        let mut store = SettingsStore::new(MockFlash::erased());
        store.save(SettingKey::ReportInterval, 60_000).unwrap();

        let config = store.load_config();
        assert_eq!(config.report_interval_ms, 60_000);
        assert_eq!(config.inactivity_timeout_ms, 30_000);
    }

    proptest! {
        #[test]
        fn prop_save_load_roundtrip(value: u32) {
            let mut store = SettingsStore::new(MockFlash::erased());
            store.save(SettingKey::InactivityTimeout, value).unwrap();
            prop_assert_eq!(store.load(SettingKey::InactivityTimeout), value);
        }
    }
}
