//! Timing configuration
//!
//! The two user-configurable timing parameters and their persisted
//! representation.

pub mod store;
pub mod types;

pub use store::{SettingsError, SettingsStore, RECORD_LEN, RECORD_MARKER};
pub use types::{SettingKey, TimingConfig};
