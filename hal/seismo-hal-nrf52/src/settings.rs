//! Settings partition driver
//!
//! Keeps the persisted timing records in the last page of internal
//! flash, addressed by the fixed offsets in
//! [`seismo_core::config::SettingKey`]. The mapping from record offset
//! to physical address must stay stable across firmware versions; the
//! records written here outlive any single build.
//!
//! NVMC can only erase whole pages, so a record write is a
//! read-modify-erase-write of the single settings page. Records at
//! other offsets come back bit-identical from the page image.

use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::peripherals::NVMC;
use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};

use seismo_core::traits::{SettingsFlash, StorageError};

/// Internal flash size of the nRF52840
pub const FLASH_SIZE: usize = 1024 * 1024;

/// NVMC erase page size
pub const PAGE_SIZE: usize = 4096;

/// Settings partition: the last internal-flash page
pub const SETTINGS_PARTITION_START: u32 = (FLASH_SIZE - PAGE_SIZE) as u32;

/// Fixed-offset record storage in internal flash
pub struct SettingsPartition<'d> {
    nvmc: Nvmc<'d>,
    /// RAM image of the settings page for read-modify-write
    page: [u8; PAGE_SIZE],
}

impl<'d> SettingsPartition<'d> {
    /// Create the partition driver over the NVMC peripheral
    pub fn new(nvmc: impl embassy_nrf::Peripheral<P = NVMC> + 'd) -> Self {
        Self {
            nvmc: Nvmc::new(nvmc),
            page: [0xFF; PAGE_SIZE],
        }
    }
}

impl SettingsFlash for SettingsPartition<'_> {
    fn read_record(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), StorageError> {
        if offset as usize + buffer.len() > PAGE_SIZE {
            return Err(StorageError::Read);
        }
        self.nvmc
            .read(SETTINGS_PARTITION_START + offset, buffer)
            .map_err(|_| StorageError::Read)
    }

    fn write_record(&mut self, offset: u32, data: &[u8]) -> Result<(), StorageError> {
        let start = offset as usize;
        if start + data.len() > PAGE_SIZE {
            return Err(StorageError::Write);
        }

        self.nvmc
            .read(SETTINGS_PARTITION_START, &mut self.page)
            .map_err(|_| StorageError::Write)?;
        self.page[start..start + data.len()].copy_from_slice(data);

        self.nvmc
            .erase(
                SETTINGS_PARTITION_START,
                SETTINGS_PARTITION_START + PAGE_SIZE as u32,
            )
            .map_err(|_| StorageError::Write)?;
        self.nvmc
            .write(SETTINGS_PARTITION_START, &self.page)
            .map_err(|_| StorageError::Write)
    }
}
