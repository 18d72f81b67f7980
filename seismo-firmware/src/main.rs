//! Seismo - Washing Machine Cycle Monitor Firmware
//!
//! Main firmware binary for nRF52840-based LPWAN sensor nodes.
//! Watches a washing machine through a LIS3DH accelerometer and
//! reports cycle state and telemetry to a radio co-processor.
//!
//! Named after the Greek "seismos" meaning "shaking" - the machine
//! announces its own cycles by trembling.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::bind_interrupts;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::peripherals::{TWISPI0, UARTE0, UARTE1};
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, Uarte};
use embassy_sync::mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use seismo_core::command::CommandInterface;
use seismo_core::config::SettingsStore;
use seismo_drivers::lis3dh::Lis3dh;
use seismo_hal_nrf52::settings::SettingsPartition;

mod channels;
mod tasks;

use channels::SharedAccel;

/// Hardware model reported in status dumps
pub const MODEL: &str = "SEISMO-WM";

/// Firmware version reported in status dumps
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<TWISPI0>;
    UARTE0_UART0 => buffered_uarte::InterruptHandler<UARTE0>;
    UARTE1 => uarte::InterruptHandler<UARTE1>;
    SAADC => saadc::InterruptHandler;
});

// Static cells for console UART buffers (must live forever)
static CONSOLE_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CONSOLE_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// The accelerometer outlives main: the motion, report and console
// tasks all hold a reference
static SENSOR: StaticCell<SharedAccel> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Seismo firmware {} starting...", VERSION);

    // Initialize nRF52840 peripherals
    let p = embassy_nrf::init(Default::default());
    info!("Peripherals initialized");

    // Load timing configuration from the settings partition (invalid
    // records heal to defaults on first read)
    let store = SettingsStore::new(SettingsPartition::new(p.NVMC));
    let iface = CommandInterface::new(store);
    let config = iface.config();
    info!(
        "Configuration loaded: report interval {} ms, inactivity timeout {} ms",
        config.report_interval_ms, config.inactivity_timeout_ms
    );

    // Accelerometer on the I2C bus
    let twim_config = twim::Config::default();
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_13, p.P0_14, twim_config);
    let mut accel = Lis3dh::new(twim);

    // Sensor init failure is fatal for the motion subsystem: no retry,
    // the rest of the node keeps running without motion events
    let sensor_ok = match accel.init().await {
        Ok(()) => {
            info!("Accelerometer initialized");
            true
        }
        Err(e) => {
            error!("Accelerometer init failed: {:?}", e);
            false
        }
    };

    let sensor: &'static SharedAccel = SENSOR.init(Mutex::new(accel));

    // Accelerometer INT1 line (rising edge, latched by the sensor)
    let int1 = Input::new(p.P0_17, Pull::Down);

    // Battery sense divider on the SAADC
    let saadc_config = saadc::Config::default();
    let battery_channel = ChannelConfig::single_ended(p.P0_04);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [battery_channel]);

    // Console UART
    let console_config = uarte::Config::default(); // 115200 baud default
    let rx_buf = CONSOLE_RX_BUF.init([0u8; 256]);
    let tx_buf = CONSOLE_TX_BUF.init([0u8; 256]);
    let console_uart = BufferedUarte::new(
        p.UARTE0,
        p.TIMER1,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        Irqs,
        p.P0_08,
        p.P0_06,
        console_config,
        rx_buf,
        tx_buf,
    );
    info!("Console UART initialized");

    // Radio co-processor UART (TX only; the stack lives over there)
    let radio_config = uarte::Config::default();
    let radio_uart = Uarte::new(p.UARTE1, Irqs, p.P1_01, p.P1_02, radio_config);
    let (radio_tx, _radio_rx) = radio_uart.split();
    info!("Radio UART initialized");

    // Spawn tasks
    spawner.spawn(tasks::battery_task(saadc)).unwrap();
    spawner.spawn(tasks::uplink_task(radio_tx)).unwrap();
    spawner
        .spawn(tasks::cycle_task(config.inactivity_timeout_ms))
        .unwrap();
    spawner
        .spawn(tasks::report_task(sensor, config.report_interval_ms))
        .unwrap();
    spawner
        .spawn(tasks::console_task(console_uart, iface, sensor))
        .unwrap();
    if sensor_ok {
        spawner.spawn(tasks::motion_task(int1, sensor)).unwrap();
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
