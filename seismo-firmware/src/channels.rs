//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Everything that crosses a task boundary goes through here;
//! the motion interrupt in particular is turned into a channel message
//! instead of mutating shared state from its own context.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU16;

use embassy_nrf::twim::Twim;

use seismo_core::cycle::Notification;
use seismo_core::state::{CycleEvent, CycleState, StatusCell};
use seismo_drivers::lis3dh::Lis3dh;
use seismo_protocol::Frame;

/// Channel capacity for cycle messages
const CYCLE_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound frames
const UPLINK_CHANNEL_SIZE: usize = 4;

/// Channel capacity for status-change notifications
const NOTIFY_CHANNEL_SIZE: usize = 4;

/// The accelerometer, shared between the motion and reporting paths
pub type SharedAccel = Mutex<CriticalSectionRawMutex, Lis3dh<Twim<'static>>>;

/// Messages consumed by the cycle task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleMessage {
    /// A state machine event from the sensor or timer path
    Event(CycleEvent),
    /// New inactivity timeout from the console (milliseconds)
    SetTimeout(u32),
}

/// Cycle events and timeout updates, consumed by the cycle task
pub static CYCLE_CHANNEL: Channel<CriticalSectionRawMutex, CycleMessage, CYCLE_CHANNEL_SIZE> =
    Channel::new();

/// Status-change notifications for the report task
pub static STATUS_NOTIFY: Channel<CriticalSectionRawMutex, Notification, NOTIFY_CHANNEL_SIZE> =
    Channel::new();

/// Encoded frames on their way to the radio co-processor
pub static UPLINK_CHANNEL: Channel<CriticalSectionRawMutex, Frame, UPLINK_CHANNEL_SIZE> =
    Channel::new();

/// Report interval changes from the console (milliseconds, 0 = disabled)
pub static REPORT_INTERVAL_CHANGED: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Cycle status, written by the cycle task, read everywhere
pub static CYCLE_STATUS: StatusCell = StatusCell::new(CycleState::Idle);

/// Latest battery measurement in millivolts (updated by battery task)
pub static BATTERY_MV: AtomicU16 = AtomicU16::new(0);
