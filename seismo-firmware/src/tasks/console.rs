//! Console task
//!
//! Reads command lines from the configuration UART and dispatches them
//! to the core command handlers. Only line reassembly and the
//! `NAME=ARG` split happen here; argument validation is the handlers'
//! job, and the full AT framing (`AT+` prefixes, quoting) belongs to
//! the hosting shell on the other end of the wire.

use core::str;

use defmt::*;
use embassy_nrf::buffered_uarte::BufferedUarte;
use embedded_io_async::{Read, Write};
use heapless::{String, Vec};
use portable_atomic::Ordering;

use seismo_core::command::{CommandError, CommandInterface, ConfigChange, StatusSnapshot};
use seismo_core::report::Reading;
use seismo_hal_nrf52::settings::SettingsPartition;

use crate::channels::{
    CycleMessage, SharedAccel, BATTERY_MV, CYCLE_CHANNEL, CYCLE_STATUS, REPORT_INTERVAL_CHANGED,
};
use crate::{MODEL, VERSION};

/// Maximum accepted command line length
const LINE_BUF_SIZE: usize = 64;

/// Response buffer size (bounded by the STATUS dump)
const RESPONSE_SIZE: usize = 256;

/// Console task - command line dispatch
#[embassy_executor::task]
pub async fn console_task(
    mut uart: BufferedUarte<'static>,
    mut iface: CommandInterface<SettingsPartition<'static>>,
    sensor: &'static SharedAccel,
) {
    info!("Console task started");

    let mut line: Vec<u8, LINE_BUF_SIZE> = Vec::new();
    let mut buf = [0u8; 32];

    loop {
        match uart.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    if byte == b'\r' || byte == b'\n' {
                        if !line.is_empty() {
                            let response = dispatch(&mut iface, sensor, &line).await;
                            let _ = uart.write_all(response.as_bytes()).await;
                            line.clear();
                        }
                    } else if line.push(byte).is_err() {
                        // Overlong line; drop it wholesale
                        warn!("Command line too long, dropped");
                        line.clear();
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Console UART read error: {:?}", e),
        }
    }
}

/// Dispatch one command line and build the response
async fn dispatch(
    iface: &mut CommandInterface<SettingsPartition<'static>>,
    sensor: &'static SharedAccel,
    line: &[u8],
) -> String<RESPONSE_SIZE> {
    let mut out: String<RESPONSE_SIZE> = String::new();

    let Ok(text) = str::from_utf8(line) else {
        return param_error();
    };
    let text = text.trim();

    // NAME=ARG; the handlers see the argument list pre-split
    let arg_storage: [&str; 1];
    let (name, args): (&str, &[&str]) = match text.split_once('=') {
        Some((name, arg)) => {
            arg_storage = [arg];
            (name, &arg_storage)
        }
        None => (text, &[]),
    };

    let result = match name {
        "SENDINT" => iface.send_interval(args, &mut out),
        "TOUT" => iface.inactivity_timeout(args, &mut out),
        "STATUS" => {
            let snapshot = snapshot(sensor).await;
            iface.status(args, &snapshot, &mut out).map(|()| None)
        }
        _ => Err(CommandError::Param),
    };

    match result {
        Ok(change) => {
            if let Some(change) = change {
                forward(change).await;
            }
            if !out.is_empty() {
                let _ = out.push_str("\r\n");
            }
            let _ = out.push_str("OK\r\n");
            out
        }
        Err(CommandError::Param) => param_error(),
        Err(CommandError::Save(e)) => {
            error!("Setting persist failed: {:?}", e);
            let mut out: String<RESPONSE_SIZE> = String::new();
            let _ = out.push_str("AT_ERROR\r\n");
            out
        }
    }
}

/// Hand a configuration change to the task that owns the timer
async fn forward(change: ConfigChange) {
    match change {
        ConfigChange::ReportInterval(interval_ms) => {
            REPORT_INTERVAL_CHANGED.signal(interval_ms);
        }
        ConfigChange::InactivityTimeout(timeout_ms) => {
            CYCLE_CHANNEL
                .send(CycleMessage::SetTimeout(timeout_ms))
                .await;
        }
    }
}

/// Collect the live values for a STATUS dump
async fn snapshot(sensor: &'static SharedAccel) -> StatusSnapshot<'static> {
    let axes = {
        let mut sensor = sensor.lock().await;
        sensor.read_axes().await.unwrap_or((0.0, 0.0, 0.0))
    };

    StatusSnapshot {
        model: MODEL,
        version: VERSION,
        reading: Reading {
            battery_mv: BATTERY_MV.load(Ordering::Relaxed),
            axes,
            status: CYCLE_STATUS.get(),
        },
    }
}

fn param_error() -> String<RESPONSE_SIZE> {
    let mut out: String<RESPONSE_SIZE> = String::new();
    let _ = out.push_str("AT_PARAM_ERROR\r\n");
    out
}
