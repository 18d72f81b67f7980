//! Battery sampling task
//!
//! Samples the battery sense divider periodically and publishes the
//! result for the report and console paths. The value only has to be
//! fresh on a reporting timescale, so one sample a minute is plenty.

use defmt::*;
use embassy_nrf::saadc::Saadc;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use crate::channels::BATTERY_MV;

/// Sampling period
const SAMPLE_INTERVAL: Duration = Duration::from_secs(60);

/// SAADC full scale in millivolts (gain 1/6, 0.6 V internal reference)
const ADC_FULL_SCALE_MV: u32 = 3600;

/// 12-bit conversion range
const ADC_MAX: u32 = 4096;

/// Battery sense divider ratio (1.5M / 1M): V_batt = V_pin * 5 / 2
const DIVIDER_NUM: u32 = 5;
const DIVIDER_DEN: u32 = 2;

/// Battery task - keeps BATTERY_MV current
#[embassy_executor::task]
pub async fn battery_task(mut adc: Saadc<'static, 1>) {
    info!("Battery task started");

    let mut ticker = Ticker::every(SAMPLE_INTERVAL);

    loop {
        let mut buf = [0i16; 1];
        adc.sample(&mut buf).await;

        let millivolts = raw_to_millivolts(buf[0]);
        trace!("Battery: {} mV", millivolts);
        BATTERY_MV.store(millivolts, Ordering::Relaxed);

        ticker.next().await;
    }
}

/// Convert a raw SAADC sample to battery millivolts
fn raw_to_millivolts(raw: i16) -> u16 {
    let raw = raw.max(0) as u32;
    (raw * ADC_FULL_SCALE_MV / ADC_MAX * DIVIDER_NUM / DIVIDER_DEN) as u16
}
