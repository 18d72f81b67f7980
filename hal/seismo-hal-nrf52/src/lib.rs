//! nRF52840-specific HAL for the washing machine monitor
//!
//! This crate provides nRF52840-specific implementations:
//! - Settings partition in internal flash (NVMC)

#![no_std]

pub mod settings;
