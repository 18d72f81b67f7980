//! Host-side tests against a register-image I2C mock

extern crate std;

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal_async::i2c::{ErrorType, I2c, Operation};
use futures::executor::block_on;

use super::registers::*;
use super::{Error, Lis3dh};

/// Register-image mock recording every write and read
struct MockI2c {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    reads: Vec<u8>,
}

impl Default for MockI2c {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            writes: Vec::new(),
            reads: Vec::new(),
        }
    }
}

impl MockI2c {
    fn with_device_id() -> Self {
        let mut mock = Self::default();
        mock.regs[WHO_AM_I as usize] = DEVICE_ID;
        mock
    }
}

impl ErrorType for MockI2c {
    type Error = Infallible;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Infallible> {
        let mut pointer: u8 = 0;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    pointer = bytes[0];
                    for (index, &value) in bytes[1..].iter().enumerate() {
                        let reg = (pointer & !AUTO_INCREMENT) + index as u8;
                        self.regs[reg as usize] = value;
                        self.writes.push((reg, value));
                    }
                }
                Operation::Read(buffer) => {
                    let base = pointer & !AUTO_INCREMENT;
                    let auto = pointer & AUTO_INCREMENT != 0;
                    for (index, slot) in buffer.iter_mut().enumerate() {
                        let reg = base + if auto { index as u8 } else { 0 };
                        self.reads.push(reg);
                        *slot = self.regs[reg as usize];
                    }
                }
            }
        }
        Ok(())
    }
}

#[test]
fn test_init_configures_interrupt_registers() {
    let mut sensor = Lis3dh::new(MockI2c::with_device_id());
    block_on(sensor.init()).unwrap();

    let regs = &sensor.i2c.regs;
    assert_eq!(regs[CTRL_REG1 as usize], ODR_10HZ | LP_EN | XYZ_EN); // 0x2F
    assert_eq!(regs[CTRL_REG2 as usize], HP_IA1);
    assert_eq!(regs[CTRL_REG3 as usize], I1_IA1 | I1_IA2); // 0x60
    assert_eq!(regs[CTRL_REG6 as usize], 0x00);
    assert_eq!(regs[INT1_CFG as usize], ZHIE | YHIE | XHIE); // 0x2A
    assert_eq!(regs[INT1_THS as usize], VIBRATION_THS); // 0x02
    assert_eq!(regs[INT1_DURATION as usize], VIBRATION_DURATION); // 0x01
    assert_eq!(regs[CTRL_REG0 as usize], SDO_PU_DISC);
}

#[test]
fn test_init_latches_int1_preserving_other_bits() {
    let mut mock = MockI2c::with_device_id();
    mock.regs[CTRL_REG5 as usize] = 0x55;

    let mut sensor = Lis3dh::new(mock);
    block_on(sensor.init()).unwrap();

    // Only the latch/4D bits change
    assert_eq!(
        sensor.i2c.regs[CTRL_REG5 as usize],
        (0x55 & CTRL5_INT1_MASK) | LIR_INT1
    );
}

#[test]
fn test_init_clears_stale_latch() {
    let mut sensor = Lis3dh::new(MockI2c::with_device_id());
    block_on(sensor.init()).unwrap();

    assert!(sensor.i2c.reads.contains(&INT1_SRC));
}

#[test]
fn test_init_rejects_wrong_device() {
    let mut sensor = Lis3dh::new(MockI2c::default());
    let result = block_on(sensor.init());

    assert_eq!(result, Err(Error::WrongDevice(0)));
    // The sensor was left untouched
    assert!(sensor.i2c.writes.is_empty());
}

#[test]
fn test_read_axes_scales_to_g() {
    let mut mock = MockI2c::with_device_id();
    // x = +16384 (1.0 g), y = -16384 (-1.0 g), z = 0
    mock.regs[OUT_X_L as usize] = 0x00;
    mock.regs[OUT_X_L as usize + 1] = 0x40;
    mock.regs[OUT_X_L as usize + 2] = 0x00;
    mock.regs[OUT_X_L as usize + 3] = 0xC0;

    let mut sensor = Lis3dh::new(mock);
    let (x, y, z) = block_on(sensor.read_axes()).unwrap();

    assert_eq!(x, 1.0);
    assert_eq!(y, -1.0);
    assert_eq!(z, 0.0);
}

#[test]
fn test_acknowledge_interrupt_reads_source() {
    let mut sensor = Lis3dh::new(MockI2c::with_device_id());
    block_on(sensor.acknowledge_interrupt()).unwrap();

    assert_eq!(sensor.i2c.reads, [INT1_SRC]);
}
