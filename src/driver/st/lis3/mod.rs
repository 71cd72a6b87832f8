//! Driver for the ST LIS3 accelerometer family, covering the 12-bit
//! LIS3LV02D and 8-bit LIS302D variants.

use std::fmt::Debug;

use embedded_hal::blocking::i2c::{Write, WriteRead};
use num_traits::FromPrimitive;
use thiserror::Error;
use tracing::debug;

pub mod registers;

pub use registers::{DeviceId, DEFAULT_ADDRESS};
use registers::{reg, CTRL_REG1_INIT, CTRL_REG2_INIT};

/// Which register layout the detected chip reports samples in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AxisFormat {
    /// One byte per axis.
    Bits8,

    /// Two bytes per axis, assembled high-then-low.
    Bits12,
}

/// What to do when a register transaction fails. `Permissive` (the default)
/// treats every transaction as if it succeeded, substituting an all-ones
/// byte for failed reads; `Strict` surfaces the first failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strictness {
    Permissive,
    Strict,
}

#[derive(Debug, Error)]
pub enum Error<E: Debug> {
    #[error("i2c transaction failed: {0:?}")]
    Bus(E),

    #[error("unrecognized device id {0:#04x}")]
    UnknownDevice(u8),
}

/// One raw reading per axis. 8-bit chips report 0..=255 here; 12-bit chips
/// report a full 16-bit two's-complement value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AxisSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

// A failed transfer reads back as all ones, like a floating bus.
const BUS_FAULT_BYTE: u8 = 0xFF;

pub struct Lis3<I2C> {
    i2c: I2C,
    address: u8,
    strictness: Strictness,
    format: AxisFormat,
}

impl<I2C, E> Lis3<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    /// Powers the chip on and identifies it. Only the 12-bit and 8-bit
    /// variants are accepted; the axis format is fixed here and never
    /// changes for the lifetime of the driver.
    pub fn new(i2c: I2C, address: u8, strictness: Strictness) -> Result<Self, Error<E>> {
        let mut dev = Lis3 {
            i2c,
            address,
            strictness,
            format: AxisFormat::Bits8,
        };

        dev.write_register(reg::CTRL_REG1, CTRL_REG1_INIT)?;
        dev.write_register(reg::CTRL_REG2, CTRL_REG2_INIT)?;

        let id = dev.read_register(reg::WHO_AM_I)?;
        dev.format = match DeviceId::from_u8(id) {
            Some(DeviceId::Lis3lv02d) => AxisFormat::Bits12,
            Some(DeviceId::Lis302dl) => AxisFormat::Bits8,
            _ => return Err(Error::UnknownDevice(id)),
        };
        debug!("identified accelerometer, id = {id:#04x}, format = {:?}", dev.format);

        Ok(dev)
    }

    pub fn axis_format(&self) -> AxisFormat {
        self.format
    }

    /// Reads the current sample triple.
    pub fn read_axes(&mut self) -> Result<AxisSample, Error<E>> {
        match self.format {
            AxisFormat::Bits12 => Ok(AxisSample {
                x: self.read_wide(reg::OUT_X_H, reg::OUT_X_L)?,
                y: self.read_wide(reg::OUT_Y_H, reg::OUT_Y_L)?,
                z: self.read_wide(reg::OUT_Z_H, reg::OUT_Z_L)?,
            }),
            AxisFormat::Bits8 => Ok(AxisSample {
                x: self.read_register(reg::OUT_X)? as i16,
                y: self.read_register(reg::OUT_Y)? as i16,
                z: self.read_register(reg::OUT_Z)? as i16,
            }),
        }
    }

    // The chip requires the high byte to be read before the low byte.
    fn read_wide(&mut self, high: u8, low: u8) -> Result<i16, Error<E>> {
        let h = self.read_register(high)?;
        let l = self.read_register(low)?;
        Ok((u16::from(h) << 8 | u16::from(l)) as i16)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        match self.i2c.write(self.address, &[register, value]) {
            Ok(()) => Ok(()),
            Err(err) if self.strictness == Strictness::Permissive => {
                debug!("ignoring failed write to register {register:#04x}: {err:?}");
                Ok(())
            }
            Err(err) => Err(Error::Bus(err)),
        }
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        match self.i2c.write_read(self.address, &[register], &mut buf) {
            Ok(()) => Ok(buf[0]),
            Err(err) if self.strictness == Strictness::Permissive => {
                debug!("substituting for failed read of register {register:#04x}: {err:?}");
                Ok(BUS_FAULT_BYTE)
            }
            Err(err) => Err(Error::Bus(err)),
        }
    }
}
