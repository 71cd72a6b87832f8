use num_derive::{FromPrimitive, ToPrimitive};

/// Peripheral address the LIS3 family answers on.
pub const DEFAULT_ADDRESS: u8 = 0x1D;

pub mod reg {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const OFFSET_X: u8 = 0x16;
    pub const OFFSET_Y: u8 = 0x17;
    pub const OFFSET_Z: u8 = 0x18;
    pub const GAIN_X: u8 = 0x19;
    pub const GAIN_Y: u8 = 0x1A;
    pub const GAIN_Z: u8 = 0x1B;
    pub const CTRL_REG1: u8 = 0x20;
    pub const CTRL_REG2: u8 = 0x21;
    pub const CTRL_REG3: u8 = 0x22;
    pub const FILTER_RST: u8 = 0x23;
    pub const STATUS: u8 = 0x27;
    pub const OUT_X_L: u8 = 0x28;
    pub const OUT_X_H: u8 = 0x29;
    pub const OUT_X: u8 = 0x29;
    pub const OUT_Y_L: u8 = 0x2A;
    pub const OUT_Y_H: u8 = 0x2B;
    pub const OUT_Y: u8 = 0x2B;
    pub const OUT_Z_L: u8 = 0x2C;
    pub const OUT_Z_H: u8 = 0x2D;
    pub const OUT_Z: u8 = 0x2D;
}

/// CTRL_REG1: power on, 100 Hz data rate, X/Y/Z enabled.
pub const CTRL_REG1_INIT: u8 = 0x47;

/// CTRL_REG2: data-ready/output routing. Chip-specific bits; only the
/// literal value matters here.
pub const CTRL_REG2_INIT: u8 = 0x63;

/// Identification codes reported through `WHO_AM_I`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum DeviceId {
    /// LIS331DLH, 16-bit output
    Lis331dlh = 0x32,

    /// LIS3DC / HP3DC, 8-bit output
    Lis3dc = 0x33,

    /// LIS3LV02D family, 12-bit output
    Lis3lv02d = 0x3A,

    /// LIS302DL / LIS202D family, 8-bit output
    Lis302dl = 0x3B,

    /// LIS331DLF, 6-bit output
    Lis331dlf = 0x52,
}
