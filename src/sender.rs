//! Built-in sender
//!
//! Turns encoded [`Command`](crate::command::Command)s into PCF8574 port writes

mod i2c_sender;

pub use i2c_sender::I2cSender;

/// The usual address of a PCF8574 backpack with A0~A2 left open (7 bit form, `0x4E` on the wire)
pub const DEFAULT_ADDRESS: u8 = 0x27;

// PCF8574 port to HD44780 wiring:
// P7 -> P0
// DB7/DB6/DB5/DB4/BL/EN/RW/RS
pub(crate) const RS_BIT: u8 = 0;
pub(crate) const RW_BIT: u8 = 1;
pub(crate) const EN_BIT: u8 = 2;
pub(crate) const BACKLIGHT_BIT: u8 = 3;
