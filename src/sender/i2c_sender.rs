use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    command::{Bits, Command, RegisterSelection, State},
    error::Error,
    utils::BitOps,
};

use super::{BACKLIGHT_BIT, EN_BIT, RS_BIT, RW_BIT};

/// Drives an HD44780 in 4 bit mode through a PCF8574 I2C expander
///
/// Every nibble is latched with two single byte writes, EN high then EN low,
/// each followed by the pulse delay.
/// The transport is absent until [`I2cSender::attach`], and every send fails with
/// [`Error::NotInitialized`] before that.
pub struct I2cSender<I2C> {
    i2c: Option<I2C>,
    addr: u8,
    backlight: State,
    pulse_delay_us: u32,
}

impl<I2C: I2c> I2cSender<I2C> {
    /// Create a sender without a transport
    pub fn new(addr: u8, backlight: State, pulse_delay_us: u32) -> Self {
        Self {
            i2c: None,
            addr,
            backlight,
            pulse_delay_us,
        }
    }

    /// Hand over the I2C transport, returns the previous one if there was one
    pub fn attach(&mut self, i2c: I2C) -> Option<I2C> {
        self.i2c.replace(i2c)
    }

    /// Whether a transport has been attached
    pub fn is_attached(&self) -> bool {
        self.i2c.is_some()
    }

    /// 7 bit slave address
    pub fn get_address(&self) -> u8 {
        self.addr
    }

    /// Change the 7 bit slave address used by following writes
    pub fn set_address(&mut self, addr: u8) -> Result<(), Error<I2C::Error>> {
        if addr > 0x7F {
            return Err(Error::InvalidArgument);
        }
        self.addr = addr;
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    /// Change the backlight bit carried by every following packet
    pub fn set_backlight(&mut self, backlight: State) {
        self.backlight = backlight;
    }

    /// Write one idle packet, so the expander shows the current backlight state
    ///
    /// EN stays low, the controller doesn't latch anything
    pub fn push_backlight(&mut self) -> Result<(), Error<I2C::Error>> {
        let idle = self.packet(0, RegisterSelection::Command);
        self.write_packet(idle)
    }

    /// Send one encoded command: a lone nibble, or a full byte as two nibbles
    pub fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Error<I2C::Error>> {
        let command: Command = command.into();
        let rs = command.get_register_selection();

        match command.get_data() {
            Bits::Bit4(nibble) => self.write_nibble(nibble, rs, delayer),
            Bits::Bit8(byte) => self.write_byte(byte, rs, delayer),
        }
    }

    fn write_byte(
        &mut self,
        byte: u8,
        rs: RegisterSelection,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_nibble(byte >> 4, rs, delayer)?;
        self.write_nibble(byte & 0b1111, rs, delayer)
    }

    fn write_nibble(
        &mut self,
        nibble: u8,
        rs: RegisterSelection,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Error<I2C::Error>> {
        let idle = self.packet(nibble, rs);
        let mut enabled = idle;
        enabled.set_bit(EN_BIT);

        self.write_packet(enabled)?;
        delayer.delay_us(self.pulse_delay_us);
        self.write_packet(idle)?;
        delayer.delay_us(self.pulse_delay_us);

        Ok(())
    }

    // EN is always clear in the returned packet
    fn packet(&self, nibble: u8, rs: RegisterSelection) -> u8 {
        let mut packet = (nibble & 0b1111) << 4;

        if rs == RegisterSelection::Data {
            packet.set_bit(RS_BIT);
        }

        // only writes are issued
        packet.clear_bit(RW_BIT);

        if self.backlight == State::On {
            packet.set_bit(BACKLIGHT_BIT);
        }

        packet
    }

    fn write_packet(&mut self, packet: u8) -> Result<(), Error<I2C::Error>> {
        let addr = self.addr;
        let i2c = self.i2c.as_mut().ok_or(Error::NotInitialized)?;
        i2c.write(addr, &[packet]).map_err(Error::Bus)
    }
}
