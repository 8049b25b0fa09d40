use core::fmt;

use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{command::CommandSet, error::Error, lcd::Lcd};

/// Most decimal places [`Lcd::write_float_to_cur`] prints
pub const MAX_FLOAT_DECIMALS: u8 = 6;

impl<I2C, Delayer> Lcd<I2C, Delayer>
where
    I2C: I2c,
    Delayer: DelayNs,
{
    /// write string to current position
    ///
    /// Each byte goes out as is: ASCII maps onto the character ROM,
    /// other UTF-8 sequences show up as ROM garbage
    pub fn write_str_to_cur(&mut self, str: &str) -> Result<(), Error<I2C::Error>> {
        self.write_bytes_to_cur(str.as_bytes())
    }

    /// write raw character ROM codes to current position
    pub fn write_bytes_to_cur(&mut self, bytes: &[u8]) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        bytes
            .iter()
            .try_for_each(|&byte| self.raw_send(CommandSet::WriteDataToRAM(byte)))
    }

    /// write a signed integer in decimal, with a leading `-` when negative
    pub fn write_int_to_cur(&mut self, value: i32) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        let mut buffer = itoa::Buffer::new();
        self.write_str_to_cur(buffer.format(value))
    }

    /// write a float with a fixed number of decimal places
    ///
    /// `decimals` above [`MAX_FLOAT_DECIMALS`] is clamped, the last place is rounded
    pub fn write_float_to_cur(
        &mut self,
        value: f32,
        decimals: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let decimals = decimals.min(MAX_FLOAT_DECIMALS) as usize;
        self.write_fmt_to_cur(format_args!("{:.*}", decimals, value))
    }

    /// write anything `core::fmt` can format, without an intermediate buffer
    ///
    /// ```ignore
    /// lcd.write_fmt_to_cur(format_args!("T={}C", temperature))?;
    /// ```
    pub fn write_fmt_to_cur(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        let mut writer = FmtWriter {
            lcd: self,
            error: None,
        };

        match fmt::Write::write_fmt(&mut writer, args) {
            Ok(()) => Ok(()),
            // a bus error is what made the formatter stop, report that one
            Err(fmt_error) => Err(writer.error.take().unwrap_or(fmt_error.into())),
        }
    }

    /// write string to specific position
    pub fn write_str_to_pos(
        &mut self,
        str: &str,
        row: u8,
        col: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_cursor(row, col)?;
        self.write_str_to_cur(str)
    }

    /// write a signed integer to specific position
    pub fn write_int_to_pos(
        &mut self,
        value: i32,
        row: u8,
        col: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_cursor(row, col)?;
        self.write_int_to_cur(value)
    }

    /// write a float to specific position, see [`Lcd::write_float_to_cur`]
    pub fn write_float_to_pos(
        &mut self,
        value: f32,
        decimals: u8,
        row: u8,
        col: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_cursor(row, col)?;
        self.write_float_to_cur(value, decimals)
    }
}

/// Lets `write!` target the display directly, bus errors are flattened to [`fmt::Error`];
/// use [`Lcd::write_fmt_to_cur`] to keep them
impl<I2C, Delayer> fmt::Write for Lcd<I2C, Delayer>
where
    I2C: I2c,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_str_to_cur(s).map_err(|_| fmt::Error)
    }
}

// keeps the driver error that stopped a formatting run
struct FmtWriter<'a, I2C: I2c, Delayer> {
    lcd: &'a mut Lcd<I2C, Delayer>,
    error: Option<Error<I2C::Error>>,
}

impl<I2C, Delayer> fmt::Write for FmtWriter<'_, I2C, Delayer>
where
    I2C: I2c,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.lcd.write_str_to_cur(s).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::fmt::Write;

    use super::*;
    use crate::lcd::{
        tests::{command, data, init_sequence, ready_lcd, ADDR},
        Config,
    };
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    fn expect_text(text: &str) -> I2cMock {
        let mut seq = init_sequence(ADDR);
        seq.extend(data(ADDR, text.as_bytes()));
        I2cMock::new(&seq)
    }

    #[test]
    fn string_is_sent_byte_by_byte() {
        let mut i2c = expect_text("hello");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_str_to_cur("hello").unwrap();

        i2c.done();
    }

    #[test]
    fn empty_string_sends_nothing() {
        let mut i2c = expect_text("");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_str_to_cur("").unwrap();

        i2c.done();
    }

    #[test]
    fn negative_int() {
        let mut i2c = expect_text("-42");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_int_to_cur(-42).unwrap();

        i2c.done();
    }

    #[test]
    fn int_extremes() {
        let mut i2c = expect_text("-21474836480");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_int_to_cur(i32::MIN).unwrap();
        lcd.write_int_to_cur(0).unwrap();

        i2c.done();
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn float_is_rounded_to_decimals() {
        let mut i2c = expect_text("3.14");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_float_to_cur(3.14159, 2).unwrap();

        i2c.done();
    }

    #[test]
    fn float_rounds_last_place_up() {
        let mut i2c = expect_text("9.8766");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_float_to_cur(9.876_56, 4).unwrap();

        i2c.done();
    }

    #[test]
    fn float_decimals_are_clamped_to_six() {
        let mut i2c = expect_text("-1.500000");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_float_to_cur(-1.5, 9).unwrap();

        i2c.done();
    }

    #[test]
    fn float_without_decimals() {
        let mut i2c = expect_text("12");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_float_to_cur(12.0, 0).unwrap();

        i2c.done();
    }

    #[test]
    fn formatted_text_streams_to_display() {
        let mut i2c = expect_text("T=21C OK");

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_fmt_to_cur(format_args!("T={}C", 21)).unwrap();
        write!(lcd, " {}", "OK").unwrap();

        i2c.done();
    }

    #[test]
    fn positional_writes_set_cursor_first() {
        let mut seq = init_sequence(ADDR);
        seq.extend(command(ADDR, 0x80 | (0x40 + 3)));
        seq.extend(data(ADDR, b"hi"));
        seq.extend(command(ADDR, 0x80 | 0x14));
        seq.extend(data(ADDR, b"-7"));
        seq.extend(command(ADDR, 0x80 | (0x54 + 10)));
        seq.extend(data(ADDR, b"0.5"));
        let mut i2c = I2cMock::new(&seq);

        let mut lcd = ready_lcd(&mut i2c);
        lcd.write_str_to_pos("hi", 1, 3).unwrap();
        lcd.write_int_to_pos(-7, 2, 0).unwrap();
        lcd.write_float_to_pos(0.5, 1, 3, 10).unwrap();

        i2c.done();
    }

    #[test]
    fn output_before_init_is_refused() {
        let mut lcd: Lcd<I2cMock, NoopDelay> = Lcd::new(NoopDelay, Config::default());

        assert_eq!(lcd.write_str_to_cur("hi"), Err(Error::NotInitialized));
        assert_eq!(lcd.write_bytes_to_cur(&[0xFF]), Err(Error::NotInitialized));
        assert_eq!(lcd.write_int_to_cur(-42), Err(Error::NotInitialized));
        assert_eq!(lcd.write_float_to_cur(1.25, 2), Err(Error::NotInitialized));
        assert_eq!(
            lcd.write_fmt_to_cur(format_args!("{}", 1)),
            Err(Error::NotInitialized)
        );
        assert_eq!(lcd.write_str_to_pos("hi", 0, 0), Err(Error::NotInitialized));
        assert_eq!(lcd.write_int_to_pos(1, 0, 0), Err(Error::NotInitialized));
        assert_eq!(lcd.write_float_to_pos(1.0, 1, 0, 0), Err(Error::NotInitialized));
        assert!(write!(lcd, "x").is_err());
    }

    #[test]
    fn bus_error_during_formatting_is_kept() {
        let mut seq = init_sequence(ADDR);
        // 'T' = 0x54, first nibble write fails
        seq.push(I2cTransaction::write(ADDR, std::vec![0b0101_1101]).with_error(ErrorKind::Bus));
        let mut i2c = I2cMock::new(&seq);

        let mut lcd = ready_lcd(&mut i2c);
        assert_eq!(
            lcd.write_fmt_to_cur(format_args!("T={}", 5)),
            Err(Error::Bus(ErrorKind::Bus))
        );

        i2c.done();
    }
}
