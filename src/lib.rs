/*!
# HD44780 over I2C Driver

Drives HD44780 compatible character LCDs (1602, 2004 and friends) through
the common PCF8574 I2C backpack, on top of `embedded-hal` 1.0.

Basic Usage:

1. Create a [`lcd::Lcd`] with a delayer and a [`lcd::Config`] <br/>
    [`lcd::Config::default()`] matches the usual 0x27 backpack, pick a [`lcd::LcdType`] for the panel size.
<br/>
<br/>
2. Call [`lcd::Lcd::init()`] with the I2C bus (or a `&mut` to it), which runs the HD44780 init sequence
<br/>
<br/>
3. use any methods provide by [`lcd::Lcd`] to control the LCD

```ignore
let config = Config::default().set_lcd_type(LcdType::Lcd16x2);
let mut lcd = Lcd::new(delayer, config);
lcd.init(&mut i2c)?;

lcd.write_str_to_pos("Temp:", 0, 0)?;
lcd.write_float_to_cur(21.53, 1)?;
```

Every operation returns a [`Result`], bus errors come back as [`error::Error::Bus`].

Enable the `defmt` feature to get `defmt::Format` on the public types and debug logs from the driver.
*/

#![no_std]
#![warn(missing_docs)]

#[macro_use]
mod log;

pub mod command;
pub mod error;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;
