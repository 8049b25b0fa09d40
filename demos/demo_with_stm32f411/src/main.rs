//! Drive a 2004 LCD through a PCF8574 backpack with a STM32F411RET6
//!
//! this demo use many different write functions intentionally, to test functions works just fine.

//! Wiring diagram
//!
//! PCF8574 backpack <-> STM32F411RET6
//!              GND <-> GND
//!              VCC <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!              SCL <-> PB6
//!              SDA <-> PB7
//!
//! most backpacks already carry 4.7 kOhm pull-ups on SCL/SDA, and a potentiometer for the contrast

#![no_std]
#![no_main]

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};

use core::fmt::Write;

use hd44780_i2c_driver::{
    command::{MoveDirection, State},
    lcd::{Config, Lcd, LcdType},
    utils::BitOps,
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let mut i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    // a 0x3F backpack would need `.set_address(0x3F)` here
    let config = Config::default()
        .set_lcd_type(LcdType::Lcd20x4)
        .set_cursor_blink(State::On)
        .set_pulse_delay_us(10);

    let mut lcd = Lcd::new(delayer, config);

    // init LCD2004
    lcd.init(&mut i2c).expect("LCD init failed");
    rprintln!("LCD ready at 0x{:02X}", lcd.get_address());

    // draw a little heart in CGRAM
    lcd.write_graph_to_cgram(1, &HEART).unwrap();

    // no read back through the backpack, so modify a copy into a diamond shape
    let mut graph_data = HEART;
    graph_data[1].set_bit(2);
    graph_data[2].set_bit(2);
    lcd.write_graph_to_cgram(2, &graph_data).unwrap();

    // CGRAM writes moved the address counter, point it back to DDRAM
    lcd.write_str_to_pos("hello,", 0, 1).unwrap();
    lcd.write_str_to_cur(" world!").unwrap();

    // manually delay
    lcd.delay_ms(250);

    // numbers
    lcd.write_int_to_pos(-2061, 1, 0).unwrap();
    lcd.write_float_to_pos(3.5, 2, 1, 8).unwrap();

    // out of range position should be clamped to the last column
    lcd.write_str_to_pos("|", 0, 100).unwrap();

    // formatted output without a buffer
    lcd.set_cursor(2, 0).unwrap();
    write!(lcd, "T={}C", 21).unwrap();

    // turn off cursor blinking, so that cursor will only be a underline
    lcd.set_cursor_blink_state(State::Off).unwrap();

    // to test right to left write in
    lcd.set_direction(MoveDirection::RightToLeft).unwrap();
    lcd.write_str_to_pos("!~", 3, 19).unwrap();
    lcd.set_direction(MoveDirection::LeftToRight).unwrap();

    lcd.set_cursor_state(State::Off).unwrap();

    // place custom heart shape and diamond shape
    lcd.delay_ms(1_000);
    lcd.write_graph_to_pos(1, 3, 0).unwrap();
    lcd.delay_ms(1_000);
    lcd.write_graph_to_pos(2, 3, 1).unwrap();

    // shift display window
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_display_right().unwrap();
    }
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_display_left().unwrap();
    }

    // and blinking display 3 times
    for _ in 0..6 {
        lcd.delay_ms(500);
        lcd.toggle_display().unwrap();
    }

    // and the backlight
    lcd.delay_ms(1_000);
    lcd.set_backlight(State::Off).unwrap();
    lcd.delay_ms(1_000);
    lcd.set_backlight(State::On).unwrap();

    rprintln!("demo done");

    #[allow(clippy::empty_loop)]
    loop {}
}
