use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    command::{CommandSet, DataWidth, Font, LineMode, MoveDirection, ShiftType, State},
    error::Error,
    lcd::Lcd,
    sender::{I2cSender, DEFAULT_ADDRESS},
    state::{LcdState, Phase},
};

// HD44780 datasheet, "Initializing by Instruction", with some margin
const POWER_ON_DELAY_MS: u32 = 50;
const FIRST_RESYNC_DELAY_MS: u32 = 5;
const COMMAND_SETTLE_MS: u32 = 1;
const CLEAR_SETTLE_MS: u32 = 2;

/// Hold time after each enable edge
const DEFAULT_PULSE_DELAY_US: u32 = 1_000;

/// Size of the display, and where each row starts in DDRAM
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdType {
    /// 16x1
    Lcd16x1,
    /// 8x2
    Lcd8x2,
    /// 16x2
    Lcd16x2,
    /// 16x4
    Lcd16x4,
    /// 20x2
    Lcd20x2,
    /// 20x4, and the default: it accepts every position a smaller panel does
    #[default]
    Lcd20x4,
    /// 40x2
    Lcd40x2,
}

impl LcdType {
    #[allow(missing_docs)]
    pub const fn rows(&self) -> u8 {
        match self {
            LcdType::Lcd16x1 => 1,
            LcdType::Lcd8x2 | LcdType::Lcd16x2 | LcdType::Lcd20x2 | LcdType::Lcd40x2 => 2,
            LcdType::Lcd16x4 | LcdType::Lcd20x4 => 4,
        }
    }

    #[allow(missing_docs)]
    pub const fn cols(&self) -> u8 {
        match self {
            LcdType::Lcd8x2 => 8,
            LcdType::Lcd16x1 | LcdType::Lcd16x2 | LcdType::Lcd16x4 => 16,
            LcdType::Lcd20x2 | LcdType::Lcd20x4 => 20,
            LcdType::Lcd40x2 => 40,
        }
    }

    /// DDRAM address of the first column of each row
    ///
    /// Rows a panel doesn't have repeat the offsets of the rows it has
    pub const fn row_offsets(&self) -> [u8; 4] {
        match self {
            LcdType::Lcd16x1 => [0x00, 0x00, 0x00, 0x00],
            LcdType::Lcd8x2 | LcdType::Lcd20x2 | LcdType::Lcd40x2 => [0x00, 0x40, 0x00, 0x40],
            LcdType::Lcd16x2 | LcdType::Lcd16x4 => [0x00, 0x40, 0x10, 0x50],
            LcdType::Lcd20x4 => [0x00, 0x40, 0x14, 0x54],
        }
    }

    /// One line panels are driven in [`LineMode::OneLine`], everything else in [`LineMode::TwoLine`]
    pub const fn line_mode(&self) -> LineMode {
        match self.rows() {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        }
    }

    /// DDRAM address of `row`, `col`, both clamped into the panel
    pub fn ddram_addr(&self, row: u8, col: u8) -> u8 {
        let row = row.min(self.rows() - 1);
        let col = col.min(self.cols() - 1);

        self.row_offsets()[row as usize] + col
    }
}

/// [`Config`] is the init config of a [`Lcd`]
///
/// `Config::default()` gives a 20x4 layout at address 0x27, backlight on,
/// display on, cursor and blink off, left to right without display shift
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Config {
    state: LcdState,
    lcd_type: LcdType,
    address: u8,
    backlight: State,
    pulse_delay_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state: LcdState::default(),
            lcd_type: LcdType::default(),
            address: DEFAULT_ADDRESS,
            backlight: State::On,
            pulse_delay_us: DEFAULT_PULSE_DELAY_US,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_lcd_type(&self) -> LcdType {
        self.lcd_type
    }

    pub fn set_lcd_type(mut self, lcd_type: LcdType) -> Self {
        self.lcd_type = lcd_type;
        self
    }

    pub fn get_address(&self) -> u8 {
        self.address
    }

    /// 7 bit address, values above 0x7F make [`Lcd::new`] fall back to the default address
    pub fn set_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.backlight = backlight;
        self
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    /// Note:
    /// [`Font::Font5x10`] only takes effect on one line panels
    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.state.set_display_state(display);
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.state.set_cursor_state(cursor);
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.state.set_cursor_blink(blink);
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.state.set_direction(dir);
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.state.set_shift_type(shift);
        self
    }

    pub fn get_pulse_delay_us(&self) -> u32 {
        self.pulse_delay_us
    }

    /// How long to hold after each enable edge,
    /// the HD44780 itself needs far less than the 1 ms default
    pub fn set_pulse_delay_us(mut self, pulse_delay_us: u32) -> Self {
        self.pulse_delay_us = pulse_delay_us;
        self
    }
}

impl<I2C, Delayer> Lcd<I2C, Delayer>
where
    I2C: I2c,
    Delayer: DelayNs,
{
    /// Create an uninitialized [`Lcd`], nothing is sent until [`Lcd::init`]
    ///
    /// A config address above 0x7F can't be used on the bus, the handle falls back to
    /// [`DEFAULT_ADDRESS`] in that case. Check [`Lcd::get_address`], or call
    /// [`Lcd::set_address`] to get [`Error::InvalidArgument`] for such a value.
    pub fn new(delayer: Delayer, config: Config) -> Self {
        let address = match config.address {
            0..=0x7F => config.address,
            _ => DEFAULT_ADDRESS,
        };

        Self {
            sender: I2cSender::new(address, config.backlight, config.pulse_delay_us),
            delayer,
            state: config.state,
            lcd_type: config.lcd_type,
        }
    }

    /// Take the I2C bus and initialize LCD hardware
    ///
    /// Fails with [`Error::AlreadyInitialized`] on a running handle, without touching
    /// the bus, `i2c` is dropped in that case.
    /// If a write fails halfway, the handle stays unusable until [`Lcd::reinit`] succeeds.
    pub fn init(&mut self, i2c: I2C) -> Result<(), Error<I2C::Error>> {
        if self.state.get_phase() == Phase::Ready {
            return Err(Error::AlreadyInitialized);
        }

        self.sender.attach(i2c);
        self.run_init_sequence()
    }

    /// Run the init sequence again on the bus given to [`Lcd::init`]
    ///
    /// Display control and entry mode are restored from the tracked state
    pub fn reinit(&mut self) -> Result<(), Error<I2C::Error>> {
        if !self.sender.is_attached() {
            return Err(Error::NotInitialized);
        }

        self.run_init_sequence()
    }

    fn run_init_sequence(&mut self) -> Result<(), Error<I2C::Error>> {
        self.state.set_phase(Phase::Initializing);
        debug!("LCD init at address {=u8:#x}", self.sender.get_address());

        // in initialization process, we'd better use "raw command", to strictly follow datasheet

        self.delayer.delay_ms(POWER_ON_DELAY_MS);

        // the controller may be in 8 bit mode, or halfway through a 4 bit transfer,
        // three 8 bit function sets bring it back in step
        self.raw_send(CommandSet::HalfFunctionSet(DataWidth::Bit8))?;
        self.delayer.delay_ms(FIRST_RESYNC_DELAY_MS);
        self.raw_send(CommandSet::HalfFunctionSet(DataWidth::Bit8))?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);
        self.raw_send(CommandSet::HalfFunctionSet(DataWidth::Bit8))?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);

        // from here on, every byte is sent as 2 nibbles
        self.raw_send(CommandSet::HalfFunctionSet(DataWidth::Bit4))?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);

        self.raw_send(CommandSet::FunctionSet(
            DataWidth::Bit4,
            self.lcd_type.line_mode(),
            self.state.get_font(),
        ))?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);

        self.raw_send(CommandSet::DisplayOnOff {
            display: State::Off,
            cursor: State::Off,
            cursor_blink: State::Off,
        })?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);

        self.raw_send(CommandSet::ClearDisplay)?;
        self.delayer.delay_ms(CLEAR_SETTLE_MS);

        self.raw_send(CommandSet::EntryModeSet(
            self.state.get_direction(),
            self.state.get_shift_type(),
        ))?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);

        self.raw_send(CommandSet::DisplayOnOff {
            display: self.state.get_display_state(),
            cursor: self.state.get_cursor_state(),
            cursor_blink: self.state.get_cursor_blink(),
        })?;
        self.delayer.delay_ms(COMMAND_SETTLE_MS);

        self.state.set_phase(Phase::Ready);
        debug!("LCD ready");

        Ok(())
    }
}
