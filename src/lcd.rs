//! The LCD handle
//!
//! A [`Lcd`] is created without a transport by [`Lcd::new`], and becomes usable after
//! [`Lcd::init`] hands it an I2C bus and runs the HD44780 init sequence.
//! Until then, everything except [`Lcd::init`] and [`Lcd::set_address`] fails with
//! [`Error::NotInitialized`] and touches no bus.

use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    command::{CommandSet, MoveDirection, ShiftType, State},
    error::Error,
    sender::I2cSender,
    state::{LcdState, Phase},
};

mod init;
mod print;

pub use init::{Config, LcdType};

/// Clear display and return home take far longer than the other instructions
const CLEAR_HOME_SETTLE_MS: u32 = 2;

/// Number of custom graphs CGRAM can hold
pub const CGRAM_GRAPH_COUNT: u8 = 8;

/// A HD44780 LCD behind a PCF8574 I2C backpack
pub struct Lcd<I2C, Delayer> {
    sender: I2cSender<I2C>,
    delayer: Delayer,
    state: LcdState,
    lcd_type: LcdType,
}

impl<I2C, Delayer> Lcd<I2C, Delayer>
where
    I2C: I2c,
    Delayer: DelayNs,
{
    /// Whether [`Lcd::init`] has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.state.get_phase() == Phase::Ready
    }

    /// Change the 7 bit I2C address of the backpack
    ///
    /// This works before [`Lcd::init`] as well, and only affects following writes
    pub fn set_address(&mut self, addr: u8) -> Result<(), Error<I2C::Error>> {
        self.sender.set_address(addr)?;
        debug!("LCD address set to {=u8:#x}", addr);
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_address(&self) -> u8 {
        self.sender.get_address()
    }

    /// Rows, columns and row offsets this handle was configured with
    pub fn get_lcd_type(&self) -> LcdType {
        self.lcd_type
    }

    /// Clear the whole display and return the cursor home
    pub fn clear_display(&mut self) -> Result<(), Error<I2C::Error>> {
        self.send(CommandSet::ClearDisplay)?;
        self.delayer.delay_ms(CLEAR_HOME_SETTLE_MS);
        Ok(())
    }

    /// Return the cursor to top left, and undo any display shift
    pub fn return_home(&mut self) -> Result<(), Error<I2C::Error>> {
        self.send(CommandSet::ReturnHome)?;
        self.delayer.delay_ms(CLEAR_HOME_SETTLE_MS);
        Ok(())
    }

    /// Move the cursor to `row`, `col`, counted from 0
    ///
    /// Out of range values are clamped to the last row / column of the configured [`LcdType`]
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        let addr = self.lcd_type.ddram_addr(row, col);
        self.send(CommandSet::SetDDRAM(addr))
    }

    /// Turn the whole display on or off, DDRAM content is kept
    ///
    /// Cursor and blink keep their tracked values, so turning the display back on
    /// brings them back as they were. Drivers that clear both bits here behave differently.
    pub fn set_display_state(&mut self, display: State) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        self.state.set_display_state(display);
        self.send_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// toggle entire display on and off (it doesn't toggle backlight)
    pub fn toggle_display(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_display_state(self.get_display_state().toggled())
    }

    /// Show or hide the underline cursor
    ///
    /// Note:
    /// This always turns the display on.
    /// Blinking keeps its tracked value instead of being switched off with this call.
    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        self.state.set_cursor_state(cursor);
        self.state.set_display_state(State::On);
        self.send_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// Switch cursor blinking
    ///
    /// Note:
    /// This always turns the display on.
    /// The underline cursor keeps its tracked value instead of being switched off with this call.
    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        self.state.set_cursor_blink(blink);
        self.state.set_display_state(State::On);
        self.send_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Shift the display window one step, the content moves left
    pub fn scroll_display_left(&mut self) -> Result<(), Error<I2C::Error>> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)
    }

    /// Shift the display window one step, the content moves right
    pub fn scroll_display_right(&mut self) -> Result<(), Error<I2C::Error>> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::LeftToRight)
    }

    /// Move the cursor, or cursor and display window together, by one step
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        dir: MoveDirection,
    ) -> Result<(), Error<I2C::Error>> {
        self.send(CommandSet::CursorOrDisplayShift(shift_type, dir))
    }

    /// Direction the cursor moves after each write
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        self.state.set_direction(dir);
        self.send_entry_mode()
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// Whether the display window follows the cursor after each write
    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        self.state.set_shift_type(shift);
        self.send_entry_mode()
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Switch the backlight
    ///
    /// On a ready handle the change is written to the expander at once.
    /// Otherwise it is only recorded, and the next init sequence carries it
    /// with its first write.
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Error<I2C::Error>> {
        self.sender.set_backlight(backlight);

        if self.is_initialized() {
            self.sender.push_backlight()?;
        }

        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_backlight(&self) -> State {
        self.sender.get_backlight()
    }

    /// Store a 5x8 custom graph in CGRAM slot `index` (0~7)
    ///
    /// Only the lower 5 bits of each line are used.
    /// Afterwards the address counter points into CGRAM,
    /// so call [`Lcd::set_cursor`] before writing text again.
    pub fn write_graph_to_cgram(
        &mut self,
        index: u8,
        graph_data: &[u8; 8],
    ) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        if index >= CGRAM_GRAPH_COUNT {
            return Err(Error::InvalidArgument);
        }

        self.send(CommandSet::SetCGRAM(index << 3))?;
        graph_data
            .iter()
            .try_for_each(|&line| self.send(CommandSet::WriteDataToRAM(line & 0b1_1111)))
    }

    /// Show the custom graph in CGRAM slot `index` (0~7) at the cursor
    pub fn write_graph_to_cur(&mut self, index: u8) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        if index >= CGRAM_GRAPH_COUNT {
            return Err(Error::InvalidArgument);
        }

        self.write_u8_to_cur(index)
    }

    /// Show the custom graph in CGRAM slot `index` (0~7) at `row`, `col`
    pub fn write_graph_to_pos(
        &mut self,
        index: u8,
        row: u8,
        col: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;

        if index >= CGRAM_GRAPH_COUNT {
            return Err(Error::InvalidArgument);
        }

        self.set_cursor(row, col)?;
        self.write_u8_to_cur(index)
    }

    /// Write a raw byte (a character ROM code) at the cursor
    pub fn write_u8_to_cur(&mut self, byte: u8) -> Result<(), Error<I2C::Error>> {
        self.send(CommandSet::WriteDataToRAM(byte))
    }

    /// Block for `ms` milliseconds with the handle's delayer
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }
}

// internal api
impl<I2C, Delayer> Lcd<I2C, Delayer>
where
    I2C: I2c,
    Delayer: DelayNs,
{
    fn ensure_ready(&self) -> Result<(), Error<I2C::Error>> {
        match self.state.get_phase() {
            Phase::Ready => Ok(()),
            Phase::Uninitialized | Phase::Initializing => Err(Error::NotInitialized),
        }
    }

    fn send(&mut self, command: CommandSet) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;
        self.raw_send(command)
    }

    // no phase check, the init sequence runs through here
    fn raw_send(&mut self, command: CommandSet) -> Result<(), Error<I2C::Error>> {
        trace!("LCD command {}", command);
        self.sender.send(command, &mut self.delayer)
    }

    fn send_display_control(&mut self) -> Result<(), Error<I2C::Error>> {
        self.send(CommandSet::DisplayOnOff {
            display: self.state.get_display_state(),
            cursor: self.state.get_cursor_state(),
            cursor_blink: self.state.get_cursor_blink(),
        })
    }

    fn send_entry_mode(&mut self) -> Result<(), Error<I2C::Error>> {
        self.send(CommandSet::EntryModeSet(
            self.state.get_direction(),
            self.state.get_shift_type(),
        ))
    }
}
