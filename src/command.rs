//! HD44780 instruction set, and the way each instruction turns into bits on the data bus

use crate::utils::BitOps;

/// Every instruction this driver sends to the controller
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Clear DDRAM and return the cursor home
    ClearDisplay,
    /// Return the cursor and display window home, DDRAM untouched
    ReturnHome,
    /// Cursor direction and display shift after each data write
    EntryModeSet(MoveDirection, ShiftType),
    /// Display, cursor and cursor blink switches
    DisplayOnOff {
        /// whole display
        display: State,
        /// underline cursor
        cursor: State,
        /// blinking block cursor
        cursor_blink: State,
    },
    /// Move cursor, or cursor together with the display window, without writing data
    CursorOrDisplayShift(ShiftType, MoveDirection),
    /// Not a datasheet command: the lone upper nibble of a function set,
    /// sent while the controller may still be listening in 8 bit mode
    HalfFunctionSet(DataWidth),
    /// Interface width, line count and font
    FunctionSet(DataWidth, LineMode, Font),
    /// Set CGRAM address, lower 6 bits are used
    SetCGRAM(u8),
    /// Set DDRAM address, lower 7 bits are used
    SetDDRAM(u8),
    /// Write a byte into DDRAM or CGRAM, whichever the address counter points at
    WriteDataToRAM(u8),
}

/// Direction the address counter moves after a data write
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    #[allow(missing_docs)]
    RightToLeft,
    #[allow(missing_docs)]
    #[default]
    LeftToRight,
}

/// What moves on a shift: the cursor, or the cursor together with the display window
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    #[allow(missing_docs)]
    #[default]
    CursorOnly,
    #[allow(missing_docs)]
    CursorAndDisplay,
}

/// A simple on/off switch
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        match on {
            true => State::On,
            false => State::Off,
        }
    }
}

impl State {
    /// flip the switch
    pub fn toggled(self) -> Self {
        match self {
            State::On => State::Off,
            State::Off => State::On,
        }
    }
}

/// Interface data width
///
/// Only the resync sequence ever talks in [`DataWidth::Bit8`],
/// a PCF8574 backpack only wires DB4~DB7
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    #[allow(missing_docs)]
    #[default]
    Bit4,
    #[allow(missing_docs)]
    Bit8,
}

/// Number of display lines the controller drives
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    #[allow(missing_docs)]
    OneLine,
    #[allow(missing_docs)]
    #[default]
    TwoLine,
}

/// Character font
///
/// 5x10 dots is only available in [`LineMode::OneLine`]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8,
    #[allow(missing_docs)]
    Font5x10,
}

/// An encoded instruction, ready to be split into nibbles by a sender
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum RegisterSelection {
    Command,
    Data,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum Bits {
    Bit4(u8),
    Bit8(u8),
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    pub(crate) fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub(crate) fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => {
                let raw_bits: u8 = 0b0000_0001;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::ReturnHome => {
                let raw_bits: u8 = 0b0000_0010;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                };
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                };
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(3),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(3),
                };

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(2),
                    MoveDirection::LeftToRight => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::HalfFunctionSet(width) => {
                let mut raw_bits: u8 = 0b0010;

                match width {
                    DataWidth::Bit4 => raw_bits.clear_bit(0),
                    DataWidth::Bit8 => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit4(raw_bits))
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                match width {
                    DataWidth::Bit4 => raw_bits.clear_bit(4),
                    DataWidth::Bit8 => raw_bits.set_bit(4),
                };

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x10 => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::SetCGRAM(addr) => {
                let raw_bits: u8 = 0b0100_0000 | (addr & 0b0011_1111);
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::SetDDRAM(addr) => {
                let raw_bits: u8 = 0b1000_0000 | (addr & 0b0111_1111);
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::WriteDataToRAM(data) => {
                Self::new(RegisterSelection::Data, Bits::Bit8(data))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(command: CommandSet) -> (RegisterSelection, Bits) {
        let command = Command::from(command);
        (command.get_register_selection(), command.get_data())
    }

    #[test]
    fn init_sequence_commands_match_datasheet_values() {
        assert_eq!(
            raw(CommandSet::FunctionSet(
                DataWidth::Bit4,
                LineMode::TwoLine,
                Font::Font5x8
            )),
            (RegisterSelection::Command, Bits::Bit8(0x28))
        );
        assert_eq!(
            raw(CommandSet::DisplayOnOff {
                display: State::Off,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            (RegisterSelection::Command, Bits::Bit8(0x08))
        );
        assert_eq!(
            raw(CommandSet::ClearDisplay),
            (RegisterSelection::Command, Bits::Bit8(0x01))
        );
        assert_eq!(
            raw(CommandSet::EntryModeSet(
                MoveDirection::LeftToRight,
                ShiftType::CursorOnly
            )),
            (RegisterSelection::Command, Bits::Bit8(0x06))
        );
        assert_eq!(
            raw(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            (RegisterSelection::Command, Bits::Bit8(0x0C))
        );
    }

    #[test]
    fn half_function_set_is_a_single_nibble() {
        assert_eq!(
            raw(CommandSet::HalfFunctionSet(DataWidth::Bit8)),
            (RegisterSelection::Command, Bits::Bit4(0x3))
        );
        assert_eq!(
            raw(CommandSet::HalfFunctionSet(DataWidth::Bit4)),
            (RegisterSelection::Command, Bits::Bit4(0x2))
        );
    }

    #[test]
    fn display_scroll_commands() {
        assert_eq!(
            raw(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorAndDisplay,
                MoveDirection::RightToLeft
            )),
            (RegisterSelection::Command, Bits::Bit8(0x18))
        );
        assert_eq!(
            raw(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorAndDisplay,
                MoveDirection::LeftToRight
            )),
            (RegisterSelection::Command, Bits::Bit8(0x1C))
        );
    }

    #[test]
    fn ram_addresses_are_masked_into_their_field() {
        assert_eq!(
            raw(CommandSet::SetCGRAM(3 << 3)),
            (RegisterSelection::Command, Bits::Bit8(0x58))
        );
        assert_eq!(
            raw(CommandSet::SetDDRAM(0x54 + 19)),
            (RegisterSelection::Command, Bits::Bit8(0x80 | 0x67))
        );
        assert_eq!(
            raw(CommandSet::SetDDRAM(0xFF)),
            (RegisterSelection::Command, Bits::Bit8(0xFF))
        );
    }

    #[test]
    fn data_write_selects_data_register() {
        assert_eq!(
            raw(CommandSet::WriteDataToRAM(b'A')),
            (RegisterSelection::Data, Bits::Bit8(0x41))
        );
    }

    #[test]
    fn state_from_bool() {
        assert_eq!(State::from(true), State::On);
        assert_eq!(State::from(false), State::Off);
        assert_eq!(State::On.toggled(), State::Off);
    }
}
