//! HD44780 character LCD over a PCF8574 expander
//!
//! Driver for the common 20x4 (and 16x2) modules sold with an I2C
//! backpack. The controller is write-only from our side: the R/W line is
//! held low, busy-flag polling is impossible and every command is followed
//! by a fixed wait instead.
//!
//! Bring-up follows the datasheet's "initialization by instruction" path
//! for 4-bit interfaces: three `0x3` nibbles force 8-bit mode from any
//! state, a single `0x2` nibble switches to 4-bit, and from then on every
//! byte is two nibbles.

use picopad_core::traits::{CharacterDisplay, DisplayError};
use picopad_hal::{DelayUs, I2cBus};

use super::pcf8574::{self, Mode, COMMAND_SETTLE_US, ENABLE_PULSE_US};
use super::LcdError;

/// DDRAM address of column 0 for each row
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Default backpack address
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Last DDRAM address of the first line in 2-line mode
const LINE1_END: u8 = 0x27;
/// First DDRAM address of the second line
const LINE2_START: u8 = 0x40;
/// Last DDRAM address of the second line
const LINE2_END: u8 = 0x67;

/// Custom glyph slots in CGRAM
pub const CGRAM_SLOTS: u8 = 8;

/// HD44780 instructions and flags
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

    // Display control
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // Function set
    pub const FOUR_BIT_MODE: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const DOTS_5X8: u8 = 0x00;

    /// Nibble that forces 8-bit mode during reset
    pub const RESET_NIBBLE: u8 = 0x30;
    /// Nibble that selects 4-bit mode
    pub const FOUR_BIT_NIBBLE: u8 = 0x20;
}

/// Power-on wait before the first instruction
const POWER_ON_DELAY_MS: u32 = 50;
/// Wait after the first two reset nibbles
const RESET_DELAY_MS: u32 = 5;
/// Wait after the third reset nibble
const RESET_FINAL_DELAY_US: u32 = 150;
/// Execution time of clear and home
const CLEAR_DELAY_MS: u32 = 2;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdState {
    /// Controller mode unknown
    Uninitialized,
    /// 4-bit interface selected, configuration not finished
    FourBitMode,
    /// Accepting commands and data
    Ready,
}

/// HD44780 driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    columns: u8,
    rows: u8,
    backlight: bool,
    display_control: u8,
    /// Tracked DDRAM address
    cursor: u8,
    state: LcdState,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2cBus,
    D: DelayUs,
{
    /// Create a driver for a `columns` x `rows` module at `address`
    ///
    /// Nothing is sent until [`init`](Self::init). Row counts above four
    /// are treated as four.
    pub fn new(i2c: I2C, delay: D, address: u8, columns: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            columns,
            rows: rows.clamp(1, ROW_OFFSETS.len() as u8),
            backlight: true,
            display_control: 0,
            cursor: 0,
            state: LcdState::Uninitialized,
        }
    }

    /// Bring the controller up in 4-bit, two-line mode
    ///
    /// Leaves the display on with the cursor hidden, cleared, and the
    /// cursor at the origin.
    pub fn init(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.state = LcdState::Uninitialized;

        self.delay.delay_ms(POWER_ON_DELAY_MS);
        self.write_nibble(cmd::RESET_NIBBLE, Mode::Command)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.write_nibble(cmd::RESET_NIBBLE, Mode::Command)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.write_nibble(cmd::RESET_NIBBLE, Mode::Command)?;
        self.delay.delay_us(RESET_FINAL_DELAY_US);
        self.write_nibble(cmd::FOUR_BIT_NIBBLE, Mode::Command)?;
        self.state = LcdState::FourBitMode;

        self.send(
            cmd::FUNCTION_SET | cmd::FOUR_BIT_MODE | cmd::TWO_LINE | cmd::DOTS_5X8,
            Mode::Command,
        )?;

        self.display_control = cmd::DISPLAY_ON;
        self.send(cmd::DISPLAY_CONTROL | self.display_control, Mode::Command)?;

        self.send(cmd::CLEAR_DISPLAY, Mode::Command)?;
        self.delay.delay_ms(CLEAR_DELAY_MS);

        self.send(
            cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT | cmd::ENTRY_SHIFT_DECREMENT,
            Mode::Command,
        )?;

        self.send(cmd::RETURN_HOME, Mode::Command)?;
        self.delay.delay_ms(CLEAR_DELAY_MS);

        self.cursor = 0;
        self.state = LcdState::Ready;
        Ok(())
    }

    /// Blank the screen and move the cursor to the origin
    pub fn clear(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        self.send(cmd::CLEAR_DISPLAY, Mode::Command)?;
        self.delay.delay_ms(CLEAR_DELAY_MS);
        self.cursor = 0;
        Ok(())
    }

    /// Move the cursor to the origin without clearing
    pub fn home(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        self.send(cmd::RETURN_HOME, Mode::Command)?;
        self.delay.delay_ms(CLEAR_DELAY_MS);
        self.cursor = 0;
        Ok(())
    }

    /// Move the cursor
    ///
    /// Rows past the bottom are clamped to the last row. Columns are not
    /// checked; a column past the right edge lands in whatever DDRAM cell
    /// the controller maps it to.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        let row = row.min(self.rows - 1);
        let address = col.wrapping_add(ROW_OFFSETS[row as usize]) & 0x7F;
        self.send(cmd::SET_DDRAM_ADDR | address, Mode::Command)?;
        self.cursor = address;
        Ok(())
    }

    /// Write one raw character code at the cursor
    ///
    /// Codes 0-7 show the custom glyphs from [`create_char`](Self::create_char).
    pub fn write_char(&mut self, code: u8) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        self.send(code, Mode::Data)?;
        self.cursor = advance(self.cursor);
        Ok(())
    }

    /// Write text at the cursor
    ///
    /// Anything outside printable ASCII is shown as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        for ch in text.chars() {
            self.write_char(printable(ch))?;
        }
        Ok(())
    }

    pub fn display_on(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.update_control(cmd::DISPLAY_ON, true)
    }

    pub fn display_off(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.update_control(cmd::DISPLAY_ON, false)
    }

    pub fn cursor_on(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.update_control(cmd::CURSOR_ON, true)
    }

    pub fn cursor_off(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.update_control(cmd::CURSOR_ON, false)
    }

    pub fn blink_on(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.update_control(cmd::BLINK_ON, true)
    }

    pub fn blink_off(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.update_control(cmd::BLINK_ON, false)
    }

    /// Turn the backlight on
    ///
    /// Works before `init`: the bit is stored and pushed out with an
    /// otherwise empty expander write.
    pub fn backlight_on(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.set_backlight(true)
    }

    pub fn backlight_off(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.set_backlight(false)
    }

    /// Store a 5x8 glyph in CGRAM slot `location`
    ///
    /// Only the low five bits of each row are used. The cursor is put back
    /// where it was afterwards.
    pub fn create_char(
        &mut self,
        location: u8,
        bitmap: &[u8; 8],
    ) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        if location >= CGRAM_SLOTS {
            return Err(LcdError::InvalidLocation);
        }

        self.send(cmd::SET_CGRAM_ADDR | (location << 3), Mode::Command)?;
        for &row in bitmap {
            self.send(row & 0x1F, Mode::Data)?;
        }
        self.send(cmd::SET_DDRAM_ADDR | self.cursor, Mode::Command)
    }

    /// Tracked DDRAM address of the cursor
    pub fn address(&self) -> u8 {
        self.cursor
    }

    pub fn is_backlight_on(&self) -> bool {
        self.backlight
    }

    pub fn state(&self) -> LcdState {
        self.state
    }

    fn ensure_ready(&self) -> Result<(), LcdError<I2C::Error>> {
        if self.state == LcdState::Ready {
            Ok(())
        } else {
            Err(LcdError::NotInitialized)
        }
    }

    fn update_control(&mut self, flag: u8, on: bool) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        if on {
            self.display_control |= flag;
        } else {
            self.display_control &= !flag;
        }
        self.send(cmd::DISPLAY_CONTROL | self.display_control, Mode::Command)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), LcdError<I2C::Error>> {
        self.backlight = on;
        self.expander_write(pcf8574::frame(0, Mode::Command, false, on))
    }

    /// Send a full byte as two nibbles
    fn send(&mut self, byte: u8, mode: Mode) -> Result<(), LcdError<I2C::Error>> {
        let [high, low] = pcf8574::nibbles(byte);
        self.write_nibble(high, mode)?;
        self.write_nibble(low, mode)
    }

    /// Strobe one nibble into the controller
    fn write_nibble(&mut self, nibble: u8, mode: Mode) -> Result<(), LcdError<I2C::Error>> {
        self.expander_write(pcf8574::frame(nibble, mode, true, self.backlight))?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.expander_write(pcf8574::frame(nibble, mode, false, self.backlight))?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    fn expander_write(&mut self, byte: u8) -> Result<(), LcdError<I2C::Error>> {
        self.i2c.write(self.address, &[byte]).map_err(LcdError::Bus)
    }
}

/// Address counter after one data write
///
/// In 2-line mode the counter skips the unmapped gap between the lines
/// and wraps from the end of the second line back to the start.
fn advance(address: u8) -> u8 {
    match address {
        LINE1_END => LINE2_START,
        LINE2_END => 0,
        _ => address.wrapping_add(1) & 0x7F,
    }
}

fn printable(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        _ => b'?',
    }
}

impl<I2C, D> CharacterDisplay for Hd44780<I2C, D>
where
    I2C: I2cBus,
    D: DelayUs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        Hd44780::clear(self).map_err(DisplayError::from)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        Hd44780::set_cursor(self, col, row).map_err(DisplayError::from)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        Hd44780::print(self, text).map_err(DisplayError::from)
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.columns, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::pcf8574::{BACKLIGHT, EN, RS};
    use core::cell::RefCell;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Write(u8, u8),
        DelayUs(u32),
    }

    type Log = RefCell<Vec<Event>>;

    struct LogBus<'a> {
        log: &'a Log,
        fail: bool,
        /// Writes accepted before the bus starts failing
        fail_after: Option<usize>,
        writes: usize,
    }

    impl<'a> LogBus<'a> {
        fn new(log: &'a Log) -> Self {
            Self {
                log,
                fail: false,
                fail_after: None,
                writes: 0,
            }
        }
    }

    impl I2cBus for LogBus<'_> {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail || self.fail_after.is_some_and(|limit| self.writes >= limit) {
                return Err(());
            }
            self.writes += 1;
            for &byte in data {
                self.log.borrow_mut().push(Event::Write(address, byte));
            }
            Ok(())
        }
    }

    struct LogDelay<'a> {
        log: &'a Log,
    }

    impl DelayUs for LogDelay<'_> {
        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us));
        }
    }

    fn lcd(log: &Log) -> Hd44780<LogBus<'_>, LogDelay<'_>> {
        Hd44780::new(
            LogBus::new(log),
            LogDelay { log },
            DEFAULT_ADDRESS,
            20,
            4,
        )
    }

    fn ready(log: &Log) -> Hd44780<LogBus<'_>, LogDelay<'_>> {
        let mut lcd = lcd(log);
        lcd.init().unwrap();
        log.borrow_mut().clear();
        lcd
    }

    /// Expected events for one nibble with the backlight on
    fn nibble(nibble: u8, rs: u8, out: &mut Vec<Event>) {
        out.push(Event::Write(DEFAULT_ADDRESS, nibble | rs | EN | BACKLIGHT));
        out.push(Event::DelayUs(1));
        out.push(Event::Write(DEFAULT_ADDRESS, nibble | rs | BACKLIGHT));
        out.push(Event::DelayUs(50));
    }

    fn byte(value: u8, rs: u8, out: &mut Vec<Event>) {
        nibble(value & 0xF0, rs, out);
        nibble(value << 4, rs, out);
    }

    /// Reassemble (rs, byte) pairs from the enable-high frames
    fn decode(log: &Log) -> Vec<(bool, u8)> {
        let strobes: Vec<u8> = log
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Write(_, frame) if frame & EN != 0 => Some(frame),
                _ => None,
            })
            .collect();
        strobes
            .chunks(2)
            .map(|pair| (pair[0] & RS != 0, (pair[0] & 0xF0) | (pair[1] >> 4)))
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let log = Log::default();
        let mut lcd = lcd(&log);
        assert_eq!(lcd.state(), LcdState::Uninitialized);

        lcd.init().unwrap();

        let mut expected = vec![Event::DelayUs(50_000)];
        nibble(0x30, 0, &mut expected);
        expected.push(Event::DelayUs(5_000));
        nibble(0x30, 0, &mut expected);
        expected.push(Event::DelayUs(5_000));
        nibble(0x30, 0, &mut expected);
        expected.push(Event::DelayUs(150));
        nibble(0x20, 0, &mut expected);
        byte(0x28, 0, &mut expected);
        byte(0x0C, 0, &mut expected);
        byte(0x01, 0, &mut expected);
        expected.push(Event::DelayUs(2_000));
        byte(0x06, 0, &mut expected);
        byte(0x02, 0, &mut expected);
        expected.push(Event::DelayUs(2_000));

        assert_eq!(*log.borrow(), expected);
        assert_eq!(lcd.state(), LcdState::Ready);
        assert_eq!(lcd.address(), 0);
    }

    #[test]
    fn test_not_initialized_rejected() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        assert_eq!(lcd.clear(), Err(LcdError::NotInitialized));
        assert_eq!(lcd.print("hi"), Err(LcdError::NotInitialized));
        assert_eq!(lcd.set_cursor(0, 0), Err(LcdError::NotInitialized));
        assert_eq!(lcd.display_off(), Err(LcdError::NotInitialized));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_bus_failure_leaves_uninitialized() {
        let log = Log::default();
        let mut lcd = Hd44780::new(
            LogBus {
                fail: true,
                ..LogBus::new(&log)
            },
            LogDelay { log: &log },
            DEFAULT_ADDRESS,
            20,
            4,
        );

        assert_eq!(lcd.init(), Err(LcdError::Bus(())));
        assert_eq!(lcd.state(), LcdState::Uninitialized);
    }

    #[test]
    fn test_bus_failure_after_mode_switch() {
        let log = Log::default();
        // Four reset/mode nibbles are two writes each
        let mut lcd = Hd44780::new(
            LogBus {
                fail_after: Some(8),
                ..LogBus::new(&log)
            },
            LogDelay { log: &log },
            DEFAULT_ADDRESS,
            20,
            4,
        );

        assert_eq!(lcd.init(), Err(LcdError::Bus(())));
        assert_eq!(lcd.state(), LcdState::FourBitMode);
        assert_eq!(lcd.clear(), Err(LcdError::NotInitialized));
        assert_eq!(lcd.print("x"), Err(LcdError::NotInitialized));
    }

    #[test]
    fn test_address_skips_line_gap() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.set_cursor(19, 2).unwrap();
        assert_eq!(lcd.address(), 0x27);
        lcd.write_char(b'x').unwrap();
        assert_eq!(lcd.address(), 0x40);

        lcd.set_cursor(19, 3).unwrap();
        assert_eq!(lcd.address(), 0x67);
        lcd.write_char(b'x').unwrap();
        assert_eq!(lcd.address(), 0x00);
    }

    #[test]
    fn test_create_char_restores_wrapped_address() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.set_cursor(19, 2).unwrap();
        lcd.write_char(b'x').unwrap();
        log.borrow_mut().clear();

        lcd.create_char(0, &[0x1F; 8]).unwrap();
        assert_eq!(decode(&log).last(), Some(&(false, 0x80 | 0x40)));
    }

    #[test]
    fn test_print_sends_data_bytes() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.print("A").unwrap();

        let mut expected = Vec::new();
        byte(b'A', RS, &mut expected);
        assert_eq!(*log.borrow(), expected);
        assert_eq!(lcd.address(), 1);
    }

    #[test]
    fn test_non_ascii_replaced() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.print("a\u{e9}\n").unwrap();
        assert_eq!(decode(&log), vec![(true, b'a'), (true, b'?'), (true, b'?')]);
    }

    #[test]
    fn test_backlight_persists_in_later_writes() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.backlight_off().unwrap();
        assert_eq!(*log.borrow(), vec![Event::Write(DEFAULT_ADDRESS, 0x00)]);
        assert!(!lcd.is_backlight_on());

        log.borrow_mut().clear();
        lcd.write_char(b'Z').unwrap();
        assert!(log.borrow().iter().all(|event| match *event {
            Event::Write(_, frame) => frame & BACKLIGHT == 0,
            Event::DelayUs(_) => true,
        }));

        log.borrow_mut().clear();
        lcd.backlight_on().unwrap();
        assert_eq!(*log.borrow(), vec![Event::Write(DEFAULT_ADDRESS, BACKLIGHT)]);
    }

    #[test]
    fn test_backlight_before_init() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        lcd.backlight_off().unwrap();
        assert_eq!(*log.borrow(), vec![Event::Write(DEFAULT_ADDRESS, 0x00)]);
        assert_eq!(lcd.state(), LcdState::Uninitialized);
    }

    #[test]
    fn test_display_control_flags() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.cursor_on().unwrap();
        lcd.blink_on().unwrap();
        lcd.display_off().unwrap();
        lcd.display_on().unwrap();
        lcd.cursor_off().unwrap();
        lcd.blink_off().unwrap();

        let commands: Vec<u8> = decode(&log).into_iter().map(|(_, b)| b).collect();
        assert_eq!(commands, vec![0x0E, 0x0F, 0x0B, 0x0F, 0x0D, 0x0C]);
    }

    #[test]
    fn test_clear_and_home_reset_address() {
        let log = Log::default();
        let mut lcd = ready(&log);

        lcd.set_cursor(3, 1).unwrap();
        lcd.clear().unwrap();
        assert_eq!(lcd.address(), 0);

        lcd.set_cursor(7, 2).unwrap();
        lcd.home().unwrap();
        assert_eq!(lcd.address(), 0);

        let events = log.borrow();
        assert_eq!(
            events.iter().filter(|e| **e == Event::DelayUs(2_000)).count(),
            2
        );
    }

    #[test]
    fn test_create_char() {
        let log = Log::default();
        let mut lcd = ready(&log);
        lcd.set_cursor(2, 1).unwrap();
        log.borrow_mut().clear();

        let heart = [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0xFF];
        lcd.create_char(3, &heart).unwrap();

        let sent = decode(&log);
        assert_eq!(sent[0], (false, 0x40 | (3 << 3)));
        assert_eq!(sent[8], (true, 0x1F));
        assert_eq!(sent[9], (false, 0x80 | 0x42));
        assert_eq!(lcd.address(), 0x42);

        assert_eq!(lcd.create_char(8, &heart), Err(LcdError::InvalidLocation));
    }

    #[test]
    fn test_dimensions_and_trait() {
        let log = Log::default();
        let mut lcd = ready(&log);

        assert_eq!(CharacterDisplay::dimensions(&lcd), (20, 4));
        CharacterDisplay::print_at(&mut lcd, 5, 2, "Y").unwrap();
        assert_eq!(decode(&log), vec![(false, 0x80 | 0x19), (true, b'Y')]);
    }

    #[test]
    fn test_two_row_module_clamps() {
        let log = Log::default();
        let mut lcd = Hd44780::new(
            LogBus::new(&log),
            LogDelay { log: &log },
            0x3F,
            16,
            2,
        );
        lcd.init().unwrap();

        lcd.set_cursor(0, 3).unwrap();
        assert_eq!(lcd.address(), 0x40);
        assert!(log
            .borrow()
            .iter()
            .all(|event| !matches!(event, Event::Write(addr, _) if *addr != 0x3F)));
    }

    proptest! {
        #[test]
        fn prop_cursor_address(col in 0u8..20, row in 0u8..8) {
            let log = Log::default();
            let mut lcd = ready(&log);

            lcd.set_cursor(col, row).unwrap();

            let expected = col + ROW_OFFSETS[row.min(3) as usize];
            prop_assert_eq!(lcd.address(), expected);
            prop_assert_eq!(decode(&log), vec![(false, 0x80 | expected)]);
        }
    }
}
