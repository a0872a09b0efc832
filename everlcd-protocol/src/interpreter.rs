//! Command interpreter
//!
//! A strict byte-at-a-time state machine. Each byte moves the interpreter
//! to exactly one next state and yields at most one [`Action`]. Partially
//! received commands are remembered inside the [`State`] variant, so the
//! interpreter is a plain value with no hidden globals.

use crate::opcode;

/// Interpreter states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Between commands
    #[default]
    Idle,
    /// After 0x02, waiting for the byte to echo
    AwaitingEcho,
    /// After 0x01, waiting for the byte to write
    AwaitingWrite,
    /// After 0x03, waiting for the address LSB
    AwaitingAddressLo,
    /// Waiting for the address MSB
    AwaitingAddressHi { lo: u8 },
    /// After 0x06
    AwaitingMode,
    /// After 0x07
    AwaitingDisplay,
    /// After 0x08
    AwaitingCursor,
    /// After 0x09, waiting for the byte count
    AwaitingBulkCount,
    /// Inside a bulk transfer; `remaining` is 1-256
    AwaitingBulkByte { remaining: u16 },
    /// After 0x0A, waiting for the column
    AwaitingCursorX,
    /// Waiting for the row
    AwaitingCursorY { x: u8 },
}

impl State {
    /// Check whether a multi-byte command is in progress
    pub fn is_partial(&self) -> bool {
        !matches!(self, State::Idle)
    }
}

/// Controller operation requested by a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Write a byte at the address pointer and advance it
    Write(u8),
    /// Send a byte back to the host unchanged
    Echo(u8),
    /// Set the address pointer
    SetAddress(u16),
    /// Read the byte at the address pointer, advance it, send it back
    ReadData,
    /// Re-initialize the controller and clear RAM
    Reset,
    /// Mode set; bits already masked to [`opcode::MODE_MASK`]
    SetMode(u8),
    /// Display mode; bits already masked to [`opcode::DISPLAY_MASK`]
    SetDisplay(u8),
    /// Cursor pattern; bits already masked to [`opcode::CURSOR_MASK`]
    SetCursorPattern(u8),
    /// Enter auto-write mode
    BeginBulk,
    /// Auto-write one byte; `last` closes auto mode afterwards
    BulkWrite { byte: u8, last: bool },
    /// Cursor position
    MoveCursor { x: u8, y: u8 },
}

/// Consume one byte
///
/// This is the whole protocol: the next state and the requested action are
/// a function of the current state and the byte alone.
pub fn step(state: State, byte: u8) -> (State, Option<Action>) {
    use State::*;

    match state {
        Idle => idle(byte),

        AwaitingWrite => (Idle, Some(Action::Write(byte))),
        AwaitingEcho => (Idle, Some(Action::Echo(byte))),

        AwaitingAddressLo => (AwaitingAddressHi { lo: byte }, None),
        AwaitingAddressHi { lo } => (
            Idle,
            Some(Action::SetAddress(u16::from_le_bytes([lo, byte]))),
        ),

        AwaitingMode => (Idle, Some(Action::SetMode(byte & opcode::MODE_MASK))),
        AwaitingDisplay => (
            Idle,
            Some(Action::SetDisplay(byte & opcode::DISPLAY_MASK)),
        ),
        AwaitingCursor => (
            Idle,
            Some(Action::SetCursorPattern(byte & opcode::CURSOR_MASK)),
        ),

        AwaitingBulkCount => {
            let remaining = if byte == 0 {
                opcode::MAX_BULK as u16
            } else {
                byte as u16
            };
            (AwaitingBulkByte { remaining }, None)
        }
        AwaitingBulkByte { remaining } => {
            let last = remaining <= 1;
            let next = if last {
                Idle
            } else {
                AwaitingBulkByte {
                    remaining: remaining - 1,
                }
            };
            (next, Some(Action::BulkWrite { byte, last }))
        }

        AwaitingCursorX => (AwaitingCursorY { x: byte }, None),
        AwaitingCursorY { x } => (Idle, Some(Action::MoveCursor { x, y: byte })),
    }
}

fn idle(byte: u8) -> (State, Option<Action>) {
    use State::*;

    if byte >= opcode::TEXT_BASE {
        return (Idle, Some(Action::Write(byte - opcode::TEXT_BASE)));
    }

    match byte {
        opcode::WRITE => (AwaitingWrite, None),
        opcode::ECHO => (AwaitingEcho, None),
        opcode::ADDRESS => (AwaitingAddressLo, None),
        opcode::READ => (Idle, Some(Action::ReadData)),
        opcode::RESET => (Idle, Some(Action::Reset)),
        opcode::MODE => (AwaitingMode, None),
        opcode::DISPLAY => (AwaitingDisplay, None),
        opcode::CURSOR => (AwaitingCursor, None),
        opcode::BULK => (AwaitingBulkCount, Some(Action::BeginBulk)),
        opcode::CURSOR_POS => (AwaitingCursorX, None),
        // 0x00 and 0x0B..=0x1F
        _ => (Idle, None),
    }
}

/// Interpreter holding its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interpreter {
    state: State,
}

impl Interpreter {
    /// Create an interpreter in the idle state
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Feed one byte, returning the action it completes (if any)
    pub fn feed(&mut self, byte: u8) -> Option<Action> {
        let (next, action) = step(self.state, byte);
        self.state = next;
        action
    }

    /// Drop any partially received command
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Check whether the interpreter is between commands
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec;
    use std::vec::Vec;

    fn run(bytes: &[u8]) -> (Interpreter, Vec<Action>) {
        let mut interp = Interpreter::new();
        let actions = bytes.iter().filter_map(|&b| interp.feed(b)).collect();
        (interp, actions)
    }

    #[test]
    fn test_text_is_offset() {
        let (interp, actions) = run(b"Hi");
        assert_eq!(actions, [Action::Write(0x28), Action::Write(0x49)]);
        assert!(interp.is_idle());
    }

    #[test]
    fn test_space_is_text() {
        let (_, actions) = run(&[0x20, 0xFF]);
        assert_eq!(actions, [Action::Write(0x00), Action::Write(0xDF)]);
    }

    #[test]
    fn test_write_verbatim() {
        let (interp, actions) = run(&[opcode::WRITE, 0x03]);
        assert_eq!(actions, [Action::Write(0x03)]);
        assert!(interp.is_idle());
    }

    #[test]
    fn test_echo() {
        let (interp, actions) = run(&[opcode::ECHO, 0x05]);
        assert_eq!(actions, [Action::Echo(0x05)]);
        assert!(interp.is_idle());
    }

    #[test]
    fn test_set_address() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.feed(opcode::ADDRESS), None);
        assert_eq!(interp.state(), State::AwaitingAddressLo);
        assert_eq!(interp.feed(0x40), None);
        assert_eq!(interp.state(), State::AwaitingAddressHi { lo: 0x40 });
        assert_eq!(interp.feed(0x01), Some(Action::SetAddress(0x0140)));
        assert!(interp.is_idle());
    }

    #[test]
    fn test_single_byte_commands() {
        let (interp, actions) = run(&[opcode::READ, opcode::RESET]);
        assert_eq!(actions, [Action::ReadData, Action::Reset]);
        assert!(interp.is_idle());
    }

    #[test]
    fn test_masks() {
        let (_, actions) = run(&[
            opcode::MODE,
            0xFF,
            opcode::DISPLAY,
            0b0000_1010,
            opcode::CURSOR,
            0xF3,
        ]);
        assert_eq!(
            actions,
            [
                Action::SetMode(0x07),
                Action::SetDisplay(0x0A),
                Action::SetCursorPattern(0x03)
            ]
        );
    }

    #[test]
    fn test_cursor_position() {
        let (interp, actions) = run(&[opcode::CURSOR_POS, 0x05, 0x03]);
        assert_eq!(actions, [Action::MoveCursor { x: 5, y: 3 }]);
        assert!(interp.is_idle());
    }

    #[test]
    fn test_bulk_transfer() {
        let (interp, actions) = run(&[opcode::BULK, 3, 0x00, 0x01, 0x02]);
        assert_eq!(
            actions,
            [
                Action::BeginBulk,
                Action::BulkWrite { byte: 0x00, last: false },
                Action::BulkWrite { byte: 0x01, last: false },
                Action::BulkWrite { byte: 0x02, last: true },
            ]
        );
        assert!(interp.is_idle());
    }

    #[test]
    fn test_bulk_zero_means_256() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.feed(opcode::BULK), Some(Action::BeginBulk));
        assert_eq!(interp.feed(0), None);
        assert_eq!(interp.state(), State::AwaitingBulkByte { remaining: 256 });

        for i in 0..255u16 {
            assert_eq!(
                interp.feed(0x05),
                Some(Action::BulkWrite { byte: 0x05, last: false }),
                "byte {}",
                i
            );
            assert!(!interp.is_idle());
        }
        assert_eq!(
            interp.feed(0x05),
            Some(Action::BulkWrite { byte: 0x05, last: true })
        );
        assert!(interp.is_idle());
    }

    #[test]
    fn test_bulk_payload_is_not_interpreted() {
        // Command prefixes inside a bulk transfer are plain data
        let (interp, actions) = run(&[opcode::BULK, 2, opcode::RESET, opcode::BULK]);
        assert_eq!(
            actions,
            [
                Action::BeginBulk,
                Action::BulkWrite { byte: opcode::RESET, last: false },
                Action::BulkWrite { byte: opcode::BULK, last: true },
            ]
        );
        assert!(interp.is_idle());
    }

    #[test]
    fn test_ignored_control_bytes() {
        let mut bytes = Vec::new();
        bytes.push(opcode::NOP);
        bytes.extend(0x0Bu8..0x20);
        let (interp, actions) = run(&bytes);
        assert!(actions.is_empty());
        assert!(interp.is_idle());
    }

    #[test]
    fn test_reset_drops_partial_command() {
        let mut interp = Interpreter::new();
        interp.feed(opcode::ADDRESS);
        interp.feed(0x12);
        assert!(interp.state().is_partial());

        interp.reset();
        assert!(interp.is_idle());
        assert_eq!(interp.feed(b'A'), Some(Action::Write(0x21)));
    }

    #[test]
    fn test_reset_byte_is_argument_when_pending() {
        // 0x05 only means reset between commands
        let (interp, actions) = run(&[opcode::WRITE, opcode::RESET]);
        assert_eq!(actions, [Action::Write(opcode::RESET)]);
        assert!(interp.is_idle());
    }

    fn any_state() -> impl Strategy<Value = State> {
        prop_oneof![
            Just(State::Idle),
            Just(State::AwaitingEcho),
            Just(State::AwaitingWrite),
            Just(State::AwaitingAddressLo),
            any::<u8>().prop_map(|lo| State::AwaitingAddressHi { lo }),
            Just(State::AwaitingMode),
            Just(State::AwaitingDisplay),
            Just(State::AwaitingCursor),
            Just(State::AwaitingBulkCount),
            (1u16..=256).prop_map(|remaining| State::AwaitingBulkByte { remaining }),
            Just(State::AwaitingCursorX),
            any::<u8>().prop_map(|x| State::AwaitingCursorY { x }),
        ]
    }

    proptest! {
        #[test]
        fn prop_idle_text_writes_offset(byte in 0x20u8..=0xFF) {
            let (next, action) = step(State::Idle, byte);
            prop_assert_eq!(next, State::Idle);
            prop_assert_eq!(action, Some(Action::Write(byte - 0x20)));
        }

        #[test]
        fn prop_address_roundtrip(addr in any::<u16>()) {
            let [lo, hi] = addr.to_le_bytes();
            let (interp, actions) = run(&[opcode::ADDRESS, lo, hi]);
            prop_assert_eq!(actions, std::vec![Action::SetAddress(addr)]);
            prop_assert!(interp.is_idle());
        }

        #[test]
        fn prop_bulk_returns_to_idle_after_n(n in 1usize..=256, fill in any::<u8>()) {
            let mut bytes = std::vec![opcode::BULK, n as u8];
            bytes.extend(core::iter::repeat(fill).take(n));
            let (interp, actions) = run(&bytes);

            prop_assert!(interp.is_idle());
            prop_assert_eq!(actions.len(), n + 1);
            let writes = actions
                .iter()
                .filter(|a| matches!(a, Action::BulkWrite { .. }))
                .count();
            prop_assert_eq!(writes, n);
            prop_assert_eq!(
                actions.last().copied(),
                Some(Action::BulkWrite { byte: fill, last: true })
            );
        }

        #[test]
        fn prop_arguments_are_masked(state in any_state(), byte in any::<u8>()) {
            match step(state, byte).1 {
                Some(Action::SetMode(bits)) => prop_assert_eq!(bits & !opcode::MODE_MASK, 0),
                Some(Action::SetDisplay(bits)) => prop_assert_eq!(bits & !opcode::DISPLAY_MASK, 0),
                Some(Action::SetCursorPattern(bits)) => prop_assert_eq!(bits & !opcode::CURSOR_MASK, 0),
                _ => {}
            }
        }

        #[test]
        fn prop_completed_commands_end_idle(state in any_state(), byte in any::<u8>()) {
            let (next, action) = step(state, byte);
            match action {
                Some(Action::BeginBulk) => prop_assert_eq!(next, State::AwaitingBulkCount),
                Some(Action::BulkWrite { last: false, .. }) => {
                    let is_bulk = matches!(next, State::AwaitingBulkByte { .. });
                    prop_assert!(is_bulk);
                }
                Some(_) => prop_assert_eq!(next, State::Idle),
                None => {}
            }
        }

        #[test]
        fn prop_any_stream_is_accepted(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut interp = Interpreter::new();
            for byte in bytes {
                let _ = interp.feed(byte);
            }
            // Within 257 filler bytes any pending command completes
            for _ in 0..257 {
                if interp.is_idle() {
                    break;
                }
                interp.feed(0x00);
            }
            prop_assert!(interp.is_idle());
        }
    }
}
