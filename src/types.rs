//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including head directions, transition rules, machine snapshots, execution
//! results, and error types.

use thiserror::Error;

use std::fmt;

/// The reserved symbol denoting an empty tape cell. It is always a member of the
/// known-symbol set.
pub const BLANK_SYMBOL: char = '_';
/// The state every machine starts in.
pub const INITIAL_STATE: &str = "q0";
/// The maximum number of snapshots kept on the undo history. Older entries are
/// evicted first.
pub const MAX_HISTORY_LEN: usize = 1000;

/// Represents the possible directions a Turing Machine head can move.
///
/// `Halt` additionally signals termination; it shares `Stay`'s movement delta
/// but stops the machine after the current instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
    /// Keep the head in the same position and stop the machine.
    Halt,
}

impl Direction {
    /// Returns the head-movement delta for this direction.
    pub fn delta(&self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay | Direction::Halt => 0,
        }
    }

    /// Returns the canonical single-character token for this direction.
    pub fn token(&self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Right => '>',
            Direction::Stay => '.',
            Direction::Halt => '!',
        }
    }

    /// Parses a direction token.
    ///
    /// # Returns
    ///
    /// * `Ok(Direction)` for one of `<`, `>`, `.`, `!`.
    /// * `Err(TuringMachineError::InvalidDirectionToken)` for anything else.
    pub fn from_token(token: &str) -> Result<Self, TuringMachineError> {
        match token {
            "<" => Ok(Direction::Left),
            ">" => Ok(Direction::Right),
            "." => Ok(Direction::Stay),
            "!" => Ok(Direction::Halt),
            _ => Err(TuringMachineError::InvalidDirectionToken(
                token.to_string(),
            )),
        }
    }
}

/// Represents a single transition rule for a Turing Machine.
///
/// A transition defines the symbol to write, the state to enter, and the head
/// movement that follows, when the machine reads a specific symbol in a
/// specific state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The character written to the cell under the head.
    pub write_symbol: char,
    /// The next state the machine transitions to.
    pub next_state: String,
    /// The direction the head moves after the write.
    pub direction: Direction,
}

impl Transition {
    /// Parses the textual instruction form `"<write symbol> <next state> <direction>"`.
    ///
    /// The instruction must consist of exactly three whitespace-separated tokens,
    /// the write-symbol token must be a single character, and the direction token
    /// must be one of `<`, `>`, `.`, `!`.
    ///
    /// # Returns
    ///
    /// * `Ok(Transition)` on success.
    /// * `Err(TuringMachineError::MalformedInstruction)` on a wrong token count or
    ///   a multi-character write symbol.
    /// * `Err(TuringMachineError::InvalidDirectionToken)` on an unrecognized
    ///   direction token.
    pub fn parse(text: &str) -> Result<Self, TuringMachineError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let &[write, next_state, direction] = tokens.as_slice() else {
            return Err(TuringMachineError::MalformedInstruction(text.to_string()));
        };

        let mut chars = write.chars();
        let write_symbol = match (chars.next(), chars.next()) {
            (Some(symbol), None) => symbol,
            _ => return Err(TuringMachineError::MalformedInstruction(text.to_string())),
        };

        Ok(Self {
            write_symbol,
            next_state: next_state.to_string(),
            direction: Direction::from_token(direction)?,
        })
    }
}

impl fmt::Display for Transition {
    /// Renders the canonical 3-token instruction form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.write_symbol,
            self.next_state,
            self.direction.token()
        )
    }
}

/// An immutable capture of the machine at one instant: control state, head
/// position, tape contents, and step count.
///
/// Snapshots own an independent copy of the tape; they are used for the undo
/// history and for the explicitly saved tape moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The control state at capture time.
    pub state: String,
    /// The head position, an index into `tape`.
    pub head: usize,
    /// The tape contents at capture time.
    pub tape: Vec<char>,
    /// The number of steps executed up to capture time.
    pub step_count: usize,
}

/// Represents the outcome of a successful Turing Machine execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and can continue.
    Continue,
    /// The instruction's direction was `Halt`; the machine has stopped.
    Halted,
}

/// Represents the outcome of an undo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undo {
    /// The most recent history entry was restored.
    Restored,
    /// The history was empty. This is a normal boundary result, not a failure.
    EmptyHistory,
}

/// Represents various errors that can occur during Turing Machine operations.
///
/// Execution and instruction-parse failures carry the offending state, symbol,
/// or token so a front end can render a precise message. Persistence failures
/// (`FileError`, `DocumentError`) are reported distinctly so "bad file" can be
/// told apart from "bad program".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// An instruction used a direction token other than `<`, `>`, `.`, `!`.
    #[error("unknown direction token {0:?}: expected one of <, >, ., !")]
    InvalidDirectionToken(String),
    /// An instruction string did not have the shape
    /// `"<write symbol> <next state> <direction>"`.
    #[error("malformed instruction {0:?}: expected \"<write symbol> <next state> <direction>\"")]
    MalformedInstruction(String),
    /// A table edit was given an unparsable instruction for this state and symbol.
    #[error("invalid instruction for state {state:?} and symbol {symbol:?}")]
    InvalidTransitionFormat {
        /// The state whose table row was being edited.
        state: String,
        /// The read symbol the instruction was meant for.
        symbol: char,
    },
    /// The current state has no instruction for the symbol under the head.
    #[error("no instruction for symbol {0:?} in the current state")]
    NoTransitionFound(char),
    /// An instruction transitioned into a state absent from the table.
    #[error("transition into unknown state {0:?}")]
    InvalidNextState(String),
    /// A file could not be read or written.
    #[error("file error: {0}")]
    FileError(String),
    /// A persisted document was not a valid machine description.
    #[error("malformed machine document: {0}")]
    DocumentError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Left.delta(), -1);
        assert_eq!(Direction::Right.delta(), 1);
        assert_eq!(Direction::Stay.delta(), 0);
        assert_eq!(Direction::Halt.delta(), 0);
    }

    #[test]
    fn test_direction_tokens_round_trip() {
        for direction in [
            Direction::Left,
            Direction::Right,
            Direction::Stay,
            Direction::Halt,
        ] {
            let token = direction.token().to_string();
            assert_eq!(Direction::from_token(&token).unwrap(), direction);
        }
    }

    #[test]
    fn test_direction_from_unknown_token() {
        let result = Direction::from_token("R");
        assert_eq!(
            result,
            Err(TuringMachineError::InvalidDirectionToken("R".to_string()))
        );
    }

    #[test]
    fn test_transition_parse() {
        let transition = Transition::parse("1 q3 >").unwrap();

        assert_eq!(transition.write_symbol, '1');
        assert_eq!(transition.next_state, "q3");
        assert_eq!(transition.direction, Direction::Right);
    }

    #[test]
    fn test_transition_parse_tolerates_extra_whitespace() {
        let transition = Transition::parse("  a   loop  . ").unwrap();

        assert_eq!(transition.write_symbol, 'a');
        assert_eq!(transition.next_state, "loop");
        assert_eq!(transition.direction, Direction::Stay);
    }

    #[test]
    fn test_transition_round_trip_is_stable() {
        for text in ["1 q0 >", "_ q1 <", "x stop !", "  0  q2  .  "] {
            let parsed = Transition::parse(text).unwrap();
            let reparsed = Transition::parse(&parsed.to_string()).unwrap();
            assert_eq!(parsed, reparsed);
        }
    }

    #[test]
    fn test_transition_parse_wrong_token_count() {
        assert_eq!(
            Transition::parse("1 q0"),
            Err(TuringMachineError::MalformedInstruction("1 q0".to_string()))
        );
        assert_eq!(
            Transition::parse("1 q0 > extra"),
            Err(TuringMachineError::MalformedInstruction(
                "1 q0 > extra".to_string()
            ))
        );
        assert_eq!(
            Transition::parse(""),
            Err(TuringMachineError::MalformedInstruction(String::new()))
        );
    }

    #[test]
    fn test_transition_parse_multi_character_write_symbol() {
        assert_eq!(
            Transition::parse("10 q0 >"),
            Err(TuringMachineError::MalformedInstruction(
                "10 q0 >".to_string()
            ))
        );
    }

    #[test]
    fn test_transition_parse_unknown_direction() {
        assert_eq!(
            Transition::parse("1 q0 ?"),
            Err(TuringMachineError::InvalidDirectionToken("?".to_string()))
        );
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::InvalidNextState("q7".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("unknown state"));
        assert!(error_msg.contains("q7"));

        let error = TuringMachineError::InvalidTransitionFormat {
            state: "q1".to_string(),
            symbol: 'a',
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("q1"));
        assert!(error_msg.contains('a'));
    }
}
