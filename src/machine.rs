//! This module defines the `TuringMachine` struct, the execution engine of the
//! simulator. It owns the current state, the lazily-extending tape, the head
//! position, the step counter, a bounded undo history, and an optional saved
//! tape moment, and executes transition rules one step at a time.

use crate::table::TransitionTable;
use crate::types::{
    Direction, Snapshot, Step, TuringMachineError, Undo, BLANK_SYMBOL, INITIAL_STATE,
    MAX_HISTORY_LEN,
};

use std::collections::VecDeque;

/// A deterministic single-tape Turing Machine.
///
/// The machine starts in state `q0` with a one-cell blank tape, the head at
/// position 0, a step count of 0, an empty history, and no saved snapshot.
/// The tape is never empty and the head always stays within it; moving past
/// either end grows the tape by one blank cell.
///
/// The engine owns all of its state exclusively. Snapshots handed out through
/// [`snapshot`](Self::snapshot) are independent deep copies.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    state: String,
    table: TransitionTable,
    tape: Vec<char>,
    head: usize,
    step_count: usize,
    saved: Option<Snapshot>,
    history: VecDeque<Snapshot>,
}

impl TuringMachine {
    /// Creates a machine in its initial configuration.
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE.to_string(),
            table: TransitionTable::new(),
            tape: vec![BLANK_SYMBOL],
            head: 0,
            step_count: 0,
            saved: None,
            history: VecDeque::new(),
        }
    }

    /// Adds or replaces a transition in the table.
    ///
    /// Delegates to [`TransitionTable::add`]; the failure contract is the same.
    pub fn add_transition(
        &mut self,
        state: &str,
        symbol: char,
        instruction: &str,
    ) -> Result<(), TuringMachineError> {
        self.table.add(state, symbol, instruction)
    }

    /// Replaces the tape with the given symbols; an empty sequence becomes a
    /// single blank cell. Resets the current state to `q0` and the head to
    /// position 0. Does not touch the step count, the history, the table, or
    /// the saved snapshot.
    pub fn set_tape(&mut self, symbols: Vec<char>) {
        self.tape = if symbols.is_empty() {
            vec![BLANK_SYMBOL]
        } else {
            symbols
        };
        self.state = INITIAL_STATE.to_string();
        self.head = 0;
    }

    /// Executes exactly one instruction.
    ///
    /// On success the pre-step snapshot is pushed onto the history, the write
    /// symbol is committed, the machine enters the next state, and the step
    /// count is incremented. A `Halt` direction stops the machine without
    /// moving the head; any other direction moves the head, growing the tape
    /// by one blank cell when the head touches either end.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the machine can keep running.
    /// * `Ok(Step::Halted)` if the instruction's direction was `Halt`.
    /// * `Err(TuringMachineError::NoTransitionFound)` if the table has no
    ///   entry for the symbol under the head; the machine is unchanged.
    /// * `Err(TuringMachineError::InvalidNextState)` if the instruction names
    ///   an unknown state. The write has already been committed at that point
    ///   (see below) and the pre-step snapshot is on the history, so `undo`
    ///   recovers the machine.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        let symbol = self.tape[self.head];

        let transition = self
            .table
            .lookup(&self.state, symbol)
            .cloned()
            .ok_or(TuringMachineError::NoTransitionFound(symbol))?;

        self.push_history();

        // The write is committed before the next state is validated, so a
        // transition into an unknown state leaves its symbol on the tape.
        // Long-standing behavior that existing machines observe; likely a
        // latent defect rather than a guarantee, kept for compatibility.
        self.tape[self.head] = transition.write_symbol;

        if !self.table.contains_state(&transition.next_state) {
            return Err(TuringMachineError::InvalidNextState(
                transition.next_state,
            ));
        }
        self.state = transition.next_state;
        self.step_count += 1;

        if transition.direction == Direction::Halt {
            return Ok(Step::Halted);
        }

        self.move_head(transition.direction);
        Ok(Step::Continue)
    }

    /// Runs the machine until an instruction halts it.
    ///
    /// Any step failure propagates immediately, leaving the machine in
    /// whatever partial state [`step`](Self::step) left it.
    pub fn run(&mut self) -> Result<(), TuringMachineError> {
        while self.step()? == Step::Continue {}
        Ok(())
    }

    /// Rolls the machine back one step using the history.
    ///
    /// # Returns
    ///
    /// * `Undo::Restored` if a history entry was popped and restored.
    /// * `Undo::EmptyHistory` if there was nothing to undo.
    pub fn undo(&mut self) -> Undo {
        match self.history.pop_back() {
            Some(previous) => {
                self.restore_from(previous);
                Undo::Restored
            }
            None => Undo::EmptyHistory,
        }
    }

    /// Captures the current full state into the single saved-snapshot slot,
    /// overwriting any previous save. Independent of the undo history.
    pub fn save_snapshot(&mut self) {
        self.saved = Some(self.snapshot());
    }

    /// Restores the explicitly saved snapshot, if one exists.
    ///
    /// A no-op when nothing has been saved; call
    /// [`has_snapshot`](Self::has_snapshot) to distinguish beforehand.
    pub fn restore_snapshot(&mut self) {
        if let Some(saved) = self.saved.clone() {
            self.restore_from(saved);
        }
    }

    /// Checks whether a snapshot has been saved.
    pub fn has_snapshot(&self) -> bool {
        self.saved.is_some()
    }

    /// Returns an immutable full-state capture: current state, head position,
    /// tape copy, and step count. Never mutates the machine.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            head: self.head,
            tape: self.tape.clone(),
            step_count: self.step_count,
        }
    }

    /// Returns the current control state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the tape contents.
    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Returns the symbol under the head.
    pub fn current_symbol(&self) -> char {
        self.tape[self.head]
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns all known state names in the order they were first added.
    pub fn known_states(&self) -> &[String] {
        self.table.known_states()
    }

    /// Returns all known symbols, blank first, then ascending.
    pub fn known_symbols(&self) -> Vec<char> {
        self.table.known_symbols()
    }

    fn restore_from(&mut self, snapshot: Snapshot) {
        self.state = snapshot.state;
        self.head = snapshot.head;
        self.tape = snapshot.tape;
        self.step_count = snapshot.step_count;
    }

    fn push_history(&mut self) {
        self.history.push_back(self.snapshot());
        if self.history.len() > MAX_HISTORY_LEN {
            self.history.pop_front();
        }
    }

    fn move_head(&mut self, direction: Direction) {
        let target = self.head as isize + direction.delta();
        if target < 0 {
            // Touching the left boundary grows the tape by exactly one cell.
            self.tape.insert(0, BLANK_SYMBOL);
            self.head = 0;
        } else {
            self.head = target as usize;
            if self.head == self.tape.len() {
                self.tape.push(BLANK_SYMBOL);
            }
        }
    }
}

impl Default for TuringMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A machine that rewrites `0` to `1` moving right and halts on blank.
    fn flipper() -> TuringMachine {
        let mut machine = TuringMachine::new();
        machine.add_transition("q0", '0', "1 q0 >").unwrap();
        machine.add_transition("q0", '_', "_ q0 !").unwrap();
        machine
    }

    #[test]
    fn test_new_machine_initial_configuration() {
        let machine = TuringMachine::new();

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.tape(), &['_']);
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.current_symbol(), '_');
        assert!(!machine.has_snapshot());
        assert_eq!(machine.known_states(), &["q0".to_string()]);
    }

    #[test]
    fn test_set_tape_resets_state_and_head_only() {
        let mut machine = flipper();
        machine.step().unwrap();
        assert_eq!(machine.step_count(), 1);

        machine.set_tape(vec!['0', '1']);

        assert_eq!(machine.tape(), &['0', '1']);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 0);
        // Step count and history survive a tape replacement.
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.undo(), Undo::Restored);
    }

    #[test]
    fn test_set_tape_empty_becomes_single_blank() {
        let mut machine = TuringMachine::new();
        machine.set_tape(Vec::new());

        assert_eq!(machine.tape(), &['_']);
        assert_eq!(machine.head(), 0);
    }

    #[test]
    fn test_step_writes_and_moves_right() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', '0']);

        let result = machine.step().unwrap();

        assert_eq!(result, Step::Continue);
        assert_eq!(machine.tape(), &['1', '0']);
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_moving_right_past_the_end_appends_one_blank() {
        let mut machine = flipper();
        machine.set_tape(vec!['0']);

        machine.step().unwrap();

        assert_eq!(machine.tape(), &['1', '_']);
        assert_eq!(machine.head(), 1);
    }

    #[test]
    fn test_moving_left_from_zero_inserts_one_blank() {
        let mut machine = TuringMachine::new();
        machine.add_transition("q0", '0', "1 q0 <").unwrap();
        machine.set_tape(vec!['0', '0']);

        machine.step().unwrap();

        assert_eq!(machine.tape(), &['_', '1', '0']);
        assert_eq!(machine.head(), 0);
    }

    #[test]
    fn test_halt_increments_step_count_without_moving() {
        let mut machine = flipper();
        // Head sits on the blank cell of the initial tape.

        let result = machine.step().unwrap();

        assert_eq!(result, Step::Halted);
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.tape(), &['_']);
    }

    #[test]
    fn test_stay_keeps_head_in_place() {
        let mut machine = TuringMachine::new();
        machine.add_transition("q0", '_', "x q0 .").unwrap();

        let result = machine.step().unwrap();

        assert_eq!(result, Step::Continue);
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape(), &['x']);
    }

    #[test]
    fn test_step_without_transition_leaves_machine_untouched() {
        let mut machine = flipper();
        machine.set_tape(vec!['x']);

        let result = machine.step();

        assert_eq!(result, Err(TuringMachineError::NoTransitionFound('x')));
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.tape(), &['x']);
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        // No history entry was pushed for the failed step.
        assert_eq!(machine.undo(), Undo::EmptyHistory);
    }

    #[test]
    fn test_transition_into_unknown_state_keeps_the_write() {
        let mut machine = TuringMachine::new();
        machine.add_transition("q0", '0', "1 q9 >").unwrap();
        machine.set_tape(vec!['0']);

        let result = machine.step();

        assert_eq!(
            result,
            Err(TuringMachineError::InvalidNextState("q9".to_string()))
        );
        // The write was committed before the next state was validated.
        assert_eq!(machine.tape(), &['1']);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);

        // The pre-step snapshot made it onto the history, so the partial
        // write is recoverable.
        assert_eq!(machine.undo(), Undo::Restored);
        assert_eq!(machine.tape(), &['0']);
    }

    #[test]
    fn test_run_flips_tape_and_halts() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', '0']);

        machine.run().unwrap();

        assert_eq!(machine.tape(), &['1', '1', '_']);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 2);
        assert_eq!(machine.step_count(), 3);
    }

    #[test]
    fn test_run_propagates_step_failure() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', 'x']);

        let result = machine.run();

        assert_eq!(result, Err(TuringMachineError::NoTransitionFound('x')));
        // The successful first step stays applied.
        assert_eq!(machine.tape(), &['1', 'x']);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_step_then_undo_restores_exactly() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', '0']);
        let before = machine.snapshot();

        machine.step().unwrap();
        assert_eq!(machine.undo(), Undo::Restored);

        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn test_undo_on_fresh_machine_is_a_boundary_result() {
        let mut machine = TuringMachine::new();
        assert_eq!(machine.undo(), Undo::EmptyHistory);
    }

    #[test]
    fn test_history_is_capped_with_fifo_eviction() {
        let mut machine = TuringMachine::new();
        machine.add_transition("q0", '_', "_ q0 >").unwrap();

        for _ in 0..MAX_HISTORY_LEN + 5 {
            machine.step().unwrap();
        }
        assert_eq!(machine.step_count(), MAX_HISTORY_LEN + 5);

        let mut restored = 0;
        while machine.undo() == Undo::Restored {
            restored += 1;
        }

        // Only the most recent 1000 snapshots were recoverable; the five
        // oldest were evicted.
        assert_eq!(restored, MAX_HISTORY_LEN);
        assert_eq!(machine.step_count(), 5);
    }

    #[test]
    fn test_save_and_restore_snapshot_round_trip() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', '0', '0']);

        machine.step().unwrap();
        machine.save_snapshot();
        let saved = machine.snapshot();

        machine.step().unwrap();
        machine.step().unwrap();
        assert_ne!(machine.snapshot(), saved);

        machine.restore_snapshot();
        assert_eq!(machine.snapshot(), saved);
    }

    #[test]
    fn test_save_snapshot_overwrites_previous_save() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', '0']);

        machine.save_snapshot();
        machine.step().unwrap();
        machine.save_snapshot();
        let latest = machine.snapshot();

        machine.step().unwrap();
        machine.restore_snapshot();

        assert_eq!(machine.snapshot(), latest);
    }

    #[test]
    fn test_restore_without_save_is_a_no_op() {
        let mut machine = flipper();
        machine.set_tape(vec!['0']);
        machine.step().unwrap();
        let before = machine.snapshot();

        assert!(!machine.has_snapshot());
        machine.restore_snapshot();

        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn test_snapshot_is_an_independent_copy() {
        let mut machine = flipper();
        machine.set_tape(vec!['0', '0']);
        let snapshot = machine.snapshot();

        machine.step().unwrap();

        assert_eq!(snapshot.tape, vec!['0', '0']);
        assert_eq!(snapshot.head, 0);
        assert_eq!(snapshot.step_count, 0);
    }
}
