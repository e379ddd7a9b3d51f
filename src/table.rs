//! This module defines the `TransitionTable`, the mapping from (state, read symbol)
//! to a transition rule. The table has no behavior of its own beyond lookup and
//! bookkeeping of the known states and symbols; execution is the engine's job.

use crate::types::{Transition, TuringMachineError, BLANK_SYMBOL, INITIAL_STATE};

use std::collections::{hash_map::Entry, BTreeSet, HashMap};

/// The transition table of a Turing Machine: `state -> read symbol -> Transition`.
///
/// The order in which state names were first added is observable through
/// [`known_states`](Self::known_states), so an explicit order vector is kept
/// beside the lookup map. Absence of an entry is not an error at this level;
/// the execution engine interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    rules: HashMap<String, HashMap<char, Transition>>,
    order: Vec<String>,
    symbols: BTreeSet<char>,
}

impl TransitionTable {
    /// Creates an empty table containing the initial state `q0` with no
    /// transitions, and the blank symbol as the only known symbol.
    pub fn new() -> Self {
        Self {
            rules: HashMap::from([(INITIAL_STATE.to_string(), HashMap::new())]),
            order: vec![INITIAL_STATE.to_string()],
            symbols: BTreeSet::from([BLANK_SYMBOL]),
        }
    }

    /// Parses `instruction` and inserts or overwrites the entry for
    /// `(state, symbol)`, creating the state row if it is new and adding
    /// `symbol` to the known symbols.
    ///
    /// Only the row's state becomes known here; the instruction's next state
    /// does not, and is validated at execution time instead.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the instruction was parsed and stored.
    /// * `Err(TuringMachineError::InvalidTransitionFormat)` naming `state` and
    ///   `symbol` on any parse failure; the table is left unchanged.
    pub fn add(
        &mut self,
        state: &str,
        symbol: char,
        instruction: &str,
    ) -> Result<(), TuringMachineError> {
        let transition = Transition::parse(instruction).map_err(|_| {
            TuringMachineError::InvalidTransitionFormat {
                state: state.to_string(),
                symbol,
            }
        })?;

        let row = match self.rules.entry(state.to_string()) {
            Entry::Vacant(entry) => {
                self.order.push(state.to_string());
                entry.insert(HashMap::new())
            }
            Entry::Occupied(entry) => entry.into_mut(),
        };
        row.insert(symbol, transition);
        self.symbols.insert(symbol);

        Ok(())
    }

    /// Returns the transition for `(state, symbol)`, or `None` if no
    /// instruction is defined for that pair.
    pub fn lookup(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.rules.get(state).and_then(|row| row.get(&symbol))
    }

    /// Checks whether `state` is a known state of the table.
    pub fn contains_state(&self, state: &str) -> bool {
        self.rules.contains_key(state)
    }

    /// Returns all known state names in the order they were first added.
    pub fn known_states(&self) -> &[String] {
        &self.order
    }

    /// Returns all known symbols: the blank symbol first, then the remaining
    /// symbols in ascending code-point order.
    pub fn known_symbols(&self) -> Vec<char> {
        let mut symbols = vec![BLANK_SYMBOL];
        symbols.extend(self.symbols.iter().copied().filter(|&s| s != BLANK_SYMBOL));
        symbols
    }

    /// Iterates the table rows in state-insertion order, for serialization.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &HashMap<char, Transition>)> {
        self.order.iter().map(|state| {
            let row = &self.rules[state];
            (state.as_str(), row)
        })
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}
