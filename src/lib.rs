//! This crate provides the core logic for a deterministic single-tape Turing
//! Machine simulator. It includes modules for the transition table, the
//! execution engine with bounded undo, persistence of machine configurations,
//! and a catalog of embedded sample machines.

pub mod loader;
pub mod machine;
pub mod programs;
pub mod table;
pub mod types;

/// Re-exports the `MachineStore` struct from the loader module.
pub use loader::MachineStore;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `MachineCatalog` struct from the programs module.
pub use programs::MachineCatalog;
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports various types related to Turing Machine definition and execution from the types module.
pub use types::{
    Direction, Snapshot, Step, Transition, TuringMachineError, Undo, BLANK_SYMBOL, INITIAL_STATE,
    MAX_HISTORY_LEN,
};
