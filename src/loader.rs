//! This module provides the `MachineStore` struct, responsible for persisting
//! Turing Machine configurations: loading documents from files and strings,
//! saving the current machine, and discovering machine files in a directory.
//!
//! The persisted document is UTF-8 JSON with exactly two top-level fields:
//!
//! ```json
//! {
//!     "tape": ["0", "1", "_"],
//!     "states": {
//!         "q0": { "0": "1 q0 >", "_": "_ q0 !" }
//!     }
//! }
//! ```
//!
//! By convention the files carry a `.tur` extension.

use crate::machine::TuringMachine;
use crate::types::TuringMachineError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::fs;
use std::path::{Path, PathBuf};

/// The on-disk shape of a machine: the tape and the nested
/// state -> symbol -> instruction mapping.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    tape: Vec<String>,
    states: serde_json::Map<String, Value>,
}

/// `MachineStore` is a utility struct for persisting Turing Machine
/// configurations. Loading is atomic from the caller's perspective: either a
/// fully valid new machine is returned, or an error is, and the caller's
/// previous machine stays untouched.
pub struct MachineStore;

impl MachineStore {
    /// Loads a machine from the document at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` if the file was read and reconstructed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::DocumentError)` if the content is not a
    ///   valid machine document.
    /// * `Err(TuringMachineError::InvalidTransitionFormat)` if an instruction
    ///   string in the document does not parse.
    pub fn load(path: &Path) -> Result<TuringMachine, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::load_from_string(&content)
    }

    /// Loads a machine from document text.
    ///
    /// Useful for documents that are not stored in files, e.g. embedded
    /// samples or user input.
    pub fn load_from_string(content: &str) -> Result<TuringMachine, TuringMachineError> {
        let document: Document = serde_json::from_str(content)
            .map_err(|e| TuringMachineError::DocumentError(e.to_string()))?;

        Self::from_document(document)
    }

    /// Saves `machine`'s configuration to a document at `path`.
    pub fn save(path: &Path, machine: &TuringMachine) -> Result<(), TuringMachineError> {
        let content = Self::save_to_string(machine)?;

        fs::write(path, content).map_err(|e| {
            TuringMachineError::FileError(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// Renders `machine`'s configuration as document text.
    pub fn save_to_string(machine: &TuringMachine) -> Result<String, TuringMachineError> {
        serde_json::to_string_pretty(&Self::to_document(machine))
            .map_err(|e| TuringMachineError::DocumentError(e.to_string()))
    }

    /// Loads every `.tur` document in `directory`.
    ///
    /// Directories and files with other extensions are skipped. Each loaded
    /// file contributes its own `Result`, so one malformed document does not
    /// hide the others.
    pub fn load_all(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, TuringMachine), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.tur files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "tur") {
                    return None;
                }

                match Self::load(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }

    /// Reconstructs a machine from a document: the tape is set first, then
    /// every transition is added in document order. Any failure aborts the
    /// whole load with no partially-constructed machine escaping.
    fn from_document(document: Document) -> Result<TuringMachine, TuringMachineError> {
        let mut machine = TuringMachine::new();

        let tape = document
            .tape
            .iter()
            .map(|cell| single_char(cell, "tape"))
            .collect::<Result<Vec<_>, _>>()?;
        machine.set_tape(tape);

        for (state, row) in &document.states {
            let row = row.as_object().ok_or_else(|| {
                TuringMachineError::DocumentError(format!(
                    "state {state:?} is not a symbol-to-instruction mapping"
                ))
            })?;

            for (symbol, instruction) in row {
                let symbol = single_char(symbol, "symbol")?;
                let instruction = instruction.as_str().ok_or_else(|| {
                    TuringMachineError::DocumentError(format!(
                        "instruction for state {state:?} and symbol {symbol:?} is not a string"
                    ))
                })?;

                machine.add_transition(state, symbol, instruction)?;
            }
        }

        Ok(machine)
    }

    fn to_document(machine: &TuringMachine) -> Document {
        let mut states = serde_json::Map::new();

        for (state, row) in machine.table().rows() {
            let mut symbols: Vec<&char> = row.keys().collect();
            symbols.sort();

            let mut instructions = serde_json::Map::new();
            for symbol in symbols {
                instructions.insert(symbol.to_string(), Value::String(row[symbol].to_string()));
            }
            states.insert(state.to_string(), Value::Object(instructions));
        }

        Document {
            tape: machine.tape().iter().map(|c| c.to_string()).collect(),
            states,
        }
    }
}

/// Extracts the single character of a document entry, rejecting empty and
/// multi-character strings.
fn single_char(text: &str, field: &str) -> Result<char, TuringMachineError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TuringMachineError::DocumentError(format!(
            "{field} entry {text:?} is not a single character"
        ))),
    }
}
