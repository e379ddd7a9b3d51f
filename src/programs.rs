//! A small catalog of embedded sample machines, compiled in from the
//! `machines/` directory. Front ends use it to offer ready-to-run programs
//! without touching the filesystem.

use crate::loader::MachineStore;
use crate::machine::TuringMachine;

// Default embedded machines
const MACHINE_TEXTS: [(&str, &str); 3] = [
    ("bit-flipper", include_str!("../machines/bit-flipper.tur")),
    (
        "binary-increment",
        include_str!("../machines/binary-increment.tur"),
    ),
    ("zero-eraser", include_str!("../machines/zero-eraser.tur")),
];

lazy_static::lazy_static! {
    static ref MACHINES: Vec<(String, TuringMachine)> = MACHINE_TEXTS
        .iter()
        .filter_map(|(name, text)| match MachineStore::load_from_string(text) {
            Ok(machine) => Some((name.to_string(), machine)),
            Err(e) => {
                eprintln!("failed to load embedded machine {name}: {e}");
                None
            }
        })
        .collect();
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Get the number of embedded machines
    pub fn count() -> usize {
        MACHINES.len()
    }

    /// List the names of the embedded machines
    pub fn names() -> Vec<String> {
        MACHINES.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Get a fresh copy of an embedded machine by its name
    pub fn get(name: &str) -> Option<TuringMachine> {
        MACHINES
            .iter()
            .find(|(machine_name, _)| machine_name.as_str() == name)
            .map(|(_, machine)| machine.clone())
    }

    /// Get a fresh copy of an embedded machine by its index
    pub fn get_by_index(index: usize) -> Option<TuringMachine> {
        MACHINES.get(index).map(|(_, machine)| machine.clone())
    }

    /// Get the original document text of an embedded machine
    pub fn source(name: &str) -> Option<&'static str> {
        MACHINE_TEXTS
            .iter()
            .find(|(machine_name, _)| *machine_name == name)
            .map(|(_, text)| *text)
    }
}
