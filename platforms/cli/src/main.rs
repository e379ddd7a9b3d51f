use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tursim::{MachineCatalog, MachineStore, Step, TuringMachine, TuringMachineError};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine document to execute
    #[clap(short, long, conflicts_with = "machine")]
    program: Option<String>,

    /// Run an embedded sample machine by name
    #[clap(short, long)]
    machine: Option<String>,

    /// Replace the input tape before running
    #[clap(short, long)]
    tape: Option<String>,

    /// Print the machine after every step
    #[clap(short = 'd', long)]
    debug: bool,

    /// List the embedded sample machines and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        for name in MachineCatalog::names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let mut machine = match load_machine(&cli) {
        Ok(machine) => machine,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(tape) = &cli.tape {
        machine.set_tape(tape.chars().collect());
    }

    let result = if cli.debug {
        run_verbose(&mut machine)
    } else {
        machine.run()
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    println!("{}", machine.tape().iter().collect::<String>());
    println!("state: {}, steps: {}", machine.state(), machine.step_count());
    ExitCode::SUCCESS
}

fn load_machine(cli: &Cli) -> Result<TuringMachine, String> {
    match (&cli.program, &cli.machine) {
        (Some(path), None) => {
            MachineStore::load(Path::new(path)).map_err(|e| e.to_string())
        }
        (None, Some(name)) => MachineCatalog::get(name)
            .ok_or_else(|| format!("no embedded machine named {name:?}")),
        _ => Err("pass exactly one of --program or --machine".to_string()),
    }
}

fn run_verbose(machine: &mut TuringMachine) -> Result<(), TuringMachineError> {
    print_state(machine);

    loop {
        match machine.step()? {
            Step::Continue => print_state(machine),
            Step::Halted => {
                print_state(machine);
                println!("\nMachine halted.");
                return Ok(());
            }
        }
    }
}

fn print_state(machine: &TuringMachine) {
    println!(
        "step: {}, state: {}, head: {}, tape: {}",
        machine.step_count(),
        machine.state(),
        machine.head(),
        machine.tape().iter().collect::<String>()
    );
}
