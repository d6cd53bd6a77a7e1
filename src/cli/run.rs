//! Dispatch to the command handler selected by the parsed arguments.
//!
//! With no subcommand, a scan runs with the top-level arguments.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, scan::scan},
};

pub fn run(Arguments { command, scan: args }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd.args),
        Some(Command::Init) => init(),
        None => scan(args),
    }
}
