use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(version, about = None, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Method listing to name variables for
    pub input_file: PathBuf,

    /// Output mode
    #[arg(value_enum)]
    #[arg(short, long)]
    #[arg(default_value_t = Mode::Names)]
    pub mode: Mode,

    /// Also rename method parameters
    #[arg(short = 'p', long)]
    pub rename_parameters: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Print the chosen variable names
    Names,

    /// Print every method's naming families after renaming
    Registry,
}
