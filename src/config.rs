use std::fs;
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use crate::cycles::{CycleFormat, RAW_CLOCKS_PER_CYCLE};
use crate::error::Error;
use crate::opcode_table::TableSelectors;
use crate::util::logger::Logger;

pub struct Config {
    mode: Mode,
    markup: String,
    selectors: TableSelectors,
    format: CycleFormat,
    output_path: Option<PathBuf>,
}

impl Config {
    pub fn new(opt: &Opt) -> Result<Config, Error> {
        let (mode, input_path, output_path, simplified, tables) = match &opt.command {
            Command::Extract { input_path, simplified, tables } =>
                (Mode::Extract, input_path, None, *simplified, tables),
            Command::Simplify { input_path, output_path, tables } =>
                (Mode::Simplify, input_path, output_path.clone(), false, tables),
        };

        // Normalized tables have already been divided down.
        let divisor = tables.divisor
            .unwrap_or(if simplified { 1 } else { RAW_CLOCKS_PER_CYCLE });
        let format = CycleFormat::new(divisor, simplified, tables.strict)?;

        info!("Loading '{}'.", input_path.display());
        let markup = fs::read_to_string(input_path)?;

        Ok(Config {
            mode,
            markup,
            selectors: TableSelectors { base: tables.base_table, extended: tables.extended_table },
            format,
            output_path,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn selectors(&self) -> TableSelectors {
        self.selectors
    }

    pub fn format(&self) -> CycleFormat {
        self.format
    }

    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output_path.as_ref()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Extract,
    Simplify,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "opcode-tables", about = "Extracts instruction widths and cycle counts from opcode map tables.")]
pub struct Opt {
    #[structopt(subcommand)]
    pub command: Command,
}

impl Opt {
    pub fn logger(&self) -> Logger {
        let tables = match &self.command {
            Command::Extract { tables, .. } | Command::Simplify { tables, .. } => tables,
        };

        Logger { log_cells: tables.log_cells, log_tables: tables.log_tables }
    }
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Prints each opcode map as one line of JSON.
    Extract {
        #[structopt(name = "INPUT", parse(from_os_str))]
        input_path: PathBuf,

        /// The tables were already rewritten by `simplify`.
        #[structopt(long)]
        simplified: bool,

        #[structopt(flatten)]
        tables: TableOpt,
    },
    /// Rewrites every cycle count into canonical low/high instruction cycles.
    Simplify {
        #[structopt(name = "INPUT", parse(from_os_str))]
        input_path: PathBuf,

        #[structopt(short, long = "output", parse(from_os_str))]
        output_path: Option<PathBuf>,

        #[structopt(flatten)]
        tables: TableOpt,
    },
}

#[derive(Debug, StructOpt)]
pub struct TableOpt {
    /// Clocks per cycle. Defaults to 4, or 1 for simplified tables.
    #[structopt(long)]
    pub divisor: Option<u16>,

    /// Reject cycle counts the divisor doesn't divide evenly.
    #[structopt(long)]
    pub strict: bool,

    #[structopt(long, default_value = "1")]
    pub base_table: usize,

    #[structopt(long, default_value = "2")]
    pub extended_table: usize,

    #[structopt(long)]
    pub log_cells: bool,

    #[structopt(long)]
    pub log_tables: bool,
}
