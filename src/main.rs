use std::fs;
use std::process::ExitCode;

use log::error;
use strum::IntoEnumIterator;
use structopt::StructOpt;

use opcode_tables::config::{Config, Mode, Opt};
use opcode_tables::error::Error;
use opcode_tables::extractor::extract_document;
use opcode_tables::normalizer::normalize_document;
use opcode_tables::opcode_table::TableKind;
use opcode_tables::table::document::Document;
use opcode_tables::util::logger;

fn main() -> ExitCode {
    let opt = Opt::from_args();
    if let Err(err) = logger::init(opt.logger()) {
        eprintln!("Failed to initialize logging. {err}");
        return ExitCode::FAILURE;
    }

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<(), Error> {
    let config = Config::new(opt)?;
    let mut document = Document::parse(config.markup())?;

    match config.mode() {
        Mode::Extract => {
            let tables = extract_document(&document, config.selectors(), config.format())?;
            for kind in TableKind::iter() {
                println!("{}", tables.get(kind).to_json()?);
            }
        }
        Mode::Simplify => {
            normalize_document(&mut document, config.selectors(), config.format())?;
            let markup = document.to_markup();
            match config.output_path() {
                Some(path) => fs::write(path, markup)?,
                None => print!("{markup}"),
            }
        }
    }

    Ok(())
}
