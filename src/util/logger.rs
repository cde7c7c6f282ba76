use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub fn init(logger: Logger) -> Result<(), SetLoggerError> {
    let max_level = if logger.log_cells { LevelFilter::Debug } else { LevelFilter::Info };
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(max_level))
}

pub struct Logger {
    pub log_cells: bool,
    pub log_tables: bool,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match metadata.target() {
            "" => true,
            "cells" => self.log_cells,
            "tables" => self.log_tables,
            target => {
                let chunks: Vec<&str> = target.split("::").collect();
                match chunks[..] {
                    ["opcode_tables", ..] => true,
                    _ => false,
                }
            }
        }
    }

    // Stdout carries the JSON or markup output, so everything logged goes to stderr.
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() < Level::Info {
                eprint!("{} - ", record.level());
            }

            eprintln!("{}", record.args());
        }
    }

    fn flush(&self) {}
}
