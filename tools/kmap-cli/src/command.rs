// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::{eyre::bail, Result};
use kmap_min::{kmap::KMap, truth_table::TruthTable, LogicFunction};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Evaluate boolean expressions and minimize them with Karnaugh maps.
#[derive(Debug, Parser)]
#[clap(name = "kmap")]
pub struct KmapApp {
    /// Log more (-v for debug output, -vv for trace output)
    #[clap(long, short, parse(from_occurrences), global = true)]
    verbose: u64,

    #[clap(subcommand)]
    command: KmapCommand,
}

#[derive(Debug, Parser)]
pub enum KmapCommand {
    /// Print the truth table of an expression
    TruthTable {
        /// Expression over single-letter variables, e.g. "A and (B or not C)"
        expr: String,
    },
    /// Minimize an expression of 2 to 4 variables
    Minimize {
        /// Expression over single-letter variables, e.g. "A and (B or not C)"
        expr: String,
    },
    /// Minimize a truth table given as its output column
    Table {
        /// Outputs in row order as 0s and 1s, 4, 8 or 16 of them, e.g. "0110"
        outputs: String,
    },
}

impl KmapApp {
    pub fn exec(self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl KmapCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::TruthTable { expr } => {
                let function = LogicFunction::from_expression(&expr)?;
                print!("{}", function.truth_table());
                Ok(())
            }
            Self::Minimize { expr } => {
                let function = LogicFunction::from_expression(&expr)?;
                print_minimized(&function.kmap()?);
                Ok(())
            }
            Self::Table { outputs } => {
                let table = parse_outputs(&outputs)?;
                info!("minimizing {} rows", table.row_count());
                print!("{}", table);
                println!();
                print_minimized(&KMap::from_truth_table(&table)?);
                Ok(())
            }
        }
    }
}

fn parse_outputs(outputs: &str) -> Result<TruthTable> {
    if ![4, 8, 16].contains(&outputs.len()) {
        bail!(
            "expected 4, 8 or 16 outputs, found {} in {:?}",
            outputs.len(),
            outputs
        );
    }
    let bits = outputs
        .chars()
        .enumerate()
        .map(|(ix, ch)| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => bail!("output {} is {:?}, expected 0 or 1", ix, ch),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TruthTable::from_outputs(bits)?)
}

fn print_minimized(kmap: &KMap) {
    print!("{}", kmap.display());
    println!();
    print!("{}", kmap.minimize());
}
