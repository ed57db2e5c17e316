//! CLI argument definitions using clap
//!
//! Commands:
//! - scanql plan [--input <ast.json>] [--allow-missing <cols>]
//! - scanql explain [--input <ast.json>] [--allow-missing <cols>]
//! - scanql regex --op <op> <literal>

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::numeric::RangeOp;

/// scanql - compile queries into wide-column scan plans
#[derive(Parser, Debug)]
#[command(name = "scanql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a query AST into a scan plan, printed as JSON
    Plan {
        /// Path to the query AST JSON; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Comma-separated columns a row may lack and still pass filters
        #[arg(long)]
        allow_missing: Option<String>,
    },

    /// Compile a query AST and print a human-readable plan
    Explain {
        /// Path to the query AST JSON; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Comma-separated columns a row may lack and still pass filters
        #[arg(long)]
        allow_missing: Option<String>,
    },

    /// Compile a single decimal comparison into its regex pattern
    Regex {
        /// Relational operator to compile for
        #[arg(long, value_enum)]
        op: OpArg,

        /// Decimal literal, e.g. 55.06 or -13
        literal: String,
    },
}

/// Operator spelling accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OpArg {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl From<OpArg> for RangeOp {
    fn from(arg: OpArg) -> Self {
        match arg {
            OpArg::Lt => RangeOp::Lt,
            OpArg::Le => RangeOp::Le,
            OpArg::Gt => RangeOp::Gt,
            OpArg::Ge => RangeOp::Ge,
            OpArg::Eq => RangeOp::Eq,
            OpArg::Ne => RangeOp::Ne,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
