//! CLI command implementations.
//!
//! Commands read a query AST (the upstream parser's JSON form), compile
//! it, and print the result. All store access stays outside this binary.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::numeric;
use crate::observability::Logger;
use crate::planner::{ExplainPlan, QueryPlanBuilder, QueryRequest};

use super::args::{Cli, Command, OpArg};
use super::errors::{CliError, CliResult};

/// Parses arguments and dispatches the selected command.
pub fn run() -> CliResult<()> {
    dispatch(Cli::parse_args())
}

/// Runs one parsed command; split from [`run`] so tests can drive it.
pub fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Plan {
            input,
            allow_missing,
        } => {
            let plan = compile(input.as_deref(), allow_missing.as_deref())?;
            let json = serde_json::to_string_pretty(&plan)
                .map_err(|err| CliError::io(err.to_string()))?;
            println!("{json}");
            Ok(())
        }
        Command::Explain {
            input,
            allow_missing,
        } => {
            let plan = compile(input.as_deref(), allow_missing.as_deref())?;
            print!("{}", ExplainPlan::from_plan(&plan));
            Ok(())
        }
        Command::Regex { op, literal } => {
            let pattern = compile_pattern(op, &literal)?;
            println!("{pattern}");
            Ok(())
        }
    }
}

/// Reads, parses, and compiles a query request.
fn compile(input: Option<&Path>, allow_missing: Option<&str>) -> CliResult<crate::planner::ScanPlan> {
    let request = read_request(input)?;
    let builder = match allow_missing {
        Some(columns) => QueryPlanBuilder::new()
            .allow_missing(columns.split(',').map(str::trim).filter(|c| !c.is_empty())),
        None => QueryPlanBuilder::new(),
    };
    match builder.build(&request) {
        Ok(plan) => {
            Logger::info(
                "plan_compiled",
                &[
                    ("table", plan.table.as_str()),
                    ("family", plan.family.as_str()),
                ],
            );
            Ok(plan)
        }
        Err(err) => {
            Logger::error(
                "plan_rejected",
                &[("code", err.code().code()), ("reason", err.message())],
            );
            Err(CliError::plan_rejected(err.to_string()))
        }
    }
}

/// Compiles one literal/operator pair into its pattern.
fn compile_pattern(op: OpArg, literal: &str) -> CliResult<String> {
    let pattern = numeric::compile(literal, op.into())
        .map_err(|err| CliError::bad_literal(err.to_string()))?;
    Logger::trace("pattern_compiled", &[("literal", literal)]);
    Ok(pattern)
}

/// Reads the request JSON from a file or stdin.
fn read_request(input: Option<&Path>) -> CliResult<QueryRequest> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| CliError::io(format!("{}: {err}", path.display())))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    serde_json::from_str(&text).map_err(|err| CliError::bad_request(err.to_string()))
}

/// Convenience used by integration tests to compile a request file.
pub fn compile_file(path: &Path, allow_missing: Option<&str>) -> CliResult<crate::planner::ScanPlan> {
    compile(Some(path), allow_missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::PlannerErrorCode;

    #[test]
    fn test_pattern_command_output() {
        let pattern = compile_pattern(OpArg::Gt, "18").unwrap();
        assert_eq!(pattern, numeric::compile("18", numeric::RangeOp::Gt).unwrap());
    }

    #[test]
    fn test_pattern_command_rejects_text() {
        let err = compile_pattern(OpArg::Lt, "fast").unwrap_err();
        assert_eq!(err.code().code(), "SCANQL_CLI_BAD_LITERAL");
    }

    #[test]
    fn test_missing_input_file_is_io_error() {
        let err = read_request(Some(Path::new("/nonexistent/q.json"))).unwrap_err();
        assert_eq!(err.code().code(), "SCANQL_CLI_IO_ERROR");
    }

    #[test]
    fn test_planner_codes_surface_in_message() {
        // Keep the CLI's rejection text tied to the planner's stable codes.
        assert_eq!(
            PlannerErrorCode::InvalidTableSource.code(),
            "SCANQL_INVALID_TABLE_SOURCE"
        );
    }
}
