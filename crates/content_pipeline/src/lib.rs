//! Content validation and publishing pipeline (`content`).
//!
//! The crate is organized as a small CLI layer over shared runtime services.
//! Command modules own workflow policy while [`runtime`] owns the structured
//! error type, artifact path policy, and the shared [`CommandContext`]; the
//! domain lives in [`store`], [`guidelines`], [`validators`], [`aggregate`],
//! and [`fixers`].
//!
//! [`CommandContext`]: runtime::context::CommandContext

pub mod aggregate;
pub mod assets;
pub mod cli;
pub mod commands;
pub mod fixers;
pub mod guidelines;
pub mod markdown;
pub mod report;
pub mod runtime;
pub mod store;
pub mod validators;

use crate::cli::TopLevelCommand;
use crate::commands::list::ListCommand;
use crate::commands::prepare::PrepareCommand;
use crate::commands::validate::ValidateCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::PipelineResult;

/// Shared command contract for top-level command families.
///
/// Each family owns its typed option parsing while sharing the same runtime
/// services through [`CommandContext`]. Implementations should treat
/// [`PipelineCommand::parse`] as a pure translation from raw CLI arguments
/// into a typed options value and keep side effects in
/// [`PipelineCommand::run`].
pub trait PipelineCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    fn parse(args: &[String]) -> PipelineResult<Self::Options>;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> PipelineResult<()>;
}

/// Executes the `content` binary using the current process arguments.
pub fn execute_from_env() -> PipelineResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    let ctx = CommandContext::new()?;

    match parsed {
        TopLevelCommand::Validate(args) => {
            ValidateCommand::run(&ctx, ValidateCommand::parse(&args)?)
        }
        TopLevelCommand::List(args) => ListCommand::run(&ctx, ListCommand::parse(&args)?),
        TopLevelCommand::Prepare(args) => {
            PrepareCommand::run(&ctx, PrepareCommand::parse(&args)?)
        }
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts a pipeline result into a stable process exit code.
///
/// All failures map to exit code `1` after printing the formatted
/// [`PipelineError`](runtime::error::PipelineError) to stderr.
pub fn exit_code(result: PipelineResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
