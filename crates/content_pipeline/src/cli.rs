//! Top-level CLI parsing and help output.

use crate::runtime::error::{PipelineError, PipelineResult};

/// Top-level `content` command families.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    Validate(Vec<String>),
    List(Vec<String>),
    Prepare(Vec<String>),
    Help,
}

/// Parse raw command-line arguments into a top-level command selection.
pub fn parse(args: Vec<String>) -> PipelineResult<TopLevelCommand> {
    let Some(cmd) = args.first().cloned() else {
        return Ok(TopLevelCommand::Help);
    };

    let rest = args[1..].to_vec();
    match cmd.as_str() {
        "validate" => Ok(TopLevelCommand::Validate(rest)),
        "list" => Ok(TopLevelCommand::List(rest)),
        "prepare" => Ok(TopLevelCommand::Prepare(rest)),
        "help" | "--help" | "-h" => Ok(TopLevelCommand::Help),
        other => Err(PipelineError::validation(format!(
            "unknown content command: {other}"
        ))),
    }
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: content <command> [args]\n\
         \n\
         Commands:\n\
           validate <slug> | --all [--ci]\n\
                               Run all validators and print findings\n\
           list                One PASS/FAIL line with score per document\n\
           prepare <slug> | --all | --published [--fix] [--ci]\n\
                               Publishing pipeline: validators, optional fixers,\n\
                               and the JSON report artifact\n\
         \n\
         Flags:\n\
           --fix               Inject blur placeholders and sync plan statuses\n\
           --ci                Exit nonzero when any document has errors\n"
    );
}
