//! Pipeline command families.

pub mod list;
pub mod prepare;
pub mod validate;

use crate::runtime::error::{PipelineError, PipelineResult};

/// Document selection shared by the batch commands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Scope {
    Single(String),
    All,
    Published,
}

impl Scope {
    /// Parse a positional slug / `--all` / `--published` selection out of
    /// `args`, returning the remaining flag arguments.
    pub(crate) fn parse(args: &[String], allow_published: bool) -> PipelineResult<(Self, Vec<String>)> {
        let mut scope = None;
        let mut rest = Vec::new();

        for arg in args {
            match arg.as_str() {
                "--all" => set_scope(&mut scope, Scope::All)?,
                "--published" if allow_published => set_scope(&mut scope, Scope::Published)?,
                flag if flag.starts_with("--") => rest.push(arg.clone()),
                slug => set_scope(&mut scope, Scope::Single(slug.to_string()))?,
            }
        }

        let scope = scope.ok_or_else(|| {
            PipelineError::validation("missing document selection (a slug, or `--all`)")
        })?;
        Ok((scope, rest))
    }
}

fn set_scope(slot: &mut Option<Scope>, scope: Scope) -> PipelineResult<()> {
    if slot.is_some() {
        return Err(PipelineError::validation(
            "more than one document selection given",
        ));
    }
    *slot = Some(scope);
    Ok(())
}
