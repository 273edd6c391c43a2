//! `content validate` runs the validators without side effects.

use crate::aggregate::{review_document, review_slug, DocumentReview};
use crate::commands::Scope;
use crate::report;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{PipelineError, PipelineResult};
use crate::PipelineCommand;

pub struct ValidateCommand;

#[derive(Clone, Debug)]
pub struct ValidateOptions {
    scope: Scope,
    ci: bool,
}

impl PipelineCommand for ValidateCommand {
    type Options = ValidateOptions;

    fn parse(args: &[String]) -> PipelineResult<Self::Options> {
        let (scope, rest) = Scope::parse(args, false)?;
        let mut ci = false;
        for arg in rest {
            match arg.as_str() {
                "--ci" => ci = true,
                other => {
                    return Err(PipelineError::validation(format!(
                        "unsupported validate argument: {other}"
                    )))
                }
            }
        }
        Ok(ValidateOptions { scope, ci })
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> PipelineResult<()> {
        let config = ctx.guidelines().load()?;
        let corpus = ctx.store().load_corpus()?;

        match options.scope {
            Scope::Single(slug) => {
                let review = review_slug(ctx.root(), &config, &corpus, &slug);
                report::print_review(&review);
                finish(&[review], options.ci)
            }
            _ => {
                let reviews: Vec<DocumentReview> = corpus
                    .iter()
                    .map(|doc| review_document(ctx.root(), &config, &corpus, doc))
                    .collect();
                for review in &reviews {
                    report::print_review(review);
                }
                let run = report::RunReport::new(&reviews);
                report::write_report(&ctx.artifacts().content_report(), &run)?;
                report::print_summary(&run);
                finish(&reviews, options.ci)
            }
        }
    }
}

/// Exit nonzero only in CI mode; locally the command warns without blocking.
fn finish(reviews: &[DocumentReview], ci: bool) -> PipelineResult<()> {
    let failed = reviews.iter().filter(|r| !r.overall.passed).count();
    if ci && failed > 0 {
        return Err(PipelineError::validation(format!(
            "content validation failed for {failed} document(s)"
        )));
    }
    Ok(())
}
