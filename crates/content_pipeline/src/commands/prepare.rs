//! `content prepare` is the full publishing pipeline: validators plus fixers.

use crate::aggregate::{review_document, review_slug, DocumentReview};
use crate::commands::Scope;
use crate::fixers::{blur, calendar};
use crate::report;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{PipelineError, PipelineResult};
use crate::PipelineCommand;

pub struct PrepareCommand;

#[derive(Clone, Debug)]
pub struct PrepareOptions {
    scope: Scope,
    fix: bool,
    ci: bool,
}

impl PipelineCommand for PrepareCommand {
    type Options = PrepareOptions;

    fn parse(args: &[String]) -> PipelineResult<Self::Options> {
        let (scope, rest) = Scope::parse(args, true)?;
        let mut fix = false;
        let mut ci = false;
        for arg in rest {
            match arg.as_str() {
                "--fix" => fix = true,
                "--ci" => ci = true,
                other => {
                    return Err(PipelineError::validation(format!(
                        "unsupported prepare argument: {other}"
                    )))
                }
            }
        }
        Ok(PrepareOptions { scope, fix, ci })
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> PipelineResult<()> {
        let config = ctx.guidelines().load()?;
        let corpus = ctx.store().load_corpus()?;

        let slugs: Vec<String> = match &options.scope {
            Scope::Single(slug) => vec![slug.clone()],
            Scope::All => corpus.iter().map(|d| d.slug.clone()).collect(),
            Scope::Published => corpus
                .iter()
                .filter(|d| d.is_published())
                .map(|d| d.slug.clone())
                .collect(),
        };

        let mut reviews: Vec<DocumentReview> = Vec::new();
        for slug in slugs {
            // A validator or fixer failure for one document is recorded and
            // the batch moves on; isolation is per-document.
            let review = match corpus.iter().find(|d| d.slug == slug) {
                Some(doc) => {
                    let review = review_document(ctx.root(), &config, &corpus, doc);
                    if options.fix {
                        apply_fixers(ctx, &slug, review.overall.passed);
                    }
                    review
                }
                None => review_slug(ctx.root(), &config, &corpus, &slug),
            };
            report::print_review(&review);
            reviews.push(review);
        }

        let run = report::RunReport::new(&reviews);
        report::write_report(&ctx.artifacts().content_report(), &run)?;
        report::print_summary(&run);

        if options.ci && run.summary.failed > 0 {
            return Err(PipelineError::validation(format!(
                "content validation failed for {} document(s)",
                run.summary.failed
            )));
        }
        Ok(())
    }
}

fn apply_fixers(ctx: &CommandContext, slug: &str, passed: bool) {
    match blur::inject_blur_placeholders(ctx.root(), ctx.store(), slug) {
        Ok(outcome) => {
            if outcome.updated {
                println!("fixed {slug}: injected {}", outcome.fields.join(", "));
            }
            for warning in outcome.warnings {
                eprintln!("warn: {slug}: {warning}");
            }
        }
        Err(err) => eprintln!("warn: blur injection failed for `{slug}`: {err}"),
    }

    match calendar::sync_calendar_status(&ctx.artifacts().content_plan(), slug, passed) {
        Ok(outcome) => {
            if outcome.updated {
                if let Some(status) = outcome.status {
                    println!("plan: {slug} -> {status}");
                }
            }
        }
        Err(err) => eprintln!("warn: calendar sync failed for `{slug}`: {err}"),
    }
}
