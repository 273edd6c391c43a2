//! `content list` prints one verdict line per document.

use crate::aggregate::review_document;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{PipelineError, PipelineResult};
use crate::PipelineCommand;

pub struct ListCommand;

impl PipelineCommand for ListCommand {
    type Options = ();

    fn parse(args: &[String]) -> PipelineResult<Self::Options> {
        if let Some(arg) = args.first() {
            return Err(PipelineError::validation(format!(
                "unsupported list argument: {arg}"
            )));
        }
        Ok(())
    }

    fn run(ctx: &CommandContext, _options: Self::Options) -> PipelineResult<()> {
        let config = ctx.guidelines().load()?;
        let corpus = ctx.store().load_corpus()?;

        for doc in &corpus {
            let review = review_document(ctx.root(), &config, &corpus, doc);
            let verdict = if review.overall.passed { "PASS" } else { "FAIL" };
            let published = if doc.is_published() { "" } else { " (unpublished)" };
            println!(
                "{verdict} {:>3}  {} [{}]{published}",
                review.overall.score, doc.slug, doc.kind
            );
        }
        Ok(())
    }
}
