//! Implementation of the `hatch generate` command.
//!
//! Without a namespace this prints the generator listing; with one it hands
//! the request to the dispatcher and reports the outcome. No lookup logic
//! lives here.

use tracing::instrument;

use hatch_core::prelude::*;

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    commands::list::render_groups,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    session::Session,
};

const USAGE: &str = "Usage: hatch generate GENERATOR [args] [options]\n\
\n\
General options:\n\
\x20 -h, [--help]     # Print generator's options and usage\n\
\x20 -p, [--pretend]  # Run but do not make any changes\n\
\x20 -f, [--force]    # Overwrite files that already exist\n\
\x20 -s, [--skip]     # Skip files that already exist\n\
\x20 -q, [--quiet]    # Suppress status output\n\
\n\
Please choose a generator below.\n\
\n";

#[instrument(skip_all, fields(namespace = args.namespace.as_deref().unwrap_or("")))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let session = Session::open(&global, &config)?;
    let pretend = args.pretend;
    let options = GeneratorOptions {
        help: args.help,
        pretend: args.pretend,
        force: args.force,
        skip: args.skip,
        quiet: global.quiet,
        extra: args.set.into_iter().collect(),
    };
    let invocation = session.invocation(args.args, options);

    let Some(requested) = args.namespace else {
        let listing = session.aggregator.listing(&invocation, false)?;
        output.emit(&help_text(&listing, &output))?;
        return Ok(());
    };

    match session.dispatcher.dispatch(&requested, invocation)? {
        DispatchOutcome::Ran { namespace } => {
            output.success(&format!("{namespace} finished"))?;
            if pretend {
                output.info("Pretend run, nothing was written")?;
            }
        }
        DispatchOutcome::HelpShown { help, .. } => {
            output.emit(&help)?;
        }
        DispatchOutcome::NotFound {
            requested,
            attempted,
        } => {
            return Err(CliError::GeneratorNotFound {
                namespace: requested,
                attempted,
            });
        }
    }

    Ok(())
}

/// Usage header, general options and the grouped generator listing.
pub fn help_text(listing: &GeneratorListing, output: &OutputManager) -> String {
    let mut text = String::from(USAGE);
    text.push_str(&render_groups(listing, output));
    text
}
