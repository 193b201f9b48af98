use std::fs;

use miette::{bail, Diagnostic, IntoDiagnostic, Result};

use clap::Parser;

use thiserror::Error;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use jadnames::listing::{self, ListingError};
use jadnames::tree::FamilyTree;
use jadnames::{rename_listing, JadNameProviderFactory};

mod cli;

use cli::{Args, Mode};

#[derive(Debug, Error, Diagnostic)]
#[error("Oops, the listing could not be read")]
struct AppError {
    #[related]
    errs: Vec<ListingError>,

    #[source_code]
    code: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    if !args.input_file.is_file() {
        bail!("No proper input file: {:?}", args.input_file);
    }

    let source = fs::read_to_string(&args.input_file).into_diagnostic()?;
    let methods = match listing::parse(&source) {
        Ok(methods) => {
            info!(methods = methods.len(), "Listing read");
            methods
        }
        Err(errs) => return Err(AppError { errs, code: source }.into()),
    };

    let factory = JadNameProviderFactory::new(args.rename_parameters);
    let renamed = rename_listing(&methods, factory)?;

    for method in &renamed {
        match args.mode {
            Mode::Names => print!("{method}"),
            Mode::Registry => FamilyTree::new(&method.name, &method.registry)
                .print()
                .into_diagnostic()?,
        }
    }

    Ok(())
}
