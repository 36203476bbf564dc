mod cli_args;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log;
use rayon::prelude::*;
use std::process;
use std::sync::Arc;

use cli_args::{Cli, RenderFormat};
use ctxgen_core::{
    AppError, ContentBuilderFactory, MarkdownRenderer, ModifierRegistry, PlainTextRenderer,
    Renderer, ReqwestClient, Source, SourceFetcherRegistry,
};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args) {
        Ok(_) => {
            log::info!("Document generation finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<AppError>() {
                Some(AppError::Config(_)) => 1,
                Some(AppError::InvalidArgument(_)) => 5,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::WalkDir(_)) => 2,
                Some(AppError::Ignore(_)) => 2,
                Some(AppError::Glob(_)) => 2,
                Some(AppError::Regex(_)) => 2,
                Some(AppError::Http(_)) => 3,
                Some(AppError::GithubApi(_)) => 3,
                Some(AppError::Json(_)) => 6,
                Some(AppError::ContentDecoding(_)) => 6,
                Some(_) => 1,
                None => 1,
            };
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli) -> Result<()> {
    let document = config::load_document(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let sources = config::select_sources(document.sources, &cli.tags);
    if sources.is_empty() {
        log::warn!("No sources selected; the generated document will be empty.");
    }

    let renderer: Arc<dyn Renderer> = match cli.format {
        RenderFormat::Markdown => Arc::new(MarkdownRenderer),
        RenderFormat::Text => Arc::new(PlainTextRenderer),
    };
    let registry = SourceFetcherRegistry::with_defaults(
        Arc::new(ReqwestClient::new()?),
        Arc::new(ModifierRegistry::new()),
        ContentBuilderFactory::new(renderer),
    );

    // Sources share no mutable state, so parallel fetch is safe; declaration
    // order is preserved in the assembled document either way.
    let results: Vec<ctxgen_core::Result<String>> = if cli.parallel {
        log::debug!("Fetching {} source(s) in parallel...", sources.len());
        sources.par_iter().map(|s| registry.fetch(s)).collect()
    } else {
        sources.iter().map(|s| registry.fetch(s)).collect()
    };

    let document_text = assemble_document(&sources, results)?;
    output::write_output(&document_text, cli.output.as_deref(), cli.quiet)?;
    Ok(())
}

fn assemble_document(
    sources: &[Source],
    results: Vec<ctxgen_core::Result<String>>,
) -> Result<String> {
    let mut out = String::new();
    for (source, result) in sources.iter().zip(results) {
        let text = result.with_context(|| {
            format!(
                "Failed to fetch {} source '{}'",
                source.type_name(),
                source.description()
            )
        })?;
        if text.trim().is_empty() {
            log::debug!(
                "Source '{}' produced no content, skipping.",
                source.description()
            );
            continue;
        }
        if !source.description().is_empty() {
            out.push_str(&format!("// SOURCE: {}\n", source.description()));
        }
        out.push_str(&text);
        if !text.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxgen_core::UrlSource;

    #[test]
    fn assembly_prefixes_descriptions_and_keeps_order() {
        let mut first = UrlSource::new(vec!["https://a.test".to_string()]);
        first.description = "first".to_string();
        let second = UrlSource::new(vec!["https://b.test".to_string()]);
        let sources = vec![Source::Url(first), Source::Url(second)];

        let out = assemble_document(
            &sources,
            vec![Ok("alpha\n".to_string()), Ok("beta\n".to_string())],
        )
        .unwrap();

        assert_eq!(out, "// SOURCE: first\nalpha\nbeta\n");
    }

    #[test]
    fn a_failed_source_aborts_assembly() {
        let sources = vec![Source::Url(UrlSource::new(vec![
            "https://a.test".to_string()
        ]))];
        let results = vec![Err(AppError::Http("boom".to_string()))];
        assert!(assemble_document(&sources, results).is_err());
    }
}
