use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum RenderFormat {
    Markdown,
    Text,
}

#[derive(Parser, Debug)]
#[command(
    name = "ctxgen",
    version,
    about = "Aggregate local files, GitHub repositories and URLs into a single context document"
)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the source configuration file (YAML, JSON or TOML).",
        value_name = "FILE",
        default_value = "ctxgen.yaml"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        help = "Write the generated document to FILE instead of stdout.",
        value_name = "FILE"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "tags",
        help = "Only fetch sources carrying at least one of these tags (comma separated).",
        value_name = "TAG",
        value_delimiter = ','
    )]
    pub tags: Vec<String>,

    #[arg(
        long = "format",
        help = "Renderer used for the generated document.",
        value_enum,
        default_value_t = RenderFormat::Markdown
    )]
    pub format: RenderFormat,

    #[arg(long, help = "Fetch independent sources in parallel.")]
    pub parallel: bool,

    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace)."
    )]
    pub verbose: u8,

    #[arg(short, long, help = "Suppress all non-error output.")]
    pub quiet: bool,
}
