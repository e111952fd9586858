use auxoutline_core::{format_result, OutlineQuery, OutputFormat, QueryConfig};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auxoutline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract a navigable outline from a LaTeX aux file")]
#[command(long_about = "Reads the aux file a LaTeX compiler writes beside a document, \
    resolves nested \\@input inclusion, and reconstructs the section tree with the \
    cross-reference labels defined in each section.\n\n\
    The optional FILTER narrows the result and is classified by shape: something \
    that looks like a displayed value (\"3.2\", \"(4.1\", \"eq.3\") filters on label \
    values, anything else (\"sec:intro\", \"thm\") on label keys. When exactly one \
    label matches unambiguously, only its bare key is printed; otherwise the full \
    outline is printed with <<<N fold markers for editor folding.")]
pub struct Args {
    /// Document or aux file to outline
    pub file: PathBuf,

    /// Label-key or displayed-value prefix to filter on
    #[arg(default_value = "")]
    pub filter: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Text)]
    pub format: OutputFormatArg,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum \@input nesting depth
    #[arg(long, default_value_t = 16)]
    pub max_include_depth: usize,

    /// Keep \IeC accent groups verbatim instead of transliterating them
    #[arg(long)]
    pub no_accents: bool,

    /// Report match counts on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Text,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = QueryConfig::default()
        .with_max_include_depth(args.max_include_depth)
        .with_decode_accents(!args.no_accents);

    let query = OutlineQuery::new(config);
    let result = query.run(&args.file, &args.filter)?;

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }
    if args.verbose {
        eprintln!("{} matching label(s)", result.match_count());
    }

    let output = format_result(&result, args.format.clone().into())?;

    if let Some(ref path) = args.output {
        fs::write(path, &output)?;
        if args.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        // No trailing newline beyond what the format carries; editors
        // consume the output verbatim
        io::stdout().write_all(output.as_bytes())?;
    }

    Ok(())
}
