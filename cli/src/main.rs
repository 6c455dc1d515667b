mod definition;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cliargs_core::{OptionSpec, compile, format_summary, format_usage, parse_args};
use tracing_subscriber::EnvFilter;

use crate::definition::ParserDefinition;
use crate::output::{OutputFormat, format_parsed, format_table};

#[derive(Debug, Parser)]
#[command(name = "cliargs", version)]
#[command(about = "Compile option specifications and scan argument vectors")]
struct Cli {
    /// Log compiler and scanner decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan an invocation context and print the parsed options.
    Parse(ParseArgs),
    /// Print the usage summary for an invocation context.
    Usage(UsageArgs),
    /// Print the compiled option table.
    Compile(CompileArgs),
    /// Write the option definition to a YAML file.
    Export(ExportArgs),
}

/// Where the option specification comes from.
#[derive(Debug, Args)]
struct SpecArgs {
    /// String-form specification (e.g. "ab:c!").
    #[arg(long, conflicts_with_all = ["list", "definition"])]
    spec: Option<String>,
    /// Comma-separated array-form specification (e.g. verbose,output:,input:!).
    #[arg(long, conflicts_with = "definition")]
    list: Option<String>,
    /// YAML or JSON definition file with `spec` and optional `help`.
    #[arg(long)]
    definition: Option<PathBuf>,
    /// Option description as NAME=TEXT (repeatable).
    #[arg(long = "describe", value_name = "NAME=TEXT")]
    describe: Vec<String>,
    /// Line printed before the option listing.
    #[arg(long)]
    pre: Option<String>,
    /// Line printed after the option listing.
    #[arg(long)]
    post: Option<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    spec: SpecArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Invocation context: runner, script path, then user arguments.
    #[arg(last = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    #[command(flatten)]
    spec: SpecArgs,
    /// Invocation context: runner and script path.
    #[arg(last = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct CompileArgs {
    #[command(flatten)]
    spec: SpecArgs,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[command(flatten)]
    spec: SpecArgs,
    /// Output YAML path.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args),
        Command::Compile(args) => run_compile(args),
        Command::Export(args) => run_export(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let definition = resolve_definition(args.spec)?;

    match parse_args(definition.spec.clone(), definition.help.as_ref(), &args.argv) {
        Ok(parsed) => {
            emit(&format_parsed(&parsed, args.format)?);
            Ok(())
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), option = err.option(), "scan failed");
            eprintln!("{}", summary_for(&definition, &args.argv));
            Err(err.to_string())
        }
    }
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let definition = resolve_definition(args.spec)?;
    emit(&summary_for(&definition, &args.argv));
    Ok(())
}

fn run_compile(args: CompileArgs) -> Result<(), String> {
    let definition = resolve_definition(args.spec)?;
    let table = compile(&definition.spec);
    emit(&format_table(&table, args.format)?);
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<(), String> {
    let definition = resolve_definition(args.spec)?;
    definition.save(&args.output).map_err(|err| {
        format!(
            "Failed to write definition '{}': {err}",
            args.output.display()
        )
    })?;
    eprintln!("Wrote definition to {}", args.output.display());
    Ok(())
}

/// Builds the definition from a file or inline flags, then layers the
/// inline help flags on top.
fn resolve_definition(args: SpecArgs) -> Result<ParserDefinition, String> {
    let mut definition = if let Some(path) = &args.definition {
        ParserDefinition::load(path)
            .map_err(|err| format!("Failed to load definition '{}': {err}", path.display()))?
    } else if let Some(list) = args.list {
        ParserDefinition {
            spec: OptionSpec::List(parse_csv_list(Some(list))),
            help: None,
        }
    } else {
        ParserDefinition {
            spec: args.spec.map(OptionSpec::Chars).unwrap_or_default(),
            help: None,
        }
    };

    if args.describe.is_empty() && args.pre.is_none() && args.post.is_none() {
        return Ok(definition);
    }

    let mut help = definition.help.take().unwrap_or_default();
    for entry in &args.describe {
        let (name, text) = entry
            .split_once('=')
            .ok_or_else(|| format!("--describe expects NAME=TEXT, got '{entry}'"))?;
        help = help.with_option(name.trim(), text.trim());
    }
    if let Some(pre) = args.pre {
        help.pre = Some(pre);
    }
    if let Some(post) = args.post {
        help.post = Some(post);
    }
    definition.help = Some(help);

    Ok(definition)
}

fn summary_for(definition: &ParserDefinition, argv: &[String]) -> String {
    let table = compile(&definition.spec);
    let usage = format_usage(argv, &table);
    format_summary(&usage, &table, definition.help.as_ref())
}

fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
