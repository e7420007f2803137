//! CLI entry point for ampelgen.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and exit
//! codes. All business logic lives in the `ampelgen-app` crate.

use ampelgen_app::{
    ExplainOutput, TransformInput, format_explanation, format_not_found, format_types,
    parse_policy_json, render_markdown, run_explain, run_transform, serialize_policy,
};
use ampelgen_settings::Overrides;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use tracing::debug;

const DEFAULT_CONFIG: &str = "ampelgen.toml";

#[derive(Parser, Debug)]
#[command(
    name = "ampelgen",
    version,
    about = "Compile Gemara assessment plans into Ampel attestation verification policies"
)]
struct Cli {
    /// Enable verbose logging (repeat for more detail: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON (for machine consumption).
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a Gemara Layer-3 policy into an Ampel policy.
    Transform {
        /// Policy document (path or file:// URI).
        #[arg(long)]
        policy: String,

        /// Gemara Layer-2 catalog used to name and describe tenets.
        #[arg(long)]
        catalog: Option<String>,

        /// Path to ampelgen config TOML (default: ./ampelgen.toml if present).
        #[arg(long)]
        config: Option<Utf8PathBuf>,

        /// Append scope filter clauses to every check.
        #[arg(long)]
        scope_filters: bool,

        /// Pin attestation types for every check (URI or alias; repeatable).
        #[arg(long = "attestation-type", value_name = "TYPE")]
        attestation_types: Vec<String>,

        /// Where to write the policy JSON (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,

        /// Also write a Markdown summary to this path.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Render markdown from an existing policy JSON file.
    Md {
        /// Path to the generated policy JSON.
        #[arg(long)]
        policy_json: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain an attestation type: keywords, default template, parameters.
    Explain {
        /// Predicate type URI or alias (e.g. "slsa").
        identifier: String,
    },

    /// List known attestation types in inference priority order.
    Types,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    if let Err(err) = run(cli) {
        eprintln!("ampelgen error: {err:#}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Commands::Transform {
            policy,
            catalog,
            config,
            scope_filters,
            attestation_types,
            output,
            markdown_out,
        } => cmd_transform(
            &policy,
            catalog.as_deref(),
            config.as_deref(),
            Overrides {
                scope_filters: scope_filters.then_some(true),
                attestation_types,
            },
            output.as_deref(),
            markdown_out.as_deref(),
        ),
        Commands::Md {
            policy_json,
            output,
        } => cmd_md(&policy_json, output.as_deref()),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Types => {
            print!("{}", format_types());
            Ok(())
        }
    }
}

/// An explicit `--config` must exist; the default path is optional.
fn read_config(path: Option<&Utf8Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read config: {}", p)),
        None => {
            let text = std::fs::read_to_string(DEFAULT_CONFIG).unwrap_or_default();
            if !text.is_empty() {
                debug!(path = DEFAULT_CONFIG, "using config");
            }
            Ok(text)
        }
    }
}

fn cmd_transform(
    policy: &str,
    catalog: Option<&str>,
    config: Option<&Utf8Path>,
    overrides: Overrides,
    output: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let config_text = read_config(config)?;

    let out = run_transform(TransformInput {
        policy,
        catalog,
        config_text: &config_text,
        overrides,
    })?;

    let json = serialize_policy(&out.policy)?;
    match output {
        Some(path) => write_text_file(path, &json).context("write policy json")?,
        None => print!("{}", json),
    }

    if let Some(path) = markdown_out {
        write_text_file(path, &render_markdown(&out.policy)).context("write markdown")?;
    }

    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(policy_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(policy_path)
        .with_context(|| format!("read policy json: {}", policy_path))?;
    let policy = parse_policy_json(&text)?;
    let md = render_markdown(&policy);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(entry) => {
            print!("{}", format_explanation(entry));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", format_not_found(&identifier, &available));
            std::process::exit(1);
        }
    }
}
