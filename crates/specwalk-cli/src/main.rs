mod render;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use specwalk_core::config::{self, CONFIG_FILE_NAME, SpecwalkConfig};
use specwalk_core::merge_documents;
use specwalk_core::model::Api;

#[derive(Parser)]
#[command(
    name = "specwalk",
    about = "OpenAPI document traverser and code generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse documents and print the merged API model as JSON
    Parse {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Document path(s), YAML or JSON
        docs: Vec<PathBuf>,
    },

    /// Render a template against the merged API model
    Generate {
        /// Template path
        template: Option<PathBuf>,

        /// Document path(s), YAML or JSON
        docs: Vec<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse documents and print a summary
    Validate {
        /// Document path(s), YAML or JSON
        docs: Vec<PathBuf>,
    },

    /// Initialize a new specwalk configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { pretty, docs } => cmd_parse(pretty, docs),

        Commands::Generate {
            template,
            docs,
            output,
        } => cmd_generate(template, docs, output),

        Commands::Validate { docs } => cmd_validate(docs),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "specwalk", &mut io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SpecwalkConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Documents from the command line, else from the config file.
fn resolve_docs(docs: Vec<PathBuf>, cfg: &SpecwalkConfig) -> Result<Vec<PathBuf>> {
    if !docs.is_empty() {
        return Ok(docs);
    }
    if cfg.docs.is_empty() {
        anyhow::bail!("no documents given and no `docs` in {CONFIG_FILE_NAME}");
    }
    Ok(cfg.docs.iter().map(PathBuf::from).collect())
}

fn load_api(docs: &[PathBuf], cfg: &SpecwalkConfig) -> Result<Api> {
    log::debug!("parsing {} documents", docs.len());
    let api = merge_documents(docs, &cfg.conventions()).context("failed parsing documents")?;
    Ok(api)
}

fn cmd_parse(pretty: bool, docs: Vec<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let docs = resolve_docs(docs, &cfg)?;
    let api = load_api(&docs, &cfg)?;

    let json = if pretty || cfg.pretty {
        serde_json::to_string_pretty(&api)?
    } else {
        serde_json::to_string(&api)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_generate(
    template: Option<PathBuf>,
    docs: Vec<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let template = template
        .or_else(|| cfg.template.as_ref().map(PathBuf::from))
        .with_context(|| format!("no template given and no `template` in {CONFIG_FILE_NAME}"))?;
    let docs = resolve_docs(docs, &cfg)?;
    let api = Arc::new(load_api(&docs, &cfg)?);

    let source = fs::read_to_string(&template)
        .with_context(|| format!("failed loading template {}", template.display()))?;
    let rendered = render::render(&template.display().to_string(), &source, api)
        .context("failed generating code")?;

    match output.or_else(|| cfg.output.as_ref().map(PathBuf::from)) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("  wrote {}", path.display());
        }
        None => io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn cmd_validate(docs: Vec<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let docs = resolve_docs(docs, &cfg)?;
    let api = load_api(&docs, &cfg)?;

    eprintln!("Valid API: {} {}", api.title, api.version);
    for spec in &api.specs {
        eprintln!("  Document: {} ({})", spec.doc, spec.title);
    }
    eprintln!("  Servers: {}", api.servers.len());
    eprintln!("  Methods: {}", api.methods.len());
    eprintln!("  Schemas: {}", api.schemas.len());
    eprintln!("  Consts: {}", api.consts.len());
    eprintln!("  Referenced documents: {}", api.ref_docs.len());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
