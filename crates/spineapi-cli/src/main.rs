mod starter;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;
use serde_json::json;

use spineapi_core::config::{self, CONFIG_FILE_NAME, OutputFormat, SpineConfig};
use spineapi_core::enhance::{CommandEnhancer, enhance_files};
use spineapi_core::ir::ParsedSpec;
use spineapi_core::{GeneratedFile, SpecParser, load, transform};

#[derive(Parser)]
#[command(name = "spineapi", about = "OpenAPI 3.x parser and IR inspector", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Inspect the parsed IR of an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<InspectFormat>,

        /// Only list endpoints with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Create a starter OpenAPI spec
    Init {
        /// Project name, e.g. "Pet Store"
        name: String,

        /// Directory to create the spec file in
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Write a default .spineapi.yaml
    InitConfig {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Run the configured enhancer over files in place
    Enhance {
        /// Files to enhance
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for InspectFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => InspectFormat::Yaml,
            OutputFormat::Json => InspectFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format, tag } => cmd_inspect(input, format, tag),

        Commands::Init {
            name,
            output,
            force,
        } => cmd_init(&name, &output, force),

        Commands::InitConfig { force } => cmd_init_config(force),

        Commands::Enhance { files } => cmd_enhance(&files),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "spineapi", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SpineConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn resolve_input(input: Option<PathBuf>, cfg: &SpineConfig) -> PathBuf {
    input.unwrap_or_else(|| PathBuf::from(&cfg.input))
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = resolve_input(input, &cfg);

    SpecParser::new()
        .validate_only(&input)
        .with_context(|| format!("{} failed validation", input.display()))?;

    // Also check that it builds into the IR.
    let raw = load::load(&input)?;
    let spec = transform::build(&raw)?;

    eprintln!(
        "Valid OpenAPI {} spec: {}",
        spec.openapi.as_deref().unwrap_or("3.x"),
        spec.title()
    );
    eprintln!("  Version: {}", spec.version());
    eprintln!("  Endpoints: {}", spec.endpoints.len());
    eprintln!("  Schemas: {}", spec.schemas.len());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(
    input: Option<PathBuf>,
    format: Option<InspectFormat>,
    tag: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = resolve_input(input, &cfg);
    let format = format.unwrap_or_else(|| cfg.inspect.format.into());
    let tag = tag.or(cfg.inspect.tag);

    let spec = SpecParser::new().parse(&input)?;
    let summary = build_inspect_summary(&spec, tag.as_deref());

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &ParsedSpec, tag: Option<&str>) -> serde_json::Value {
    let endpoints: Vec<serde_json::Value> = spec
        .endpoints
        .iter()
        .filter(|e| tag.is_none_or(|t| e.has_tag(t)))
        .map(|e| {
            json!({
                "handler": e.handler_name(),
                "method": e.method.as_str(),
                "path": e.path,
                "tags": e.tags,
                "parameters": e.parameters.len(),
                "request_body": e.has_request_body(),
                "deprecated": e.deprecated,
            })
        })
        .collect();

    let schemas: Vec<serde_json::Value> = spec
        .schemas
        .iter()
        .map(|s| {
            let fields: serde_json::Map<String, serde_json::Value> = s
                .fields()
                .into_iter()
                .map(|f| (f.name.to_string(), json!(f.field_type.to_string())))
                .collect();
            json!({
                "name": s.name,
                "type_name": s.type_name(),
                "table_name": s.table_name(),
                "fields": fields,
            })
        })
        .collect();

    let groups: serde_json::Map<String, serde_json::Value> = spec
        .tag_groups()
        .into_iter()
        .map(|g| {
            let handlers: Vec<String> = g.endpoints.iter().map(|e| e.handler_name()).collect();
            (g.name.to_string(), json!(handlers))
        })
        .collect();

    json!({
        "info": {
            "title": spec.title(),
            "version": spec.version(),
            "description": spec.description(),
        },
        "project_name": spec.project_name(),
        "endpoints": endpoints,
        "schemas": schemas,
        "tag_groups": groups,
    })
}

fn cmd_init(name: &str, output: &Path, force: bool) -> Result<()> {
    let file_name = starter::file_name(name)
        .with_context(|| format!("`{name}` does not produce a usable file name"))?;
    let spec_path = output.join(file_name);

    if spec_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            spec_path.display()
        );
    }

    fs::create_dir_all(output)
        .with_context(|| format!("failed to create directory {}", output.display()))?;
    fs::write(&spec_path, starter::render(name))
        .with_context(|| format!("failed to write {}", spec_path.display()))?;

    eprintln!("Created {}", spec_path.display());
    eprintln!("  Validate it: spineapi validate --input {}", spec_path.display());
    Ok(())
}

fn cmd_init_config(force: bool) -> Result<()> {
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

fn cmd_enhance(paths: &[PathBuf]) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let Some(argv) = cfg.enhance.command.as_deref() else {
        anyhow::bail!("no enhance.command configured in {CONFIG_FILE_NAME}");
    };
    let enhancer = CommandEnhancer::from_argv(argv)?;

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push(GeneratedFile {
            path: path.display().to_string(),
            content,
        });
    }

    let originals: Vec<String> = files.iter().map(|f| f.content.clone()).collect();
    let changed = enhance_files(&mut files, &enhancer, &cfg.enhance.extensions);

    for (file, original) in files.iter().zip(&originals) {
        if file.content != *original {
            fs::write(&file.path, &file.content)
                .with_context(|| format!("failed to write {}", file.path))?;
            eprintln!("  enhanced {}", file.path);
        } else {
            debug!("unchanged {}", file.path);
        }
    }

    eprintln!("Enhanced {changed} of {} files.", files.len());
    Ok(())
}
