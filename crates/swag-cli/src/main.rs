use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swag_core::config::{self, CONFIG_FILE_NAME, SwagConfig};
use swag_core::parse::{self, spec::SwaggerSpec};
use swag_core::transform::extract::{self, ExtractConfig};
use swag_core::transform::name_normalizer::operation_name;
use swag_core::CodeGenerator;
use swag_go_client::GoClientGenerator;

#[derive(Parser)]
#[command(
    name = "swag",
    about = "Swagger 2.0 schema extractor and Go client generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Go client from a Swagger document
    Generate {
        /// Path to the Swagger document (JSON or YAML)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File to write; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package clause of the generated file
        #[arg(long)]
        package: Option<String>,

        /// Base URL the client falls back to
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Hoist inline schemas into named definitions
    Extract {
        /// Path to the Swagger document (JSON or YAML)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the extraction rules (JSON)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// File to write; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a Swagger document
    Validate {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Summarize the definitions and operations of a Swagger document
    Inspect {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swag configuration
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

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            package,
            base_url,
        } => cmd_generate(input, output, package, base_url),

        Commands::Extract {
            input,
            rules,
            output,
        } => cmd_extract(input, rules, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swag", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SwagConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &Path) -> Result<SwaggerSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let spec = match ext {
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_json(&content),
    }
    .with_context(|| format!("failed to decode {}", path.display()))?;
    log::debug!("loaded {}", path.display());
    Ok(spec)
}

/// Write to `output`, or to standard output when there is none.
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("  wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to standard output")?;
        }
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    package: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(package) = package {
        cfg.client.package = package;
    }
    if base_url.is_some() {
        cfg.client.base_url = base_url;
    }
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));

    let spec = load_spec(&input)?;
    let files = GoClientGenerator
        .generate(&spec, &cfg.client)
        .with_context(|| format!("failed to generate a client for {}", input.display()))?;

    for file in &files {
        write_output(output.as_deref(), &file.content)?;
    }
    Ok(())
}

fn cmd_extract(
    input: Option<PathBuf>,
    rules: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let Some(rules) = rules.or_else(|| cfg.rules.as_ref().map(PathBuf::from)) else {
        anyhow::bail!("no extraction rules given. Pass --rules or set `rules` in {CONFIG_FILE_NAME}.");
    };

    let mut spec = load_spec(&input)?;
    let content = fs::read_to_string(&rules)
        .with_context(|| format!("failed to read {}", rules.display()))?;
    let rule_set = ExtractConfig::from_json(&content)
        .with_context(|| format!("failed to decode {}", rules.display()))?;

    extract::extract(&mut spec, &rule_set.extractions)
        .with_context(|| format!("failed to extract schemas from {}", input.display()))?;

    let json = parse::to_json(&spec)?;
    write_output(output.as_deref(), &json)
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let spec = load_spec(&input)?;
    let title = spec.info.as_ref().map(|i| i.title.as_str()).unwrap_or("");
    let version = spec.info.as_ref().map(|i| i.version.as_str()).unwrap_or("");

    eprintln!("Valid Swagger {} document: {}", spec.swagger, title);
    eprintln!("  Version: {}", version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Definitions: {}", spec.definitions.len());
    let operations: usize = spec.paths.values().map(|item| item.operations().count()).sum();
    eprintln!("  Operations: {}", operations);

    // Also validate that a client can be generated from it
    let files = GoClientGenerator.generate(&spec, &config::ClientConfig::default())?;
    let lines: usize = files.iter().map(|f| f.content.lines().count()).sum();
    eprintln!("  Generated lines: {}", lines);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;

    let summary = build_inspect_summary(&spec);

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

fn build_inspect_summary(spec: &SwaggerSpec) -> serde_json::Value {
    use swag_core::parse::schema::SchemaKind;

    let definitions: Vec<serde_json::Value> = spec
        .sorted_definitions()
        .into_iter()
        .map(|(name, schema)| {
            serde_json::json!({
                "name": name,
                "kind": match schema.kind() {
                    SchemaKind::Ref(_) => "ref",
                    SchemaKind::Array(_) => "array",
                    SchemaKind::Object(_) => "object",
                    SchemaKind::Primitive(_) => "primitive",
                    SchemaKind::Unhandled => "unhandled",
                },
                "properties": schema.properties.len(),
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = spec
        .sorted_paths()
        .into_iter()
        .flat_map(|(path, item)| {
            item.operations().map(move |(method, op)| {
                let codes: Vec<u16> = op.status_codes().into_iter().map(|(c, _)| c).collect();
                serde_json::json!({
                    "name": operation_name(op.operation_id.as_deref(), method.as_str(), path),
                    "method": method.as_str(),
                    "path": path,
                    "responses": codes,
                })
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.as_ref().map(|i| i.title.as_str()),
            "version": spec.info.as_ref().map(|i| i.version.as_str()),
        },
        "base_url": spec.default_base_url(),
        "definitions": definitions,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
