use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ids::SpecIdentifier;
use crate::logging::{init_logging, LogConfig};
use crate::overlay::{ordinals, ConfigOverlay, LayeredConfig, SpecCodegenOptions};
use crate::resolver::{IdentifierResolver, PropertyKeys, Resolution};
use crate::settings::{CodegenSettings, DEFAULT_CONFIG_ROOT};
use crate::spec::{SpecContent, SpecInputModel, SpecReference};

/// Environment prefix for the environment configuration layer.
pub const ENV_PREFIX: &str = "SPECGEN_";

/// Command-line interface for specgen
///
/// Resolves spec identifiers and prints the configuration overlay a code
/// generator would merge for each spec.
#[derive(Parser, Debug)]
#[command(name = "specgen")]
#[command(about = "OpenAPI spec identifier and codegen config resolver", long_about = None)]
pub struct Cli {
    /// Identify specs by their info.title instead of their file name
    #[arg(long, global = true, env = "SPECGEN_USE_TITLE_AS_ID", value_parser = clap::builder::BoolishValueParser::new())]
    pub use_title_as_id: bool,

    /// Log each resolution step
    #[arg(short, long, global = true, env = "SPECGEN_VERBOSE", value_parser = clap::builder::BoolishValueParser::new())]
    pub verbose: bool,

    /// Namespace root of generated configuration keys
    #[arg(long, global = true, env = "SPECGEN_CONFIG_ROOT", default_value = DEFAULT_CONFIG_ROOT)]
    pub config_root: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitize raw names into configuration-key-safe identifiers
    Sanitize {
        /// Names to sanitize
        #[arg(required = true)]
        raw: Vec<String>,
    },
    /// Print the derived configuration keys for a spec
    Keys {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
    /// Build spec input models and print their configuration overlays
    Resolve {
        /// Paths to OpenAPI specification files (YAML or JSON)
        #[arg(short, long, required = true, num_args = 1..)]
        spec: Vec<PathBuf>,

        /// Base package for the generated code
        #[arg(short, long)]
        base_package: String,

        /// Record the skip-form-model flag (bare flag means true)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        skip_form_model: Option<bool>,

        /// User configuration (TOML) merged above the synthesized overlays
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Properties)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key=value` lines
    Properties,
    /// One JSON document
    Json,
}

#[derive(Debug, Serialize)]
struct ResolvedSpec {
    spec: String,
    identifier: SpecIdentifier,
    overlay: ConfigOverlay,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<SpecCodegenOptions>,
}

/// Parse arguments, set up logging and run.
///
/// # Errors
///
/// Returns an error if:
/// - A spec file cannot be read
/// - The user configuration cannot be read or parsed
/// - A spec name cannot be sanitized
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    init_logging(&log_config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run a parsed command, writing results to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Sanitize { raw } => {
            for name in raw {
                let id = SpecIdentifier::sanitize(name)?;
                writeln!(out, "{id}")?;
            }
            Ok(())
        }
        Commands::Keys { spec } => {
            let settings = base_settings(cli);
            let resolver = IdentifierResolver::new(&settings);
            let Resolution {
                identifier,
                source,
                keys,
            } = resolver.resolve(&SpecReference::path(spec))?;
            writeln!(out, "identifier={identifier}")?;
            writeln!(out, "source={}", source.as_str())?;
            writeln!(out, "prefix={}", keys.spec_prefix())?;
            writeln!(out, "base-package={}", keys.base_package())?;
            writeln!(out, "skip-form-model={}", keys.skip_form_model())?;
            Ok(())
        }
        Commands::Resolve {
            spec,
            base_package,
            skip_form_model,
            config,
            format,
        } => {
            let mut layers = LayeredConfig::new();
            if let Some(path) = config {
                layers.push(ConfigOverlay::from_toml_file(path, ordinals::APPLICATION)?);
            }
            layers.push(ConfigOverlay::from_env(ENV_PREFIX, ordinals::ENVIRONMENT));

            let from_config = CodegenSettings::from_layers(&layers, &cli.config_root)?;
            let settings = base_settings(cli)
                .with_title_as_id(cli.use_title_as_id || from_config.use_title_as_id)
                .with_verbose(cli.verbose || from_config.verbose);

            let mut resolved = Vec::with_capacity(spec.len());
            for path in spec {
                let model = build_model(path, base_package, *skip_form_model, &settings)?;
                let overlay = ConfigOverlay::from_model(&model);
                let options = if config.is_some() {
                    let merged = layers.clone().with_layer(overlay.clone());
                    let keys = PropertyKeys::new(&settings.config_root, model.identifier());
                    merged.codegen_options(&keys)?
                } else {
                    None
                };
                resolved.push(ResolvedSpec {
                    spec: path.display().to_string(),
                    identifier: model.identifier().clone(),
                    overlay,
                    options,
                });
            }

            match format {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut *out, &resolved)?;
                    writeln!(out)?;
                }
                OutputFormat::Properties => {
                    for r in &resolved {
                        writeln!(out, "# {} ({})", r.spec, r.identifier)?;
                        write!(out, "{}", r.overlay.to_properties())?;
                        if let Some(options) = &r.options {
                            writeln!(out, "# effective base-package={}", options.base_package)?;
                            writeln!(out, "# effective api-package={}", options.api_package)?;
                            writeln!(out, "# effective model-package={}", options.model_package)?;
                            writeln!(out, "# effective skip-form-model={}", options.skip_form_model)?;
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

fn base_settings(cli: &Cli) -> CodegenSettings {
    CodegenSettings::default()
        .with_config_root(cli.config_root.clone())
        .with_title_as_id(cli.use_title_as_id)
        .with_verbose(cli.verbose)
}

fn build_model(
    path: &Path,
    base_package: &str,
    skip_form_model: Option<bool>,
    settings: &CodegenSettings,
) -> anyhow::Result<SpecInputModel> {
    let filename = SpecReference::path(path).filename()?;
    let content = SpecContent::from_path(path)?;
    let mut builder = SpecInputModel::builder()
        .filename(filename)
        .content(content)
        .base_package(base_package);
    if let Some(skip) = skip_form_model {
        builder = builder.skip_form_model(skip);
    }
    builder
        .build(settings)
        .with_context(|| format!("Failed to build spec input model for {}", path.display()))
}
