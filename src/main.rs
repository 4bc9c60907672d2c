use std::path::PathBuf;

use cablelabels::cli::{Cli, Commands, ConfigAction};
use cablelabels::config::Config;
use cablelabels::error::{LabelError, Result};
use cablelabels::model::{Cable, Termination};
use cablelabels::render::{self, LabelRenderer};
use cablelabels::storage::CableStore;

fn main() {
    init_logging();

    let cli = Cli::parse_args();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { dry_run } => cmd_generate(cli.config, dry_run),
        Commands::Import { file } => cmd_import(cli.config, file),
        Commands::List { json } => cmd_list(cli.config, json),
        Commands::Show { id } => cmd_show(cli.config, id),
        Commands::Render { id, template } => cmd_render(cli.config, id, template),
        Commands::Config { action } => cmd_config(cli.config, action),
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cablelabels=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_generate(config_path: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let config = load_config(config_path.clone())?;
    let store = open_store(&config)?;
    let renderer = LabelRenderer::from_config_path(config_path);

    if dry_run {
        for cable in store.unlabeled()? {
            let label = renderer.render(&cable).map_err(|e| LabelError::Generate {
                cable: cable.to_string(),
                source: Box::new(e),
            })?;
            println!("Would update cable \"{}\" with label \"{}\"", cable, label);
        }
        return Ok(());
    }

    let updated = store.relabel_missing(&renderer)?;
    for (id, label) in &updated {
        tracing::debug!(id, "labeled cable");
        println!("Successfully updated cable \"{}\"", label);
    }

    tracing::info!("Labeled {} cable(s)", updated.len());
    Ok(())
}

fn cmd_import(config_path: Option<PathBuf>, file: PathBuf) -> Result<()> {
    let config = load_config(config_path.clone())?;
    let store = open_store(&config)?;
    let renderer = LabelRenderer::from_config_path(config_path);

    let content = std::fs::read_to_string(&file).map_err(|e| LabelError::Io {
        source: e,
        context: format!("Failed to read import file: {:?}", file),
    })?;
    let mut cables: Vec<Cable> = serde_json::from_str(&content).map_err(|e| LabelError::Json {
        source: e,
        context: format!("Failed to parse import file: {:?}", file),
    })?;

    for cable in &mut cables {
        // The store assigns identifiers; ignore any carried in the file
        cable.pk = None;
        store.save(cable, &renderer)?;
        println!("Imported cable \"{}\"", cable);
    }

    println!("✓ Imported {} cable(s)", cables.len());
    Ok(())
}

fn cmd_list(config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let cables = store.all()?;

    if json {
        let out = serde_json::to_string_pretty(&cables).map_err(|e| LabelError::Json {
            source: e,
            context: "Failed to serialize cables".to_string(),
        })?;
        println!("{}", out);
        return Ok(());
    }

    if cables.is_empty() {
        println!("No cables in the store");
        return Ok(());
    }

    for cable in &cables {
        let id = cable.pk.unwrap_or_default();
        let label = if cable.is_unlabeled() {
            "(unlabeled)"
        } else {
            cable.label.as_str()
        };
        println!(
            "#{:<6} {:<28} {} -> {}",
            id,
            label,
            endpoint(&cable.a_terminations),
            endpoint(&cable.b_terminations)
        );
    }

    Ok(())
}

fn endpoint(terminations: &[Termination]) -> String {
    terminations
        .first()
        .map(|t| format!("{}:{}", t.device.name, t.name))
        .unwrap_or_else(|| "-".to_string())
}

fn cmd_show(config_path: Option<PathBuf>, id: i64) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let cable = store.get(id)?;

    let out = serde_json::to_string_pretty(&cable).map_err(|e| LabelError::Json {
        source: e,
        context: "Failed to serialize cable".to_string(),
    })?;
    println!("{}", out);
    Ok(())
}

fn cmd_render(config_path: Option<PathBuf>, id: i64, template: Option<String>) -> Result<()> {
    let config = load_config(config_path.clone())?;
    let store = open_store(&config)?;
    let cable = store.get(id)?;

    let label = match template {
        Some(template) => render::render_label(&cable, &template)?,
        None => LabelRenderer::from_config_path(config_path).render(&cable)?,
    };

    println!("{}", label);
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json = serde_json::to_string_pretty(&config).map_err(|e| LabelError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;
            println!("{}", json);
        }
        ConfigAction::Init { force } => {
            let path = resolve_config_path(config_path)?;

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::GetTemplate => {
            let config = load_config(config_path)?;
            println!("{}", config.labels.template);
        }
        ConfigAction::SetTemplate { template } => {
            render::check_template(&template)?;

            let path = resolve_config_path(config_path)?;
            let mut config = if path.exists() {
                Config::load(&path)?
            } else {
                Config::default()
            };
            config.labels.template = template;
            config.touch();
            config.save(&path)?;

            println!("✓ Label template updated");
            println!("  Applies to the next save; existing labels are kept");
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let resolved = resolve_config_path(config_path.clone())?;
    if !resolved.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'cablelabels config init' to create one."
        );
    }
    Config::load_or_default(Some(&resolved))
}

fn resolve_config_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => Config::default_path(),
    }
}

fn open_store(config: &Config) -> Result<CableStore> {
    CableStore::open(&config.database_path()?)
}
