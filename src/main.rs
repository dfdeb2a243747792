// --- studyplan - estructura de programas y enlace de cursos ---

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;

use studyplan::config::{parse_db_url, Config};
use studyplan::models::Course;
use studyplan::run_server;
use studyplan::seed::{seed_catalog, SeedOptions};
use studyplan::store::Store;
use studyplan::structure::ProgramCatalog;

#[derive(Parser)]
#[command(name = "studyplan", about = "Program structures, course linking and credit summaries")]
struct Cli {
    /// URL de la base (sqlite://, file://, postgres://); pisa STUDYPLAN_DB_URL
    #[arg(long, global = true)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Levanta la API HTTP de sólo lectura
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// Siembra las tablas program_* desde el catálogo canónico
    Seed {
        /// JSON de programas (por defecto los datos embebidos)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Siembra aunque haya datos inconsistentes
        #[arg(long)]
        allow_inconsistent: bool,
        /// JSON con cursos para cargar en el directorio local
        #[arg(long)]
        courses: Option<PathBuf>,
    },
    /// Valida el catálogo sin tocar la base
    Validate {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn load_catalog(file: Option<PathBuf>, config: &Config) -> studyplan::Result<ProgramCatalog> {
    match file.or_else(|| config.programs_file.clone()) {
        Some(path) => {
            info!("loading programs from {:?}", path);
            ProgramCatalog::from_path(path)
        }
        None => ProgramCatalog::builtin(),
    }
}

fn run_seed(
    config: &Config,
    file: Option<PathBuf>,
    allow_inconsistent: bool,
    courses: Option<PathBuf>,
) -> studyplan::Result<()> {
    let catalog = load_catalog(file, config)?;
    let mut store = Store::open(&config.db)?;
    let report = seed_catalog(&mut store, &catalog, SeedOptions { allow_inconsistent })?;
    println!("{}", report.resumen());

    if let Some(path) = courses {
        let text = std::fs::read_to_string(&path)?;
        let list: Vec<Course> = serde_json::from_str(&text)?;
        let n = store.upsert_courses(&list)?;
        println!("{} cursos cargados en el directorio desde {:?}", n, path);
    }
    Ok(())
}

fn run_validate(config: &Config, file: Option<PathBuf>) -> studyplan::Result<bool> {
    let catalog = load_catalog(file, config)?;
    let errors = catalog.validate_all();
    for e in &errors {
        println!("{}", e);
    }
    println!("{} programas, {} con problemas", catalog.len(), errors.len());
    Ok(errors.is_empty())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    if let Some(url) = cli.db_url.as_deref() {
        match parse_db_url(url) {
            Ok(target) => config.db = target,
            Err(e) => {
                error!("{}", e);
                std::process::exit(2);
            }
        }
    }

    match cli.command {
        Command::Serve { bind } => {
            if let Some(b) = bind {
                config.bind = b;
            }
            run_server(config).await
        }
        Command::Seed { file, allow_inconsistent, courses } => {
            if let Err(e) = run_seed(&config, file, allow_inconsistent, courses) {
                error!("seed failed: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Validate { file } => match run_validate(&config, file) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
    }
}
