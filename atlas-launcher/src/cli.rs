use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Serves the Hero Atlas API and the built frontend")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,
    /// JSON file backing the store when no SQLite URL is given
    #[arg(long, default_value = "db.json")]
    pub local_db_path: PathBuf,
    #[arg(long, env = "DATABASE_URL")]
    pub sqlite_url: Option<String>,
    /// Superhero-API style records loaded into an empty store
    #[arg(long)]
    pub seed_file: Option<PathBuf>,
    /// Fetches heroes from superheroapi.com into an empty store
    #[arg(long, env = "SUPERHERO_API_TOKEN", hide_env_values = true)]
    pub superhero_api_token: Option<String>,
    #[arg(long, env = "FRONTEND_ORIGIN")]
    pub frontend_origin: Option<String>,
}

impl Cli {
    pub fn settings(&self) -> backend::Settings {
        let database = match &self.sqlite_url {
            Some(url) => backend::dbs::DatabaseConfig::Sqlite { url: url.clone() },
            None => backend::dbs::DatabaseConfig::Local {
                path: self.local_db_path.clone(),
            },
        };
        backend::Settings {
            database,
            seed_file: self.seed_file.clone(),
            superhero_api_token: self.superhero_api_token.clone(),
            frontend_origin: self.frontend_origin.clone(),
        }
    }
}
