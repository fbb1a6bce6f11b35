use std::path::PathBuf;

use clap::Parser;

/// Front-end dev servers allowed to call the API with credentials.
pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://127.0.0.1:3000",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://localhost:5173",
];

/// Process configuration. Flags win over environment variables, which may
/// also come from a `.env` file.
#[derive(Debug, Clone, Parser)]
#[command(name = "toy-store", version, about = "Toy catalogue backend")]
pub struct AppConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3030)]
    pub port: u16,

    /// JSON file holding the whole toy collection.
    #[arg(long, env = "TOY_DATA_FILE", default_value = "data/toy.json")]
    pub data_file: PathBuf,

    /// Directory with the front-end build; `index.html` is the fallback page.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_CORS_ORIGINS
    )]
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
