pub mod paths;
pub mod settings;

pub use paths::PathManager;
pub use settings::{ProgressBackend, Settings};

/// Load environment variables from .env files.
/// Project directory values (./.env) take precedence over home directory
/// values (~/.env), and both lose to variables already in the environment.
/// Call this before parsing CLI args to ensure env vars are available.
pub fn load_env_file() {
    // dotenv never overrides a variable that is already set
    dotenv::dotenv().ok();

    if let Some(home) = dirs::home_dir() {
        let home_env_path = home.join(".env");
        dotenv::from_path(home_env_path).ok();
    }
}
