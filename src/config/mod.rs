pub mod loader;
pub mod types;

pub use loader::{load_config, load_from_env, load_from_lookup};
pub use types::{AppConfig, AppSettings, PaperConfig, PingPongConfig};
