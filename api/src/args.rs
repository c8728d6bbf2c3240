use clap::Parser;
use mealprep_core::domain::common::{DEFAULT_GEMINI_BASE_URL, LLMConfig, MealPrepConfig};

/// Dev-server origins that are always allowed.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:4173",
    "http://127.0.0.1:4173",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "mealprep-api", version, about = "Spooky Meal Prep API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8787)]
    pub port: u16,

    /// Prefix for every route, e.g. `/v1`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Extra CORS origins, comma separated.
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

impl ServerArgs {
    /// Default origins followed by configured ones, trimmed and deduplicated.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = Vec::new();

        for origin in DEFAULT_ALLOWED_ORIGINS
            .iter()
            .copied()
            .chain(self.allowed_origins.iter().map(String::as_str))
        {
            let origin = origin.trim().trim_end_matches('/');
            if !origin.is_empty() && !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_string());
            }
        }

        origins
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    /// Emit logs as JSON lines.
    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for MealPrepConfig {
    fn from(args: Args) -> Self {
        MealPrepConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_merge_defaults() {
        let args = Args::parse_from([
            "mealprep-api",
            "--gemini-api-key",
            "key",
            "--allowed-origins",
            "https://spooky.example/, http://localhost:5173,,https://other.example",
        ]);

        assert_eq!(
            args.server.allowed_origins(),
            vec![
                "http://localhost:5173",
                "http://127.0.0.1:5173",
                "http://localhost:4173",
                "http://127.0.0.1:4173",
                "https://spooky.example",
                "https://other.example",
            ]
        );
    }

    #[test]
    fn test_args_convert_to_core_config() {
        let args = Args::parse_from([
            "mealprep-api",
            "--gemini-api-key",
            "key",
            "--gemini-model",
            "gemini-pro",
        ]);

        let config = MealPrepConfig::from(args);

        assert_eq!(config.llm.gemini_api_key, "key");
        assert_eq!(config.llm.gemini_model, "gemini-pro");
        assert_eq!(config.llm.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
    }
}
