use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "plan-gateway")]
#[command(about = "Safety and quota gate in front of a hosted completion API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    // Credential for the completion provider
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: String,

    // Base url of the OpenAI-compatible provider
    #[arg(long, env = "PROVIDER_URL", default_value = "https://api.groq.com/openai/v1")]
    pub provider_url: String,

    // Model identifier sent with every completion
    #[arg(short, long, env = "MODEL", default_value = "llama-3.1-8b-instant")]
    pub model: String,

    // Rate limit max requests per window, per client
    #[arg(long, env = "RATE_LIMIT", default_value_t = 5)]
    pub rate_limit: usize,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", default_value_t = 3600)]
    pub rate_window: u64,

    // Timeout for a single provider call, in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT", default_value_t = 30)]
    pub provider_timeout: u64,

    // How often idle clients are dropped from the limiter, in seconds
    #[arg(long, env = "PRUNE_INTERVAL", default_value_t = 300)]
    pub prune_interval: u64,

    // Static page served on "/"
    #[arg(long, env = "INDEX_FILE", default_value = "index.html")]
    pub index_file: PathBuf,
}

impl Args {
    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }

    pub fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.prune_interval)
    }
}
