use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for a bot client.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the environment, picking up a local `.env` first.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let api_url = env_str("BOT_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://api.telegram.org".to_string());

        let request_timeout =
            Duration::from_millis(env_u64("REQUEST_TIMEOUT_MS").unwrap_or(30_000));

        Ok(Self {
            bot_token,
            api_url,
            request_timeout,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
