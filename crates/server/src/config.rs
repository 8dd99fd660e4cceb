use std::{collections::HashMap, fs};

use server_api::daily::{is_valid_room_ttl, DailyConfig, DAILY_API_URL, ROOM_NAME_PREFIX};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub daily_api_key: String,
    pub daily_api_url: String,
    pub room_name_prefix: String,
    pub room_ttl_seconds: i64,
    pub static_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8888".into(),
            daily_api_key: String::new(),
            daily_api_url: DAILY_API_URL.into(),
            room_name_prefix: ROOM_NAME_PREFIX.into(),
            room_ttl_seconds: 3600,
            static_dir: None,
        }
    }
}

impl Settings {
    pub fn daily(&self) -> DailyConfig {
        DailyConfig {
            api_key: self.daily_api_key.clone(),
            api_url: self.daily_api_url.clone(),
            room_name_prefix: self.room_name_prefix.clone(),
            room_ttl_seconds: self.room_ttl_seconds,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml` entries, then environment variables.
pub fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => apply_file_config(&mut settings, &file_cfg),
            Err(error) => warn!(%error, "ignoring unreadable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("DAILY_API_KEY") {
        settings.daily_api_key = v;
    }
    if let Some(v) = env("APP__DAILY_API_KEY") {
        settings.daily_api_key = v;
    }

    if let Some(v) = env("DAILY_API_URL") {
        settings.daily_api_url = v;
    }
    if let Some(v) = env("APP__DAILY_API_URL") {
        settings.daily_api_url = v;
    }

    if let Some(v) = env("APP__ROOM_NAME_PREFIX") {
        settings.room_name_prefix = v;
    }

    if let Some(v) = env("APP__ROOM_TTL_SECONDS") {
        if let Some(ttl) = parse_room_ttl("APP__ROOM_TTL_SECONDS", &v) {
            settings.room_ttl_seconds = ttl;
        }
    }

    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = Some(v);
    }

    settings
}

fn apply_file_config(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("daily_api_url") {
        settings.daily_api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("room_name_prefix") {
        settings.room_name_prefix = v.clone();
    }
    if let Some(v) = file_cfg.get("room_ttl_seconds") {
        if let Some(ttl) = parse_room_ttl("room_ttl_seconds", v) {
            settings.room_ttl_seconds = ttl;
        }
    }
    if let Some(v) = file_cfg.get("static_dir") {
        settings.static_dir = Some(v.clone());
    }
}

/// Room lifetimes must be positive and small enough to add to the current time.
fn parse_room_ttl(source: &str, raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(ttl) if is_valid_room_ttl(ttl) => Some(ttl),
        Ok(ttl) => {
            warn!(source, ttl, "ignoring out-of-range room lifetime");
            None
        }
        Err(error) => {
            warn!(%error, source, value = raw, "ignoring invalid room lifetime");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
