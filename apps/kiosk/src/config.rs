use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("kiosk.toml") {
        apply_file_settings(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_settings_override_the_default() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "server_url = \"http://10.0.0.5:9000\"\n");
        assert_eq!(settings.server_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn malformed_or_irrelevant_files_leave_the_default() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "not toml at all [");
        apply_file_settings(&mut settings, "other_key = \"value\"\n");
        assert_eq!(settings.server_url, Settings::default().server_url);
    }
}
