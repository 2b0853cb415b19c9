use crate::cli::CredentialArgs;
use migrate_core::{AppConfig, MigrateResult};
use std::path::Path;

/// Configuration resolved from the config file, the environment and flags,
/// in increasing order of precedence.
pub struct CliContext {
    pub config: AppConfig,
}

impl CliContext {
    pub fn load(config_path: Option<&Path>) -> MigrateResult<Self> {
        let mut config = match config_path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };
        config.apply_env();
        Ok(Self { config })
    }

    pub fn apply_flags(&mut self, flags: &CredentialArgs) {
        let set = |target: &mut Option<String>, value: &Option<String>| {
            if let Some(v) = value.as_ref().filter(|v| !v.trim().is_empty()) {
                *target = Some(v.clone());
            }
        };
        set(&mut self.config.source.api_key, &flags.trello_key);
        set(&mut self.config.source.api_token, &flags.trello_token);
        set(&mut self.config.destination.base_url, &flags.vikunja_url);
        set(&mut self.config.destination.token, &flags.vikunja_token);
        if let Some(rate) = flags.requests_per_second {
            self.config.upload.requests_per_second = rate;
        }
    }
}
