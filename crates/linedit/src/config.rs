use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::try_exists;

const DEFAULT_PROMPT: &str = ">>> ";
const DEFAULT_CLOSE_QUESTION: &str =
    "All unsaved changes will be lost. Are you sure you want to close the editor? (Y/n): ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Printed before every command is read.
    pub prompt: String,
    /// Asked when `close` finds unsaved changes.
    pub close_question: String,
    /// When false, `close` with unsaved changes is refused instead of asked.
    #[serde(default = "default_confirm")]
    pub confirm_unsaved_close: bool,
}

fn default_confirm() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: String::from(DEFAULT_PROMPT),
            close_question: String::from(DEFAULT_CLOSE_QUESTION),
            confirm_unsaved_close: true,
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if try_exists(&config_path).await? {
                match tokio::fs::read_to_string(&config_path).await {
                    Ok(content) => {
                        if content.trim().is_empty() {
                            log::warn!("Config file is empty, creating new one");
                            let default_config = Self::default();
                            let _ = default_config.save().await;
                            return Ok(default_config);
                        }

                        match serde_json::from_str::<Self>(&content) {
                            Ok(mut config) => {
                                config.validate()?;
                                log::info!(
                                    "Successfully loaded config from: {}",
                                    config_path.display()
                                );
                                return Ok(config);
                            }
                            Err(json_err) => {
                                log::error!("Failed to parse config file: {}", json_err);

                                let backup_path = config_path.with_extension("bak");
                                if let Err(e) = tokio::fs::copy(&config_path, &backup_path).await {
                                    log::warn!("Failed to backup broken config: {}", e);
                                } else {
                                    log::info!(
                                        "Backed up broken config to: {}",
                                        backup_path.display()
                                    );
                                }

                                let default_config = Self::default();
                                let _ = default_config.save().await;
                                return Ok(default_config);
                            }
                        }
                    }
                    Err(io_err) => {
                        log::error!("Failed to read config file: {}", io_err);
                    }
                }
            } else {
                log::info!("Config file does not exist, creating default");
            }
        }

        let default_config = Self::default();
        let _ = default_config.save().await;
        Ok(default_config)
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_path() {
            let mut config_to_save = self.clone();
            config_to_save.validate()?;

            if let Some(parent) = config_path.parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return Err(anyhow::anyhow!(
                        "failed to create config directory: {} - {}",
                        parent.display(),
                        e
                    ));
                }
            }

            let content = serde_json::to_string_pretty(&config_to_save)
                .map_err(|e| anyhow::anyhow!("failed to serialize config: {}", e))?;
            if let Err(e) = tokio::fs::write(&config_path, content).await {
                return Err(anyhow::anyhow!(
                    "failed to write config file: {} - {}",
                    config_path.display(),
                    e
                ));
            }
            log::info!("Successfully saved config to: {}", config_path.display());
        }
        Ok(())
    }

    /// Validate configuration values and fix invalid ones
    pub fn validate(&mut self) -> Result<()> {
        let mut has_issues = false;

        if self.prompt.is_empty() || self.prompt.contains('\n') {
            log::warn!("Invalid prompt: {:?}, using default", self.prompt);
            self.prompt = DEFAULT_PROMPT.to_string();
            has_issues = true;
        }

        if self.close_question.trim().is_empty() {
            log::warn!("Empty close question, using default");
            self.close_question = DEFAULT_CLOSE_QUESTION.to_string();
            has_issues = true;
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }

        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LINEDIT_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("LINEDIT_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "linedit", "linedit")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
