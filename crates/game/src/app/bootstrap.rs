use std::fs;
use std::path::{Path, PathBuf};

use lightsout_engine::SessionConfig;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::loop_runner::LoopConfig;

const CONFIG_PATH_ENV_VAR: &str = "LIGHTSOUT_CONFIG";

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) session_config: SessionConfig,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config '{path}' at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("config '{path}' field {field}: {message}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        message: &'static str,
    },
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!("=== Lights Out Startup ===");

    let session_config = match std::env::var_os(CONFIG_PATH_ENV_VAR) {
        Some(raw) => load_session_config(Path::new(&raw))?,
        None => SessionConfig::default(),
    };
    info!(
        time_limit_s = session_config.time_limit_seconds,
        total_tasks = session_config.total_task_count,
        sound_enabled = session_config.sound_enabled,
        show_mini_map = session_config.show_mini_map,
        movement_tps = session_config.ticks.movement_tps,
        "session_config"
    );

    let loop_config = LoopConfig {
        max_frame_delta: session_config.ticks.max_frame_delta(),
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        loop_config,
        session_config,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

pub(crate) fn load_session_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_session_config(path, &raw)?;
    validate_session_config(path, &config)?;
    info!(path = %path.display(), "config_loaded");
    Ok(config)
}

fn parse_session_config(path: &Path, raw: &str) -> Result<SessionConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, SessionConfig>(&mut deserializer).map_err(|error| {
        let field = error.path().to_string();
        ConfigError::Parse {
            path: path.to_path_buf(),
            field,
            source: error.into_inner(),
        }
    })
}

fn validate_session_config(path: &Path, config: &SessionConfig) -> Result<(), ConfigError> {
    if config.time_limit_seconds == 0 {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            field: "time_limit_seconds",
            message: "must be at least 1",
        });
    }
    if config.ticks.movement_tps == 0 {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            field: "ticks.movement_tps",
            message: "must be at least 1",
        });
    }
    Ok(())
}
