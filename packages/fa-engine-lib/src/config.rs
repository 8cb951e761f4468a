use std::{fmt::Display, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        level.to_tracing_level()
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    /// Write the log to `./logs` instead of stderr.
    pub log_file: bool,
    pub log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

/// How transformed automata are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// The human readable dump.
    Text,
    Json,
    /// Graphviz dot.
    Dot,
    /// The textual input format, can be read back.
    Automaton,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "automaton" | "aut" => Ok(OutputFormat::Automaton),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Automaton => write!(f, "automaton"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub logger: LoggerConfig,
    pub output: OutputConfig,
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let canonic_path = std::fs::canonicalize(file_path)?;
        let content = std::fs::read_to_string(canonic_path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_optional_file<P: AsRef<Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [logger]
            enabled = true
            log_level = "Debug"
            "#,
        )
        .unwrap();

        assert!(config.logger.enabled);
        assert!(!config.logger.log_file);
        assert_eq!(config.logger.log_level, LogLevel::Debug);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.color);
    }

    #[test]
    fn output_section() {
        let config: EngineConfig = toml::from_str(
            r#"
            [output]
            format = "Dot"
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Dot);
        assert!(!config.output.color);
        assert_eq!(config.logger.log_level, LogLevel::Warn);
    }

    #[test]
    fn log_level_from_str() {
        assert_eq!("dbg".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("err".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(tracing::Level::from(LogLevel::Info), tracing::Level::INFO);
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let config = EngineConfig::from_optional_file::<&str>(None).unwrap();
        assert!(!config.logger.enabled);
    }
}
