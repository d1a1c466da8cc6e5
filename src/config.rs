use crate::types::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ASSETS_DIR: &str = "./assets";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const OFFLINE_MESSAGE: &str = "**Modo offline (simulação):** Sem API Key, não é possível gerar interpretação automática.  \nSugestão: analise médias, tendências e correlações. Por exemplo, se a curva de foco cai com o uso intenso de tecnologia, incentive pausas digitais e rotinas de descanso ativo.";
pub const ERROR_MESSAGE: &str =
    "**Erro:** falha ao obter resposta. Verifique sua API Key e conexão.";
pub const VALIDATION_MESSAGE: &str = "Preencha o tema e a pergunta/descrição.";
pub const NOTHING_TO_SAVE_MESSAGE: &str = "Nenhuma análise disponível para salvar.";
pub const NOTHING_TO_COPY_MESSAGE: &str = "Nenhuma análise disponível para copiar.";
pub const LOADING_MESSAGE: &str = "Gerando análise...";
pub const SUBMIT_LABEL: &str = "Gerar Análise";
pub const SUBMITTING_LABEL: &str = "Gerando...";
pub const COPY_LABEL: &str = "Copiar texto";
pub const COPIED_LABEL: &str = "Copiado!";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub llm: LLMConfig,
    pub paths: PathsConfig,
    pub messages: Messages,
}

#[derive(Debug, Clone)]
pub struct LLMConfig {
    pub google_api_key: String,
    pub api_base: String,
    pub model: String,
    pub google_search: bool,
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_retries: u32,
}

#[derive(Debug, Clone)]
pub struct PathsConfig {
    pub assets_dir: String,
    pub export_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// User-facing strings. Wording can change here without touching control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub offline: String,
    pub error: String,
    pub validation: String,
    pub nothing_to_save: String,
    pub nothing_to_copy: String,
    pub loading: String,
    pub submit_label: String,
    pub submitting_label: String,
    pub copy_label: String,
    pub copied_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            offline: OFFLINE_MESSAGE.to_string(),
            error: ERROR_MESSAGE.to_string(),
            validation: VALIDATION_MESSAGE.to_string(),
            nothing_to_save: NOTHING_TO_SAVE_MESSAGE.to_string(),
            nothing_to_copy: NOTHING_TO_COPY_MESSAGE.to_string(),
            loading: LOADING_MESSAGE.to_string(),
            submit_label: SUBMIT_LABEL.to_string(),
            submitting_label: SUBMITTING_LABEL.to_string(),
            copy_label: COPY_LABEL.to_string(),
            copied_label: COPIED_LABEL.to_string(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            google_api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            google_search: true,
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: 0,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            export_dir: default_export_dir(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys fall back to
    /// the defaults.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = parse_or(&lookup, "PRISMA_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let messages = Messages {
            offline: lookup("PRISMA_OFFLINE_MESSAGE").unwrap_or(defaults.messages.offline),
            error: lookup("PRISMA_ERROR_MESSAGE").unwrap_or(defaults.messages.error),
            ..defaults.messages
        };

        Ok(Self {
            llm: LLMConfig {
                google_api_key: lookup("GOOGLE_API_KEY")
                    .map(|k| k.trim().to_string())
                    .unwrap_or_default(),
                api_base: lookup("PRISMA_API_BASE").unwrap_or(defaults.llm.api_base),
                model: lookup("PRISMA_MODEL").unwrap_or(defaults.llm.model),
                google_search: parse_or(&lookup, "PRISMA_GOOGLE_SEARCH", true)?,
                request_timeout,
                max_retries: parse_or(&lookup, "PRISMA_MAX_RETRIES", 0)?,
            },
            paths: PathsConfig {
                assets_dir: lookup("PRISMA_ASSETS_DIR").unwrap_or(defaults.paths.assets_dir),
                export_dir: lookup("PRISMA_EXPORT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.paths.export_dir),
                log_dir: lookup("PRISMA_LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.paths.log_dir),
            },
            messages,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("prisma-analytics"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.llm.api_base, DEFAULT_API_BASE);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.llm.google_api_key.is_empty());
        assert!(config.llm.google_search);
        assert_eq!(config.llm.request_timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.llm.max_retries, 0);
        assert_eq!(config.paths.assets_dir, "./assets");
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", " abc "),
            ("PRISMA_MODEL", "gemini-2.0-flash"),
            ("PRISMA_GOOGLE_SEARCH", "false"),
            ("PRISMA_REQUEST_TIMEOUT_SECS", "0"),
            ("PRISMA_MAX_RETRIES", "2"),
            ("PRISMA_EXPORT_DIR", "/tmp/out"),
            ("PRISMA_OFFLINE_MESSAGE", "offline"),
        ]))
        .unwrap();

        assert_eq!(config.llm.google_api_key, "abc");
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert!(!config.llm.google_search);
        assert_eq!(config.llm.request_timeout, None);
        assert_eq!(config.llm.max_retries, 2);
        assert_eq!(config.paths.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.messages.offline, "offline");
        assert_eq!(config.messages.error, ERROR_MESSAGE);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("PRISMA_MAX_RETRIES", "many")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("PRISMA_MAX_RETRIES"));
    }
}
