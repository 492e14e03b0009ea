//! Конфигурация сервиса из переменных окружения

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    /// Файл настроек; без него период хранится только в памяти
    pub store_path: Option<PathBuf>,
    pub alert_interval: Duration,
    /// Искусственная задержка обновления (имитация сети)
    pub refresh_delay: Duration,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            store_path: None,
            alert_interval: Duration::from_secs(30),
            refresh_delay: Duration::from_millis(1000),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Читает `.env` (если есть), затем переменные окружения
    pub fn from_env() -> DashboardResult<Self> {
        // .env необязателен
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Чтение через произвольный источник переменных
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let alert_interval_secs: u64 = parse_or(
            &lookup,
            "DASHBOARD_ALERT_INTERVAL_SECS",
            defaults.alert_interval.as_secs(),
        )?;
        if alert_interval_secs == 0 {
            return Err(DashboardError::Config(
                "DASHBOARD_ALERT_INTERVAL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self {
            host: lookup("DASHBOARD_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "DASHBOARD_PORT", defaults.port)?,
            store_path: lookup("DASHBOARD_STORE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            alert_interval: Duration::from_secs(alert_interval_secs),
            refresh_delay: Duration::from_millis(parse_or(
                &lookup,
                "DASHBOARD_REFRESH_DELAY_MS",
                defaults.refresh_delay.as_millis() as u64,
            )?),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> DashboardResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DashboardError::Config(format!("invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
