use anyhow::{Context, Result};
use autoextract_items::PageType;

/// Settings read from the environment (and `.env`). Command-line flags win
/// over anything here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Page type assumed when a command does not name one.
    pub page_type: PageType,
    /// Extra `tracing` filter directive, e.g. `autoextract_items=trace`.
    pub log_directive: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_type: PageType::Product,
            log_directive: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let page_type = match var("AUTOEXTRACT_PAGE_TYPE").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("AUTOEXTRACT_PAGE_TYPE={value}"))?,
            None => PageType::Product,
        };
        let log_directive = var("AUTOEXTRACT_LOG")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            page_type,
            log_directive,
        })
    }

    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  AUTOEXTRACT_PAGE_TYPE: {}", self.page_type);
        tracing::info!(
            "  AUTOEXTRACT_LOG: {}",
            self.log_directive.as_deref().unwrap_or("<not set>")
        );
    }
}
