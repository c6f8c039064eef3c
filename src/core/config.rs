/// Application configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATA_DIR | ./stitchdesk-data | Directory holding the local database |
/// | TENANT_NAME | Bolos Crew | Active tenant (client) name |
/// | SHEET_WEBHOOK | (empty) | Spreadsheet sink URL; empty disables sync |
/// | AUTO_SYNC | true | Push each new order to the sink automatically |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the local database file
    pub data_dir: String,
    /// Tenant display name; namespaces all persisted collections
    pub tenant_name: String,
    /// Spreadsheet sink URL (webhook receiving JSON). Empty = no sink.
    pub sheet_webhook: String,
    /// Push each new order to the sink as it is submitted
    pub auto_sync: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./stitchdesk-data".into()),
            tenant_name: std::env::var("TENANT_NAME").unwrap_or_else(|_| "Bolos Crew".into()),
            sheet_webhook: std::env::var("SHEET_WEBHOOK").unwrap_or_default(),
            auto_sync: std::env::var("AUTO_SYNC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Whether a sink is configured at all
    pub fn has_sink(&self) -> bool {
        !self.sheet_webhook.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
