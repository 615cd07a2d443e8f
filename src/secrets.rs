//! Credential retrieval abstraction
//!
//! Whether the token comes from the process environment or a per-org secret
//! store is a deployment concern; the core only needs one lookup capability.

/// Environment variable / secret name holding the bot token
pub const BOT_TOKEN_SECRET: &str = "SLACK_BOT_TOKEN";

/// Provides named secrets to the delivery orchestrator.
///
/// Implementations must treat an empty value the same as an absent one.
pub trait SecretProvider: Send + Sync {
    /// Look up a secret by name. Returns None when absent or empty.
    fn get_secret(&self, name: &str) -> Option<String>;
}

/// Secrets backed by process environment variables
#[derive(Debug, Default, Clone)]
pub struct EnvSecrets;

impl SecretProvider for EnvSecrets {
    fn get_secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed in-memory secrets, for wiring tests and embedded callers
#[derive(Debug, Default, Clone)]
pub struct StaticSecrets {
    entries: std::collections::HashMap<String, String>,
}

impl StaticSecrets {
    /// Create a provider with a single named secret
    pub fn with(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = std::collections::HashMap::new();
        entries.insert(name.into(), value.into());
        StaticSecrets { entries }
    }
}

impl SecretProvider for StaticSecrets {
    fn get_secret(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned().filter(|v| !v.is_empty())
    }
}
