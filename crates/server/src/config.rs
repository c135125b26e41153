use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const ENV_PREFIX: &str = "COMMENT_GATE_";
pub const DEFAULT_ADMIN_TOKEN: &str = "change_me_please";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub mail: MailSettings,
    pub security: SecuritySettings,
    pub verification: VerificationSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    /// JSON array of `{id, title, slug}` upserted into the blog mirror at startup.
    pub seed_file: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    pub admin_token: String,
}

#[derive(Deserialize, Clone)]
pub struct VerificationSettings {
    pub code_ttl_minutes: i64,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MailMode {
    Log,
    Smtp,
}

#[derive(Deserialize, Clone)]
pub struct MailSettings {
    pub mode: MailMode,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_secure: bool,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub from_name: Option<String>,
    pub timeout_secs: u64,
}

fn required(value: Option<String>, key: &str) -> anyhow::Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow::anyhow!("mail.{} is required in smtp mode", key))
}

impl TryFrom<MailSettings> for adapter::MailConfig {
    type Error = anyhow::Error;

    fn try_from(settings: MailSettings) -> anyhow::Result<Self> {
        match settings.mode {
            MailMode::Log => Ok(adapter::MailConfig::Log),
            MailMode::Smtp => Ok(adapter::MailConfig::Smtp(adapter::SmtpMailerConfig {
                host: required(settings.smtp_host, "smtp_host")?,
                port: settings.smtp_port,
                secure: settings.smtp_secure,
                user: required(settings.smtp_user, "smtp_user")?,
                password: required(settings.smtp_pass, "smtp_pass")?,
                from_name: settings.from_name,
                timeout: Duration::from_secs(settings.timeout_secs),
            })),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars(std::env::vars());
        let env_json =
            serde_json::to_string(&env_map).map_err(|e| ConfigError::Message(e.to_string()))?;

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/comments.db")?
            .set_default("mail.mode", "log")?
            .set_default("mail.smtp_port", i64::from(adapter::DEFAULT_SMTP_PORT))?
            .set_default("mail.smtp_secure", false)?
            .set_default("mail.timeout_secs", 10)?
            .set_default("security.admin_token", DEFAULT_ADMIN_TOKEN)?
            .set_default("verification.code_ttl_minutes", 10)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        if settings.verification.code_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "verification.code_ttl_minutes must be positive".to_string(),
            ));
        }
        Ok(settings)
    }
}

/// `COMMENT_GATE_MAIL__SMTP_HOST=x` becomes `mail.smtp_host = x`.
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
