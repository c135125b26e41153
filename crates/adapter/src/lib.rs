mod common;
mod drivers;

pub use common::sender::format_sender;
pub use drivers::log::LogMailer;
pub use drivers::smtp::{SmtpMailer, SmtpMailerConfig, DEFAULT_SMTP_PORT};

use std::sync::Arc;

use domain::ports::EmailDelivery;
use tracing::info;

#[derive(Debug, Clone)]
pub enum MailConfig {
    Log,
    Smtp(SmtpMailerConfig),
}

/// Picks the delivery driver for the configured mode.
pub fn build_mailer(config: MailConfig) -> anyhow::Result<Arc<dyn EmailDelivery>> {
    let mailer: Arc<dyn EmailDelivery> = match config {
        MailConfig::Log => {
            info!("Initializing mailer in LOG mode, codes are only written to the log");
            Arc::new(LogMailer)
        }
        MailConfig::Smtp(smtp_conf) => {
            info!(
                "Initializing mailer in SMTP mode via {}:{}",
                smtp_conf.host, smtp_conf.port
            );
            Arc::new(SmtpMailer::new(smtp_conf)?)
        }
    };
    Ok(mailer)
}
