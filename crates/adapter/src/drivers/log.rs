use anyhow::Result;
use async_trait::async_trait;
use domain::ports::EmailDelivery;
use domain::protocol::VerificationEmail;
use tracing::info;

/// Development driver: no mail leaves the machine, the code goes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl EmailDelivery for LogMailer {
    async fn send(&self, email: &VerificationEmail) -> Result<()> {
        info!("[DEV] Verification code for {}: {}", email.to, email.code);
        Ok(())
    }
}
