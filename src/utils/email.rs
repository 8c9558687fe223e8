use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::utils::error::CustomError;

/// Outbound mail, as seen by the request handlers.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Address messages are sent from.
    fn sender(&self) -> String;

    async fn send_mail(
        &self,
        subject: &str,
        message: &str,
        from: &str,
        recipients: &[String],
    ) -> Result<(), CustomError>;
}

/// SMTP mailer
pub struct EmailService {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailService {
    pub fn with_config(config: EmailConfig) -> Result<Self, CustomError> {
        let transport = Self::build_transport(&config)?;
        Ok(Self { config, transport })
    }

    fn build_transport(
        config: &EmailConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, CustomError> {
        let mut builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else if config.smtp_username.is_some() {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &config.smtp_host,
            ))
        }
        .map_err(|e| {
            CustomError::InternalServerError(format!("Failed to create SMTP transport: {}", e))
        })?
        .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password)
        {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl Mailer for EmailService {
    fn sender(&self) -> String {
        format!("{} <{}>", self.config.from_name, self.config.from_email)
    }

    async fn send_mail(
        &self,
        subject: &str,
        message: &str,
        from: &str,
        recipients: &[String],
    ) -> Result<(), CustomError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| CustomError::InternalServerError(format!("Invalid from address: {}", e)))?;

        let mut builder = Message::builder().from(from);
        for recipient in recipients {
            builder = builder.to(recipient.parse().map_err(|e| {
                CustomError::BadRequestError(format!("Invalid to address: {}", e))
            })?);
        }

        let email = builder
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.to_string())
            .map_err(|e| CustomError::InternalServerError(format!("Failed to build email: {}", e)))?;

        self.transport.send(email).await.map_err(|e| {
            log::error!("smtp delivery failed: {}", e);
            CustomError::InternalServerError(format!("Failed to send email: {}", e))
        })?;

        log::info!("mail \"{}\" sent to {} recipient(s)", subject, recipients.len());
        Ok(())
    }
}
