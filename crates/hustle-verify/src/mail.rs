use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// Display name on every outgoing message.
pub const SENDER_NAME: &str = "Hustleworthy";

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    /// Plain-text alternative, when the template has one.
    pub text: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub login: String,
    pub key: String,
    /// Verified sender address at the relay.
    pub sender: String,
}

/// STARTTLS relay with login credentials.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        if settings.sender.is_empty() {
            return Err(MailError::NotConfigured("sender address"));
        }
        let from = Mailbox::new(Some(SENDER_NAME.to_string()), settings.sender.parse::<Address>()?);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(settings.login.clone(), settings.key.clone()))
            .build();

        Ok(Self { transport, from })
    }

    fn build(&self, email: OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse::<Mailbox>()?)
            .subject(email.subject);

        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to.parse::<Mailbox>()?);
        }

        let message = match email.text {
            Some(text) => builder.multipart(MultiPart::alternative_plain_html(text, email.html))?,
            None => builder.singlepart(SinglePart::html(email.html))?,
        };
        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let subject = email.subject.clone();
        let message = self.build(email)?;
        let response = self.transport.send(message).await?;
        info!("Email '{}' accepted by relay ({})", subject, response.code());
        Ok(())
    }
}
