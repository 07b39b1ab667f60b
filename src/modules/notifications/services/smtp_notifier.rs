use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::MailConfig;
use crate::core::{AppError, Result};
use crate::modules::bookings::models::Booking;
use crate::modules::catalog::models::CareService;
use crate::modules::notifications::models::render_invoice;
use crate::modules::notifications::services::BookingNotifier;

/// Port that expects TLS from the first byte; anything else uses STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

/// Invoice mailer over an async SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let (user, password) = match (&config.user, &config.password) {
            (Some(user), Some(password)) => (user.clone(), password.clone()),
            _ => {
                return Err(AppError::Configuration(
                    "EMAIL_USER and EMAIL_PASS must both be set".to_string(),
                ))
            }
        };

        let from = config
            .sender()
            .unwrap_or(user.as_str())
            .parse::<Mailbox>()
            .map_err(|e| AppError::Configuration(format!("Invalid sender address: {}", e)))?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| AppError::Configuration(format!("Invalid SMTP relay: {}", e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(user, password))
            .build();

        info!(host = %config.host, port = config.port, "SMTP notifier configured");

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl BookingNotifier for SmtpNotifier {
    async fn booking_created(&self, booking: &Booking, service: &CareService) -> Result<()> {
        let address = booking
            .customer
            .email
            .parse::<Address>()
            .map_err(|e| AppError::validation(format!("Invalid recipient address: {}", e)))?;
        let to = Mailbox::new(Some(booking.customer.name.clone()), address);

        let invoice = render_invoice(booking, &service.name);
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(invoice.subject)
            .multipart(MultiPart::alternative_plain_html(invoice.text, invoice.html))
            .map_err(|e| AppError::internal(format!("Failed to build invoice email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::upstream(format!("SMTP send failed: {}", e)))?;

        info!(booking_id = %booking.id, "Invoice email sent");
        Ok(())
    }
}
