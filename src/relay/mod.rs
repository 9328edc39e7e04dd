//! Anonymous e-mail and SMS relay
//!
//! Re-runs the tone gate on every request, then dispatches through SMTP or
//! Twilio from an address that never identifies the sender.

pub mod alias;
pub mod handler;
pub mod mailer;
pub mod service;
pub mod sms;

pub use alias::random_alias;
pub use handler::{relay_router, DeliveryRequest, RelayState};
pub use mailer::{MailProvider, OutboundMail, SmtpMailer};
pub use service::RelayService;
pub use sms::{OutboundSms, SmsProvider, TwilioSms};
