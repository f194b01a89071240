//! Order confirmation notifications.

use std::fmt::Write as _;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

use crate::domain::orders::records::OrderId;

mod logger;
mod relay;

pub use logger::LogNotifier;
pub use relay::{RelayConfig, RelayNotifier};

/// Subject line of every order confirmation.
pub const ORDER_CONFIRMATION_SUBJECT: &str = "Order Confirmation";

/// Sender used when none is configured.
pub const DEFAULT_SENDER: &str = "Eshopper@example.com";

/// Content of an order confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub subject: String,
    pub sender: String,
    pub recipient: String,
    pub customer_name: String,
    pub lines: Vec<ConfirmationLine>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationLine {
    pub title: String,
    pub quantity: u32,
    pub price: u64,
}

impl OrderConfirmation {
    /// Render the message body as plain text.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut body = format!(
            "Hello {},\n\nThank you for your order!\n\n",
            self.customer_name
        );

        for line in &self.lines {
            let _ = writeln!(body, "{} x {} @ {}", line.quantity, line.title, line.price);
        }

        let _ = writeln!(body, "\nTotal: {}", self.total);

        body
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("mail relay request failed")]
    Http(#[from] reqwest::Error),

    #[error("mail relay rejected the message: {0}")]
    Rejected(String),
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `confirmation` to its recipient.
    async fn send_order_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<(), NotificationError>;
}
