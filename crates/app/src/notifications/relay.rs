//! HTTP mail relay client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::notifications::{NotificationError, Notifier, OrderConfirmation};

/// Configuration for an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint that accepts a JSON message, e.g. `"http://localhost:8025/send"`.
    pub url: String,
}

/// Posts confirmations as JSON to a mail relay.
#[derive(Debug, Clone)]
pub struct RelayNotifier {
    config: RelayConfig,
    http: Client,
}

impl RelayNotifier {
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: String,
    confirmation: &'a OrderConfirmation,
}

impl<'a> From<&'a OrderConfirmation> for RelayMessage<'a> {
    fn from(confirmation: &'a OrderConfirmation) -> Self {
        Self {
            from: &confirmation.sender,
            to: [&confirmation.recipient],
            subject: &confirmation.subject,
            text: confirmation.plain_text(),
            confirmation,
        }
    }
}

#[async_trait]
impl Notifier for RelayNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<(), NotificationError> {
        let response = self
            .http
            .post(&self.config.url)
            .json(&RelayMessage::from(confirmation))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotificationError::Rejected(format!(
                "relay responded with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::orders::records::OrderId,
        notifications::{ConfirmationLine, DEFAULT_SENDER, ORDER_CONFIRMATION_SUBJECT},
    };

    use super::*;

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            order_id: OrderId::from_i64(3),
            subject: ORDER_CONFIRMATION_SUBJECT.to_string(),
            sender: DEFAULT_SENDER.to_string(),
            recipient: "ada@example.com".to_string(),
            customer_name: "Ada".to_string(),
            lines: vec![ConfirmationLine {
                title: "Chair".to_string(),
                quantity: 1,
                price: 50,
            }],
            total: 50,
        }
    }

    #[test]
    fn relay_message_addresses_the_recipient() -> TestResult {
        let confirmation = confirmation();

        let json = serde_json::to_value(RelayMessage::from(&confirmation))?;

        assert_eq!(json["from"], "Eshopper@example.com");
        assert_eq!(json["to"][0], "ada@example.com");
        assert_eq!(json["subject"], "Order Confirmation");
        assert_eq!(json["confirmation"]["order_id"], 3);
        assert_eq!(json["confirmation"]["total"], 50);

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_relay_is_an_error() {
        let notifier = RelayNotifier::new(RelayConfig {
            url: "http://127.0.0.1:9/send".to_string(),
        });

        let result = notifier.send_order_confirmation(&confirmation()).await;

        assert!(
            matches!(result, Err(NotificationError::Http(_))),
            "expected Http error, got {result:?}"
        );
    }
}
