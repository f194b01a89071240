use async_trait::async_trait;
use tracing::info;

use crate::notifications::{NotificationError, Notifier, OrderConfirmation};

/// Writes confirmations to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<(), NotificationError> {
        info!(
            order_id = %confirmation.order_id,
            from = %confirmation.sender,
            to = %confirmation.recipient,
            subject = %confirmation.subject,
            total = confirmation.total,
            body = %confirmation.plain_text(),
            "order confirmation"
        );

        Ok(())
    }
}
