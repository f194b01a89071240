//! Checkout & Mail Config

use clap::Args;

use eshopper_app::{
    domain::orders::data::{MissingProductPolicy, NotificationPolicy},
    notifications::DEFAULT_SENDER,
};

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// What to do with cart lines whose product was deleted (skip, reject)
    #[arg(long, env = "MISSING_PRODUCT_POLICY", default_value = "skip")]
    pub missing_product_policy: MissingProductPolicy,

    /// Whether a failed confirmation fails checkout (best-effort, required)
    #[arg(long, env = "NOTIFICATION_POLICY", default_value = "best-effort")]
    pub notification_policy: NotificationPolicy,
}

/// Order confirmation delivery settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Sender address on order confirmations
    #[arg(long, env = "MAIL_FROM", default_value = DEFAULT_SENDER)]
    pub mail_from: String,

    /// HTTP mail relay endpoint; confirmations are only logged when unset
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,
}
