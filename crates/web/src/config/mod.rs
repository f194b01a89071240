//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use eshopper_app::{
    context::{AppOptions, SessionBackend},
    domain::orders::data::CheckoutPolicy,
};

use crate::config::{
    checkout::{CheckoutConfig, MailConfig},
    db::DatabaseConfig,
    logging::LoggingConfig,
    server::ServerRuntimeConfig,
    sessions::{SessionBackendArg, SessionConfig},
};

pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod sessions;

pub(crate) use logging::LogFormat;

/// Eshopper storefront server configuration
#[derive(Debug, Parser)]
#[command(name = "eshopper-web", about = "Eshopper storefront server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session cookie and storage settings.
    #[command(flatten)]
    pub sessions: SessionConfig,

    /// Checkout behaviour.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Order confirmation delivery.
    #[command(flatten)]
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }

    /// Options the application context is assembled from.
    #[must_use]
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            sessions: match self.sessions.session_backend {
                SessionBackendArg::Postgres => SessionBackend::Postgres,
                SessionBackendArg::Memory => SessionBackend::Memory,
            },
            checkout: CheckoutPolicy {
                missing_products: self.checkout.missing_product_policy,
                notifications: self.checkout.notification_policy,
                sender: self.mail.mail_from.clone(),
            },
            mail_relay_url: self.mail.mail_relay_url.clone(),
            migrate: self.database.run_migrations,
        }
    }
}

#[cfg(test)]
mod tests {
    use eshopper_app::domain::orders::data::{MissingProductPolicy, NotificationPolicy};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_keep_lenient_checkout_and_postgres_sessions() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "eshopper-web",
            "--database-url",
            "postgres://localhost/eshopper",
        ])?;

        let options = config.app_options();

        assert_eq!(options.sessions, SessionBackend::Postgres);
        assert_eq!(options.checkout.missing_products, MissingProductPolicy::Skip);
        assert_eq!(options.checkout.notifications, NotificationPolicy::BestEffort);
        assert_eq!(options.checkout.sender, "Eshopper@example.com");
        assert_eq!(options.mail_relay_url, None);
        assert!(!options.migrate, "migrations should be opt-in");
        assert_eq!(config.sessions.session_cookie_name, "sessionid");
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.server.shutdown_grace(), None);

        Ok(())
    }

    #[test]
    fn strict_policies_parse_from_arguments() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "eshopper-web",
            "--database-url",
            "postgres://localhost/eshopper",
            "--missing-product-policy",
            "reject",
            "--notification-policy",
            "required",
            "--session-backend",
            "memory",
            "--mail-relay-url",
            "http://localhost:8025/send",
        ])?;

        let options = config.app_options();

        assert_eq!(options.sessions, SessionBackend::Memory);
        assert_eq!(options.checkout.missing_products, MissingProductPolicy::Reject);
        assert_eq!(options.checkout.notifications, NotificationPolicy::Required);
        assert_eq!(
            options.mail_relay_url.as_deref(),
            Some("http://localhost:8025/send")
        );

        Ok(())
    }

    #[test]
    fn unknown_policy_is_a_configuration_error() {
        let result = ServerConfig::try_parse_from([
            "eshopper-web",
            "--database-url",
            "postgres://localhost/eshopper",
            "--missing-product-policy",
            "sometimes",
        ]);

        assert!(result.is_err(), "expected a parse error");
    }
}
