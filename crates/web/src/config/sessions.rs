//! Session Config

use clap::Args;

/// Where session payloads are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SessionBackendArg {
    /// The `sessions` table.
    Postgres,

    /// Process memory; sessions do not survive a restart.
    Memory,
}

/// Session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session key
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "sessionid")]
    pub session_cookie_name: String,

    /// Session storage backend (postgres, memory)
    #[arg(
        long,
        env = "SESSION_BACKEND",
        value_enum,
        default_value_t = SessionBackendArg::Postgres
    )]
    pub session_backend: SessionBackendArg,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,
}
