//! Graceful shutdown

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use tokio::signal;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        })
    }
}

/// Stop accepting connections on the first shutdown signal and give
/// in-flight requests `grace` to finish.
pub(crate) async fn listen(handle: ServerHandle, grace: Option<Duration>) -> io::Result<()> {
    let signal = wait_for_signal().await?;

    match grace {
        Some(grace) => info!(%signal, grace_secs = grace.as_secs(), "draining requests"),
        None => info!(%signal, "draining requests"),
    }

    handle.stop_graceful(grace);

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<Signal> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    tokio::select! {
        result = signal::ctrl_c() => result.map(|()| Signal::Interrupt),
        received = terminate.recv() => {
            if received.is_none() {
                warn!("SIGTERM stream closed");
            }

            Ok(Signal::Terminate)
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<Signal> {
    signal::ctrl_c().await.map(|()| Signal::Interrupt)
}
