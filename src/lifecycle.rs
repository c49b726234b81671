//! Process-level setup: logging and shutdown signals.

use tokio_util::sync::CancellationToken;

/// Initialize logging with tracing_subscriber.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap())
        .add_directive("rankpro=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Cancel `token` on the first Ctrl-C.
pub fn cancel_on_ctrl_c(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        tracing::warn!("[JOB] Interrupted, cancelling analysis");
                        token.cancel();
                    }
                    Err(e) => tracing::error!("[JOB] Failed to listen for Ctrl-C: {}", e),
                }
            }
        }
    })
}
