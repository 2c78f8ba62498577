//! Datasource service lifecycle
//!
//! A datasource serves HTTP until either its server stops or the process is
//! asked to shut down. Server failures end [`MicroserviceRuntime::run`] with
//! the server's error so the process exits non-zero.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::signal;
use tracing::{error, info, warn};

use crate::error::{DvtError, Result};

/// Health status for liveness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub service_id: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Readiness status for readiness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessStatus {
    pub ready: bool,
    pub dependencies: Vec<DependencyStatus>,
}

/// Availability of one data service behind the datasource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
    pub latency_ms: Option<u64>,
}

#[async_trait]
pub trait DatasourceService: Send + Sync + 'static {
    fn service_id(&self) -> &'static str;

    fn version(&self) -> &'static str;

    async fn health(&self) -> HealthStatus;

    /// Ready once every table's data service answers
    async fn ready(&self) -> ReadinessStatus;

    async fn shutdown(&self) -> Result<()>;

    /// Serve requests until the server stops. Returns early with an error if
    /// the server cannot bind or fails while serving.
    async fn start(self: Arc<Self>) -> Result<()>;
}

pub struct MicroserviceRuntime;

impl MicroserviceRuntime {
    /// Run until Ctrl+C / SIGTERM or until the server stops on its own
    pub async fn run<S: DatasourceService>(service: Arc<S>) -> Result<()> {
        Self::run_until(service, shutdown_signal()).await
    }

    /// Run until `shutdown` completes or the server stops on its own
    pub async fn run_until<S, F>(service: Arc<S>, shutdown: F) -> Result<()>
    where
        S: DatasourceService,
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        info!(
            service_id = service.service_id(),
            version = service.version(),
            "Starting datasource service"
        );

        let mut server = tokio::spawn(service.clone().start());

        let outcome = tokio::select! {
            joined = &mut server => match joined {
                Ok(Ok(())) => {
                    warn!("Server stopped without a shutdown signal");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Datasource server failed");
                    Err(e)
                }
                Err(e) => Err(DvtError::Internal(format!("Server task ended abnormally: {}", e))),
            },
            _ = shutdown => {
                info!("Shutdown signal received, stopping server");
                server.abort();
                Ok(())
            }
        };

        if let Err(e) = service.shutdown().await {
            warn!(error = %e, "Error during shutdown");
        }

        info!(
            uptime_seconds = started.elapsed().as_secs(),
            failed = outcome.is_err(),
            "Datasource service stopped"
        );

        outcome
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    enum Behavior {
        FailToBind,
        Panic,
        ServeForever,
    }

    struct StubService {
        behavior: Behavior,
        shut_down: AtomicBool,
    }

    impl StubService {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                shut_down: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl DatasourceService for StubService {
        fn service_id(&self) -> &'static str {
            "stub"
        }

        fn version(&self) -> &'static str {
            "0.0.0"
        }

        async fn health(&self) -> HealthStatus {
            HealthStatus {
                healthy: true,
                service_id: self.service_id().to_string(),
                version: self.version().to_string(),
                uptime_seconds: 0,
            }
        }

        async fn ready(&self) -> ReadinessStatus {
            ReadinessStatus {
                ready: true,
                dependencies: Vec::new(),
            }
        }

        async fn shutdown(&self) -> Result<()> {
            self.shut_down.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn start(self: Arc<Self>) -> Result<()> {
            match self.behavior {
                Behavior::FailToBind => Err(DvtError::Io(std::io::Error::new(
                    std::io::ErrorKind::AddrInUse,
                    "address in use",
                ))),
                Behavior::Panic => panic!("server crashed"),
                Behavior::ServeForever => {
                    std::future::pending::<()>().await;
                    Ok(())
                }
            }
        }
    }

    #[tokio::test]
    async fn test_start_failure_ends_run_with_error() {
        let service = StubService::new(Behavior::FailToBind);

        let outcome = tokio::time::timeout(
            Duration::from_secs(2),
            MicroserviceRuntime::run_until(service.clone(), std::future::pending()),
        )
        .await
        .expect("run must return once the server fails");

        assert!(matches!(outcome, Err(DvtError::Io(_))));
        assert!(service.shut_down.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_server_panic_is_reported() {
        let service = StubService::new(Behavior::Panic);

        let outcome = tokio::time::timeout(
            Duration::from_secs(2),
            MicroserviceRuntime::run_until(service, std::future::pending()),
        )
        .await
        .expect("run must return once the server task dies");

        assert!(matches!(outcome, Err(DvtError::Internal(_))));
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_server() {
        let service = StubService::new(Behavior::ServeForever);

        let outcome = MicroserviceRuntime::run_until(service.clone(), async {}).await;

        assert!(outcome.is_ok());
        assert!(service.shut_down.load(Ordering::SeqCst));
    }
}
