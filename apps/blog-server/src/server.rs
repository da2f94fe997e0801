//! Server lifecycle: open storage, bind the listener, stop the listener,
//! close storage - in that order.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use actix_rt::task::JoinHandle;
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use blog_infra::seed::seed_posts;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// A started HTTP server together with the storage it serves.
pub struct RunningServer {
    addr: SocketAddr,
    handle: ServerHandle,
    task: JoinHandle<io::Result<()>>,
    state: AppState,
}

/// Open storage, seed it if configured, then start accepting requests.
///
/// Must be called from within an actix system (`#[actix_web::main]` or
/// `#[actix_rt::test]`).
pub async fn start(config: &AppConfig) -> anyhow::Result<RunningServer> {
    let state = AppState::connect(config.database.as_ref()).await?;

    if config.seed_posts > 0 {
        seed_posts(state.posts.as_ref(), config.seed_posts)
            .await
            .context("failed to seed posts")?;
    }

    let server = serve(state, (config.host.as_str(), config.port), config.workers)
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    Ok(server)
}

/// Bind a listener for an already-built state and spawn it.
pub fn serve(
    state: AppState,
    addr: impl ToSocketAddrs,
    workers: Option<usize>,
) -> io::Result<RunningServer> {
    let app_state = state.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(handlers::configure_routes)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    let server = server.bind(addr)?;
    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no listener bound"))?;

    let server = server.run();
    let handle = server.handle();
    let task = actix_rt::spawn(server);

    tracing::info!(%addr, storage = state.storage_kind(), "Listening");

    Ok(RunningServer {
        addr,
        handle,
        task,
        state,
    })
}

impl RunningServer {
    /// Address the listener is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stop accepting connections, let in-flight requests finish, then close storage.
    pub async fn stop(self) -> io::Result<()> {
        tracing::info!(addr = %self.addr, "Stopping server");
        self.handle.stop(true).await;
        Self::finish(self.task, self.state).await
    }

    /// Run until the listener exits (e.g. on SIGINT/SIGTERM), then close storage.
    pub async fn wait(self) -> io::Result<()> {
        Self::finish(self.task, self.state).await
    }

    async fn finish(task: JoinHandle<io::Result<()>>, state: AppState) -> io::Result<()> {
        let result = task.await.map_err(io::Error::other).and_then(|r| r);
        state.close().await;
        tracing::info!("Server stopped");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn local_config(seed_posts: usize) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: Some(1),
            database: None,
            seed_posts,
        }
    }

    #[actix_rt::test]
    async fn test_start_serves_requests_and_stops() {
        let server = start(&local_config(10)).await.unwrap();
        let base = format!("http://{}", server.addr());
        assert_ne!(server.addr().port(), 0);

        let resp = reqwest::get(format!("{base}/posts")).await.unwrap();
        assert_eq!(resp.status(), 200);
        let posts: Vec<Value> = resp.json().await.unwrap();
        assert_eq!(posts.len(), 10);

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{base}/posts"))
            .json(&serde_json::json!({
                "title": "T",
                "content": "C",
                "author": {"firstName": "A", "lastName": "B"}
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        server.stop().await.unwrap();

        assert!(reqwest::get(format!("{base}/posts")).await.is_err());
    }

    #[actix_rt::test]
    async fn test_in_memory_state_without_database() {
        let server = start(&local_config(0)).await.unwrap();
        assert_eq!(server.state().storage_kind(), "memory");
        server.stop().await.unwrap();
    }
}
