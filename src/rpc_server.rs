//! GitHub Explorer RPC Server: JSON-RPC over stdin/stdout for an external UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"repository.search", "params":{"identifier":"owner/name"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::time::{Duration, Instant};

use github_explorer::app::{App, AppOptions};
use github_explorer::logging;
use github_explorer::rpc_handler::handle_method;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

/// Caps requests per one-second window; the window restarts on the first
/// request after it has elapsed.
struct RateLimiter {
    limit: u32,
    window: Duration,
    opened_at: Instant,
    seen: u32,
}

impl RateLimiter {
    fn per_second(limit: u32) -> Self {
        Self { limit, window: Duration::from_secs(1), opened_at: Instant::now(), seen: 0 }
    }

    fn allow(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    fn allow_at(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.opened_at) >= self.window {
            self.opened_at = now;
            self.seen = 0;
        }
        self.seen = self.seen.saturating_add(1);
        self.seen <= self.limit
    }
}

async fn send(stdout: &mut io::Stdout, message: Value) -> io::Result<()> {
    stdout.write_all(format!("{}\n", message).as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let options = AppOptions {
        config_path: std::env::var("GITHUB_EXPLORER_CONFIG").ok(),
        data_dir: None,
    };
    let mut app = App::new(options).map_err(|e| {
        error!(error = %e, "failed to initialize");
        e
    })?;

    let mut stdout = io::stdout();
    send(&mut stdout, json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;
    info!("rpc server ready");

    let mut rate_limiter = RateLimiter::per_second(200);
    let mut lines = BufReader::new(io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                send(&mut stdout, json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.allow() {
            warn!("rate limit exceeded");
            send(&mut stdout, json!({"id": id, "error": "rate limit exceeded"})).await?;
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        send(&mut stdout, response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
