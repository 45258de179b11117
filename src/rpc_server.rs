//! docbrowser RPC server: JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line.
//! Request:  {"id":1, "method":"frequently_viewed.record", "params":{"url":"...","title":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use docbrowser::app::App;
use docbrowser::rpc_handler::handle_method;

use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn respond(out: &mut impl Write, response: Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let data_dir = std::env::var("DOCBROWSER_DATA_DIR").ok().map(PathBuf::from);
    let config_path = std::env::var("DOCBROWSER_CONFIG").ok();
    let app = match App::new(config_path, data_dir) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!(error = %e, "failed to initialize docbrowser");
            return Err(e);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    respond(&mut out, json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;
    info!("rpc server ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&mut out, response)?;
    }

    Ok(())
}
