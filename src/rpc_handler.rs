//! RPC method handler for the docbrowser JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested directly.
//! `handle_method` dispatches each call to the `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::frequently_viewed::FrequentlyViewedTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::static_page::StaticPageRequest;
use crate::types::document::{Doc, DocParent};

fn str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

fn usize_param(params: &Value, name: &str) -> Result<Option<usize>, String> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| format!("invalid {}: expected a non-negative integer", name)),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Frequently viewed ───
        "frequently_viewed.record" => {
            let url = str_param(params, "url").ok_or("missing url")?;
            let title = str_param(params, "title").ok_or("missing title")?;
            if !url.starts_with('/') {
                return Err("invalid url: must be a site-relative path".to_string());
            }
            let parents: Vec<DocParent> = match params.get("parents") {
                None | Some(Value::Null) => Vec::new(),
                Some(v) => serde_json::from_value(v.clone())
                    .map_err(|e| format!("invalid parents: {}", e))?,
            };
            let doc = Doc {
                mdn_url: url.to_string(),
                title: title.to_string(),
                parents,
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let entry = a.on_document_view(Some(&doc));
            Ok(json!({"recorded": entry.is_some(), "entry": entry}))
        }
        "frequently_viewed.collection" => {
            let limit = usize_param(params, "limit")?;
            let offset = usize_param(params, "offset")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let a = &mut *a;
            if let Some(limit) = limit {
                a.frequently_viewed_view.set_limit(limit);
            }
            if let Some(offset) = offset {
                a.frequently_viewed_view.set_offset(offset);
            }
            let page = a.frequently_viewed_view.page(&a.frequently_viewed);
            serde_json::to_value(page).map_err(|e| e.to_string())
        }
        "frequently_viewed.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let entries = a.frequently_viewed.read_entries().map_err(|e| e.to_string())?;
            serde_json::to_value(entries).map_err(|e| e.to_string())
        }
        "frequently_viewed.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.frequently_viewed.clear().map_err(|e| e.to_string())?;
            a.frequently_viewed_view.mark_updated();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key").ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings();
            Ok(json!({"ok": true}))
        }

        // ─── Static pages ───
        "page.load" => {
            let slug = str_param(params, "slug").ok_or("missing slug")?;
            if slug.is_empty() || slug.split('/').any(|s| s == "..") {
                return Err("invalid slug".to_string());
            }
            let a = app.lock().map_err(|e| e.to_string())?;
            let locale = str_param(params, "locale")
                .unwrap_or(a.settings_engine.get_settings().general.locale.as_str())
                .to_string();
            let mut request = StaticPageRequest::new(&locale, slug);
            if let Some(parents) = params.get("parents").filter(|v| !v.is_null()) {
                request.parents = serde_json::from_value(parents.clone())
                    .map_err(|e| format!("invalid parents: {}", e))?;
            }
            let state = a.load_static_page(&request);
            serde_json::to_value(state).map_err(|e| e.to_string())
        }

        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
