//! RPC method handler for the GitHub Explorer JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. `handle_method`
//! dispatches one call to the dashboard held by [`App`].

use serde_json::{json, Value};
use tracing::debug;

use crate::app::{App, Dashboard};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::repository::Repository;
use crate::types::route::Route;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Snapshot of what the dashboard currently shows.
pub fn view_state(dashboard: &Dashboard) -> Value {
    json!({
        "input": dashboard.input(),
        "error": dashboard.input_error().map(|e| e.to_string()),
        "storage_error": dashboard.load_failure(),
        "items": dashboard.entries(),
    })
}

fn submit_result(added: Option<Repository>, dashboard: &Dashboard) -> Value {
    json!({
        "added": added,
        "state": view_state(dashboard),
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Inline input errors are part of a successful result; only storage
/// failures and bad requests are `Err`.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    debug!(method, "rpc call");
    let dashboard = &mut app.dashboard;

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Repositories ───
        "repository.search" => {
            let identifier = str_param(params, "identifier")?;
            let added = dashboard.search(identifier).await.map_err(|e| e.to_string())?;
            Ok(submit_result(added, dashboard))
        }
        "repository.list" => Ok(json!({"items": dashboard.repositories()})),
        "repository.remove" => {
            let identifier = str_param(params, "identifier")?;
            let removed = dashboard
                .remove_by_identifier(identifier)
                .map_err(|e| e.to_string())?;
            Ok(json!({"removed": removed}))
        }
        "repository.route" => {
            let identifier = str_param(params, "identifier")?;
            let repository = dashboard
                .repositories()
                .iter()
                .find(|r| r.full_name == identifier)
                .ok_or_else(|| format!("not bookmarked: {}", identifier))?;
            let route: Route = Dashboard::detail_route(repository);
            Ok(json!({"path": route.path()}))
        }

        // ─── View ───
        "view.input" => {
            let text = str_param(params, "text")?;
            dashboard.set_input(text);
            Ok(json!({"ok": true}))
        }
        "view.submit" => {
            let added = dashboard.submit_search().await.map_err(|e| e.to_string())?;
            Ok(submit_result(added, dashboard))
        }
        "view.reload" => {
            let count = dashboard.reload().map_err(|e| e.to_string())?;
            Ok(json!({"count": count}))
        }
        "view.state" => Ok(view_state(dashboard)),
        "view.render" => Ok(json!({"text": dashboard.render()})),

        // ─── Settings ───
        // Changes are saved to the settings file and apply from the next start.
        "settings.get" => {
            let key = params.get("key").and_then(|v| v.as_str()).unwrap_or("");
            let value = app.settings_engine.get_value(key).map_err(|e| e.to_string())?;
            Ok(json!({"path": app.settings_engine.get_config_path(), "value": value}))
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings_engine.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
