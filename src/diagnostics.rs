//! Store connectivity and environment report for the `/test` endpoint.

use serde::{Deserialize, Serialize};
use store::DocumentStore;

use crate::truncate_chars;

/// Collections listed in a report.
pub const MAX_COLLECTIONS: usize = 10;

/// Characters of an introspection error kept in a report.
pub const MAX_ERROR_CHARS: usize = 50;

/// Whether the database environment variables were set. Values are never
/// carried, only presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

/// Operational status report. Every field is human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn presence(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

/// Probe the store and build a report. Never fails: introspection errors are
/// folded into the `database` field.
pub async fn probe(store: &dyn DocumentStore, env: EnvPresence) -> Diagnostics {
    let mut report = Diagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: presence(env.database_url),
        database_name: presence(env.database_name),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if !store.is_configured() {
        report.database = "⚠️  Available but not initialized".to_string();
        return report;
    }

    report.database = "✅ Available".to_string();
    report.connection_status = "Connected".to_string();
    match store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            report.collections = names;
            report.database = "✅ Connected & Working".to_string();
        }
        Err(err) => {
            tracing::warn!(error = %err, "store introspection failed");
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(&err.to_string(), MAX_ERROR_CHARS)
            );
        }
    }
    report
}
