use std::env;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::services::ProbeStatus;
use crate::state::AppState;

const KEY_PREFIX_LEN: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReport {
    pub has_resend_key: bool,
    pub key_length: usize,
    pub key_prefix: String,
    pub api_test: ProbeStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsPayload {
    pub environment: EnvironmentReport,
    pub all_env_vars: Vec<String>,
}

/// Operational check of the mail-provider credential. Reports variable
/// names only, never values.
pub async fn test_env(State(state): State<AppState>) -> Json<DiagnosticsPayload> {
    let settings = state.notifier.settings();

    let environment = match settings.api_key.as_deref() {
        Some(key) => EnvironmentReport {
            has_resend_key: true,
            key_length: key.chars().count(),
            key_prefix: key.chars().take(KEY_PREFIX_LEN).collect(),
            api_test: state.notifier.transport().probe(key, &settings.from).await,
        },
        None => EnvironmentReport {
            has_resend_key: false,
            key_length: 0,
            key_prefix: "none".to_string(),
            api_test: ProbeStatus::NotTested,
        },
    };

    let names = env::vars_os().filter_map(|(key, _)| key.into_string().ok());

    Json(DiagnosticsPayload {
        environment,
        all_env_vars: relevant_env_var_names(names),
    })
}

pub fn relevant_env_var_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut relevant: Vec<String> = names
        .filter(|name| ["RES", "SEND", "API"].iter().any(|part| name.contains(part)))
        .collect();
    relevant.sort();
    relevant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_env_var_names() {
        let names = ["PATH", "RESEND_API_KEY", "HOME", "SENDER", "OPENAPI_URL", "USER"]
            .iter()
            .map(|s| s.to_string());
        assert_eq!(
            relevant_env_var_names(names),
            vec![
                "OPENAPI_URL".to_string(),
                "RESEND_API_KEY".to_string(),
                "SENDER".to_string()
            ]
        );
    }
}
