use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};

use crate::deploy;
use crate::error::AppError;
use crate::state::SharedState;

/// POST /hooks/git-push — signed deployment webhook. The HMAC signature is
/// the sole authentication on this endpoint, so it is checked against the
/// raw body bytes before anything else runs. Deployments are serialized by
/// the state's deploy lock; a delivery that arrives mid-deploy waits.
pub async fn git_push(
    State(state): State<SharedState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    if method != Method::POST {
        return Err(AppError::BadRequest("Invalid method".to_string()));
    }

    let signature = headers
        .get("x-hub-signature-256")
        .and_then(|v| v.to_str().ok());

    if !deploy::verify_signature(&state.config.webhook_secret, &body, signature) {
        return Err(AppError::BadRequest("Invalid signature".to_string()));
    }

    let Some(deploy_config) = &state.config.deploy else {
        tracing::warn!("git-push webhook received but SALOND_DEPLOY_DIR is not set");
        return Err(AppError::Deployment("deployment not configured".to_string()));
    };

    let _guard = state.deploy_lock.lock().await;

    match deploy::run(deploy_config).await {
        Ok(outcome) => {
            tracing::info!("Deployment finished: {outcome:?}");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            // Full command output stays in the operator log; the caller
            // only learns which step failed.
            tracing::error!("Deployment step '{}' failed: {}", e.step, e.output);
            Err(AppError::Deployment(e.step))
        }
    }
}
