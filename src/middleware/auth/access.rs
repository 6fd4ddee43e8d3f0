//! route 単位の permission gate: bearer token → 検証済み claims → permission
//!
//! 保護する route は必要な permission と一緒に包む：
//! ```ignore
//! .route("/movies", access::requires(get(list_movies), &state.auth, GET_MOVIES))
//! ```
//! 成功時は decode 済み claims を extensions に入れ (handler は
//! `api::extractors::Claims` で受け取る)、handler の response をそのまま返す。
//! 失敗時は AppError (AuthError) の envelope で終わり、handler は走らない。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::services::auth::Authorizer;

#[derive(Clone)]
struct Gate {
    auth: Arc<Authorizer>,
    permission: &'static str,
}

/// Wrap `route` so it only runs for tokens granting `permission`.
///
/// Uses `route_layer`, so requests that match no method of `route` get a 405
/// without being authenticated first.
pub fn requires<S>(
    route: MethodRouter<S>,
    auth: &Arc<Authorizer>,
    permission: &'static str,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let gate = Gate {
        auth: auth.clone(),
        permission,
    };
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に gate を渡す
    route.route_layer(middleware::from_fn_with_state(gate, access_middleware))
}

async fn access_middleware(
    State(gate): State<Gate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match gate
        .auth
        .authorize(req.headers().get(header::AUTHORIZATION), gate.permission)
        .await
    {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                error = %err,
                code = err.code(),
                status = err.status().as_u16(),
                permission = gate.permission,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by permission gate"
            );
            return Err(AppError::from(err));
        }
    };

    tracing::debug!(
        permission = gate.permission,
        subject = ?claims.subject(),
        "permission granted"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
