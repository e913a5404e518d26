use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct Greeting {
    message: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/", get(hello))
}

/// Greeting used as a smoke test
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = Greeting))
)]
pub async fn hello() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello World",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_returns_hello_world() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Hello World" }));
    }
}
