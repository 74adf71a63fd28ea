use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use backlink_engine::{
    validate_describe_url, BatchGenerator, DescribeRequest, DescribeResponse, Describer,
    GenerateRequest, GenerateResponse,
};
use backlink_logging::{backlink_error, backlink_info, backlink_warn};
use tower_http::cors::{Any, CorsLayer};

/// Services shared by every request.
#[derive(Clone)]
pub struct ServerState {
    pub generator: Arc<dyn BatchGenerator>,
    pub describer: Arc<dyn Describer>,
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/generate", post(generate))
        .route("/describe", post(describe))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn serve(state: Arc<ServerState>, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    backlink_info!("backlink server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            backlink_info!("shutting down");
        })
        .await?;
    Ok(())
}

pub async fn generate(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> (StatusCode, Json<GenerateResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            backlink_warn!("generate: bad request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(GenerateResponse::failed(rejection.body_text())),
            );
        }
    };

    backlink_info!(
        "generate: url_len={} keyword={} type={} batch={}",
        request.url.len(),
        request.keyword,
        request.content_type,
        request.batch_size
    );
    match state.generator.generate(&request).await {
        Ok(data) => (StatusCode::OK, Json(GenerateResponse::ok(data))),
        Err(err) => {
            backlink_error!("generate failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse::failed(err.to_string())),
            )
        }
    }
}

pub async fn describe(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<DescribeRequest>, JsonRejection>,
) -> (StatusCode, Json<DescribeResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(DescribeResponse::failed(rejection.body_text())),
            )
        }
    };

    backlink_info!("describe: url={}", request.url);
    let outcome = match validate_describe_url(&request.url) {
        Ok(()) => {
            state
                .describer
                .describe(&request.url, request.language.as_deref())
                .await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(description) => (StatusCode::OK, Json(DescribeResponse::ok(description))),
        Err(err) => {
            backlink_warn!("describe failed url={} error={}", request.url, err);
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(DescribeResponse::failed(err.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use backlink_engine::{DescribeError, GenerateData, GenerateError};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct StubGenerator {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl BatchGenerator for StubGenerator {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateData, GenerateError> {
            if self.fail {
                return Err(GenerateError::Rejected("model unavailable".to_string()));
            }
            Ok(GenerateData {
                content_type: request.content_type.clone(),
                title: "Article Paragraphs".to_string(),
                items: vec![format!("about {}", request.keyword)],
            })
        }
    }

    #[derive(Default)]
    struct StubDescriber {
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait::async_trait]
    impl Describer for StubDescriber {
        async fn describe(&self, url: &str, language: Option<&str>) -> Result<String, DescribeError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), language.map(str::to_string)));
            if url.contains("slow") {
                return Err(DescribeError::FetchTimeout("Connection timed out".to_string()));
            }
            Ok("A shoe shop.".to_string())
        }
    }

    fn state(fail: bool, describer: Arc<StubDescriber>) -> State<Arc<ServerState>> {
        State(Arc::new(ServerState {
            generator: Arc::new(StubGenerator { fail }),
            describer,
        }))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn generate_request() -> GenerateRequest {
        GenerateRequest {
            url: "https://shop.example".to_string(),
            keyword: "boots".to_string(),
            content_type: "article".to_string(),
            ..GenerateRequest::default()
        }
    }

    #[tokio::test]
    async fn generate_returns_success_envelope() {
        let (status, body) = generate(
            state(false, Arc::default()),
            Ok(Json(generate_request())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let value = body_json((status, body).into_response()).await;
        assert_eq!(
            value,
            serde_json::json!({
                "success": true,
                "data": { "type": "article", "title": "Article Paragraphs", "items": ["about boots"] }
            })
        );
    }

    #[tokio::test]
    async fn generate_failure_is_500_with_message() {
        let (status, Json(body)) = generate(
            state(true, Arc::default()),
            Ok(Json(generate_request())),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("model unavailable"));
    }

    #[tokio::test]
    async fn describe_validation_errors_are_400_and_skip_the_service() {
        let describer = Arc::new(StubDescriber::default());
        for url in ["", "www.acme.example", "https://instagram.com/acme"] {
            let (status, Json(body)) = describe(
                state(false, describer.clone()),
                Ok(Json(DescribeRequest {
                    url: url.to_string(),
                    language: None,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "url {url:?}");
            assert!(!body.success);
        }
        assert!(describer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn describe_passes_language_and_maps_upstream_errors() {
        let describer = Arc::new(StubDescriber::default());

        let (status, Json(body)) = describe(
            state(false, describer.clone()),
            Ok(Json(DescribeRequest {
                url: "https://acme.example".to_string(),
                language: Some("İngilizce".to_string()),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.description.as_deref(), Some("A shoe shop."));

        let (status, Json(body)) = describe(
            state(false, describer.clone()),
            Ok(Json(DescribeRequest {
                url: "https://slow.example".to_string(),
                language: None,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Connection timed out"));

        assert_eq!(
            describer.calls.lock().unwrap()[0],
            ("https://acme.example".to_string(), Some("İngilizce".to_string()))
        );
    }
}
