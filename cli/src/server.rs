#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::{Path, Query, State},
        http::{header, StatusCode},
        response::{IntoResponse, Json, Redirect, Response},
        routing::{get, post},
        Router,
    };
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tracing::{info, warn};
    use unitcanon::{serializers, BatchOutcome, CanonError, Engine};

    type SharedEngine = Arc<Engine>;

    const TURTLE: &str = "text/turtle; charset=utf-8";

    #[derive(Debug, Deserialize)]
    struct CanonicalizeRequest {
        units: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct CodeQuery {
        code: Option<String>,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("unitcanon server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn router(engine: Engine) -> Router {
        Router::new()
            .route("/", get(lookup_query))
            .route("/health", get(health_check))
            .route("/units/:code", get(unit_turtle))
            .route("/canonicalize", post(canonicalize))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(engine))
    }

    async fn health_check(State(engine): State<SharedEngine>) -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "unitcanon",
            "version": env!("CARGO_PKG_VERSION"),
            "vocabularies": engine.vocabulary_names(),
        }))
    }

    /// `/?code=m/s` redirects to the unit's page
    async fn lookup_query(Query(query): Query<CodeQuery>) -> Response {
        match query.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Redirect::to(&unit_path(code)).into_response(),
            _ => error_response(
                StatusCode::BAD_REQUEST,
                "Pass a unit expression as ?code=".to_string(),
            ),
        }
    }

    /// Turtle for one unit; non-canonical spellings redirect to the canonical page
    async fn unit_turtle(State(engine): State<SharedEngine>, Path(code): Path<String>) -> Response {
        let record = match engine.canonicalize(&code) {
            Ok(record) => record,
            Err(e) => {
                warn!(code = %code, error = %e, "lookup failed");
                let status = match e {
                    CanonError::Empty(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                return error_response(status, e.to_string());
            }
        };

        if record.ucum_code != code {
            return Redirect::permanent(&unit_path(&record.ucum_code)).into_response();
        }

        let mut body = serializers::document_header();
        body.push_str(&serializers::record_to_turtle(&record));
        info!(code = %record.ucum_code, "served unit");
        ([(header::CONTENT_TYPE, TURTLE)], body).into_response()
    }

    async fn canonicalize(
        State(engine): State<SharedEngine>,
        Json(payload): Json<CanonicalizeRequest>,
    ) -> Result<Json<BatchOutcome>, (StatusCode, Json<ErrorResponse>)> {
        if payload.units.is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "units cannot be empty".to_string(),
                }),
            ));
        }

        let outcome = engine.process_batch(&payload.units);
        info!(
            "Canonicalized {} unit(s), {} rejected",
            outcome.records.len(),
            outcome.rejected.len()
        );
        Ok(Json(outcome))
    }

    fn unit_path(code: &str) -> String {
        format!("/units/{}", urlencoding::encode(code))
    }

    fn error_response(status: StatusCode, error: String) -> Response {
        (status, Json(ErrorResponse { error })).into_response()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use axum::body::{to_bytes, Body};
        use axum::http::Request;
        use tower::ServiceExt;

        fn app() -> Router {
            router(Engine::builtin().unwrap())
        }

        async fn body_text(response: Response) -> String {
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            String::from_utf8(bytes.to_vec()).unwrap()
        }

        fn get_request(uri: &str) -> Request<Body> {
            Request::builder().uri(uri).body(Body::empty()).unwrap()
        }

        #[tokio::test]
        async fn test_health() {
            let response = app().oneshot(get_request("/health")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_text(response).await.contains("\"status\":\"ok\""));
        }

        #[tokio::test]
        async fn test_canonical_unit_is_served_as_turtle() {
            let response = app().oneshot(get_request("/units/m.s-1")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[header::CONTENT_TYPE], TURTLE);
            let body = body_text(response).await;
            assert!(body.contains("@prefix unit: <https://w3id.org/units/> ."));
            assert!(body.contains("rdfs:label \"metre per second\"@en"));
        }

        #[tokio::test]
        async fn test_other_spelling_redirects_to_canonical() {
            let response = app().oneshot(get_request("/units/m%2Fs")).await.unwrap();
            assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
            assert_eq!(response.headers()[header::LOCATION], "/units/m.s-1");
        }

        #[tokio::test]
        async fn test_query_redirect() {
            let response = app().oneshot(get_request("/?code=kg")).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/units/kg");
        }

        #[tokio::test]
        async fn test_unparseable_unit_is_bad_request() {
            let response = app().oneshot(get_request("/units/furlong")).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(body_text(response).await.contains("Parse error"));
        }

        #[tokio::test]
        async fn test_canonicalize_batch() {
            let request = Request::builder()
                .method("POST")
                .uri("/canonicalize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"units": ["s-1.m", "m/s", "q"]}"#))
                .unwrap();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let value: serde_json::Value =
                serde_json::from_str(&body_text(response).await).unwrap();
            assert_eq!(value["records"][0]["ucum_code"], "m.s-1");
            assert_eq!(value["records"][1]["input"], "m/s");
            assert_eq!(value["records"][1]["ucum_code"], "m.s-1");
            assert_eq!(value["rejected"][0]["input"], "q");
        }
    }
}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _engine: unitcanon::Engine,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
