pub mod cli_arguments;
pub mod envelope;
pub mod http_client;
pub mod lookup;
pub mod proxy_service;
pub(crate) mod request_id;
pub(crate) mod route;
pub mod ticket_store;

use std::sync::Arc;

use axum::extract::Request;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};

use crate::lookup::cpf_info_service::CpfInfoService;
use crate::proxy_service::proxy_service::ProxyService;
use crate::request_id::{GatewayRequestId, UNKNOWN_REQUEST_ID, X_REQUEST_ID};
use crate::route::{
    cpf_info::cpf_info,
    health::health,
    proxy::{forward_json, forward_query},
    ticket_info::ticket_info,
    una::una,
};
use crate::ticket_store::ticket_store::TicketStore;

#[derive(Clone)]
pub struct ServerState {
    pub proxy_service: Arc<dyn ProxyService>,
    pub cpf_info_service: Arc<dyn CpfInfoService>,
    pub ticket_store: Arc<dyn TicketStore>,
}

pub fn router(server_state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(forward_query).post(forward_json))
        .route("/api/cpf-info", get(cpf_info))
        .route("/api/una", get(una))
        .route("/api/ticket-info-db", get(ticket_info))
        .with_state(server_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or(UNKNOWN_REQUEST_ID);

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(
            X_REQUEST_ID.clone(),
            GatewayRequestId::default(),
        ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::envelope::Envelope;
    use crate::lookup::cpf_info_service::MockCpfInfoService;
    use crate::proxy_service::proxy_service::MockProxyService;
    use crate::ticket_store::{ticket::Ticket, ticket_store::MockTicketStore};
    use crate::{ServerState, router};

    fn state(
        proxy: MockProxyService,
        cpf_info: MockCpfInfoService,
        store: MockTicketStore,
    ) -> ServerState {
        ServerState {
            proxy_service: Arc::new(proxy),
            cpf_info_service: Arc::new(cpf_info),
            ticket_store: Arc::new(store),
        }
    }

    fn idle_router() -> axum::Router {
        let mut proxy = MockProxyService::new();
        proxy.expect_forward().never();
        let mut cpf_info = MockCpfInfoService::new();
        cpf_info.expect_lookup().never();
        router(state(proxy, cpf_info, MockTicketStore::new()))
    }

    async fn envelope_of(router: axum::Router, request: Request<Body>) -> Value {
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn should_expose_the_health_check_endpoint() {
        let response = idle_router().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body();
        let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

        assert_eq!(body_bytes, Bytes::from_static(b"PONG"));
    }

    #[tokio::test]
    async fn should_enrich_response_headers_with_request_id() {
        let response = idle_router().oneshot(get("/health")).await.unwrap();

        assert!(response.headers().get("x-request-id").is_some());
    }

    #[tokio::test]
    async fn should_forward_posted_json_documents() {
        let mut proxy = MockProxyService::new();
        proxy
            .expect_forward()
            .withf(|request| {
                request.target_url.as_deref() == Some("https://x.test")
                    && request.method.as_deref() == Some("GET")
            })
            .times(1)
            .returning(|_| Envelope::success(201, json!({ "id": 1 })));

        let router = router(state(proxy, MockCpfInfoService::new(), MockTicketStore::new()));
        let envelope = envelope_of(
            router,
            post("/api", r#"{"url":"https://x.test","method":"GET"}"#),
        )
        .await;

        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["original_status"], json!(201));
        assert_eq!(envelope["response"], json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn should_forward_query_string_requests() {
        let mut proxy = MockProxyService::new();
        proxy
            .expect_forward()
            .withf(|request| {
                request.target_url.as_deref() == Some("https://x.test/a")
                    && request.headers.get("X-Token").map(String::as_str) == Some("abc")
            })
            .times(1)
            .returning(|_| Envelope::success(200, Value::Null));

        let router = router(state(proxy, MockCpfInfoService::new(), MockTicketStore::new()));
        let envelope = envelope_of(
            router,
            get("/api?url=https%3A%2F%2Fx.test%2Fa&method=GET&headers=%7B%22X-Token%22%3A%22abc%22%7D"),
        )
        .await;

        assert_eq!(envelope["success"], json!(true));
    }

    #[tokio::test]
    async fn should_fold_bad_proxy_input_into_400_envelopes() {
        for request in [post("/api", ""), post("/api", "{nope"), get("/api")] {
            let envelope = envelope_of(idle_router(), request).await;

            assert_eq!(envelope["success"], json!(false));
            assert_eq!(envelope["original_status"], json!(400));
            assert!(envelope["response"]["error"].is_string());
        }

        let envelope = envelope_of(idle_router(), get("/api")).await;
        assert_eq!(
            envelope["response"]["error"],
            json!("No data provided. Send JSON body or use query parameters.")
        );
    }

    #[tokio::test]
    async fn should_require_a_cpf_for_lookups() {
        for uri in ["/api/cpf-info", "/api/cpf-info?cpf=", "/api/una"] {
            let envelope = envelope_of(idle_router(), get(uri)).await;

            assert_eq!(envelope["success"], json!(false), "{uri}");
            assert_eq!(envelope["original_status"], json!(400));
            assert_eq!(envelope["response"], json!({ "error": "CPF is required" }));
        }
    }

    #[tokio::test]
    async fn should_delegate_cpf_lookups() {
        let mut cpf_info = MockCpfInfoService::new();
        cpf_info
            .expect_lookup()
            .withf(|cpf: &str| cpf == "52998224725")
            .times(1)
            .returning(|_| Envelope::success(404, json!({ "message": "CPF não encontrado." })));

        let router = router(state(MockProxyService::new(), cpf_info, MockTicketStore::new()));
        let envelope = envelope_of(router, get("/api/cpf-info?cpf=52998224725")).await;

        assert_eq!(envelope["original_status"], json!(404));
    }

    #[tokio::test]
    async fn should_serve_the_una_table() {
        let envelope = envelope_of(idle_router(), get("/api/una?cpf=44577744058")).await;

        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["response"]["total"], json!(4));
    }

    #[tokio::test]
    async fn should_look_tickets_up_in_the_store() {
        let mut store = MockTicketStore::new();
        store
            .expect_find_by_protocol_and_owner()
            .withf(|protocol: &str, owner: &str| protocol == "1765392696777" && owner == "80713245977")
            .times(1)
            .returning(|_, _| {
                Ok(Some(Ticket::new(
                    "1765392696777",
                    "80713245977",
                    "Maria",
                    "Solicitar Aposentadoria",
                    "SGP_Voz",
                )))
            });

        let router = router(state(MockProxyService::new(), MockCpfInfoService::new(), store));
        let envelope = envelope_of(
            router,
            get("/api/ticket-info-db?id=1765392696777&cpf=80713245977"),
        )
        .await;

        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["response"]["fila"], json!("SGP_Voz"));
    }

    #[tokio::test]
    async fn should_require_both_ticket_id_and_cpf() {
        let envelope = envelope_of(idle_router(), get("/api/ticket-info-db?id=1")).await;

        assert_eq!(envelope["original_status"], json!(400));
        assert_eq!(
            envelope["response"],
            json!({ "error": "Ticket ID and CPF are required" })
        );
    }

    #[tokio::test]
    async fn should_answer_cors_preflight_requests() {
        let response = idle_router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api")
                    .header("origin", "https://app.test")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert!(
            headers
                .get("access-control-allow-methods")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("POST")
        );
    }
}
