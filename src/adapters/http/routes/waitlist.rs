use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::Submission,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/waitlist",
            get(list_entries)
                .post(create_entry)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/waitlist/count",
            get(count_entries)
                .options(preflight)
                .fallback(method_not_allowed),
        )
}

#[derive(Serialize)]
struct ListResponse {
    success: bool,
    count: usize,
    data: Vec<WaitlistEntry>,
    storage: &'static str,
}

async fn list_entries(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let entries = app_state.waitlist_use_cases.list_entries().await?;

    Ok(Json(ListResponse {
        success: true,
        count: entries.len(),
        data: entries,
        storage: app_state.waitlist_use_cases.backend_name(),
    }))
}

#[derive(Serialize)]
struct CreateResponse {
    success: bool,
    message: &'static str,
    id: i64,
    storage: &'static str,
}

// The body arrives as raw text so parse failures map to this API's own
// 400 body instead of the framework's default rejection.
async fn create_entry(
    State(app_state): State<AppState>,
    body: String,
) -> AppResult<impl IntoResponse> {
    let submission: Submission =
        serde_json::from_str(&body).map_err(|_| AppError::MalformedPayload)?;

    let entry = app_state.waitlist_use_cases.submit(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            success: true,
            message: "Successfully added to waitlist",
            id: entry.id,
            storage: app_state.waitlist_use_cases.backend_name(),
        }),
    ))
}

#[derive(Serialize)]
struct CountResponse {
    success: bool,
    count: usize,
}

async fn count_entries(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = app_state.waitlist_use_cases.count().await?;
    Ok(Json(CountResponse {
        success: true,
        count,
    }))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        adapters::{http::app_state::AppState, persistence::memory::InMemoryEntryStore},
        infra::{
            app::create_app,
            config::{AppConfig, OnStoreFailure, StorageBackend},
        },
        use_cases::waitlist::WaitlistUseCases,
    };

    fn test_app_state() -> AppState {
        let config = AppConfig {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            storage_backend: StorageBackend::Memory,
            waitlist_file: PathBuf::from("waitlist.json"),
            redis_url: String::new(),
            database_url: None,
            on_store_failure: OnStoreFailure::Fail,
            request_timeout_secs: 10,
        };

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(Arc::new(
                InMemoryEntryStore::new(),
            ))),
        }
    }

    fn test_server() -> TestServer {
        TestServer::new(create_app(test_app_state())).expect("test server should start")
    }

    fn ada() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "category": "founder",
            "categoryLabel": "Founder"
        })
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let server = test_server();

        let created = server.post("/waitlist").json(&ada()).await;
        created.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["id"], json!(1));
        assert_eq!(body["message"], json!("Successfully added to waitlist"));
        assert_eq!(body["storage"], json!("memory"));

        let listed = server.get("/waitlist").await;
        listed.assert_status_ok();
        let body: Value = listed.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["count"], json!(1));
        assert_eq!(body["storage"], json!("memory"));
        assert_eq!(body["data"][0]["email"], json!("ada@example.com"));
        // Optional fields come back as explicit nulls.
        assert_eq!(body["data"][0]["categorySpecific"], Value::Null);
        assert_eq!(body["data"][0]["linkedinId"], Value::Null);
        assert!(body["data"][0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let server = test_server();

        server
            .post("/waitlist")
            .json(&ada())
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let second = server.post("/waitlist").json(&ada()).await;
        second.assert_status(axum::http::StatusCode::CONFLICT);
        let body: Value = second.json();
        assert_eq!(body["error"], json!("This email is already on the waitlist"));

        let listed: Value = server.get("/waitlist").await.json();
        assert_eq!(listed["count"], json!(1));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let server = test_server();

        let response = server.post("/waitlist").json(&json!({"name": "Ada"})).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["error"],
            json!("Missing required fields: name, email, category, categoryLabel")
        );

        // Nothing was written.
        let listed: Value = server.get("/waitlist").await.json();
        assert_eq!(listed["count"], json!(0));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let server = test_server();

        let response = server.post("/waitlist").text("{not json").await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], json!("Invalid JSON body"));
    }

    #[tokio::test]
    async fn email_format_is_enforced() {
        let server = test_server();

        let mut bad = ada();
        bad["email"] = json!("not-an-email");
        let response = server.post("/waitlist").json(&bad).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], json!("Invalid email format"));

        let mut minimal = ada();
        minimal["email"] = json!("a@b.co");
        server
            .post("/waitlist")
            .json(&minimal)
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn count_reports_entries() {
        let server = test_server();

        let empty: Value = server.get("/waitlist/count").await.json();
        assert_eq!(empty["count"], json!(0));

        server.post("/waitlist").json(&ada()).await;

        let counted = server.get("/waitlist/count").await;
        counted.assert_status_ok();
        let body: Value = counted.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["count"], json!(1));
    }

    #[tokio::test]
    async fn options_returns_ok_with_cors_headers() {
        let server = test_server();

        for path in ["/waitlist", "/waitlist/count"] {
            let response = server
                .method(axum::http::Method::OPTIONS, path)
                .add_header(
                    axum::http::header::ORIGIN,
                    axum::http::HeaderValue::from_static("https://example.com"),
                )
                .await;
            response.assert_status_ok();
            assert_eq!(response.text(), "");
            assert_eq!(
                response
                    .headers()
                    .get("access-control-allow-origin")
                    .and_then(|v| v.to_str().ok()),
                Some("*")
            );
        }
    }

    #[tokio::test]
    async fn unsupported_verbs_are_rejected() {
        let server = test_server();

        let response = server.delete("/waitlist").await;
        response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["error"], json!("Method not allowed"));

        server
            .put("/waitlist/count")
            .await
            .assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], json!("ok"));
    }
}
