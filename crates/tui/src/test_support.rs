//! In-process stand-in for the expense backend, used by the client and
//! controller tests.

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use api_types::expense::Category;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Default)]
struct MockState {
    expenses: Mutex<Vec<Value>>,
    list_override: Mutex<Option<Value>>,
    list_text: Mutex<Option<String>>,
    list_failure: Mutex<Option<StatusCode>>,
    create_failure: Mutex<Option<StatusCode>>,
    delete_failure: Mutex<Option<StatusCode>>,
    last_deleted: Mutex<Option<String>>,
    requests: AtomicUsize,
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .route("/api/expenses", get(list).post(create))
            .route("/api/expenses/{id}", delete(remove))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    /// An address nothing listens on.
    pub async fn unused_addr() -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn seed(&self, description: &str, cents: u64, category: Category) {
        self.state.expenses.lock().unwrap().push(json!({
            "id": Uuid::new_v4().to_string(),
            "description": description,
            "amount": format!("{}.{:02}", cents / 100, cents % 100),
            "category": category.label(),
        }));
    }

    pub fn respond_to_list_with(&self, body: Value) {
        *self.state.list_override.lock().unwrap() = Some(body);
    }

    /// Serves `body` verbatim as `text/html` with a 200 status.
    pub fn respond_to_list_with_text(&self, body: &str) {
        *self.state.list_text.lock().unwrap() = Some(body.to_string());
    }

    pub fn fail_list_with(&self, status: u16) {
        *self.state.list_failure.lock().unwrap() = Some(status_code(status));
    }

    pub fn fail_create_with(&self, status: u16) {
        *self.state.create_failure.lock().unwrap() = Some(status_code(status));
    }

    pub fn fail_delete_with(&self, status: u16) {
        *self.state.delete_failure.lock().unwrap() = Some(status_code(status));
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn last_deleted(&self) -> Option<String> {
        self.state.last_deleted.lock().unwrap().clone()
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn list(State(state): State<Arc<MockState>>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = *state.list_failure.lock().unwrap() {
        return error(status, "Database connection failed");
    }
    if let Some(body) = state.list_text.lock().unwrap().clone() {
        return ([(header::CONTENT_TYPE, "text/html")], body).into_response();
    }
    if let Some(body) = state.list_override.lock().unwrap().clone() {
        return Json(body).into_response();
    }
    Json(Value::Array(state.expenses.lock().unwrap().clone())).into_response()
}

async fn create(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = *state.create_failure.lock().unwrap() {
        return error(status, "Database connection failed");
    }
    let (Some(description), Some(amount), Some(category)) = (
        body.get("description"),
        body.get("amount").and_then(Value::as_f64),
        body.get("category"),
    ) else {
        return error(StatusCode::BAD_REQUEST, "Missing data");
    };

    let record = json!({
        "id": Uuid::new_v4().to_string(),
        "description": description,
        "amount": amount,
        "category": category,
    });
    state.expenses.lock().unwrap().push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn remove(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    *state.last_deleted.lock().unwrap() = Some(id.clone());
    if let Some(status) = *state.delete_failure.lock().unwrap() {
        return error(status, "Database connection failed");
    }

    let mut expenses = state.expenses.lock().unwrap();
    let before = expenses.len();
    expenses.retain(|e| e.get("id").and_then(Value::as_str) != Some(id.as_str()));
    if expenses.len() == before {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    }
    Json(json!({ "message": "Expense deleted successfully" })).into_response()
}
