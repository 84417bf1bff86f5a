use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Failure body carrying a `message`, the shape the fetch helper reads.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// The request as the server received it.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

pub type Db = Arc<RwLock<Vec<Item>>>;

type Failure = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .route("/echo", any(echo))
        .route("/text", get(text))
        .route("/fail", get(fail))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

async fn list_items(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<ItemList> {
    let items = db.read().await;
    let limit = query.limit.unwrap_or(items.len());
    Json(ItemList {
        items: items.iter().take(limit).cloned().collect(),
    })
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<Item>), Failure> {
    let name = input.name.trim();
    if name.chars().count() < 2 {
        return Err(failure(StatusCode::BAD_REQUEST, "invalid name"));
    }
    let item = Item {
        id: Uuid::new_v4(),
        name: name.to_string(),
    };
    tracing::info!(id = %item.id, "item created");
    db.write().await.push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Item>, Failure> {
    let items = db.read().await;
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "item not found"))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Item>, Failure> {
    let mut items = db.write().await;
    let idx = items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "item not found"))?;
    Ok(Json(items.remove(idx)))
}

async fn echo(
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
        body: (!body.is_empty()).then_some(body),
    })
}

async fn text() -> &'static str {
    "plain text"
}

async fn fail() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "boom" })),
    )
}
