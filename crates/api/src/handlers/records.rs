use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use bytes::Bytes;
use futures::StreamExt;
use tracing::{debug, error};

use crate::dto::{LookupPath, RecordPath};
use crate::errors::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dump_records))
        .route("/{name}", get(get_by_name))
        .route("/{name}/", get(get_by_name))
        .route("/{name}/{a}", get(get_by_type).put(put_rdata))
        .route("/{name}/{a}/", get(get_by_type))
        .route(
            "/{name}/{a}/{b}",
            get(get_by_class_and_type).put(put_typed),
        )
        .route("/{name}/{a}/{b}/", get(get_by_class_and_type))
        .route("/{name}/{a}/{b}/{c}", put(put_with_ttl))
        .route("/{name}/{a}/{b}/{c}/{d}", put(put_full))
}

async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, ApiError> {
    lookup(&state, LookupPath::new(&name)).await
}

async fn get_by_type(
    State(state): State<AppState>,
    Path((name, record_type)): Path<(String, String)>,
) -> Result<String, ApiError> {
    lookup(&state, LookupPath::new(&name).with_type(&record_type)).await
}

async fn get_by_class_and_type(
    State(state): State<AppState>,
    Path((name, class, record_type)): Path<(String, String, String)>,
) -> Result<String, ApiError> {
    let path = LookupPath::new(&name)
        .with_class(&class)
        .with_type(&record_type);
    lookup(&state, path).await
}

async fn lookup(state: &AppState, path: LookupPath<'_>) -> Result<String, ApiError> {
    let key = path.into_key()?;
    let rrset = state.get_record.execute(&key).await?;
    Ok(format!("{}\n", rrset))
}

async fn put_rdata(
    State(state): State<AppState>,
    Path((name, rdata)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    store(&state, RecordPath::new(&name, &rdata)).await
}

async fn put_typed(
    State(state): State<AppState>,
    Path((name, record_type, rdata)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    store(&state, RecordPath::new(&name, &rdata).with_type(&record_type)).await
}

async fn put_with_ttl(
    State(state): State<AppState>,
    Path((name, ttl, record_type, rdata)): Path<(String, String, String, String)>,
) -> Result<StatusCode, ApiError> {
    let path = RecordPath::new(&name, &rdata)
        .with_ttl(&ttl)
        .with_type(&record_type);
    store(&state, path).await
}

async fn put_full(
    State(state): State<AppState>,
    Path((name, ttl, class, record_type, rdata)): Path<(String, String, String, String, String)>,
) -> Result<StatusCode, ApiError> {
    let path = RecordPath::new(&name, &rdata)
        .with_ttl(&ttl)
        .with_class(&class)
        .with_type(&record_type);
    store(&state, path).await
}

async fn store(state: &AppState, path: RecordPath<'_>) -> Result<StatusCode, ApiError> {
    let rrset = path.into_record_set(&state.records).map_err(|e| {
        debug!(name = path.name, error = %e, "Rejected record write");
        e
    })?;
    state.put_record.execute(&rrset).await?;
    Ok(StatusCode::OK)
}

/// Streams every stored RRset in text form, one line per record.
async fn dump_records(State(state): State<AppState>) -> Response {
    let lines = state.dump_records.execute().map(|item| match item {
        Ok(rrset) => Ok(Bytes::from(format!("{}\n", rrset))),
        Err(e) => {
            error!(error = %e, "Record dump aborted");
            Err(e)
        }
    });

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(lines),
    )
        .into_response()
}
