use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::export::{self, ExportError};
use crate::persistence::{EscalaStore, PersistenceError};
use crate::{Escala, EscalaDraft, Funcionario, FuncionarioDraft};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EscalaStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EscalaStore>) -> Self {
        Self { store }
    }

    fn store(&self) -> &dyn EscalaStore {
        self.store.as_ref()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        match value {
            PersistenceError::NotFound => ApiError::NotFound("record not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(value: ExportError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// An escala together with its funcionários, the shape clients edit against.
#[derive(Debug, Serialize)]
struct EscalaResponse {
    #[serde(flatten)]
    escala: Escala,
    funcionarios: Vec<Funcionario>,
}

#[derive(Debug, Deserialize)]
struct DuplicarParams {
    novo_mes: u32,
    novo_ano: i32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/escalas", get(list_escalas).post(create_escala))
        .route(
            "/escalas/:id",
            get(get_escala).put(update_escala).delete(delete_escala),
        )
        .route("/escalas/:id/duplicar", post(duplicar_escala))
        .route("/escalas/:id/funcionarios", get(list_funcionarios))
        .route("/funcionarios", post(create_funcionario))
        .route(
            "/funcionarios/:id",
            get(get_funcionario)
                .put(update_funcionario)
                .delete(delete_funcionario),
        )
        .route("/exportar_excel/:id", get(exportar_excel))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, store: Arc<dyn EscalaStore>) -> std::io::Result<()> {
    let state = AppState::new(store);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

fn validate_periodo(mes: u32, ano: i32) -> Result<(), ApiError> {
    if !(1..=12).contains(&mes) {
        return Err(ApiError::invalid(format!("mes {mes} out of range 1..=12")));
    }
    if ano <= 0 {
        return Err(ApiError::invalid(format!("ano {ano} must be positive")));
    }
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_escalas(State(state): State<AppState>) -> Result<Json<Vec<Escala>>, ApiError> {
    Ok(Json(state.store().list_escalas()?))
}

async fn create_escala(
    State(state): State<AppState>,
    Json(draft): Json<EscalaDraft>,
) -> Result<(StatusCode, Json<EscalaResponse>), ApiError> {
    validate_periodo(draft.mes, draft.ano)?;
    let escala = state.store().create_escala(&draft)?;
    Ok((
        StatusCode::CREATED,
        Json(EscalaResponse {
            funcionarios: Vec::new(),
            escala,
        }),
    ))
}

async fn get_escala(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EscalaResponse>, ApiError> {
    let escala = state
        .store()
        .get_escala(id)?
        .ok_or_else(|| ApiError::not_found(format!("escala {id} not found")))?;
    let funcionarios = state.store().funcionarios_por_escala(id)?;
    Ok(Json(EscalaResponse {
        escala,
        funcionarios,
    }))
}

async fn update_escala(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<EscalaDraft>,
) -> Result<Json<EscalaResponse>, ApiError> {
    validate_periodo(draft.mes, draft.ano)?;
    let escala = match state.store().update_escala(id, &draft) {
        Err(PersistenceError::NotFound) => {
            return Err(ApiError::not_found(format!("escala {id} not found")));
        }
        other => other?,
    };
    let funcionarios = state.store().funcionarios_por_escala(id)?;
    Ok(Json(EscalaResponse {
        escala,
        funcionarios,
    }))
}

async fn delete_escala(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store().delete_escala(id)?;
    if !removed {
        return Err(ApiError::not_found(format!("escala {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn duplicar_escala(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DuplicarParams>,
) -> Result<(StatusCode, Json<EscalaResponse>), ApiError> {
    validate_periodo(params.novo_mes, params.novo_ano)?;
    let (escala, funcionarios) =
        match state
            .store()
            .duplicate_escala(id, params.novo_mes, params.novo_ano)
        {
            Err(PersistenceError::NotFound) => {
                return Err(ApiError::not_found(format!("escala {id} not found")));
            }
            other => other?,
        };
    Ok((
        StatusCode::CREATED,
        Json(EscalaResponse {
            escala,
            funcionarios,
        }),
    ))
}

async fn list_funcionarios(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Funcionario>>, ApiError> {
    if state.store().get_escala(id)?.is_none() {
        return Err(ApiError::not_found(format!("escala {id} not found")));
    }
    Ok(Json(state.store().funcionarios_por_escala(id)?))
}

async fn create_funcionario(
    State(state): State<AppState>,
    Json(draft): Json<FuncionarioDraft>,
) -> Result<(StatusCode, Json<Funcionario>), ApiError> {
    if state.store().get_escala(draft.escala_id)?.is_none() {
        return Err(ApiError::not_found(format!(
            "escala {} not found",
            draft.escala_id
        )));
    }
    let funcionario = state.store().create_funcionario(&draft)?;
    Ok((StatusCode::CREATED, Json(funcionario)))
}

async fn get_funcionario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Funcionario>, ApiError> {
    state
        .store()
        .get_funcionario(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("funcionario {id} not found")))
}

async fn update_funcionario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<FuncionarioDraft>,
) -> Result<Json<Funcionario>, ApiError> {
    match state.store().update_funcionario(id, &draft) {
        Err(PersistenceError::NotFound) => {
            Err(ApiError::not_found(format!("funcionario {id} not found")))
        }
        other => Ok(Json(other?)),
    }
}

async fn delete_funcionario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store().delete_funcionario(id)?;
    if !removed {
        return Err(ApiError::not_found(format!("funcionario {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn exportar_excel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let escala = state
        .store()
        .get_escala(id)?
        .ok_or_else(|| ApiError::not_found(format!("escala {id} not found")))?;
    let funcionarios = state.store().funcionarios_por_escala(id)?;

    let bytes = export::render_xlsx(&escala, &funcionarios)?;
    let filename = export::export_filename(&escala);
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        ),
    ];
    Ok((headers, bytes).into_response())
}
