//! Rutas de la sesión del dashboard
//!
//! Cada acción del usuario modifica el estado del controlador y devuelve la
//! vista recalculada.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use crate::dto::vehicle_dto::{
    AddVehicleForm, DetailDraftRequest, SearchRequest, SortRequest, StatusFilterRequest,
};
use crate::services::csv_export::{export_vehicles_csv, EXPORT_FILENAME};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::views::DashboardView;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/reload", post(reload_dashboard))
        .route("/search", put(set_search_term))
        .route("/status-filter", put(set_status_filter))
        .route("/sort", post(toggle_sort))
        .route("/page/next", post(next_page))
        .route("/page/previous", post(previous_page))
        .route("/select/:id", post(select_vehicle))
        .route("/close", post(close_detail))
        .route("/detail/edit", post(begin_edit))
        .route("/detail/draft", put(update_draft))
        .route("/detail/cancel", post(cancel_edit))
        .route("/detail/save", post(save_detail))
        .route("/add-form/open", post(open_add_form))
        .route("/add-form/close", post(close_add_form))
        .route("/vehicles", post(add_vehicle))
        .route("/export.csv", get(export_csv))
}

async fn current_view(state: &AppState) -> Json<DashboardView> {
    let dashboard = state.dashboard.read().await;
    Json(DashboardView::build(&dashboard))
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    current_view(&state).await
}

/// Recargar desde el store (descarta las altas locales)
async fn reload_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    state.load_dashboard().await;
    current_view(&state).await
}

async fn set_search_term(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<DashboardView> {
    state.dashboard.write().await.set_search_term(request.term);
    current_view(&state).await
}

async fn set_status_filter(
    State(state): State<AppState>,
    Json(request): Json<StatusFilterRequest>,
) -> Json<DashboardView> {
    state.dashboard.write().await.set_status_filter(request.status);
    current_view(&state).await
}

async fn toggle_sort(
    State(state): State<AppState>,
    Json(request): Json<SortRequest>,
) -> Json<DashboardView> {
    state.dashboard.write().await.toggle_sort(request.field);
    current_view(&state).await
}

async fn next_page(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.write().await.next_page();
    current_view(&state).await
}

async fn previous_page(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.write().await.previous_page();
    current_view(&state).await
}

async fn select_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DashboardView>> {
    state
        .dashboard
        .write()
        .await
        .select_vehicle(&id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))?;
    Ok(current_view(&state).await)
}

async fn close_detail(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.write().await.close_detail();
    current_view(&state).await
}

async fn begin_edit(State(state): State<AppState>) -> AppResult<Json<DashboardView>> {
    state.dashboard.write().await.detail_mut()?.begin_edit()?;
    Ok(current_view(&state).await)
}

async fn update_draft(
    State(state): State<AppState>,
    Json(request): Json<DetailDraftRequest>,
) -> AppResult<Json<DashboardView>> {
    state
        .dashboard
        .write()
        .await
        .detail_mut()?
        .set_draft(request.vehicle_name, request.status)?;
    Ok(current_view(&state).await)
}

async fn cancel_edit(State(state): State<AppState>) -> AppResult<Json<DashboardView>> {
    state.dashboard.write().await.detail_mut()?.cancel()?;
    Ok(current_view(&state).await)
}

async fn save_detail(State(state): State<AppState>) -> AppResult<Json<DashboardView>> {
    let updated = state.save_detail().await?;
    log::info!("✅ Vehículo {} guardado desde el panel", updated.id);
    Ok(current_view(&state).await)
}

async fn open_add_form(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.write().await.open_add_form();
    current_view(&state).await
}

async fn close_add_form(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.write().await.close_add_form();
    current_view(&state).await
}

/// Alta local: el vehículo no se envía al store
async fn add_vehicle(
    State(state): State<AppState>,
    Json(form): Json<AddVehicleForm>,
) -> AppResult<(StatusCode, Json<DashboardView>)> {
    let vehicle = form.into_vehicle()?;
    state.dashboard.write().await.add_vehicle(vehicle);
    Ok((StatusCode::CREATED, current_view(&state).await))
}

async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dashboard = state.dashboard.read().await;
    let bytes = export_vehicles_csv(dashboard.vehicles())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        bytes,
    ))
}
