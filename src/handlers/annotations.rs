use crate::db::{AnnotationStatus, DbAnnotation, NewAnnotation};
use crate::error::DeskError;
use crate::router::DeskState;
use crate::session::{Action, SessionContext};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddAnnotationRequest {
    pub row: u32,
    pub column: String,
    pub text: String,
    #[serde(default)]
    pub status: AnnotationStatus,
}

#[derive(Debug, Serialize)]
pub struct AddAnnotationResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AnnotationStatus,
}

pub async fn list_for_sheet(
    State(state): State<DeskState>,
    ctx: SessionContext,
    Path((section, file, sheet)): Path<(String, String, String)>,
) -> Result<Json<Vec<DbAnnotation>>, DeskError> {
    ctx.require(Action::Browse)?;
    Ok(Json(state.annotations.list(&file, &sheet, &section).await?))
}

/// Cross-file summary of a section.
pub async fn list_for_section(
    State(state): State<DeskState>,
    ctx: SessionContext,
    Path(section): Path<String>,
) -> Result<Json<Vec<DbAnnotation>>, DeskError> {
    ctx.require(Action::Browse)?;
    Ok(Json(state.annotations.list_by_section(&section).await?))
}

/// The location is recorded as given; it is not checked against the workbook.
pub async fn add(
    State(state): State<DeskState>,
    ctx: SessionContext,
    Path((section, file, sheet)): Path<(String, String, String)>,
    WithRejection(Json(req), _): WithRejection<Json<AddAnnotationRequest>, DeskError>,
) -> Result<(StatusCode, Json<AddAnnotationResponse>), DeskError> {
    ctx.require(Action::CreateAnnotation)?;
    let id = state
        .annotations
        .add(NewAnnotation {
            file,
            sheet,
            row: req.row,
            column: req.column,
            text: req.text,
            status: req.status,
            section,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(AddAnnotationResponse { id })))
}

pub async fn update_status(
    State(state): State<DeskState>,
    ctx: SessionContext,
    WithRejection(Path(id), _): WithRejection<Path<i64>, DeskError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateStatusRequest>, DeskError>,
) -> Result<StatusCode, DeskError> {
    ctx.require(Action::UpdateAnnotationStatus)?;
    state.annotations.update_status(id, req.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<DeskState>,
    ctx: SessionContext,
    WithRejection(Path(id), _): WithRejection<Path<i64>, DeskError>,
) -> Result<StatusCode, DeskError> {
    ctx.require(Action::DeleteAnnotation)?;
    state.annotations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
