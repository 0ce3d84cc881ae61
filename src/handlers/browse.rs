use crate::blocking::run_blocking;
use crate::db::DbAnnotation;
use crate::error::DeskError;
use crate::router::DeskState;
use crate::session::{Action, SessionContext};
use crate::workbook::{self, SheetTable};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SheetView {
    pub section: String,
    pub file: String,
    pub sheet: String,
    pub table: SheetTable,
    pub annotations: Vec<DbAnnotation>,
}

pub async fn list_sections(
    State(state): State<DeskState>,
    ctx: SessionContext,
) -> Result<Json<Vec<String>>, DeskError> {
    ctx.require(Action::Browse)?;
    let catalog = state.catalog.clone();
    Ok(Json(run_blocking(move || catalog.sections()).await?))
}

pub async fn list_files(
    State(state): State<DeskState>,
    ctx: SessionContext,
    Path(section): Path<String>,
) -> Result<Json<Vec<String>>, DeskError> {
    ctx.require(Action::Browse)?;
    let catalog = state.catalog.clone();
    let files = run_blocking(move || catalog.files(&section)).await?;
    Ok(Json(files.to_vec()))
}

/// POST /refresh -> forget memoized workbook listings so new files show up.
pub async fn refresh(
    State(state): State<DeskState>,
    ctx: SessionContext,
) -> Result<StatusCode, DeskError> {
    ctx.require(Action::Browse)?;
    state.catalog.invalidate();
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_sheets(
    State(state): State<DeskState>,
    ctx: SessionContext,
    Path((section, file)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, DeskError> {
    ctx.require(Action::Browse)?;
    let catalog = state.catalog.clone();
    let names = run_blocking(move || {
        let path = catalog.file_path(&section, &file)?;
        workbook::sheet_names(&path)
    })
    .await?;
    Ok(Json(names))
}

/// GET a sheet as a table together with the annotations stored for it.
pub async fn view_sheet(
    State(state): State<DeskState>,
    ctx: SessionContext,
    Path((section, file, sheet)): Path<(String, String, String)>,
) -> Result<Json<SheetView>, DeskError> {
    ctx.require(Action::Browse)?;
    let catalog = state.catalog.clone();
    let (section_name, file_name, sheet_name) = (section.clone(), file.clone(), sheet.clone());
    let table = run_blocking(move || {
        let path = catalog.file_path(&section_name, &file_name)?;
        workbook::read_sheet(&path, &sheet_name)
    })
    .await?;
    let annotations = state.annotations.list(&file, &sheet, &section).await?;
    Ok(Json(SheetView {
        section,
        file,
        sheet,
        table,
        annotations,
    }))
}
