//! Request handlers.

use std::io::Write;
use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use http::header;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use satchel_auth::AuthError;
use satchel_core::{ClassId, merge_rows};
use satchel_report::ReportCard;

use crate::error::{Error, Result};
use crate::state::AppState;

/// Liveness probe.
pub(crate) async fn health() -> &'static str {
    "Satchel records service"
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginResponse {
    token: String,
}

/// Exchange the admin credentials for a two-hour bearer token. The response
/// is the same for an unknown username and a wrong password.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if !state.credentials.verify(&request.username, &request.password) {
        return Err(Error::Auth(AuthError::InvalidCredentials));
    }
    let token = state.issuer.issue(&request.username)?;
    Ok(Json(LoginResponse { token }))
}

/// Ingest the roster and progress spreadsheets and upsert every student.
///
/// Both files are parsed before any write; a failure mid-loop aborts the
/// request and leaves already-applied upserts in place. The spool files are
/// removed on drop on every path.
pub(crate) async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<&'static str> {
    let mut roster_file: Option<NamedTempFile> = None;
    let mut progress_file: Option<NamedTempFile> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("studentInfo") => roster_file = Some(spool(field).await?),
            Some("academicProgress") => progress_file = Some(spool(field).await?),
            _ => {}
        }
    }

    let roster_file = roster_file.ok_or(Error::MissingFile {
        field: "studentInfo",
    })?;
    let progress_file = progress_file.ok_or(Error::MissingFile {
        field: "academicProgress",
    })?;

    let store = state.store.clone();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let roster = satchel_ingest::parse_sheet(roster_file.path())?;
        let progress = satchel_ingest::parse_sheet(progress_file.path())?;

        let merged = merge_rows(&roster, &progress)?;
        for student in &merged {
            store.upsert(&student.class, &student.record)?;
        }
        tracing::info!(students = merged.len(), "upload processed");
        Ok(())
    })
    .await??;

    Ok("Files uploaded and processed successfully")
}

/// Spool one uploaded field into a temp file the parser can read.
async fn spool(field: Field<'_>) -> Result<NamedTempFile> {
    let bytes = field.bytes().await?;
    let mut file = NamedTempFile::new()?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(file)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportQuery {
    class: String,
    section: String,
    #[serde(rename = "rollNumber")]
    roll_number: u32,
    dob: String,
}

/// Return one student's academic records. All four identity fields must
/// match exactly; the date of birth acts as the per-student credential.
pub(crate) async fn get_report(
    State(state): State<Arc<AppState>>,
    Json(query): Json<ReportQuery>,
) -> Result<Json<Map<String, Value>>> {
    let class = ClassId::parse(&query.class)?;

    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || {
        store.find_one(&class, &query.section, query.roll_number, &query.dob)
    })
    .await??;

    match record {
        Some(record) => Ok(Json(record.academic_records)),
        None => Err(Error::NotFound),
    }
}

/// Render report cards for a whole class section as one PDF attachment.
pub(crate) async fn bulk_download(
    State(state): State<Arc<AppState>>,
    Path((class_raw, section)): Path<(String, String)>,
) -> Result<Response> {
    let class = ClassId::parse(&class_raw)?;

    let store = state.store.clone();
    let lookup_class = class.clone();
    let lookup_section = section.clone();
    let records = tokio::task::spawn_blocking(move || {
        store.find_class_section(&lookup_class, &lookup_section)
    })
    .await??;

    if records.is_empty() {
        return Err(Error::NotFound);
    }

    let cards = records
        .iter()
        .map(ReportCard::from_record)
        .collect::<satchel_report::Result<Vec<_>>>()?;
    let bytes = satchel_report::render_pdf(&cards)?;

    let disposition = format!("attachment; filename=Class_{class}_Section_{section}_Report.pdf");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
