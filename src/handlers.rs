use crate::calendar::{group_weeks_by_month, resolve_current_week, weeks_in_month};
use crate::errors::AppError;
use crate::excel::{export_filename, export_xlsx, import_xlsx};
use crate::models::{
    Absentee, AbsenteeQuery, ImportSummary, Member, MemberRequest, MemberStats, MonthGroup,
    OverallStats, SetStatusRequest, Snapshot, StatusResponse, WeekInfo, WeekStats, WeeksQuery,
};
use crate::roster::{is_known_cell, is_known_team};
use crate::state::AppState;
use crate::stats::{
    DEFAULT_ABSENTEE_THRESHOLD, long_absentees, member_stats, overall_stats, week_stats,
};
use crate::storage::{persist_book, persist_members, persist_records};
use crate::ui::render_index;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let data = state.data.lock().await;
    let current_week = resolve_current_week(today, &state.weeks, data.records.records());
    Html(render_index(today, &state.weeks, current_week, &data))
}

pub async fn list_weeks(
    State(state): State<AppState>,
    Query(query): Query<WeeksQuery>,
) -> Json<Vec<WeekInfo>> {
    match query.month {
        Some(month) => Json(weeks_in_month(&state.weeks, month)),
        None => Json(state.weeks.as_ref().clone()),
    }
}

pub async fn weeks_by_month(State(state): State<AppState>) -> Json<Vec<MonthGroup>> {
    Json(group_weeks_by_month(&state.weeks))
}

pub async fn list_members(State(state): State<AppState>) -> Json<Vec<Member>> {
    let data = state.data.lock().await;
    Json(data.members().to_vec())
}

pub async fn add_member(
    State(state): State<AppState>,
    Json(payload): Json<MemberRequest>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    let (team, cell) = checked_assignment(payload.team, payload.cell)?;
    let mut data = state.data.lock().await;
    let member = data
        .add_member(&payload.name, team, cell)
        .ok_or_else(|| AppError::bad_request("name must not be empty"))?;

    persist_members(&state.paths, data.members()).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MemberRequest>,
) -> Result<Json<Member>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    let (team, cell) = checked_assignment(payload.team, payload.cell)?;

    let mut data = state.data.lock().await;
    if !data.update_member(&id, &payload.name, team, cell) {
        return Err(member_not_found(&id));
    }
    let updated = data.roster.get(&id).cloned().ok_or_else(|| member_not_found(&id))?;

    persist_members(&state.paths, data.members()).await?;
    Ok(Json(updated))
}

pub async fn remove_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    data.remove_member(&id).ok_or_else(|| member_not_found(&id))?;

    persist_book(&state.paths, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_attendance(
    State(state): State<AppState>,
    Path((member_id, week)): Path<(String, u32)>,
) -> Result<Json<StatusResponse>, AppError> {
    let data = state.data.lock().await;
    if !data.roster.contains(&member_id) {
        return Err(member_not_found(&member_id));
    }
    let status = data.attendance(&member_id, week);
    Ok(Json(StatusResponse {
        member_id,
        week,
        status,
    }))
}

pub async fn set_attendance(
    State(state): State<AppState>,
    Path((member_id, week)): Path<(String, u32)>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    if !data.roster.contains(&member_id) {
        return Err(member_not_found(&member_id));
    }
    data.set_attendance(&member_id, week, payload.status);

    persist_records(&state.paths, data.records.records()).await?;
    Ok(Json(StatusResponse {
        member_id,
        week,
        status: payload.status,
    }))
}

pub async fn toggle_attendance(
    State(state): State<AppState>,
    Path((member_id, week)): Path<(String, u32)>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    if !data.roster.contains(&member_id) {
        return Err(member_not_found(&member_id));
    }
    let status = data.toggle_attendance(&member_id, week);

    persist_records(&state.paths, data.records.records()).await?;
    Ok(Json(StatusResponse {
        member_id,
        week,
        status,
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<OverallStats> {
    let data = state.data.lock().await;
    Json(overall_stats(&data))
}

pub async fn get_member_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MemberStats>, AppError> {
    let data = state.data.lock().await;
    if !data.roster.contains(&id) {
        return Err(member_not_found(&id));
    }
    Ok(Json(member_stats(&data.records, &id)))
}

pub async fn get_week_stats(
    State(state): State<AppState>,
    Path(week): Path<u32>,
) -> Json<WeekStats> {
    let data = state.data.lock().await;
    Json(week_stats(&data, week))
}

pub async fn get_absentees(
    State(state): State<AppState>,
    Query(query): Query<AbsenteeQuery>,
) -> Json<Vec<Absentee>> {
    let data = state.data.lock().await;
    let current_week = query
        .current_week
        .unwrap_or_else(|| resolve_current_week(today(), &state.weeks, data.records.records()));
    let threshold = query.threshold.unwrap_or(DEFAULT_ABSENTEE_THRESHOLD);
    Json(long_absentees(&data, current_week, threshold))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = state.data.lock().await;
    let bytes = export_xlsx(&data, &state.weeks)?;
    let filename = export_filename(today());

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"attendance.xlsx\"; filename*=UTF-8''{}",
                urlencoding::encode(&filename)
            ),
        ),
    ];
    Ok((headers, bytes))
}

pub async fn import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportSummary>, AppError> {
    let imported = import_xlsx(&body)?;
    let summary = ImportSummary {
        member_count: imported.members.len(),
        record_count: imported.records.len(),
    };

    let mut data = state.data.lock().await;
    data.replace_all(imported.members, imported.records);
    info!(
        members = summary.member_count,
        records = summary.record_count,
        "imported attendance workbook"
    );

    persist_book(&state.paths, &data).await?;
    Ok(Json(summary))
}

pub async fn snapshot(State(state): State<AppState>) -> Json<Snapshot> {
    let data = state.data.lock().await;
    Json(data.snapshot())
}

fn checked_assignment(
    team: Option<String>,
    cell: Option<String>,
) -> Result<(Option<String>, Option<String>), AppError> {
    let team = checked_choice(team, is_known_team, "team")?;
    let cell = checked_choice(cell, is_known_cell, "cell")?;
    Ok((team, cell))
}

fn checked_choice(
    value: Option<String>,
    known: fn(&str) -> bool,
    label: &str,
) -> Result<Option<String>, AppError> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) if !known(&v) => Err(AppError::bad_request(format!("unknown {label}: {v}"))),
        other => Ok(other),
    }
}

fn member_not_found(id: &str) -> AppError {
    AppError::not_found(format!("no member with id {id}"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
