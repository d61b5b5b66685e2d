//! Spreadsheet export and import.
//!
//! Layout: one sheet, header row `이름, 팀, 셀, 1주, 2주, ...`, one row per
//! member, week cells holding `O` (present) or `X` (absent).

use crate::book::AttendanceBook;
use crate::errors::{ExportError, ImportError};
use crate::models::{AttendanceRecord, AttendanceStatus, Member, WeekInfo};
use crate::roster::{is_known_cell, is_known_team};
use calamine::{Data, Reader, Xlsx, XlsxError, open_workbook_from_rs};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

pub const SHEET_NAME: &str = "출석부";
pub const NAME_HEADER: &str = "이름";
pub const TEAM_HEADER: &str = "팀";
pub const CELL_HEADER: &str = "셀";

static WEEK_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)주$").expect("valid week header regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub members: Vec<Member>,
    pub records: Vec<AttendanceRecord>,
}

pub fn week_header(week: u32) -> String {
    format!("{week}주")
}

/// Header plus one row per member. Unrecorded weeks export as present.
pub fn export_rows(book: &AttendanceBook, weeks: &[WeekInfo]) -> Vec<Vec<String>> {
    let mut header = vec![
        NAME_HEADER.to_string(),
        TEAM_HEADER.to_string(),
        CELL_HEADER.to_string(),
    ];
    header.extend(weeks.iter().map(|w| week_header(w.week)));

    let mut rows = Vec::with_capacity(book.members().len() + 1);
    rows.push(header);
    for member in book.members() {
        let mut row = vec![
            member.name.clone(),
            member.team.clone().unwrap_or_default(),
            member.cell.clone().unwrap_or_default(),
        ];
        row.extend(
            weeks
                .iter()
                .map(|w| book.attendance(&member.id, w.week).mark().to_string()),
        );
        rows.push(row);
    }
    rows
}

pub fn export_xlsx(book: &AttendanceBook, weeks: &[WeekInfo]) -> Result<Vec<u8>, ExportError> {
    let rows = export_rows(book, weeks);
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        worksheet.set_column_width(0, 10.0)?;
        worksheet.set_column_width(1, 10.0)?;
        worksheet.set_column_width(2, 6.0)?;
        for offset in 0..weeks.len() {
            worksheet.set_column_width((offset + 3) as u16, 5.0)?;
        }

        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                worksheet.write_string(r as u32, c as u16, value)?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("{SHEET_NAME}_{}.xlsx", date.format("%Y%m%d"))
}

pub fn import_xlsx(bytes: &[u8]) -> Result<ImportResult, ImportError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|err: XlsxError| ImportError::Workbook(err.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::EmptySheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| ImportError::Workbook(err.to_string()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    parse_rows(&rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Turns header + data rows into members and records.
///
/// Member ids are the 1-based data row position. Unknown team/cell values are
/// dropped. Week cells other than `O`/`X` produce no record.
pub fn parse_rows(rows: &[Vec<String>]) -> Result<ImportResult, ImportError> {
    if rows.len() < 2 {
        return Err(ImportError::EmptySheet);
    }
    let headers = &rows[0];

    let column = |label: &str| headers.iter().position(|h| h == label);
    let name_idx = column(NAME_HEADER).ok_or(ImportError::MissingNameColumn)?;
    let team_idx = column(TEAM_HEADER);
    let cell_idx = column(CELL_HEADER);

    let week_columns: Vec<(usize, u32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| {
            let caps = WEEK_HEADER_RE.captures(h)?;
            let week = caps[1].parse().ok()?;
            Some((idx, week))
        })
        .collect();

    let mut result = ImportResult::default();
    for (row_idx, row) in rows[1..].iter().enumerate() {
        let cell_at = |idx: usize| row.get(idx).map(|v| v.trim()).unwrap_or("");

        let name = cell_at(name_idx);
        if name.is_empty() {
            continue;
        }
        let member_id = (row_idx + 1).to_string();

        let team = team_idx
            .map(cell_at)
            .filter(|t| !t.is_empty() && is_known_team(t));
        let cell = cell_idx
            .map(cell_at)
            .filter(|c| !c.is_empty() && is_known_cell(c));

        result.members.push(Member {
            id: member_id.clone(),
            name: name.to_string(),
            team: team.map(str::to_string),
            cell: cell.map(str::to_string),
        });

        for &(idx, week) in &week_columns {
            let status = match cell_at(idx).to_uppercase().as_str() {
                "O" => AttendanceStatus::Present,
                "X" => AttendanceStatus::Absent,
                _ => continue,
            };
            result.records.push(AttendanceRecord {
                member_id: member_id.clone(),
                week,
                status,
            });
        }
    }
    Ok(result)
}
