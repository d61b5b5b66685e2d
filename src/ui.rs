use crate::book::AttendanceBook;
use crate::calendar::format_date;
use crate::models::WeekInfo;
use crate::stats::{DEFAULT_ABSENTEE_THRESHOLD, long_absentees, member_stats, overall_stats};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_index(
    today: NaiveDate,
    weeks: &[WeekInfo],
    current_week: u32,
    book: &AttendanceBook,
) -> String {
    let overall = overall_stats(book);
    let week_date = weeks
        .iter()
        .find(|w| w.week == current_week)
        .map(|w| format!(" ({})", format_date(w.date)))
        .unwrap_or_default();
    INDEX_HTML
        .replace("{{DATE}}", &today.to_string())
        .replace("{{MEMBERS}}", &overall.member_count.to_string())
        .replace("{{PRESENT}}", &overall.total_present.to_string())
        .replace("{{ABSENT}}", &overall.total_absent.to_string())
        .replace("{{RATE}}", &overall.overall_rate.to_string())
        .replace("{{WEEK}}", &current_week.to_string())
        .replace("{{WEEK_DATE}}", &week_date)
        .replace("{{ABSENTEES}}", &absentee_items(book, current_week))
        .replace("{{ROWS}}", &roster_rows(book))
}

fn absentee_items(book: &AttendanceBook, current_week: u32) -> String {
    let absentees = long_absentees(book, current_week, DEFAULT_ABSENTEE_THRESHOLD);
    if absentees.is_empty() {
        return format!(
            r#"<li class="empty">연속 {DEFAULT_ABSENTEE_THRESHOLD}주 이상 결석자가 없습니다</li>"#
        );
    }

    let mut html = String::new();
    for absentee in absentees {
        let _ = write!(
            html,
            r#"<li><span class="name">{}</span><span class="group">{}</span><span class="streak">{}주 연속 결석</span></li>"#,
            escape(&absentee.member.name),
            escape(&absentee.member.team_cell_label()),
            absentee.consecutive_absent,
        );
    }
    html
}

fn roster_rows(book: &AttendanceBook) -> String {
    let mut html = String::new();
    for member in book.members() {
        let stats = member_stats(&book.records, &member.id);
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>",
            escape(&member.name),
            escape(member.team.as_deref().unwrap_or("")),
            escape(member.cell.as_deref().unwrap_or("")),
            stats.present,
            stats.absent,
            stats.rate,
        );
    }
    html
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>교회 출석부</title>
  <style>
    :root {
      --bg: #f7f4ee;
      --ink: #2b2a28;
      --accent: #2f4858;
      --danger: #c2412d;
      --card: #ffffff;
      --shadow: 0 12px 32px rgba(47, 72, 88, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Pretendard", "Apple SD Gothic Neo", "Noto Sans KR", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      max-width: 1100px;
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      flex-wrap: wrap;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .actions a {
      color: var(--accent);
      font-weight: 600;
      margin-left: 16px;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 18px;
    }

    .card .label {
      font-size: 0.85rem;
      opacity: 0.7;
    }

    .card .value {
      font-size: 1.8rem;
      font-weight: 700;
    }

    .layout {
      display: grid;
      grid-template-columns: 1fr 280px;
      gap: 24px;
      align-items: start;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      overflow: hidden;
    }

    th, td {
      padding: 10px 12px;
      text-align: left;
      border-bottom: 1px solid #eee;
    }

    th {
      background: var(--accent);
      color: #fff;
      font-weight: 600;
    }

    .absentees {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .absentees li {
      background: var(--card);
      border: 1px solid rgba(194, 65, 45, 0.25);
      border-radius: 12px;
      padding: 10px 12px;
      display: grid;
      gap: 2px;
    }

    .absentees .streak {
      color: var(--danger);
      font-weight: 600;
    }

    .absentees .group {
      font-size: 0.8rem;
      opacity: 0.7;
    }

    .absentees .empty {
      text-align: center;
      opacity: 0.7;
    }

    @media (max-width: 800px) {
      .layout {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>교회 출석부</h1>
      <div class="actions">
        <span>{{DATE}} · {{WEEK}}주차{{WEEK_DATE}} 기준</span>
        <a href="/api/export">엑셀 내보내기</a>
      </div>
    </header>

    <section class="cards">
      <div class="card"><div class="label">총 교인</div><div class="value">{{MEMBERS}}명</div></div>
      <div class="card"><div class="label">총 출석</div><div class="value">{{PRESENT}}회</div></div>
      <div class="card"><div class="label">총 결석</div><div class="value">{{ABSENT}}회</div></div>
      <div class="card"><div class="label">평균 출석률</div><div class="value">{{RATE}}%</div></div>
    </section>

    <section class="layout">
      <table>
        <thead>
          <tr><th>이름</th><th>팀</th><th>셀</th><th>출석</th><th>결석</th><th>출석률</th></tr>
        </thead>
        <tbody>
          {{ROWS}}
        </tbody>
      </table>

      <aside>
        <h3>장기결석자 명단</h3>
        <ul class="absentees">
          {{ABSENTEES}}
        </ul>
      </aside>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::generate_year_weeks;
    use crate::models::{AttendanceStatus, Member};

    #[test]
    fn renders_counts_and_escapes_names() {
        let mut book = AttendanceBook::new(
            vec![Member {
                id: "1".into(),
                name: "<b>홍길동</b>".into(),
                team: Some("엑소더스".into()),
                cell: Some("2셀".into()),
            }],
            Vec::new(),
        );
        for week in 1..=5 {
            book.set_attendance("1", week, AttendanceStatus::Absent);
        }

        let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let html = render_index(today, &generate_year_weeks(2026), 5, &book);
        assert!(html.contains("5주차 (2/1) 기준"));
        assert!(html.contains("&lt;b&gt;홍길동&lt;/b&gt;"));
        assert!(!html.contains("<b>홍길동"));
        assert!(html.contains("5주 연속 결석"));
        assert!(html.contains("엑소더스 2셀"));
        assert!(html.contains("0%"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn empty_absentee_list_has_placeholder() {
        let book = AttendanceBook::default();
        let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let html = render_index(today, &[], 5, &book);
        assert!(html.contains("5주차 기준"));
        assert!(html.contains("연속 4주 이상 결석자가 없습니다"));
    }
}
