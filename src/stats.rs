use crate::book::AttendanceBook;
use crate::models::{Absentee, AttendanceStatus, MemberStats, OverallStats, WeekStats};
use crate::records::RecordStore;

pub const EMPTY_MEMBER_RATE: u32 = 100;

pub const EMPTY_OVERALL_RATE: u32 = 0;

pub const DEFAULT_ABSENTEE_THRESHOLD: u32 = 4;

pub fn member_stats(records: &RecordStore, member_id: &str) -> MemberStats {
    let (present, absent) = tally(records.for_member(member_id).map(|r| r.status));
    let total = present + absent;
    MemberStats {
        present,
        absent,
        total,
        rate: member_rate(present, total),
    }
}

fn member_rate(present: usize, total: usize) -> u32 {
    if total == 0 {
        return EMPTY_MEMBER_RATE;
    }
    percent(present, total)
}

pub fn week_stats(book: &AttendanceBook, week: u32) -> WeekStats {
    let (present, absent) = tally(book.records.for_week(week).map(|r| r.status));
    WeekStats {
        present,
        absent,
        total: book.roster.len(),
    }
}

pub fn overall_stats(book: &AttendanceBook) -> OverallStats {
    let (total_present, total_absent) = tally(book.records.records().iter().map(|r| r.status));
    OverallStats {
        member_count: book.roster.len(),
        total_present,
        total_absent,
        overall_rate: overall_rate(total_present, total_absent),
    }
}

fn overall_rate(present: usize, absent: usize) -> u32 {
    let total = present + absent;
    if total == 0 {
        return EMPTY_OVERALL_RATE;
    }
    percent(present, total)
}

pub fn long_absentees(book: &AttendanceBook, current_week: u32, threshold: u32) -> Vec<Absentee> {
    book.members()
        .iter()
        .filter_map(|member| {
            let streak = absence_streak(&book.records, &member.id, current_week);
            (streak >= threshold).then(|| Absentee {
                member: member.clone(),
                consecutive_absent: streak,
            })
        })
        .collect()
}

/// Absences counted backward from `current_week` up to the first present week.
pub fn absence_streak(records: &RecordStore, member_id: &str, current_week: u32) -> u32 {
    let mut count = 0;
    let mut week = current_week;
    while week >= 1 && records.get(member_id, week) == AttendanceStatus::Absent {
        count += 1;
        week -= 1;
    }
    count
}

fn tally(statuses: impl Iterator<Item = AttendanceStatus>) -> (usize, usize) {
    statuses.fold((0, 0), |(present, absent), status| match status {
        AttendanceStatus::Present => (present + 1, absent),
        AttendanceStatus::Absent => (present, absent + 1),
    })
}

fn percent(part: usize, whole: usize) -> u32 {
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;
    use AttendanceStatus::{Absent, Present};

    fn book_with(ids: &[&str]) -> AttendanceBook {
        let members = ids
            .iter()
            .map(|id| Member {
                id: id.to_string(),
                name: format!("name-{id}"),
                team: None,
                cell: None,
            })
            .collect();
        AttendanceBook::new(members, Vec::new())
    }

    #[test]
    fn member_without_records_rates_full() {
        let book = book_with(&["1"]);
        let stats = member_stats(&book.records, "1");
        assert_eq!(
            stats,
            MemberStats {
                present: 0,
                absent: 0,
                total: 0,
                rate: 100
            }
        );
    }

    #[test]
    fn member_rate_counts_explicit_records_only() {
        let mut book = book_with(&["1"]);
        book.set_attendance("1", 1, Present);
        book.set_attendance("1", 2, Absent);
        book.set_attendance("1", 5, Present);
        let stats = member_stats(&book.records, "1");
        assert_eq!(stats.total, 3);
        assert_eq!(stats.present, 2);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.rate, 67);
    }

    #[test]
    fn member_rate_rounds_half_up() {
        let mut book = book_with(&["1"]);
        book.set_attendance("1", 1, Present);
        for week in 2..=8 {
            book.set_attendance("1", week, Absent);
        }
        // 1 of 8 is 12.5%.
        assert_eq!(member_stats(&book.records, "1").rate, 13);
    }

    #[test]
    fn week_total_is_roster_size() {
        let mut book = book_with(&["1", "2", "3"]);
        book.set_attendance("1", 4, Absent);
        book.set_attendance("2", 4, Present);
        book.set_attendance("2", 5, Absent);
        assert_eq!(
            week_stats(&book, 4),
            WeekStats {
                present: 1,
                absent: 1,
                total: 3
            }
        );
        assert_eq!(week_stats(&book, 9).total, 3);
    }

    #[test]
    fn overall_rate_is_zero_without_records() {
        let book = book_with(&["1", "2"]);
        let overall = overall_stats(&book);
        assert_eq!(overall.overall_rate, 0);
        assert_eq!(overall.member_count, 2);
    }

    #[test]
    fn overall_rate_spans_all_records() {
        let mut book = book_with(&["1", "2"]);
        book.set_attendance("1", 1, Present);
        book.set_attendance("1", 2, Present);
        book.set_attendance("2", 1, Present);
        book.set_attendance("2", 2, Absent);
        let overall = overall_stats(&book);
        assert_eq!(overall.total_present, 3);
        assert_eq!(overall.total_absent, 1);
        assert_eq!(overall.overall_rate, 75);
    }

    #[test]
    fn four_week_streak_qualifies_with_exact_count() {
        let mut book = book_with(&["1"]);
        for week in 7..=10 {
            book.set_attendance("1", week, Absent);
        }
        book.set_attendance("1", 6, Present);
        let absentees = long_absentees(&book, 10, 4);
        assert_eq!(absentees.len(), 1);
        assert_eq!(absentees[0].consecutive_absent, 4);
        assert_eq!(absentees[0].member.id, "1");
    }

    #[test]
    fn streak_broken_before_threshold_excludes_member() {
        let mut book = book_with(&["1"]);
        for week in [10, 8, 7] {
            book.set_attendance("1", week, Absent);
        }
        book.set_attendance("1", 9, Present);
        assert!(long_absentees(&book, 10, 4).is_empty());
    }

    #[test]
    fn unrecorded_current_week_breaks_streak() {
        let mut book = book_with(&["1"]);
        for week in 1..=9 {
            book.set_attendance("1", week, Absent);
        }
        assert!(long_absentees(&book, 10, 4).is_empty());
        assert_eq!(absence_streak(&book.records, "1", 9), 9);
    }

    #[test]
    fn streak_reports_full_length_and_stops_at_week_one() {
        let mut book = book_with(&["1", "2"]);
        for week in 1..=6 {
            book.set_attendance("2", week, Absent);
        }
        let absentees = long_absentees(&book, 6, DEFAULT_ABSENTEE_THRESHOLD);
        assert_eq!(absentees.len(), 1);
        assert_eq!(absentees[0].member.id, "2");
        assert_eq!(absentees[0].consecutive_absent, 6);
    }

    #[test]
    fn absentees_follow_roster_order() {
        let mut book = book_with(&["b", "a"]);
        for id in ["a", "b"] {
            for week in 1..=4 {
                book.set_attendance(id, week, Absent);
            }
        }
        let ids: Vec<_> = long_absentees(&book, 4, 4)
            .into_iter()
            .map(|a| a.member.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn week_zero_yields_no_streak() {
        let book = book_with(&["1"]);
        assert_eq!(absence_streak(&book.records, "1", 0), 0);
        // A zero threshold admits everyone, streak or not.
        assert_eq!(long_absentees(&book, 0, 0).len(), 1);
    }
}
