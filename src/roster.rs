use crate::models::{CELL_NAMES, LEGACY_DEFAULT_CELL, Member, TEAM_NAMES};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends a member with a fresh id. Returns `None` when `name` is blank.
    pub fn add(
        &mut self,
        name: &str,
        team: Option<String>,
        cell: Option<String>,
    ) -> Option<Member> {
        self.add_at(Utc::now().timestamp_millis(), name, team, cell)
    }

    fn add_at(
        &mut self,
        now_millis: i64,
        name: &str,
        team: Option<String>,
        cell: Option<String>,
    ) -> Option<Member> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let member = Member {
            id: self.next_id(now_millis),
            name: name.to_string(),
            team: non_blank(team),
            cell: non_blank(cell),
        };
        self.members.push(member.clone());
        Some(member)
    }

    /// Millisecond timestamp, bumped past any id already on the roster.
    fn next_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        while self.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        team: Option<String>,
        cell: Option<String>,
    ) -> bool {
        let Some(member) = self.members.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        member.name = name.trim().to_string();
        member.team = non_blank(team);
        member.cell = non_blank(cell);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Member> {
        let index = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(index))
    }

    pub fn replace(&mut self, members: Vec<Member>) {
        self.members = members;
    }
}

pub fn is_known_team(value: &str) -> bool {
    TEAM_NAMES.contains(&value)
}

pub fn is_known_cell(value: &str) -> bool {
    CELL_NAMES.contains(&value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A member as read from storage, before its shape is known.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub cell: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberShape {
    Current(Member),
    Legacy { id: String, name: String, group: String },
    Unknown(Member),
}

impl From<RawMember> for MemberShape {
    fn from(raw: RawMember) -> Self {
        let team = non_empty(raw.team);
        let cell = non_empty(raw.cell);
        if team.is_some() && cell.is_some() {
            return Self::Current(Member {
                id: raw.id,
                name: raw.name,
                team,
                cell,
            });
        }
        match non_empty(raw.group) {
            Some(group) => Self::Legacy {
                id: raw.id,
                name: raw.name,
                group,
            },
            None => Self::Unknown(Member {
                id: raw.id,
                name: raw.name,
                team,
                cell,
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Converts stored members to the current shape. One-way and lossy: a
/// `"<N>팀"` group becomes the Nth team with the default cell, any other
/// group value is discarded.
pub fn migrate_legacy(raw: Vec<RawMember>) -> Vec<Member> {
    raw.into_iter()
        .map(|raw| {
            let fallback = Member {
                id: raw.id.clone(),
                name: raw.name.clone(),
                team: non_empty(raw.team.clone()),
                cell: non_empty(raw.cell.clone()),
            };
            match MemberShape::from(raw) {
                MemberShape::Current(member) | MemberShape::Unknown(member) => member,
                MemberShape::Legacy { id, name, group } => match legacy_team_number(&group) {
                    Some(number) => Member {
                        id,
                        name,
                        team: TEAM_NAMES.get(number - 1).map(|t| t.to_string()),
                        cell: Some(LEGACY_DEFAULT_CELL.to_string()),
                    },
                    None => fallback,
                },
            }
        })
        .collect()
}

/// Team number from a legacy group label such as `"3팀"`, if in `1..=12`.
fn legacy_team_number(group: &str) -> Option<usize> {
    let stripped = group.replacen('팀', "", 1);
    let trimmed = stripped.trim_start();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let number: usize = digits.parse().ok()?;
    (1..=12).contains(&number).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, team: Option<&str>, cell: Option<&str>, group: Option<&str>) -> RawMember {
        RawMember {
            id: id.into(),
            name: format!("member-{id}"),
            team: team.map(Into::into),
            cell: cell.map(Into::into),
            group: group.map(Into::into),
        }
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut roster = Roster::default();
        assert!(roster.add("   ", None, None).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn add_trims_and_drops_blank_assignments() {
        let mut roster = Roster::default();
        let member = roster
            .add("  김영희 ", Some("엑소더스".into()), Some(String::new()))
            .unwrap();
        assert_eq!(member.name, "김영희");
        assert_eq!(member.team.as_deref(), Some("엑소더스"));
        assert_eq!(member.cell, None);
        assert_eq!(roster.get(&member.id), Some(&member));
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut roster = Roster::default();
        let a = roster.add_at(1_000, "a", None, None).unwrap();
        let b = roster.add_at(1_000, "b", None, None).unwrap();
        let c = roster.add_at(1_000, "c", None, None).unwrap();
        assert_eq!(a.id, "1000");
        assert_eq!(b.id, "1001");
        assert_eq!(c.id, "1002");
    }

    #[test]
    fn update_replaces_fields_or_reports_missing() {
        let mut roster = Roster::default();
        let member = roster.add("a", Some("프론티어".into()), Some("2셀".into())).unwrap();
        assert!(roster.update(&member.id, "b", None, Some("3셀".into())));
        let updated = roster.get(&member.id).unwrap();
        assert_eq!(updated.name, "b");
        assert_eq!(updated.team, None);
        assert_eq!(updated.cell.as_deref(), Some("3셀"));
        assert!(!roster.update("missing", "c", None, None));
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut roster = Roster::default();
        let a = roster.add_at(1, "a", None, None).unwrap();
        let b = roster.add_at(2, "b", None, None).unwrap();
        let c = roster.add_at(3, "c", None, None).unwrap();
        assert_eq!(roster.remove(&b.id), Some(b));
        assert_eq!(roster.members(), &[a, c]);
        assert_eq!(roster.remove("nope"), None);
    }

    #[test]
    fn current_shape_drops_group() {
        let members = migrate_legacy(vec![raw(
            "1",
            Some("디사이플"),
            Some("4셀"),
            Some("2팀"),
        )]);
        assert_eq!(members[0].team.as_deref(), Some("디사이플"));
        assert_eq!(members[0].cell.as_deref(), Some("4셀"));
    }

    #[test]
    fn legacy_group_maps_to_team_and_default_cell() {
        let members = migrate_legacy(vec![raw("1", None, None, Some("2팀"))]);
        assert_eq!(members[0].team.as_deref(), Some("엑소더스"));
        assert_eq!(members[0].cell.as_deref(), Some("1셀"));
    }

    #[test]
    fn legacy_group_accepts_leading_plus_and_trailing_text() {
        let members = migrate_legacy(vec![
            raw("1", None, None, Some("+3팀")),
            raw("2", None, None, Some(" 4팀 청년")),
            raw("3", None, None, Some("++3팀")),
        ]);
        assert_eq!(members[0].team.as_deref(), Some("프론티어"));
        assert_eq!(members[0].cell.as_deref(), Some("1셀"));
        assert_eq!(members[1].team.as_deref(), Some("디사이플"));
        assert_eq!(members[2].team, None);
        assert_eq!(members[2].cell, None);
    }

    #[test]
    fn legacy_group_beyond_known_teams_keeps_default_cell_only() {
        let members = migrate_legacy(vec![raw("1", None, None, Some("9팀"))]);
        assert_eq!(members[0].team, None);
        assert_eq!(members[0].cell.as_deref(), Some("1셀"));
    }

    #[test]
    fn unparseable_group_passes_existing_fields_through() {
        let members = migrate_legacy(vec![
            raw("1", Some("여호수아"), None, Some("청년부")),
            raw("2", None, None, Some("13팀")),
            raw("3", None, Some("5셀"), None),
        ]);
        assert_eq!(members[0].team.as_deref(), Some("여호수아"));
        assert_eq!(members[0].cell, None);
        assert_eq!(members[1].team, None);
        assert_eq!(members[1].cell, None);
        assert_eq!(members[2].cell.as_deref(), Some("5셀"));
    }

    #[test]
    fn shape_classification() {
        assert!(matches!(
            MemberShape::from(raw("1", Some("엑소더스"), Some("1셀"), None)),
            MemberShape::Current(_)
        ));
        assert!(matches!(
            MemberShape::from(raw("1", Some("엑소더스"), None, Some("1팀"))),
            MemberShape::Legacy { .. }
        ));
        assert!(matches!(
            MemberShape::from(raw("1", None, None, Some(""))),
            MemberShape::Unknown(_)
        ));
    }

    #[test]
    fn known_names() {
        assert!(is_known_team("홀리웨이브"));
        assert!(!is_known_team("1팀"));
        assert!(is_known_cell("6셀"));
        assert!(!is_known_cell("7셀"));
    }
}
