//! The attendance book: roster plus record store.
//!
//! Both stores are owned here so that operations spanning the two (member
//! removal, import) are applied together under one lock.

use crate::models::{AttendanceRecord, AttendanceStatus, Member, Snapshot};
use crate::records::RecordStore;
use crate::roster::Roster;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceBook {
    pub roster: Roster,
    pub records: RecordStore,
}

impl AttendanceBook {
    pub fn new(members: Vec<Member>, records: Vec<AttendanceRecord>) -> Self {
        Self {
            roster: Roster::new(members),
            records: RecordStore::new(records),
        }
    }

    pub fn members(&self) -> &[Member] {
        self.roster.members()
    }

    pub fn add_member(
        &mut self,
        name: &str,
        team: Option<String>,
        cell: Option<String>,
    ) -> Option<Member> {
        let member = self.roster.add(name, team, cell)?;
        debug!(id = %member.id, "member added");
        Some(member)
    }

    pub fn update_member(
        &mut self,
        id: &str,
        name: &str,
        team: Option<String>,
        cell: Option<String>,
    ) -> bool {
        self.roster.update(id, name, team, cell)
    }

    /// Removes the member together with all of its records.
    pub fn remove_member(&mut self, id: &str) -> Option<Member> {
        let member = self.roster.remove(id)?;
        let dropped = self.records.remove_member(id);
        debug!(id, dropped, "member removed");
        Some(member)
    }

    pub fn attendance(&self, member_id: &str, week: u32) -> AttendanceStatus {
        self.records.get(member_id, week)
    }

    pub fn set_attendance(&mut self, member_id: &str, week: u32, status: AttendanceStatus) {
        self.records.set(member_id, week, status);
    }

    pub fn toggle_attendance(&mut self, member_id: &str, week: u32) -> AttendanceStatus {
        self.records.toggle(member_id, week)
    }

    pub fn replace_all(&mut self, members: Vec<Member>, records: Vec<AttendanceRecord>) {
        self.roster.replace(members);
        self.records.replace(records);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            members: self.roster.members().to_vec(),
            records: self.records.records().to_vec(),
        }
    }
}
