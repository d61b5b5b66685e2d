use crate::models::{AttendanceRecord, AttendanceStatus};

/// Status reported for a (member, week) pair that has no record.
pub const DEFAULT_WEEK_STATUS: AttendanceStatus = AttendanceStatus::Present;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<AttendanceRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, member_id: &str, week: u32) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.member_id == member_id && r.week == week)
    }

    pub fn get(&self, member_id: &str, week: u32) -> AttendanceStatus {
        self.find(member_id, week)
            .map(|r| r.status)
            .unwrap_or(DEFAULT_WEEK_STATUS)
    }

    /// Upsert: overwrites the existing record for the pair or appends one.
    pub fn set(&mut self, member_id: &str, week: u32, status: AttendanceStatus) {
        match self
            .records
            .iter_mut()
            .find(|r| r.member_id == member_id && r.week == week)
        {
            Some(record) => record.status = status,
            None => self.records.push(AttendanceRecord {
                member_id: member_id.to_string(),
                week,
                status,
            }),
        }
    }

    pub fn toggle(&mut self, member_id: &str, week: u32) -> AttendanceStatus {
        let next = self.get(member_id, week).flipped();
        self.set(member_id, week, next);
        next
    }

    pub fn for_member<'a>(
        &'a self,
        member_id: &'a str,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.records.iter().filter(move |r| r.member_id == member_id)
    }

    pub fn for_week(&self, week: u32) -> impl Iterator<Item = &AttendanceRecord> + '_ {
        self.records.iter().filter(move |r| r.week == week)
    }

    pub fn remove_member(&mut self, member_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.member_id != member_id);
        before - self.records.len()
    }

    pub fn replace(&mut self, records: Vec<AttendanceRecord>) {
        self.records = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttendanceStatus::{Absent, Present};

    #[test]
    fn missing_pair_reads_as_present() {
        let store = RecordStore::default();
        assert_eq!(store.get("1", 3), Present);
        assert!(store.find("1", 3).is_none());
    }

    #[test]
    fn set_round_trips_and_overwrites_in_place() {
        let mut store = RecordStore::default();
        store.set("1", 3, Absent);
        assert_eq!(store.get("1", 3), Absent);
        store.set("1", 3, Present);
        assert_eq!(store.get("1", 3), Present);
        assert_eq!(store.for_member("1").filter(|r| r.week == 3).count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_cycles_between_two_states() {
        let mut store = RecordStore::default();
        assert_eq!(store.toggle("1", 5), Absent);
        assert_eq!(store.get("1", 5), Absent);
        assert_eq!(store.toggle("1", 5), Present);
        assert_eq!(store.toggle("1", 5), Absent);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn out_of_range_weeks_are_stored() {
        let mut store = RecordStore::default();
        store.set("1", 60, Absent);
        assert_eq!(store.get("1", 60), Absent);
    }

    #[test]
    fn remove_member_only_touches_that_member() {
        let mut store = RecordStore::default();
        store.set("1", 1, Absent);
        store.set("1", 2, Present);
        store.set("2", 1, Absent);
        assert_eq!(store.remove_member("1"), 2);
        assert_eq!(store.for_member("1").count(), 0);
        assert_eq!(store.get("2", 1), Absent);
    }

    #[test]
    fn for_week_filters_by_week() {
        let mut store = RecordStore::default();
        store.set("1", 1, Absent);
        store.set("2", 1, Present);
        store.set("2", 2, Present);
        assert_eq!(store.for_week(1).count(), 2);
        assert_eq!(store.for_week(2).count(), 1);
    }
}
