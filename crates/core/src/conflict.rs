//! Double-booking rules and the conflict-marking pass.
//!
//! Two appointments conflict when their time ranges overlap and they share a
//! patient, a doctor or a room. The pass is a stateless full recompute over
//! the whole collection: every flag is rewritten each time, so a flag clears
//! as soon as its last partner is gone.

use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::types::EntityId;

/// Which double-booking rule two appointments violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Patient,
    Room,
    Doctor,
}

/// One conflicting pair, in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentConflict {
    pub first: EntityId,
    pub second: EntityId,
    pub kinds: Vec<ConflictKind>,
}

/// Rules violated by `a` and `b`. Empty when their times do not overlap.
///
/// Callers are responsible for never comparing an appointment with itself.
pub fn conflict_kinds(a: &Appointment, b: &Appointment) -> Vec<ConflictKind> {
    if !a.time_range().overlaps(b.time_range()) {
        return Vec::new();
    }

    let mut kinds = Vec::new();
    if a.patient_id() == b.patient_id() {
        kinds.push(ConflictKind::Patient);
    }
    if a.room_id() == b.room_id() {
        kinds.push(ConflictKind::Room);
    }
    if a.doctor_id() == b.doctor_id() {
        kinds.push(ConflictKind::Doctor);
    }
    kinds
}

/// `true` iff `a` and `b` violate at least one rule.
pub fn is_conflicting(a: &Appointment, b: &Appointment) -> bool {
    a.time_range().overlaps(b.time_range())
        && (a.patient_id() == b.patient_id()
            || a.room_id() == b.room_id()
            || a.doctor_id() == b.doctor_id())
}

/// Recompute `is_potentially_conflicting` for every appointment.
///
/// Self-exclusion is by slot: index `i` is never compared with index `i`,
/// regardless of field values. Returns how many appointments ended up
/// flagged.
pub fn mark_conflicting_appointments(appointments: &mut [Appointment]) -> usize {
    let n = appointments.len();
    let mut flags = vec![false; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if is_conflicting(&appointments[i], &appointments[j]) {
                flags[i] = true;
                flags[j] = true;
            }
        }
    }

    for (appointment, flag) in appointments.iter_mut().zip(&flags) {
        appointment.set_potentially_conflicting(*flag);
    }

    flags.iter().filter(|f| **f).count()
}

/// List every conflicting pair with the rules it violates.
pub fn find_conflicts(appointments: &[Appointment]) -> Vec<AppointmentConflict> {
    let mut conflicts = Vec::new();

    for (i, first) in appointments.iter().enumerate() {
        for second in &appointments[i + 1..] {
            let kinds = conflict_kinds(first, second);
            if !kinds.is_empty() {
                conflicts.push(AppointmentConflict {
                    first: first.id(),
                    second: second.id(),
                    kinds,
                });
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_range::TimeRange;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn appt(patient: i64, doctor: i64, room: i64, start_min: u32, len: i64) -> Appointment {
        let start = Utc
            .with_ymd_and_hms(2024, 3, 4, 9 + start_min / 60, start_min % 60, 0)
            .unwrap();
        Appointment::new(
            Uuid::now_v7(),
            patient,
            doctor,
            room,
            TimeRange::from_duration(start, len).unwrap(),
        )
    }

    #[test]
    fn same_patient_overlapping_conflicts() {
        let a = appt(1, 10, 100, 0, 30);
        let b = appt(1, 11, 101, 15, 30);
        assert_eq!(conflict_kinds(&a, &b), vec![ConflictKind::Patient]);
    }

    #[test]
    fn same_room_overlapping_conflicts() {
        let a = appt(1, 10, 100, 0, 30);
        let b = appt(2, 11, 100, 15, 30);
        assert_eq!(conflict_kinds(&a, &b), vec![ConflictKind::Room]);
    }

    #[test]
    fn same_doctor_overlapping_conflicts() {
        let a = appt(1, 10, 100, 0, 30);
        let b = appt(2, 10, 101, 15, 30);
        assert_eq!(conflict_kinds(&a, &b), vec![ConflictKind::Doctor]);
    }

    #[test]
    fn multiple_rules_are_all_reported() {
        let a = appt(1, 10, 100, 0, 30);
        let b = appt(1, 10, 100, 0, 30);
        assert_eq!(
            conflict_kinds(&a, &b),
            vec![ConflictKind::Patient, ConflictKind::Room, ConflictKind::Doctor]
        );
    }

    #[test]
    fn shared_ids_without_overlap_do_not_conflict() {
        let a = appt(1, 10, 100, 0, 30);
        let b = appt(1, 10, 100, 30, 30);
        assert!(conflict_kinds(&a, &b).is_empty());
        assert!(!is_conflicting(&a, &b));
    }

    #[test]
    fn overlap_without_shared_ids_does_not_conflict() {
        let a = appt(1, 10, 100, 0, 30);
        let b = appt(2, 11, 101, 0, 30);
        assert!(!is_conflicting(&a, &b));
    }

    #[test]
    fn single_appointment_never_conflicts_with_itself() {
        let mut list = vec![appt(1, 10, 100, 0, 30)];
        assert_eq!(mark_conflicting_appointments(&mut list), 0);
        assert!(!list[0].is_potentially_conflicting());
    }

    #[test]
    fn identical_copies_in_two_slots_conflict() {
        let a = appt(1, 10, 100, 0, 30);
        let mut list = vec![a.clone(), a];
        assert_eq!(mark_conflicting_appointments(&mut list), 2);
        assert!(list.iter().all(Appointment::is_potentially_conflicting));
    }

    #[test]
    fn marking_is_symmetric_and_leaves_bystanders_clear() {
        let mut list = vec![
            appt(1, 10, 100, 0, 30),
            appt(2, 11, 101, 0, 30),
            appt(3, 12, 100, 20, 30),
        ];
        assert_eq!(mark_conflicting_appointments(&mut list), 2);
        assert!(list[0].is_potentially_conflicting());
        assert!(!list[1].is_potentially_conflicting());
        assert!(list[2].is_potentially_conflicting());
    }

    #[test]
    fn stale_flags_are_cleared() {
        let mut list = vec![appt(1, 10, 100, 0, 30), appt(1, 11, 101, 15, 30)];
        mark_conflicting_appointments(&mut list);
        assert!(list[0].is_potentially_conflicting());

        list.pop();
        assert_eq!(mark_conflicting_appointments(&mut list), 0);
        assert!(!list[0].is_potentially_conflicting());
    }

    #[test]
    fn find_conflicts_reports_pairs_in_order() {
        let list = vec![
            appt(1, 10, 100, 0, 30),
            appt(2, 10, 101, 10, 30),
            appt(3, 12, 102, 0, 30),
            appt(3, 13, 102, 15, 30),
        ];
        let conflicts = find_conflicts(&list);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].first, list[0].id());
        assert_eq!(conflicts[0].second, list[1].id());
        assert_eq!(conflicts[0].kinds, vec![ConflictKind::Doctor]);
        assert_eq!(conflicts[1].first, list[2].id());
        assert_eq!(conflicts[1].second, list[3].id());
        assert_eq!(
            conflicts[1].kinds,
            vec![ConflictKind::Patient, ConflictKind::Room]
        );
    }

    #[test]
    fn conflict_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ConflictKind::Doctor).unwrap(),
            serde_json::json!("doctor")
        );
    }
}
