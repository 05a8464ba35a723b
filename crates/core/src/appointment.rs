//! A single scheduled slot inside a [`Schedule`](crate::schedule::Schedule).
//!
//! Patients, doctors and rooms are referenced by id only. The conflict flag
//! is derived state owned by the schedule; callers can read it but never set
//! it.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_db_id, CoreError};
use crate::time_range::TimeRange;
use crate::types::{DbId, EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: EntityId,
    appointment_type_id: Option<DbId>,
    title: String,
    patient_id: DbId,
    doctor_id: DbId,
    room_id: DbId,
    time_range: TimeRange,
    date_time_confirmed: Option<Timestamp>,
    #[serde(default)]
    is_potentially_conflicting: bool,
}

impl Appointment {
    /// Create an unconfirmed, non-conflicting appointment.
    ///
    /// The id is checked when the appointment is added to a schedule.
    pub fn new(
        id: EntityId,
        patient_id: DbId,
        doctor_id: DbId,
        room_id: DbId,
        time_range: TimeRange,
    ) -> Self {
        Self {
            id,
            appointment_type_id: None,
            title: String::new(),
            patient_id,
            doctor_id,
            room_id,
            time_range,
            date_time_confirmed: None,
            is_potentially_conflicting: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_appointment_type(mut self, appointment_type_id: DbId) -> Self {
        self.appointment_type_id = Some(appointment_type_id);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn appointment_type_id(&self) -> Option<DbId> {
        self.appointment_type_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn patient_id(&self) -> DbId {
        self.patient_id
    }

    pub fn doctor_id(&self) -> DbId {
        self.doctor_id
    }

    pub fn room_id(&self) -> DbId {
        self.room_id
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    pub fn date_time_confirmed(&self) -> Option<Timestamp> {
        self.date_time_confirmed
    }

    pub fn is_confirmed(&self) -> bool {
        self.date_time_confirmed.is_some()
    }

    /// Whether the last conflict pass found a patient, doctor or room clash.
    pub fn is_potentially_conflicting(&self) -> bool {
        self.is_potentially_conflicting
    }

    pub(crate) fn set_potentially_conflicting(&mut self, value: bool) {
        self.is_potentially_conflicting = value;
    }

    // -----------------------------------------------------------------------
    // In-place updates
    //
    // None of these re-run conflict marking. Use them through
    // `Schedule::update_appointment`, or call
    // `Schedule::appointment_updated_handler` afterwards.
    // -----------------------------------------------------------------------

    pub fn update_room(&mut self, room_id: DbId) -> Result<(), CoreError> {
        self.room_id = ensure_db_id(room_id, "room_id")?;
        Ok(())
    }

    pub fn update_doctor(&mut self, doctor_id: DbId) -> Result<(), CoreError> {
        self.doctor_id = ensure_db_id(doctor_id, "doctor_id")?;
        Ok(())
    }

    pub fn update_time_range(&mut self, time_range: TimeRange) {
        self.time_range = time_range;
    }

    pub fn update_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Record when the patient confirmed the appointment.
    pub fn confirm(&mut self, at: Timestamp) {
        self.date_time_confirmed = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> Appointment {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        Appointment::new(
            Uuid::now_v7(),
            1,
            2,
            3,
            TimeRange::from_duration(start, 30).unwrap(),
        )
    }

    #[test]
    fn new_appointment_is_unconfirmed_and_not_conflicting() {
        let appt = sample();
        assert!(!appt.is_potentially_conflicting());
        assert!(!appt.is_confirmed());
        assert_eq!(appt.title(), "");
        assert_eq!(appt.appointment_type_id(), None);
    }

    #[test]
    fn builder_sets_optional_fields() {
        let appt = sample().with_title("Annual checkup").with_appointment_type(4);
        assert_eq!(appt.title(), "Annual checkup");
        assert_eq!(appt.appointment_type_id(), Some(4));
    }

    #[test]
    fn update_room_and_doctor_validate_ids() {
        let mut appt = sample();
        appt.update_room(9).unwrap();
        appt.update_doctor(8).unwrap();
        assert_eq!(appt.room_id(), 9);
        assert_eq!(appt.doctor_id(), 8);

        assert_matches!(
            appt.update_room(0),
            Err(CoreError::InvalidIdentifier { name: "room_id" })
        );
        assert_matches!(
            appt.update_doctor(-1),
            Err(CoreError::InvalidIdentifier { name: "doctor_id" })
        );
        assert_eq!(appt.room_id(), 9);
        assert_eq!(appt.doctor_id(), 8);
    }

    #[test]
    fn confirm_records_timestamp() {
        let mut appt = sample();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        appt.confirm(at);
        assert!(appt.is_confirmed());
        assert_eq!(appt.date_time_confirmed(), Some(at));
    }

    #[test]
    fn missing_flag_deserializes_as_false() {
        let appt = sample();
        let mut json = serde_json::to_value(&appt).unwrap();
        json.as_object_mut()
            .unwrap()
            .remove("is_potentially_conflicting");
        let back: Appointment = serde_json::from_value(json).unwrap();
        assert!(!back.is_potentially_conflicting());
        assert_eq!(back.id(), appt.id());
    }
}
