use crate::types::{DbId, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Invalid identifier: `{name}` must not be a default value")]
    InvalidIdentifier { name: &'static str },

    #[error("Duplicate appointment: an appointment with id {id} is already scheduled")]
    DuplicateAppointment { id: EntityId },
}

/// Reject the nil uuid.
pub fn ensure_entity_id(id: EntityId, name: &'static str) -> Result<EntityId, CoreError> {
    if id.is_nil() {
        Err(CoreError::InvalidIdentifier { name })
    } else {
        Ok(id)
    }
}

/// Reject zero and negative integer keys.
pub fn ensure_db_id(id: DbId, name: &'static str) -> Result<DbId, CoreError> {
    if id <= 0 {
        Err(CoreError::InvalidIdentifier { name })
    } else {
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[test]
    fn nil_uuid_is_rejected() {
        assert_matches!(
            ensure_entity_id(Uuid::nil(), "id"),
            Err(CoreError::InvalidIdentifier { name: "id" })
        );
    }

    #[test]
    fn real_uuid_is_accepted() {
        let id = Uuid::now_v7();
        assert_eq!(ensure_entity_id(id, "id"), Ok(id));
    }

    #[test]
    fn non_positive_db_ids_are_rejected() {
        assert!(ensure_db_id(0, "clinic_id").is_err());
        assert!(ensure_db_id(-3, "clinic_id").is_err());
        assert_eq!(ensure_db_id(7, "clinic_id"), Ok(7));
    }

    #[test]
    fn messages_name_the_offending_field() {
        let msg = ensure_db_id(0, "room_id").unwrap_err().to_string();
        assert!(msg.contains("room_id"));
    }
}
