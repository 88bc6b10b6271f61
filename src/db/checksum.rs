//! Checksum calculation for commit-batch deduplication.

use sha2::{Digest, Sha256};

use super::repository::AssignmentRecord;

/// Calculate SHA-256 checksum of serialized content.
///
/// # Arguments
/// * `content` - JSON string content of the batch
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Checksum of a commit batch, used to skip re-submitting an unchanged week.
pub fn batch_checksum(batch: &[AssignmentRecord]) -> String {
    let json = serde_json::to_string(batch).unwrap_or_default();
    calculate_checksum(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::TimeWindow;

    fn record(room: &str) -> AssignmentRecord {
        AssignmentRecord {
            id: None,
            room_id: room.to_string(),
            department_id: 1,
            exam_type_id: None,
            specialty_id: None,
            doctor_code: None,
            day_of_week: 1,
            window: TimeWindow::parse("08:00", "12:00").unwrap(),
            capacity: 5,
            hold_count: 1,
            duration_minutes: 20,
            notes: String::new(),
            week: 10,
            year: 2025,
            zone_name: None,
        }
    }

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"test": "data"}"#;
        let checksum1 = calculate_checksum(content);
        let checksum2 = calculate_checksum(content);
        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_different_content_different_checksum() {
        let content1 = r#"{"test": "data1"}"#;
        let content2 = r#"{"test": "data2"}"#;
        assert_ne!(calculate_checksum(content1), calculate_checksum(content2));
    }

    #[test]
    fn test_batch_checksum_tracks_content() {
        let a = vec![record("R1")];
        let b = vec![record("R2")];
        assert_eq!(batch_checksum(&a), batch_checksum(&a.clone()));
        assert_ne!(batch_checksum(&a), batch_checksum(&b));
    }
}
