//! Domain records for the Brew Transfer toolkit

mod bean;
mod method;
mod note;

pub use bean::*;
pub use method::*;
pub use note::*;

use chrono::Utc;
use uuid::Uuid;

/// Generate a fresh record identifier of the form
/// `<prefix>-<unix millis>-<random suffix>`.
///
/// Imported records always get a fresh identifier so they can never
/// collide with records already stored on the receiving device.
pub fn new_record_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        &suffix[..6]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_id_shape() {
        let id = new_record_id("method");
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "method");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
    }

    #[test]
    fn test_new_record_id_unique() {
        assert_ne!(new_record_id("bean"), new_record_id("bean"));
    }
}
