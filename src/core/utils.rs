use chrono::{DateTime, Utc};

pub fn timestamp_to_string(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(val) => val.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

/// value of the optional `user_id` query filter
pub fn parse_optional_uuid(value: Option<String>) -> Result<Option<uuid::Uuid>, uuid::Error> {
    match value {
        Some(val) if !val.is_empty() => uuid::Uuid::parse_str(&val).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_string() {
        assert_eq!(timestamp_to_string(0), "1970-01-01 00:00:00");
        assert_eq!(timestamp_to_string(1_700_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_parse_optional_uuid() {
        assert_eq!(parse_optional_uuid(None).unwrap(), None);
        assert_eq!(parse_optional_uuid(Some("".to_string())).unwrap(), None);
        let id = uuid::Uuid::now_v7();
        assert_eq!(parse_optional_uuid(Some(id.to_string())).unwrap(), Some(id));
        assert!(parse_optional_uuid(Some("12".to_string())).is_err());
    }
}
