//! Typed access to the notification metadata object.
//!
//! Metadata is an open JSON object whose keys vary by notification type.
//! All key probing lives here, behind documented accessors, so channel
//! payload builders never reach into raw JSON themselves.
//!
//! Documented keys per type:
//! - transaction-linked `system_notification`: `transactionType`,
//!   `amount`, `balance`, `status`, `timestamp`
//! - `reminder`: `reminderType`, `itemTitle`
//! - events/bookings: `eventType`, `eventName`, `eventDate`, `bookingId`,
//!   `startTime`, `endTime`, `location`, `service`, `requester`,
//!   `description`, `duration`, and optionally a nested `metadata` object
//!   holding the booking details
//! - connection requests: `connectionType`, `connectionReason`, `source`
//! - factory-written display data: badge and milestone fields

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wrapper over the metadata JSON object with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationMetadata(Map<String, Value>);

impl NotificationMetadata {
    /// Create an empty metadata object.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap an existing JSON object. Non-object values yield an empty map.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Whether no keys are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw access to one key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set one key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// The underlying JSON object.
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    fn str_key(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Numbers may arrive as JSON numbers or numeric strings depending on
    /// which client wrote the record; coerce both.
    fn num_key(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// `transactionType`, e.g. `BUY_PTS` or `SELL_PTS`.
    pub fn transaction_type(&self) -> Option<&str> {
        self.str_key("transactionType")
    }

    /// Transaction amount; 0 when absent.
    pub fn amount(&self) -> f64 {
        self.num_key("amount").unwrap_or(0.0)
    }

    /// Resulting balance; 0 when absent.
    pub fn balance(&self) -> f64 {
        self.num_key("balance").unwrap_or(0.0)
    }

    /// Transaction status; `"Unknown"` when absent.
    pub fn status(&self) -> &str {
        self.str_key("status").unwrap_or("Unknown")
    }

    /// `reminderType` for reminder notifications.
    pub fn reminder_type(&self) -> Option<&str> {
        self.str_key("reminderType")
    }

    /// Title of the reminded-about item.
    pub fn item_title(&self) -> Option<&str> {
        self.str_key("itemTitle")
    }

    /// `eventType` marker (`"booking"` distinguishes bookings from plain
    /// events; clients have written both cases).
    pub fn event_type(&self) -> Option<&str> {
        self.str_key("eventType")
    }

    /// Whether the event-type marker identifies a booking.
    pub fn is_booking_event(&self) -> bool {
        self.event_type()
            .is_some_and(|t| t.eq_ignore_ascii_case("booking"))
    }

    /// Whether any connection-request marker key is present.
    pub fn has_connection_markers(&self) -> bool {
        ["connectionType", "connectionReason", "source"]
            .iter()
            .any(|k| self.0.contains_key(*k))
    }

    /// Whether any event/booking marker key is present.
    pub fn has_event_markers(&self) -> bool {
        ["eventType", "eventName", "eventDate", "bookingId"]
            .iter()
            .any(|k| self.0.contains_key(*k))
    }

    /// The booking detail object: some writers nest it under a `metadata`
    /// key, others write the fields at the top level.
    pub fn booking_data(&self) -> NotificationMetadata {
        match self.0.get("metadata") {
            Some(Value::Object(inner)) => Self(inner.clone()),
            _ => self.clone(),
        }
    }

    /// Booking/event start time, as written by the client.
    pub fn start_time(&self) -> Option<&str> {
        self.str_key("startTime")
    }

    /// Booking/event end time, as written by the client.
    pub fn end_time(&self) -> Option<&str> {
        self.str_key("endTime")
    }

    /// Booking description.
    pub fn description(&self) -> Option<&str> {
        self.str_key("description")
    }

    /// Booked service name, from the nested `service` object or the
    /// flat `itemTitle` fallback.
    pub fn service_name(&self) -> Option<&str> {
        self.0
            .get("service")
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
            .or_else(|| self.item_title())
    }

    /// Booking duration, from the service object or the flat key.
    pub fn duration(&self) -> Option<f64> {
        self.0
            .get("service")
            .and_then(|s| s.get("duration"))
            .and_then(Value::as_f64)
            .or_else(|| self.num_key("duration"))
    }

    /// Name of whoever requested the booking.
    pub fn requester_name(&self) -> Option<&str> {
        self.0
            .get("requester")
            .and_then(|r| r.get("name"))
            .and_then(Value::as_str)
    }

    /// Booking status, without the transaction default.
    pub fn booking_status(&self) -> Option<&str> {
        self.str_key("status")
    }

    /// Resolve the location to one display string. Locations are written
    /// either as a plain string or as `{ name, address }`.
    pub fn location_string(&self) -> Option<String> {
        match self.0.get("location")? {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => {
                let parts: Vec<&str> = ["name", "address"]
                    .iter()
                    .filter_map(|k| obj.get(*k).and_then(Value::as_str))
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            _ => None,
        }
    }

    /// Stamp a `timestamp` key if none is present (emails display it).
    pub fn ensure_timestamp(&mut self, now: chrono::DateTime<chrono::Utc>) {
        if !self.0.contains_key("timestamp") {
            self.0
                .insert("timestamp".to_string(), Value::String(now.to_rfc3339()));
        }
    }
}

impl From<Value> for NotificationMetadata {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_coerces_strings_and_numbers() {
        let m = NotificationMetadata::from_value(json!({"amount": 50}));
        assert_eq!(m.amount(), 50.0);
        let m = NotificationMetadata::from_value(json!({"amount": "12.5"}));
        assert_eq!(m.amount(), 12.5);
        let m = NotificationMetadata::new();
        assert_eq!(m.amount(), 0.0);
    }

    #[test]
    fn test_location_string_forms() {
        let m = NotificationMetadata::from_value(json!({"location": "Room 4"}));
        assert_eq!(m.location_string().as_deref(), Some("Room 4"));

        let m = NotificationMetadata::from_value(
            json!({"location": {"name": "HQ", "address": "1 Main St"}}),
        );
        assert_eq!(m.location_string().as_deref(), Some("HQ, 1 Main St"));

        let m = NotificationMetadata::from_value(json!({"location": {}}));
        assert_eq!(m.location_string(), None);
    }

    #[test]
    fn test_booking_data_prefers_nested_object() {
        let m = NotificationMetadata::from_value(
            json!({"metadata": {"startTime": "2025-06-01T10:00:00Z"}, "startTime": "ignored"}),
        );
        assert_eq!(
            m.booking_data().start_time(),
            Some("2025-06-01T10:00:00Z")
        );

        let m = NotificationMetadata::from_value(json!({"startTime": "2025-06-01T10:00:00Z"}));
        assert_eq!(
            m.booking_data().start_time(),
            Some("2025-06-01T10:00:00Z")
        );
    }

    #[test]
    fn test_connection_markers() {
        let m = NotificationMetadata::from_value(json!({"source": "qr-scan"}));
        assert!(m.has_connection_markers());
        let m = NotificationMetadata::from_value(json!({"eventName": "Standup"}));
        assert!(!m.has_connection_markers());
        assert!(m.has_event_markers());
    }
}
