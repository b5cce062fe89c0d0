//! Built-in HTML templates for notification emails.
//!
//! Templates are addressed by name so the render step can fail
//! independently of the send step; the dispatcher falls back to a
//! minimal email when it does.

use serde_json::Value;

use peerhub_core::error::AppError;
use peerhub_core::result::AppResult;

/// Render a named template against its data object.
pub fn render(name: &str, data: &Value) -> AppResult<String> {
    let body = match name {
        "notification-email" => notification_email(data),
        "connection-request" => connection_request(data),
        "event-notification" => event_notification(data),
        "task-reminder" => reminder(data, "You have a task coming up:"),
        "general-reminder" => reminder(data, "Here is your reminder:"),
        "purchase-confirmation-email" => transaction(data, "Purchase Confirmation"),
        "sale-confirmation-email" => transaction(data, "Sale Confirmation"),
        "transaction-notification" => transaction(data, "Transaction Update"),
        "security-alert-email" => security_alert(data),
        other => {
            return Err(AppError::not_found(format!("Unknown email template '{other}'")));
        }
    };

    Ok(layout(&body, data))
}

fn text<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

fn layout(body: &str, data: &Value) -> String {
    let app_name = text(data, "appName");
    let year = data.get("year").and_then(Value::as_i64).unwrap_or(0);
    format!(
        "<!DOCTYPE html>\
         <html><body style=\"font-family:Arial,sans-serif;color:#1f2430;\">\
         <div style=\"max-width:600px;margin:0 auto;padding:24px;\">{body}\
         <hr style=\"border:none;border-top:1px solid #e3e6ec;margin-top:32px;\">\
         <p style=\"font-size:12px;color:#8a90a0;\">&copy; {year} {app_name}</p>\
         </div></body></html>"
    )
}

fn action_button(data: &Value) -> String {
    let url = text(data, "actionUrl");
    if url.is_empty() {
        return String::new();
    }
    let label = match text(data, "actionText") {
        "" => "View",
        label => label,
    };
    format!(
        "<p><a href=\"{url}\" style=\"display:inline-block;padding:10px 20px;\
         background:#2f6fed;color:#ffffff;text-decoration:none;border-radius:4px;\">\
         {label}</a></p>"
    )
}

fn notification_email(data: &Value) -> String {
    format!(
        "<h2>{}</h2><p>{}</p>{}",
        text(data, "title"),
        text(data, "message"),
        action_button(data)
    )
}

fn connection_request(data: &Value) -> String {
    format!(
        "<h2>New Connection Request</h2>\
         <p>Hello {},</p>\
         <p>{}</p>{}",
        text(data, "recipientName"),
        text(data, "message"),
        action_button(data)
    )
}

fn event_notification(data: &Value) -> String {
    let event = data.get("event").cloned().unwrap_or(Value::Null);
    let field = |key: &str| {
        event
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    let mut rows = String::new();
    for (label, key) in [
        ("When", "startTime"),
        ("Until", "endTime"),
        ("Where", "location"),
        ("Organizer", "organizer"),
        ("Status", "status"),
    ] {
        let value = field(key);
        if !value.is_empty() {
            rows.push_str(&format!(
                "<tr><td style=\"padding:4px 12px 4px 0;color:#8a90a0;\">{label}</td>\
                 <td style=\"padding:4px 0;\">{value}</td></tr>"
            ));
        }
    }

    let greeting = match text(data, "greeting") {
        "" => String::new(),
        g => format!("<p>{g}</p>"),
    };
    let description = match text(data, "description") {
        "" => text(data, "message").to_string(),
        d => d.to_string(),
    };

    format!(
        "<h2>{} {}</h2>{greeting}<p>{description}</p>\
         <table style=\"border-collapse:collapse;\">{rows}</table>{}",
        field("icon"),
        match field("name").as_str() {
            "" => text(data, "title").to_string(),
            name => name.to_string(),
        },
        action_button(data)
    )
}

fn reminder(data: &Value, lead: &str) -> String {
    let item = data
        .get("metadata")
        .and_then(|m| m.get("itemTitle"))
        .and_then(Value::as_str)
        .unwrap_or_else(|| text(data, "title"));
    format!(
        "<h2>Reminder</h2><p>{lead}</p><p><strong>{item}</strong></p><p>{}</p>{}",
        text(data, "message"),
        action_button(data)
    )
}

fn transaction(data: &Value, heading: &str) -> String {
    let meta = data.get("metadata").cloned().unwrap_or(Value::Null);
    let meta_text = |key: &str| {
        meta.get(key)
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    };

    let mut rows = String::new();
    for (label, key) in [
        ("Type", "transactionType"),
        ("Amount", "amount"),
        ("Balance", "balance"),
        ("Status", "status"),
        ("Time", "timestamp"),
    ] {
        let value = meta_text(key);
        if !value.is_empty() {
            rows.push_str(&format!(
                "<tr><td style=\"padding:4px 12px 4px 0;color:#8a90a0;\">{label}</td>\
                 <td style=\"padding:4px 0;\">{value}</td></tr>"
            ));
        }
    }

    format!(
        "<h2>{heading}</h2><p>{}</p>\
         <table style=\"border-collapse:collapse;\">{rows}</table>{}",
        text(data, "message"),
        action_button(data)
    )
}

fn security_alert(data: &Value) -> String {
    let timestamp = data
        .get("metadata")
        .and_then(|m| m.get("timestamp"))
        .and_then(Value::as_str)
        .unwrap_or("");
    format!(
        "<h2 style=\"color:#c43d3d;\">Security Alert</h2>\
         <p>{}</p>\
         <p style=\"color:#8a90a0;\">Detected at {timestamp}</p>\
         <p>If this wasn't you, secure your account immediately.</p>{}",
        text(data, "message"),
        action_button(data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_data() -> Value {
        json!({
            "title": "New Profile View",
            "message": "Someone viewed your profile",
            "actionUrl": "https://app.peerhub.io/views",
            "actionText": "See who",
            "appName": "PeerHub",
            "year": 2025,
            "recipientName": "Ada",
            "metadata": {},
        })
    }

    #[test]
    fn test_notification_email_renders_message_and_action() {
        let html = render("notification-email", &base_data()).unwrap();
        assert!(html.contains("Someone viewed your profile"));
        assert!(html.contains("https://app.peerhub.io/views"));
        assert!(html.contains("See who"));
        assert!(html.contains("PeerHub"));
    }

    #[test]
    fn test_transaction_template_renders_rows() {
        let mut data = base_data();
        data["metadata"] = json!({
            "transactionType": "BUY_PTS",
            "amount": 50,
            "status": "COMPLETED",
        });
        let html = render("purchase-confirmation-email", &data).unwrap();
        assert!(html.contains("Purchase Confirmation"));
        assert!(html.contains("BUY_PTS"));
        assert!(html.contains("50"));
    }

    #[test]
    fn test_event_template_uses_event_object() {
        let mut data = base_data();
        data["event"] = json!({
            "name": "Recording",
            "icon": "📋",
            "startTime": "Sunday, June 1, 2025, 10:00 AM",
            "location": "Studio B",
            "status": "pending",
        });
        data["greeting"] = json!("Hello Ada,");
        let html = render("event-notification", &data).unwrap();
        assert!(html.contains("Recording"));
        assert!(html.contains("Studio B"));
        assert!(html.contains("Hello Ada,"));
    }

    #[test]
    fn test_unknown_template_errors() {
        assert!(render("no-such-template", &base_data()).is_err());
    }
}
