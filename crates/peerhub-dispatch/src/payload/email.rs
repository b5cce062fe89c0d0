//! Email template selection and data construction.
//!
//! Template choice is a single priority-ordered `select` returning a
//! strategy value; each strategy owns its subject line and data object.
//! Adding a template means adding a variant, not threading a new branch
//! through the dispatcher.

use chrono::{DateTime, Datelike, Utc};
use serde_json::{Value, json};

use peerhub_entity::notification::{Notification, NotificationType, RelatedModel};

/// Product-level context threaded into subjects and template data.
#[derive(Debug, Clone, Copy)]
pub struct EmailContext<'a> {
    /// Product display name.
    pub app_name: &'a str,
    /// Web client base URL.
    pub base_url: &'a str,
}

/// The email template to render for one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Connection request (identified by metadata markers).
    ConnectionRequest,
    /// New booking request.
    BookingRequest,
    /// Generic event/booking announcement (metadata markers).
    Event,
    /// Task reminder.
    TaskReminder,
    /// Event reminder.
    EventReminder,
    /// Booking reminder.
    BookingReminder,
    /// Fallback reminder for anything else.
    GeneralReminder,
    /// Purchase confirmation.
    PurchaseConfirmation,
    /// Sale confirmation.
    SaleConfirmation,
    /// Other transaction notifications.
    Transaction,
    /// Security alert.
    SecurityAlert,
    /// Plain notification email.
    Generic,
}

/// Transaction type written by the purchase flow.
const TX_PURCHASE: &str = "BUY_PTS";
/// Transaction type written by the sale flow.
const TX_SALE: &str = "SELL_PTS";

impl EmailTemplate {
    /// The renderer's template name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectionRequest => "connection-request",
            Self::BookingRequest | Self::Event | Self::EventReminder | Self::BookingReminder => {
                "event-notification"
            }
            Self::TaskReminder => "task-reminder",
            Self::GeneralReminder => "general-reminder",
            Self::PurchaseConfirmation => "purchase-confirmation-email",
            Self::SaleConfirmation => "sale-confirmation-email",
            Self::Transaction => "transaction-notification",
            Self::SecurityAlert => "security-alert-email",
            Self::Generic => "notification-email",
        }
    }

    /// The subject line for this notification.
    pub fn subject(&self, notification: &Notification, ctx: EmailContext<'_>) -> String {
        let item = notification
            .metadata
            .item_title()
            .unwrap_or(&notification.title);
        match self {
            Self::ConnectionRequest => {
                format!("New Connection Request - {}", notification.title)
            }
            Self::BookingRequest => format!("New Booking Request - {}", notification.title),
            Self::Event => {
                if notification.metadata.is_booking_event() {
                    format!("Booking Notification - {}", notification.title)
                } else {
                    format!("Event Notification - {}", notification.title)
                }
            }
            Self::TaskReminder => format!("Task Reminder: {item}"),
            Self::EventReminder => format!("Event Reminder: {item}"),
            Self::BookingReminder => format!("Booking Reminder: {item}"),
            Self::GeneralReminder => format!("Reminder: {item}"),
            Self::PurchaseConfirmation => format!("Purchase Confirmation - {}", ctx.app_name),
            Self::SaleConfirmation => format!("Sale Confirmation - {}", ctx.app_name),
            Self::Transaction | Self::SecurityAlert | Self::Generic => {
                notification.title.clone()
            }
        }
    }
}

/// Pick the template for a notification, in priority order: connection
/// requests (marker keys or the connection-request kinds), then booking
/// requests, then event markers, then reminders (split by related
/// entity), then transactions (split by type), then security alerts,
/// then the generic template.
pub fn select(notification: &Notification) -> EmailTemplate {
    let meta = &notification.metadata;

    if meta.has_connection_markers()
        || matches!(
            notification.kind,
            NotificationType::ConnectionRequest | NotificationType::ProfileConnectionRequest
        )
    {
        return EmailTemplate::ConnectionRequest;
    }
    if notification.kind == NotificationType::BookingRequest {
        return EmailTemplate::BookingRequest;
    }
    if meta.has_event_markers() {
        return EmailTemplate::Event;
    }
    if notification.kind == NotificationType::Reminder {
        let related = notification.related_to.as_ref().map(|r| r.model);
        return match related {
            Some(RelatedModel::Task) => EmailTemplate::TaskReminder,
            Some(RelatedModel::Event) => {
                if meta.is_booking_event() {
                    EmailTemplate::BookingReminder
                } else {
                    EmailTemplate::EventReminder
                }
            }
            Some(RelatedModel::Booking) => EmailTemplate::BookingReminder,
            _ => EmailTemplate::GeneralReminder,
        };
    }
    if notification.transaction_ref().is_some() {
        return match meta.transaction_type() {
            Some(TX_PURCHASE) => EmailTemplate::PurchaseConfirmation,
            Some(TX_SALE) => EmailTemplate::SaleConfirmation,
            _ => EmailTemplate::Transaction,
        };
    }
    if notification.kind == NotificationType::SecurityAlert {
        return EmailTemplate::SecurityAlert;
    }

    EmailTemplate::Generic
}

/// Build the data object handed to the template renderer.
pub fn template_data(
    template: EmailTemplate,
    notification: &Notification,
    recipient_name: &str,
    ctx: EmailContext<'_>,
) -> Value {
    let action_url = notification
        .action
        .as_ref()
        .map(|a| a.url.as_str())
        .unwrap_or("");
    let action_text = notification
        .action
        .as_ref()
        .map(|a| a.text.as_str())
        .unwrap_or("");

    let mut data = json!({
        "title": notification.title,
        "message": notification.message,
        "actionUrl": action_url,
        "actionText": action_text,
        "metadata": notification.metadata.as_value(),
        "appName": ctx.app_name,
        "baseUrl": ctx.base_url,
        "year": Utc::now().year(),
        "recipientName": recipient_name,
    });

    match template {
        EmailTemplate::BookingRequest => {
            let booking = notification.metadata.booking_data();
            data["event"] = json!({
                "name": booking.service_name().unwrap_or("Service Booking"),
                "type": "BOOKING",
                "icon": "📋",
                "startTime": booking.start_time().map(format_datetime),
                "endTime": booking.end_time().map(format_datetime),
                "location": booking.location_string(),
                "organizer": booking.requester_name(),
                "duration": booking.duration(),
                "description": booking.description(),
                "status": booking.booking_status().unwrap_or("pending"),
            });
            data["greeting"] = json!(format!("Hello {recipient_name},"));
            data["description"] =
                json!("You have received a new booking request. Here are the details:");
            data["actions"] = json!([{
                "text": if action_text.is_empty() { "View Booking" } else { action_text },
                "url": if action_url.is_empty() { "#" } else { action_url },
                "secondary": false,
            }]);
        }
        EmailTemplate::PurchaseConfirmation
        | EmailTemplate::SaleConfirmation
        | EmailTemplate::Transaction => {
            if let Some(tx) = notification.transaction_ref() {
                data["transactionId"] = json!(tx.to_string());
            }
            let mut meta = notification.metadata.clone();
            meta.ensure_timestamp(Utc::now());
            data["metadata"] = meta.as_value();
        }
        EmailTemplate::SecurityAlert => {
            let mut meta = notification.metadata.clone();
            meta.ensure_timestamp(Utc::now());
            data["metadata"] = meta.as_value();
        }
        _ => {}
    }

    data
}

/// Minimal HTML sent when template rendering fails: the message plus the
/// action link, nothing that can itself fail.
pub fn fallback_html(notification: &Notification) -> String {
    let mut html = format!("<p>{}</p>", notification.message);
    if let Some(action) = &notification.action {
        html.push_str(&format!(
            "<p><a href=\"{}\">{}</a></p>",
            action.url, action.text
        ));
    }
    html
}

/// Format a client-written timestamp for display, long form. Returns the
/// input unchanged when it is not a parseable RFC 3339 timestamp.
fn format_datetime(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.format("%A, %B %-d, %Y, %I:%M %p").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerhub_entity::notification::{NewNotification, NotificationMetadata, RelatedModel};
    use serde_json::json;
    use uuid::Uuid;

    const CTX: EmailContext<'static> = EmailContext {
        app_name: "PeerHub",
        base_url: "https://app.peerhub.io",
    };

    fn notification(new: NewNotification) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            recipient: new.recipient,
            sender: new.sender,
            kind: new.kind,
            title: new.title,
            message: new.message,
            related_to: new.related_to,
            action: new.action,
            priority: new.priority,
            is_read: false,
            is_archived: false,
            metadata: new.metadata,
            expires_at: new.expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_connection_markers_win_over_everything() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::BookingRequest)
                .metadata(NotificationMetadata::from_value(
                    json!({"connectionReason": "met at expo", "eventName": "Expo"}),
                )),
        );
        assert_eq!(select(&n), EmailTemplate::ConnectionRequest);
    }

    #[test]
    fn test_connection_request_subject() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::ConnectionRequest)
                .title("Jane Doe")
                .metadata(NotificationMetadata::from_value(
                    json!({"connectionType": "colleague"}),
                )),
        );
        let template = select(&n);
        assert_eq!(template.name(), "connection-request");
        assert_eq!(
            template.subject(&n, CTX),
            "New Connection Request - Jane Doe"
        );
    }

    #[test]
    fn test_connection_request_kind_selects_template_without_markers() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::ConnectionRequest)
                .title("Jane Doe")
                .action("View Request", "/connections/requests/123"),
        );
        assert_eq!(select(&n), EmailTemplate::ConnectionRequest);
    }

    #[test]
    fn test_reminder_branches_on_related_model() {
        let base = |model| {
            notification(
                NewNotification::new(Uuid::new_v4(), NotificationType::Reminder)
                    .title("fallback")
                    .related(model, Uuid::new_v4())
                    .metadata(NotificationMetadata::from_value(
                        json!({"itemTitle": "Quarterly review", "reminderType": "due"}),
                    )),
            )
        };

        let task = base(RelatedModel::Task);
        assert_eq!(select(&task), EmailTemplate::TaskReminder);
        assert_eq!(
            select(&task).subject(&task, CTX),
            "Task Reminder: Quarterly review"
        );

        let event = base(RelatedModel::Event);
        assert_eq!(select(&event), EmailTemplate::EventReminder);

        let booking = base(RelatedModel::Booking);
        assert_eq!(select(&booking), EmailTemplate::BookingReminder);
        assert_eq!(select(&booking).name(), "event-notification");

        let other = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::Reminder)
                .title("Water the plants"),
        );
        assert_eq!(select(&other), EmailTemplate::GeneralReminder);
        assert_eq!(
            select(&other).subject(&other, CTX),
            "Reminder: Water the plants"
        );
    }

    #[test]
    fn test_booking_event_reminder_uses_booking_subject() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::Reminder)
                .related(RelatedModel::Event, Uuid::new_v4())
                .metadata(NotificationMetadata::from_value(
                    // eventType would also match the event-marker branch,
                    // but reminders only reach it when no marker matched;
                    // exercise the related-model path via reminderType.
                    json!({"itemTitle": "Haircut", "reminderType": "upcoming"}),
                )),
        );
        assert_eq!(select(&n), EmailTemplate::EventReminder);
    }

    #[test]
    fn test_transaction_split_by_type() {
        let tx = |tx_type: &str| {
            notification(
                NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                    .related(RelatedModel::Transaction, Uuid::new_v4())
                    .metadata(NotificationMetadata::from_value(
                        json!({"transactionType": tx_type}),
                    )),
            )
        };

        let buy = tx(TX_PURCHASE);
        assert_eq!(select(&buy), EmailTemplate::PurchaseConfirmation);
        assert_eq!(
            select(&buy).subject(&buy, CTX),
            "Purchase Confirmation - PeerHub"
        );

        assert_eq!(select(&tx(TX_SALE)), EmailTemplate::SaleConfirmation);
        assert_eq!(select(&tx("TRANSFER")), EmailTemplate::Transaction);
    }

    #[test]
    fn test_security_alert_and_generic() {
        let alert = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SecurityAlert)
                .title("New login"),
        );
        assert_eq!(select(&alert), EmailTemplate::SecurityAlert);
        assert_eq!(select(&alert).subject(&alert, CTX), "New login");

        let plain = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::ProfileView)
                .title("New Profile View"),
        );
        assert_eq!(select(&plain), EmailTemplate::Generic);
        assert_eq!(select(&plain).name(), "notification-email");
    }

    #[test]
    fn test_booking_request_template_data() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::BookingRequest)
                .title("Studio session")
                .message("A new booking request")
                .action("Review", "/bookings/42")
                .metadata(NotificationMetadata::from_value(json!({
                    "metadata": {
                        "service": {"name": "Recording", "duration": 90},
                        "startTime": "2025-06-01T10:00:00Z",
                        "location": {"name": "Studio B"},
                        "requester": {"name": "Sam"},
                        "status": "pending",
                    }
                }))),
        );

        let data = template_data(EmailTemplate::BookingRequest, &n, "Ada", CTX);
        assert_eq!(data["event"]["name"], "Recording");
        assert_eq!(data["event"]["organizer"], "Sam");
        assert_eq!(data["event"]["location"], "Studio B");
        assert_eq!(data["event"]["startTime"], "Sunday, June 1, 2025, 10:00 AM");
        assert_eq!(data["greeting"], "Hello Ada,");
        assert_eq!(data["actions"][0]["text"], "Review");
        assert_eq!(data["actions"][0]["url"], "/bookings/42");
    }

    #[test]
    fn test_transaction_data_gains_timestamp() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                .related(RelatedModel::Transaction, Uuid::new_v4())
                .metadata(NotificationMetadata::from_value(
                    json!({"transactionType": "BUY_PTS", "amount": 50}),
                )),
        );
        let data = template_data(EmailTemplate::PurchaseConfirmation, &n, "Ada", CTX);
        assert!(data["transactionId"].is_string());
        assert!(data["metadata"]["timestamp"].is_string());
    }

    #[test]
    fn test_fallback_html_contains_message_and_action() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::ConnectionRequest)
                .message("Jane wants to connect")
                .action("View Request", "/connections/requests/123"),
        );
        let html = fallback_html(&n);
        assert!(html.contains("<p>Jane wants to connect</p>"));
        assert!(html.contains("href=\"/connections/requests/123\""));

        let bare = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::ProfileView)
                .message("Someone viewed your profile"),
        );
        assert_eq!(fallback_html(&bare), "<p>Someone viewed your profile</p>");
    }

    #[test]
    fn test_format_datetime_passthrough_on_garbage() {
        assert_eq!(format_datetime("not-a-date"), "not-a-date");
    }
}
