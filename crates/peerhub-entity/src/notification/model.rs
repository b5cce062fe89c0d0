//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::NotificationType;
use super::metadata::NotificationMetadata;
use super::priority::NotificationPriority;

/// A notification to be delivered to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user. Always present.
    pub recipient: Uuid,
    /// The user who triggered it, when one did.
    pub sender: Option<Uuid>,
    /// Notification category.
    pub kind: NotificationType,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// The domain object this notification concerns.
    pub related_to: Option<RelatedEntity>,
    /// A single call-to-action surfaced to the user.
    pub action: Option<NotificationAction>,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// Whether the user archived this notification.
    pub is_archived: bool,
    /// Auxiliary structured data; keys vary by `kind`.
    pub metadata: NotificationMetadata,
    /// Hard deletion deadline enforced by the store.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Whether this notification describes a transaction event: a system
    /// notification whose related entity is a Transaction. These get
    /// structured payloads and per-category preference gating.
    pub fn transaction_ref(&self) -> Option<Uuid> {
        if self.kind != NotificationType::SystemNotification {
            return None;
        }
        match &self.related_to {
            Some(rel) if rel.model == RelatedModel::Transaction => Some(rel.id),
            _ => None,
        }
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|exp| exp <= Utc::now()).unwrap_or(false)
    }
}

/// Reference to the domain object a notification concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntity {
    /// The kind of entity referenced.
    pub model: RelatedModel,
    /// The referenced entity's identifier.
    pub id: Uuid,
}

/// The kinds of domain entity a notification can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelatedModel {
    Profile,
    User,
    Comment,
    Message,
    Transaction,
    Event,
    Task,
    Booking,
    ProfileConnection,
    CommunityGroupInvitation,
}

impl RelatedModel {
    /// Return the model as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::User => "User",
            Self::Comment => "Comment",
            Self::Message => "Message",
            Self::Transaction => "Transaction",
            Self::Event => "Event",
            Self::Task => "Task",
            Self::Booking => "Booking",
            Self::ProfileConnection => "ProfileConnection",
            Self::CommunityGroupInvitation => "CommunityGroupInvitation",
        }
    }

    /// Parse the stored string form. `None` for unknown strings.
    pub fn parse(s: &str) -> Option<Self> {
        let model = match s {
            "Profile" => Self::Profile,
            "User" => Self::User,
            "Comment" => Self::Comment,
            "Message" => Self::Message,
            "Transaction" => Self::Transaction,
            "Event" => Self::Event,
            "Task" => Self::Task,
            "Booking" => Self::Booking,
            "ProfileConnection" => Self::ProfileConnection,
            "CommunityGroupInvitation" => Self::CommunityGroupInvitation,
            _ => return None,
        };
        Some(model)
    }
}

impl std::fmt::Display for RelatedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A call-to-action attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Button/link label.
    pub text: String,
    /// Target URL (absolute, or a client-relative path).
    pub url: String,
}

/// Data required to create a new notification. The store assigns the
/// identifier, flags, and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub recipient: Uuid,
    /// The user who triggered it, when one did.
    pub sender: Option<Uuid>,
    /// Notification category.
    pub kind: NotificationType,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// The domain object this notification concerns.
    pub related_to: Option<RelatedEntity>,
    /// A single call-to-action surfaced to the user.
    pub action: Option<NotificationAction>,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Auxiliary structured data.
    pub metadata: NotificationMetadata,
    /// Hard deletion deadline enforced by the store.
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewNotification {
    /// Start a draft for a recipient and kind; everything else defaults.
    pub fn new(recipient: Uuid, kind: NotificationType) -> Self {
        Self {
            recipient,
            sender: None,
            kind,
            title: String::new(),
            message: String::new(),
            related_to: None,
            action: None,
            priority: NotificationPriority::Low,
            metadata: NotificationMetadata::new(),
            expires_at: None,
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the body text.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the sender.
    pub fn sender(mut self, sender: Uuid) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the related entity.
    pub fn related(mut self, model: RelatedModel, id: Uuid) -> Self {
        self.related_to = Some(RelatedEntity { model, id });
        self
    }

    /// Set the call-to-action.
    pub fn action(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.action = Some(NotificationAction {
            text: text.into(),
            url: url.into(),
        });
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the metadata object.
    pub fn metadata(mut self, metadata: NotificationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
