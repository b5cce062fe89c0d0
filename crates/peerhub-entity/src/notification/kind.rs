//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// The closed set of notification categories.
///
/// Stored as snake_case strings; [`NotificationType::as_str`] and
/// [`NotificationType::parse`] are the canonical mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ProfileView,
    ProfileLike,
    ConnectionRequest,
    ConnectionAccepted,
    ProfileComment,
    EndorsementReceived,
    MessageReceived,
    SecurityAlert,
    SystemNotification,
    AchievementUnlocked,
    SellSubmitted,
    SellRequest,
    SellCompleted,
    BookingRequest,
    Reminder,
    CommunityInvitation,
    CommunityGroupInvitationRequest,
    CommunityGroupInvitationResponse,
    CommunityGroupInvitationAccepted,
    CommunityGroupInvitationRejected,
    CommunityGroupInvitationPending,
    CommunityGroupInvitationCancelled,
    CommunityAnnouncement,
    CommunityReport,
    ProfileConnectionRequest,
    ProfileConnectionAccepted,
    BadgeEarned,
    BadgeSuggestionApproved,
    BadgeSuggestionRejected,
    BadgeSuggestionImplemented,
    MilestoneAchieved,
}

impl NotificationType {
    /// Return the type as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileView => "profile_view",
            Self::ProfileLike => "profile_like",
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionAccepted => "connection_accepted",
            Self::ProfileComment => "profile_comment",
            Self::EndorsementReceived => "endorsement_received",
            Self::MessageReceived => "message_received",
            Self::SecurityAlert => "security_alert",
            Self::SystemNotification => "system_notification",
            Self::AchievementUnlocked => "achievement_unlocked",
            Self::SellSubmitted => "sell_submitted",
            Self::SellRequest => "sell_request",
            Self::SellCompleted => "sell_completed",
            Self::BookingRequest => "booking_request",
            Self::Reminder => "reminder",
            Self::CommunityInvitation => "community_invitation",
            Self::CommunityGroupInvitationRequest => "community_group_invitation_request",
            Self::CommunityGroupInvitationResponse => "community_group_invitation_response",
            Self::CommunityGroupInvitationAccepted => "community_group_invitation_accepted",
            Self::CommunityGroupInvitationRejected => "community_group_invitation_rejected",
            Self::CommunityGroupInvitationPending => "community_group_invitation_pending",
            Self::CommunityGroupInvitationCancelled => "community_group_invitation_cancelled",
            Self::CommunityAnnouncement => "community_announcement",
            Self::CommunityReport => "community_report",
            Self::ProfileConnectionRequest => "profile_connection_request",
            Self::ProfileConnectionAccepted => "profile_connection_accepted",
            Self::BadgeEarned => "badge_earned",
            Self::BadgeSuggestionApproved => "badge_suggestion_approved",
            Self::BadgeSuggestionRejected => "badge_suggestion_rejected",
            Self::BadgeSuggestionImplemented => "badge_suggestion_implemented",
            Self::MilestoneAchieved => "milestone_achieved",
        }
    }

    /// Parse the stored string form. `None` for unknown strings.
    pub fn parse(s: &str) -> Option<Self> {
        let kind = match s {
            "profile_view" => Self::ProfileView,
            "profile_like" => Self::ProfileLike,
            "connection_request" => Self::ConnectionRequest,
            "connection_accepted" => Self::ConnectionAccepted,
            "profile_comment" => Self::ProfileComment,
            "endorsement_received" => Self::EndorsementReceived,
            "message_received" => Self::MessageReceived,
            "security_alert" => Self::SecurityAlert,
            "system_notification" => Self::SystemNotification,
            "achievement_unlocked" => Self::AchievementUnlocked,
            "sell_submitted" => Self::SellSubmitted,
            "sell_request" => Self::SellRequest,
            "sell_completed" => Self::SellCompleted,
            "booking_request" => Self::BookingRequest,
            "reminder" => Self::Reminder,
            "community_invitation" => Self::CommunityInvitation,
            "community_group_invitation_request" => Self::CommunityGroupInvitationRequest,
            "community_group_invitation_response" => Self::CommunityGroupInvitationResponse,
            "community_group_invitation_accepted" => Self::CommunityGroupInvitationAccepted,
            "community_group_invitation_rejected" => Self::CommunityGroupInvitationRejected,
            "community_group_invitation_pending" => Self::CommunityGroupInvitationPending,
            "community_group_invitation_cancelled" => Self::CommunityGroupInvitationCancelled,
            "community_announcement" => Self::CommunityAnnouncement,
            "community_report" => Self::CommunityReport,
            "profile_connection_request" => Self::ProfileConnectionRequest,
            "profile_connection_accepted" => Self::ProfileConnectionAccepted,
            "badge_earned" => Self::BadgeEarned,
            "badge_suggestion_approved" => Self::BadgeSuggestionApproved,
            "badge_suggestion_rejected" => Self::BadgeSuggestionRejected,
            "badge_suggestion_implemented" => Self::BadgeSuggestionImplemented,
            "milestone_achieved" => Self::MilestoneAchieved,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
