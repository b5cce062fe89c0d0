//! Notification factory — builders for common domain events.
//!
//! Each builder looks up the minimal display data it needs, composes a
//! well-formed notification, and persists it through the service (which
//! publishes it for dispatch). A missing referenced entity aborts the
//! builder with a logged skip, not an error. Message composition is kept
//! in free functions so wording is testable without a store.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use peerhub_core::result::AppResult;
use peerhub_database::repositories::profile::ProfileRepository;
use peerhub_database::repositories::user::UserRepository;
use peerhub_entity::notification::{
    NewNotification, Notification, NotificationMetadata, NotificationPriority, NotificationType,
    RelatedModel,
};
use peerhub_entity::profile::ProfileDisplay;

use super::service::NotificationService;

/// Stateless builders assembling notifications for domain events.
#[derive(Debug, Clone)]
pub struct NotificationFactory {
    /// User display lookups.
    users: Arc<UserRepository>,
    /// Profile display lookups.
    profiles: Arc<ProfileRepository>,
    /// Persistence + dispatch publishing.
    notifications: NotificationService,
}

impl NotificationFactory {
    /// Creates a new factory.
    pub fn new(
        users: Arc<UserRepository>,
        profiles: Arc<ProfileRepository>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            users,
            profiles,
            notifications,
        }
    }

    /// Someone viewed a profile; notify the owner.
    pub async fn profile_viewed(
        &self,
        profile_id: Uuid,
        viewer_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let Some(viewer) = self.users.display_name(viewer_id).await? else {
            warn!(viewer = %viewer_id, "Viewer not found, skipping profile-view notification");
            return Ok(None);
        };

        self.create(profile_view_draft(owner_id, profile_id, &viewer.full_name()))
            .await
    }

    /// A user asked to connect with another user.
    pub async fn connection_requested(
        &self,
        requester_id: Uuid,
        recipient_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let Some(requester) = self.users.display_name(requester_id).await? else {
            warn!(
                requester = %requester_id,
                "Requester not found, skipping connection-request notification"
            );
            return Ok(None);
        };

        self.create(connection_request_draft(
            recipient_id,
            requester_id,
            &requester.full_name(),
        ))
        .await
    }

    /// A profile asked to connect with another profile; notify the
    /// receiving profile's owner.
    pub async fn profile_connection_requested(
        &self,
        requester_profile_id: Uuid,
        receiver_profile_id: Uuid,
        connection_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let (Some(requester), Some(receiver)) = (
            self.profiles.display(requester_profile_id).await?,
            self.profiles.display(receiver_profile_id).await?,
        ) else {
            warn!(
                requester_profile = %requester_profile_id,
                receiver_profile = %receiver_profile_id,
                "Profile not found, skipping profile-connection notification"
            );
            return Ok(None);
        };

        self.create(profile_connection_request_draft(
            &requester,
            &receiver,
            connection_id,
        ))
        .await
    }

    /// A profile connection request was accepted; notify the requester's
    /// owner.
    pub async fn profile_connection_accepted(
        &self,
        requester_profile_id: Uuid,
        receiver_profile_id: Uuid,
        connection_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let (Some(requester), Some(receiver)) = (
            self.profiles.display(requester_profile_id).await?,
            self.profiles.display(receiver_profile_id).await?,
        ) else {
            warn!(
                requester_profile = %requester_profile_id,
                receiver_profile = %receiver_profile_id,
                "Profile not found, skipping profile-connection notification"
            );
            return Ok(None);
        };

        self.create(profile_connection_accepted_draft(
            &requester,
            &receiver,
            connection_id,
        ))
        .await
    }

    /// Someone endorsed the recipient for a skill.
    pub async fn endorsement_received(
        &self,
        endorser_id: Uuid,
        recipient_id: Uuid,
        skill: &str,
    ) -> AppResult<Option<Notification>> {
        let Some(endorser) = self.users.display_name(endorser_id).await? else {
            warn!(endorser = %endorser_id, "Endorser not found, skipping endorsement notification");
            return Ok(None);
        };

        self.create(endorsement_draft(
            recipient_id,
            endorser_id,
            &endorser.full_name(),
            skill,
        ))
        .await
    }

    /// A profile earned a badge; notify its owner.
    pub async fn badge_earned(
        &self,
        profile_id: Uuid,
        badge_name: &str,
        badge_description: &str,
        badge_icon: &str,
    ) -> AppResult<Option<Notification>> {
        let Some(profile) = self.profile_for_badge(profile_id).await? else {
            return Ok(None);
        };

        self.create(badge_earned_draft(
            &profile,
            badge_name,
            badge_description,
            badge_icon,
        ))
        .await
    }

    /// A badge suggestion was approved.
    pub async fn badge_suggestion_approved(
        &self,
        profile_id: Uuid,
        badge_name: &str,
    ) -> AppResult<Option<Notification>> {
        let Some(profile) = self.profile_for_badge(profile_id).await? else {
            return Ok(None);
        };

        self.create(badge_suggestion_draft(
            &profile,
            NotificationType::BadgeSuggestionApproved,
            badge_name,
            None,
        ))
        .await
    }

    /// A badge suggestion was rejected, with reviewer feedback.
    pub async fn badge_suggestion_rejected(
        &self,
        profile_id: Uuid,
        badge_name: &str,
        feedback: &str,
    ) -> AppResult<Option<Notification>> {
        let Some(profile) = self.profile_for_badge(profile_id).await? else {
            return Ok(None);
        };

        self.create(badge_suggestion_draft(
            &profile,
            NotificationType::BadgeSuggestionRejected,
            badge_name,
            Some(feedback),
        ))
        .await
    }

    /// A badge suggestion was implemented.
    pub async fn badge_suggestion_implemented(
        &self,
        profile_id: Uuid,
        badge_name: &str,
    ) -> AppResult<Option<Notification>> {
        let Some(profile) = self.profile_for_badge(profile_id).await? else {
            return Ok(None);
        };

        self.create(badge_suggestion_draft(
            &profile,
            NotificationType::BadgeSuggestionImplemented,
            badge_name,
            None,
        ))
        .await
    }

    /// A profile reached a points milestone; notify its owner.
    pub async fn milestone_achieved(
        &self,
        profile_id: Uuid,
        milestone_level: &str,
        current_points: i64,
    ) -> AppResult<Option<Notification>> {
        let Some(profile) = self.profile_for_badge(profile_id).await? else {
            return Ok(None);
        };

        self.create(milestone_draft(&profile, milestone_level, current_points))
            .await
    }

    async fn profile_for_badge(&self, profile_id: Uuid) -> AppResult<Option<ProfileDisplay>> {
        let profile = self.profiles.display(profile_id).await?;
        if profile.is_none() {
            warn!(profile = %profile_id, "Profile not found, skipping gamification notification");
        }
        Ok(profile)
    }

    async fn create(&self, draft: NewNotification) -> AppResult<Option<Notification>> {
        self.notifications
            .create_notification(draft)
            .await
            .map(Some)
    }
}

fn profile_view_draft(owner_id: Uuid, profile_id: Uuid, viewer_name: &str) -> NewNotification {
    NewNotification::new(owner_id, NotificationType::ProfileView)
        .title("New Profile View")
        .message(format!("{viewer_name} viewed your profile"))
        .related(RelatedModel::Profile, profile_id)
        .priority(NotificationPriority::Low)
}

fn connection_request_draft(
    recipient_id: Uuid,
    requester_id: Uuid,
    requester_name: &str,
) -> NewNotification {
    NewNotification::new(recipient_id, NotificationType::ConnectionRequest)
        .title("New Connection Request")
        .message(format!("{requester_name} wants to connect with you"))
        .sender(requester_id)
        .related(RelatedModel::User, requester_id)
        .action("View Request", format!("/connections/requests/{requester_id}"))
        .priority(NotificationPriority::Medium)
}

fn profile_connection_request_draft(
    requester: &ProfileDisplay,
    receiver: &ProfileDisplay,
    connection_id: Uuid,
) -> NewNotification {
    NewNotification::new(receiver.owner, NotificationType::ProfileConnectionRequest)
        .title("New Profile Connection Request")
        .message(format!(
            "{} wants to connect with your profile {}",
            requester.name, receiver.name
        ))
        .related(RelatedModel::ProfileConnection, connection_id)
        .action(
            "View Request",
            format!("/profiles/{}/connections/requests", receiver.id),
        )
        .priority(NotificationPriority::Medium)
        .metadata(NotificationMetadata::from_value(json!({
            "requesterProfileId": requester.id,
            "receiverProfileId": receiver.id,
            "connectionId": connection_id,
            "requesterProfileName": requester.name,
            "requesterProfileImage": requester.image,
        })))
}

fn profile_connection_accepted_draft(
    requester: &ProfileDisplay,
    receiver: &ProfileDisplay,
    connection_id: Uuid,
) -> NewNotification {
    NewNotification::new(requester.owner, NotificationType::ProfileConnectionAccepted)
        .title("Profile Connection Accepted")
        .message(format!(
            "{} has accepted your connection request",
            receiver.name
        ))
        .related(RelatedModel::ProfileConnection, connection_id)
        .action("View Profile", format!("/profiles/{}", receiver.id))
        .priority(NotificationPriority::Medium)
        .metadata(NotificationMetadata::from_value(json!({
            "requesterProfileId": requester.id,
            "receiverProfileId": receiver.id,
            "connectionId": connection_id,
            "receiverProfileName": receiver.name,
            "receiverProfileImage": receiver.image,
        })))
}

fn endorsement_draft(
    recipient_id: Uuid,
    endorser_id: Uuid,
    endorser_name: &str,
    skill: &str,
) -> NewNotification {
    NewNotification::new(recipient_id, NotificationType::EndorsementReceived)
        .title("New Skill Endorsement")
        .message(format!("{endorser_name} endorsed you for {skill}"))
        .sender(endorser_id)
        .related(RelatedModel::User, endorser_id)
        .priority(NotificationPriority::Medium)
}

fn badge_earned_draft(
    profile: &ProfileDisplay,
    badge_name: &str,
    badge_description: &str,
    badge_icon: &str,
) -> NewNotification {
    NewNotification::new(profile.owner, NotificationType::BadgeEarned)
        .title("New Badge Earned")
        .message(format!(
            "Congratulations! You've earned the {badge_name} badge."
        ))
        .related(RelatedModel::Profile, profile.id)
        .action("View Badges", "/dashboard/badges")
        .priority(NotificationPriority::Medium)
        .metadata(NotificationMetadata::from_value(json!({
            "badgeName": badge_name,
            "badgeDescription": badge_description,
            "badgeIcon": badge_icon,
            "profileId": profile.id,
        })))
}

fn badge_suggestion_draft(
    profile: &ProfileDisplay,
    kind: NotificationType,
    badge_name: &str,
    feedback: Option<&str>,
) -> NewNotification {
    let (title, message, action_text, action_url, priority) = match kind {
        NotificationType::BadgeSuggestionRejected => (
            "Badge Suggestion Not Approved",
            format!(
                "Your suggestion for the \"{badge_name}\" badge was not approved. \
                 Admin feedback: {}",
                feedback.unwrap_or("none provided")
            ),
            "View Suggestions",
            "/dashboard/badge-suggestions",
            NotificationPriority::Medium,
        ),
        NotificationType::BadgeSuggestionImplemented => (
            "Badge Suggestion Implemented",
            format!(
                "Great news! Your suggestion for the \"{badge_name}\" badge has been \
                 implemented and is now available in the system."
            ),
            "View Badges",
            "/dashboard/badges",
            NotificationPriority::High,
        ),
        _ => (
            "Badge Suggestion Approved",
            format!(
                "Your suggestion for the \"{badge_name}\" badge has been approved \
                 and is under review for implementation."
            ),
            "View Suggestions",
            "/dashboard/badge-suggestions",
            NotificationPriority::Medium,
        ),
    };

    let mut metadata = NotificationMetadata::from_value(json!({
        "badgeName": badge_name,
        "profileId": profile.id,
    }));
    if let Some(feedback) = feedback {
        metadata.insert("feedback", json!(feedback));
    }

    NewNotification::new(profile.owner, kind)
        .title(title)
        .message(message)
        .related(RelatedModel::Profile, profile.id)
        .action(action_text, action_url)
        .priority(priority)
        .metadata(metadata)
}

fn milestone_draft(
    profile: &ProfileDisplay,
    milestone_level: &str,
    current_points: i64,
) -> NewNotification {
    NewNotification::new(profile.owner, NotificationType::MilestoneAchieved)
        .title("New Milestone Achieved")
        .message(format!(
            "Congratulations! You've reached the {milestone_level} level with \
             {current_points} Pts."
        ))
        .related(RelatedModel::Profile, profile.id)
        .action("View Milestones", "/dashboard/milestones")
        .priority(NotificationPriority::High)
        .metadata(NotificationMetadata::from_value(json!({
            "milestoneLevel": milestone_level,
            "currentPoints": current_points,
            "profileId": profile.id,
        })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(owner: Uuid) -> ProfileDisplay {
        ProfileDisplay {
            id: Uuid::new_v4(),
            owner,
            name: "Studio Profile".into(),
            image: Some("https://cdn.peerhub.io/p.png".into()),
        }
    }

    #[test]
    fn test_profile_view_draft() {
        let owner = Uuid::new_v4();
        let profile_id = Uuid::new_v4();
        let draft = profile_view_draft(owner, profile_id, "Jane Doe");
        assert_eq!(draft.recipient, owner);
        assert_eq!(draft.kind, NotificationType::ProfileView);
        assert_eq!(draft.message, "Jane Doe viewed your profile");
        assert_eq!(draft.priority, NotificationPriority::Low);
        assert_eq!(draft.related_to.unwrap().id, profile_id);
    }

    #[test]
    fn test_connection_request_draft_carries_action() {
        let requester = Uuid::new_v4();
        let draft = connection_request_draft(Uuid::new_v4(), requester, "Jane Doe");
        assert_eq!(draft.title, "New Connection Request");
        let action = draft.action.unwrap();
        assert_eq!(action.text, "View Request");
        assert_eq!(action.url, format!("/connections/requests/{requester}"));
        assert_eq!(draft.priority, NotificationPriority::Medium);
    }

    #[test]
    fn test_profile_connection_request_targets_receiver_owner() {
        let requester = profile(Uuid::new_v4());
        let receiver = profile(Uuid::new_v4());
        let draft = profile_connection_request_draft(&requester, &receiver, Uuid::new_v4());
        assert_eq!(draft.recipient, receiver.owner);
        assert!(draft.message.contains(&requester.name));
        assert_eq!(
            draft.metadata.get("requesterProfileName").unwrap(),
            &serde_json::json!(requester.name)
        );
    }

    #[test]
    fn test_profile_connection_accepted_targets_requester_owner() {
        let requester = profile(Uuid::new_v4());
        let receiver = profile(Uuid::new_v4());
        let draft = profile_connection_accepted_draft(&requester, &receiver, Uuid::new_v4());
        assert_eq!(draft.recipient, requester.owner);
        assert!(draft.message.contains("accepted your connection request"));
    }

    #[test]
    fn test_badge_suggestion_rejection_includes_feedback() {
        let p = profile(Uuid::new_v4());
        let draft = badge_suggestion_draft(
            &p,
            NotificationType::BadgeSuggestionRejected,
            "Early Adopter",
            Some("too similar to an existing badge"),
        );
        assert_eq!(draft.title, "Badge Suggestion Not Approved");
        assert!(draft.message.contains("too similar to an existing badge"));
        assert_eq!(
            draft.metadata.get("feedback").unwrap(),
            &serde_json::json!("too similar to an existing badge")
        );
    }

    #[test]
    fn test_milestone_draft_is_high_priority() {
        let p = profile(Uuid::new_v4());
        let draft = milestone_draft(&p, "Gold", 5000);
        assert_eq!(draft.priority, NotificationPriority::High);
        assert!(draft.message.contains("Gold"));
        assert!(draft.message.contains("5000"));
    }
}
