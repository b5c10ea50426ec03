//! Group keys used by the app's sectioned screens.

use super::group::{Group, GroupKey, group, group_all};
use crate::model::{Notification, NotificationKind, ProVideo, Stance, TrickListEntry};

/// Notification inbox tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationTab {
    /// Comments on the user's posts.
    Comments,
    /// Replies to the user's comments.
    Replies,
    /// Direct messages.
    Messages,
    /// Incoming friend requests.
    FriendRequests,
}

impl NotificationTab {
    /// Tab a notification belongs to.
    pub fn of(notification: &Notification) -> Self {
        match notification.kind {
            NotificationKind::Comment { .. } => Self::Comments,
            NotificationKind::Reply { .. } => Self::Replies,
            NotificationKind::Message { .. } => Self::Messages,
            NotificationKind::FriendRequest { .. } => Self::FriendRequests,
        }
    }
}

impl GroupKey for NotificationTab {
    const ALL: &'static [Self] = &[
        Self::Comments,
        Self::Replies,
        Self::Messages,
        Self::FriendRequests,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Comments => "Comments",
            Self::Replies => "Replies",
            Self::Messages => "Messages",
            Self::FriendRequests => "Friend Requests",
        }
    }
}

/// Trick list section by best attempt score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StarBucket {
    /// No attempt recorded.
    Unstarted,
    /// Best attempt scored 0.
    Zero,
    /// Best attempt scored 1.
    One,
    /// Best attempt scored 2.
    Two,
    /// Best attempt scored 3.
    Three,
}

impl StarBucket {
    /// Bucket of a trick list entry.
    ///
    /// An empty attempt history is always `Unstarted`.
    pub fn of(entry: &TrickListEntry) -> Self {
        match entry.rating() {
            None => Self::Unstarted,
            Some(0) => Self::Zero,
            Some(1) => Self::One,
            Some(2) => Self::Two,
            Some(_) => Self::Three,
        }
    }
}

impl GroupKey for StarBucket {
    const ALL: &'static [Self] = &[
        Self::Unstarted,
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Unstarted => "Unstarted",
            Self::Zero => "0 Stars",
            Self::One => "1 Star",
            Self::Two => "2 Stars",
            Self::Three => "3 Stars",
        }
    }
}

impl GroupKey for Stance {
    const ALL: &'static [Self] = &Stance::ALL;

    fn label(self) -> &'static str {
        Stance::label(self)
    }
}

/// Stance section of a pro video. Undecodable trick ids fall under `Regular`.
pub fn pro_video_stance(video: &ProVideo) -> Stance {
    video.stance().unwrap_or(Stance::Regular)
}

/// Notifications split into every inbox tab.
pub fn notification_tabs(items: &[Notification]) -> Vec<Group<NotificationTab, Notification>> {
    group_all(items, NotificationTab::of)
}

/// Trick list sectioned by star rating, empty sections omitted.
pub fn tricks_by_stars(items: &[TrickListEntry]) -> Vec<Group<StarBucket, TrickListEntry>> {
    group(items, StarBucket::of)
}

/// Pro videos sectioned by stance, empty sections omitted.
pub fn pro_videos_by_stance(items: &[ProVideo]) -> Vec<Group<Stance, ProVideo>> {
    group(items, pro_video_stance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, User};

    fn entry(id: &str, attempts: &[u8]) -> TrickListEntry {
        TrickListEntry {
            id: id.into(),
            name: id.into(),
            attempts: attempts.to_vec(),
        }
    }

    fn video(id: &str, trick_id: &str) -> ProVideo {
        ProVideo {
            id: id.into(),
            trick_id: trick_id.into(),
            pro_name: "Nyjah".into(),
            video_url: None,
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            username: id.into(),
            display_name: None,
            stance: None,
            profile_pic_url: None,
        }
    }

    fn message_notification(id: &str) -> Notification {
        Notification {
            id: id.into(),
            kind: NotificationKind::Message {
                message: Message {
                    id: format!("m-{id}"),
                    sender_id: "u2".into(),
                    body: "yo".into(),
                    created_at: 0,
                },
            },
            sender: None,
            seen: false,
            created_at: 0,
        }
    }

    fn request_notification(id: &str) -> Notification {
        Notification {
            id: id.into(),
            kind: NotificationKind::FriendRequest { sender: user("u3") },
            sender: Some(user("u3")),
            seen: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_star_buckets() {
        assert_eq!(StarBucket::of(&entry("a", &[])), StarBucket::Unstarted);
        assert_eq!(StarBucket::of(&entry("a", &[0, 0])), StarBucket::Zero);
        assert_eq!(StarBucket::of(&entry("a", &[2, 1])), StarBucket::Two);
        assert_eq!(StarBucket::of(&entry("a", &[7])), StarBucket::Three);
    }

    #[test]
    fn test_tricks_by_stars() {
        let items = vec![
            entry("kickflip", &[1]),
            entry("ollie", &[3]),
            entry("heelflip", &[]),
            entry("shuvit", &[1, 0]),
        ];
        let groups = tricks_by_stars(&items);

        let summary: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.label, g.items.iter().map(|e| e.id.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Unstarted", vec!["heelflip"]),
                ("1 Star", vec!["kickflip", "shuvit"]),
                ("3 Stars", vec!["ollie"]),
            ]
        );
    }

    #[test]
    fn test_notification_tabs_always_complete() {
        let items = vec![
            message_notification("n1"),
            request_notification("n2"),
            message_notification("n3"),
        ];
        let tabs = notification_tabs(&items);

        assert_eq!(tabs.len(), NotificationTab::ALL.len());
        assert!(tabs[0].is_empty());
        assert!(tabs[1].is_empty());
        assert_eq!(tabs[2].key, NotificationTab::Messages);
        assert_eq!(
            tabs[2].items.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["n1", "n3"]
        );
        assert_eq!(tabs[3].label, "Friend Requests");
        assert_eq!(tabs[3].len(), 1);
    }

    #[test]
    fn test_pro_videos_by_stance() {
        let items = vec![
            video("v1", "0012"),
            video("v2", "1012"),
            video("v3", "0001"),
            video("v4", "bad"),
            video("v5", "0112"),
        ];
        let groups = pro_videos_by_stance(&items);

        let summary: Vec<(Stance, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.key, g.items.iter().map(|v| v.id.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Stance::Regular, vec!["v2", "v4"]),
                (Stance::Fakie, vec!["v5"]),
                (Stance::Switch, vec!["v1"]),
                (Stance::Nollie, vec!["v3"]),
            ]
        );
    }

    #[test]
    fn test_grouping_twice_is_identical() {
        let items = vec![entry("a", &[2]), entry("b", &[]), entry("c", &[2])];
        assert_eq!(tricks_by_stars(&items), tricks_by_stars(&items));

        let notifications = vec![message_notification("n1"), request_notification("n2")];
        assert_eq!(notification_tabs(&notifications), notification_tabs(&notifications));
    }
}
