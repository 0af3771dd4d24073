use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// The authenticated actor, kept in memory and persisted as JSON.
///
/// Field names on the wire (`name`, `avatar`) match the persisted copy
/// written by earlier front ends, so an existing session still restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,

    #[serde(rename = "name")]
    pub display_name: String,

    #[serde(rename = "avatar")]
    pub avatar_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Build a fresh session, deriving the avatar from the display name.
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            email: email.into(),
            avatar_url: avatar_url(&display_name),
            display_name,
            signed_in_at: Some(Utc::now()),
        }
    }
}

/// Generated initials avatar for a display name.
pub fn avatar_url(display_name: &str) -> String {
    Url::parse_with_params(
        AVATAR_SERVICE,
        &[
            ("name", display_name),
            ("background", "6366f1"),
            ("color", "fff"),
            ("size", "128"),
        ],
    )
    .map_or_else(|_| AVATAR_SERVICE.to_owned(), String::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn avatar_encodes_display_name() {
        assert_eq!(
            avatar_url("Ada Lovelace"),
            "https://ui-avatars.com/api/?name=Ada+Lovelace&background=6366f1&color=fff&size=128"
        );
    }

    #[test]
    fn wire_names_match_persisted_format() {
        let session = Session::new("ada@shelf.dev", "Ada Lovelace");
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["email"], "ada@shelf.dev");
        assert_eq!(value["name"], "Ada Lovelace");
        assert!(value["avatar"].as_str().unwrap().contains("Ada+Lovelace"));
    }

    #[test]
    fn restores_copy_without_timestamp() {
        let raw = r#"{"email":"a@b.c","name":"A","avatar":"https://x"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.display_name, "A");
        assert!(session.signed_in_at.is_none());
    }
}
