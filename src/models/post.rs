use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Provenance, ScentProfile};

/// Display name for everything the local user authors.
pub const SELF_AUTHOR: &str = "You";
pub const SELF_AVATAR: &str = "👤";
/// Glyph used for a post committed without a captured image.
pub const FALLBACK_GLYPH: &str = "🥘";
pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const NEW_POST_TIMESTAMP: &str = "just now";
pub const NEW_NOTE_TIMESTAMP: &str = "Just now";

/// Opaque handle to a captured image, stored as a data URL
/// (`data:<mime>;base64,<payload>`). Camera and file picker both produce one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The base64 body with any `data:...;base64,` prefix removed.
    pub fn payload(&self) -> &str {
        match self.0.split_once(',') {
            Some((_, body)) if !body.is_empty() => body,
            _ => &self.0,
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split_once(',')?.0;
        header.split(';').next().filter(|mime| !mime.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PostImage {
    Glyph(String),
    Image(ImageRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityNote {
    pub id: String,
    pub user: String,
    pub note: String,
    pub timestamp: String,
}

impl CommunityNote {
    pub fn from_self(note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: SELF_AUTHOR.to_string(),
            note: note.into(),
            timestamp: NEW_NOTE_TIMESTAMP.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user: String,
    pub user_avatar: String,
    pub image: PostImage,
    pub item: String,
    pub location: String,
    pub scent_profile: ScentProfile,
    pub provenance: Provenance,
    pub likes: u32,
    /// Display-only; nothing in the app increments it.
    pub comments: u32,
    pub description: String,
    pub timestamp: String,
    pub is_liked: bool,
    pub community_notes: Vec<CommunityNote>,
}

impl Post {
    /// A freshly committed post by the local user: zero engagement, no notes.
    pub fn authored(
        image: Option<ImageRef>,
        item: String,
        scent_profile: ScentProfile,
        provenance: Provenance,
        description: String,
    ) -> Self {
        let image = match image {
            Some(image) if !image.is_empty() => PostImage::Image(image),
            _ => PostImage::Glyph(FALLBACK_GLYPH.to_string()),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            user: SELF_AUTHOR.to_string(),
            user_avatar: SELF_AVATAR.to_string(),
            image,
            item,
            location: UNKNOWN_LOCATION.to_string(),
            scent_profile,
            provenance,
            likes: 0,
            comments: 0,
            description,
            timestamp: NEW_POST_TIMESTAMP.to_string(),
            is_liked: false,
            community_notes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_splits_data_url() {
        let image = ImageRef::from_bytes("image/jpeg", b"hello");
        assert_eq!(image.as_str(), "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(image.payload(), "aGVsbG8=");
        assert_eq!(image.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn bare_payload_is_passed_through() {
        let image = ImageRef::from_data_url("aGVsbG8=");
        assert_eq!(image.payload(), "aGVsbG8=");
        assert_eq!(image.mime_type(), None);
    }

    #[test]
    fn authored_post_without_image_uses_glyph() {
        let post = Post::authored(
            None,
            "Satsuma".into(),
            ScentProfile::default(),
            Provenance::Industrial,
            String::new(),
        );
        assert_eq!(post.image, PostImage::Glyph(FALLBACK_GLYPH.into()));
        assert_eq!(post.user, SELF_AUTHOR);
        assert_eq!(post.timestamp, NEW_POST_TIMESTAMP);
        assert_eq!((post.likes, post.comments), (0, 0));
        assert!(!post.is_liked);
        assert!(post.community_notes.is_empty());
    }

    #[test]
    fn post_image_is_tagged_on_the_wire() {
        let glyph = serde_json::to_value(PostImage::Glyph("🍄".into())).unwrap();
        assert_eq!(glyph, serde_json::json!({ "kind": "glyph", "value": "🍄" }));
    }
}
