pub mod archetype;
pub mod post;
pub mod scent;

pub use archetype::{Archetype, CilantroAnswer, ComfortChoice, SessionContext, GUEST_LABEL};
pub use post::{CommunityNote, ImageRef, Post, PostImage, SELF_AUTHOR};
pub use scent::{Provenance, ScentField, ScentProfile};
