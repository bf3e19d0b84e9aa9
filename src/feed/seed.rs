use crate::models::{CommunityNote, Post, PostImage, Provenance, ScentProfile};

struct SeedPost {
    id: &'static str,
    user: &'static str,
    avatar: &'static str,
    glyph: &'static str,
    item: &'static str,
    location: &'static str,
    profile: ScentProfile,
    provenance: Provenance,
    likes: u32,
    comments: u32,
    description: &'static str,
    timestamp: &'static str,
    is_liked: bool,
}

const SEED_POSTS: [SeedPost; 4] = [
    SeedPost {
        id: "1",
        user: "TruffleHunter_LDN",
        avatar: "🎩",
        glyph: "🍄",
        item: "Wild White Truffle Pasta",
        location: "Padella, London",
        profile: ScentProfile::new(90, 80, 20, 40),
        provenance: Provenance::LocalWild,
        likes: 240,
        comments: 18,
        description: "Earthy funk, literally smells like damp forest floor. Intense garlic notes that linger for hours.",
        timestamp: "2h ago",
        is_liked: false,
    },
    SeedPost {
        id: "2",
        user: "CitrusKing",
        avatar: "👑",
        glyph: "🍊",
        item: "Yuzu Sorbet",
        location: "Kyoto Speciality",
        profile: ScentProfile::new(95, 10, 90, 60),
        provenance: Provenance::LocalWild,
        likes: 112,
        comments: 7,
        description: "Sharp enough to cut glass. Super floral finish with hints of bergamot and mandarin.",
        timestamp: "5h ago",
        is_liked: true,
    },
    SeedPost {
        id: "3",
        user: "VanillaVault",
        avatar: "🏺",
        glyph: "🍦",
        item: "Madagascar Vanilla Ice Cream",
        location: "Amorino, Paris",
        profile: ScentProfile::new(70, 65, 15, 85),
        provenance: Provenance::Industrial,
        likes: 324,
        comments: 29,
        description: "Rich, creamy, with those black specks that tell you it's the real deal. Warm caramel undertones.",
        timestamp: "1d ago",
        is_liked: false,
    },
    SeedPost {
        id: "4",
        user: "SpiceRoute_Trader",
        avatar: "🧭",
        glyph: "🌶️",
        item: "Ghost Pepper Hot Sauce",
        location: "Home Kitchen, Mumbai",
        profile: ScentProfile::new(98, 95, 85, 20),
        provenance: Provenance::LocalWild,
        likes: 89,
        comments: 43,
        description: "Violent. Absolutely violent. Fruity top notes before the heat bomb drops. Smoky finish that haunts you.",
        timestamp: "2d ago",
        is_liked: true,
    },
];

/// The feed every session starts with.
pub fn seed_posts() -> Vec<Post> {
    SEED_POSTS
        .iter()
        .map(|seed| {
            let community_notes = if seed.id == "2" {
                vec![CommunityNote {
                    id: "c1".into(),
                    user: "ChefMiko".into(),
                    note: "I found it more sweet than sharp personally, really depends on the season."
                        .into(),
                    timestamp: "1h ago".into(),
                }]
            } else {
                Vec::new()
            };

            Post {
                id: seed.id.into(),
                user: seed.user.into(),
                user_avatar: seed.avatar.into(),
                image: PostImage::Glyph(seed.glyph.into()),
                item: seed.item.into(),
                location: seed.location.into(),
                scent_profile: seed.profile,
                provenance: seed.provenance,
                likes: seed.likes,
                comments: seed.comments,
                description: seed.description.into(),
                timestamp: seed.timestamp.into(),
                is_liked: seed.is_liked,
                community_notes,
            }
        })
        .collect()
}
