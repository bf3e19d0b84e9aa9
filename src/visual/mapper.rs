use serde::{Deserialize, Serialize, Serializer};

use crate::models::{Provenance, ScentProfile};

const HOT_WARMTH: u8 = 70;
const COOL_WARMTH: u8 = 30;
const SHARP_TEXTURE: u8 = 50;
const SWEET_THRESHOLD: u8 = 60;
const SPIKY_TEXTURE: u8 = 70;
const BALANCED_TEXTURE: u8 = 40;

const BASE_PERIOD_SECS: f64 = 3.0;
const INTENSITY_PER_SECOND: f64 = 40.0;
const MIN_PERIOD_SECS: f64 = 0.5;

const WILD_FILTER: &str = "contrast(1.3) brightness(1.2) saturate(1.2)";
const WILD_RING_PERIOD_SECS: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SizeClass {
    #[default]
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    SharpHot,
    SoftHot,
    SharpCool,
    SoftCool,
    Neutral,
    Sweet,
    Savory,
}

impl Hue {
    pub fn hex(&self) -> &'static str {
        match self {
            Hue::SharpHot => "#ef4444",
            Hue::SoftHot => "#fb923c",
            Hue::SharpCool => "#22d3ee",
            Hue::SoftCool => "#3b82f6",
            Hue::Neutral => "#8b5cf6",
            Hue::Sweet => "#f472b6",
            Hue::Savory => "#a3e635",
        }
    }
}

impl Serialize for Hue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AuraShape {
    Spiky,
    Balanced,
    Round,
}

impl AuraShape {
    pub fn border_radius(&self) -> &'static str {
        match self {
            AuraShape::Spiky => "30% 70% 70% 30% / 30% 30% 70% 70%",
            AuraShape::Balanced => "40% 60% 60% 40% / 60% 40% 60% 40%",
            AuraShape::Round => "50%",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "px", rename_all = "camelCase")]
pub enum Extent {
    /// Fills whatever container hosts the aura (feed thumbnails).
    Fill,
    Pixels(u32),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SizeScale {
    pub extent: Extent,
    pub primary_blur_px: u32,
    pub secondary_blur_px: u32,
}

impl SizeClass {
    pub const fn scale(self) -> SizeScale {
        match self {
            SizeClass::Small => SizeScale {
                extent: Extent::Fill,
                primary_blur_px: 8,
                secondary_blur_px: 12,
            },
            SizeClass::Medium => SizeScale {
                extent: Extent::Pixels(160),
                primary_blur_px: 20,
                secondary_blur_px: 30,
            },
            SizeClass::Large => SizeScale {
                extent: Extent::Pixels(320),
                primary_blur_px: 50,
                secondary_blur_px: 70,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RingOverlay {
    pub dashed: bool,
    pub rotation_period_secs: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualParams {
    pub primary: Hue,
    pub secondary: Hue,
    pub shape: AuraShape,
    pub border_radius: &'static str,
    pub animation_period_secs: f64,
    pub filter: Option<&'static str>,
    pub ring: Option<RingOverlay>,
    pub scale: SizeScale,
}

/// Maps a scent profile to the aura drawn for it. Pure: the same inputs always
/// give the same parameters. Fields are expected to be clamped to 0..=100.
pub fn map_profile_to_visual(
    profile: &ScentProfile,
    provenance: Provenance,
    size: SizeClass,
) -> VisualParams {
    let shape = shape_for_texture(profile.texture);
    let (filter, ring) = if provenance.is_wild() {
        (
            Some(WILD_FILTER),
            Some(RingOverlay {
                dashed: true,
                rotation_period_secs: WILD_RING_PERIOD_SECS,
            }),
        )
    } else {
        (None, None)
    };

    VisualParams {
        primary: primary_hue(profile),
        secondary: secondary_hue(profile.sweetness),
        shape,
        border_radius: shape.border_radius(),
        animation_period_secs: animation_period_secs(profile.intensity),
        filter,
        ring,
        scale: size.scale(),
    }
}

fn primary_hue(profile: &ScentProfile) -> Hue {
    let sharp = profile.texture > SHARP_TEXTURE;
    if profile.warmth > HOT_WARMTH {
        if sharp {
            Hue::SharpHot
        } else {
            Hue::SoftHot
        }
    } else if profile.warmth < COOL_WARMTH {
        if sharp {
            Hue::SharpCool
        } else {
            Hue::SoftCool
        }
    } else {
        Hue::Neutral
    }
}

fn secondary_hue(sweetness: u8) -> Hue {
    if sweetness > SWEET_THRESHOLD {
        Hue::Sweet
    } else {
        Hue::Savory
    }
}

// 70 itself already reads as spiky.
fn shape_for_texture(texture: u8) -> AuraShape {
    if texture >= SPIKY_TEXTURE {
        AuraShape::Spiky
    } else if texture > BALANCED_TEXTURE {
        AuraShape::Balanced
    } else {
        AuraShape::Round
    }
}

pub fn animation_period_secs(intensity: u8) -> f64 {
    (BASE_PERIOD_SECS - f64::from(intensity) / INTENSITY_PER_SECOND).max(MIN_PERIOD_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(intensity: u8, warmth: u8, texture: u8, sweetness: u8) -> ScentProfile {
        ScentProfile::new(intensity, warmth, texture, sweetness)
    }

    #[test]
    fn mapping_is_deterministic() {
        let samples = [
            profile(90, 80, 20, 40),
            profile(95, 10, 90, 60),
            profile(70, 65, 15, 85),
            profile(0, 0, 0, 0),
            profile(100, 100, 100, 100),
        ];
        for sample in samples {
            for provenance in [Provenance::Industrial, Provenance::LocalWild] {
                for size in [SizeClass::Small, SizeClass::Medium, SizeClass::Large] {
                    assert_eq!(
                        map_profile_to_visual(&sample, provenance, size),
                        map_profile_to_visual(&sample, provenance, size)
                    );
                }
            }
        }
    }

    #[test]
    fn warmth_boundaries() {
        let at = |warmth, texture| primary_hue(&profile(50, warmth, texture, 50));
        assert_eq!(at(70, 80), Hue::Neutral);
        assert_eq!(at(71, 80), Hue::SharpHot);
        assert_eq!(at(71, 50), Hue::SoftHot);
        assert_eq!(at(30, 80), Hue::Neutral);
        assert_eq!(at(29, 51), Hue::SharpCool);
        assert_eq!(at(29, 50), Hue::SoftCool);
    }

    #[test]
    fn neutral_warmth_ignores_texture() {
        for texture in [0, 50, 51, 100] {
            assert_eq!(primary_hue(&profile(50, 50, texture, 50)), Hue::Neutral);
        }
    }

    #[test]
    fn sweetness_picks_accent() {
        assert_eq!(secondary_hue(60), Hue::Savory);
        assert_eq!(secondary_hue(61), Hue::Sweet);
    }

    #[test]
    fn texture_boundaries() {
        assert_eq!(shape_for_texture(70), AuraShape::Spiky);
        assert_eq!(shape_for_texture(71), AuraShape::Spiky);
        assert_eq!(shape_for_texture(69), AuraShape::Balanced);
        assert_eq!(shape_for_texture(41), AuraShape::Balanced);
        assert_eq!(shape_for_texture(40), AuraShape::Round);
        assert_eq!(shape_for_texture(0), AuraShape::Round);
    }

    #[test]
    fn animation_period_shrinks_to_floor() {
        assert_eq!(animation_period_secs(0), 3.0);
        assert_eq!(animation_period_secs(40), 2.0);
        assert_eq!(animation_period_secs(100), 0.5);

        let mut previous = animation_period_secs(0);
        for intensity in 1..=100u8 {
            let period = animation_period_secs(intensity);
            assert!(period <= previous, "period grew at intensity {intensity}");
            assert!(period >= MIN_PERIOD_SECS);
            previous = period;
        }
    }

    #[test]
    fn wild_provenance_adds_filter_and_ring() {
        let sample = profile(50, 50, 50, 50);
        let wild = map_profile_to_visual(&sample, Provenance::LocalWild, SizeClass::Medium);
        assert_eq!(wild.filter, Some(WILD_FILTER));
        assert!(wild.ring.map(|ring| ring.dashed).unwrap_or(false));

        let industrial = map_profile_to_visual(&sample, Provenance::Industrial, SizeClass::Medium);
        assert_eq!(industrial.filter, None);
        assert_eq!(industrial.ring, None);
    }

    #[test]
    fn size_class_is_a_lookup() {
        assert_eq!(SizeClass::Small.scale().primary_blur_px, 8);
        assert_eq!(SizeClass::Medium.scale().secondary_blur_px, 30);
        assert_eq!(SizeClass::Large.scale().extent, Extent::Pixels(320));
        assert_eq!(SizeClass::Small.scale().extent, Extent::Fill);
    }

    #[test]
    fn hues_serialize_as_hex() {
        let params = map_profile_to_visual(
            &profile(90, 80, 20, 40),
            Provenance::Industrial,
            SizeClass::Small,
        );
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["primary"], "#fb923c");
        assert_eq!(json["secondary"], "#a3e635");
        assert_eq!(json["shape"], "round");
    }
}
