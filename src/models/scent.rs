use serde::{Deserialize, Serialize};

pub const SCENT_MIN: u8 = 0;
pub const SCENT_MAX: u8 = 100;
pub const NEUTRAL_SCENT: u8 = 50;

/// One of the four tuner sliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ScentField {
    Intensity,
    Warmth,
    Texture,
    Sweetness,
}

impl ScentField {
    /// Slider order as the tuner lays them out.
    pub const ALL: [ScentField; 4] = [
        ScentField::Sweetness,
        ScentField::Warmth,
        ScentField::Texture,
        ScentField::Intensity,
    ];
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Provenance {
    #[default]
    Industrial,
    #[serde(rename = "Local/Wild")]
    LocalWild,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Industrial => "Industrial",
            Provenance::LocalWild => "Local/Wild",
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Provenance::LocalWild)
    }
}

/// Sensory descriptor of a scanned item. Every field stays within
/// [`SCENT_MIN`, `SCENT_MAX`]; raw input goes through [`ScentProfile::clamp_value`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ScentProfile {
    pub intensity: u8,
    pub warmth: u8,
    pub texture: u8,
    pub sweetness: u8,
}

impl Default for ScentProfile {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ScentProfile {
    pub const fn new(intensity: u8, warmth: u8, texture: u8, sweetness: u8) -> Self {
        Self {
            intensity,
            warmth,
            texture,
            sweetness,
        }
    }

    pub const fn neutral() -> Self {
        Self::new(NEUTRAL_SCENT, NEUTRAL_SCENT, NEUTRAL_SCENT, NEUTRAL_SCENT)
    }

    pub fn clamp_value(raw: i64) -> u8 {
        raw.clamp(SCENT_MIN as i64, SCENT_MAX as i64) as u8
    }

    /// Model output arrives as an arbitrary JSON number; non-finite values fall
    /// back to neutral.
    pub fn clamp_model_value(raw: f64) -> u8 {
        if !raw.is_finite() {
            return NEUTRAL_SCENT;
        }
        raw.round().clamp(SCENT_MIN as f64, SCENT_MAX as f64) as u8
    }

    pub fn get(&self, field: ScentField) -> u8 {
        match field {
            ScentField::Intensity => self.intensity,
            ScentField::Warmth => self.warmth,
            ScentField::Texture => self.texture,
            ScentField::Sweetness => self.sweetness,
        }
    }

    /// Stores `raw` clamped to the slider range and returns the stored value.
    pub fn set(&mut self, field: ScentField, raw: i64) -> u8 {
        let value = Self::clamp_value(raw);
        let slot = match field {
            ScentField::Intensity => &mut self.intensity,
            ScentField::Warmth => &mut self.warmth,
            ScentField::Texture => &mut self.texture,
            ScentField::Sweetness => &mut self.sweetness,
        };
        *slot = value;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_neutral() {
        let profile = ScentProfile::default();
        for field in ScentField::ALL {
            assert_eq!(profile.get(field), NEUTRAL_SCENT);
        }
    }

    #[test]
    fn set_clamps_out_of_range_input() {
        let mut profile = ScentProfile::default();
        assert_eq!(profile.set(ScentField::Warmth, 140), 100);
        assert_eq!(profile.set(ScentField::Texture, -12), 0);
        assert_eq!(profile.set(ScentField::Sweetness, 90), 90);
        assert_eq!(profile, ScentProfile::new(50, 100, 0, 90));
    }

    #[test]
    fn model_values_are_rounded_and_clamped() {
        assert_eq!(ScentProfile::clamp_model_value(72.6), 73);
        assert_eq!(ScentProfile::clamp_model_value(-3.0), 0);
        assert_eq!(ScentProfile::clamp_model_value(250.0), 100);
        assert_eq!(ScentProfile::clamp_model_value(f64::NAN), NEUTRAL_SCENT);
    }

    #[test]
    fn provenance_uses_display_names_on_the_wire() {
        let wild = serde_json::to_string(&Provenance::LocalWild).unwrap();
        assert_eq!(wild, "\"Local/Wild\"");
        let parsed: Provenance = serde_json::from_str("\"Industrial\"").unwrap();
        assert_eq!(parsed, Provenance::Industrial);
        assert!(Provenance::LocalWild.is_wild());
    }
}
