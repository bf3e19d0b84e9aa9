use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown in the navigation chrome before onboarding records an archetype.
pub const GUEST_LABEL: &str = "GUEST";

/// First onboarding question. Either answer moves the quiz forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CilantroAnswer {
    FreshAndZesty,
    LiterallySoap,
}

/// Second onboarding question; decides the archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComfortChoice {
    Savory,
    Sweet,
}

impl ComfortChoice {
    /// Anything other than the exact "Savory" label counts as sweet.
    pub fn from_label(label: &str) -> Self {
        if label == "Savory" {
            ComfortChoice::Savory
        } else {
            ComfortChoice::Sweet
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Archetype {
    #[serde(rename = "UMAMI HUNTER")]
    UmamiHunter,
    #[serde(rename = "SWEET SEEKER")]
    SweetSeeker,
}

impl Archetype {
    pub fn from_quiz(_first: CilantroAnswer, comfort: ComfortChoice) -> Self {
        match comfort {
            ComfortChoice::Savory => Archetype::UmamiHunter,
            ComfortChoice::Sweet => Archetype::SweetSeeker,
        }
    }

    pub fn from_comfort_label(label: &str) -> Self {
        match ComfortChoice::from_label(label) {
            ComfortChoice::Savory => Archetype::UmamiHunter,
            ComfortChoice::Sweet => Archetype::SweetSeeker,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Archetype::UmamiHunter => "UMAMI HUNTER",
            Archetype::SweetSeeker => "SWEET SEEKER",
        }
    }
}

/// Session-wide context recorded once onboarding completes. Lives as long as the
/// controller that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub archetype: Archetype,
    pub onboarded_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            onboarded_at: Utc::now(),
        }
    }

    pub fn display_label(context: Option<&SessionContext>) -> &'static str {
        context
            .map(|ctx| ctx.archetype.label())
            .unwrap_or(GUEST_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn savory_makes_an_umami_hunter_regardless_of_first_answer() {
        for first in [CilantroAnswer::FreshAndZesty, CilantroAnswer::LiterallySoap] {
            assert_eq!(
                Archetype::from_quiz(first, ComfortChoice::Savory),
                Archetype::UmamiHunter
            );
            assert_eq!(
                Archetype::from_quiz(first, ComfortChoice::Sweet),
                Archetype::SweetSeeker
            );
        }
    }

    #[test]
    fn any_other_comfort_label_is_sweet() {
        assert_eq!(Archetype::from_comfort_label("Savory"), Archetype::UmamiHunter);
        assert_eq!(Archetype::from_comfort_label("Sweet"), Archetype::SweetSeeker);
        assert_eq!(Archetype::from_comfort_label("savory"), Archetype::SweetSeeker);
        assert_eq!(Archetype::from_comfort_label(""), Archetype::SweetSeeker);
    }

    #[test]
    fn guest_label_until_onboarded() {
        assert_eq!(SessionContext::display_label(None), GUEST_LABEL);
        let ctx = SessionContext::new(Archetype::UmamiHunter);
        assert_eq!(SessionContext::display_label(Some(&ctx)), "UMAMI HUNTER");
    }
}
