//! Named badge themes from the showcase profile cards.

use serde::{Deserialize, Serialize};

use crate::config::{BadgeOverrides, Position, RgbColor, TextStyle};

/// A ready-made set of overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Preset {
    /// Nothing overridden.
    #[default]
    Default,
    /// Dark card: charcoal wash, gold border, text pushed along the curve.
    Unicorn,
    /// Light card: cream wash with dark bold text.
    GoodSoup,
    /// Vivid card: small coral badge.
    Vivid,
    /// Large badge in LinkedIn blue.
    LinkedIn,
    /// Alternative text.
    Available,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Self::Default,
        Self::Unicorn,
        Self::GoodSoup,
        Self::Vivid,
        Self::LinkedIn,
        Self::Available,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Unicorn => "unicorn",
            Self::GoodSoup => "good-soup",
            Self::Vivid => "vivid",
            Self::LinkedIn => "linked-in",
            Self::Available => "available",
        }
    }

    pub fn overrides(self) -> BadgeOverrides {
        match self {
            Self::Default => BadgeOverrides::new(),
            Self::Unicorn => BadgeOverrides {
                border_color: Some("#D5A566".into()),
                gradient_color: Some(RgbColor::new(30, 30, 30)),
                size: Some(168.0),
                badge_text: Some("#unicorn".into()),
                gradient_angle: Some(130.0),
                text_offset: Some(40.0),
                position: Some(Position::new().top(-10)),
                ..BadgeOverrides::default()
            },
            Self::GoodSoup => BadgeOverrides {
                badge_text: Some("#goodsoup!".into()),
                border_color: Some("#FCE0BB".into()),
                gradient_color: Some(RgbColor::new(252, 224, 187)),
                gradient_angle: Some(180.0),
                text_offset: Some(-80.0),
                position: Some(Position::new().top(-10).left(-15)),
                text_style: Some(TextStyle {
                    color: Some("#14332B".into()),
                    font_weight: Some("bold".into()),
                    font_size: Some("32px".into()),
                    letter_spacing: Some("0.08em".into()),
                    ..TextStyle::default()
                }),
                ..BadgeOverrides::default()
            },
            Self::Vivid => BadgeOverrides {
                border_color: Some("#ff6b6b".into()),
                gradient_color: Some(RgbColor::new(255, 107, 107)),
                size: Some(140.0),
                position: Some(Position::new().left(-70)),
                ..BadgeOverrides::default()
            },
            Self::LinkedIn => BadgeOverrides {
                size: Some(300.0),
                border_color: Some("#0077b5".into()),
                gradient_color: Some(RgbColor::new(0, 119, 181)),
                gradient_angle: Some(200.0),
                ..BadgeOverrides::default()
            },
            Self::Available => BadgeOverrides {
                badge_text: Some("#available".into()),
                text_offset: Some(10.0),
                ..BadgeOverrides::default()
            },
        }
    }
}
