use std::str::FromStr;

use crate::model::{Category, Rgb};

pub(crate) const INSTITUTION_NAVY: Rgb = [30, 64, 175];
pub(crate) const MUTED_GRAY: Rgb = [107, 114, 128];
pub(crate) const NEUTRAL_FILL: Rgb = [249, 250, 251];
pub(crate) const NEUTRAL_STROKE: Rgb = [209, 213, 219];
pub(crate) const BLACK: Rgb = [0, 0, 0];
pub(crate) const WHITE: Rgb = [255, 255, 255];

/// Header bands, widest (and palest) first.
pub(crate) const HEADER_BANDS: [(f32, Rgb); 3] = [
    (50.0, [219, 234, 254]),
    (35.0, [191, 219, 254]),
    (20.0, [147, 197, 253]),
];

/// Colors of the general responsibility box.
pub(crate) struct AlertTheme {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub title: Rgb,
}

pub(crate) const ALERT: AlertTheme = AlertTheme {
    fill: [254, 242, 242],
    stroke: [239, 68, 68],
    title: [185, 28, 28],
};

/// Accent colors of a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTheme {
    /// Side bar, title banner and highlight outlines.
    pub primary: Rgb,
    /// Highlight box background.
    pub light: Rgb,
    /// Section titles and banner text.
    pub dark: Rgb,
}

impl ColorTheme {
    pub fn for_category(category: Category) -> ColorTheme {
        let (primary, light, dark) = match category {
            Category::ReciprocalEntity => ([34, 197, 94], [240, 253, 244], [22, 163, 74]),
            Category::Temple => ([168, 85, 247], [250, 245, 255], [147, 51, 234]),
            Category::PartyUnionEducationWelfare => {
                ([249, 115, 22], [255, 247, 237], [234, 88, 12])
            }
            Category::PressPrint => ([99, 102, 241], [238, 242, 255], [79, 70, 229]),
            Category::PhonogramVideogram => ([236, 72, 153], [253, 242, 248], [219, 39, 119]),
        };
        ColorTheme {
            primary,
            light,
            dark,
        }
    }
}

/// How much decoration surrounds the same section sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualStyle {
    /// Header bands, filled banners and boxes, dark footer band.
    #[default]
    Decorated,
    /// Text and outlines only; suited to monochrome printing.
    Plain,
}

impl VisualStyle {
    pub fn name(self) -> &'static str {
        match self {
            VisualStyle::Decorated => "decorated",
            VisualStyle::Plain => "plain",
        }
    }
}

impl FromStr for VisualStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decorated" => Ok(VisualStyle::Decorated),
            "plain" => Ok(VisualStyle::Plain),
            other => Err(format!("unknown visual style {other:?} (expected plain or decorated)")),
        }
    }
}
