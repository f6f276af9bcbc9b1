//! Colors - Portal Theme Colors

use super::ThemeMode;
use crate::components::composite::status_badge::BadgeVariant;

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// CSS-style `#RRGGBB`
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.0 & 0x00ff_ffff)
    }
}

/// Background/foreground pair of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColors {
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Surface colors that change with the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub sidebar_bg: Rgb,
    pub text_primary: Rgb,
    pub text_muted: Rgb,
    pub border: Rgb,
    pub table_header_bg: Rgb,
    pub table_row_hover: Rgb,
    /// Whether the background image is drawn behind the content
    pub background_image: bool,
}

/// Portal color palette - all colors are accessed via associated functions
pub struct PortalColors;

impl PortalColors {
    /// Brand accent (rose)
    pub fn primary() -> Rgb {
        Rgb(0xe11d48)
    }

    /// Surface palette for a theme
    pub fn palette(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => Palette {
                background: Rgb(0xffffff),
                sidebar_bg: Rgb(0xffffff),
                text_primary: Rgb(0x262626),
                text_muted: Rgb(0x737373),
                border: Rgb(0xffe4e6),
                table_header_bg: Rgb(0xfafafa),
                table_row_hover: Rgb(0xfff1f2),
                background_image: true,
            },
            ThemeMode::Dark => Palette {
                background: Rgb(0x0a0a0a),
                sidebar_bg: Rgb(0x171717),
                text_primary: Rgb(0xffffff),
                text_muted: Rgb(0xa3a3a3),
                border: Rgb(0x262626),
                table_header_bg: Rgb(0x0a0a0a),
                table_row_hover: Rgb(0x1f1f1f),
                background_image: false,
            },
        }
    }

    /// Badge colors per variant
    pub fn badge(variant: BadgeVariant) -> BadgeColors {
        let (background, foreground) = match variant {
            BadgeVariant::Default => (Self::primary().0, 0xffffff),
            BadgeVariant::Secondary => (0xf5f5f5, 0x171717),
            BadgeVariant::Destructive => (0xdc2626, 0xffffff),
            BadgeVariant::Outline => (0xffffff, 0x171717),
            BadgeVariant::AwaitingApproval => (0xfee1c7, 0xa04c03),
            BadgeVariant::Approved => (0xdcfaf5, 0x127d6b),
            BadgeVariant::Rejected => (0xfceaea, 0xb60909),
        };
        BadgeColors {
            background: Rgb(background),
            foreground: Rgb(foreground),
        }
    }
}
