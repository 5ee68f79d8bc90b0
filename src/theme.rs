use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colours used by the console, resolved from a Catppuccin flavour.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub overlay0: Color,
    pub text: Color,
    pub subtext0: Color,
    pub mauve: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub lavender: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            surface0: catppuccin_to_color(&c.surface0),
            surface1: catppuccin_to_color(&c.surface1),
            overlay0: catppuccin_to_color(&c.overlay0),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            mauve: catppuccin_to_color(&c.mauve),
            red: catppuccin_to_color(&c.red),
            yellow: catppuccin_to_color(&c.yellow),
            green: catppuccin_to_color(&c.green),
            blue: catppuccin_to_color(&c.blue),
            lavender: catppuccin_to_color(&c.lavender),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    // Semantic colours
    pub const fn border(&self) -> Color {
        self.surface1
    }

    pub const fn header(&self) -> Color {
        self.yellow
    }

    pub const fn cursor_bg(&self) -> Color {
        self.surface1
    }

    /// Background of rows that are part of the multi-selection.
    pub const fn selected_bg(&self) -> Color {
        self.surface0
    }

    pub const fn muted(&self) -> Color {
        self.overlay0
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

pub struct ThemeInfo {
    pub name: &'static str,
    pub theme: Theme,
}

pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo {
            name: "Catppuccin Mocha",
            theme: Theme::catppuccin_mocha(),
        },
        ThemeInfo {
            name: "Catppuccin Macchiato",
            theme: Theme::catppuccin_macchiato(),
        },
        ThemeInfo {
            name: "Catppuccin Frappé",
            theme: Theme::catppuccin_frappe(),
        },
        ThemeInfo {
            name: "Catppuccin Latte",
            theme: Theme::catppuccin_latte(),
        },
    ]
}

/// Theme by display name, falling back to Mocha for unknown names.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| t.theme)
        .unwrap_or_else(|| {
            tracing::warn!(name, "Unknown theme, using default");
            Theme::default()
        })
}
