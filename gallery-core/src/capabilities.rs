//! Host capabilities handed to the gallery instead of read from globals.

/// Colour scheme of the site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    /// Class put on `<body>`.
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

pub trait ThemeProvider {
    /// The scheme the user agent prefers, if it expresses one.
    fn preferred(&self) -> Option<Theme>;

    fn initial(&self) -> Theme {
        self.preferred().unwrap_or_default()
    }
}

pub trait ViewportQuery {
    /// Layout viewport width in CSS pixels.
    fn width(&self) -> f64;

    /// Whether the element with this id is entirely on screen.
    fn is_visible(&self, element_id: &str) -> bool;

    fn is_mobile(&self, breakpoint_px: f64) -> bool {
        self.width() <= breakpoint_px
    }
}

/// Fixed answers, for hosts without a real viewport.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticEnvironment {
    pub theme: Option<Theme>,
    pub width: f64,
}

impl ThemeProvider for StaticEnvironment {
    fn preferred(&self) -> Option<Theme> {
        self.theme
    }
}

impl ViewportQuery for StaticEnvironment {
    fn width(&self) -> f64 {
        self.width
    }

    fn is_visible(&self, _element_id: &str) -> bool {
        true
    }
}
