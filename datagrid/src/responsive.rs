//! Breakpoint classification and column visibility.

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;

/// Responsive render mode, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsiveMode {
    Mobile,
    Compact,
    Full,
}

impl ResponsiveMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponsiveMode::Mobile => "mobile",
            ResponsiveMode::Compact => "compact",
            ResponsiveMode::Full => "full",
        }
    }
}

/// Width thresholds (inclusive upper bounds) for the responsive modes.
///
/// # Example
///
/// ```
/// use datagrid::{Breakpoints, ResponsiveMode};
///
/// let bp = Breakpoints::default();
/// assert_eq!(bp.classify(bp.mobile_max), ResponsiveMode::Mobile);
/// assert_eq!(bp.classify(bp.mobile_max + 1), ResponsiveMode::Compact);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Widths up to and including this are `Mobile`.
    ///
    /// Default: 599
    pub mobile_max: u32,
    /// Widths up to and including this (and above `mobile_max`) are `Compact`.
    ///
    /// Default: 1199
    pub compact_max: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 599,
            compact_max: 1199,
        }
    }
}

impl Breakpoints {
    /// Creates breakpoints with explicit thresholds.
    pub fn new(mobile_max: u32, compact_max: u32) -> Self {
        Self {
            mobile_max,
            compact_max,
        }
    }

    /// Classifies a viewport width.
    pub fn classify(&self, width: u32) -> ResponsiveMode {
        if width <= self.mobile_max {
            ResponsiveMode::Mobile
        } else if width <= self.compact_max {
            ResponsiveMode::Compact
        } else {
            ResponsiveMode::Full
        }
    }

    /// Whether `mobile_max < compact_max`.
    pub fn is_valid(&self) -> bool {
        self.mobile_max < self.compact_max
    }
}

/// Widest mode at which cards replace the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBreakpoint {
    /// Always render a table.
    Never,
    /// Render cards at this mode and every narrower one.
    At(ResponsiveMode),
}

impl Default for CardBreakpoint {
    fn default() -> Self {
        CardBreakpoint::At(ResponsiveMode::Mobile)
    }
}

impl CardBreakpoint {
    /// Whether `mode` renders as cards.
    pub fn use_cards(self, mode: ResponsiveMode) -> bool {
        match self {
            CardBreakpoint::Never => false,
            CardBreakpoint::At(widest) => mode <= widest,
        }
    }
}

/// Columns shown in `mode`, in definition order.
pub fn visible_columns<T>(columns: &[Column<T>], mode: ResponsiveMode) -> Vec<&Column<T>> {
    columns.iter().filter(|c| c.is_visible_in(mode)).collect()
}

/// Layout decision for one table at one width.
#[derive(Debug)]
pub struct ResponsiveLayout<'a, T> {
    pub mode: ResponsiveMode,
    pub columns: Vec<&'a Column<T>>,
    pub use_cards: bool,
}

impl<'a, T> ResponsiveLayout<'a, T> {
    /// Computes the layout for `mode`.
    pub fn new(columns: &'a [Column<T>], mode: ResponsiveMode, cards: CardBreakpoint) -> Self {
        Self {
            mode,
            columns: visible_columns(columns, mode),
            use_cards: cards.use_cards(mode),
        }
    }
}

/// Live viewport width and its classified mode.
///
/// Fed by the platform's resize signal; never measures anything itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    breakpoints: Breakpoints,
    width: u32,
    mode: ResponsiveMode,
}

impl Viewport {
    /// Creates a viewport at an initial width.
    pub fn new(breakpoints: Breakpoints, width: u32) -> Self {
        Self {
            breakpoints,
            width,
            mode: breakpoints.classify(width),
        }
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current mode.
    pub fn mode(&self) -> ResponsiveMode {
        self.mode
    }

    /// Updates the width. Returns the new mode if it changed.
    pub fn set_width(&mut self, width: u32) -> Option<ResponsiveMode> {
        self.width = width;
        let mode = self.breakpoints.classify(width);
        if mode == self.mode {
            return None;
        }
        log::debug!(
            "Viewport mode changed: {} -> {} at {}px",
            self.mode.as_str(),
            mode.as_str(),
            width
        );
        self.mode = mode;
        Some(mode)
    }
}
