//! Lookup tables from discrete block fields to layout effects.
//!
//! Each table has a utility-class form (for class-based output) and a plain
//! CSS form (for inline styles).

use crate::{Align, PageSize, TextSize};

/// Grid column count → classes
pub const GRID_SIZES: [(u32, &str); 3] = [
    (1, "grid-cols-1"),
    (2, "md:grid-cols-2"),
    (3, "md:grid-cols-2 lg:grid-cols-3"),
];

/// Class used for grid sizes outside the table
pub const GRID_FALLBACK_CLASS: &str = "col-span-1";

pub const COLUMN_SPANS: [(u32, &str); 3] = [
    (1, "col-span-1"),
    (2, "col-span-2"),
    (3, "col-span-3"),
];

/// Spacer size → (class, height)
pub const SPACER_SIZES: [(u32, &str, &str); 5] = [
    (1, "h-4", "1rem"),
    (2, "h-8", "2rem"),
    (3, "h-16", "4rem"),
    (4, "h-24", "6rem"),
    (5, "h-32", "8rem"),
];

/// Image height used when `height` is `auto`
pub const IMAGE_FALLBACK_HEIGHT: &str = "12rem";

pub fn is_supported_grid_size(size: u32) -> bool {
    GRID_SIZES.iter().any(|(s, _)| *s == size)
}

/// Effective column count; unsupported sizes collapse to one column
pub fn grid_columns(size: u32) -> u32 {
    if is_supported_grid_size(size) {
        size
    } else {
        1
    }
}

pub fn grid_class(size: u32) -> &'static str {
    GRID_SIZES
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, class)| *class)
        .unwrap_or(GRID_FALLBACK_CLASS)
}

pub fn column_span_class(span: u32) -> Option<&'static str> {
    COLUMN_SPANS
        .iter()
        .find(|(s, _)| *s == span)
        .map(|(_, class)| *class)
}

fn spacer_entry(size: u32) -> (u32, &'static str, &'static str) {
    SPACER_SIZES
        .iter()
        .copied()
        .find(|(s, _, _)| *s == size)
        .unwrap_or(SPACER_SIZES[0])
}

pub fn is_supported_spacer_size(size: u32) -> bool {
    SPACER_SIZES.iter().any(|(s, _, _)| *s == size)
}

/// Unknown spacer sizes fall back to the smallest height
pub fn spacer_class(size: u32) -> &'static str {
    spacer_entry(size).1
}

pub fn spacer_height(size: u32) -> &'static str {
    spacer_entry(size).2
}

impl Align {
    pub fn class(&self) -> &'static str {
        match self {
            Align::Left => "justify-start",
            Align::Center => "justify-center",
            Align::Right => "justify-end",
        }
    }

    pub fn justify_content(&self) -> &'static str {
        match self {
            Align::Left => "flex-start",
            Align::Center => "center",
            Align::Right => "flex-end",
        }
    }
}

impl PageSize {
    pub fn class(&self) -> &'static str {
        match self {
            PageSize::Small => "max-w-3xl",
            PageSize::Medium => "max-w-5xl",
            PageSize::Large => "max-w-7xl",
        }
    }

    pub fn max_width(&self) -> &'static str {
        match self {
            PageSize::Small => "48rem",
            PageSize::Medium => "64rem",
            PageSize::Large => "80rem",
        }
    }
}

impl TextSize {
    pub fn class(&self) -> &'static str {
        match self {
            TextSize::Small => "text-base",
            TextSize::Medium => "text-xl font-semibold",
            TextSize::Large => "text-3xl font-bold",
        }
    }

    /// (font-size, font-weight)
    pub fn font(&self) -> (&'static str, &'static str) {
        match self {
            TextSize::Small => ("1rem", "400"),
            TextSize::Medium => ("1.25rem", "600"),
            TextSize::Large => ("1.875rem", "700"),
        }
    }
}
