//! Terminal styles for the bazaar CLI.
//!
//! Rendering code asks for a style by what the text *is* (a product name, a
//! timestamp, a status) rather than by color. `console` drops the escape codes
//! when stdout is not a terminal, so piped output stays plain.

use bazaarapp::model::ProductStatus;
use console::Style;

pub fn title() -> Style {
    Style::new().bold()
}

pub fn label() -> Style {
    Style::new().dim()
}

pub fn time() -> Style {
    Style::new().color256(247).italic()
}

pub fn price() -> Style {
    Style::new().cyan()
}

pub fn out_of_stock() -> Style {
    Style::new().red()
}

pub fn status(status: ProductStatus) -> Style {
    match status {
        ProductStatus::Active => Style::new().green(),
        ProductStatus::Draft => Style::new().yellow(),
        ProductStatus::Archived => Style::new().dim(),
    }
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow()
}
