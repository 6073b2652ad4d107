//! # Rendering Module
//!
//! Turns API results into terminal text. Every function returns a `String`; the
//! command layer decides where it goes.
//!
//! Layout calculations (width, truncation, padding) are done on the plain text with
//! `unicode-width`, before styling, since escape codes would throw the column math
//! off. Prices such as `₹1,250` and names in Devanagari must still line up.

use super::styles;
use bazaarapp::model::{Product, Profile};
use chrono::{DateTime, Utc};
use console::Style;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NAME_WIDTH: usize = 40;
pub const STATUS_WIDTH: usize = 8;
pub const LABEL_WIDTH: usize = 10;
const ELLIPSIS: char = '…';

pub fn render_product_list(products: &[Product]) -> String {
    render_product_list_internal(products, Utc::now(), console::colors_enabled())
}

fn render_product_list_internal(products: &[Product], now: DateTime<Utc>, color: bool) -> String {
    if products.is_empty() {
        return "No products.\n".to_string();
    }

    let name_width = products
        .iter()
        .map(|p| p.name.width())
        .max()
        .unwrap_or(0)
        .min(NAME_WIDTH);
    let price_width = products.iter().map(|p| p.price.width()).max().unwrap_or(0);

    let mut out = String::new();
    for product in products {
        let name = pad_to_width(&truncate_to_width(&product.name, name_width), name_width);
        let status = pad_to_width(&product.status.to_string(), STATUS_WIDTH);
        let price = format!(
            "{}{}",
            " ".repeat(price_width - product.price.width()),
            product.price
        );
        let stock_style = if product.stock == 0 {
            styles::out_of_stock()
        } else {
            Style::new()
        };
        out.push_str(&format!(
            "{}  {}  {}  {}  {}\n",
            paint(styles::title(), &name, color),
            paint(styles::status(product.status), &status, color),
            paint(styles::price(), &price, color),
            paint(stock_style, &format!("{:>4} in stock", product.stock), color),
            paint(styles::time(), &format_time_ago(product.date, now), color),
        ));
    }
    out
}

pub fn render_product(product: &Product) -> String {
    render_product_internal(product, Utc::now(), console::colors_enabled())
}

fn render_product_internal(product: &Product, now: DateTime<Utc>, color: bool) -> String {
    let mut out = format!("{}\n", paint(styles::title(), &product.name, color));
    let added = format!(
        "{} ({})",
        product.date.format("%Y-%m-%d %H:%M UTC"),
        format_time_ago(product.date, now)
    );
    let rows = [
        (
            "Status",
            paint(styles::status(product.status), &product.status.to_string(), color),
        ),
        ("Price", paint(styles::price(), &product.price, color)),
        ("Stock", product.stock.to_string()),
        ("Added", added),
        ("Image", product.image.clone()),
        ("AI hint", product.ai_hint.clone()),
    ];
    for (label, value) in rows {
        if value.is_empty() {
            continue;
        }
        out.push_str(&field_line(label, &value, color));
    }
    if !product.description.is_empty() {
        out.push('\n');
        out.push_str(&indent(&product.description));
    }
    out
}

pub fn render_profile(profile: &Profile) -> String {
    render_profile_internal(profile, console::colors_enabled())
}

fn render_profile_internal(profile: &Profile, color: bool) -> String {
    let mut out = format!("{}\n", paint(styles::title(), &profile.name, color));
    out.push_str(&field_line("Location", &profile.location, color));
    if let Some(avatar) = &profile.avatar {
        out.push_str(&field_line("Avatar", &summarize_avatar(avatar), color));
    }
    for (heading, body) in [("Story", &profile.story), ("Heritage", &profile.heritage)] {
        out.push('\n');
        out.push_str(&format!("{}\n", paint(styles::label(), heading, color)));
        out.push_str(&indent(body));
    }
    out
}

pub fn render_success(message: &str) -> String {
    format!("{}\n", paint(styles::success(), message, console::colors_enabled()))
}

pub fn render_warning(message: &str) -> String {
    format!("{}\n", paint(styles::warning(), message, console::colors_enabled()))
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn paint(style: Style, text: &str, color: bool) -> String {
    style.force_styling(color).apply_to(text).to_string()
}

fn field_line(label: &str, value: &str, color: bool) -> String {
    format!(
        "  {}  {}\n",
        paint(styles::label(), &pad_to_width(label, LABEL_WIDTH), color),
        value
    )
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}\n", line)).collect()
}

/// Data URIs can be hundreds of kilobytes; show their media type only.
fn summarize_avatar(avatar: &str) -> String {
    match avatar.strip_prefix("data:") {
        Some(rest) => {
            let media = rest.split(|c: char| c == ';' || c == ',').next().unwrap_or_default();
            format!("<embedded {}>", media)
        }
        None => avatar.to_string(),
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
