//! Boxed frame around the braille grid: title in the top rule, subtitle in
//! the bottom rule, y labels on the first and last graph rows.

use std::io::Write;

use crate::core::{
    color::{ANSI_RESET, colorize},
    config::PreviewConfig,
    constants::{BORDER_WIDTH, DECIMAL_PRECISION, LABEL_GUTTER},
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

/// Centre `text` between horizontal rules; a rule alone if it does not fit.
fn push_centered(buf: &mut String, text: &str, width: usize, cfg: &PreviewConfig) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.push_str(&H.repeat(width));
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  ");
    buf.push_str(&colorize(cfg.color, text));
    buf.push(' ');
    buf.push_str(&H.repeat(pad_right));
}

fn blank_row(buf: &mut String, inner: usize) {
    buf.push_str(V);
    buf.push_str(&" ".repeat(inner));
    buf.push_str(V);
    buf.push('\n');
}

/// Assemble the whole frame for `rows` (one string of braille per row).
#[must_use]
pub fn compose(cfg: &PreviewConfig, rows: &[String]) -> String {
    let high = format!("{:.*}", DECIMAL_PRECISION, cfg.y_max);
    let low = format!("{:.*}", DECIMAL_PRECISION, cfg.y_min);
    let label_w = high.len().max(low.len());
    let inner = cfg.x_chars + label_w + LABEL_GUTTER;
    let color = cfg.color.ansi();

    let mut out = String::with_capacity((inner + BORDER_WIDTH) * (rows.len() + 4) * 3);

    out.push_str(TL);
    push_centered(&mut out, &cfg.title, inner, cfg);
    out.push_str(TR);
    out.push('\n');
    blank_row(&mut out, inner);

    let last = rows.len().saturating_sub(1);
    for (i, row) in rows.iter().enumerate() {
        let label = match i {
            0 => high.as_str(),
            _ if i == last => low.as_str(),
            _ => "",
        };
        out.push_str(V);
        out.push_str(&format!("{label:>label_w$}"));
        out.push_str(&" ".repeat(LABEL_GUTTER));
        out.push_str(&color);
        out.push_str(row);
        out.push_str(ANSI_RESET);
        out.push_str(V);
        out.push('\n');
    }

    blank_row(&mut out, inner);
    out.push_str(BL);
    match &cfg.subtitle {
        Some(sub) => push_centered(&mut out, sub, inner, cfg),
        None => out.push_str(&H.repeat(inner)),
    }
    out.push_str(BR);
    out.push('\n');
    out
}

/// Write the composed frame to `out` in one go.
pub fn render<W: Write>(out: &mut W, cfg: &PreviewConfig, rows: &[String]) -> std::io::Result<()> {
    out.write_all(compose(cfg, rows).as_bytes())?;
    out.flush()
}
