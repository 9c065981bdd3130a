//! Card layout as an SVG document.
//!
//! One fixed-size document is used both for the on-screen preview and for
//! rasterized export, so both show the same card.

use std::fmt::Write as _;

use crate::types::StudentRecord;

/// Card width in CSS pixels.
pub const CARD_WIDTH: u32 = 800;
/// Card height in CSS pixels.
pub const CARD_HEIGHT: u32 = 420;
/// Photo slot width.
pub const PHOTO_WIDTH: u32 = 150;
/// Photo slot height.
pub const PHOTO_HEIGHT: u32 = 200;

const PURPLE: &str = "#753995";
const YELLOW: &str = "#fae303";
const RED: &str = "#ee2824";
const ORANGE: &str = "#f47820";
const DEEP_PURPLE: &str = "#592971";
const INK_PURPLE: &str = "#3b0764";
const INK_BLUE: &str = "#172554";

const PHOTO_X: u32 = 32;
const PHOTO_Y: u32 = 150;
const TEXT_X: u32 = PHOTO_X + PHOTO_WIDTH + 24;

/// Escape text for use in SVG character data and attributes.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Build the card document for `record`.
///
/// `photo_href` is any image source the consumer can load: a data URI for
/// export, or the gateway URL for the preview. Without one, the slot shows
/// the name's initial.
pub fn card_svg(record: &StudentRecord, photo_href: Option<&str>) -> String {
    let mut svg = String::with_capacity(8 * 1024);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    );

    let _ = write!(
        svg,
        r#"<defs><linearGradient id="band" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{YELLOW}" stop-opacity="1"/><stop offset="1" stop-color="{YELLOW}" stop-opacity="0"/></linearGradient><clipPath id="photo-clip"><rect x="{PHOTO_X}" y="{PHOTO_Y}" width="{PHOTO_WIDTH}" height="{PHOTO_HEIGHT}" rx="12"/></clipPath></defs>"#
    );

    // Body and top band
    let _ = write!(
        svg,
        r#"<rect width="{CARD_WIDTH}" height="{CARD_HEIGHT}" rx="24" fill="{PURPLE}"/><rect y="4" width="{CARD_WIDTH}" height="210" rx="24" fill="url(#band)"/>"#
    );

    push_chip(&mut svg);
    push_logo(&mut svg);
    push_photo(&mut svg, record, photo_href);
    push_identity(&mut svg, record);
    push_prepaid(&mut svg);
    push_tagline(&mut svg);
    push_barcode(&mut svg, &record.nim);

    svg.push_str("</svg>");
    svg
}

fn push_chip(svg: &mut String) {
    let _ = write!(
        svg,
        r##"<g transform="translate(32 32)"><rect width="72" height="56" rx="10" fill="#d4af37" stroke="#8a6d1d" stroke-width="2"/><path d="M0 19 H24 M0 37 H24 M48 19 H72 M48 37 H72 M24 0 V56 M48 0 V56" stroke="#8a6d1d" stroke-width="2" fill="none"/></g>"##
    );
}

fn push_logo(svg: &mut String) {
    let _ = write!(
        svg,
        r##"<g transform="translate(704 96)"><circle r="64" fill="#ffffff" stroke="{DEEP_PURPLE}" stroke-width="6"/><text y="16" text-anchor="middle" font-size="48" font-weight="700"><tspan fill="{INK_PURPLE}">U</tspan><tspan fill="{ORANGE}">G</tspan></text></g>"##
    );
}

fn push_photo(svg: &mut String, record: &StudentRecord, photo_href: Option<&str>) {
    match photo_href {
        Some(href) => {
            let href = escape_xml(href);
            let _ = write!(
                svg,
                r#"<image x="{PHOTO_X}" y="{PHOTO_Y}" width="{PHOTO_WIDTH}" height="{PHOTO_HEIGHT}" preserveAspectRatio="xMidYMid slice" clip-path="url(#photo-clip)" href="{href}" xlink:href="{href}"/>"#
            );
        }
        None => {
            let initial = record
                .name
                .trim()
                .chars()
                .next()
                .map(|c| escape_xml(&c.to_uppercase().to_string()))
                .unwrap_or_default();
            let _ = write!(
                svg,
                r##"<rect x="{PHOTO_X}" y="{PHOTO_Y}" width="{PHOTO_WIDTH}" height="{PHOTO_HEIGHT}" rx="12" fill="#5b2a75"/><text x="{cx}" y="{cy}" text-anchor="middle" font-size="64" font-weight="700" fill="#ffffff" fill-opacity="0.6">{initial}</text>"##,
                cx = PHOTO_X + PHOTO_WIDTH / 2,
                cy = PHOTO_Y + PHOTO_HEIGHT / 2 + 22,
            );
        }
    }
}

fn push_identity(svg: &mut String, record: &StudentRecord) {
    let lines = [&record.nim, &record.name, &record.major, &record.faculty];
    let _ = write!(
        svg,
        r##"<g fill="#ffffff" font-size="20" font-weight="600">"##
    );
    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<text x="{TEXT_X}" y="{y}">{text}</text>"#,
            y = PHOTO_Y + 52 + (i as u32) * 32,
            text = escape_xml(line)
        );
    }
    svg.push_str("</g>");
}

fn push_prepaid(svg: &mut String) {
    let _ = write!(
        svg,
        r##"<text x="612" y="262" font-size="30" fill="#ffffff">prepaid</text><g transform="translate(736 252)" fill="none" stroke="#ffffff" stroke-width="3" stroke-linecap="round"><path d="M0 -8 A10 10 0 0 1 0 8"/><path d="M7 -15 A18 18 0 0 1 7 15"/><path d="M14 -22 A26 26 0 0 1 14 22"/></g>"##
    );
}

fn push_tagline(svg: &mut String) {
    let _ = write!(
        svg,
        r#"<text x="32" y="380" font-size="20" letter-spacing="-1" xml:space="preserve"><tspan font-size="24" fill="{INK_PURPLE}">U</tspan><tspan font-size="24" fill="{ORANGE}">G</tspan><tspan> </tspan><tspan fill="{DEEP_PURPLE}">CO</tspan><tspan fill="{RED}">LO</tspan><tspan fill="{YELLOW}">RING</tspan><tspan fill="{INK_BLUE}"> THEGLOBAL FUTURE</tspan></text>"#
    );
    // Three-colour bar, widest first
    let _ = write!(
        svg,
        r#"<rect x="32" y="390" width="360" height="5" fill="{YELLOW}"/><rect x="32" y="390" width="240" height="5" fill="{RED}"/><rect x="32" y="390" width="120" height="5" fill="{DEEP_PURPLE}"/>"#
    );
}

/// Decorative barcode whose bars follow the NIM's bytes.
fn push_barcode(svg: &mut String, nim: &str) {
    const LEFT: u32 = 600;
    const TOP: u32 = 340;
    const WIDTH: u32 = 160;
    const HEIGHT: u32 = 56;

    let _ = write!(
        svg,
        r##"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="4" fill="#ffffff"/>"##,
        x = LEFT - 6,
        y = TOP - 6,
        w = WIDTH + 12,
        h = HEIGHT + 12
    );

    let seed: Vec<u8> = if nim.is_empty() {
        b"KTM".to_vec()
    } else {
        nim.bytes().collect()
    };

    let mut x = LEFT;
    let mut i = 0usize;
    while x < LEFT + WIDTH {
        let byte = seed[i % seed.len()].wrapping_add(i as u8);
        let bar = 1 + (byte % 3) as u32;
        let gap = 1 + ((byte >> 2) % 3) as u32;
        if x + bar > LEFT + WIDTH {
            break;
        }
        let _ = write!(
            svg,
            r##"<rect x="{x}" y="{TOP}" width="{bar}" height="{HEIGHT}" fill="#111111"/>"##
        );
        x += bar + gap;
        i += 1;
    }
}
