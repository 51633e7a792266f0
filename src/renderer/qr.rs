//! QR code for share links
//!
//! Scanning the code opens the same configuration on another device, so it
//! always encodes the full link the session would share.

use qrcodegen::{QrCode, QrCodeEcc};

use crate::error::QrError;

use super::SvgConfig;

/// Quiet zone around the code, in modules
pub const QR_BORDER: i32 = 4;

/// Encode a link with medium error correction
pub fn encode_link(link: &str) -> Result<QrCode, QrError> {
    QrCode::encode_text(link, QrCodeEcc::Medium).map_err(|_| QrError::LinkTooLong(link.len()))
}

/// Number of dark modules in a code
pub fn dark_modules(code: &QrCode) -> usize {
    let size = code.size();
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .filter(|&(x, y)| code.get_module(x, y))
        .count()
}

/// Render a link as a QR code SVG, one unit per module
pub fn render_qr_svg(link: &str, config: &SvgConfig) -> Result<String, QrError> {
    let code = encode_link(link)?;
    let size = code.size() + 2 * QR_BORDER;
    let prefix = config.class_prefix.as_deref().unwrap_or_default();
    let (nl, indent) = if config.pretty_print {
        ("\n", "  ")
    } else {
        ("", "")
    };

    let mut d = String::new();
    for y in 0..code.size() {
        for x in 0..code.size() {
            if code.get_module(x, y) {
                if !d.is_empty() {
                    d.push(' ');
                }
                d.push_str(&format!("M{} {}h1v1h-1z", x + QR_BORDER, y + QR_BORDER));
            }
        }
    }

    let mut svg = String::new();
    if config.standalone {
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push_str(nl);
    }
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" shape-rendering="crispEdges">"#,
        size, size
    ));
    svg.push_str(nl);
    svg.push_str(&format!(
        r##"{}<rect class="{}qr-background" width="100%" height="100%" fill="#ffffff"/>"##,
        indent, prefix
    ));
    svg.push_str(nl);
    svg.push_str(&format!(
        r##"{}<path class="{}qr-modules" d="{}" fill="#000000"/>"##,
        indent, prefix, d
    ));
    svg.push_str(nl);
    svg.push_str("</svg>");
    Ok(svg)
}
