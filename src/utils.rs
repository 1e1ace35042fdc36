//! Utility functions

use alloy::primitives::{utils::format_ether, Address, U256};

// With stroke — for the sidebar logo (large display)
pub const LOGO_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><defs><style>.d1{fill:#818cf8;stroke:#09090b;stroke-width:1px}.d2{fill:#a5b4fc;stroke:#09090b;stroke-width:1px}.d3{fill:#4f46e5;stroke:#09090b;stroke-width:1px}</style></defs><path class="d2" d="M100 10 L150 55 L100 100 L50 55 Z"/><path class="d1" d="M50 55 L100 100 L100 190 L30 80 Z"/><path class="d3" d="M150 55 L100 100 L100 190 L170 80 Z"/></svg>"#;

// No stroke — for window/taskbar icons
pub const ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><defs><style>.d1{fill:#818cf8}.d2{fill:#a5b4fc}.d3{fill:#4f46e5}</style></defs><path class="d2" d="M100 10 L150 55 L100 100 L50 55 Z"/><path class="d1" d="M50 55 L100 100 L100 190 L30 80 Z"/><path class="d3" d="M150 55 L100 100 L100 190 L170 80 Z"/></svg>"#;

/// Rasterize the logo SVG at the given width, preserving aspect ratio.
pub fn rasterize_logo(width: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).unwrap();
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), width, height)
}

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_logo_square(size: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).unwrap();
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Format a wei amount (18 decimals) for display, trimming trailing zeros.
pub fn format_token_amount(wei: U256) -> String {
    let raw = format_ether(wei);
    match raw.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{int}.{frac}")
            }
        }
        None => raw,
    }
}

/// Shortened 0x1234…abcd form for header display.
pub fn short_address(addr: &Address) -> String {
    let s = addr.to_string();
    format!("{}…{}", &s[..6], &s[s.len() - 4..])
}

/// Parse the mint amount input; anything unparseable counts as zero,
/// which keeps the mint button disabled.
pub fn parse_token_amount(input: &str) -> u64 {
    input.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    fn wei(eth: &str) -> U256 {
        parse_ether(eth).unwrap()
    }

    #[test]
    fn formats_whole_token_amounts_without_decimals() {
        assert_eq!(format_token_amount(U256::ZERO), "0");
        assert_eq!(format_token_amount(wei("1")), "1");
        assert_eq!(format_token_amount(wei("10000")), "10000");
    }

    #[test]
    fn formats_fractional_amounts_with_trimmed_decimals() {
        assert_eq!(format_token_amount(wei("1.5")), "1.5");
        assert_eq!(format_token_amount(wei("0.001")), "0.001");
        assert_eq!(
            format_token_amount(U256::from(1u64)),
            "0.000000000000000001"
        );
    }

    #[test]
    fn short_address_keeps_prefix_and_suffix() {
        let addr: Address = "0x7a4e9c1d5b82f30a6de2c84b91f7a5c3e0d6b412"
            .parse()
            .unwrap();
        // Display form is EIP-55 checksummed, so compare case-insensitively
        let short = short_address(&addr).to_lowercase();
        assert!(short.starts_with("0x7a"));
        assert!(short.ends_with("6412"));
        assert!(short.contains('…'));
    }

    #[test]
    fn parse_token_amount_treats_garbage_as_zero() {
        assert_eq!(parse_token_amount("12"), 12);
        assert_eq!(parse_token_amount(" 7 "), 7);
        assert_eq!(parse_token_amount("0"), 0);
        assert_eq!(parse_token_amount(""), 0);
        assert_eq!(parse_token_amount("-3"), 0);
        assert_eq!(parse_token_amount("abc"), 0);
    }
}
