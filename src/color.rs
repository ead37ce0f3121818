//! Color theme palette and hex/rgb conversions.

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Primary and secondary colors of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
}

/// Palette behind each `color-option` value
///
/// Returns `None` for names outside the color domain.
#[must_use]
pub fn palette(theme: &str) -> Option<Palette> {
    let (primary, secondary) = match theme {
        "default" => (Rgb(114, 103, 239), Rgb(98, 98, 113)),
        "gold" => (Rgb(13, 96, 118), Rgb(211, 161, 76)),
        "warm" => (Rgb(71, 117, 115), Rgb(255, 153, 102)),
        "happy" => (Rgb(10, 131, 151), Rgb(255, 96, 138)),
        "nature" => (Rgb(70, 111, 72), Rgb(166, 152, 94)),
        "hot" => (Rgb(200, 46, 66), Rgb(80, 74, 74)),
        _ => return None,
    };
    Some(Palette { primary, secondary })
}

/// Formats an RGB triple as a lowercase `#rrggbb` string
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parses a `#rrggbb` string
///
/// # Errors
///
/// Returns an error if the string is not a `#` followed by six hex digits
pub fn parse_hex(hex: &str) -> crate::error::Result<Rgb> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| crate::error::CustomizerError::from(format!("Invalid hex color: {hex}")))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| crate::error::CustomizerError::from(format!("Invalid hex color: {e}")))
    };

    Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Converts `#rrggbb` to a CSS `rgb(r, g, b)` or `rgba(r, g, b, a)` string
///
/// # Errors
///
/// Returns an error if `hex` is not a valid `#rrggbb` color
pub fn hex_to_rgb(hex: &str, alpha: Option<f32>) -> crate::error::Result<String> {
    let Rgb(r, g, b) = parse_hex(hex)?;
    Ok(match alpha {
        Some(a) => format!("rgba({r}, {g}, {b}, {a})"),
        None => format!("rgb({r}, {g}, {b})"),
    })
}
