// this_file: backends/gtext-core/src/utils.rs

//! Utility functions shared by the gtext crates.

use std::path::PathBuf;

/// Convert typographic points to whole pixels at 96 dpi, rounding up.
pub fn pt_to_px(points: f32) -> f32 {
    (points * 4.0 / 3.0).ceil()
}

/// Convert a 26.6 fixed-point value to floating pixels.
pub fn from_26_6(value: i32) -> f32 {
    value as f32 / 64.0
}

/// Convert floating pixels to 26.6 fixed point, rounding to nearest.
pub fn to_26_6(value: f32) -> i32 {
    (value * 64.0).round() as i32
}

/// Quantize a size for cache key generation
pub fn quantize_size(size: f32) -> u32 {
    (size * 100.0) as u32
}

/// Parse hex color string to RGBA
pub fn parse_color(color: &str) -> Result<(u8, u8, u8, u8), String> {
    if color == "transparent" {
        return Ok((0, 0, 0, 0));
    }

    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| format!("color '{color}' must start with '#'"))?;
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .ok_or_else(|| format!("color '{color}' is truncated"))
            .and_then(|digits| u8::from_str_radix(digits, 16).map_err(|e| e.to_string()))
    };

    match hex.len() {
        6 => Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
        8 => Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?)),
        _ => Err(format!("color '{color}' must have 6 or 8 hex digits")),
    }
}

/// Directories holding system-wide and per-user fonts.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = if cfg!(target_os = "macos") {
        vec!["/System/Library/Fonts".into(), "/Library/Fonts".into()]
    } else if cfg!(windows) {
        vec![r"C:\Windows\Fonts".into()]
    } else if cfg!(unix) {
        vec!["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]
    } else {
        Vec::new()
    };

    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        if cfg!(target_os = "macos") {
            dirs.push(home.join("Library/Fonts"));
        } else if cfg!(unix) {
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}

/// First font file named one of `file_names` under the system font
/// directories, searched recursively.
pub fn find_system_font(file_names: &[&str]) -> Option<PathBuf> {
    let mut pending = system_font_dirs();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| file_names.contains(&name))
            {
                return Some(path);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF0000").unwrap(), (255, 0, 0, 255));
        assert_eq!(parse_color("#00FF0080").unwrap(), (0, 255, 0, 128));
        assert_eq!(parse_color("transparent").unwrap(), (0, 0, 0, 0));
        assert!(parse_color("red").is_err());
        assert!(parse_color("#GG0000").is_err());
    }

    #[test]
    fn test_fixed_point() {
        assert_eq!(from_26_6(704), 11.0);
        assert_eq!(from_26_6(-160), -2.5);
        assert_eq!(to_26_6(11.0), 704);
    }

    #[test]
    fn test_pt_to_px() {
        assert_eq!(pt_to_px(12.0), 16.0);
        assert_eq!(pt_to_px(10.0), 14.0);
    }

    #[test]
    fn test_find_system_font_misses_unknown_names() {
        assert!(find_system_font(&["gtext-no-such-font.ttf"]).is_none());
    }

    #[test]
    fn test_quantize_size() {
        assert_eq!(quantize_size(12.5), 1250);
        assert_eq!(quantize_size(24.0), 2400);
    }
}
