use once_cell::sync::Lazy;
use ratatui::style::Color;

static TRUE_COLOR: Lazy<bool> = Lazy::new(|| {
    std::env::var("COLORTERM")
        .map(|value| detect_true_color(&value))
        .unwrap_or(false)
});

fn detect_true_color(colorterm: &str) -> bool {
    matches!(
        colorterm.to_ascii_lowercase().as_str(),
        "truecolor" | "24bit"
    )
}

pub fn supports_true_color() -> bool {
    *TRUE_COLOR
}

/// RGB color when the terminal can show it, nearest 256-color index otherwise.
pub fn smart_color(rgb: u32) -> Color {
    let (r, g, b) = ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
    if supports_true_color() {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_ansi256(r, g, b))
    }
}

/// Map onto the xterm 6x6x6 cube or the grayscale ramp, whichever is closer.
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let cube_index = |v: u8| -> usize {
        STEPS
            .iter()
            .enumerate()
            .min_by_key(|(_, step)| (i32::from(**step) - i32::from(v)).abs())
            .map(|(i, _)| i)
            .unwrap_or(0)
    };
    let (ri, gi, bi) = (cube_index(r), cube_index(g), cube_index(b));
    let cube = (STEPS[ri], STEPS[gi], STEPS[bi]);

    let average = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    let gray_index = (average.saturating_sub(8) / 10).min(23) as u8;
    let gray_level = 8 + 10 * gray_index;

    let distance = |(cr, cg, cb): (u8, u8, u8)| -> i32 {
        let dr = i32::from(cr) - i32::from(r);
        let dg = i32::from(cg) - i32::from(g);
        let db = i32::from(cb) - i32::from(b);
        dr * dr + dg * dg + db * db
    };

    if distance((gray_level, gray_level, gray_level)) < distance(cube) {
        232 + gray_index
    } else {
        16 + (36 * ri + 6 * gi + bi) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_true_color() {
        assert!(detect_true_color("truecolor"));
        assert!(detect_true_color("24BIT"));
        assert!(!detect_true_color("256"));
    }

    #[test]
    fn test_cube_corners() {
        assert_eq!(rgb_to_ansi256(0xFF, 0x00, 0x00), 196);
        assert_eq!(rgb_to_ansi256(0x00, 0xFF, 0x00), 46);
        assert_eq!(rgb_to_ansi256(0xFF, 0xFF, 0xFF), 231);
    }

    #[test]
    fn test_grays_use_ramp() {
        assert_eq!(rgb_to_ansi256(0x80, 0x80, 0x80), 244);
    }
}
