//! Minimal 5×7 bitmap font.
//!
//! Shared by the text-shape rasterizer and the visualizer's status line.
//! Each glyph is 7 rows of 5 bits, most significant bit on the left.

pub const GLYPH_W: usize = 5;
pub const GLYPH_H: usize = 7;
/// Horizontal advance in font cells (glyph width + 1 cell gap).
pub const ADVANCE: usize = GLYPH_W + 1;

/// Look up the glyph for `c`.  Lowercase letters share the uppercase glyph.
/// Returns `None` for characters the font does not cover; those render blank.
pub fn glyph(c: char) -> Option<[u8; GLYPH_H]> {
    let g = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        ' ' => [0; GLYPH_H],
        _ => return None,
    };
    Some(g)
}

/// Pixel width of `text` drawn at `scale` pixels per font cell.
///
/// The trailing inter-glyph gap is not counted; a bold run is `scale / 2`
/// pixels wider.
pub fn text_width(text: &str, scale: usize, bold: bool) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    let w = (n * ADVANCE - 1) * scale;
    if bold { w + scale / 2 } else { w }
}

/// Pixel height of one line of text at `scale`.
pub fn text_height(scale: usize) -> usize {
    GLYPH_H * scale
}

/// Walk every lit pixel of `text` laid out from the origin and call
/// `plot(x, y)` for it.  Bold thickens each stroke by `scale / 2` pixels
/// to the right.
pub fn draw_text<F: FnMut(usize, usize)>(text: &str, scale: usize, bold: bool, mut plot: F) {
    let scale = scale.max(1);
    let thick = if bold { scale + scale / 2 } else { scale };

    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let gx = i * ADVANCE * scale;
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                let x0 = gx + col * scale;
                let y0 = row * scale;
                for dy in 0..scale {
                    for dx in 0..thick {
                        plot(x0 + dx, y0 + dy);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_uppercase_and_digits() {
        for c in ('A'..='Z').chain('0'..='9') {
            assert!(glyph(c).is_some(), "missing glyph for {c:?}");
        }
    }

    #[test]
    fn lowercase_maps_to_uppercase() {
        assert_eq!(glyph('q'), glyph('Q'));
    }

    #[test]
    fn unknown_is_blank() {
        assert!(glyph('§').is_none());
        let mut lit = 0;
        draw_text("§§", 4, false, |_, _| lit += 1);
        assert_eq!(lit, 0);
    }

    #[test]
    fn width_of_phrase() {
        // 10 glyphs × 6 cells − 1 gap = 59 cells
        assert_eq!(text_width("I LOVE YOU", 8, false), 59 * 8);
        assert_eq!(text_width("I LOVE YOU", 8, true), 59 * 8 + 4);
        assert_eq!(text_width("", 8, true), 0);
    }

    #[test]
    fn draw_stays_inside_box() {
        let (w, h) = (text_width("HI", 3, true), text_height(3));
        draw_text("HI", 3, true, |x, y| {
            assert!(x < w && y < h, "({x}, {y}) outside {w}×{h}");
        });
    }

    #[test]
    fn bold_lights_more_pixels() {
        let mut thin = 0;
        let mut bold = 0;
        draw_text("LOVE", 4, false, |_, _| thin += 1);
        draw_text("LOVE", 4, true, |_, _| bold += 1);
        assert!(bold > thin);
    }
}
