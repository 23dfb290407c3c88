//! 5x7 monospace text drawn as scaled dots through the compositor.
//!
//! Text is uppercase-folded. Characters without a glyph render as blanks.

use crate::color::Rgb565;
use crate::compositor::Compositor;

/// Glyph cell width in dots
pub const GLYPH_W: u16 = 5;

/// Glyph cell height in dots
pub const GLYPH_H: u16 = 7;

/// Horizontal advance per character in dots (glyph + one dot gap)
pub const ADVANCE: u16 = GLYPH_W + 1;

/// Rows of a glyph, top first; bit 4 is the leftmost column.
pub fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
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
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
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
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        _ => [0; 7],
    }
}

/// Width in pixels of `text` at `scale` (no trailing gap).
pub fn text_width(text: &str, scale: u16) -> u16 {
    let n = text.chars().count() as u16;
    if n == 0 {
        return 0;
    }
    (n * ADVANCE - 1).saturating_mul(scale)
}

/// Draw one character with its top-left corner at (px, py).
pub fn draw_char(gfx: &mut Compositor, px: u16, py: u16, c: char, scale: u16, color: Rgb565) {
    for (row, bits) in glyph(c).iter().enumerate() {
        for col in 0..GLYPH_W {
            if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                let x = px.saturating_add(col * scale);
                let y = py.saturating_add(row as u16 * scale);
                gfx.fill_rect(x, y, scale, scale, color);
            }
        }
    }
}

/// Draw `text` horizontally centered on the panel, top edge at `y`.
pub fn draw_text_centered(gfx: &mut Compositor, text: &str, y: u16, scale: u16, color: Rgb565) {
    let width = text_width(text, scale);
    let mut x = gfx.layout().width_px.saturating_sub(width) / 2;
    for c in text.chars() {
        draw_char(gfx, x, y, c, scale, color);
        x = x.saturating_add(ADVANCE * scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Layout;
    use crate::surface::MemorySink;
    use crate::sink::DisplaySink;

    #[test]
    fn test_lowercase_folds_to_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn test_unknown_char_is_blank() {
        assert_eq!(glyph('~'), [0; 7]);
        assert_eq!(glyph(' '), [0; 7]);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 4), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("SNAKE", 4), (5 * 6 - 1) * 4);
    }

    #[test]
    fn test_centered_text_lands_in_middle() {
        let mut gfx = Compositor::new(Layout::new(240, 240, 10));
        gfx.register(Box::new(MemorySink::new("mem", 240, 240)));

        // "I" at scale 2: width 10, x = 115; the stem is column 2 -> x 119..121.
        draw_text_centered(&mut gfx, "i", 100, 2, Rgb565::WHITE);

        let sink = gfx.sinks().next().unwrap();
        assert_eq!(sink.read_pixel(119, 102), Some(Rgb565::WHITE.to_rgb()));
        assert_eq!(sink.read_pixel(115, 102), Some(Rgb565::BLACK.to_rgb()));
        // Top bar spans columns 1..=3, i.e. x 117..123.
        assert_eq!(sink.read_pixel(117, 100), Some(Rgb565::WHITE.to_rgb()));
        assert_eq!(sink.read_pixel(121, 100), Some(Rgb565::WHITE.to_rgb()));
        assert_eq!(sink.read_pixel(123, 100), Some(Rgb565::BLACK.to_rgb()));
    }
}
