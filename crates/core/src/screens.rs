//! Full-screen pages and the score bar.

use pi_snake_render::text::GLYPH_H;
use pi_snake_render::{draw_text_centered, Compositor, Rgb565};

use crate::grid::Grid;

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const SNAKE: Rgb565 = Rgb565::GREEN;
pub const FOOD: Rgb565 = Rgb565::YELLOW;
pub const SCORE_FILL: Rgb565 = Rgb565::BLUE;
pub const TEXT: Rgb565 = Rgb565::WHITE;

pub const MENU_BG: Rgb565 = Rgb565::BLUE;
pub const GAME_OVER_BG: Rgb565 = Rgb565::RED;
pub const CLEAR_BG: Rgb565 = Rgb565::GREEN;

pub const TEXT_SCALE: u16 = 4;
const LINE_GAP: u16 = 6;

fn line_height() -> u16 {
    GLYPH_H * TEXT_SCALE + LINE_GAP
}

/// Fill the panel and draw `lines` as a block centered both ways.
fn page(gfx: &mut Compositor, background: Rgb565, lines: &[&str]) {
    gfx.fill_all(background);
    let n = lines.len() as u16;
    if n == 0 {
        return;
    }
    // The last line has no trailing gap.
    let block = n * line_height() - LINE_GAP;
    let mut y = gfx.layout().height_px.saturating_sub(block) / 2;
    for line in lines {
        draw_text_centered(gfx, line, y, TEXT_SCALE, TEXT);
        y = y.saturating_add(line_height());
    }
}

pub fn draw_menu(gfx: &mut Compositor) {
    page(gfx, MENU_BG, &["SNAKE", "START"]);
}

pub fn draw_game_over(gfx: &mut Compositor, score: u32) {
    let score_line = format!("SCORE {}", score);
    page(gfx, GAME_OVER_BG, &["GAME", "OVER", &score_line]);
}

pub fn draw_clear(gfx: &mut Compositor, score: u32) {
    let score_line = format!("SCORE {}", score);
    page(gfx, CLEAR_BG, &["CLEAR!", &score_line]);
}

/// HUD rows: one filled cell per point, capped at the grid width.
pub fn draw_score_bar(gfx: &mut Compositor, grid: &Grid, score: u32) {
    let filled = score.min(grid.width as u32) as u16;
    for y in 0..grid.hud_rows {
        for x in 0..grid.width {
            let color = if x < filled { SCORE_FILL } else { BACKGROUND };
            gfx.draw_cell(x, y, color);
        }
    }
}
