//! Game engine - the mode state machine, movement and feeding.
//!
//! All drawing goes through the [`Compositor`] passed into each call; the
//! engine itself holds no display handles. Only changed cells are redrawn
//! per tick (vacated tail, new head, respawned food), plus the score bar.

use log::{debug, info};

use pi_snake_render::Compositor;
use pi_snake_types::{Button, ButtonState, Direction, InputClass, Mode, Position};

use crate::food::FoodSet;
use crate::grid::{ConfigError, GameConfig};
use crate::rng::SimpleRng;
use crate::screens;
use crate::snake::Snake;

/// Why a session ended in GameOver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Stepped off the grid edge
    Wall,
    /// Stepped into the score bar rows
    Hud,
    /// Stepped onto an existing body segment
    SelfHit,
}

impl Collision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collision::Wall => "wall",
            Collision::Hud => "hud",
            Collision::SelfHit => "self",
        }
    }
}

/// Result of one [`GameEngine::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    Moved,
    /// Ate the food in this slot and grew by one
    Ate { slot: usize },
    GameOver(Collision),
    Cleared,
}

const DIRECTION_BUTTONS: [Button; 4] = [Button::Up, Button::Down, Button::Left, Button::Right];

/// One session of snake.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    mode: Mode,
    snake: Snake,
    foods: FoodSet,
    score: u32,
    /// Heading used by the last tick
    heading: Direction,
    /// Heading the next tick will use
    pending: Direction,
    rng: SimpleRng,
    /// Sessions started since construction
    sessions: u32,
}

impl GameEngine {
    /// Create an engine in Menu mode. Nothing is drawn until
    /// [`GameEngine::enter_menu`].
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            mode: Mode::Menu,
            snake: Snake::with_capacity(config.grid.cells()),
            foods: FoodSet::new(),
            score: 0,
            heading: Direction::Right,
            pending: Direction::Right,
            rng: SimpleRng::new(seed),
            sessions: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &FoodSet {
        &self.foods
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading the next tick will commit
    pub fn pending_heading(&self) -> Direction {
        self.pending
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Switch to Menu and draw the menu page.
    pub fn enter_menu(&mut self, gfx: &mut Compositor) {
        self.set_mode(Mode::Menu);
        screens::draw_menu(gfx);
    }

    /// Apply one input snapshot.
    ///
    /// Returns the class of the press that was acted on, so the caller can
    /// apply the matching debounce hold. At most one press is acted on.
    pub fn handle_input(
        &mut self,
        buttons: ButtonState,
        gfx: &mut Compositor,
    ) -> Option<InputClass> {
        match self.mode {
            Mode::Menu => {
                if buttons.pressed(Button::Confirm) {
                    self.start(gfx);
                    return Some(InputClass::Mode);
                }
                None
            }
            Mode::GameOver | Mode::Cleared => {
                if buttons.pressed(Button::Confirm) {
                    self.enter_menu(gfx);
                    return Some(InputClass::Mode);
                }
                None
            }
            Mode::Playing | Mode::Paused => {
                if buttons.pressed(Button::Action1) {
                    let next = if self.mode == Mode::Playing {
                        Mode::Paused
                    } else {
                        Mode::Playing
                    };
                    self.set_mode(next);
                    return Some(InputClass::Mode);
                }
                if buttons.pressed(Button::Action2) {
                    self.enter_menu(gfx);
                    return Some(InputClass::Mode);
                }
                if self.mode != Mode::Playing {
                    return None;
                }
                for button in DIRECTION_BUTTONS {
                    let Some(dir) = button.direction() else { continue };
                    if buttons.pressed(button) && !dir.is_opposite(self.heading) {
                        debug!("heading {} queued", dir.as_str());
                        self.pending = dir;
                        return Some(InputClass::Direction);
                    }
                }
                None
            }
        }
    }

    /// Advance the snake one cell. Does nothing outside Playing.
    pub fn tick(&mut self, gfx: &mut Compositor) -> TickOutcome {
        if self.mode != Mode::Playing {
            return TickOutcome::Idle;
        }
        self.heading = self.pending;

        let grid = self.config.grid;
        let Some(head) = self.snake.head() else {
            return TickOutcome::Idle;
        };
        let next = match head.step(self.heading, grid.width, grid.height) {
            Some(p) if p.y >= grid.hud_rows => p,
            Some(_) => return self.game_over(Collision::Hud, gfx),
            None => return self.game_over(Collision::Wall, gfx),
        };

        // The tail cell counts as occupied even though it would move away.
        if self.snake.contains(next) {
            return self.game_over(Collision::SelfHit, gfx);
        }

        let eaten = self.foods.find(next);
        if eaten.is_some() {
            self.score += 1;
            if self.score >= self.config.clear_score {
                return self.clear(gfx);
            }
        }

        if let Some(freed) = self.snake.advance(next, eaten.is_some()) {
            gfx.draw_cell(freed.x, freed.y, screens::BACKGROUND);
        }
        gfx.draw_cell(next.x, next.y, screens::SNAKE);

        let outcome = match eaten {
            Some(slot) => {
                self.respawn_food(slot, gfx);
                debug!("ate food in slot {}, score {}", slot, self.score);
                TickOutcome::Ate { slot }
            }
            None => TickOutcome::Moved,
        };
        // Full redraw every tick heals anything drawn over the HUD.
        screens::draw_score_bar(gfx, &grid, self.score);
        outcome
    }

    /// Consistency check over the whole state: snake cells distinct and
    /// playable, food cells distinct, playable and off the snake.
    pub fn is_consistent(&self) -> bool {
        let grid = self.config.grid;
        let cells: Vec<Position> = self.snake.iter().collect();
        let snake_ok = cells.len() <= self.snake.capacity()
            && cells.iter().all(|p| grid.is_playable(*p))
            && cells
                .iter()
                .enumerate()
                .all(|(i, p)| !cells[i + 1..].contains(p));
        let foods = self.foods.positions();
        let foods_ok = foods.iter().enumerate().all(|(i, p)| {
            grid.is_playable(*p) && !self.snake.contains(*p) && !foods[i + 1..].contains(p)
        });
        snake_ok && foods_ok
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
    }

    /// Reset everything and start playing.
    fn start(&mut self, gfx: &mut Compositor) {
        let grid = self.config.grid;
        self.score = 0;
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.snake
            .reset(grid.start_head(), self.heading, self.config.start_length);

        gfx.fill_all(screens::BACKGROUND);
        for p in self.snake.iter() {
            gfx.draw_cell(p.x, p.y, screens::SNAKE);
        }

        self.foods.clear();
        for _ in 0..self.config.food_count {
            let p = self.foods.sample_free(&grid, &self.snake, &mut self.rng);
            self.foods.push(p);
            gfx.draw_cell(p.x, p.y, screens::FOOD);
        }
        screens::draw_score_bar(gfx, &grid, self.score);

        self.sessions += 1;
        self.set_mode(Mode::Playing);
        info!("session {} started", self.sessions);
    }

    fn respawn_food(&mut self, slot: usize, gfx: &mut Compositor) {
        let p = self
            .foods
            .sample_free(&self.config.grid, &self.snake, &mut self.rng);
        self.foods.replace(slot, p);
        gfx.draw_cell(p.x, p.y, screens::FOOD);
    }

    fn game_over(&mut self, collision: Collision, gfx: &mut Compositor) -> TickOutcome {
        self.set_mode(Mode::GameOver);
        screens::draw_game_over(gfx, self.score);
        info!(
            "game over ({} collision), score {}, length {}",
            collision.as_str(),
            self.score,
            self.snake.len()
        );
        TickOutcome::GameOver(collision)
    }

    fn clear(&mut self, gfx: &mut Compositor) -> TickOutcome {
        self.set_mode(Mode::Cleared);
        screens::draw_clear(gfx, self.score);
        info!("cleared with score {}", self.score);
        TickOutcome::Cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pi_snake_render::{DisplaySink, Layout, MemorySink};

    fn compositor() -> Compositor {
        let mut gfx = Compositor::new(Layout::new(240, 240, 10));
        gfx.register(Box::new(MemorySink::new("mem", 240, 240)));
        gfx
    }

    fn press(button: Button) -> ButtonState {
        ButtonState::empty().with(button)
    }

    fn playing() -> (GameEngine, Compositor) {
        let mut gfx = compositor();
        let mut engine = GameEngine::new(GameConfig::default(), 12345).unwrap();
        engine.enter_menu(&mut gfx);
        assert_eq!(
            engine.handle_input(press(Button::Confirm), &mut gfx),
            Some(InputClass::Mode)
        );
        park_foods(&mut engine);
        (engine, gfx)
    }

    /// Move every food slot to the bottom row, away from the start path.
    fn park_foods(engine: &mut GameEngine) {
        let bottom = engine.config.grid.height - 1;
        for slot in 0..engine.foods.len() {
            engine.foods.replace(slot, Position::new(slot as u16, bottom));
        }
    }

    fn place_food(engine: &mut GameEngine, slot: usize, p: Position) {
        engine.foods.replace(slot, p);
    }

    fn cell_color(gfx: &Compositor, p: Position) -> Option<pi_snake_render::Rgb> {
        gfx.sinks()
            .next()
            .and_then(|s| s.read_pixel(p.x * 10 + 5, p.y * 10 + 5))
    }

    #[test]
    fn test_start_resets_session() {
        let (engine, gfx) = playing();
        assert_eq!(engine.mode(), Mode::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.heading(), Direction::Right);
        let segments: Vec<_> = engine.snake().iter().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(12, 12),
                Position::new(11, 12),
                Position::new(10, 12)
            ]
        );
        assert_eq!(engine.foods().len(), 5);
        assert!(engine.is_consistent());
        assert_eq!(
            cell_color(&gfx, Position::new(12, 12)),
            Some(screens::SNAKE.to_rgb())
        );
    }

    #[test]
    fn test_three_ticks_move_right() {
        let (mut engine, mut gfx) = playing();
        for _ in 0..3 {
            assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
        }
        assert_eq!(engine.snake().head(), Some(Position::new(15, 12)));
        assert_eq!(engine.snake().len(), 3);
        assert_eq!(engine.score(), 0);
        assert_eq!(
            cell_color(&gfx, Position::new(12, 12)),
            Some(screens::BACKGROUND.to_rgb())
        );
        assert_eq!(
            cell_color(&gfx, Position::new(15, 12)),
            Some(screens::SNAKE.to_rgb())
        );
    }

    #[test]
    fn test_eating_grows_and_respawns() {
        let (mut engine, mut gfx) = playing();
        place_food(&mut engine, 0, Position::new(13, 12));

        assert_eq!(engine.tick(&mut gfx), TickOutcome::Ate { slot: 0 });
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.foods().len(), 5);
        assert_ne!(engine.foods().get(0), Some(Position::new(13, 12)));
        assert!(engine.is_consistent());
        // Score bar: first HUD cell filled
        assert_eq!(
            cell_color(&gfx, Position::new(0, 0)),
            Some(screens::SCORE_FILL.to_rgb())
        );
    }

    #[test]
    fn test_food_in_last_slot_is_matched() {
        let (mut engine, mut gfx) = playing();
        place_food(&mut engine, 4, Position::new(13, 12));
        assert_eq!(engine.tick(&mut gfx), TickOutcome::Ate { slot: 4 });
    }

    #[test]
    fn test_right_wall_ends_game() {
        let (mut engine, mut gfx) = playing();
        // Head 12 -> 23 takes 11 ticks, the 12th leaves the grid.
        for _ in 0..11 {
            assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
        }
        assert_eq!(engine.snake().head(), Some(Position::new(23, 12)));
        let before: Vec<_> = engine.snake().iter().collect();

        assert_eq!(
            engine.tick(&mut gfx),
            TickOutcome::GameOver(Collision::Wall)
        );
        assert_eq!(engine.mode(), Mode::GameOver);
        let after: Vec<_> = engine.snake().iter().collect();
        assert_eq!(before, after);
        assert_eq!(
            cell_color(&gfx, Position::new(0, 23)),
            Some(screens::GAME_OVER_BG.to_rgb())
        );
    }

    #[test]
    fn test_bottom_wall_ends_game() {
        let (mut engine, mut gfx) = playing();
        assert_eq!(
            engine.handle_input(press(Button::Down), &mut gfx),
            Some(InputClass::Direction)
        );
        // y 12 -> 23 takes 11 ticks, the 12th leaves the grid.
        for _ in 0..11 {
            assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
        }
        assert_eq!(engine.snake().head(), Some(Position::new(12, 23)));
        let body: Vec<_> = engine.snake().iter().collect();
        let foods = engine.foods().positions().to_vec();

        assert_eq!(
            engine.tick(&mut gfx),
            TickOutcome::GameOver(Collision::Wall)
        );
        assert_eq!(engine.mode(), Mode::GameOver);
        assert_eq!(engine.snake().iter().collect::<Vec<_>>(), body);
        assert_eq!(engine.foods().positions(), &foods[..]);
        assert!(engine.is_consistent());
    }

    #[test]
    fn test_hud_row_is_a_wall() {
        let (mut engine, mut gfx) = playing();
        assert_eq!(
            engine.handle_input(press(Button::Up), &mut gfx),
            Some(InputClass::Direction)
        );
        // y 12 -> 1 takes 11 ticks, the 12th enters the HUD.
        for _ in 0..11 {
            assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
        }
        assert_eq!(engine.tick(&mut gfx), TickOutcome::GameOver(Collision::Hud));
    }

    #[test]
    fn test_reversal_is_ignored() {
        for heading in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (mut engine, mut gfx) = playing();
            engine.heading = heading;
            engine.pending = heading;
            let reverse = match heading.opposite() {
                Direction::Up => Button::Up,
                Direction::Down => Button::Down,
                Direction::Left => Button::Left,
                Direction::Right => Button::Right,
            };
            assert_eq!(engine.handle_input(press(reverse), &mut gfx), None);
            assert_eq!(engine.pending_heading(), heading);
        }
    }

    #[test]
    fn test_two_presses_cannot_reverse_between_ticks() {
        let (mut engine, mut gfx) = playing();
        engine.handle_input(press(Button::Up), &mut gfx);
        // Left is not the opposite of Up, but it is of the committed Right.
        assert_eq!(engine.handle_input(press(Button::Left), &mut gfx), None);
        assert_eq!(engine.pending_heading(), Direction::Up);
        engine.tick(&mut gfx);
        assert_eq!(engine.heading(), Direction::Up);
    }

    #[test]
    fn test_reaching_clear_score_wins_without_growing() {
        let (mut engine, mut gfx) = playing();
        engine.score = engine.config().clear_score - 1;
        place_food(&mut engine, 2, Position::new(13, 12));

        assert_eq!(engine.tick(&mut gfx), TickOutcome::Cleared);
        assert_eq!(engine.mode(), Mode::Cleared);
        assert_eq!(engine.score(), engine.config().clear_score);
        assert_eq!(engine.snake().len(), 3);
        assert_eq!(engine.snake().head(), Some(Position::new(12, 12)));
        assert_eq!(
            cell_color(&gfx, Position::new(0, 23)),
            Some(screens::CLEAR_BG.to_rgb())
        );
    }

    #[test]
    fn test_self_collision() {
        let (mut engine, mut gfx) = playing();
        // Grow to length 5 along row 12.
        place_food(&mut engine, 0, Position::new(13, 12));
        assert!(matches!(engine.tick(&mut gfx), TickOutcome::Ate { .. }));
        park_foods(&mut engine);
        place_food(&mut engine, 0, Position::new(14, 12));
        assert!(matches!(engine.tick(&mut gfx), TickOutcome::Ate { .. }));
        park_foods(&mut engine);
        assert_eq!(engine.snake().len(), 5);

        // Curl back into the body: down, left, up.
        engine.handle_input(press(Button::Down), &mut gfx);
        assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
        engine.handle_input(press(Button::Left), &mut gfx);
        assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
        engine.handle_input(press(Button::Up), &mut gfx);
        assert_eq!(
            engine.tick(&mut gfx),
            TickOutcome::GameOver(Collision::SelfHit)
        );
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let (mut engine, mut gfx) = playing();
        assert_eq!(
            engine.handle_input(press(Button::Action1), &mut gfx),
            Some(InputClass::Mode)
        );
        assert_eq!(engine.mode(), Mode::Paused);
        assert_eq!(engine.tick(&mut gfx), TickOutcome::Idle);
        assert_eq!(engine.snake().head(), Some(Position::new(12, 12)));

        // Directions are ignored while paused
        assert_eq!(engine.handle_input(press(Button::Up), &mut gfx), None);

        engine.handle_input(press(Button::Action1), &mut gfx);
        assert_eq!(engine.mode(), Mode::Playing);
        assert_eq!(engine.tick(&mut gfx), TickOutcome::Moved);
    }

    #[test]
    fn test_action1_wins_over_other_presses() {
        let (mut engine, mut gfx) = playing();
        let buttons = press(Button::Action1)
            .with(Button::Action2)
            .with(Button::Up);
        engine.handle_input(buttons, &mut gfx);
        assert_eq!(engine.mode(), Mode::Paused);
        assert_eq!(engine.pending_heading(), Direction::Right);
    }

    #[test]
    fn test_action2_returns_to_menu() {
        let (mut engine, mut gfx) = playing();
        engine.handle_input(press(Button::Action1), &mut gfx);
        engine.handle_input(press(Button::Action2), &mut gfx);
        assert_eq!(engine.mode(), Mode::Menu);
        assert_eq!(
            cell_color(&gfx, Position::new(0, 0)),
            Some(screens::MENU_BG.to_rgb())
        );
    }

    #[test]
    fn test_confirm_after_game_over_goes_to_menu() {
        let (mut engine, mut gfx) = playing();
        while engine.mode() == Mode::Playing {
            engine.tick(&mut gfx);
        }
        assert_eq!(engine.handle_input(press(Button::Up), &mut gfx), None);
        assert_eq!(
            engine.handle_input(press(Button::Confirm), &mut gfx),
            Some(InputClass::Mode)
        );
        assert_eq!(engine.mode(), Mode::Menu);

        engine.handle_input(press(Button::Confirm), &mut gfx);
        assert_eq!(engine.sessions(), 2);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_menu_ignores_everything_but_confirm() {
        let mut gfx = compositor();
        let mut engine = GameEngine::new(GameConfig::default(), 1).unwrap();
        engine.enter_menu(&mut gfx);
        for button in [Button::Up, Button::Action1, Button::Action2] {
            assert_eq!(engine.handle_input(press(button), &mut gfx), None);
            assert_eq!(engine.mode(), Mode::Menu);
        }
        assert_eq!(engine.tick(&mut gfx), TickOutcome::Idle);
    }

    #[test]
    fn test_same_seed_same_food() {
        let (a, _) = {
            let mut gfx = compositor();
            let mut e = GameEngine::new(GameConfig::default(), 77).unwrap();
            e.handle_input(press(Button::Confirm), &mut gfx);
            (e, gfx)
        };
        let (b, _) = {
            let mut gfx = compositor();
            let mut e = GameEngine::new(GameConfig::default(), 77).unwrap();
            e.handle_input(press(Button::Confirm), &mut gfx);
            (e, gfx)
        };
        assert_eq!(a.foods().positions(), b.foods().positions());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.food_count = 0;
        assert!(GameEngine::new(config, 1).is_err());
    }
}
