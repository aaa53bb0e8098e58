//! Full Throttle entry point
//!
//! Native headless driver: plays one run on autopilot through the same input,
//! UI and draw paths a windowed front end would use, types a name on the
//! letter reels, then opens the leaderboard from the main menu.
//!
//! Usage: `full-throttle [tuning.json] [max-seconds]`

use glam::Vec2;

use full_throttle::highscores::{DEFAULT_PATH, HighScores};
use full_throttle::platform::{FrameClock, InputState, Key, MouseButton};
use full_throttle::renderer::{DrawList, Drawable};
use full_throttle::sim::{GameManager, GameState, Rect, Road, lanes_overlapping};
use full_throttle::ui::{GameButtons, Leaderboard, NameEntry};
use full_throttle::{ConfigError, Tuning};

/// Simulated frame length
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_MAX_SECONDS: f32 = 300.0;
/// Name the autopilot signs its runs with
const AUTOPILOT_NAME: &str = "BOT";

struct Game {
    manager: GameManager,
    buttons: GameButtons,
    leaderboard: Leaderboard,
    name_entry: NameEntry,
    scores: HighScores,
    input: InputState,
    draw_list: DrawList,
    viewport: Rect,
    frames: u64,
}

impl Game {
    fn new(tuning: Tuning, scores: HighScores) -> Result<Self, ConfigError> {
        let screen = Vec2::new(tuning.window_width, tuning.window_height);
        Ok(Self {
            manager: GameManager::new(tuning)?,
            buttons: GameButtons::new(screen),
            leaderboard: Leaderboard::new(screen),
            name_entry: NameEntry::new(Vec2::new(screen.x / 2.0 - 96.0, screen.y * 0.45)),
            scores,
            input: InputState::new(),
            draw_list: DrawList::new(),
            viewport: Rect::from_pos_size(Vec2::ZERO, screen),
            frames: 0,
        })
    }

    /// One frame: UI, simulation, draw
    fn frame(&mut self, dt: f32) {
        let event = self.input.mouse_event();
        self.buttons.handle(&event, &mut self.manager);
        if self.input.was_pressed(Key::Escape) {
            self.manager.close_leaderboard();
        }

        let overlay = self.manager.overlay();
        if overlay.name_input && overlay.submit_enabled && self.name_entry.feed(&self.input) {
            let name = self.name_entry.name();
            self.manager.submit_score(&name, &mut self.scores);
        }

        let tick = self.input.tick_input();
        self.manager.update(&tick, &self.viewport, dt);
        self.leaderboard.sync(&self.manager, &self.scores);

        self.draw_list.clear();
        self.manager.draw(&mut self.draw_list);
        if self.manager.overlay().name_input {
            self.name_entry.draw(&mut self.draw_list);
        }
        self.leaderboard.draw(&mut self.draw_list);
        self.buttons.draw(&mut self.draw_list);

        self.input.end_frame();
        self.frames += 1;
    }

    /// Press and release `key` across two frames
    fn tap(&mut self, key: Key) {
        self.input.key_down(key);
        self.frame(FRAME_DT);
        self.input.key_up(key);
        self.frame(FRAME_DT);
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.input.char_typed(c);
        }
        self.frame(FRAME_DT);
    }

    /// Press and release the left button over `target` across two frames
    fn click(&mut self, target: Option<Rect>) {
        let Some(rect) = target else {
            return;
        };
        self.input.mouse_moved(rect.position() + rect.size() / 2.0);
        self.input.mouse_down(MouseButton::Left);
        self.frame(FRAME_DT);
        self.input.mouse_up(MouseButton::Left);
        self.frame(FRAME_DT);
    }

    /// Steer toward the lane whose nearest obstacle ahead is furthest away
    fn steer(&mut self) {
        let road = self.manager.road();
        let player = self.manager.player().bounds();

        let clearance = |lane: usize| {
            road.obstacles()[lane]
                .iter()
                .map(|o| o.pos.x + o.size().x - player.left)
                .filter(|&gap| gap > 0.0)
                .fold(f32::INFINITY, f32::min)
        };
        let best = (0..road.lanes())
            .max_by(|&a, &b| clearance(a).total_cmp(&clearance(b)))
            .unwrap_or(0);

        let target_y = road.lane_pos(best) + road.lane_height() / 2.0;
        let center_y = player.top + player.height / 2.0;
        let dash = clearance_at(road, &player) < road.tile_width() * 2.0;

        for key in [Key::Up, Key::Down, Key::Space] {
            self.input.key_up(key);
        }
        if center_y > target_y + 4.0 {
            self.input.key_down(Key::Up);
        } else if center_y < target_y - 4.0 {
            self.input.key_down(Key::Down);
        }
        if dash {
            self.input.key_down(Key::Space);
        }
    }
}

/// Distance to the closest obstacle ahead in the player's current lanes
fn clearance_at(road: &Road, player: &Rect) -> f32 {
    let lanes = lanes_overlapping(road.top_edge(), road.lane_height(), road.lanes(), player);
    road.obstacles()[lanes]
        .iter()
        .flatten()
        .map(|o| o.pos.x - player.right())
        .filter(|&gap| gap > -player.width)
        .fold(f32::INFINITY, f32::min)
}

fn run(tuning_path: Option<String>, max_seconds: f32) -> Result<(), ConfigError> {
    let tuning = match tuning_path {
        Some(path) => Tuning::load(path)?,
        None => Tuning::load_or_default("tuning.json")?,
    };
    let mut game = Game::new(tuning, HighScores::open(DEFAULT_PATH))?;
    let mut clock = FrameClock::new();

    // Let the title screen scroll for a moment, then press play
    for _ in 0..60 {
        game.frame(FRAME_DT);
    }
    let play = game.buttons.play_button();
    game.click(play);
    if game.manager.state() != GameState::Gameplay {
        log::warn!("Play button did not start a run, starting directly");
        game.manager.start_game();
    }

    let mut simulated = 0.0;
    while game.manager.state() == GameState::Gameplay && simulated < max_seconds {
        game.steer();
        game.frame(FRAME_DT);
        simulated += FRAME_DT;
        clock.tick();
    }

    if game.manager.state() == GameState::Gameplay {
        log::info!("Time limit reached");
        game.manager.game_over();
    }
    while !game.manager.overlay().submit_enabled {
        game.frame(FRAME_DT);
    }
    let (score, coins) = (game.manager.score(), game.manager.coins());
    match game.scores.potential_rank(score as u64) {
        Some(rank) => log::info!("Score {:.0} would place #{}", score, rank),
        None => log::info!("Score {:.0} misses the board (best {:?})", score, game.scores.top_score()),
    }
    game.name_entry.reset();
    game.type_text(AUTOPILOT_NAME);
    game.tap(Key::Enter);
    if game.manager.overlay().submit_enabled {
        log::warn!("Name entry did not submit the score");
    }

    let menu = game.buttons.main_menu_button();
    game.click(menu);
    let high_scores = game.buttons.high_scores_button();
    game.click(high_scores);

    let wall = clock.elapsed().as_secs_f32();
    log::info!(
        "{} frames ({:.1}s simulated) in {:.2}s, last draw had {} quads",
        game.frames,
        simulated,
        wall,
        game.draw_list.quad_count()
    );

    println!("Score {:.0}  coins {}  time {:.1}s", score, coins, simulated);
    println!("--- High scores ---");
    let crowns = game.leaderboard.crowns();
    for (i, entry) in game.leaderboard.rows().iter().enumerate() {
        let crown = match crowns.get(i).copied().flatten() {
            Some(place) => format!("*{}", place),
            None => String::new(),
        };
        println!("{:>2}. {:<12} {:>8} {}", i + 1, entry.name, entry.score, crown);
    }
    game.tap(Key::Escape);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Full Throttle (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning_path = args.next();
    let max_seconds = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_SECONDS);

    if let Err(e) = run(tuning_path, max_seconds) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
