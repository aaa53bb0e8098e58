//! Buttons that drive the game's screen transitions

use glam::Vec2;

use super::leaderboard::panel_bounds;
use super::{ActionType, Button, ButtonSet, MouseEvent};
use crate::consts::{SHOP_BUTTON_SIZE, SHOP_ORIGIN};
use crate::renderer::{DrawList, Drawable};
use crate::sim::{GameManager, GameState, Rect};

const PLAY_SIZE: Vec2 = Vec2::new(192.0, 96.0);
const CONTROL_SIZE: Vec2 = Vec2::new(192.0, 64.0);
const CLOSE_SIZE: Vec2 = Vec2::new(48.0, 48.0);

/// Menu, leaderboard, shop and game-over buttons. Visibility follows the
/// manager's overlay.
pub struct GameButtons {
    set: ButtonSet<GameManager>,
    play: usize,
    high_scores: usize,
    close_leaderboard: usize,
    buy_upgrade: usize,
    sell_upgrade: usize,
    main_menu: usize,
    play_again: usize,
}

fn buy_next_heart(game: &mut GameManager) {
    game.buy_health_upgrade();
}

fn sell_last_heart(game: &mut GameManager) {
    game.sell_health_upgrade();
}

impl GameButtons {
    pub fn new(screen: Vec2) -> Self {
        let mut set = ButtonSet::new();
        let centered_x = |width: f32| (screen.x - width) / 2.0;

        let play = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(
                Vec2::new(centered_x(PLAY_SIZE.x), screen.y * 0.55),
                PLAY_SIZE,
            ))
            .on(ActionType::LeftClick, GameManager::start_game),
        );
        let high_scores = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(
                Vec2::new(centered_x(CONTROL_SIZE.x), 512.0),
                CONTROL_SIZE,
            ))
            .on(ActionType::LeftClick, GameManager::show_leaderboard),
        );

        let panel = panel_bounds(screen);
        let close_leaderboard = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(
                Vec2::new(panel.right() - CLOSE_SIZE.x / 2.0, panel.top - CLOSE_SIZE.y / 2.0),
                CLOSE_SIZE,
            ))
            .on(ActionType::LeftClick, GameManager::close_leaderboard),
        );

        let shop_row = SHOP_ORIGIN + Vec2::new(0.0, SHOP_BUTTON_SIZE.y * 1.5);
        let sell_upgrade = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(shop_row, SHOP_BUTTON_SIZE))
                .on(ActionType::LeftClick, sell_last_heart),
        );
        let buy_upgrade = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(
                shop_row + Vec2::new(SHOP_BUTTON_SIZE.x * 1.5, 0.0),
                SHOP_BUTTON_SIZE,
            ))
            .on(ActionType::LeftClick, buy_next_heart),
        );

        let row_y = screen.y * 0.7;
        let main_menu = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(
                Vec2::new(screen.x / 2.0 - CONTROL_SIZE.x - 16.0, row_y),
                CONTROL_SIZE,
            ))
            .on(ActionType::LeftClick, GameManager::main_menu),
        );
        let play_again = set.add(
            Button::<GameManager>::new(Rect::from_pos_size(Vec2::new(screen.x / 2.0 + 16.0, row_y), CONTROL_SIZE))
                .on(ActionType::LeftClick, GameManager::play_again),
        );

        Self {
            set,
            play,
            high_scores,
            close_leaderboard,
            buy_upgrade,
            sell_upgrade,
            main_menu,
            play_again,
        }
    }

    /// Match button visibility to what the manager currently shows
    pub fn sync(&mut self, game: &GameManager) {
        let overlay = game.overlay();
        let in_shop = overlay.shop && game.state() == GameState::Upgrade;
        let shown = [
            (self.play, overlay.menu_buttons),
            (self.high_scores, overlay.menu_buttons),
            (self.close_leaderboard, overlay.leaderboard),
            (self.buy_upgrade, in_shop),
            (self.sell_upgrade, in_shop),
            (self.main_menu, overlay.game_over_controls),
            (self.play_again, overlay.game_over_controls),
        ];
        for (idx, visible) in shown {
            if let Some(button) = self.set.get_mut(idx) {
                button.visible = visible;
            }
        }

        let upgrade = game.health_upgrade();
        let affordable = upgrade.price().is_some_and(|price| price <= game.coins());
        if let Some(button) = self.set.get_mut(self.buy_upgrade) {
            button.enabled = affordable;
        }
        if let Some(button) = self.set.get_mut(self.sell_upgrade) {
            button.enabled = upgrade.current_stage() > 0;
        }
    }

    /// Sync, then dispatch this frame's pointer state
    pub fn handle(&mut self, event: &MouseEvent, game: &mut GameManager) -> usize {
        self.sync(game);
        self.set.handle(event, game)
    }

    fn bounds_of(&self, idx: usize) -> Option<Rect> {
        self.set.get(idx).map(Button::bounds)
    }

    pub fn play_button(&self) -> Option<Rect> {
        self.bounds_of(self.play)
    }

    pub fn high_scores_button(&self) -> Option<Rect> {
        self.bounds_of(self.high_scores)
    }

    pub fn close_leaderboard_button(&self) -> Option<Rect> {
        self.bounds_of(self.close_leaderboard)
    }

    pub fn buy_upgrade_button(&self) -> Option<Rect> {
        self.bounds_of(self.buy_upgrade)
    }

    pub fn sell_upgrade_button(&self) -> Option<Rect> {
        self.bounds_of(self.sell_upgrade)
    }

    pub fn play_again_button(&self) -> Option<Rect> {
        self.bounds_of(self.play_again)
    }

    pub fn main_menu_button(&self) -> Option<Rect> {
        self.bounds_of(self.main_menu)
    }
}

impl Drawable for GameButtons {
    fn draw(&self, list: &mut DrawList) {
        self.set.draw(list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::GameState;

    fn click_center(buttons: &mut GameButtons, game: &mut GameManager, rect: Rect) -> usize {
        let center = rect.position() + rect.size() / 2.0;
        let mut event = MouseEvent {
            position: center,
            ..Default::default()
        };
        event.pressed[0] = true;
        buttons.handle(&event, game);
        event.pressed[0] = false;
        event.released[0] = true;
        buttons.handle(&event, game)
    }

    #[test]
    fn test_play_starts_game() {
        let mut game = GameManager::new(Tuning::default()).unwrap();
        let mut buttons = GameButtons::new(Vec2::new(1280.0, 720.0));
        let rect = buttons.play_button().unwrap();
        assert_eq!(click_center(&mut buttons, &mut game, rect), 1);
        assert_eq!(game.state(), GameState::Gameplay);
    }

    #[test]
    fn test_game_over_controls_hidden_until_shown() {
        let mut game = GameManager::new(Tuning::default()).unwrap();
        let mut buttons = GameButtons::new(Vec2::new(1280.0, 720.0));
        game.start_game();
        game.game_over();

        let rect = buttons.main_menu_button().unwrap();
        assert_eq!(click_center(&mut buttons, &mut game, rect), 0);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_high_scores_opens_and_closes_board() {
        let mut game = GameManager::new(Tuning::default()).unwrap();
        let mut buttons = GameButtons::new(Vec2::new(1280.0, 720.0));

        let open = buttons.high_scores_button().unwrap();
        assert_eq!(click_center(&mut buttons, &mut game, open), 1);
        assert!(game.overlay().leaderboard);

        // Play is hidden under the board
        let play = buttons.play_button().unwrap();
        assert_eq!(click_center(&mut buttons, &mut game, play), 0);

        let close = buttons.close_leaderboard_button().unwrap();
        assert_eq!(click_center(&mut buttons, &mut game, close), 1);
        assert!(!game.overlay().leaderboard);
        assert_eq!(game.state(), GameState::MainMenu);
    }

    #[test]
    fn test_shop_buttons_follow_wallet() {
        let tuning = Tuning {
            health_upgrade_prices: vec![0, 1],
            ..Default::default()
        };
        let mut game = GameManager::new(tuning).unwrap();
        let mut buttons = GameButtons::new(Vec2::new(1280.0, 720.0));
        let buy = buttons.buy_upgrade_button().unwrap();
        let sell = buttons.sell_upgrade_button().unwrap();

        // Hidden outside the shop
        assert_eq!(click_center(&mut buttons, &mut game, buy), 0);

        game.start_game();
        game.start_upgrades();
        assert_eq!(click_center(&mut buttons, &mut game, sell), 0);
        assert_eq!(click_center(&mut buttons, &mut game, buy), 1);
        assert_eq!(game.health().max_health(), 6);

        // The second stage costs a coin the wallet does not have
        assert_eq!(click_center(&mut buttons, &mut game, buy), 0);
        assert_eq!(game.health().max_health(), 6);

        assert_eq!(click_center(&mut buttons, &mut game, sell), 1);
        assert_eq!(game.health().max_health(), 5);
        assert_eq!(game.health_upgrade().current_stage(), 0);
    }
}
