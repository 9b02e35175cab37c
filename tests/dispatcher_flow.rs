//! End-to-end input dispatcher behavior against in-memory fakes of the
//! four collaborator interfaces.

use std::path::PathBuf;
use std::time::Duration;

use arcadr::audio::Cue;
use arcadr::input::dispatcher::{
    Catalog, Dispatcher, Feedback, Orchestrator, Outcome, Shell, Surface,
};
use arcadr::input::{Key, KeyPress};
use arcadr::registry::{Game, GameId};
use arcadr::ui::{ModalKind, NoticeKind};

struct FakeCatalog {
    games: Vec<Game>,
}

impl FakeCatalog {
    fn with_games(count: usize) -> Self {
        let games = (0..count)
            .map(|i| {
                Game::new(
                    i as GameId + 1,
                    &format!("Game {}", i + 1),
                    PathBuf::from(format!("/opt/games/game{}", i + 1)),
                )
            })
            .collect();
        Self { games }
    }
}

impl Catalog for FakeCatalog {
    fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    fn games(&self) -> &[Game] {
        &self.games
    }
}

#[derive(Default)]
struct FakeSurface {
    modal: bool,
    opened: Vec<ModalKind>,
    close_all_calls: usize,
    notices: Vec<(String, NoticeKind, Duration)>,
    loading: bool,
    flashes: Vec<Duration>,
    scrolls: Vec<usize>,
    columns: Option<usize>,
    width: Option<u16>,
}

impl Surface for FakeSurface {
    fn modal_open(&self) -> bool {
        self.modal
    }

    fn open_modal(&mut self, kind: ModalKind) {
        self.modal = true;
        self.opened.push(kind);
    }

    fn close_all_modals(&mut self) {
        self.modal = false;
        self.close_all_calls += 1;
    }

    fn notify(&mut self, title: &str, _body: &str, kind: NoticeKind, duration: Duration) {
        self.notices.push((title.to_string(), kind, duration));
    }

    fn show_loading(&mut self) {
        self.loading = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn flash(&mut self, duration: Duration) {
        self.flashes.push(duration);
    }

    fn scroll_to(&mut self, index: usize) {
        self.scrolls.push(index);
    }

    fn grid_columns(&self) -> Option<usize> {
        self.columns
    }

    fn width(&self) -> Option<u16> {
        self.width
    }
}

#[derive(Default)]
struct FakeAudio {
    cues: Vec<Cue>,
    volume: Option<f32>,
}

impl Feedback for FakeAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = Some(volume);
    }
}

#[derive(Default)]
struct FakeLauncher {
    embedded: bool,
    minimize_calls: usize,
    selected: Vec<GameId>,
}

impl Orchestrator for FakeLauncher {
    fn embedded_active(&self) -> bool {
        self.embedded
    }

    fn minimize_embedded(&mut self) {
        self.minimize_calls += 1;
    }

    fn select_game(&mut self, game: &Game) {
        self.selected.push(game.id);
    }
}

struct Rig {
    catalog: FakeCatalog,
    surface: FakeSurface,
    audio: FakeAudio,
    launcher: FakeLauncher,
    dispatcher: Dispatcher,
}

impl Rig {
    fn new(game_count: usize) -> Self {
        let mut surface = FakeSurface::default();
        surface.columns = Some(4);
        Self {
            catalog: FakeCatalog::with_games(game_count),
            surface,
            audio: FakeAudio::default(),
            launcher: FakeLauncher::default(),
            dispatcher: Dispatcher::new(),
        }
    }

    fn press(&mut self, press: &KeyPress) -> Outcome {
        let mut shell = Shell {
            catalog: &self.catalog,
            surface: &mut self.surface,
            audio: &mut self.audio,
            launcher: &mut self.launcher,
        };
        self.dispatcher.handle_key(press, &mut shell)
    }

    fn key(&mut self, key: Key) -> Outcome {
        self.press(&KeyPress::plain(key))
    }
}

fn konami_keys() -> Vec<Key> {
    vec![
        Key::Up,
        Key::Up,
        Key::Down,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Left,
        Key::Right,
        Key::Char('b'),
        Key::Char('a'),
    ]
}

fn success_count(cues: &[Cue]) -> usize {
    cues.iter().filter(|c| **c == Cue::Success).count()
}

#[test]
fn test_left_then_right_returns_to_start() {
    for count in [1, 4, 8, 9] {
        for start in 0..count {
            let mut rig = Rig::new(count);
            rig.dispatcher.select(Some(start));

            rig.key(Key::Left);
            rig.key(Key::Right);
            assert_eq!(rig.dispatcher.selected(), Some(start));

            rig.key(Key::Right);
            rig.key(Key::Left);
            assert_eq!(rig.dispatcher.selected(), Some(start));
        }
    }
}

#[test]
fn test_down_wraps_in_two_row_grid() {
    let mut rig = Rig::new(8);
    rig.dispatcher.select(Some(0));

    assert_eq!(rig.key(Key::Down), Outcome::Consumed);
    assert_eq!(rig.dispatcher.selected(), Some(4));

    rig.key(Key::Down);
    assert_eq!(rig.dispatcher.selected(), Some(0));
}

#[test]
fn test_empty_grid_navigation_is_a_noop() {
    let mut rig = Rig::new(0);
    for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
        assert_eq!(rig.key(key), Outcome::Consumed);
    }
    assert_eq!(rig.dispatcher.selected(), None);
    assert!(rig.surface.scrolls.is_empty());
    assert!(rig.audio.cues.is_empty());
}

#[test]
fn test_navigation_side_effects_are_atomic() {
    let mut rig = Rig::new(8);
    rig.key(Key::Right);
    assert_eq!(rig.dispatcher.selected(), Some(0));
    assert_eq!(rig.surface.scrolls, vec![0]);
    assert_eq!(rig.audio.cues, vec![Cue::Hover]);
}

#[test]
fn test_konami_sequence_triggers_exactly_once() {
    let mut rig = Rig::new(8);
    for key in konami_keys() {
        rig.key(key);
    }

    assert_eq!(success_count(&rig.audio.cues), 1);
    assert_eq!(rig.audio.volume, Some(1.0));
    assert_eq!(rig.surface.flashes, vec![Duration::from_millis(2000)]);
    assert_eq!(rig.surface.notices.len(), 1);
    let (title, kind, duration) = &rig.surface.notices[0];
    assert!(title.contains("KONAMI"));
    assert_eq!(*kind, NoticeKind::Success);
    assert_eq!(*duration, Duration::from_millis(5000));

    // Buffer is empty immediately after the match.
    assert_eq!(rig.dispatcher.sequence_len(), 0);
}

#[test]
fn test_konami_still_fires_while_modal_open() {
    let mut rig = Rig::new(4);
    rig.surface.modal = true;

    for key in konami_keys() {
        assert_eq!(rig.key(key), Outcome::Passed);
    }

    assert_eq!(success_count(&rig.audio.cues), 1);
    assert_eq!(rig.audio.volume, Some(1.0));
    // Navigation stayed suspended the whole time.
    assert!(rig.surface.scrolls.is_empty());
}

#[test]
fn test_sequence_buffer_is_bounded() {
    let mut rig = Rig::new(0);
    for ch in "abcdefghij".chars() {
        rig.key(Key::Char(ch));
    }
    assert_eq!(rig.dispatcher.sequence_len(), 10);

    rig.key(Key::Char('z'));
    assert_eq!(rig.dispatcher.sequence_len(), 10);
}

#[test]
fn test_admin_chord_opens_password_prompt_once() {
    let mut rig = Rig::new(4);
    rig.key(Key::Up);
    rig.key(Key::Up);
    let before = rig.dispatcher.sequence_len();

    let chord = KeyPress {
        key: Key::Char('a'),
        ctrl: true,
        alt: true,
        shift: false,
    };
    assert_eq!(rig.press(&chord), Outcome::Consumed);

    assert_eq!(rig.surface.opened, vec![ModalKind::PasswordAdmin]);
    assert!(rig.audio.cues.contains(&Cue::Click));
    // The chord does not clear the sequence buffer.
    assert_eq!(rig.dispatcher.sequence_len(), before + 1);
    // The consumed event never reaches navigation.
    assert_eq!(rig.surface.scrolls.len(), 2);
}

#[test]
fn test_escape_with_embedded_game_minimizes_without_termination() {
    let mut rig = Rig::new(4);
    rig.launcher.embedded = true;
    rig.surface.modal = true;

    assert_eq!(rig.key(Key::Escape), Outcome::Consumed);
    assert_eq!(rig.surface.close_all_calls, 1);
    assert_eq!(rig.launcher.minimize_calls, 1);
    // Never a launch or terminate request.
    assert!(rig.launcher.selected.is_empty());
}

#[test]
fn test_escape_without_embedded_only_closes_modals() {
    let mut rig = Rig::new(4);
    assert_eq!(rig.key(Key::Escape), Outcome::Consumed);
    assert_eq!(rig.surface.close_all_calls, 1);
    assert_eq!(rig.launcher.minimize_calls, 0);
}

#[test]
fn test_navigation_suspended_while_embedded() {
    let mut rig = Rig::new(4);
    rig.launcher.embedded = true;

    assert_eq!(rig.key(Key::Right), Outcome::Passed);
    assert_eq!(rig.key(Key::Enter), Outcome::Passed);
    assert_eq!(rig.dispatcher.selected(), None);
    assert!(rig.surface.scrolls.is_empty());
    assert!(rig.launcher.selected.is_empty());
}

#[test]
fn test_navigation_suspended_while_modal_open() {
    let mut rig = Rig::new(4);
    rig.surface.modal = true;

    assert_eq!(rig.key(Key::Right), Outcome::Passed);
    assert_eq!(rig.dispatcher.selected(), None);
}

#[test]
fn test_enter_activates_selected_card() {
    let mut rig = Rig::new(3);
    rig.dispatcher.select(Some(1));

    assert_eq!(rig.key(Key::Enter), Outcome::Consumed);
    assert_eq!(rig.launcher.selected, vec![2]);
}

#[test]
fn test_enter_without_selection_does_nothing() {
    let mut rig = Rig::new(3);
    assert_eq!(rig.key(Key::Enter), Outcome::Consumed);
    assert!(rig.launcher.selected.is_empty());
}

#[test]
fn test_debug_toggle_consumes_event() {
    let mut rig = Rig::new(3);
    let chord = KeyPress {
        key: Key::Char('D'),
        ctrl: true,
        alt: false,
        shift: true,
    };
    assert_eq!(rig.press(&chord), Outcome::Consumed);
    assert!(rig.dispatcher.debug_overlay().visible());

    rig.press(&chord);
    assert!(!rig.dispatcher.debug_overlay().visible());
}

#[test]
fn test_columns_fall_back_to_width_estimate() {
    let mut rig = Rig::new(8);
    rig.surface.columns = None;
    // Two cards per row fit this width.
    rig.surface.width = Some(64);
    rig.dispatcher.select(Some(0));

    rig.key(Key::Down);
    assert_eq!(rig.dispatcher.selected(), Some(2));
}
