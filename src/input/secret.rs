//! Secret key sequences: the Konami code and the admin chord.

use std::collections::VecDeque;

use super::{Key, KeyPress};

/// Bound on the trailing key buffer; oldest entries are evicted first.
pub const MAX_SEQUENCE: usize = 10;

/// The Konami code as concatenated lowercase key identifiers:
/// up up down down left right left right, then the literal `b` `a`.
const KONAMI: &str = "arrowuparrowuparrowdownarrowdownarrowleftarrowrightarrowleftarrowrightba";

/// Actions triggered by a single observed key press. The two detections
/// are independent, not mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    pub konami: bool,
    pub admin_chord: bool,
}

pub struct SecretDetector {
    buffer: VecDeque<String>,
}

impl SecretDetector {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_SEQUENCE),
        }
    }

    /// Observe one key press. Must be called for every event, before any
    /// suspension check — the sequences are global.
    pub fn observe(&mut self, press: &KeyPress) -> Observation {
        self.buffer.push_back(press.key.token());
        if self.buffer.len() > MAX_SEQUENCE {
            self.buffer.pop_front();
        }

        let mut observation = Observation::default();

        let joined = self
            .buffer
            .iter()
            .map(String::as_str)
            .collect::<String>()
            .to_lowercase();
        if joined.contains(KONAMI) {
            observation.konami = true;
            self.buffer.clear();
        }

        // The chord does not clear the sequence buffer.
        if press.ctrl && press.alt && press.key == Key::Char('a') {
            observation.admin_chord = true;
        }

        observation
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_konami_triggers_once_and_clears_buffer() {
        let mut detector = SecretDetector::new();
        let mut hits = 0;
        for key in konami_keys() {
            if detector.observe(&KeyPress::plain(key)).konami {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert!(detector.is_empty());
    }

    #[test]
    fn test_konami_matches_case_insensitively() {
        let mut detector = SecretDetector::new();
        let mut keys = konami_keys();
        keys[8] = Key::Char('B');
        keys[9] = Key::Char('A');
        let mut hits = 0;
        for key in keys {
            if detector.observe(&KeyPress::plain(key)).konami {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_interrupted_sequence_does_not_trigger() {
        let mut detector = SecretDetector::new();
        let mut keys = konami_keys();
        keys.insert(4, Key::Char('x'));
        for key in keys {
            assert!(!detector.observe(&KeyPress::plain(key)).konami);
        }
    }

    #[test]
    fn test_buffer_never_exceeds_max() {
        let mut detector = SecretDetector::new();
        for _ in 0..MAX_SEQUENCE {
            detector.observe(&KeyPress::plain(Key::Char('x')));
        }
        assert_eq!(detector.len(), MAX_SEQUENCE);
        detector.observe(&KeyPress::plain(Key::Char('y')));
        assert_eq!(detector.len(), MAX_SEQUENCE);
    }

    #[test]
    fn test_admin_chord_requires_both_modifiers() {
        let mut detector = SecretDetector::new();

        let chord = KeyPress {
            key: Key::Char('a'),
            ctrl: true,
            alt: true,
            shift: false,
        };
        assert!(detector.observe(&chord).admin_chord);

        let ctrl_only = KeyPress {
            key: Key::Char('a'),
            ctrl: true,
            alt: false,
            shift: false,
        };
        assert!(!detector.observe(&ctrl_only).admin_chord);
        assert!(!detector.observe(&KeyPress::plain(Key::Char('a'))).admin_chord);
    }

    #[test]
    fn test_admin_chord_keeps_buffer() {
        let mut detector = SecretDetector::new();
        detector.observe(&KeyPress::plain(Key::Up));
        detector.observe(&KeyPress::plain(Key::Up));

        let chord = KeyPress {
            key: Key::Char('a'),
            ctrl: true,
            alt: true,
            shift: false,
        };
        let observation = detector.observe(&chord);
        assert!(observation.admin_chord);
        assert_eq!(detector.len(), 3);
    }
}
