//! Konami code detection over a rolling key buffer

use std::collections::VecDeque;

pub const SEQUENCE: [&str; 10] = [
    "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight", "b", "a",
];

/// The last ten key names pressed
#[derive(Debug, Clone, Default)]
pub struct KonamiBuffer {
    keys: VecDeque<String>,
}

impl KonamiBuffer {
    pub fn new() -> Self { Self::default() }

    /// Record a key; true when the buffer now equals the sequence
    pub fn push(&mut self, key: &str) -> bool {
        self.keys.push_back(key.to_string());
        while self.keys.len() > SEQUENCE.len() {
            self.keys.pop_front();
        }
        self.matches()
    }

    pub fn matches(&self) -> bool {
        self.keys.len() == SEQUENCE.len() && self.keys.iter().zip(SEQUENCE).all(|(k, s)| k == s)
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_after_full_sequence() {
        let mut buffer = KonamiBuffer::new();
        let hits: Vec<bool> = SEQUENCE.iter().map(|k| buffer.push(k)).collect();
        assert_eq!(hits.iter().filter(|h| **h).count(), 1);
        assert!(hits[9]);
    }

    #[test]
    fn noise_before_sequence_is_dropped() {
        let mut buffer = KonamiBuffer::new();
        for key in ["x", "ArrowUp", "Enter"] {
            buffer.push(key);
        }
        let matched = SEQUENCE.iter().map(|k| buffer.push(k)).last();
        assert_eq!(matched, Some(true));
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn case_sensitive_letters() {
        let mut buffer = KonamiBuffer::new();
        for key in &SEQUENCE[..8] {
            buffer.push(key);
        }
        buffer.push("B");
        assert!(!buffer.push("A"));
    }
}
