//! Identifier generation for new subjects, tables and slots.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh record ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Ids of the form `<unix millis>-<9 random base36 chars>`, e.g.
/// `1718000000000-k3j9x0a1b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut rng = rand::rng();
        let suffix: String = (0..9)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();
        format!("{}-{}", Utc::now().timestamp_millis(), suffix)
    }
}

/// Deterministic ids `<prefix>-1`, `<prefix>-2`, ... for tests and replays.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
