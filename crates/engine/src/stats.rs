//! Session statistics gathered from the event feed

use serde::Serialize;

use crate::types::{GameEnd, GameEvent, PieceKind, TSpinKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub pieces: u32,
    pub holds: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    /// Clears of four or more rows
    pub quads: u32,
    pub total_spins: u32,
    pub mini_spins: u32,
    /// Label of the most recent T-spin
    pub last_spin: Option<&'static str>,
    pub all_clears: u32,
    pub best_combo: u32,
    pub back_to_backs: u32,
    /// Sum of clear scores and drop points seen in the feed
    pub points: u32,
    pub end: Option<GameEnd>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Spawned { .. } | GameEvent::LevelUp { .. } => {}
            GameEvent::Held { .. } => self.holds += 1,
            GameEvent::Locked { drop_points, .. } => {
                self.pieces += 1;
                self.points = self.points.saturating_add(drop_points);
            }
            GameEvent::LinesCleared {
                count,
                score,
                combo,
                back_to_back,
            } => {
                match count {
                    0 => {}
                    1 => self.singles += 1,
                    2 => self.doubles += 1,
                    3 => self.triples += 1,
                    _ => self.quads += 1,
                }
                self.best_combo = self.best_combo.max(combo);
                if back_to_back {
                    self.back_to_backs += 1;
                }
                self.points = self.points.saturating_add(score);
            }
            GameEvent::Spin {
                kind: PieceKind::T,
                tspin,
            } => {
                self.total_spins += 1;
                if tspin == TSpinKind::Mini {
                    self.mini_spins += 1;
                }
                self.last_spin = match tspin {
                    TSpinKind::Full => Some("T-Spin"),
                    TSpinKind::Mini => Some("T-Spin Mini"),
                    TSpinKind::None => self.last_spin,
                };
            }
            GameEvent::Spin { .. } => self.total_spins += 1,
            GameEvent::AllClear => self.all_clears += 1,
            GameEvent::GameEnded { end } => self.end = Some(end),
        }
    }

    pub fn observe_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.observe(event);
        }
    }

    pub fn total_clears(&self) -> u32 {
        self.singles + self.doubles + self.triples + self.quads
    }
}
