//! Transient UI effects (clear labels, spin labels, all-clear)
//!
//! Purely advisory: nothing here feeds back into scoring or timing.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::EffectKind;

/// Maximum number of effects kept alive at once; the oldest is dropped first
pub const MAX_EFFECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub label: &'static str,
    pub lifetime_ms: u32,
    pub remaining_ms: u32,
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        let lifetime_ms = kind.lifetime_ms();
        Self {
            kind,
            label: kind.label(),
            lifetime_ms,
            remaining_ms: lifetime_ms,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    items: ArrayVec<Effect, MAX_EFFECTS>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: EffectKind) {
        if self.items.is_full() {
            self.items.remove(0);
        }
        self.items.push(Effect::new(kind));
    }

    /// Count down lifetimes and drop expired effects
    pub fn age(&mut self, elapsed_ms: u32) {
        for effect in &mut self.items {
            effect.remaining_ms = effect.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.items.retain(|effect| effect.remaining_ms > 0);
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
