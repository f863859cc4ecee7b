use std::collections::HashMap;

use crate::match_file::traits::Player;

/// A per-player running record store local to one aggregation call.
///
/// Entries keep the order in which players were first seen, so the stable
/// sorts applied by callers leave ties in delivery order.
#[derive(Debug, Clone)]
pub struct PlayerMap<T> {
    index: HashMap<Player, usize>,
    entries: Vec<(Player, T)>,
}

impl<T> Default for PlayerMap<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> PlayerMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_or_insert_with<F: FnOnce() -> T>(&mut self, player: &str, f: F) -> &mut T {
        let i = match self.index.get(player) {
            Some(i) => *i,
            None => {
                let i = self.entries.len();
                self.entries.push((player.to_string(), f()));
                self.index.insert(player.to_string(), i);
                i
            }
        };
        &mut self.entries[i].1
    }

    pub fn get(&self, player: &str) -> Option<&T> {
        self.index.get(player).map(|i| &self.entries[*i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the map, yielding entries in first-seen order.
    pub fn into_entries(self) -> impl Iterator<Item = (Player, T)> {
        self.entries.into_iter()
    }
}

impl<T: Default> PlayerMap<T> {
    pub fn entry_or_default(&mut self, player: &str) -> &mut T {
        self.entry_or_insert_with(player, T::default)
    }
}
