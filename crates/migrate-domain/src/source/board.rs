use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::card::Card;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub id_organization: Option<String>,
    #[serde(default)]
    pub lists: Vec<List>,
    /// Cards fetched board-wide rather than per list; distributed into
    /// `lists` by [`Board::assemble_lists`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Board {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Moves board-level cards into the list named by their `idList`,
    /// keeping source order. Cards pointing at an unknown list are dropped.
    /// Returns the number of dropped cards.
    pub fn assemble_lists(&mut self) -> usize {
        if self.cards.is_empty() {
            return 0;
        }

        let positions: HashMap<String, usize> = self
            .lists
            .iter()
            .enumerate()
            .map(|(idx, list)| (list.id.clone(), idx))
            .collect();

        let mut dropped = 0;
        for card in std::mem::take(&mut self.cards) {
            match positions.get(&card.id_list) {
                Some(&idx) => self.lists[idx].cards.push(card),
                None => {
                    tracing::warn!(
                        "Card {} on board {} references missing list {}, skipping",
                        card.id,
                        self.name,
                        card.id_list
                    );
                    dropped += 1;
                }
            }
        }
        dropped
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|list| list.cards.len()).sum()
    }
}

impl List {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}
