// src/games/puzzle.rs
//! 動物パズル 🧩 3×3 のピースを、同じ番号のマスにはめていく。

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::components::{AcceptedType, DraggableItem, DropZone, ItemId, ZoneId};
use crate::logic::animals::{self, ANIMALS};
use super::{Completion, Game, GameBoard, GameKind, GameProgress, Placement};

pub const GRID_SIZE: usize = 3;
pub const PIECE_COUNT: usize = GRID_SIZE * GRID_SIZE;

fn slot_type(slot: usize) -> String {
    format!("slot-{}", slot + 1)
}

pub struct PuzzleGame {
    points_per_piece: u32,
    animal: &'static str,
    filled: [bool; PIECE_COUNT],
}

impl PuzzleGame {
    pub fn new(points_per_piece: u32) -> Self {
        Self { points_per_piece, animal: ANIMALS[0].name, filled: [false; PIECE_COUNT] }
    }

    pub fn animal(&self) -> &'static str {
        self.animal
    }

    /// まだ埋まっていない最初のマス
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.filled.iter().position(|filled| !filled)
    }

    fn slot_of(zone: &DropZone) -> Option<usize> {
        zone.accepted
            .as_str()
            .strip_prefix("slot-")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .filter(|slot| *slot < PIECE_COUNT)
    }
}

impl Game for PuzzleGame {
    fn kind(&self) -> GameKind {
        GameKind::Puzzle
    }

    fn start(&mut self, rng: &mut dyn RngCore) -> GameBoard {
        self.animal = ANIMALS.choose(rng).map_or(ANIMALS[0].name, |entry| entry.name);
        self.filled = [false; PIECE_COUNT];

        let emoji = animals::emoji_for(self.animal);
        let zones = (0..PIECE_COUNT)
            .map(|slot| DropZone::new(ZoneId(slot), (slot + 1).to_string(), AcceptedType::only(slot_type(slot))))
            .collect();
        let mut items: Vec<DraggableItem> = (0..PIECE_COUNT)
            .map(|slot| {
                DraggableItem::new(ItemId(slot), slot_type(slot), format!("Piece {}", slot + 1)).with_emoji(emoji)
            })
            .collect();
        items.shuffle(rng);

        GameBoard {
            title: "🧩 Animal Puzzle! 🧩".to_string(),
            prompt: Some(format!("Build the {}!", self.animal)),
            featured_animal: Some(self.animal.to_string()),
            items,
            zones,
        }
    }

    fn on_item_placed(&mut self, _item: &DraggableItem, zone: &DropZone, _rng: &mut dyn RngCore) -> Placement {
        if let Some(slot) = Self::slot_of(zone) {
            self.filled[slot] = true;
        }
        let placement = Placement::scored(self.points_per_piece);
        if self.is_complete() {
            placement.with_progress(GameProgress::Complete(Completion {
                headline: "🧩 Puzzle Complete! 🧩".to_string(),
                detail: format!("You built the {}!", self.animal),
                stars: 3,
            }))
        } else {
            placement
        }
    }

    fn is_complete(&self) -> bool {
        self.filled.iter().all(|filled| *filled)
    }

    fn progress_label(&self) -> String {
        let done = self.filled.iter().filter(|filled| **filled).count();
        format!("Pieces {}/{}", done, PIECE_COUNT)
    }

    fn hint(&self) -> Option<String> {
        self.first_empty_slot()
            .map(|slot| format!("💡 Piece {} goes in spot {}", slot + 1, slot + 1))
    }
}
