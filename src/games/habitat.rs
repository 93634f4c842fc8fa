// src/games/habitat.rs
//! すみか合わせゲーム 🏠 動物をサバンナ / 森 / 海 / ジャングルに連れていこう！

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::components::{AcceptedType, DraggableItem, DropZone, ItemId, ZoneId};
use crate::logic::animals;
use super::{capitalize, Completion, Game, GameBoard, GameKind, GameProgress, Placement};

/// すみかと、そこに住む動物たち
pub const HABITATS: &[(&str, &[&str])] = &[
    ("savanna", &["Lion", "Elephant", "Giraffe", "Zebra", "Rhino", "Cheetah"]),
    ("forest", &["Bear", "Wolf", "Fox", "Leopard", "Koala", "Owl", "Squirrel", "Hedgehog"]),
    ("ocean", &["Dolphin", "Shark", "Octopus", "Penguin", "Turtle"]),
    ("jungle", &["Monkey", "Gorilla", "Tiger", "Parrot"]),
];

pub struct HabitatGame {
    points_per_match: u32,
    matched: usize,
    total: usize,
}

impl HabitatGame {
    pub fn new(points_per_match: u32) -> Self {
        Self { points_per_match, matched: 0, total: 0 }
    }

    /// 動物の名前から、すみかを探す
    pub fn habitat_of(animal: &str) -> Option<&'static str> {
        HABITATS
            .iter()
            .find(|(_, animals)| animals.contains(&animal))
            .map(|(habitat, _)| *habitat)
    }
}

impl Game for HabitatGame {
    fn kind(&self) -> GameKind {
        GameKind::Habitat
    }

    fn start(&mut self, rng: &mut dyn RngCore) -> GameBoard {
        let zones = HABITATS
            .iter()
            .enumerate()
            .map(|(i, (habitat, _))| DropZone::new(ZoneId(i), capitalize(habitat), AcceptedType::only(*habitat)))
            .collect();

        let mut items: Vec<DraggableItem> = HABITATS
            .iter()
            .flat_map(|(habitat, animals)| animals.iter().map(move |animal| (*habitat, *animal)))
            .enumerate()
            .map(|(i, (habitat, animal))| {
                DraggableItem::new(ItemId(i), habitat, animal).with_emoji(animals::emoji_for(animal))
            })
            .collect();
        items.shuffle(rng);

        self.matched = 0;
        self.total = items.len();
        GameBoard {
            title: "🏠 Match Animals to Their Homes! 🏠".to_string(),
            prompt: None,
            featured_animal: None,
            items,
            zones,
        }
    }

    fn on_item_placed(&mut self, item: &DraggableItem, zone: &DropZone, _rng: &mut dyn RngCore) -> Placement {
        self.matched += 1;
        let placement = Placement::scored(self.points_per_match)
            .with_feedback(format!("{} lives in the {}!", item.label, zone.title));
        if self.is_complete() {
            placement.with_progress(GameProgress::Complete(Completion {
                headline: "🎉 Amazing Job! 🎉".to_string(),
                detail: "You matched all animals to their homes!".to_string(),
                stars: 3,
            }))
        } else {
            placement
        }
    }

    fn is_complete(&self) -> bool {
        self.total > 0 && self.matched >= self.total
    }

    fn progress_label(&self) -> String {
        format!("Matched {}/{}", self.matched, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::is_valid_drop;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn board_has_one_zone_per_habitat_and_every_animal() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = HabitatGame::new(10).start(&mut rng);

        assert_eq!(board.zones.len(), 4);
        assert_eq!(board.items.len(), 23);
        assert_eq!(board.zones[0].title, "Savanna");
        assert_eq!(board.zones[0].accepted, AcceptedType::only("savanna"));

        // どの動物にも、ちょうど 1 つだけ置けるゾーンがある
        for item in &board.items {
            let homes = board.zones.iter().filter(|zone| is_valid_drop(item, zone)).count();
            assert_eq!(homes, 1, "{} should have exactly one home", item.label);
        }
    }

    #[test]
    fn completes_after_every_animal_is_matched() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = HabitatGame::new(10);
        let board = game.start(&mut rng);

        let mut last = None;
        for item in &board.items {
            assert!(!game.is_complete());
            let zone = board.zones.iter().find(|zone| is_valid_drop(item, zone)).expect("home zone");
            let placement = game.on_item_placed(item, zone, &mut rng);
            assert_eq!(placement.points, 10);
            last = Some(placement);
        }

        assert!(game.is_complete());
        let last = last.expect("at least one placement");
        match last.progress {
            GameProgress::Complete(completion) => {
                assert_eq!(completion.headline, "🎉 Amazing Job! 🎉");
                assert_eq!(completion.stars, 3);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(game.progress_label(), "Matched 23/23");
    }

    #[test]
    fn restart_resets_progress() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = HabitatGame::new(10);
        let board = game.start(&mut rng);
        let item = &board.items[0];
        let zone = board.zones.iter().find(|zone| is_valid_drop(item, zone)).expect("home zone");
        game.on_item_placed(item, zone, &mut rng);

        game.start(&mut rng);
        assert_eq!(game.progress_label(), "Matched 0/23");
    }

    #[test]
    fn habitat_lookup() {
        assert_eq!(HabitatGame::habitat_of("Penguin"), Some("ocean"));
        assert_eq!(HabitatGame::habitat_of("Unicorn"), None);
    }
}
