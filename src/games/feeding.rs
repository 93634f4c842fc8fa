// src/games/feeding.rs
//! エサやりゲーム 🍽️ おなかをすかせた動物に、食べられるごはんをあげよう！

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::components::{AcceptedType, DraggableItem, DropZone, ItemId, ZoneId};
use crate::logic::animals;
use super::{Completion, Game, GameBoard, GameKind, GameProgress, Placement};

/// 動物ごとの食べ物と食性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diet {
    pub animal: &'static str,
    pub diet: &'static str,
    pub foods: &'static [&'static str],
}

pub const DIETS: &[Diet] = &[
    Diet { animal: "Lion", diet: "carnivore", foods: &["🥩", "🍖"] },
    Diet { animal: "Elephant", diet: "herbivore", foods: &["🌿", "🥬", "🍃"] },
    Diet { animal: "Monkey", diet: "omnivore", foods: &["🍌", "🍎", "🥜"] },
    Diet { animal: "Giraffe", diet: "herbivore", foods: &["🌿", "🍃"] },
    Diet { animal: "Bear", diet: "omnivore", foods: &["🐟", "🍯", "🫐"] },
];

const HUNGRY_ZONE: ZoneId = ZoneId(0);

fn food_name(food: &str) -> &'static str {
    match food {
        "🥩" => "Meat",
        "🍖" => "Bone",
        "🌿" => "Herbs",
        "🥬" => "Lettuce",
        "🍃" => "Leaves",
        "🍌" => "Banana",
        "🍎" => "Apple",
        "🥜" => "Peanuts",
        "🐟" => "Fish",
        "🍯" => "Honey",
        "🫐" => "Berries",
        _ => "Food",
    }
}

/// 全部の食べ物 (重複なし)。タイプは食性。
pub fn food_pool() -> Vec<DraggableItem> {
    DIETS
        .iter()
        .flat_map(|diet| diet.foods.iter().map(move |food| (*food, diet.diet)))
        .unique_by(|(food, _)| *food)
        .enumerate()
        .map(|(i, (food, diet))| DraggableItem::new(ItemId(i), diet, food_name(food)).with_emoji(food))
        .collect()
}

pub struct FeedingGame {
    points_per_meal: u32,
    rounds: u32,
    fed: u32,
    hungry: Option<&'static Diet>,
}

impl FeedingGame {
    pub fn new(points_per_meal: u32, rounds: u32) -> Self {
        Self { points_per_meal, rounds: rounds.max(1), fed: 0, hungry: None }
    }

    pub fn hungry_animal(&self) -> Option<&'static str> {
        self.hungry.map(|diet| diet.animal)
    }

    fn next_board(&mut self, rng: &mut dyn RngCore) -> GameBoard {
        // DIETS は空じゃないので必ず選べるけど、念のため先頭にフォールバック
        let diet = DIETS.choose(rng).unwrap_or(&DIETS[0]);
        self.hungry = Some(diet);

        let mut items = food_pool();
        items.shuffle(rng);
        let zone = DropZone::new(
            HUNGRY_ZONE,
            format!("{} {}", animals::emoji_for(diet.animal), diet.animal),
            AcceptedType::only(diet.diet),
        );
        GameBoard {
            title: "🍽️ Feed the Animals! 🍽️".to_string(),
            prompt: Some("I'm hungry!".to_string()),
            featured_animal: Some(diet.animal.to_string()),
            items,
            zones: vec![zone],
        }
    }
}

impl Game for FeedingGame {
    fn kind(&self) -> GameKind {
        GameKind::Feeding
    }

    fn start(&mut self, rng: &mut dyn RngCore) -> GameBoard {
        self.fed = 0;
        self.next_board(rng)
    }

    fn on_item_placed(&mut self, item: &DraggableItem, _zone: &DropZone, rng: &mut dyn RngCore) -> Placement {
        let animal = self.hungry_animal().unwrap_or("Animal");
        let placement = Placement::scored(self.points_per_meal)
            .with_feedback(format!("Yum! {} loves {}!", animal, item.label));
        self.fed += 1;

        if self.is_complete() {
            return placement.with_progress(GameProgress::Complete(Completion {
                headline: "🎉 All full! 🎉".to_string(),
                detail: format!("You fed {} hungry animals!", self.fed),
                stars: 3,
            }));
        }
        let board = self.next_board(rng);
        placement.with_progress(GameProgress::NextRound(board))
    }

    fn is_complete(&self) -> bool {
        self.fed >= self.rounds
    }

    fn progress_label(&self) -> String {
        format!("Fed {}/{}", self.fed, self.rounds)
    }
}
