// src/games/sound_quiz.rs
//! 鳴き声当てクイズ 🔊 鳴き声を聞いて、正しい動物をスピーカーに入れよう！
//!
//! スピーカーのゾーンはどの動物でも受け入れる ("any")。正解かどうかはゲームが判定して、
//! ハズレなら 0 点で次の問題へ。

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::components::{AcceptedType, DraggableItem, DropZone, ItemId, ZoneId};
use crate::config::gameplay::{GOOD_SCORE_PERCENTAGE, QUIZ_OPTION_COUNT};
use crate::logic::animals;
use super::{Completion, Game, GameBoard, GameKind, GameProgress, Placement};

/// 出題される動物
pub const QUESTION_POOL: &[&str] = &["Lion", "Tiger", "Elephant", "Monkey", "Wolf", "Dolphin"];
/// 選択肢に出てくる動物
pub const OPTION_POOL: &[&str] = &["Lion", "Tiger", "Elephant", "Monkey", "Wolf", "Dolphin", "Bear", "Fox", "Frog", "Eagle"];

const SPEAKER_ZONE: ZoneId = ZoneId(0);

pub struct SoundQuizGame {
    points_per_answer: u32,
    rounds: u32,
    passing_percentage: u32,
    round: u32,
    answered: u32,
    correct: u32,
    answer: Option<&'static str>,
}

impl SoundQuizGame {
    pub fn new(points_per_answer: u32, rounds: u32, passing_percentage: u32) -> Self {
        Self {
            points_per_answer,
            rounds: rounds.max(1),
            passing_percentage,
            round: 0,
            answered: 0,
            correct: 0,
            answer: None,
        }
    }

    /// 今の問題の正解
    pub fn answer(&self) -> Option<&'static str> {
        self.answer
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct
    }

    /// 正解率 (四捨五入した %)
    pub fn percentage(&self) -> u32 {
        (self.correct * 100 + self.rounds / 2) / self.rounds
    }

    /// 正解率に合わせたクリアメッセージ
    pub fn completion_message(&self) -> &'static str {
        let percentage = self.percentage();
        if percentage >= self.passing_percentage {
            "🌟 Amazing! You know your animal sounds!"
        } else if percentage >= GOOD_SCORE_PERCENTAGE {
            "👏 Good job! Keep listening!"
        } else {
            "😊 Nice try! Practice makes perfect!"
        }
    }

    /// 正解 1 つ + ハズレ 3 つをシャッフルして並べる
    pub fn options_for(answer: &'static str, rng: &mut dyn RngCore) -> Vec<&'static str> {
        let wrong: Vec<&'static str> = OPTION_POOL.iter().copied().filter(|animal| *animal != answer).collect();
        let mut options: Vec<&'static str> = wrong
            .choose_multiple(rng, QUIZ_OPTION_COUNT - 1)
            .copied()
            .collect();
        options.push(answer);
        options.shuffle(rng);
        options
    }

    fn next_board(&mut self, rng: &mut dyn RngCore) -> GameBoard {
        self.round += 1;
        let answer = QUESTION_POOL.choose(rng).copied().unwrap_or(QUESTION_POOL[0]);
        self.answer = Some(answer);

        let items = Self::options_for(answer, rng)
            .into_iter()
            .enumerate()
            .map(|(i, animal)| DraggableItem::new(ItemId(i), animal, animal).with_emoji(animals::emoji_for(animal)))
            .collect();
        GameBoard {
            title: "🔊 Guess the Animal Sound! 🔊".to_string(),
            prompt: Some(format!("Round {}/{}: which animal makes this sound?", self.round, self.rounds)),
            featured_animal: Some(answer.to_string()),
            items,
            zones: vec![DropZone::new(SPEAKER_ZONE, "🔊", AcceptedType::Any)],
        }
    }
}

impl Game for SoundQuizGame {
    fn kind(&self) -> GameKind {
        GameKind::Sounds
    }

    fn start(&mut self, rng: &mut dyn RngCore) -> GameBoard {
        self.round = 0;
        self.answered = 0;
        self.correct = 0;
        self.next_board(rng)
    }

    fn on_item_placed(&mut self, item: &DraggableItem, _zone: &DropZone, rng: &mut dyn RngCore) -> Placement {
        let answer = self.answer.unwrap_or_default();
        self.answered += 1;
        let placement = if item.item_type == answer {
            self.correct += 1;
            Placement::scored(self.points_per_answer).with_feedback("Correct! 🎉")
        } else {
            Placement::wrong_answer().with_feedback(format!("Oops! It was a {} 😊", answer))
        };

        if self.is_complete() {
            let completion = Completion {
                headline: self.completion_message().to_string(),
                detail: format!("Final Score: {}/{} ({}%)", self.correct, self.rounds, self.percentage()),
                stars: match self.percentage() {
                    p if p >= self.passing_percentage => 3,
                    p if p >= GOOD_SCORE_PERCENTAGE => 2,
                    _ => 1,
                },
            };
            return placement.with_progress(GameProgress::Complete(completion));
        }
        let board = self.next_board(rng);
        placement.with_progress(GameProgress::NextRound(board))
    }

    fn is_complete(&self) -> bool {
        // 最後の問題に答えたら (正解でもハズレでも) おしまい
        self.answered >= self.rounds
    }

    fn progress_label(&self) -> String {
        format!("Round: {}/{} | Score: {}", self.round, self.rounds, self.correct)
    }
}
