// src/logic/animals.rs
//! 動物のカタログ。絵文字、鳴き声 (読み上げ用)、音声ファイル名をまとめておくよ！🦁🐘🐬

/// 動物 1 匹分のデータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimalEntry {
    pub name: &'static str,
    pub emoji: &'static str,
    /// 読み上げる鳴き声 (「Lion says roar」の roar の部分)
    pub sound: &'static str,
}

/// 知らない動物用の絵文字
pub const FALLBACK_EMOJI: &str = "🐾";
/// 知らない動物用の鳴き声
pub const FALLBACK_SOUND: &str = "sound";

pub const ANIMALS: &[AnimalEntry] = &[
    AnimalEntry { name: "Lion", emoji: "🦁", sound: "roar" },
    AnimalEntry { name: "Tiger", emoji: "🐯", sound: "roar" },
    AnimalEntry { name: "Elephant", emoji: "🐘", sound: "trumpet" },
    AnimalEntry { name: "Giraffe", emoji: "🦒", sound: "hum" },
    AnimalEntry { name: "Bear", emoji: "🐻", sound: "growl" },
    AnimalEntry { name: "Zebra", emoji: "🦓", sound: "neigh" },
    AnimalEntry { name: "Rhino", emoji: "🦏", sound: "snort" },
    AnimalEntry { name: "Wolf", emoji: "🐺", sound: "howl" },
    AnimalEntry { name: "Fox", emoji: "🦊", sound: "yip yip" },
    AnimalEntry { name: "Leopard", emoji: "🐆", sound: "growl" },
    AnimalEntry { name: "Kangaroo", emoji: "🦘", sound: "grunt" },
    AnimalEntry { name: "Koala", emoji: "🐨", sound: "snore" },
    AnimalEntry { name: "Monkey", emoji: "🐵", sound: "ooh ooh ah ah" },
    AnimalEntry { name: "Gorilla", emoji: "🦍", sound: "hoo hoo" },
    AnimalEntry { name: "Penguin", emoji: "🐧", sound: "waddle waddle" },
    AnimalEntry { name: "Eagle", emoji: "🦅", sound: "screech" },
    AnimalEntry { name: "Octopus", emoji: "🐙", sound: "whoosh" },
    AnimalEntry { name: "Dolphin", emoji: "🐬", sound: "click click" },
    AnimalEntry { name: "Shark", emoji: "🦈", sound: "splash" },
    AnimalEntry { name: "Frog", emoji: "🐸", sound: "ribbit ribbit" },
    AnimalEntry { name: "Camel", emoji: "🐪", sound: "groan" },
    AnimalEntry { name: "Crocodile", emoji: "🐊", sound: "snap" },
    AnimalEntry { name: "Hippo", emoji: "🦛", sound: "grunt" },
    AnimalEntry { name: "Cheetah", emoji: "🐆", sound: "chirp" },
    AnimalEntry { name: "Parrot", emoji: "🦜", sound: "squawk" },
    AnimalEntry { name: "Turtle", emoji: "🐢", sound: "snap" },
    AnimalEntry { name: "Owl", emoji: "🦉", sound: "hoot hoot" },
    AnimalEntry { name: "Squirrel", emoji: "🐿️", sound: "chatter" },
    AnimalEntry { name: "Hedgehog", emoji: "🦔", sound: "sniff sniff" },
    AnimalEntry { name: "Bee", emoji: "🐝", sound: "buzz" },
];

/// 名前で動物を探す (大文字小文字は区別する、表示名そのままで引く)
pub fn find(name: &str) -> Option<&'static AnimalEntry> {
    ANIMALS.iter().find(|entry| entry.name == name)
}

pub fn emoji_for(name: &str) -> &'static str {
    find(name).map_or(FALLBACK_EMOJI, |entry| entry.emoji)
}

pub fn sound_for(name: &str) -> &'static str {
    find(name).map_or(FALLBACK_SOUND, |entry| entry.sound)
}

/// 音声ファイルの名前 (拡張子なし)。
/// 鳴き声がわかる動物は鳴き声をハイフンでつないだもの (`"ooh-ooh-ah-ah"`)、
/// わからない動物は名前を小文字にしたもの (`"hippo"` じゃなくて知らない子なら `"unicorn"`) になるよ。
pub fn clip_name_for(name: &str) -> String {
    match find(name) {
        Some(entry) => entry.sound.replace(' ', "-"),
        None => name.to_lowercase(),
    }
}

/// 「Lion says roar」みたいな読み上げ用の文を作る
pub fn pronunciation_text(name: &str) -> String {
    format!("{} says {}", name, sound_for(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_animals_have_sounds_and_emoji() {
        assert_eq!(sound_for("Lion"), "roar");
        assert_eq!(sound_for("Dolphin"), "click click");
        assert_eq!(emoji_for("Frog"), "🐸");
    }

    #[test]
    fn unknown_animal_falls_back() {
        assert_eq!(sound_for("Unicorn"), FALLBACK_SOUND);
        assert_eq!(emoji_for("Unicorn"), FALLBACK_EMOJI);
        assert_eq!(clip_name_for("Unicorn"), "unicorn");
    }

    #[test]
    fn clip_names_are_hyphenated() {
        assert_eq!(clip_name_for("Monkey"), "ooh-ooh-ah-ah");
        assert_eq!(clip_name_for("Lion"), "roar");
    }

    #[test]
    fn pronunciation_text_combines_name_and_sound() {
        assert_eq!(pronunciation_text("Elephant"), "Elephant says trumpet");
        assert_eq!(pronunciation_text("Unicorn"), "Unicorn says sound");
    }

    #[test]
    fn catalog_names_are_unique() {
        use itertools::Itertools;
        assert!(ANIMALS.iter().map(|entry| entry.name).all_unique());
    }
}
