// src/components/card.rs

// serde を使う宣言！リモートの JSON からカードを読み込む時に使うよ！
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// カードのスート（マーク）を表す列挙型だよ！♠️❤️♦️♣️
///
/// JSON 上では `"Spades"` みたいに英語の複数形で来るので、そのままの名前にしてあるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

impl Suit {
    /// 同じランク同士を並べる時の重み。大きい方が先！
    pub fn weight(self) -> u8 {
        match self {
            Suit::Spades => 4,
            Suit::Hearts => 3,
            Suit::Diamonds => 2,
            Suit::Clubs => 1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    /// ハートとダイヤが赤、それ以外は黒
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// カードのランク（数字）を表す列挙型だよ！ A, 2, 3, ..., K
///
/// 判別子がそのまま並び替えの重みになる (A=1 … K=13)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Rank {
    pub fn weight(self) -> u8 {
        self as u8
    }

    /// 表示用の文字列 ("A", "2", ..., "10", "J", "Q", "K")
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        ALL_RANKS.iter().copied().find(|rank| rank.as_str() == label.trim())
    }

    /// 数字のランク。A と絵札は数字で来ないので 2..=10 だけ受け付ける。
    pub fn from_number(number: u64) -> Option<Self> {
        match number {
            2..=10 => ALL_RANKS.get(number as usize - 1).copied(),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// スプレッドシートの数値セルは JSON の数値で届くことがあるので、文字列と数値の両方を受け付けるよ
struct RankVisitor;

impl<'de> Visitor<'de> for RankVisitor {
    type Value = Rank;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a card rank: \"A\", \"2\"..\"10\", \"J\", \"Q\", \"K\" or an integer 2..=10")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Rank, E> {
        Rank::from_label(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Rank, E> {
        Rank::from_number(value).ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Rank, E> {
        u64::try_from(value)
            .ok()
            .and_then(Rank::from_number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &self))
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RankVisitor)
    }
}

/// 魚カードに付いているトランプの情報 🃏
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokerData {
    pub rank: Rank,
    pub suit: Suit,
}

/// 魚カード 🐟
///
/// - `difficulty`: レア度。星の数になる
/// - `image`: 画像ディレクトリからの相対パス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FishCard {
    pub name: String,
    pub category: String,
    pub difficulty: u8,
    pub poker_data: PokerData,
    pub image: String,
    pub capture_condition: String,
}

/// 運命カード。トランプ情報は持たないよ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FateCard {
    pub title: String,
    pub content: String,
    pub result: String,
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_weights_follow_face_order() {
        assert_eq!(Rank::Ace.weight(), 1);
        assert_eq!(Rank::Ten.weight(), 10);
        assert_eq!(Rank::King.weight(), 13);
        assert!(Rank::Queen < Rank::King);
        println!("Rank の重みテスト、成功！🎉");
    }

    #[test]
    fn suit_weights_and_colors() {
        assert!(Suit::Spades.weight() > Suit::Hearts.weight());
        assert!(Suit::Hearts.weight() > Suit::Diamonds.weight());
        assert!(Suit::Diamonds.weight() > Suit::Clubs.weight());
        assert!(Suit::Hearts.is_red());
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Spades.is_red());
        assert!(!Suit::Clubs.is_red());
        assert_eq!(Suit::Clubs.symbol(), "♣");
    }

    #[test]
    fn deserialize_fish_card_from_sheet_json() {
        let json = r#"{
            "name": "鮪魚",
            "category": "大型魚",
            "difficulty": 3,
            "poker_data": { "rank": "10", "suit": "Hearts" },
            "image": "tuna.png",
            "capture_condition": "擲出 6 點"
        }"#;
        let fish: FishCard = serde_json::from_str(json).unwrap();
        assert_eq!(fish.poker_data, PokerData { rank: Rank::Ten, suit: Suit::Hearts });
        assert_eq!(fish.difficulty, 3);
        assert_eq!(fish.image, "tuna.png");
    }

    #[test]
    fn numeric_rank_is_accepted() {
        let data: PokerData = serde_json::from_str(r#"{ "rank": 7, "suit": "Clubs" }"#).unwrap();
        assert_eq!(data.rank, Rank::Seven);
    }

    #[test]
    fn invalid_rank_or_suit_is_rejected() {
        assert!(serde_json::from_str::<PokerData>(r#"{ "rank": "1", "suit": "Clubs" }"#).is_err());
        assert!(serde_json::from_str::<PokerData>(r#"{ "rank": 11, "suit": "Clubs" }"#).is_err());
        assert!(serde_json::from_str::<PokerData>(r#"{ "rank": "K", "suit": "Stars" }"#).is_err());
    }

    #[test]
    fn rank_serializes_as_label() {
        let json = serde_json::to_string(&PokerData { rank: Rank::Queen, suit: Suit::Spades }).unwrap();
        assert_eq!(json, r#"{"rank":"Q","suit":"Spades"}"#);
    }

    #[test]
    fn deserialize_fate_card() {
        let fate: FateCard =
            serde_json::from_str(r#"{ "title": "暴風雨", "content": "漁船返航", "result": "休息一回合" }"#).unwrap();
        assert_eq!(fate.title, "暴風雨");
        assert_eq!(fate.result, "休息一回合");
    }
}
