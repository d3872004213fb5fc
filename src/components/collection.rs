// src/components/collection.rs

use crate::components::card::FishCard;

/// プレイヤーが集めた魚カードの一覧だよ！🎣
///
/// 追加した順番を保つ。同じ魚を何回集めても OK (重複チェックはしない)。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedSet {
    fishes: Vec<FishCard>,
}

impl CollectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// コピーを末尾に追加して、その位置を返す
    pub fn push(&mut self, fish: &FishCard) -> usize {
        self.fishes.push(fish.clone());
        self.fishes.len() - 1
    }

    /// 位置を指定して取り除く。範囲外なら `None`。
    pub fn remove(&mut self, index: usize) -> Option<FishCard> {
        if index < self.fishes.len() {
            Some(self.fishes.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&FishCard> {
        self.fishes.get(index)
    }

    pub fn len(&self) -> usize {
        self.fishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fishes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FishCard> {
        self.fishes.iter()
    }

    pub fn as_slice(&self) -> &[FishCard] {
        &self.fishes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::{PokerData, Rank, Suit};

    fn fish(name: &str) -> FishCard {
        FishCard {
            name: name.to_string(),
            category: "test".to_string(),
            difficulty: 1,
            poker_data: PokerData { rank: Rank::Ace, suit: Suit::Spades },
            image: format!("{}.png", name),
            capture_condition: String::new(),
        }
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut set = CollectedSet::new();
        let a = fish("a");
        let b = fish("b");
        assert_eq!(set.push(&a), 0);
        assert_eq!(set.push(&b), 1);
        assert_eq!(set.push(&a), 2);
        let names: Vec<&str> = set.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn remove_by_position() {
        let mut set = CollectedSet::new();
        set.push(&fish("a"));
        set.push(&fish("b"));
        set.push(&fish("c"));

        assert_eq!(set.remove(1).map(|f| f.name), Some("b".to_string()));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).map(|f| f.name.as_str()), Some("c"));
        assert!(set.remove(5).is_none(), "範囲外は何もしないはず");
        assert_eq!(set.len(), 2);
    }
}
