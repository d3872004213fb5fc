// src/components/game_state.rs

use std::sync::Arc;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::card::{FateCard, FishCard};
use crate::components::collection::CollectedSet;

/// いまモーダルに何が出ているかを表す列挙型だよ！
///
/// ボタンの出し分け (集める / 削除する) はこれを見て決める。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    /// 何も開いていない
    Closed,
    /// 山札から引いたばかりの魚。集めることができる
    DrawnFish(FishCard),
    /// 運命カード。集められない
    Fate(FateCard),
    /// ギャラリーから開いた魚。`index` はギャラリー内の位置
    Collected { index: usize, fish: FishCard },
}

/// ゲームのセッション状態 (山札・ギャラリー・開いているカード)。
///
/// DOM には触らないので、ここだけでテストできるよ！
#[derive(Debug, Clone)]
pub struct GameSession {
    fish_deck: Arc<[FishCard]>,
    fate_deck: Arc<[FateCard]>,
    collected: CollectedSet,
    view: ModalView,
}

impl GameSession {
    pub fn new(fish_deck: Arc<[FishCard]>, fate_deck: Arc<[FateCard]>) -> Self {
        info!("GameSession: {} fish / {} fate cards in the decks", fish_deck.len(), fate_deck.len());
        Self { fish_deck, fate_deck, collected: CollectedSet::new(), view: ModalView::Closed }
    }

    pub fn fish_deck(&self) -> &[FishCard] {
        &self.fish_deck
    }

    pub fn collected(&self) -> &CollectedSet {
        &self.collected
    }

    pub fn view(&self) -> &ModalView {
        &self.view
    }

    /// 魚の山札からランダムに1枚引く。山札が空なら何もしないで `None`。
    /// 山札からは取り除かない (何度でも同じ魚が出る)。
    pub fn draw_fish<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&FishCard> {
        let fish = self.fish_deck.choose(rng)?.clone();
        debug!("GameSession: drew fish {}", fish.name);
        self.view = ModalView::DrawnFish(fish);
        match &self.view {
            ModalView::DrawnFish(fish) => Some(fish),
            _ => None,
        }
    }

    pub fn draw_fate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&FateCard> {
        let card = self.fate_deck.choose(rng)?.clone();
        debug!("GameSession: drew fate card {}", card.title);
        self.view = ModalView::Fate(card);
        match &self.view {
            ModalView::Fate(card) => Some(card),
            _ => None,
        }
    }

    /// 引いたばかりの魚をギャラリーに追加する。
    /// 追加できたらギャラリー内の位置を返す。モーダルは閉じるよ。
    pub fn collect_current(&mut self) -> Option<usize> {
        let ModalView::DrawnFish(fish) = &self.view else {
            return None;
        };
        let index = self.collected.push(fish);
        info!("GameSession: collected {} at #{}", fish.name, index);
        self.view = ModalView::Closed;
        Some(index)
    }

    /// ギャラリーの `index` 番目を開く。範囲外なら何もしない。
    pub fn view_collected(&mut self, index: usize) -> Option<&FishCard> {
        let fish = self.collected.get(index)?.clone();
        self.view = ModalView::Collected { index, fish };
        match &self.view {
            ModalView::Collected { fish, .. } => Some(fish),
            _ => None,
        }
    }

    /// 開いているギャラリーのカードを削除する
    pub fn delete_current(&mut self) -> Option<FishCard> {
        let ModalView::Collected { index, .. } = self.view else {
            return None;
        };
        let removed = self.collected.remove(index)?;
        info!("GameSession: removed {} from #{}", removed.name, index);
        self.view = ModalView::Closed;
        Some(removed)
    }

    pub fn close(&mut self) {
        self.view = ModalView::Closed;
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::{PokerData, Rank, Suit};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fish(name: &str) -> FishCard {
        FishCard {
            name: name.to_string(),
            category: "c".to_string(),
            difficulty: 2,
            poker_data: PokerData { rank: Rank::Five, suit: Suit::Diamonds },
            image: format!("{}.png", name),
            capture_condition: "any".to_string(),
        }
    }

    fn session() -> GameSession {
        let fish: Arc<[FishCard]> = vec![fish("a"), fish("b")].into();
        let fate: Arc<[FateCard]> =
            vec![FateCard { title: "t".into(), content: "c".into(), result: "r".into() }].into();
        GameSession::new(fish, fate)
    }

    #[test]
    fn draw_collect_view_delete_cycle() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = session();

        let drawn = session.draw_fish(&mut rng).cloned().unwrap();
        assert_eq!(session.view(), &ModalView::DrawnFish(drawn.clone()));

        assert_eq!(session.collect_current(), Some(0));
        assert_eq!(session.view(), &ModalView::Closed);
        assert_eq!(session.collected().len(), 1);

        // 閉じた後はもう集められない
        assert_eq!(session.collect_current(), None);

        assert_eq!(session.view_collected(0), Some(&drawn));
        assert_eq!(session.delete_current(), Some(drawn));
        assert!(session.collected().is_empty());
        assert_eq!(session.view(), &ModalView::Closed);
        println!("GameSession の一連の流れテスト、成功！🎉");
    }

    #[test]
    fn fate_cards_cannot_be_collected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session();
        assert!(session.draw_fate(&mut rng).is_some());
        assert_eq!(session.collect_current(), None);
        assert!(session.collected().is_empty());
    }

    #[test]
    fn empty_decks_draw_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = GameSession::new(Vec::new().into(), Vec::new().into());
        assert!(session.draw_fish(&mut rng).is_none());
        assert!(session.draw_fate(&mut rng).is_none());
        assert_eq!(session.view(), &ModalView::Closed);
    }

    #[test]
    fn out_of_range_gallery_index_is_ignored() {
        let mut session = session();
        assert!(session.view_collected(3).is_none());
        assert_eq!(session.delete_current(), None);
    }

    #[test]
    fn same_fish_can_be_collected_twice() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = session();
        session.draw_fish(&mut rng);
        let first = session.view().clone();
        session.collect_current();
        session.view = first;
        assert_eq!(session.collect_current(), Some(1));
        assert_eq!(session.collected().get(0), session.collected().get(1));
    }
}
