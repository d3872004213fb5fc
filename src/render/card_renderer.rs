// src/render/card_renderer.rs
//! 魚カード・運命カードの HTML を作るよ！🎨
//! DOM には触らない。できた文字列を innerHTML に入れるのは app 側のお仕事。

use itertools::Itertools;

use crate::components::card::{FateCard, FishCard, Suit};
use crate::config::constants::IMAGE_BASE_PATH;

pub fn is_red_suit(suit: Suit) -> bool {
    suit.is_red()
}

pub fn suit_symbol(suit: Suit) -> &'static str {
    suit.symbol()
}

/// レア度を ★ の並びにする
pub fn stars(difficulty: u8) -> String {
    "★".repeat(difficulty as usize)
}

/// 魚カードの表面の中身
pub fn render_fish_card_content(fish: &FishCard) -> String {
    let suit = fish.poker_data.suit;
    let color_class = if is_red_suit(suit) { "suit-red" } else { "suit-black" };

    format!(
        r#"
        <div class="element poker-info anchor-center {color_class}">{symbol}{rank}</div>
        <div class="element category">{category}</div>
        <div class="element stars">{stars}</div>
        <div class="element fish-illustration anchor-center">
            <img src="{base}{image}" alt="{name}">
        </div>
        <div class="element fish-name anchor-center">{name}</div>
        <div class="element condition anchor-center">{condition}</div>
    "#,
        color_class = color_class,
        symbol = suit_symbol(suit),
        rank = fish.poker_data.rank,
        category = fish.category,
        stars = stars(fish.difficulty),
        base = IMAGE_BASE_PATH,
        image = fish.image,
        name = fish.name,
        condition = fish.capture_condition,
    )
}

/// クリックで裏返せる魚カード (表 + 裏)
pub fn render_flippable_fish_card(fish: &FishCard) -> String {
    flippable("card-face card-front", &render_fish_card_content(fish))
}

/// 運命カードの表面の中身
pub fn render_fate_card_content(card: &FateCard) -> String {
    format!(
        r#"
        <div class="fate-title">{title}</div>
        <div class="fate-content">{content}</div>
        <div class="fate-result">結果：<br>{result}</div>
    "#,
        title = card.title,
        content = card.content,
        result = card.result,
    )
}

pub fn render_flippable_fate_card(card: &FateCard) -> String {
    flippable("card-face card-front fate-card", &render_fate_card_content(card))
}

fn flippable(front_class: &str, front_html: &str) -> String {
    format!(
        r#"
        <div class="scene">
            <div class="card-wrapper">
                <div class="card" onclick="this.classList.toggle('is-flipped')">
                    <div class="{front_class}">
                        {front_html}
                    </div>
                    <div class="card-face card-back"></div>
                </div>
            </div>
        </div>
    "#
    )
}

/// 魚カードを小さい順に並べた新しい Vec を返す。
///
/// 1. ランクの重みが小さい順 (A=1 … K=13)
/// 2. 同じランクならスートの重みが大きい順 (♠ > ♥ > ♦ > ♣)
///
/// 入力はいじらない。安定ソートなので、ランクもスートも同じカードは元の順番のまま。
pub fn sort_fish_cards(cards: &[FishCard]) -> Vec<FishCard> {
    cards
        .iter()
        .cloned()
        .sorted_by(|a, b| {
            a.poker_data
                .rank
                .weight()
                .cmp(&b.poker_data.rank.weight())
                .then_with(|| b.poker_data.suit.weight().cmp(&a.poker_data.suit.weight()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::{PokerData, Rank, ALL_RANKS, ALL_SUITS};

    fn card(name: &str, rank: Rank, suit: Suit) -> FishCard {
        FishCard {
            name: name.to_string(),
            category: "近海".to_string(),
            difficulty: 2,
            poker_data: PokerData { rank, suit },
            image: format!("{}.png", name),
            capture_condition: "骰出偶數".to_string(),
        }
    }

    fn labels(cards: &[FishCard]) -> Vec<String> {
        cards
            .iter()
            .map(|c| format!("{}{}", c.poker_data.rank, c.poker_data.suit.symbol()))
            .collect()
    }

    #[test]
    fn sorts_kings_and_ace_example() {
        let input = vec![
            card("k_clubs", Rank::King, Suit::Clubs),
            card("k_spades", Rank::King, Suit::Spades),
            card("a_hearts", Rank::Ace, Suit::Hearts),
        ];
        let sorted = sort_fish_cards(&input);
        assert_eq!(labels(&sorted), vec!["A♥", "K♠", "K♣"]);
        println!("並び替えの例テスト、成功！🎉");
    }

    #[test]
    fn input_is_not_modified() {
        let input = vec![card("q", Rank::Queen, Suit::Hearts), card("two", Rank::Two, Suit::Clubs)];
        let before = input.clone();
        let sorted = sort_fish_cards(&input);
        assert_eq!(input, before);
        assert_eq!(sorted.len(), input.len());
    }

    #[test]
    fn full_deck_sorts_rank_then_descending_suit() {
        // わざと逆順に並べた 52 枚
        let deck: Vec<FishCard> = ALL_SUITS
            .iter()
            .rev()
            .flat_map(|&suit| ALL_RANKS.iter().rev().map(move |&rank| card("x", rank, suit)))
            .collect();
        let sorted = sort_fish_cards(&deck);
        assert_eq!(sorted.len(), 52);

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0].poker_data, &pair[1].poker_data);
            assert!(a.rank <= b.rank, "ランクが昇順になってない: {:?} {:?}", a, b);
            if a.rank == b.rank {
                assert!(a.suit.weight() > b.suit.weight(), "同ランクのスートが降順じゃない: {:?} {:?}", a, b);
            }
        }
    }

    #[test]
    fn equal_cards_keep_their_order() {
        let input = vec![
            card("first", Rank::Five, Suit::Hearts),
            card("ace", Rank::Ace, Suit::Clubs),
            card("second", Rank::Five, Suit::Hearts),
        ];
        let names: Vec<String> = sort_fish_cards(&input).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["ace", "first", "second"]);
    }

    #[test]
    fn fish_markup_has_color_symbol_and_stars() {
        let fish = card("tuna", Rank::Ten, Suit::Diamonds);
        let html = render_fish_card_content(&fish);
        assert!(html.contains("suit-red"));
        assert!(html.contains("♦10"));
        assert!(html.contains("★★<"));
        assert!(html.contains(r#"<img src="../images/tuna.png" alt="tuna">"#));
        assert!(html.contains("骰出偶數"));

        let black = render_fish_card_content(&card("cod", Rank::Jack, Suit::Spades));
        assert!(black.contains("suit-black"));
        assert!(black.contains("♠J"));
    }

    #[test]
    fn fate_markup_and_flippable_wrapper() {
        let fate = FateCard { title: "漲潮".into(), content: "海水上升".into(), result: "前進兩格".into() };
        let html = render_flippable_fate_card(&fate);
        assert!(html.contains(r#"<div class="card-face card-front fate-card">"#));
        assert!(html.contains("結果：<br>前進兩格"));
        assert!(html.contains("card-back"));

        let fish_html = render_flippable_fish_card(&card("eel", Rank::Three, Suit::Clubs));
        assert!(fish_html.contains(r#"<div class="card-face card-front">"#));
    }

    #[test]
    fn stars_repeat_difficulty() {
        assert_eq!(stars(0), "");
        assert_eq!(stars(3), "★★★");
    }
}
