// src/render/mod.rs
//! カードを HTML 断片に変換する純粋な関数たち。

pub mod card_renderer;

pub use card_renderer::sort_fish_cards;
