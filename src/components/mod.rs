// src/components/mod.rs

// ゲームで扱うデータ (カード・ギャラリー・セッション状態) をまとめるモジュールだよ！
pub mod card;
pub mod collection;
pub mod dragging_info; // アバターのドラッグ 🖱️
pub mod game_state;

pub use card::{FateCard, FishCard, PokerData, Rank, Suit};
pub use collection::CollectedSet;
pub use dragging_info::{DraggingInfo, Rect};
pub use game_state::{GameSession, ModalView};
