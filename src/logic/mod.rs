// src/logic/mod.rs
//! 画面に依存しないゲームロジックを置くモジュールだよ！

pub mod dice;
