// src/loader/mod.rs
//! リモートの JSON (魚カード・運命カード) と画像を読み込んでキャッシュするモジュールだよ！📦
//!
//! - `source`: 実際のネットワーク I/O (ブラウザの fetch / Image)
//! - `cache`: 読み込んだスナップショットを持っておく入れ物
//! - `progress`: 進捗イベントのチャンネル
//! - `data_loader`: 上の3つを組み合わせる本体

pub mod cache;
pub mod data_loader;
pub mod error;
pub mod progress;
pub mod source;

pub use cache::{CachedCollection, CollectionKind, GameData, GameDataCache};
pub use data_loader::DataLoader;
pub use error::LoadError;
pub use progress::{LoadProgress, ProgressReporter};
pub use source::{BrowserDataSource, DataSource};
