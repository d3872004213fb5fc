// src/loader/cache.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::components::card::{FateCard, FishCard};

/// どのコレクションか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Fish,
    Fate,
}

/// `get_cached` の結果
#[derive(Debug, Clone, PartialEq)]
pub enum CachedCollection {
    Fish(Arc<[FishCard]>),
    Fate(Arc<[FateCard]>),
}

impl CachedCollection {
    pub fn len(&self) -> usize {
        match self {
            CachedCollection::Fish(cards) => cards.len(),
            CachedCollection::Fate(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `load_all` が返すスナップショット。
///
/// 中身はぜんぶ `Arc` なので、clone してもキャッシュと同じものを指すよ。
#[derive(Debug)]
pub struct GameData<I> {
    pub fish: Arc<[FishCard]>,
    pub fate: Arc<[FateCard]>,
    /// 画像パス (JSON の `image` の値) → 読み込み済みの画像
    pub images: Arc<HashMap<String, I>>,
}

// derive(Clone) だと I: Clone が要求されちゃうので手で書く
impl<I> Clone for GameData<I> {
    fn clone(&self) -> Self {
        Self { fish: Arc::clone(&self.fish), fate: Arc::clone(&self.fate), images: Arc::clone(&self.images) }
    }
}

impl<I> GameData<I> {
    /// 3つとも同じ Arc を指しているか
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fish, &other.fish)
            && Arc::ptr_eq(&self.fate, &other.fate)
            && Arc::ptr_eq(&self.images, &other.images)
    }
}

/// 読み込んだデータのキャッシュ 📦
///
/// グローバル変数じゃなくて、作った人が持って回す普通の値。
/// 各コレクションは一度入ったら `clear()` されるまで同じスナップショットを返す。
#[derive(Debug)]
pub struct GameDataCache<I> {
    fish: Option<Arc<[FishCard]>>,
    fate: Option<Arc<[FateCard]>>,
    images: Arc<HashMap<String, I>>,
    is_loaded: bool,
}

impl<I> Default for GameDataCache<I> {
    fn default() -> Self {
        Self { fish: None, fate: None, images: Arc::new(HashMap::new()), is_loaded: false }
    }
}

impl<I> GameDataCache<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn fish(&self) -> Option<Arc<[FishCard]>> {
        self.fish.clone()
    }

    pub fn fate(&self) -> Option<Arc<[FateCard]>> {
        self.fate.clone()
    }

    pub fn get(&self, kind: CollectionKind) -> Option<CachedCollection> {
        match kind {
            CollectionKind::Fish => self.fish().map(CachedCollection::Fish),
            CollectionKind::Fate => self.fate().map(CachedCollection::Fate),
        }
    }

    pub fn images(&self) -> Arc<HashMap<String, I>> {
        Arc::clone(&self.images)
    }

    pub fn store_fish(&mut self, fish: Arc<[FishCard]>) {
        self.fish = Some(fish);
    }

    pub fn store_fate(&mut self, fate: Arc<[FateCard]>) {
        self.fate = Some(fate);
    }

    /// 画像を入れて「全部読み込み済み」にする
    pub fn finish_load(&mut self, images: HashMap<String, I>) {
        self.images = Arc::new(images);
        self.is_loaded = true;
    }

    /// 全部読み込み済みならスナップショットを返す
    pub fn snapshot(&self) -> Option<GameData<I>> {
        if !self.is_loaded {
            return None;
        }
        Some(GameData { fish: self.fish.clone()?, fate: self.fate.clone()?, images: self.images() })
    }

    /// 全部空っぽに戻す
    pub fn clear(&mut self) {
        self.fish = None;
        self.fate = None;
        self.images = Arc::new(HashMap::new());
        self.is_loaded = false;
    }
}

impl<I: Clone> GameDataCache<I> {
    pub fn image(&self, path: &str) -> Option<I> {
        self.images.get(path).cloned()
    }
}
