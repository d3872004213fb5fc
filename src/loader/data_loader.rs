// src/loader/data_loader.rs

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future;
use futures::stream::{FuturesUnordered, StreamExt};
use itertools::Itertools;
use log::{error, info, warn};
use serde::de::DeserializeOwned;

use crate::components::card::{FateCard, FishCard};
use crate::config::constants::{
    PROGRESS_COLLECTION_PARSED, PROGRESS_CONNECTING, PROGRESS_DONE, PROGRESS_IMAGES_SPAN, PROGRESS_IMAGES_START,
    PROGRESS_REQUESTS_ISSUED,
};
use crate::config::LoaderConfig;
use crate::loader::cache::{CachedCollection, CollectionKind, GameData, GameDataCache};
use crate::loader::error::LoadError;
use crate::loader::progress::ProgressReporter;
use crate::loader::source::DataSource;

/// 魚カード・運命カード・画像を読み込んでキャッシュする本体だよ！
///
/// キャッシュは `Arc<Mutex<_>>` で外から渡せる (テストごとに別のキャッシュを使える)。
/// ロックを持ったまま `.await` はしない。
pub struct DataLoader<S: DataSource> {
    source: S,
    config: LoaderConfig,
    cache: Arc<Mutex<GameDataCache<S::Image>>>,
}

impl<S: DataSource> DataLoader<S> {
    pub fn new(source: S, config: LoaderConfig) -> Self {
        Self::with_cache(source, config, Arc::new(Mutex::new(GameDataCache::new())))
    }

    pub fn with_cache(source: S, config: LoaderConfig, cache: Arc<Mutex<GameDataCache<S::Image>>>) -> Self {
        Self { source, config, cache }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn cache_handle(&self) -> Arc<Mutex<GameDataCache<S::Image>>> {
        Arc::clone(&self.cache)
    }

    // 中身は単純なデータなので、poison されていてもそのまま使う
    fn cache(&self) -> MutexGuard<'_, GameDataCache<S::Image>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// URL から JSON 配列を1つ読み込む。リトライはしない。
    pub async fn load_collection<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, LoadError> {
        let body = self.source.fetch_text(url).await.map_err(|e| {
            error!("DataLoader: failed to load {}: {}", url, e);
            e
        })?;
        serde_json::from_str(&body).map_err(|source| {
            let e = LoadError::Parse { url: url.to_string(), source };
            error!("DataLoader: {}", e);
            e
        })
    }

    /// 魚カードだけ読み込む (キャッシュにあればそれを返す)
    pub async fn load_fish_cards(&self) -> Result<Arc<[FishCard]>, LoadError> {
        let cached = self.cache().fish();
        if let Some(fish) = cached {
            return Ok(fish);
        }
        let fish: Arc<[FishCard]> = self.load_collection::<FishCard>(&self.config.fish_url).await?.into();
        self.cache().store_fish(Arc::clone(&fish));
        Ok(fish)
    }

    /// 運命カードだけ読み込む (キャッシュにあればそれを返す)
    pub async fn load_fate_cards(&self) -> Result<Arc<[FateCard]>, LoadError> {
        let cached = self.cache().fate();
        if let Some(fate) = cached {
            return Ok(fate);
        }
        let fate: Arc<[FateCard]> = self.load_collection::<FateCard>(&self.config.fate_url).await?.into();
        self.cache().store_fate(Arc::clone(&fate));
        Ok(fate)
    }

    /// 全部読み込む！
    ///
    /// 1. 読み込み済みならキャッシュをそのまま返す (100% を1回だけ報告)
    /// 2. 魚と運命の JSON を同時に取りに行く
    /// 3. 両方そろったら、魚カードの画像 (重複なし) を同時にプリロード
    ///
    /// コレクションのエラーはそのまま返す。画像のエラーはログだけ出して飛ばす。
    pub async fn load_all(&self, progress: &ProgressReporter) -> Result<GameData<S::Image>, LoadError> {
        let cached = self.cache().snapshot();
        if let Some(data) = cached {
            info!("DataLoader: serving game data from cache");
            progress.report(PROGRESS_DONE, "資料已從快取載入");
            return Ok(data);
        }

        progress.report(PROGRESS_CONNECTING, "正在連線至伺服器");

        // 先に終わった方が 30%、後の方が 50%
        let parsed_count = Cell::new(0usize);
        let report_parsed = |message: &str| {
            let index = parsed_count.get().min(PROGRESS_COLLECTION_PARSED.len() - 1);
            parsed_count.set(parsed_count.get() + 1);
            progress.report(PROGRESS_COLLECTION_PARSED[index], message);
        };

        // 片方だけ先に読み込まれていたら、そっちは取りに行かずに同じ Arc を使う
        let cached_fish = self.cache().fish();
        let cached_fate = self.cache().fate();

        let fish_future = async {
            let cards: Arc<[FishCard]> = match cached_fish {
                Some(fish) => fish,
                None => self.load_collection::<FishCard>(&self.config.fish_url).await?.into(),
            };
            report_parsed("正在解析魚卡資料");
            Ok::<_, LoadError>(cards)
        };
        let fate_future = async {
            let cards: Arc<[FateCard]> = match cached_fate {
                Some(fate) => fate,
                None => self.load_collection::<FateCard>(&self.config.fate_url).await?.into(),
            };
            report_parsed("正在解析命運卡資料");
            Ok::<_, LoadError>(cards)
        };

        progress.report(PROGRESS_REQUESTS_ISSUED, "正在載入遊戲資料");

        let (fish, fate) = future::try_join(fish_future, fate_future).await.map_err(|e| {
            error!("DataLoader: game data load failed: {}", e);
            e
        })?;

        {
            let mut cache = self.cache();
            cache.store_fish(Arc::clone(&fish));
            cache.store_fate(Arc::clone(&fate));
        }

        progress.report(PROGRESS_IMAGES_START, "資料載入完成，開始預載入圖片");
        let images = self.preload_images(&fish, progress).await;

        let data = {
            let mut cache = self.cache();
            cache.finish_load(images);
            GameData { fish, fate, images: cache.images() }
        };

        progress.report(PROGRESS_DONE, "所有資源載入完成");
        info!(
            "DataLoader: game data loaded ({} fish, {} fate, {} images)",
            data.fish.len(),
            data.fate.len(),
            data.images.len()
        );
        Ok(data)
    }

    /// 魚カードに出てくる画像を重複なしで同時に読み込む。
    /// 1枚終わるごとに (成功でも失敗でも) 進捗を報告する。
    async fn preload_images(&self, fish: &[FishCard], progress: &ProgressReporter) -> HashMap<String, S::Image> {
        let unique_paths: Vec<&str> = fish.iter().map(|f| f.image.as_str()).unique().collect();
        let total = unique_paths.len();
        let mut images = HashMap::with_capacity(total);
        if total == 0 {
            return images;
        }

        let mut pending: FuturesUnordered<_> = unique_paths
            .iter()
            .map(|&path| async move {
                let url = self.config.image_url(path);
                (path, self.source.load_image(&url).await)
            })
            .collect();

        let mut finished = 0usize;
        while let Some((path, outcome)) = pending.next().await {
            finished += 1;
            match outcome {
                Ok(image) => {
                    images.insert(path.to_string(), image);
                }
                Err(e) => warn!("DataLoader: image preload failed for {}: {}", path, e),
            }
            let percent = PROGRESS_IMAGES_START as usize + finished * PROGRESS_IMAGES_SPAN as usize / total;
            progress.report(percent as u8, format!("正在載入圖片 {}/{}", finished, total));
        }

        info!("DataLoader: image preload finished {}/{}", images.len(), total);
        images
    }

    /// ネットワークに触らずに、今キャッシュにあるものを返す
    pub fn get_cached(&self, kind: CollectionKind) -> Option<CachedCollection> {
        self.cache().get(kind)
    }

    pub fn cached_images(&self) -> Arc<HashMap<String, S::Image>> {
        self.cache().images()
    }

    pub fn cached_image(&self, path: &str) -> Option<S::Image> {
        self.cache().image(path)
    }

    /// キャッシュを空にする。次の `load_all` はまた取りに行くよ。
    pub fn clear(&self) {
        info!("DataLoader: clearing cache");
        self.cache().clear();
    }
}
