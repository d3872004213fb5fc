// src/config/constants.rs
//! ゲーム全体で使う定数テーブルだよ！
//! リモートのエンドポイント、画像の置き場所、ローディングの進捗マイルストーンなど。
//! スートやランクの重み・記号は `components::card` 側に enum のメソッドとして置いてあるよ。

use serde::{Deserialize, Serialize};
use url::Url;

// --- リモートデータ (Google Apps Script) ---

/// GAS API のベース URL
pub const API_BASE_URL: &str =
    "https://script.google.com/macros/s/AKfycbzLSFTXH1UsOXyoVFau2I6yUQjKgMJAUsbAz26ousY2gvlyDhv40DKNempJtE3Sl_tR/exec";

/// 魚カードのシート名 (トランプ版)
pub const FISH_SHEET_NAME: &str = "魚牌(撲克牌版本)";
/// 運命カードのシート名
pub const FATE_SHEET_NAME: &str = "命運卡牌";
/// シート名を渡すクエリパラメータ
pub const SHEET_QUERY_KEY: &str = "sheet";

/// 魚カード画像が置いてあるディレクトリ
pub const IMAGE_BASE_PATH: &str = "../images/";

// --- ローディングの進捗マイルストーン (%) ---

pub const PROGRESS_CONNECTING: u8 = 10;
pub const PROGRESS_REQUESTS_ISSUED: u8 = 20;
/// コレクションのパースが終わった順に 30 → 50
pub const PROGRESS_COLLECTION_PARSED: [u8; 2] = [30, 50];
pub const PROGRESS_IMAGES_START: u8 = 60;
/// 画像プリロードに割り当てる幅 (60% 〜 95%)
pub const PROGRESS_IMAGES_SPAN: u8 = 35;
pub const PROGRESS_DONE: u8 = 100;

/// ローディング画面を閉じるまでの待ち時間 (ms)
pub const LOADING_OVERLAY_HIDE_DELAY_MS: i32 = 300;
/// 収集アニメーションが終わるまでの待ち時間 (ms)
pub const COLLECT_ANIMATION_MS: i32 = 1000;
/// ギャラリーのサムネイルの bounce-in を外すまでの時間 (ms)
pub const THUMB_BOUNCE_MS: i32 = 400;

/// データローダーの設定。
/// 基本は `Default` (上の定数から作る) を使えばOK！
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub fish_url: String,
    pub fate_url: String,
    pub image_base_path: String,
}

impl LoaderConfig {
    /// ベース URL とシート名から設定を作る。
    /// ベース URL がパースできなければ `url::ParseError` を返すよ。
    pub fn from_sheets(
        base_url: &str,
        fish_sheet: &str,
        fate_sheet: &str,
        image_base_path: &str,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            fish_url: sheet_url(base_url, fish_sheet)?,
            fate_url: sheet_url(base_url, fate_sheet)?,
            image_base_path: image_base_path.to_string(),
        })
    }

    /// 画像の相対パスを完全なパスにする
    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}{}", self.image_base_path, image_path)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        // ベース URL がパースできない時はエンコードなしで組み立てる
        Self::from_sheets(API_BASE_URL, FISH_SHEET_NAME, FATE_SHEET_NAME, IMAGE_BASE_PATH).unwrap_or_else(|_| Self {
            fish_url: format!("{}?{}={}", API_BASE_URL, SHEET_QUERY_KEY, FISH_SHEET_NAME),
            fate_url: format!("{}?{}={}", API_BASE_URL, SHEET_QUERY_KEY, FATE_SHEET_NAME),
            image_base_path: IMAGE_BASE_PATH.to_string(),
        })
    }
}

/// `base?sheet=<シート名>` の URL を作る (シート名はエンコードされる)
pub fn sheet_url(base_url: &str, sheet_name: &str) -> Result<String, url::ParseError> {
    let url = Url::parse_with_params(base_url, &[(SHEET_QUERY_KEY, sheet_name)])?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_both_sheets() {
        let config = LoaderConfig::default();
        assert!(config.fish_url.starts_with(API_BASE_URL));
        assert!(config.fate_url.starts_with(API_BASE_URL));
        assert!(config.fish_url.contains("?sheet="));
        assert_ne!(config.fish_url, config.fate_url);
        // シート名の漢字はパーセントエンコードされているはず
        assert!(!config.fish_url.contains(FISH_SHEET_NAME));
        assert_eq!(config.image_base_path, IMAGE_BASE_PATH);
    }

    #[test]
    fn sheet_url_round_trips_through_query() {
        let built = sheet_url("https://example.com/exec", FATE_SHEET_NAME).unwrap();
        let parsed = Url::parse(&built).unwrap();
        let (key, value) = parsed.query_pairs().next().unwrap();
        assert_eq!(key, "sheet");
        assert_eq!(value, FATE_SHEET_NAME);
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(LoaderConfig::from_sheets("not a url", "a", "b", "img/").is_err());
    }

    #[test]
    fn image_url_joins_base_and_path() {
        let config = LoaderConfig::default();
        assert_eq!(config.image_url("fish/tuna.png"), "../images/fish/tuna.png");
    }

    #[test]
    fn progress_milestones_are_increasing() {
        assert!(PROGRESS_CONNECTING < PROGRESS_REQUESTS_ISSUED);
        assert!(PROGRESS_REQUESTS_ISSUED < PROGRESS_COLLECTION_PARSED[0]);
        assert!(PROGRESS_COLLECTION_PARSED[1] < PROGRESS_IMAGES_START);
        assert!(PROGRESS_IMAGES_START + PROGRESS_IMAGES_SPAN < PROGRESS_DONE);
    }
}
