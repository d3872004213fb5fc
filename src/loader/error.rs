// src/loader/error.rs

use thiserror::Error;
use wasm_bindgen::JsValue;

/// データ読み込みのエラー
#[derive(Error, Debug)]
pub enum LoadError {
    /// HTTP ステータスが成功じゃなかった
    #[error("request to {url} failed with status {status}")]
    Transport { url: String, status: u16 },

    /// ボディが期待した JSON じゃなかった
    #[error("could not parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// 画像1枚の読み込み失敗 (致命的ではない)
    #[error("image {path} failed to load: {reason}")]
    ImageLoad { path: String, reason: String },

    /// ブラウザ API が例外を投げた
    #[error("browser error: {0}")]
    Browser(String),
}

impl LoadError {
    pub fn from_js(value: JsValue) -> Self {
        LoadError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<LoadError> for JsValue {
    fn from(error: LoadError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
