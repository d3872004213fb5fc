// src/loader/source.rs

// ネットワーク I/O の差し替え口だよ！
// ブラウザでは `BrowserDataSource` (fetch + Image)、テストでは台本どおりに答える偽物を使う。
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Response};

use crate::loader::error::LoadError;

/// データの取得元。
///
/// Wasm はシングルスレッドなので、返すのは `Send` じゃない `LocalBoxFuture` でOK。
pub trait DataSource {
    /// 読み込んだ画像のハンドル
    type Image: Clone;

    /// URL の中身をテキストで取ってくる。
    /// ステータスが成功じゃなければ `LoadError::Transport`。
    fn fetch_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, LoadError>>;

    /// 画像を1枚読み込む。失敗したら `LoadError::ImageLoad`。
    fn load_image<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Self::Image, LoadError>>;
}

/// ブラウザの `window.fetch` と `HtmlImageElement` を使う実装
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDataSource;

impl BrowserDataSource {
    pub fn new() -> Self {
        Self
    }
}

impl DataSource for BrowserDataSource {
    type Image = HtmlImageElement;

    fn fetch_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, LoadError>> {
        fetch_text(url).boxed_local()
    }

    fn load_image<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HtmlImageElement, LoadError>> {
        load_image(url).boxed_local()
    }
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Browser("no global window".to_string()))?;

    // fetch 自体が reject されるのはネットワークエラーの時。ステータス 0 として扱う
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|_| LoadError::Transport { url: url.to_string(), status: 0 })?;
    let response: Response = response_value.dyn_into().map_err(LoadError::from_js)?;

    if !response.ok() {
        return Err(LoadError::Transport { url: url.to_string(), status: response.status() });
    }
    debug!("BrowserDataSource: {} -> {}", url, response.status());

    let text = JsFuture::from(response.text().map_err(LoadError::from_js)?)
        .await
        .map_err(LoadError::from_js)?;
    text.as_string().ok_or_else(|| LoadError::Browser(format!("response body of {} is not text", url)))
}

async fn load_image(url: &str) -> Result<HtmlImageElement, LoadError> {
    let image = HtmlImageElement::new().map_err(LoadError::from_js)?;

    // onload / onerror のどちらか先に来た方だけが送れる
    let (sender, receiver) = oneshot::channel::<Result<(), String>>();
    let sender = Arc::new(Mutex::new(Some(sender)));

    let onload_sender = Arc::clone(&sender);
    let onload = Closure::wrap(Box::new(move || {
        if let Some(tx) = onload_sender.lock().ok().and_then(|mut s| s.take()) {
            let _ = tx.send(Ok(()));
        }
    }) as Box<dyn FnMut()>);

    let onerror_sender = Arc::clone(&sender);
    let onerror = Closure::wrap(Box::new(move || {
        if let Some(tx) = onerror_sender.lock().ok().and_then(|mut s| s.take()) {
            let _ = tx.send(Err("error event".to_string()));
        }
    }) as Box<dyn FnMut()>);

    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    image.set_src(url);

    let outcome = receiver.await;

    // ハンドラを外してからクロージャを drop する
    image.set_onload(None);
    image.set_onerror(None);
    drop(onload);
    drop(onerror);

    match outcome {
        Ok(Ok(())) => Ok(image),
        Ok(Err(reason)) => Err(LoadError::ImageLoad { path: url.to_string(), reason }),
        Err(_) => Err(LoadError::ImageLoad { path: url.to_string(), reason: "load was cancelled".to_string() }),
    }
}
