// src/app/browser_event_manager.rs
//! ブラウザのイベントリスナーやタイマーを付けるための小さなヘルパー集。
//!
//! `Closure` は drop されると JS から呼べなくなるので、付けたリスナーは
//! `ClosureStore` に入れて持っておく。

use std::sync::{Arc, Mutex, PoisonError};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

/// 付けっぱなしのリスナーのクロージャを保持する入れ物
pub(crate) type ClosureStore = Arc<Mutex<Vec<Closure<dyn FnMut(Event)>>>>;

pub(crate) fn new_closure_store() -> ClosureStore {
    Arc::new(Mutex::new(Vec::new()))
}

fn keep(store: &ClosureStore, closure: Closure<dyn FnMut(Event)>) {
    store.lock().unwrap_or_else(PoisonError::into_inner).push(closure);
}

/// 保持しているクロージャを全部捨てる。
/// 対応する DOM 要素を先に消しておくこと (残っていると呼ばれた時に例外になる)。
pub(crate) fn release_all(store: &ClosureStore) {
    store.lock().unwrap_or_else(PoisonError::into_inner).clear();
}

/// `target` に `event_name` のリスナーを付ける
pub(crate) fn listen<F>(target: &EventTarget, event_name: &str, store: &ClosureStore, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
    keep(store, closure);
    Ok(())
}

/// passive: false で付ける (タッチ中に preventDefault したい時用)
pub(crate) fn listen_active<F>(
    target: &EventTarget,
    event_name: &str,
    store: &ClosureStore,
    handler: F,
) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event_name,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    keep(store, closure);
    Ok(())
}

/// `delay_ms` 後に1回だけ `f` を呼ぶ
pub(crate) fn set_timeout<F>(delay_ms: i32, f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let window = window().ok_or("Failed to get window")?;
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)?;
    Ok(())
}

/// 次のフレームで1回だけ `f` を呼ぶ
pub(crate) fn request_animation_frame<F>(f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let window = window().ok_or("Failed to get window")?;
    let callback = Closure::once_into_js(f);
    window.request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

/// CSS アニメーションをもう一度最初から再生させる (クラスを外す → reflow → 付け直す)
pub(crate) fn restart_animation(element: &HtmlElement, class_name: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class_name)?;
    let _ = element.offset_width();
    element.class_list().add_1(class_name)
}

/// `querySelectorAll` の結果を Element の Vec にする
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
