// src/app/help_manual.rs
//! 説明書モーダル (開く・閉じる・タブ切り替え) 📖

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::app::browser_event_manager::{listen, query_all, ClosureStore};
use crate::app::init_handler::Elements;

const TAB_SELECTOR: &str = ".help-tab";
const TAB_CONTENT_SELECTOR: &str = ".help-tab-content";

/// 説明書まわりのリスナーを付ける。ボタンかオーバーレイが無ければ何もしない。
pub(crate) fn attach_help_manual(elements: &Elements, store: &ClosureStore) -> Result<(), JsValue> {
    let (Some(button), Some(overlay)) = (&elements.help_button, &elements.help_modal_overlay) else {
        warn!("App::Help: help manual elements missing, skipping");
        return Ok(());
    };

    let open_overlay = overlay.clone();
    listen(button, "click", store, move |_event| {
        set_open(&open_overlay, true);
    })?;

    // 背景そのものをクリックした時だけ閉じる
    let background_overlay = overlay.clone();
    listen(overlay, "click", store, move |event| {
        let clicked_background = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
            .is_some_and(|target| target == background_overlay);
        if clicked_background {
            set_open(&background_overlay, false);
        }
    })?;

    if let Some(close_btn) = &elements.help_close_btn {
        let close_overlay = overlay.clone();
        listen(close_btn, "click", store, move |_event| {
            set_open(&close_overlay, false);
        })?;
    }

    let tabs = query_all(&elements.document, TAB_SELECTOR)?;
    debug!("App::Help: wiring {} tabs", tabs.len());
    for tab in tabs {
        let document = elements.document.clone();
        let clicked_tab = tab.clone();
        listen(&tab, "click", store, move |_event: Event| {
            if let Err(e) = switch_tab(&document, &clicked_tab) {
                warn!("App::Help: failed to switch tab: {:?}", e);
            }
        })?;
    }
    Ok(())
}

fn set_open(overlay: &HtmlElement, open: bool) {
    if let Err(e) = overlay.class_list().toggle_with_force("active", open) {
        warn!("App::Help: failed to toggle help overlay: {:?}", e);
    }
}

/// 全部のタブと中身から active を外して、押されたタブと `tab-{data-tab}` にだけ付ける
fn switch_tab(document: &Document, tab: &Element) -> Result<(), JsValue> {
    for element in query_all(document, TAB_SELECTOR)?.into_iter().chain(query_all(document, TAB_CONTENT_SELECTOR)?) {
        element.class_list().remove_1("active")?;
    }
    tab.class_list().add_1("active")?;

    let Some(tab_name) = tab.get_attribute("data-tab") else {
        return Ok(());
    };
    if let Some(content) = document.get_element_by_id(&format!("tab-{}", tab_name)) {
        content.class_list().add_1("active")?;
    }
    Ok(())
}
