// src/app/init_handler.rs
//! GameApp の初期化まわり。DOM 要素を id で探して `Elements` にまとめるよ。

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlButtonElement, HtmlElement};

/// ゲームで使う DOM 要素のキャッシュ
///
/// `Option` のものは無くても動く (その機能だけスキップする)。
pub(crate) struct Elements {
    pub document: Document,

    // Loading
    pub loading_overlay: Option<HtmlElement>,
    pub loading_progress_bar: Option<HtmlElement>,
    pub loading_status_text: Option<HtmlElement>,

    // 山札
    pub fish_deck: HtmlElement,
    pub fate_deck: HtmlElement,

    // サイコロ
    pub dice: Option<HtmlElement>,
    pub dice_click_layer: Option<HtmlElement>,
    pub dice_result: Option<HtmlElement>,
    pub dice_button: Option<HtmlButtonElement>,

    // モーダル
    pub modal_overlay: HtmlElement,
    pub modal_card_container: HtmlElement,
    pub card_content: HtmlElement,
    pub card_element: HtmlElement,
    pub collect_btn: HtmlElement,
    pub delete_btn: HtmlElement,

    // ギャラリー
    pub collection_section: HtmlElement,

    // 説明書
    pub help_button: Option<HtmlElement>,
    pub help_modal_overlay: Option<HtmlElement>,
    pub help_close_btn: Option<HtmlElement>,
}

fn find<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id).and_then(|element| element.dyn_into::<T>().ok())
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = find(document, id);
    if found.is_none() {
        warn!("App::Init: optional element #{} not found, feature disabled", id);
    }
    found
}

fn required<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    find(document, id).ok_or_else(|| JsValue::from_str(&format!("required element #{} not found", id)))
}

/// 全部の要素を探す。必須の要素が無ければエラー。
pub(crate) fn initialize_elements() -> Result<Elements, JsValue> {
    let document = window().and_then(|w| w.document()).ok_or("Failed to get document")?;

    Ok(Elements {
        loading_overlay: optional(&document, "loading-overlay"),
        loading_progress_bar: optional(&document, "loading-progress-bar"),
        loading_status_text: optional(&document, "loading-status-text"),

        fish_deck: required(&document, "fish-deck")?,
        fate_deck: required(&document, "fate-deck")?,

        dice: optional(&document, "dice"),
        dice_click_layer: optional(&document, "dice-click-layer"),
        dice_result: find(&document, "dice-result"),
        dice_button: find(&document, "roll-btn"),

        modal_overlay: required(&document, "modal-overlay")?,
        modal_card_container: required(&document, "modal-card-container")?,
        card_content: required(&document, "card-content")?,
        card_element: required(&document, "card-element")?,
        collect_btn: required(&document, "collect-btn")?,
        delete_btn: required(&document, "delete-btn")?,

        collection_section: required(&document, "collection-section")?,

        help_button: optional(&document, "help-button"),
        help_modal_overlay: optional(&document, "help-modal-overlay"),
        help_close_btn: optional(&document, "help-close-btn"),

        document,
    })
}
