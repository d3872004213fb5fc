// src/app/renderer.rs
//! モーダルとギャラリーの DOM 操作。HTML 自体は `render::card_renderer` が作るよ。

use std::sync::Arc;

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::app::browser_event_manager::{self, listen};
use crate::app::event_handler;
use crate::app::game_app::AppContext;
use crate::components::card::{FateCard, FishCard};
use crate::config::constants::{IMAGE_BASE_PATH, THUMB_BOUNCE_MS};
use crate::render::card_renderer::{render_fate_card_content, render_fish_card_content};

/// 魚カードをどのボタン付きで開くか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FishModalMode {
    /// 引いたばかり → 「集める」
    Drawn,
    /// ギャラリーから → 「削除」
    Collected,
}

fn set_visible(element: &HtmlElement, visible: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force("visible", visible).map(|_| ())
}

/// モーダルを出してポップインのアニメーションを再生する
fn show_modal(ctx: &AppContext) -> Result<(), JsValue> {
    let elements = &ctx.elements;
    elements.modal_overlay.class_list().add_1("active")?;
    elements.modal_card_container.class_list().remove_2("pop-in", "collecting")?;
    let _ = elements.modal_card_container.offset_width();
    elements.modal_card_container.class_list().add_1("pop-in")?;
    browser_event_manager::restart_animation(&elements.card_element, "drawing")
}

pub(crate) fn show_fish(ctx: &AppContext, fish: &FishCard, mode: FishModalMode) -> Result<(), JsValue> {
    let elements = &ctx.elements;
    elements.card_content.set_class_name("card-face card-front");
    elements.card_content.set_inner_html(&render_fish_card_content(fish));
    set_visible(&elements.collect_btn, mode == FishModalMode::Drawn)?;
    set_visible(&elements.delete_btn, mode == FishModalMode::Collected)?;
    show_modal(ctx)
}

pub(crate) fn show_fate(ctx: &AppContext, card: &FateCard) -> Result<(), JsValue> {
    let elements = &ctx.elements;
    elements.card_content.set_class_name("card-face card-front fate-card");
    elements.card_content.set_inner_html(&render_fate_card_content(card));
    set_visible(&elements.collect_btn, false)?;
    set_visible(&elements.delete_btn, false)?;
    show_modal(ctx)
}

pub(crate) fn hide_modal(ctx: &AppContext) -> Result<(), JsValue> {
    let elements = &ctx.elements;
    elements.modal_overlay.class_list().remove_1("active")?;
    set_visible(&elements.collect_btn, false)?;
    set_visible(&elements.delete_btn, false)
}

pub(crate) fn set_collecting(ctx: &AppContext, collecting: bool) -> Result<(), JsValue> {
    ctx.elements.modal_card_container.class_list().toggle_with_force("collecting", collecting).map(|_| ())
}

/// ギャラリーにサムネイルを1枚追加する
pub(crate) fn add_card_to_collection(ctx: &Arc<AppContext>, fish: &FishCard, index: usize) -> Result<(), JsValue> {
    let document = &ctx.elements.document;

    let thumb: HtmlElement = document.create_element("div")?.dyn_into()?;
    thumb.set_class_name("collected-card bounce-in");
    thumb.set_title(&format!("{} - {}", fish.name, fish.capture_condition));
    thumb.dataset().set("index", &index.to_string())?;

    let image = document.create_element("img")?;
    image.set_attribute("src", &format!("{}{}", IMAGE_BASE_PATH, fish.image))?;
    image.set_attribute("alt", &fish.name)?;
    image.set_class_name("collected-card-img");

    let name_label = document.create_element("div")?;
    name_label.set_class_name("collected-card-name");
    name_label.set_text_content(Some(&fish.name));

    thumb.append_child(&image)?;
    thumb.append_child(&name_label)?;

    let click_ctx = Arc::clone(ctx);
    listen(&thumb, "click", &ctx.gallery_closures, move |_event| {
        event_handler::view_collected(&click_ctx, index);
    })?;

    ctx.elements.collection_section.append_child(&thumb)?;
    ctx.elements.collection_section.class_list().add_1("has-cards")?;

    browser_event_manager::set_timeout(THUMB_BOUNCE_MS, move || {
        if let Err(e) = thumb.class_list().remove_1("bounce-in") {
            error!("App::Renderer: failed to clear bounce-in: {:?}", e);
        }
    })
}

/// ギャラリーを今のセッション状態から作り直す (タイトルだけ残す)
pub(crate) fn render_collection(ctx: &Arc<AppContext>) -> Result<(), JsValue> {
    let section = &ctx.elements.collection_section;
    let title = section.query_selector(".collection-section-title")?;

    section.set_inner_html("");
    browser_event_manager::release_all(&ctx.gallery_closures);
    if let Some(title) = &title {
        section.append_child(title)?;
    }

    let fishes: Vec<FishCard> = ctx.with_session(|session| Some(session.collected().as_slice().to_vec())).unwrap_or_default();
    debug!("App::Renderer: rebuilding gallery with {} cards", fishes.len());
    for (index, fish) in fishes.iter().enumerate() {
        add_card_to_collection(ctx, fish, index)?;
    }

    if fishes.is_empty() {
        section.class_list().remove_1("has-cards")?;
    }
    Ok(())
}
