// src/app/drag_handler.rs
//! アバター (.fishman-container) のドラッグ処理。マウスとタッチの両方に対応するよ。

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, Event, HtmlElement, MouseEvent, TouchEvent};

use crate::app::browser_event_manager::{listen, listen_active, query_all, ClosureStore};
use crate::components::dragging_info::{DraggingInfo, Rect};

const AVATAR_SELECTOR: &str = ".fishman-container";
const CONTAINER_SELECTOR: &str = ".game-container";

type DragState = Arc<Mutex<Option<DraggingInfo>>>;

fn to_rect(rect: &DomRect) -> Rect {
    Rect { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() }
}

/// マウスでもタッチでも、ポインタの clientX/Y を取り出す
fn pointer_position(event: &Event) -> Option<(f64, f64)> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some((mouse.client_x() as f64, mouse.client_y() as f64));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

fn is_touch(event: &Event) -> bool {
    event.dyn_ref::<TouchEvent>().is_some()
}

/// ページ上の全部のアバターにドラッグ用のリスナーを付ける
pub(crate) fn attach_avatar_drag(document: &Document, store: &ClosureStore) -> Result<(), JsValue> {
    let avatars = query_all(document, AVATAR_SELECTOR)?;
    debug!("App::Drag: attaching drag listeners to {} avatars", avatars.len());

    for avatar in avatars {
        let avatar: HtmlElement = avatar.dyn_into()?;
        let state: DragState = Arc::new(Mutex::new(None));

        for start_event in ["mousedown", "touchstart"] {
            let handler_avatar = avatar.clone();
            let state = Arc::clone(&state);
            listen_active(&avatar, start_event, store, move |event| {
                if let Err(e) = handle_drag_start(&handler_avatar, &state, &event) {
                    error!("App::Drag: drag start failed: {:?}", e);
                }
            })?;
        }

        for move_event in ["mousemove", "touchmove"] {
            let handler_avatar = avatar.clone();
            let state = Arc::clone(&state);
            let handler_document = document.clone();
            listen_active(document, move_event, store, move |event| {
                if let Err(e) = update_dragged_position(&handler_document, &handler_avatar, &state, &event) {
                    error!("App::Drag: drag update failed: {:?}", e);
                }
            })?;
        }

        for end_event in ["mouseup", "touchend"] {
            let handler_avatar = avatar.clone();
            let state = Arc::clone(&state);
            listen(document, end_event, store, move |_event| {
                handle_drag_end(&handler_avatar, &state);
            })?;
        }
    }
    Ok(())
}

fn handle_drag_start(avatar: &HtmlElement, state: &DragState, event: &Event) -> Result<(), JsValue> {
    // 子要素経由でも、いちばん近いアバターが自分の時だけ
    let owner = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|target| target.closest(AVATAR_SELECTOR).ok().flatten());
    let avatar_element: &Element = avatar;
    if owner.as_ref() != Some(avatar_element) {
        return Ok(());
    }
    let Some((pointer_x, pointer_y)) = pointer_position(event) else {
        return Ok(());
    };

    let rect = to_rect(&avatar.get_bounding_client_rect());
    *state.lock().unwrap_or_else(PoisonError::into_inner) = Some(DraggingInfo::start(pointer_x, pointer_y, rect));
    avatar.class_list().add_1("dragging")?;

    // right/bottom 基準から left/top 基準の fixed 配置に切り替える
    let style = avatar.style();
    style.set_property("right", "auto")?;
    style.set_property("bottom", "auto")?;
    style.set_property("left", &format!("{}px", rect.left))?;
    style.set_property("top", &format!("{}px", rect.top))?;
    style.set_property("position", "fixed")?;

    if is_touch(event) {
        event.prevent_default();
    }
    Ok(())
}

fn update_dragged_position(
    document: &Document,
    avatar: &HtmlElement,
    state: &DragState,
    event: &Event,
) -> Result<(), JsValue> {
    let Some(info) = *state.lock().unwrap_or_else(PoisonError::into_inner) else {
        return Ok(());
    };
    let Some((pointer_x, pointer_y)) = pointer_position(event) else {
        return Ok(());
    };
    let container = document
        .query_selector(CONTAINER_SELECTOR)?
        .ok_or_else(|| JsValue::from_str("game container not found"))?;

    let (x, y) = info.position_for(
        pointer_x,
        pointer_y,
        to_rect(&container.get_bounding_client_rect()),
        to_rect(&avatar.get_bounding_client_rect()),
    );
    let style = avatar.style();
    style.set_property("left", &format!("{}px", x))?;
    style.set_property("top", &format!("{}px", y))?;

    if is_touch(event) {
        event.prevent_default();
    }
    Ok(())
}

fn handle_drag_end(avatar: &HtmlElement, state: &DragState) {
    if state.lock().unwrap_or_else(PoisonError::into_inner).take().is_none() {
        return;
    }
    if let Err(e) = avatar.class_list().remove_1("dragging") {
        error!("App::Drag: failed to clear dragging class: {:?}", e);
    }
}
