// src/app/dom_tests.rs
//! ブラウザの DOM が要るテストだよ！ `wasm-pack test --headless --chrome` で動かしてね。

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{window, Document, HtmlElement};

use crate::app::browser_event_manager::{listen, new_closure_store, query_all, release_all, restart_animation};
use crate::app::dice_view::DomDiceView;
use crate::logic::dice::{DiceView, Rotation};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    window().and_then(|w| w.document()).expect("document should exist in the browser")
}

fn div(document: &Document, class_name: &str) -> HtmlElement {
    let element: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    element.set_class_name(class_name);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

/// 次の requestAnimationFrame まで待つ
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window().unwrap().request_animation_frame(&resolve).unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn query_all_collects_matching_elements() {
    let document = document();
    let first = div(&document, "query-all-probe");
    let second = div(&document, "query-all-probe");

    let found = query_all(&document, ".query-all-probe").unwrap();
    assert_eq!(found.len(), 2);

    first.remove();
    second.remove();
}

#[wasm_bindgen_test]
fn listener_fires_until_released() {
    let document = document();
    let target = div(&document, "listen-probe");
    let store = new_closure_store();

    let clicked = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&clicked);
    listen(&target, "click", &store, move |_event| counter.set(counter.get() + 1)).unwrap();

    target.click();
    target.click();
    assert_eq!(clicked.get(), 2);

    // 要素を消してからクロージャを捨てる
    target.remove();
    release_all(&store);
    assert!(store.lock().unwrap().is_empty());
    println!("リスナーの付け外しテスト、成功！🎉");
}

#[wasm_bindgen_test]
fn restart_animation_leaves_class_applied() {
    let document = document();
    let card = div(&document, "card drawing");
    restart_animation(&card, "drawing").unwrap();
    assert!(card.class_list().contains("drawing"));
    assert!(card.class_list().contains("card"));
    card.remove();
}

#[wasm_bindgen_test]
fn dom_dice_view_writes_transform_and_status() {
    let document = document();
    let dice = div(&document, "dice");
    let result_text = div(&document, "dice-result");

    let mut view = DomDiceView::new(Some(dice.clone()), Some(result_text.clone()), None);
    view.animate_to(Rotation::new(90, 1080));
    view.show_status("骰子滾動中...");
    // ボタンが無くても何も起きない
    view.set_control_enabled(false);

    assert_eq!(
        dice.style().get_property_value("transform").unwrap(),
        "rotateX(90deg) rotateY(1080deg)"
    );
    assert_eq!(result_text.text_content().unwrap(), "骰子滾動中...");

    dice.remove();
    result_text.remove();
}

#[wasm_bindgen_test]
async fn snap_to_resets_rotation_for_one_frame_only() {
    let document = document();
    let dice = div(&document, "dice");
    let mut view = DomDiceView::new(Some(dice.clone()), None, None);

    view.animate_to(Rotation::new(90, 1440));
    view.snap_to(Rotation::new(90, 0));
    // 予約したフレームが来るまでは回転したまま
    assert_eq!(dice.style().get_property_value("transform").unwrap(), "rotateX(90deg) rotateY(1440deg)");

    next_frame().await;
    assert_eq!(dice.style().get_property_value("transform").unwrap(), "rotateX(90deg) rotateY(0deg)");
    assert_eq!(dice.style().get_property_value("transition").unwrap(), "", "transition は元に戻っているはず");

    dice.remove();
    println!("サイコロの角度リセットテスト、成功！🎉");
}

#[wasm_bindgen_test]
async fn newer_roll_cancels_pending_snap() {
    let document = document();
    let dice = div(&document, "dice");
    let mut view = DomDiceView::new(Some(dice.clone()), None, None);

    view.snap_to(Rotation::new(-90, 0));
    view.animate_to(Rotation::new(0, 1260));

    next_frame().await;
    assert_eq!(dice.style().get_property_value("transform").unwrap(), "rotateX(0deg) rotateY(1260deg)");

    dice.remove();
}
