// src/app/dice_view.rs
//! `DiceView` の DOM 実装。CSS の transform でサイコロを回すよ 🎲

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, error};
use web_sys::{HtmlButtonElement, HtmlElement};

use crate::app::browser_event_manager;
use crate::logic::dice::{DiceView, Rotation};

pub(crate) struct DomDiceView {
    dice: Option<HtmlElement>,
    result_text: Option<HtmlElement>,
    button: Option<HtmlButtonElement>,
    /// `animate_to` のたびに増える。古い `snap_to` の予約を見分けるのに使う
    generation: Rc<Cell<u64>>,
}

impl DomDiceView {
    pub(crate) fn new(
        dice: Option<HtmlElement>,
        result_text: Option<HtmlElement>,
        button: Option<HtmlButtonElement>,
    ) -> Self {
        Self { dice, result_text, button, generation: Rc::new(Cell::new(0)) }
    }
}

impl DiceView for DomDiceView {
    fn set_control_enabled(&mut self, enabled: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(!enabled);
        }
    }

    fn show_status(&mut self, text: &str) {
        if let Some(result_text) = &self.result_text {
            result_text.set_text_content(Some(text));
        }
    }

    fn animate_to(&mut self, rotation: Rotation) {
        let Some(dice) = &self.dice else {
            return;
        };
        self.generation.set(self.generation.get() + 1);
        // reflow させてからじゃないとアニメーションが始まらないことがある
        let _ = dice.offset_height();
        if let Err(e) = dice.style().set_property("transform", &rotation.to_css()) {
            error!("App::Dice: failed to set transform: {:?}", e);
        }
    }

    fn snap_to(&mut self, rotation: Rotation) {
        let Some(dice) = self.dice.clone() else {
            return;
        };
        let generation = Rc::clone(&self.generation);
        let scheduled_at = generation.get();
        let scheduled = browser_event_manager::request_animation_frame(move || {
            // 同じフレーム内にもう次の回転が始まっていたら置き直さない
            if generation.get() != scheduled_at {
                debug!("App::Dice: skipped stale normalization");
                return;
            }
            let style = dice.style();
            let snapped = style
                .set_property("transition", "none")
                .and_then(|_| style.set_property("transform", &rotation.to_css()))
                .and_then(|_| {
                    let _ = dice.offset_height();
                    style.remove_property("transition").map(|_| ())
                });
            if let Err(e) = snapped {
                error!("App::Dice: failed to normalize rotation: {:?}", e);
            }
        });
        if let Err(e) = scheduled {
            error!("App::Dice: failed to schedule normalization: {:?}", e);
        }
    }
}
