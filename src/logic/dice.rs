// src/logic/dice.rs
//! サイコロの状態機械だよ！🎲
//!
//! 状態は Idle と Rolling の2つだけ。転がっている間の `roll()` は無視される。
//! 画面への反映は `DiceView` に任せるので、ここはブラウザなしでテストできる。

use std::ops::RangeInclusive;

use log::{debug, info};
use rand::Rng;

/// X 軸・Y 軸の回転角 (度)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub x: i32,
    pub y: i32,
}

impl Rotation {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// CSS の transform 値
    pub fn to_css(self) -> String {
        format!("rotateX({}deg) rotateY({}deg)", self.x, self.y)
    }
}

/// 最初の見た目の角度 (ちょっと斜めから見下ろす)
pub const INITIAL_ROTATION: Rotation = Rotation::new(-30, -30);

/// 各面 (1〜6) を正面に向けるための角度。添字は 面 - 1。
pub const FACE_ROTATIONS: [Rotation; 6] = [
    Rotation::new(0, 0),
    Rotation::new(0, -90),
    Rotation::new(90, 0),
    Rotation::new(-90, 0),
    Rotation::new(0, 90),
    Rotation::new(0, 180),
];

/// 追加で回す周回数 (軸ごとに別々に決める)
pub const EXTRA_TURNS: RangeInclusive<i32> = 3..=5;

/// transitionend のうち、これ以外のプロパティは無視する
pub const ROTATION_PROPERTY: &str = "transform";

pub fn face_rotation(face: u8) -> Option<Rotation> {
    FACE_ROTATIONS.get((face as usize).checked_sub(1)?).copied()
}

/// サイコロの見た目を操作する口。ブラウザでは DOM を、テストでは記録係を使う。
pub trait DiceView {
    /// 振るボタン (があれば) の有効・無効
    fn set_control_enabled(&mut self, enabled: bool);
    fn show_status(&mut self, text: &str);
    /// transition を効かせたまま `rotation` まで回す
    fn animate_to(&mut self, rotation: Rotation);
    /// transition を1フレームだけ切って `rotation` に置き直し、すぐ元に戻す
    fn snap_to(&mut self, rotation: Rotation);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceState {
    Idle,
    Rolling { result: u8, target: Rotation },
}

pub struct DiceController<V: DiceView> {
    view: V,
    state: DiceState,
    current: Rotation,
}

impl<V: DiceView> DiceController<V> {
    pub fn new(view: V) -> Self {
        Self { view, state: DiceState::Idle, current: INITIAL_ROTATION }
    }

    pub fn state(&self) -> DiceState {
        self.state
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.state, DiceState::Rolling { .. })
    }

    /// 今の角度 (アニメーション中なら行き先の角度)
    pub fn current_rotation(&self) -> Rotation {
        self.current
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// サイコロを振る！ 出目を返す。
    /// 転がっている最中なら何もしないで `None`。
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u8> {
        if self.is_rolling() {
            debug!("Dice: roll ignored, still rolling");
            return None;
        }

        let result: u8 = rng.gen_range(1..=6);
        let target = FACE_ROTATIONS[result as usize - 1];
        let destination = Rotation::new(
            target.x + rng.gen_range(EXTRA_TURNS) * 360,
            target.y + rng.gen_range(EXTRA_TURNS) * 360,
        );

        self.state = DiceState::Rolling { result, target };
        self.view.set_control_enabled(false);
        self.view.show_status("骰子滾動中...");
        self.view.animate_to(destination);
        self.current = destination;

        info!("Dice: rolling to {} ({:?} -> {:?})", result, target, destination);
        Some(result)
    }

    /// transitionend が来た時に呼ぶ。
    /// `transform` のイベントで、しかも転がっている最中の時だけ止まって出目を返す。
    pub fn on_transition_end(&mut self, property: &str) -> Option<u8> {
        if property != ROTATION_PROPERTY {
            return None;
        }
        let DiceState::Rolling { result, target } = self.state else {
            return None;
        };

        self.state = DiceState::Idle;
        self.view.set_control_enabled(true);
        self.view.show_status(&format!("結果是: {} 點!", result));
        // 周回分を捨てて角度を小さく戻す (見た目は同じ向き)
        self.current = target;
        self.view.snap_to(target);

        debug!("Dice: settled on {}", result);
        Some(result)
    }
}
