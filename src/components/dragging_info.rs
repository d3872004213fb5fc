// src/components/dragging_info.rs

/// 画面上の矩形 (left/top と幅・高さ)。`DomRect` から作る想定だよ。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// ドラッグ中のアバターに関する情報だよ！🖱️➡️🧍
///
/// ドラッグ開始時のポインタ位置と、その時のアバターの左上座標を覚えておく。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraggingInfo {
    /// ドラッグ開始地点の X 座標 (clientX)
    pub start_x: f64,
    /// ドラッグ開始地点の Y 座標 (clientY)
    pub start_y: f64,
    /// ドラッグ開始時のアバターの left
    pub initial_x: f64,
    /// ドラッグ開始時のアバターの top
    pub initial_y: f64,
}

impl DraggingInfo {
    pub fn start(pointer_x: f64, pointer_y: f64, avatar: Rect) -> Self {
        Self { start_x: pointer_x, start_y: pointer_y, initial_x: avatar.left, initial_y: avatar.top }
    }

    /// ポインタが (pointer_x, pointer_y) に来た時のアバターの新しい left/top。
    /// コンテナからはみ出さないように 0..=(コンテナ - アバター) にクランプする。
    pub fn position_for(&self, pointer_x: f64, pointer_y: f64, container: Rect, avatar: Rect) -> (f64, f64) {
        let new_x = self.initial_x + (pointer_x - self.start_x);
        let new_y = self.initial_y + (pointer_y - self.start_y);
        (
            clamp_axis(new_x, container.width - avatar.width),
            clamp_axis(new_y, container.height - avatar.height),
        )
    }
}

// max が負 (アバターの方が大きい) の時も 0 に寄せる
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
