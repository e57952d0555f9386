use egui::Pos2;

use crate::camera::{OrbitCamera, WHEEL_ZOOM_RATE};

/// One abstract pointer event regardless of origin device (mouse or touch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Pos2,
    },
}

/// Idle/dragging state machine feeding consecutive-position deltas to the
/// orbit camera. Single-pointer only: a second down while dragging just
/// rewrites the anchor (last-writer-wins).
#[derive(Debug, Default)]
pub struct PointerInput {
    state: DragState,
}

impl PointerInput {
    pub fn handle(&mut self, event: PointerEvent, camera: &mut OrbitCamera) {
        match event {
            PointerEvent::Down(pos) => {
                self.state = DragState::Dragging { last: pos };
            }
            PointerEvent::Move(pos) => {
                if let DragState::Dragging { last } = &mut self.state {
                    let delta = pos - *last;
                    camera.apply_drag(delta.x, delta.y);
                    *last = pos;
                }
            }
            PointerEvent::Up | PointerEvent::Leave => {
                self.state = DragState::Idle;
            }
        }
    }

    /// Wheel zoom bypasses the drag state machine entirely.
    pub fn handle_wheel(&self, delta_y: f32, camera: &mut OrbitCamera) {
        camera.apply_zoom(1.0 + delta_y * WHEEL_ZOOM_RATE);
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
