use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};
use nalgebra::Vector3;

use crate::camera::OrbitCamera;
use crate::scene::{PrimitiveKind, SceneGraph};

// World-space arrow head dimensions, shared by every arrow.
const HEAD_LENGTH: f32 = 0.2;
const HEAD_WIDTH: f32 = 0.1;

const AXIS_COLORS: [Color32; 3] = [
    Color32::from_rgb(0xe5, 0x4a, 0x4a), // x
    Color32::from_rgb(0x4a, 0xe5, 0x4a), // y
    Color32::from_rgb(0x4a, 0x6a, 0xe5), // z
];

/// Walk the scene graph once per frame: rebuild the projection from the
/// orbit state, paint fixed primitives, then the derived arrows on top.
/// Sprites are drawn as screen-space text at their projected position, so
/// they face the camera every frame by construction.
pub fn draw_scene(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, graph: &SceneGraph) {
    let view = camera.view_matrix();
    let distance = camera.distance();
    // 75-degree vertical field of view.
    let focal = rect.height() * 0.5 / (37.5f32.to_radians().tan());

    let project = |v: Vector3<f32>| {
        let v_view = view * v;
        let factor = focal / (distance - v_view.z).max(0.1);
        rect.center() + egui::vec2(v_view.x * factor, -v_view.y * factor)
    };

    for primitive in graph.primitives() {
        match &primitive.kind {
            PrimitiveKind::Grid { size, divisions } => {
                draw_grid(painter, &project, *size, *divisions);
            }
            PrimitiveKind::Axes { length } => draw_axes(painter, &project, *length),
            PrimitiveKind::Label { text, position } => {
                painter.text(
                    project(*position),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(16.0),
                    Color32::BLACK,
                );
            }
            PrimitiveKind::AxisNumber { text, position } => {
                if graph.show_axis_numbers() {
                    painter.text(
                        project(*position),
                        Align2::CENTER_CENTER,
                        text,
                        FontId::proportional(10.0),
                        Color32::DARK_GRAY,
                    );
                }
            }
            PrimitiveKind::Arrow {
                direction,
                length,
                color,
            } => {
                let shade = graph.light_intensity(direction);
                draw_arrow(painter, &project, *direction, *length, *color, shade);
            }
            // Lights have no geometry; they feed light_intensity above.
            PrimitiveKind::AmbientLight { .. } | PrimitiveKind::DirectionalLight { .. } => {}
        }
    }
}

fn draw_grid(
    painter: &egui::Painter,
    project: &impl Fn(Vector3<f32>) -> Pos2,
    size: f32,
    divisions: u32,
) {
    let half = size * 0.5;
    let step = size / divisions as f32;

    for i in 0..=divisions {
        let t = -half + i as f32 * step;
        let color = if t == 0.0 {
            Color32::from_rgba_unmultiplied(0x88, 0x88, 0x88, 128)
        } else {
            Color32::from_rgba_unmultiplied(0xdd, 0xdd, 0xdd, 128)
        };
        let stroke = Stroke::new(1.0, color);
        painter.line_segment(
            [
                project(Vector3::new(t, 0.0, -half)),
                project(Vector3::new(t, 0.0, half)),
            ],
            stroke,
        );
        painter.line_segment(
            [
                project(Vector3::new(-half, 0.0, t)),
                project(Vector3::new(half, 0.0, t)),
            ],
            stroke,
        );
    }
}

fn draw_axes(painter: &egui::Painter, project: &impl Fn(Vector3<f32>) -> Pos2, length: f32) {
    for axis in 0..3 {
        let mut end = Vector3::zeros();
        end[axis] = length;
        painter.line_segment(
            [project(Vector3::zeros()), project(end)],
            Stroke::new(2.0, AXIS_COLORS[axis]),
        );
    }
}

fn draw_arrow(
    painter: &egui::Painter,
    project: &impl Fn(Vector3<f32>) -> Pos2,
    direction: Vector3<f32>,
    length: f32,
    color: Color32,
    shade: f32,
) {
    let tip_world = direction * length;
    let tip = project(tip_world);
    let start = project(Vector3::zeros());
    let base = project(tip_world - direction * HEAD_LENGTH.min(length));

    painter.line_segment([start, tip], Stroke::new(2.5, color));

    // Head triangle in screen space, sized from the projected head length.
    let shaft = tip - base;
    let head_len = shaft.length();
    if head_len < 1.0 {
        return;
    }
    let dir = shaft / head_len;
    let perp = egui::vec2(-dir.y, dir.x) * (head_len * HEAD_WIDTH / HEAD_LENGTH);

    painter.add(egui::Shape::convex_polygon(
        vec![tip, base + perp, base - perp],
        shade_color(color, shade),
        Stroke::NONE,
    ));
}

fn shade_color(color: Color32, shade: f32) -> Color32 {
    let s = shade.clamp(0.0, 1.0);
    Color32::from_rgb(
        (color.r() as f32 * s) as u8,
        (color.g() as f32 * s) as u8,
        (color.b() as f32 * s) as u8,
    )
}
