use egui::Color32;
use nalgebra::Vector3;

use crate::color;
use crate::math::CalcResult;

/// Lifetime class of a primitive, set once at creation. Synchronization
/// filters on this tag, never on what the primitive happens to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Survives every data change: lights, grid, axes, labels, sprites.
    Fixed,
    /// Rebuilt from the vector list and result on every change.
    Derived,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveKind {
    AmbientLight {
        intensity: f32,
    },
    DirectionalLight {
        intensity: f32,
        direction: Vector3<f32>,
    },
    /// Positive half-axes in the conventional x/y/z colors.
    Axes {
        length: f32,
    },
    /// Ground grid on the XZ plane, centered on the origin.
    Grid {
        size: f32,
        divisions: u32,
    },
    /// Screen-facing text at a world position: axis-end letters.
    Label {
        text: String,
        position: Vector3<f32>,
    },
    /// Screen-facing digit on an axis; hidden and shown as a whole group.
    AxisNumber {
        text: String,
        position: Vector3<f32>,
    },
    Arrow {
        direction: Vector3<f32>,
        length: f32,
        color: Color32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub category: Category,
    pub kind: PrimitiveKind,
}

pub const AXIS_LENGTH: f32 = 5.0;
pub const GRID_SIZE: f32 = 10.0;
pub const GRID_DIVISIONS: u32 = 10;
pub const AXIS_NUMBER_RANGE: i32 = 10;

pub struct SceneGraph {
    primitives: Vec<Primitive>,
    show_axis_numbers: bool,
}

impl SceneGraph {
    /// Build the fixed set once. Axis-number sprites are created here and
    /// never again; toggling only flips `show_axis_numbers`.
    pub fn new() -> Self {
        let mut primitives = vec![
            fixed(PrimitiveKind::AmbientLight { intensity: 0.6 }),
            fixed(PrimitiveKind::DirectionalLight {
                intensity: 0.6,
                direction: Vector3::new(10.0, 10.0, 10.0).normalize(),
            }),
            fixed(PrimitiveKind::Axes {
                length: AXIS_LENGTH,
            }),
            fixed(PrimitiveKind::Grid {
                size: GRID_SIZE,
                divisions: GRID_DIVISIONS,
            }),
        ];

        for (text, position) in [
            ("X", Vector3::new(AXIS_LENGTH + 0.5, 0.0, 0.0)),
            ("Y", Vector3::new(0.0, AXIS_LENGTH + 0.5, 0.0)),
            ("Z", Vector3::new(0.0, 0.0, AXIS_LENGTH + 0.5)),
        ] {
            primitives.push(fixed(PrimitiveKind::Label {
                text: text.to_owned(),
                position,
            }));
        }

        for axis in 0..3 {
            for n in -AXIS_NUMBER_RANGE..=AXIS_NUMBER_RANGE {
                if n == 0 {
                    continue;
                }
                let mut position = Vector3::zeros();
                position[axis] = n as f32;
                primitives.push(fixed(PrimitiveKind::AxisNumber {
                    text: n.to_string(),
                    position,
                }));
            }
        }

        Self {
            primitives,
            show_axis_numbers: false,
        }
    }

    /// Rebuild the derived set from the current data. Fixed primitives are
    /// untouched; all previous arrows are dropped first.
    pub fn sync(&mut self, vectors: &[Vector3<f32>], result: Option<&CalcResult>) {
        self.primitives.retain(|p| p.category == Category::Fixed);

        for (index, vector) in vectors.iter().enumerate() {
            let length = vector.norm();
            // Zero-magnitude vectors have no direction to draw.
            if length > 0.0 {
                self.primitives.push(Primitive {
                    category: Category::Derived,
                    kind: PrimitiveKind::Arrow {
                        direction: vector / length,
                        length,
                        color: color::vector_color(index, vectors.len()),
                    },
                });
            }
        }

        if let Some(vector) = result.and_then(CalcResult::as_vector) {
            let length = vector.norm();
            if length > 0.0 {
                self.primitives.push(Primitive {
                    category: Category::Derived,
                    kind: PrimitiveKind::Arrow {
                        direction: vector / length,
                        length,
                        color: color::RESULT_COLOR,
                    },
                });
            }
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn set_show_axis_numbers(&mut self, show: bool) {
        self.show_axis_numbers = show;
    }

    pub fn show_axis_numbers(&self) -> bool {
        self.show_axis_numbers
    }

    /// Combined light intensity, used to shade filled shapes.
    pub fn light_intensity(&self, surface_direction: &Vector3<f32>) -> f32 {
        let mut total = 0.0;
        for primitive in &self.primitives {
            match &primitive.kind {
                PrimitiveKind::AmbientLight { intensity } => total += intensity,
                PrimitiveKind::DirectionalLight {
                    intensity,
                    direction,
                } => {
                    total += intensity * surface_direction.dot(direction).max(0.0);
                }
                _ => {}
            }
        }
        total.min(1.0)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn fixed(kind: PrimitiveKind) -> Primitive {
    Primitive {
        category: Category::Fixed,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
        Vector3::new(x, y, z)
    }

    fn count_arrows(graph: &SceneGraph) -> usize {
        graph
            .primitives()
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::Arrow { .. }))
            .count()
    }

    fn count_axis_numbers(graph: &SceneGraph) -> usize {
        graph
            .primitives()
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::AxisNumber { .. }))
            .count()
    }

    #[test]
    fn fixed_set_survives_repeated_sync() {
        let mut graph = SceneGraph::new();
        let fixed_before = graph
            .primitives()
            .iter()
            .filter(|p| p.category == Category::Fixed)
            .count();

        for _ in 0..3 {
            graph.sync(&[v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)], None);
        }

        let fixed_after = graph
            .primitives()
            .iter()
            .filter(|p| p.category == Category::Fixed)
            .count();
        assert_eq!(fixed_before, fixed_after);
        assert_eq!(count_arrows(&graph), 2);
    }

    #[test]
    fn one_arrow_per_nonzero_vector() {
        let mut graph = SceneGraph::new();
        graph.sync(
            &[v(1.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0)],
            None,
        );
        // The zero vector is skipped, not drawn at zero length.
        assert_eq!(count_arrows(&graph), 2);
    }

    #[test]
    fn vector_result_adds_a_reserved_color_arrow() {
        let mut graph = SceneGraph::new();
        let result = CalcResult::Vector(v(1.0, 1.0, 0.0));
        graph.sync(&[v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)], Some(&result));
        assert_eq!(count_arrows(&graph), 3);

        let reserved = graph
            .primitives()
            .iter()
            .filter(|p| {
                matches!(
                    p.kind,
                    PrimitiveKind::Arrow { color, .. } if color == color::RESULT_COLOR
                )
            })
            .count();
        assert_eq!(reserved, 1);
    }

    #[test]
    fn scalar_result_adds_no_arrow() {
        let mut graph = SceneGraph::new();
        let result = CalcResult::Scalar(32.0);
        graph.sync(&[v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)], Some(&result));
        assert_eq!(count_arrows(&graph), 2);
    }

    #[test]
    fn zero_vector_result_adds_no_arrow() {
        let mut graph = SceneGraph::new();
        let result = CalcResult::Vector(v(0.0, 0.0, 0.0));
        graph.sync(&[v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)], Some(&result));
        assert_eq!(count_arrows(&graph), 2);
    }

    #[test]
    fn axis_number_toggle_preserves_sprite_count() {
        let mut graph = SceneGraph::new();
        // 20 digits per axis, zero excluded.
        assert_eq!(count_axis_numbers(&graph), 60);

        graph.set_show_axis_numbers(true);
        assert_eq!(count_axis_numbers(&graph), 60);
        assert!(graph.show_axis_numbers());

        graph.set_show_axis_numbers(false);
        assert_eq!(count_axis_numbers(&graph), 60);
        assert!(!graph.show_axis_numbers());
    }

    #[test]
    fn lighting_combines_ambient_and_directional() {
        let graph = SceneGraph::new();
        let toward_light = Vector3::new(1.0, 1.0, 1.0).normalize();
        let away = -toward_light;
        assert!(graph.light_intensity(&toward_light) > graph.light_intensity(&away));
        // Ambient term alone still lights back-facing directions.
        assert!(graph.light_intensity(&away) > 0.0);
    }
}
