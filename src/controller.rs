use log::{debug, info, warn};
use nalgebra::Vector3;
use rand::Rng;

use crate::camera::{OrbitCamera, ZOOM_IN_STEP, ZOOM_OUT_STEP};
use crate::interaction::{PointerEvent, PointerInput};
use crate::math::{self, CalcResult, Operation};
use crate::scene::SceneGraph;

/// Minimum vector count; removals below this are rejected.
pub const MIN_VECTORS: usize = 2;

/// Owns the vector list, the computed result, the orbit camera and the scene
/// graph, and keeps them consistent: every list mutation clears the result
/// and resynchronizes the derived primitives.
pub struct SceneController {
    vectors: Vec<Vector3<f32>>,
    operation: Operation,
    result: Option<CalcResult>,
    notice: Option<String>,
    camera: OrbitCamera,
    pointer: PointerInput,
    scene: SceneGraph,
}

impl SceneController {
    pub fn new() -> Self {
        let mut controller = Self {
            vectors: vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)],
            operation: Operation::None,
            result: None,
            notice: None,
            camera: OrbitCamera::default(),
            pointer: PointerInput::default(),
            scene: SceneGraph::new(),
        };
        controller.sync_scene();
        info!(
            "scene initialized with {} vectors",
            controller.vectors.len()
        );
        controller
    }

    // --- Vector list ---

    pub fn vectors(&self) -> &[Vector3<f32>] {
        &self.vectors
    }

    pub fn vector_label(index: usize) -> String {
        if index < 26 {
            format!("Vector {}", (b'A' + index as u8) as char)
        } else {
            format!("Vector {}", index + 1)
        }
    }

    pub fn set_vectors(&mut self, vectors: Vec<Vector3<f32>>) {
        if vectors.len() < MIN_VECTORS {
            warn!("rejected set_vectors with {} vectors", vectors.len());
            return;
        }
        self.vectors = vectors;
        self.invalidate_result();
    }

    pub fn set_component(&mut self, index: usize, component: usize, value: f32) {
        if let Some(vector) = self.vectors.get_mut(index) {
            let mut next = *vector;
            next[component] = value;
            *vector = next;
            self.invalidate_result();
        }
    }

    pub fn add_vector(&mut self) {
        self.vectors.push(Vector3::zeros());
        self.invalidate_result();
    }

    /// No-op when the list is already at the minimum length.
    pub fn remove_vector(&mut self, index: usize) {
        if self.vectors.len() <= MIN_VECTORS {
            warn!("rejected removal: list already at minimum length");
            return;
        }
        if index < self.vectors.len() {
            self.vectors.remove(index);
            self.invalidate_result();
        }
    }

    pub fn randomize_vector(&mut self, index: usize) {
        let mut rng = rand::thread_rng();
        // Steps of 0.5 in [-3, 3], readable values in the inputs.
        let component = |rng: &mut rand::rngs::ThreadRng| rng.gen_range(-6..=6) as f32 * 0.5;
        if index < self.vectors.len() {
            let v = Vector3::new(component(&mut rng), component(&mut rng), component(&mut rng));
            self.vectors[index] = v;
            self.invalidate_result();
        }
    }

    // --- Calculation ---

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    pub fn result(&self) -> Option<&CalcResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn calculate(&mut self) {
        match math::evaluate(self.operation, &self.vectors) {
            Ok(result) => {
                debug!("{:?} over {} vectors -> {:?}", self.operation, self.vectors.len(), result);
                self.result = result;
                self.notice = None;
            }
            Err(err) => {
                warn!("calculation aborted: {err}");
                self.result = None;
                self.notice = Some(err.to_string());
            }
        }
        self.sync_scene();
    }

    // --- Camera and pointer ---

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn pointer_event(&mut self, event: PointerEvent) {
        self.pointer.handle(event, &mut self.camera);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.pointer.handle_wheel(delta_y, &mut self.camera);
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_dragging()
    }

    pub fn zoom_in(&mut self) {
        self.camera.apply_zoom(ZOOM_IN_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.camera.apply_zoom(ZOOM_OUT_STEP);
    }

    // --- Scene ---

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn show_axis_numbers(&self) -> bool {
        self.scene.show_axis_numbers()
    }

    pub fn set_show_axis_numbers(&mut self, show: bool) {
        self.scene.set_show_axis_numbers(show);
    }

    fn invalidate_result(&mut self) {
        self.result = None;
        self.notice = None;
        self.sync_scene();
    }

    fn sync_scene(&mut self) {
        self.scene.sync(&self.vectors, self.result.as_ref());
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneController {
    fn drop(&mut self) {
        info!("scene torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PrimitiveKind;

    fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
        Vector3::new(x, y, z)
    }

    fn arrow_count(controller: &SceneController) -> usize {
        controller
            .scene()
            .primitives()
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::Arrow { .. }))
            .count()
    }

    #[test]
    fn starts_with_the_two_default_vectors() {
        let controller = SceneController::new();
        assert_eq!(
            controller.vectors(),
            &[v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)]
        );
        assert_eq!(arrow_count(&controller), 2);
    }

    #[test]
    fn add_of_defaults_is_one_one_zero() {
        let mut controller = SceneController::new();
        controller.set_operation(Operation::Add);
        controller.calculate();
        assert_eq!(
            controller.result(),
            Some(&CalcResult::Vector(v(1.0, 1.0, 0.0)))
        );
        // Two inputs plus the result arrow.
        assert_eq!(arrow_count(&controller), 3);
    }

    #[test]
    fn cross_of_defaults_is_z() {
        let mut controller = SceneController::new();
        controller.set_operation(Operation::Cross);
        controller.calculate();
        assert_eq!(
            controller.result(),
            Some(&CalcResult::Vector(v(0.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn dot_requires_exactly_two_vectors() {
        let mut controller = SceneController::new();
        controller.add_vector();
        controller.set_component(2, 2, 1.0);
        controller.set_operation(Operation::Dot);
        controller.calculate();
        assert_eq!(controller.result(), None);
        assert!(controller.notice().unwrap().contains("exactly 2"));
    }

    #[test]
    fn every_list_mutation_clears_the_result() {
        let mut controller = SceneController::new();
        controller.set_operation(Operation::Add);

        controller.calculate();
        assert!(controller.result().is_some());
        controller.add_vector();
        assert!(controller.result().is_none());

        controller.calculate();
        assert!(controller.result().is_some());
        controller.remove_vector(2);
        assert!(controller.result().is_none());

        controller.calculate();
        assert!(controller.result().is_some());
        controller.set_component(0, 1, 3.0);
        assert!(controller.result().is_none());

        controller.calculate();
        assert!(controller.result().is_some());
        controller.set_vectors(vec![v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)]);
        assert!(controller.result().is_none());
    }

    #[test]
    fn removal_below_two_is_rejected() {
        let mut controller = SceneController::new();
        controller.remove_vector(1);
        assert_eq!(controller.vectors().len(), 2);

        controller.add_vector();
        controller.remove_vector(2);
        assert_eq!(controller.vectors().len(), 2);
    }

    #[test]
    fn set_vectors_below_two_is_rejected() {
        let mut controller = SceneController::new();
        let before = controller.vectors().to_vec();
        controller.set_vectors(vec![v(1.0, 0.0, 0.0)]);
        assert_eq!(controller.vectors(), &before[..]);
    }

    #[test]
    fn dot_of_example_pair_is_32() {
        let mut controller = SceneController::new();
        controller.set_vectors(vec![v(1.0, 2.0, 3.0), v(4.0, 5.0, 6.0)]);
        controller.set_operation(Operation::Dot);
        controller.calculate();
        assert_eq!(controller.result(), Some(&CalcResult::Scalar(32.0)));
        // A scalar result draws no extra arrow.
        assert_eq!(arrow_count(&controller), 2);
    }

    #[test]
    fn zoom_buttons_respect_distance_bounds() {
        let mut controller = SceneController::new();
        for _ in 0..200 {
            controller.zoom_in();
        }
        assert!(controller.camera().distance() >= crate::camera::MIN_DISTANCE);
        for _ in 0..200 {
            controller.zoom_out();
        }
        assert!(controller.camera().distance() <= crate::camera::MAX_DISTANCE);
    }

    #[test]
    fn labels_follow_list_order() {
        assert_eq!(SceneController::vector_label(0), "Vector A");
        assert_eq!(SceneController::vector_label(1), "Vector B");
        assert_eq!(SceneController::vector_label(25), "Vector Z");
        assert_eq!(SceneController::vector_label(26), "Vector 27");
    }

    #[test]
    fn randomize_stays_on_half_steps() {
        let mut controller = SceneController::new();
        controller.randomize_vector(0);
        let v = controller.vectors()[0];
        for c in [v.x, v.y, v.z] {
            assert!((-3.0..=3.0).contains(&c));
            assert_eq!((c * 2.0).fract(), 0.0);
        }
        assert!(controller.result().is_none());
    }
}
