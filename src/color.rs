use egui::ecolor::Hsva;
use egui::Color32;

/// Reserved for the result arrow. Not reachable by `vector_color`: full
/// saturation always zeroes one channel, 0xff44ff has none at zero.
pub const RESULT_COLOR: Color32 = Color32::from_rgb(0xff, 0x44, 0xff);

/// Hue spread over the list: 360 * i / (len + 1), full saturation and value.
/// Colors follow list position, not vector identity, so any insert or
/// removal recolors the whole list.
pub fn vector_color(index: usize, len: usize) -> Color32 {
    let hue = index as f32 / (len as f32 + 1.0);
    Color32::from(Hsva::new(hue, 1.0, 1.0, 1.0))
}
