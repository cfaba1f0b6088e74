// label.rs - Word wrapping for tile labels
// Text measurement belongs to the renderer, so callers pass their own measure.

/// Horizontal space kept free between a label and the tile edges, in pixels
pub const LABEL_INSET: f32 = 40.0;

/// Widest a label line may get on a tile of `tile_width`
pub fn max_label_width(tile_width: f32) -> f32 {
    (tile_width - LABEL_INSET).max(0.0)
}

/// Greedy word wrap of `text` so every line measures at most `max_width`.
///
/// A single word wider than `max_width` keeps a line of its own rather than
/// being split.
pub fn wrap_label<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rough measure for fixed-pitch output: every glyph is half the text size wide
pub fn monospace_measure(text_size: f32) -> impl Fn(&str) -> f32 {
    move |text: &str| text.chars().count() as f32 * text_size * 0.5
}
