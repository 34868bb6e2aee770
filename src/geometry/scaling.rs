//! Aspect-preserving resize to a chosen longest side

/// Scale `(width, height)` so the longer side becomes `target_longest`
///
/// The target is raised to at least 1. A source with no extent returns
/// `(1, 1)`. Each side is rounded to the nearest integer independently, with
/// exact halves going to the even neighbour, and never drops below 1, so thin
/// images keep a visible sliver.
pub fn scale_to_longest(width: i32, height: i32, target_longest: i32) -> (i32, i32) {
    let target = target_longest.max(1);
    let longest = width.max(height);
    if longest <= 0 {
        return (1, 1);
    }

    let factor = f64::from(target) / f64::from(longest);
    let scaled_width = (f64::from(width) * factor).round_ties_even().max(1.0);
    let scaled_height = (f64::from(height) * factor).round_ties_even().max(1.0);

    (scaled_width as i32, scaled_height as i32)
}
