use std::fmt;

/// Axis-aligned rectangle in canvas pixel coordinates
///
/// Origin is the top-left corner of the canvas. The rectangle covers the
/// half-open spans `[x, x + w)` and `[y, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    /// Covered area in square pixels, zero for degenerate rectangles
    pub const fn area(&self) -> u64 {
        if self.w <= 0 || self.h <= 0 {
            return 0;
        }
        self.w as u64 * self.h as u64
    }

    /// Test whether the rectangle lies entirely inside a canvas of the given size
    pub const fn fits_within(&self, canvas_width: i32, canvas_height: i32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= canvas_width as i64
            && self.bottom() <= canvas_height as i64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

/// Strict overlap test between two rectangles
///
/// Uses the separating-axis test: rectangles that only share an edge do not
/// overlap. The test is symmetric in its arguments.
pub const fn overlap(a: &Rect, b: &Rect) -> bool {
    !(b.x as i64 >= a.right()
        || b.right() <= a.x as i64
        || b.y as i64 >= a.bottom()
        || b.bottom() <= a.y as i64)
}

/// Grow a rectangle by `padding` on every side and clip it to the canvas
///
/// Clipping shrinks the padded extent and never translates it, so rectangles
/// near a border end up with less padding on that side. The near edges are
/// clipped first (the size shrinks by however far the origin had to move to
/// reach zero), then the far edges are trimmed against the canvas size.
pub fn clamp_padded(rect: &Rect, padding: i32, canvas_width: i32, canvas_height: i32) -> Rect {
    let mut x = i64::from(rect.x) - i64::from(padding);
    let mut y = i64::from(rect.y) - i64::from(padding);
    let mut w = i64::from(rect.w) + 2 * i64::from(padding);
    let mut h = i64::from(rect.h) + 2 * i64::from(padding);

    if x < 0 {
        w += x;
        x = 0;
    }
    if y < 0 {
        h += y;
        y = 0;
    }
    if x + w > i64::from(canvas_width) {
        w = i64::from(canvas_width) - x;
    }
    if y + h > i64::from(canvas_height) {
        h = i64::from(canvas_height) - y;
    }

    Rect {
        x: saturate(x),
        y: saturate(y),
        w: saturate(w),
        h: saturate(h),
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
