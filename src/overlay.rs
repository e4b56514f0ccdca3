// Overlay transform controller.
// Holds the decal rectangle and applies pointer deltas to it. Every update is
// clamped, so the rectangle can never leave the surface.

/// Smallest width/height a resize can produce.
pub const MIN_SIZE: f32 = 20.0;

/// The area the overlay must stay inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Decal placement: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayRect {
    pub const INITIAL: OverlayRect = OverlayRect { left: 50.0, top: 50.0, width: 100.0, height: 100.0 };

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Edges count as inside, so a press on the border can grab it.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Per-tick change of the rectangle's edges while resizing.
/// Dragging the left edge right by d gives {left: d, width: -d}.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeDelta {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// max-then-min. If `hi < lo` the upper bound wins.
#[inline]
fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

pub struct OverlayController {
    rect: OverlayRect,
    bounds: Bounds,
}

impl OverlayController {
    /// Start from `rect`, pulled inside `bounds` if it does not fit.
    pub fn new(rect: OverlayRect, bounds: Bounds) -> Self {
        let width = clamp(rect.width, MIN_SIZE, bounds.width);
        let height = clamp(rect.height, MIN_SIZE, bounds.height);
        let left = clamp(rect.left, 0.0, bounds.width - width);
        let top = clamp(rect.top, 0.0, bounds.height - height);
        Self { rect: OverlayRect { left, top, width, height }, bounds }
    }

    pub fn rect(&self) -> OverlayRect {
        self.rect
    }

    /// Drag gesture: shift the rectangle, keep its size.
    pub fn apply_move(&mut self, dx: f32, dy: f32) {
        self.rect.left = clamp(self.rect.left + dx, 0.0, self.bounds.width - self.rect.width);
        self.rect.top = clamp(self.rect.top + dy, 0.0, self.bounds.height - self.rect.height);
    }

    /// Resize gesture. Size first (bounded by the current position), then the
    /// position shift from left/top edges, re-clamped against the new size.
    pub fn apply_resize(&mut self, delta: ResizeDelta) {
        let r = &mut self.rect;
        r.width = clamp(r.width + delta.width, MIN_SIZE, self.bounds.width - r.left);
        r.height = clamp(r.height + delta.height, MIN_SIZE, self.bounds.height - r.top);

        r.left = clamp(r.left + delta.left, 0.0, self.bounds.width - r.width);
        r.top = clamp(r.top + delta.top, 0.0, self.bounds.height - r.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Bounds = Bounds { width: 400.0, height: 700.0 };

    fn controller() -> OverlayController {
        OverlayController::new(OverlayRect::INITIAL, SURFACE)
    }

    fn assert_inside(r: OverlayRect) {
        assert!(r.left >= 0.0 && r.top >= 0.0, "{r:?}");
        assert!(r.width >= MIN_SIZE && r.height >= MIN_SIZE, "{r:?}");
        assert!(r.right() <= SURFACE.width + 1e-3, "{r:?}");
        assert!(r.bottom() <= SURFACE.height + 1e-3, "{r:?}");
    }

    /// xorshift32, deterministic across runs.
    struct Rng32(u32);

    impl Rng32 {
        fn range(&mut self, min: f32, max: f32) -> f32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            min + (max - min) * ((x >> 8) as f32 / (1u32 << 24) as f32)
        }
    }

    #[test]
    fn move_clamps_right_edge() {
        let mut c = controller();
        c.apply_move(400.0, 0.0);
        assert_eq!(c.rect().left, 300.0);
        assert_eq!(c.rect().top, 50.0);
    }

    #[test]
    fn move_clamps_to_origin() {
        let mut c = controller();
        c.apply_move(-1000.0, -1000.0);
        assert_eq!((c.rect().left, c.rect().top), (0.0, 0.0));
        c.apply_move(5.0, 1000.0);
        assert_eq!((c.rect().left, c.rect().top), (5.0, 600.0));
    }

    #[test]
    fn shrink_stops_at_minimum() {
        let mut c = controller();
        c.apply_resize(ResizeDelta { width: -90.0, ..Default::default() });
        assert_eq!(c.rect().width, 20.0);
        assert_eq!(c.rect().height, 100.0);
    }

    #[test]
    fn grow_stops_at_surface_edge() {
        let mut c = controller();
        c.apply_resize(ResizeDelta { width: 1000.0, height: 1000.0, ..Default::default() });
        assert_eq!(c.rect().width, 350.0);
        assert_eq!(c.rect().height, 650.0);
    }

    #[test]
    fn left_edge_drag_moves_and_resizes() {
        let mut c = controller();
        // Pull the left edge 30 units to the left.
        c.apply_resize(ResizeDelta { left: -30.0, width: 30.0, ..Default::default() });
        let r = c.rect();
        assert_eq!((r.left, r.width), (20.0, 130.0));
        assert_eq!(r.right(), 150.0);
    }

    #[test]
    fn left_edge_drag_past_origin_clamps_position() {
        let mut c = controller();
        c.apply_resize(ResizeDelta { left: -80.0, width: 80.0, ..Default::default() });
        let r = c.rect();
        assert_eq!(r.left, 0.0);
        assert_eq!(r.width, 180.0);
        assert_inside(r);
    }

    #[test]
    fn top_edge_shrink_below_minimum() {
        let mut c = controller();
        c.apply_resize(ResizeDelta { top: 95.0, height: -95.0, ..Default::default() });
        let r = c.rect();
        assert_eq!(r.height, 20.0);
        assert_eq!(r.top, 145.0);
        assert_inside(r);
    }

    #[test]
    fn resize_near_corner_stays_inside() {
        let mut c = controller();
        c.apply_move(1000.0, 1000.0);
        assert_eq!((c.rect().left, c.rect().top), (300.0, 600.0));
        c.apply_resize(ResizeDelta { width: 50.0, height: 50.0, ..Default::default() });
        assert_eq!((c.rect().width, c.rect().height), (100.0, 100.0));
        assert_inside(c.rect());
    }

    #[test]
    fn oversized_start_is_pulled_inside() {
        let c = OverlayController::new(
            OverlayRect { left: -10.0, top: 690.0, width: 900.0, height: 5.0 },
            SURFACE,
        );
        let r = c.rect();
        assert_eq!((r.left, r.top, r.width, r.height), (0.0, 680.0, 400.0, 20.0));
    }

    #[test]
    fn random_moves_stay_in_bounds() {
        let mut rng = Rng32(0x1234_5678);
        let mut c = controller();
        for _ in 0..5_000 {
            c.apply_move(rng.range(-500.0, 500.0), rng.range(-800.0, 800.0));
            let r = c.rect();
            assert!(r.left >= 0.0 && r.left <= 400.0 - r.width);
            assert!(r.top >= 0.0 && r.top <= 700.0 - r.height);
            assert_eq!((r.width, r.height), (100.0, 100.0));
        }
    }

    #[test]
    fn random_resizes_stay_in_bounds() {
        let mut rng = Rng32(0xDEAD_BEEF);
        let mut c = controller();
        for i in 0..5_000 {
            let (dx, dy) = (rng.range(-300.0, 300.0), rng.range(-500.0, 500.0));
            // Alternate between left/top and right/bottom edge drags.
            let delta = if i % 2 == 0 {
                ResizeDelta { left: dx, top: dy, width: -dx, height: -dy }
            } else {
                ResizeDelta { width: dx, height: dy, ..Default::default() }
            };
            let before = c.rect();
            c.apply_resize(delta);
            let r = c.rect();
            assert!(r.width >= MIN_SIZE && r.width <= 400.0 - before.left);
            assert!(r.height >= MIN_SIZE && r.height <= 700.0 - before.top);
            assert_inside(r);
            if i % 3 == 0 {
                c.apply_move(rng.range(-100.0, 100.0), rng.range(-100.0, 100.0));
                assert_inside(c.rect());
            }
        }
    }
}
