// Turns raw mouse presses/drags into overlay gestures.
// A press near an edge of the decal resizes from that edge (corners grab two
// edges), a press anywhere else inside it moves it.

use crate::overlay::{OverlayController, OverlayRect, ResizeDelta};

/// How close (in surface units) a press must be to an edge to grab it.
pub const EDGE_MARGIN: f32 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Edges {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    /// Pointer delta -> change of the rectangle. Left/top edges move the
    /// origin and shrink by the same amount; right/bottom only change size.
    pub fn delta_rect(&self, dx: f32, dy: f32) -> ResizeDelta {
        let mut d = ResizeDelta::default();
        if self.left {
            d.left = dx;
            d.width = -dx;
        } else if self.right {
            d.width = dx;
        }
        if self.top {
            d.top = dy;
            d.height = -dy;
        } else if self.bottom {
            d.height = dy;
        }
        d
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Move,
    Resize(Edges),
}

/// Which gesture a press at (x,y) would start, if any.
pub fn hit_test(rect: &OverlayRect, x: f32, y: f32) -> Option<Gesture> {
    if !rect.contains(x, y) {
        return None;
    }
    // On a tiny rect the margins overlap; prefer the nearer edge.
    let near_left = x - rect.left < EDGE_MARGIN;
    let near_right = rect.right() - x <= EDGE_MARGIN;
    let near_top = y - rect.top < EDGE_MARGIN;
    let near_bottom = rect.bottom() - y <= EDGE_MARGIN;

    let edges = Edges {
        left: near_left && (!near_right || x - rect.left <= rect.right() - x),
        right: near_right && !(near_left && x - rect.left <= rect.right() - x),
        top: near_top && (!near_bottom || y - rect.top <= rect.bottom() - y),
        bottom: near_bottom && !(near_top && y - rect.top <= rect.bottom() - y),
    };

    Some(if edges.any() { Gesture::Resize(edges) } else { Gesture::Move })
}

/// Tracks the gesture in progress between mouse-down and mouse-up.
#[derive(Default)]
pub struct DragTracker {
    active: Option<Gesture>,
    last: Option<(f32, f32)>,
}

impl DragTracker {
    pub fn active(&self) -> Option<Gesture> {
        self.active
    }

    /// Feed one tick of mouse state (position in surface units).
    /// Applies the delta since the previous tick to `overlay`.
    pub fn update(&mut self, overlay: &mut OverlayController, pos: Option<(f32, f32)>, down: bool) {
        let Some((x, y)) = pos else {
            return;
        };
        if !down {
            self.active = None;
            self.last = None;
            return;
        }

        match (self.active, self.last) {
            (Some(gesture), Some((lx, ly))) => {
                let (dx, dy) = (x - lx, y - ly);
                if dx != 0.0 || dy != 0.0 {
                    match gesture {
                        Gesture::Move => overlay.apply_move(dx, dy),
                        Gesture::Resize(edges) => overlay.apply_resize(edges.delta_rect(dx, dy)),
                    }
                }
                self.last = Some((x, y));
            }
            (None, None) => {
                // Fresh press: only starts a gesture when it lands on the decal.
                self.active = hit_test(&overlay.rect(), x, y);
                self.last = Some((x, y));
            }
            // Button held after a press that missed the decal: stay idle.
            _ => self.last = Some((x, y)),
        }
    }
}
