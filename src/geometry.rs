// src/geometry.rs
//
// Fixed NBA full-court coordinate system: 50 units wide, 94 units long.
// After direction normalization every play attacks the basket at
// (25, 89.25); the raw-orientation basket regions below are only used by the
// direction scan, before any rotation has happened.

use crate::types::BallState;

pub const COURT_WIDTH: f64 = 50.0;
pub const COURT_LENGTH: f64 = 94.0;

/// Attacked-basket location in the canonical (post-rotation) orientation.
pub const BASKET_CENTER: (f64, f64) = (25.0, 89.25);

const LEFT_BASKET_X: (f64, f64) = (3.5, 6.0);
const LEFT_BASKET_Y: (f64, f64) = (24.0, 26.0);
const RIGHT_BASKET_X: (f64, f64) = (88.0, 90.5);
const RIGHT_BASKET_Y: (f64, f64) = (24.0, 26.0);

pub fn distance(p: (f64, f64), q: (f64, f64)) -> f64 {
    ((p.0 - q.0).powi(2) + (p.1 - q.1).powi(2)).sqrt()
}

/// Is the ball inside the left basket region (raw orientation)?
pub fn in_left_basket(ball: &BallState) -> bool {
    (LEFT_BASKET_X.0..=LEFT_BASKET_X.1).contains(&ball.x)
        && (LEFT_BASKET_Y.0..=LEFT_BASKET_Y.1).contains(&ball.y)
}

/// Is the ball inside the right basket region (raw orientation)?
pub fn in_right_basket(ball: &BallState) -> bool {
    (RIGHT_BASKET_X.0..=RIGHT_BASKET_X.1).contains(&ball.x)
        && (RIGHT_BASKET_Y.0..=RIGHT_BASKET_Y.1).contains(&ball.y)
}
