//! Axis-aligned collision detection with mutual destruction
//!
//! Any two overlapping bodies destroy each other, regardless of kind. The
//! check is a plain O(n²) sweep, which is fine for the few dozen bodies a
//! frame ever holds.

use super::state::Body;

/// Box overlap test between two bodies.
///
/// Boxes extend by `size` from `center`; all four comparisons are strict, so
/// touching edges do not count. A body never collides with itself, while two
/// distinct bodies with identical boxes do.
#[inline]
pub fn colliding(a: &Body, b: &Body) -> bool {
    !std::ptr::eq(a, b)
        && a.center.x < b.center.x + b.size.x
        && a.center.x + a.size.x > b.center.x
        && a.center.y < b.center.y + b.size.y
        && a.size.y + a.center.y > b.center.y
}

/// Keep only the bodies that overlap no other body.
///
/// Survival is decided against the full input list before anything is
/// removed, so a pile-up of three or more bodies vanishes entirely.
pub fn filter_collisions(bodies: Vec<Body>) -> Vec<Body> {
    let survives: Vec<bool> = bodies
        .iter()
        .map(|body| !bodies.iter().any(|other| colliding(body, other)))
        .collect();

    let before = bodies.len();
    let survivors: Vec<Body> = bodies
        .into_iter()
        .zip(survives)
        .filter_map(|(body, keep)| keep.then_some(body))
        .collect();

    if survivors.len() != before {
        log::trace!("Collisions removed {} bodies", before - survivors.len());
    }
    survivors
}
