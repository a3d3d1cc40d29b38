//! Field of view by sampled rays and the persistent discovered-cell mask.
//! This module exists to keep sight rules deterministic and independent of the movement loop.
//! It does not own transparency rules; callers supply them per cell.

use std::f64::consts::TAU;

use super::*;

/// Accumulate-only record of every cell the player has seen during one dungeon's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredCells {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DiscoveredCells {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|index| self.cells[index])
    }

    /// Marks `pos` and reports whether it was inside the mask.
    pub fn mark(&mut self, pos: Pos) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.cells[index] = true;
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&seen| seen).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        let in_bounds = pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height;
        in_bounds.then(|| pos.y as usize * self.width + pos.x as usize)
    }
}

/// Number of rays cast for a sight circle of `radius`: its circumference in cells, less half a
/// cell when the radius is an even integer.
pub fn sample_count(radius: f64) -> usize {
    if !radius.is_finite() || radius <= 0.0 {
        return 0;
    }
    let circumference = TAU * radius;
    let adjusted = if radius % 2.0 == 0.0 { circumference - 0.5 } else { circumference };
    adjusted.ceil() as usize
}

/// The cell a ray at `angle` aims for, measured from the centre of `origin`.
pub(super) fn ray_target(origin: Pos, radius: f64, angle: f64) -> Pos {
    let x = f64::from(origin.x) + 0.5 + radius * angle.cos();
    let y = f64::from(origin.y) + 0.5 + radius * angle.sin();
    Pos { y: y as i32, x: x as i32 }
}

/// Casts every ray of the sight circle from `origin`, marking what they reach.
pub fn reveal_from(
    discovered: &mut DiscoveredCells,
    origin: Pos,
    radius: f64,
    is_transparent: impl Fn(Pos) -> bool,
) {
    discovered.mark(origin);
    let samples = sample_count(radius);
    for sample in 0..samples {
        let angle = sample as f64 * TAU / samples as f64;
        trace_ray(discovered, origin, ray_target(origin, radius, angle), &is_transparent);
    }
}

/// Walks the digital line from `from` to `to`. Each cell is marked before its opacity is tested,
/// so the blocking cell itself is discovered. Leaving the mask ends the ray. The viewer's own cell
/// never blocks.
pub(super) fn trace_ray(
    discovered: &mut DiscoveredCells,
    from: Pos,
    to: Pos,
    is_transparent: &impl Fn(Pos) -> bool,
) {
    let x_dist = (to.x - from.x).abs();
    let y_dist = (to.y - from.y).abs();
    let x_step = if to.x > from.x { 1 } else { -1 };
    let y_step = if to.y > from.y { 1 } else { -1 };
    let mut error = x_dist - y_dist;
    let mut pos = from;

    for _ in 0..(1 + x_dist + y_dist) {
        if !discovered.mark(pos) {
            return;
        }
        if pos != from && !is_transparent(pos) {
            return;
        }
        if error > 0 {
            pos.x += x_step;
            error -= y_dist;
        } else {
            pos.y += y_step;
            error += x_dist;
        }
    }
}
