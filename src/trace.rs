//! # Trace Module
//!
//! Storage for the scrolling trace drawn on the control surface.
//!
//! Points are kept newest first. Every tick moves the whole trace one unit
//! to the left and a fresh point is pushed at `x = 0`, so the head of the
//! trace always sits on the vertical centre line of the surface.

use std::collections::VecDeque;

/// Horizontal distance a point travels per tick
const STEP: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct Trace {
    points: VecDeque<TracePoint>,
    // Half the surface width: a point is visible while x + half_width > 0
    half_width: f32,
}

impl Trace {
    pub fn new(surface_width: f32) -> Self {
        Self {
            points: VecDeque::new(),
            half_width: surface_width / 2.0,
        }
    }

    /// Advance the trace by one tick, anchoring the new head at `anchor_y`.
    pub fn advance(&mut self, anchor_y: f32) {
        for point in self.points.iter_mut() {
            point.x -= STEP;
        }
        let half_width = self.half_width;
        self.points.retain(|point| point.x + half_width > 0.0);
        self.points.push_front(TracePoint { x: 0.0, y: anchor_y });
    }

    pub fn points(&self) -> impl Iterator<Item = &TracePoint> {
        self.points.iter()
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
