/*
 * Quadtree Demo
 *
 * Click to insert points. A query rectangle follows the pointer and the
 * points it finds are highlighted. Node boundaries can be drawn to show how
 * the tree subdivides.
 */

use log::{debug, warn};
use nannou::color::{rgb, rgba};
use nannou::prelude::Vec2;

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::CanvasSize;
use crate::params::QuadtreeParams;
use crate::quadtree::{Boundary, Quadtree};
use crate::simulation::Simulation;
use crate::surface::{color, Surface};

const POINT_RADIUS: f32 = 2.0;

pub struct QuadtreeDemo {
    pub tree: Quadtree,
    params: QuadtreeParams,
    pointer: Option<Vec2>,
}

impl QuadtreeDemo {
    pub fn new(params: QuadtreeParams, size: CanvasSize) -> SimResult<Self> {
        let tree = Quadtree::new(Boundary::from_size(size.width, size.height), params.capacity)?;
        Ok(Self { tree, params, pointer: None })
    }

    /// Query rectangle centered on the pointer, if the pointer is known.
    pub fn query_range(&self) -> Option<Boundary> {
        self.pointer.map(|p| {
            Boundary::new(p.x, p.y, self.params.query_width / 2.0, self.params.query_height / 2.0)
        })
    }

    pub fn query_hits(&self) -> Vec<Vec2> {
        self.query_range().map(|range| self.tree.query(&range)).unwrap_or_default()
    }

    /// Rebuild the tree for a new canvas or capacity, keeping the points that
    /// still fit.
    fn rebuild(&mut self, size: CanvasSize) -> SimResult<()> {
        let points = self.tree.all_points();
        let mut tree = Quadtree::new(Boundary::from_size(size.width, size.height), self.params.capacity)?;
        let kept = points.into_iter().filter(|&p| tree.insert(p)).count();
        debug!("quadtree rebuilt with {} points in {} nodes", kept, tree.node_count());
        self.tree = tree;
        Ok(())
    }

    fn needs_rebuild(&self, size: CanvasSize) -> bool {
        self.tree.boundary() != Boundary::from_size(size.width, size.height)
            || self.tree.capacity() != self.params.capacity
    }
}

impl Simulation for QuadtreeDemo {
    fn name(&self) -> &'static str {
        "Quadtree"
    }

    fn update(&mut self, _dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        if self.needs_rebuild(size) {
            self.rebuild(size)?;
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);

        if self.params.show_boundaries {
            surface.set_stroke(color(rgba(1.0, 1.0, 1.0, 0.35)));
            surface.set_line_width(1.0);
            for b in self.tree.boundaries() {
                surface.stroke_rect(b.left(), b.top(), b.half_width * 2.0, b.half_height * 2.0);
            }
        }

        surface.set_fill(color(rgb(0.85, 0.85, 0.85)));
        for point in self.tree.all_points() {
            surface.fill_circle(point, POINT_RADIUS);
        }

        if let Some(range) = self.query_range() {
            surface.set_stroke(color(rgb(0.2, 0.9, 0.3)));
            surface.set_line_width(2.0);
            surface.stroke_rect(range.left(), range.top(), range.half_width * 2.0, range.half_height * 2.0);

            surface.set_fill(color(rgb(0.2, 0.9, 0.3)));
            for hit in self.tree.query(&range) {
                surface.fill_circle(hit, POINT_RADIUS * 2.0);
            }
        }
    }

    fn pointer_pressed(&mut self, position: Vec2, _size: CanvasSize) {
        self.pointer = Some(position);
        if !self.tree.insert(position) {
            debug!("point ({}, {}) is outside the tree", position.x, position.y);
        }
    }

    fn pointer_moved(&mut self, position: Vec2, _size: CanvasSize) {
        self.pointer = Some(position);
    }

    fn clear(&mut self) {
        self.tree.clear();
    }

    fn reset(&mut self, size: CanvasSize) {
        self.tree.clear();
        if let Err(e) = self.rebuild(size) {
            warn!("quadtree reset failed: {}", e);
        }
    }

    fn configure(&mut self, config: &AppConfig, size: CanvasSize) {
        self.params = config.quadtree.clone();
        if self.needs_rebuild(size) {
            if let Err(e) = self.rebuild(size) {
                warn!("quadtree reconfigure failed: {}", e);
            }
        }
    }

    fn entity_count(&self) -> usize {
        self.tree.len()
    }
}
