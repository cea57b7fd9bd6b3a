//! Aim presentation sinks
//!
//! The controller only ever writes to a presenter; it never reads back.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec3};

/// Reticle and arc line hooks
pub trait AimPresenter {
    fn set_reticle_pose(&mut self, position: Vec3, orientation: Quat);
    fn set_reticle_visible(&mut self, visible: bool);
    fn set_arc_samples(&mut self, samples: &[Vec3]);
    fn set_arc_visible(&mut self, visible: bool);
}

impl<T: AimPresenter + ?Sized> AimPresenter for Rc<RefCell<T>> {
    fn set_reticle_pose(&mut self, position: Vec3, orientation: Quat) {
        self.borrow_mut().set_reticle_pose(position, orientation);
    }

    fn set_reticle_visible(&mut self, visible: bool) {
        self.borrow_mut().set_reticle_visible(visible);
    }

    fn set_arc_samples(&mut self, samples: &[Vec3]) {
        self.borrow_mut().set_arc_samples(samples);
    }

    fn set_arc_visible(&mut self, visible: bool) {
        self.borrow_mut().set_arc_visible(visible);
    }
}

/// Presenter that keeps the latest reticle/arc state for the host to draw
#[derive(Debug, Clone, PartialEq)]
pub struct AimOverlay {
    pub reticle_visible: bool,
    pub reticle_position: Vec3,
    pub reticle_orientation: Quat,
    pub arc_visible: bool,
    pub arc: Vec<Vec3>,
    /// Number of arc uploads received
    pub arc_updates: u32,
}

impl Default for AimOverlay {
    fn default() -> Self {
        Self {
            reticle_visible: false,
            reticle_position: Vec3::ZERO,
            reticle_orientation: Quat::IDENTITY,
            arc_visible: false,
            arc: Vec::new(),
            arc_updates: 0,
        }
    }
}

impl AimPresenter for AimOverlay {
    fn set_reticle_pose(&mut self, position: Vec3, orientation: Quat) {
        self.reticle_position = position;
        self.reticle_orientation = orientation;
    }

    fn set_reticle_visible(&mut self, visible: bool) {
        self.reticle_visible = visible;
    }

    fn set_arc_samples(&mut self, samples: &[Vec3]) {
        self.arc.clear();
        self.arc.extend_from_slice(samples);
        self.arc_updates += 1;
    }

    fn set_arc_visible(&mut self, visible: bool) {
        self.arc_visible = visible;
    }
}
