//! Contact cache.
//!
//! Owns every live [`TouchState`], keyed by contact identity. Creation
//! happens the frame an identity first appears; removal only after the
//! contact has been finished for longer than the tap timeout. Updates
//! run in reverse index order so a state expiring mid-pass removes
//! itself without disturbing the scan, and aggregates computed after
//! the pass never observe a removed state.

use heapless::Vec;
use log::{debug, warn};

use crate::config::Thresholds;
use crate::touch::{TouchFate, TouchState};
use crate::types::{SwipeDirection, TouchAction, TouchSample};
use crate::units::UnitConverter;

/// Upper bound on simultaneously tracked contacts. Ten matches common
/// touch hardware limits; aggregates only ever need two.
pub const MAX_TRACKED_TOUCHES: usize = 10;

#[derive(Default)]
pub struct TouchRegistry {
    touches: Vec<TouchState, MAX_TRACKED_TOUCHES>,
}

impl TouchRegistry {
    pub(crate) fn new() -> Self {
        Self { touches: Vec::new() }
    }

    pub(crate) fn update(
        &mut self,
        samples: &[TouchSample],
        frame_dt: f32,
        thresholds: &Thresholds,
        converter: &UnitConverter,
    ) {
        for sample in samples {
            if self.touch(sample.id).is_none() {
                self.track(sample);
            }
        }

        let mut index = self.touches.len();
        while index > 0 {
            index -= 1;
            let id = self.touches[index].id();
            let sample = samples.iter().find(|sample| sample.id == id);
            let fate = self.touches[index].update(sample, frame_dt, thresholds, converter);
            if fate == TouchFate::Expired {
                debug!("contact {id} expired after tap timeout");
                self.touches.remove(index);
            }
        }
    }

    fn track(&mut self, sample: &TouchSample) {
        let insert_at = self
            .touches
            .iter()
            .position(|touch| touch.id() > sample.id)
            .unwrap_or(self.touches.len());
        if self.touches.insert(insert_at, TouchState::new(sample)).is_err() {
            warn!(
                "contact table full ({MAX_TRACKED_TOUCHES}); dropping contact {}",
                sample.id
            );
            return;
        }
        debug!("tracking contact {}", sample.id);
    }

    /// Tracked states in ascending-identity order.
    pub fn touches(&self) -> &[TouchState] {
        &self.touches
    }

    pub fn touch(&self, id: u32) -> Option<&TouchState> {
        self.touches.iter().find(|touch| touch.id() == id)
    }

    fn touch_mut(&mut self, id: u32) -> Option<&mut TouchState> {
        self.touches.iter_mut().find(|touch| touch.id() == id)
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Pin the contact to a forced classification until cleared.
    /// Returns false when the identity is not tracked.
    pub fn set_override_action(&mut self, id: u32, action: TouchAction) -> bool {
        match self.touch_mut(id) {
            Some(touch) => {
                touch.set_override_action(action);
                true
            }
            None => false,
        }
    }

    pub fn clear_override_action(&mut self, id: u32) -> bool {
        match self.touch_mut(id) {
            Some(touch) => {
                touch.clear_override_action();
                true
            }
            None => false,
        }
    }

    /// Shared direction of a two-finger swipe: only when exactly two
    /// contacts are tracked and both classified Swipe this frame, the
    /// first contact's direction; otherwise no direction.
    pub fn double_swipe_direction(&self) -> Option<SwipeDirection> {
        match &self.touches[..] {
            [first, second]
                if first.action() == TouchAction::Swipe
                    && second.action() == TouchAction::Swipe =>
            {
                first.swipe_direction()
            }
            _ => None,
        }
    }
}
