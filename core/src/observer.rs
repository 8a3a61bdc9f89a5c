//! Progress hooks for long encode and decode runs
//!
//! The codec never prints. Front ends that want progress output implement
//! [`Observer`] and pass it to the `*_with_observer` entry points.

use crate::demodulator::Classification;

pub trait Observer {
    /// Called after the tone for bit `done` (1-based) of `total` has been appended.
    fn on_bit_modulated(&mut self, _done: usize, _total: usize) {}

    /// Called after the cycle at `index` (0-based) has been classified.
    fn on_cycle_analyzed(&mut self, _index: usize, _classification: &Classification) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
