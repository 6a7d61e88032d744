//! Core signal processing traits.
//!
//! This module provides the abstractions the oscillator is built on:
//! - `Signal` trait for all signal sources
//! - `AudioSignal` trait for sample-rate-aware signals
//! - `Oscillator` trait for signals that can be retriggered

mod audio;
mod signal;

pub use audio::AudioSignal;
pub use signal::{Oscillator, Signal};
