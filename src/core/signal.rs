//! Core signal trait.

/// Common interface for all signal sources.
///
/// The trait provides two operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, in `[-1.0, 1.0)` for the oscillators in this crate
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Oscillators are signals whose playback can be restarted.
pub trait Oscillator: Signal {
    /// Resets the oscillator to the start of its waveform.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(f64);

    impl Signal for Counter {
        fn next_sample(&mut self) -> f64 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn test_default_process_calls_next_sample_in_order() {
        let mut counter = Counter(0.0);
        let mut buffer = [0.0; 4];
        counter.process(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_process_empty_buffer() {
        let mut counter = Counter(0.0);
        counter.process(&mut []);
        assert_eq!(counter.0, 0.0);
    }
}
