/// Value the simulated sensor reports when nothing else is configured.
pub const DEFAULT_MEASUREMENT: i32 = 12345;

/// Supplies the measurement for each emitted packet.
pub trait MeasurementSource {
    fn next_measurement(&mut self) -> i32;
}

/// Reports the same value forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant(pub i32);

impl Default for Constant {
    fn default() -> Self {
        Self(DEFAULT_MEASUREMENT)
    }
}

impl MeasurementSource for Constant {
    fn next_measurement(&mut self) -> i32 {
        self.0
    }
}

/// Starts at a value and adds `step` per packet, wrapping on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    next: i32,
    step: i32,
}

impl Ramp {
    pub fn new(start: i32, step: i32) -> Self {
        Self { next: start, step }
    }
}

impl MeasurementSource for Ramp {
    fn next_measurement(&mut self) -> i32 {
        let value = self.next;
        self.next = self.next.wrapping_add(self.step);
        value
    }
}

impl<F> MeasurementSource for F
where
    F: FnMut() -> i32,
{
    fn next_measurement(&mut self) -> i32 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_defaults_to_reference_value() {
        let mut source = Constant::default();
        assert_eq!(source.next_measurement(), 12345);
        assert_eq!(source.next_measurement(), 12345);
    }

    #[test]
    fn ramp_steps_and_wraps() {
        let mut source = Ramp::new(i32::MAX - 1, 1);
        assert_eq!(source.next_measurement(), i32::MAX - 1);
        assert_eq!(source.next_measurement(), i32::MAX);
        assert_eq!(source.next_measurement(), i32::MIN);
    }

    #[test]
    fn closures_are_sources() {
        let mut calls = 0;
        let mut source = move || {
            calls += 1;
            calls * 10
        };
        assert_eq!(source.next_measurement(), 10);
        assert_eq!(source.next_measurement(), 20);
    }
}
