/// Score counters for one run
///
/// A fixed set of named counters, zeroed at the start of each run and only
/// ever incremented while the run lasts. Currently the only counter is the
/// number of apples consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Points {
    apples: u32,
}

impl Points {
    /// All counters at zero, the state every run starts from
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Count one consumed apple
    pub fn record_apple(&mut self) {
        self.apples += 1;
    }

    /// Apples consumed so far this run
    pub fn apples(&self) -> u32 {
        self.apples
    }

    /// Projection of the counters into the single reported score
    pub fn total(&self) -> u32 {
        self.apples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed() {
        let points = Points::zeroed();
        assert_eq!(points.apples(), 0);
        assert_eq!(points.total(), 0);
    }

    #[test]
    fn test_record_apple_increments_by_one() {
        let mut points = Points::zeroed();

        points.record_apple();
        assert_eq!(points.total(), 1);

        points.record_apple();
        points.record_apple();
        assert_eq!(points.apples(), 3);
        assert_eq!(points.total(), 3);
    }
}
