use chrono::{DateTime, Duration, Utc};

use crate::predict::GridError;

pub const MAX_GRID_POINTS: i64 = 100_000;

/// Evenly spaced timestamps `start, start + step, ...` covering a window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    step: Duration,
    timestamps: Vec<DateTime<Utc>>,
}

impl TimeGrid {
    /// Build the grid for `[start, start + duration]`.
    ///
    /// The end is included when it falls on a step. A zero duration gives an
    /// empty grid.
    pub fn build(
        start: DateTime<Utc>,
        duration: Duration,
        step: Duration,
    ) -> Result<Self, GridError> {
        if step <= Duration::zero() {
            return Err(GridError::NonPositiveStep);
        }
        if duration < Duration::zero() {
            return Err(GridError::NegativeDuration);
        }
        if duration == Duration::zero() {
            return Ok(Self {
                step,
                timestamps: Vec::new(),
            });
        }

        let step_ms = step.num_milliseconds().max(1);
        let points = duration.num_milliseconds() / step_ms + 1;
        if points > MAX_GRID_POINTS {
            return Err(GridError::TooManyPoints {
                points,
                max: MAX_GRID_POINTS,
            });
        }

        let timestamps = (0..points as i32).map(|k| start + step * k).collect();
        Ok(Self {
            step,
            timestamps,
        })
    }

    pub fn from_days(
        start: DateTime<Utc>,
        days: u32,
        step_minutes: u32,
    ) -> Result<Self, GridError> {
        Self::build(
            start,
            Duration::days(days as i64),
            Duration::minutes(step_minutes as i64),
        )
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_one_day_half_hour_steps() {
        let grid = TimeGrid::from_days(epoch(), 1, 30).unwrap();
        assert_eq!(grid.len(), 49);
        assert_eq!(grid.timestamps()[0], epoch());
        assert_eq!(grid.timestamps()[48], epoch() + Duration::days(1));
    }

    #[test]
    fn test_end_excluded_when_not_on_step() {
        let grid = TimeGrid::build(epoch(), Duration::minutes(100), Duration::minutes(30)).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(
            *grid.timestamps().last().unwrap(),
            epoch() + Duration::minutes(90)
        );
    }

    #[test]
    fn test_zero_duration_is_empty() {
        let grid = TimeGrid::from_days(epoch(), 0, 30).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_step_longer_than_window() {
        let grid = TimeGrid::build(epoch(), Duration::minutes(10), Duration::hours(1)).unwrap();
        assert_eq!(grid.timestamps(), &[epoch()]);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            TimeGrid::from_days(epoch(), 1, 0),
            Err(GridError::NonPositiveStep)
        ));
        assert!(matches!(
            TimeGrid::build(epoch(), Duration::hours(-1), Duration::minutes(5)),
            Err(GridError::NegativeDuration)
        ));
        assert!(matches!(
            TimeGrid::build(epoch(), Duration::days(365), Duration::seconds(1)),
            Err(GridError::TooManyPoints { .. })
        ));
    }

    proptest! {
        #[test]
        fn grid_is_strictly_increasing_and_uniform(
            days in 1u32..=35,
            step_minutes in 1u32..=120,
            offset_s in 0i64..86_400,
        ) {
            let start = epoch() + Duration::seconds(offset_s);
            let grid = TimeGrid::from_days(start, days, step_minutes).unwrap();
            let step = Duration::minutes(step_minutes as i64);

            let expected = (days as i64 * 1440) / step_minutes as i64 + 1;
            prop_assert_eq!(grid.len() as i64, expected);
            prop_assert_eq!(grid.timestamps()[0], start);
            for pair in grid.timestamps().windows(2) {
                prop_assert!(pair[1] > pair[0]);
                prop_assert_eq!(pair[1] - pair[0], step);
            }
            prop_assert!(*grid.timestamps().last().unwrap() <= start + Duration::days(days as i64));
        }
    }
}
