use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::fetch::ElementSet;
use crate::predict::{PositionSample, PropagationError, ReferenceFrame, TimeGrid};

pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;

/// Propagate one element set over every timestamp of the grid with SGP4.
pub fn propagate(
    element_set: &ElementSet,
    grid: &TimeGrid,
    frame: ReferenceFrame,
) -> Result<Vec<PositionSample>, PropagationError> {
    let elements = Elements::from_tle(
        element_set.name.clone(),
        element_set.line1.as_bytes(),
        element_set.line2.as_bytes(),
    )?;
    let constants = Constants::from_elements(&elements)?;

    grid.timestamps()
        .iter()
        .enumerate()
        .map(|(index, timestamp)| {
            propagate_sample(&elements, &constants, element_set.norad_id, index, *timestamp, frame)
        })
        .collect()
}

fn propagate_sample(
    elements: &Elements,
    constants: &Constants,
    norad_id: u32,
    index: usize,
    timestamp: DateTime<Utc>,
    frame: ReferenceFrame,
) -> Result<PositionSample, PropagationError> {
    let minutes = elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PropagationError::Epoch(e.to_string()))?;

    let prediction = constants.propagate(minutes)?;

    let (position_km, velocity_km_s) = match frame {
        ReferenceFrame::Inertial => (prediction.position, prediction.velocity),
        ReferenceFrame::EarthFixed => {
            let sidereal = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
                &timestamp.naive_utc(),
            ));
            (
                teme_to_ecef_position(prediction.position, sidereal),
                teme_to_ecef_velocity(prediction.position, prediction.velocity, sidereal),
            )
        }
    };

    Ok(PositionSample {
        norad_id,
        index,
        timestamp,
        position_km,
        velocity_km_s,
    })
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn teme_to_ecef_velocity(pos_teme: [f64; 3], vel_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    let pos = teme_to_ecef_position(pos_teme, gmst);
    let rotated = [
        vel_teme[0] * cos_gmst + vel_teme[1] * sin_gmst,
        -vel_teme[0] * sin_gmst + vel_teme[1] * cos_gmst,
        vel_teme[2],
    ];
    [
        rotated[0] + EARTH_ROTATION_RAD_S * pos[1],
        rotated[1] - EARTH_ROTATION_RAD_S * pos[0],
        rotated[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // Vanguard 1, first case of the published SGP4 verification set.
    const VANGUARD_L1: &str = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
    const VANGUARD_L2: &str = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

    fn vanguard() -> ElementSet {
        ElementSet {
            norad_id: 5,
            name: Some("VANGUARD 1".into()),
            line1: VANGUARD_L1.into(),
            line2: VANGUARD_L2.into(),
            fetched_at: Utc::now(),
        }
    }

    fn vanguard_epoch() -> DateTime<Utc> {
        Elements::from_tle(None, VANGUARD_L1.as_bytes(), VANGUARD_L2.as_bytes())
            .unwrap()
            .datetime
            .and_utc()
    }

    fn assert_close(actual: [f64; 3], expected: [f64; 3], tolerance: f64) {
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < tolerance,
                "axis {}: {} vs {} (tolerance {})",
                axis,
                actual[axis],
                expected[axis],
                tolerance
            );
        }
    }

    #[test]
    fn test_matches_reference_vectors() {
        let grid =
            TimeGrid::build(vanguard_epoch(), Duration::minutes(360), Duration::minutes(360))
                .unwrap();
        let samples = propagate(&vanguard(), &grid, ReferenceFrame::Inertial).unwrap();
        assert_eq!(samples.len(), 2);

        assert_close(
            samples[0].position_km,
            [7022.46529266, -1400.08296755, 0.03995155],
            0.1,
        );
        assert_close(
            samples[0].velocity_km_s,
            [1.893841015, 6.405893759, 4.534807250],
            1e-3,
        );
        assert_close(
            samples[1].position_km,
            [-7154.03120202, -3783.17682504, -3536.19412294],
            1.0,
        );
        assert_close(
            samples[1].velocity_km_s,
            [4.741887409, -4.151817765, -2.093935425],
            1e-3,
        );
    }

    #[test]
    fn test_samples_follow_grid() {
        let grid = TimeGrid::build(vanguard_epoch(), Duration::hours(3), Duration::minutes(30))
            .unwrap();
        let samples = propagate(&vanguard(), &grid, ReferenceFrame::Inertial).unwrap();

        assert_eq!(samples.len(), grid.len());
        for (i, (sample, ts)) in samples.iter().zip(grid.timestamps()).enumerate() {
            assert_eq!(sample.index, i);
            assert_eq!(sample.timestamp, *ts);
            assert_eq!(sample.norad_id, 5);
        }
    }

    #[test]
    fn test_earth_fixed_preserves_radius() {
        let grid = TimeGrid::build(vanguard_epoch(), Duration::hours(2), Duration::minutes(20))
            .unwrap();
        let eci = propagate(&vanguard(), &grid, ReferenceFrame::Inertial).unwrap();
        let ecef = propagate(&vanguard(), &grid, ReferenceFrame::EarthFixed).unwrap();

        for (a, b) in eci.iter().zip(&ecef) {
            let ra = a.position_km.iter().map(|v| v * v).sum::<f64>().sqrt();
            let rb = b.position_km.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((ra - rb).abs() < 1e-6);
            assert!((a.position_km[2] - b.position_km[2]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_malformed_tle_is_an_error() {
        let mut broken = vanguard();
        broken.line2 = "2 00005  34.2682 348.7242 XXXXXXX 331.7664  19.3264 10.82419157413667".into();
        let grid = TimeGrid::build(vanguard_epoch(), Duration::hours(1), Duration::minutes(10))
            .unwrap();

        assert!(propagate(&broken, &grid, ReferenceFrame::Inertial).is_err());
    }

    #[test]
    fn test_empty_grid_gives_no_samples() {
        let grid = TimeGrid::build(vanguard_epoch(), Duration::zero(), Duration::minutes(10))
            .unwrap();
        let samples = propagate(&vanguard(), &grid, ReferenceFrame::Inertial).unwrap();
        assert!(samples.is_empty());
    }
}
