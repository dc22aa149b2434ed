use chrono::{DateTime, Duration, Utc};

use crate::predict::{SatelliteTrack, TimeGrid};

/// Trails show roughly the last six hours of motion.
pub const TRAIL_DURATION_HOURS: i64 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub satellite: String,
    pub position_km: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub satellite: String,
    pub points_km: Vec<[f64; 3]>,
}

/// Scene state for one grid index. Markers and trails follow track order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub markers: Vec<Marker>,
    pub trails: Vec<Trail>,
}

/// Number of past samples kept in a trail for the given step.
pub fn trail_length(step: Duration) -> usize {
    let step_s = step.num_seconds().max(1);
    let n = Duration::hours(TRAIL_DURATION_HOURS).num_seconds() / step_s;
    n.max(1) as usize
}

/// One frame per grid point. A trail covers samples `max(0, k - trail_len)..=k`.
pub fn build_frames(tracks: &[SatelliteTrack], grid: &TimeGrid, trail_len: usize) -> Vec<Frame> {
    grid.timestamps()
        .iter()
        .enumerate()
        .map(|(k, timestamp)| {
            let start = k.saturating_sub(trail_len);
            let mut markers = Vec::with_capacity(tracks.len());
            let mut trails = Vec::with_capacity(tracks.len());

            for track in tracks {
                let Some(current) = track.samples.get(k) else {
                    continue;
                };
                trails.push(Trail {
                    satellite: track.satellite.name.clone(),
                    points_km: track.samples[start..=k]
                        .iter()
                        .map(|s| s.position_km)
                        .collect(),
                });
                markers.push(Marker {
                    satellite: track.satellite.name.clone(),
                    position_km: current.position_km,
                });
            }

            Frame {
                index: k,
                timestamp: *timestamp,
                markers,
                trails,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::predict::PositionSample;
    use crate::registry::Satellite;
    use chrono::TimeZone;

    pub(crate) fn straight_track(name: &str, norad_id: u32, grid: &TimeGrid) -> SatelliteTrack {
        SatelliteTrack {
            satellite: Satellite {
                name: name.into(),
                norad_id,
            },
            samples: grid
                .timestamps()
                .iter()
                .enumerate()
                .map(|(i, ts)| PositionSample {
                    norad_id,
                    index: i,
                    timestamp: *ts,
                    position_km: [7000.0 + i as f64, norad_id as f64, 0.0],
                    velocity_km_s: [0.0, 7.5, 0.0],
                })
                .collect(),
        }
    }

    fn grid(points: i64) -> TimeGrid {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        TimeGrid::build(
            start,
            Duration::minutes(30 * (points - 1)),
            Duration::minutes(30),
        )
        .unwrap()
    }

    #[test]
    fn test_trail_length_from_step() {
        assert_eq!(trail_length(Duration::minutes(30)), 12);
        assert_eq!(trail_length(Duration::minutes(5)), 72);
        assert_eq!(trail_length(Duration::minutes(120)), 3);
        assert_eq!(trail_length(Duration::hours(12)), 1);
    }

    #[test]
    fn test_one_frame_per_grid_point() {
        let grid = grid(10);
        let tracks = vec![
            straight_track("A", 1, &grid),
            straight_track("B", 2, &grid),
        ];
        let frames = build_frames(&tracks, &grid, 3);

        assert_eq!(frames.len(), 10);
        for (k, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, k);
            assert_eq!(frame.timestamp, grid.timestamps()[k]);
            assert_eq!(frame.markers.len(), 2);
            assert_eq!(frame.markers[0].satellite, "A");
            assert_eq!(frame.markers[1].satellite, "B");
        }
    }

    #[test]
    fn test_trail_window_is_bounded() {
        let grid = grid(10);
        let tracks = vec![straight_track("A", 1, &grid)];
        let frames = build_frames(&tracks, &grid, 3);

        assert_eq!(frames[0].trails[0].points_km.len(), 1);
        assert_eq!(frames[2].trails[0].points_km.len(), 3);
        assert_eq!(frames[7].trails[0].points_km.len(), 4);
        assert_eq!(frames[7].trails[0].points_km[0][0], 7004.0);
        assert_eq!(
            *frames[7].trails[0].points_km.last().unwrap(),
            frames[7].markers[0].position_km
        );
    }

    #[test]
    fn test_no_tracks_still_yields_frames() {
        let grid = grid(4);
        let frames = build_frames(&[], &grid, 3);
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.markers.is_empty()));
    }
}
