use std::f64::consts::PI;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

const LATITUDE_SAMPLES: usize = 50;
const LONGITUDE_SAMPLES: usize = 100;

/// Sphere surface grid, one row per polar angle and one column per azimuth.
#[derive(Debug, Clone)]
pub struct EarthMesh {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
}

impl EarthMesh {
    pub fn new() -> Self {
        Self::sphere(EARTH_RADIUS_KM, LATITUDE_SAMPLES, LONGITUDE_SAMPLES)
    }

    pub fn sphere(radius_km: f64, rows: usize, cols: usize) -> Self {
        let phi = linspace(0.0, PI, rows);
        let theta = linspace(0.0, 2.0 * PI, cols);

        let mut x = Vec::with_capacity(rows);
        let mut y = Vec::with_capacity(rows);
        let mut z = Vec::with_capacity(rows);
        for p in &phi {
            x.push(theta.iter().map(|t| radius_km * p.sin() * t.cos()).collect());
            y.push(theta.iter().map(|t| radius_km * p.sin() * t.sin()).collect());
            z.push(vec![radius_km * p.cos(); cols]);
        }

        Self { x, y, z }
    }
}

impl Default for EarthMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` evenly spaced values from `start` to `end`, both included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_shape() {
        let mesh = EarthMesh::new();
        assert_eq!(mesh.x.len(), 50);
        assert!(mesh.x.iter().all(|row| row.len() == 100));
        assert_eq!(mesh.z[0][0], EARTH_RADIUS_KM);
    }

    #[test]
    fn test_points_lie_on_sphere() {
        let mesh = EarthMesh::sphere(10.0, 7, 9);
        for i in 0..7 {
            for j in 0..9 {
                let r = (mesh.x[i][j].powi(2) + mesh.y[i][j].powi(2) + mesh.z[i][j].powi(2)).sqrt();
                assert!((r - 10.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
