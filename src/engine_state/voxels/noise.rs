//! # Simplex Noise
//!
//! Seeded 2D and 3D simplex gradient noise used for terrain heights and cave
//! carving. Values are continuous, deterministic for a given permutation table
//! and always within `[-1, 1]`.
//!
//! The permutation table is a Fisher–Yates shuffle of `0..256` driven by the
//! RNG passed at construction, stored twice so lattice hashing never wraps.
//! [`SimplexNoise`] implements [`noise::NoiseFn`] for 2 and 3 dimensions so it
//! can stand in wherever the `noise` crate's generators are accepted.

use noise::NoiseFn;

/// Skew factor for 2D: `(sqrt(3) - 1) / 2`
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor for 2D: `(3 - sqrt(3)) / 6`
const G2: f64 = 0.211_324_865_405_187_1;
/// Skew factor for 3D
const F3: f64 = 1.0 / 3.0;
/// Unskew factor for 3D
const G3: f64 = 1.0 / 6.0;

/// Gradient directions: the midpoints of the 12 edges of a cube. 2D lookups use
/// the first two components.
#[rustfmt::skip]
const GRADIENTS: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0], [1.0, -1.0, 0.0], [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [1.0, 0.0, -1.0], [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0], [0.0, -1.0, 1.0], [0.0, 1.0, -1.0], [0.0, -1.0, -1.0],
];

const TABLE_SIZE: usize = 256;

/// A seeded simplex noise source.
#[derive(Clone)]
pub struct SimplexNoise {
    /// Shuffled `0..256`, repeated twice
    perm: [u8; TABLE_SIZE * 2],
    /// `perm[i] % 12`, precomputed gradient indices
    perm_mod12: [u8; TABLE_SIZE * 2],
}

impl SimplexNoise {
    /// Builds a noise source whose permutation table is shuffled by `rng`.
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let mut table = [0u8; TABLE_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        for i in (1..TABLE_SIZE).rev() {
            let j = rng.usize(0..=i);
            table.swap(i, j);
        }

        let mut perm = [0u8; TABLE_SIZE * 2];
        let mut perm_mod12 = [0u8; TABLE_SIZE * 2];
        for i in 0..TABLE_SIZE * 2 {
            perm[i] = table[i & (TABLE_SIZE - 1)];
            perm_mod12[i] = perm[i] % 12;
        }

        SimplexNoise { perm, perm_mod12 }
    }

    /// Builds a noise source from a fresh RNG seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut fastrand::Rng::with_seed(seed))
    }

    #[inline]
    fn perm(&self, index: usize) -> usize {
        self.perm[index] as usize
    }

    #[inline]
    fn gradient(&self, index: usize) -> &[f64; 3] {
        &GRADIENTS[self.perm_mod12[index] as usize]
    }

    /// 2D simplex noise in `[-1, 1]`.
    pub fn noise2d(&self, xin: f64, yin: f64) -> f64 {
        let s = (xin + yin) * F2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let t = (i + j) * G2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        // Which of the two triangles of the skewed cell the point is in.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = wrap(i);
        let jj = wrap(j);
        let g0 = self.gradient(ii + self.perm(jj));
        let g1 = self.gradient(ii + i1 + self.perm(jj + j1));
        let g2 = self.gradient(ii + 1 + self.perm(jj + 1));

        let n0 = corner2d(g0, x0, y0);
        let n1 = corner2d(g1, x1, y1);
        let n2 = corner2d(g2, x2, y2);

        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// 3D simplex noise in `[-1, 1]`.
    pub fn noise3d(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        // Offsets of the second and third corners, by ranking the coordinates.
        let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0))
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1))
            } else {
                ((0, 0, 1), (1, 0, 1))
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1))
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1))
        } else {
            ((0, 1, 0), (1, 1, 0))
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = wrap(i);
        let jj = wrap(j);
        let kk = wrap(k);
        let g0 = self.gradient(ii + self.perm(jj + self.perm(kk)));
        let g1 = self.gradient(ii + i1 + self.perm(jj + j1 + self.perm(kk + k1)));
        let g2 = self.gradient(ii + i2 + self.perm(jj + j2 + self.perm(kk + k2)));
        let g3 = self.gradient(ii + 1 + self.perm(jj + 1 + self.perm(kk + 1)));

        let n0 = corner3d(g0, x0, y0, z0);
        let n1 = corner3d(g1, x1, y1, z1);
        let n2 = corner3d(g2, x2, y2, z2);
        let n3 = corner3d(g3, x3, y3, z3);

        (32.0 * (n0 + n1 + n2 + n3)).clamp(-1.0, 1.0)
    }
}

/// Lattice coordinate reduced into the permutation table.
#[inline]
fn wrap(coordinate: f64) -> usize {
    (coordinate as i64 & (TABLE_SIZE as i64 - 1)) as usize
}

#[inline]
fn corner2d(gradient: &[f64; 3], x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * (gradient[0] * x + gradient[1] * y)
    }
}

#[inline]
fn corner3d(gradient: &[f64; 3], x: f64, y: f64, z: f64) -> f64 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * (gradient[0] * x + gradient[1] * y + gradient[2] * z)
    }
}

impl NoiseFn<f64, 2> for SimplexNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise2d(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for SimplexNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.noise3d(point[0], point[1], point[2])
    }
}
