//! Blackbody radiation colour table.
//!
//! RGB chromaticities of an ideal blackbody radiator, one entry per 100 K
//! from 1000 K to 10000 K. Temperature correction divides each channel by
//! its table entry and renormalizes so the brightest factor is one.

/// Blackbody RGB per 100 K step over [1000 K, 10000 K].
pub(crate) static BLACKBODY_RGB: [[f32; 3]; 91] = [
    [1.0, 0.0337, 0.0],
    [1.0, 0.0592, 0.0],
    [1.0, 0.0846, 0.0],
    [1.0, 0.1096, 0.0],
    [1.0, 0.1341, 0.0],
    [1.0, 0.1578, 0.0],
    [1.0, 0.1806, 0.0],
    [1.0, 0.2025, 0.0],
    [1.0, 0.2235, 0.0],
    [1.0, 0.2434, 0.0],
    [1.0, 0.2647, 0.0033],
    [1.0, 0.2889, 0.012],
    [1.0, 0.3126, 0.0219],
    [1.0, 0.336, 0.0331],
    [1.0, 0.3589, 0.0454],
    [1.0, 0.3814, 0.0588],
    [1.0, 0.4034, 0.0734],
    [1.0, 0.425, 0.0889],
    [1.0, 0.4461, 0.1054],
    [1.0, 0.4668, 0.1229],
    [1.0, 0.487, 0.1411],
    [1.0, 0.5067, 0.1602],
    [1.0, 0.5259, 0.18],
    [1.0, 0.5447, 0.2005],
    [1.0, 0.563, 0.2216],
    [1.0, 0.5809, 0.2433],
    [1.0, 0.5983, 0.2655],
    [1.0, 0.6153, 0.2881],
    [1.0, 0.6318, 0.3112],
    [1.0, 0.648, 0.3346],
    [1.0, 0.6636, 0.3583],
    [1.0, 0.6789, 0.3823],
    [1.0, 0.6938, 0.4066],
    [1.0, 0.7083, 0.431],
    [1.0, 0.7223, 0.4556],
    [1.0, 0.736, 0.4803],
    [1.0, 0.7494, 0.5051],
    [1.0, 0.7623, 0.5299],
    [1.0, 0.775, 0.5548],
    [1.0, 0.7872, 0.5797],
    [1.0, 0.7992, 0.6045],
    [1.0, 0.8108, 0.6293],
    [1.0, 0.8221, 0.6541],
    [1.0, 0.833, 0.6787],
    [1.0, 0.8437, 0.7032],
    [1.0, 0.8541, 0.7277],
    [1.0, 0.8642, 0.7519],
    [1.0, 0.874, 0.776],
    [1.0, 0.8836, 0.8],
    [1.0, 0.8929, 0.8238],
    [1.0, 0.9019, 0.8473],
    [1.0, 0.9107, 0.8707],
    [1.0, 0.9193, 0.8939],
    [1.0, 0.9276, 0.9168],
    [1.0, 0.9357, 0.9396],
    [1.0, 0.9436, 0.9621],
    [1.0, 0.9513, 0.9844],
    [0.9937, 0.9526, 1.0],
    [0.9726, 0.9395, 1.0],
    [0.9526, 0.927, 1.0],
    [0.9337, 0.915, 1.0],
    [0.9157, 0.9035, 1.0],
    [0.8986, 0.8925, 1.0],
    [0.8823, 0.8819, 1.0],
    [0.8668, 0.8718, 1.0],
    [0.852, 0.8621, 1.0],
    [0.8379, 0.8527, 1.0],
    [0.8244, 0.8437, 1.0],
    [0.8115, 0.8351, 1.0],
    [0.7992, 0.8268, 1.0],
    [0.7874, 0.8187, 1.0],
    [0.7761, 0.811, 1.0],
    [0.7652, 0.8035, 1.0],
    [0.7548, 0.7963, 1.0],
    [0.7449, 0.7894, 1.0],
    [0.7353, 0.7827, 1.0],
    [0.726, 0.7762, 1.0],
    [0.7172, 0.7699, 1.0],
    [0.7086, 0.7638, 1.0],
    [0.7004, 0.7579, 1.0],
    [0.6925, 0.7522, 1.0],
    [0.6848, 0.7467, 1.0],
    [0.6774, 0.7414, 1.0],
    [0.6703, 0.7362, 1.0],
    [0.6635, 0.7311, 1.0],
    [0.6568, 0.7263, 1.0],
    [0.6504, 0.7215, 1.0],
    [0.6442, 0.7169, 1.0],
    [0.6382, 0.7124, 1.0],
    [0.6324, 0.7081, 1.0],
    [0.6268, 0.7039, 1.0],
];

/// Temperature bounds of the table in Kelvin.
pub(crate) const TEMPERATURE_RANGE: (f32, f32) = (1000.0, 10000.0);

/// Per-channel correction factors for a Kelvin temperature.
///
/// The temperature is clamped into [`TEMPERATURE_RANGE`], looked up in 100 K
/// steps, and the reciprocal chromaticities are normalized so the largest
/// factor is exactly one.
/// Floor for table chromaticities. Deep-red entries store 0.0 blue; the
/// reciprocal would be infinite and the normalization NaN.
const MIN_CHROMA: f32 = 1e-4;

pub(crate) fn correction_factors(temperature: f32) -> [f32; 3] {
    let (lo, hi) = TEMPERATURE_RANGE;
    let clamped = temperature.clamp(lo, hi);
    let index = ((clamped - lo) / 100.0) as usize;
    let [r, g, b] = BLACKBODY_RGB[index.min(BLACKBODY_RGB.len() - 1)];

    let mut factors = [
        1.0 / r.max(MIN_CHROMA),
        1.0 / g.max(MIN_CHROMA),
        1.0 / b.max(MIN_CHROMA),
    ];
    let max = factors[0].max(factors[1]).max(factors[2]);
    for f in &mut factors {
        *f /= max;
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        // 1000 K is pure red-orange, 10000 K is blue-heavy
        assert_eq!(BLACKBODY_RGB[0][0], 1.0);
        assert!(BLACKBODY_RGB[0][2] < 0.01);
        assert!(BLACKBODY_RGB[90][2] > BLACKBODY_RGB[90][0]);
    }

    #[test]
    fn test_factors_normalized() {
        for t in [500.0, 1000.0, 6650.0, 10000.0, 20000.0] {
            let f = correction_factors(t);
            let max = f[0].max(f[1]).max(f[2]);
            assert!((max - 1.0).abs() < 1e-6, "max factor {max} at {t} K");
            assert!(f.iter().all(|&v| v > 0.0 && v <= 1.0));
        }
    }

    #[test]
    fn test_clamping_matches_endpoints() {
        assert_eq!(correction_factors(100.0), correction_factors(1000.0));
        assert_eq!(correction_factors(99999.0), correction_factors(10000.0));
    }

    #[test]
    fn test_cool_temperature_suppresses_blue() {
        // Correcting for a warm source scales red down, blue up toward 1
        let f = correction_factors(2000.0);
        assert!(f[0] < f[2]);
        assert_eq!(f[2], 1.0);
    }
}
