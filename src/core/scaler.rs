//! Trait scaler: maps a raw trait value to a qualitative intensity tier.

/// A coarse intensity tier derived from one trait value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityBucket {
    pub intensity: f32,
    pub descriptor: &'static str,
}

/// Upper band edges (inclusive) with their tier. Bands narrow toward the top
/// so extreme values stay rare.
const BANDS: [(f32, f32, &str); 5] = [
    (20.0, 0.2, "minimal"),
    (40.0, 0.4, "mild"),
    (60.0, 0.6, "moderate"),
    (80.0, 0.8, "strong"),
    (95.0, 0.95, "extreme"),
];

const TOP: IntensityBucket = IntensityBucket {
    intensity: 1.0,
    descriptor: "overwhelming",
};

/// Bucket a trait value. Out-of-range input is not clamped: negatives land in
/// the lowest tier and anything over 95 in the highest.
pub fn scale_trait(value: f32) -> IntensityBucket {
    BANDS
        .iter()
        .find(|(edge, _, _)| value <= *edge)
        .map(|&(_, intensity, descriptor)| IntensityBucket {
            intensity,
            descriptor,
        })
        .unwrap_or(TOP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(scale_trait(0.0).descriptor, "minimal");
        assert_eq!(scale_trait(20.0).descriptor, "minimal");
        assert_eq!(scale_trait(20.5).descriptor, "mild");
        assert_eq!(scale_trait(40.0).intensity, 0.4);
        assert_eq!(scale_trait(60.0).descriptor, "moderate");
        assert_eq!(scale_trait(80.0).descriptor, "strong");
        assert_eq!(scale_trait(95.0).descriptor, "extreme");
        assert_eq!(scale_trait(95.5).descriptor, "overwhelming");
        assert_eq!(scale_trait(100.0).intensity, 1.0);
    }

    #[test]
    fn sarcasm_85_is_extreme() {
        assert_eq!(
            scale_trait(85.0),
            IntensityBucket {
                intensity: 0.95,
                descriptor: "extreme"
            }
        );
    }

    #[test]
    fn monotonic_over_range() {
        let allowed = [0.2, 0.4, 0.6, 0.8, 0.95, 1.0];
        let mut previous = 0.0;
        for step in 0..=1000 {
            let v = step as f32 / 10.0;
            let bucket = scale_trait(v);
            assert!(allowed.contains(&bucket.intensity), "{} -> {}", v, bucket.intensity);
            assert!(bucket.intensity >= previous, "not monotonic at {}", v);
            previous = bucket.intensity;
        }
    }

    #[test]
    fn out_of_range_is_not_clamped_or_rejected() {
        assert_eq!(scale_trait(-10.0).descriptor, "minimal");
        assert_eq!(scale_trait(250.0).descriptor, "overwhelming");
    }
}
