//! Angle helpers. Angle 0 is the pointer ("up"); the wheel turns clockwise.

/// Normalize degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives
    if d >= 360.0 { 0.0 } else { d }
}

/// Index of the sector sitting under the pointer for a wheel rotated by
/// `rotation` degrees.
///
/// Sectors are centered on `index * width`, so half a width is added before
/// dividing. Returns `None` for an empty wheel.
pub fn sector_at_angle(rotation: f64, sector_count: usize) -> Option<usize> {
    if sector_count == 0 {
        return None;
    }
    let width = 360.0 / sector_count as f64;
    let actual = normalize_deg(rotation);
    let relative = normalize_deg(360.0 - actual);
    let idx = (normalize_deg(relative + width / 2.0) / width).floor() as usize;
    Some(idx.min(sector_count - 1))
}

/// Wheel rotation (in `[0, 360)`) that puts the center of sector `index`
/// under the pointer.
#[inline]
pub fn sector_center(index: usize, width: f64) -> f64 {
    normalize_deg(360.0 - index as f64 * width)
}

/// CSS transform for a displayed rotation.
pub fn rotate_css(deg: f64) -> String {
    format!("rotate({}deg)", deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_ways() {
        assert_eq!(normalize_deg(1845.0), 45.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(360.0), 0.0);
    }

    #[test]
    fn eight_sectors_at_45_is_last_sector() {
        assert_eq!(sector_at_angle(1845.0, 8), Some(7));
    }

    #[test]
    fn zero_rotation_is_first_sector() {
        assert_eq!(sector_at_angle(0.0, 5), Some(0));
        assert_eq!(sector_at_angle(0.0, 0), None);
    }

    #[test]
    fn css_transform() {
        assert_eq!(rotate_css(45.5), "rotate(45.5deg)");
    }
}
