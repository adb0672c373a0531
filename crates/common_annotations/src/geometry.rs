//! Conversions between absolute-pixel bounding boxes and the portable
//! percentage space used by the interactive side.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// A bounding box in percentage space, `[0, 100]` relative to its image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A bounding box in integer pixel space, with its derived area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub area: i64,
}

impl PixelBox {
    #[must_use]
    pub fn bbox(&self) -> [i64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

/// Converts a pixel bbox to percentage space at full float precision.
///
/// # Errors
///
/// Returns `GeometryError::InvalidGeometry` if either image dimension is not
/// strictly positive.
pub fn to_percent(
    bbox: [i64; 4],
    image_width: i64,
    image_height: i64,
) -> Result<PercentBox, GeometryError> {
    check_dimensions(image_width, image_height)?;

    let [x, y, width, height] = bbox;
    let w = image_width as f64;
    let h = image_height as f64;
    Ok(PercentBox {
        x: x as f64 / w * 100.0,
        y: y as f64 / h * 100.0,
        width: width as f64 / w * 100.0,
        height: height as f64 / h * 100.0,
    })
}

/// Converts a percentage bbox back to integer pixels.
///
/// Each coordinate is rounded to the nearest pixel independently, and `area`
/// is derived from the rounded width and height only, never from the rounded
/// position. That ordering is what keeps the pixel-percent-pixel round trip
/// within one pixel per coordinate.
///
/// # Errors
///
/// Returns `GeometryError::InvalidGeometry` if either image dimension is not
/// strictly positive, or if any input coordinate is non-finite.
pub fn to_pixels(
    percent: &PercentBox,
    image_width: i64,
    image_height: i64,
) -> Result<PixelBox, GeometryError> {
    check_dimensions(image_width, image_height)?;

    let coords = [percent.x, percent.y, percent.width, percent.height];
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(GeometryError::InvalidGeometry(format!(
            "non-finite coordinate in {coords:?}"
        )));
    }

    let scale = |value: f64, extent: i64| (value / 100.0 * extent as f64).round() as i64;
    let width = scale(percent.width, image_width);
    let height = scale(percent.height, image_height);
    Ok(PixelBox {
        x: scale(percent.x, image_width),
        y: scale(percent.y, image_height),
        width,
        height,
        area: width * height,
    })
}

fn check_dimensions(image_width: i64, image_height: i64) -> Result<(), GeometryError> {
    if image_width <= 0 || image_height <= 0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "image dimensions must be positive, got {image_width}x{image_height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_example_is_exact() {
        let percent = to_percent([80, 60, 160, 120], 800, 600).expect("to_percent");
        assert_eq!(percent.x, 10.0);
        assert_eq!(percent.y, 10.0);
        assert_eq!(percent.width, 20.0);
        assert_eq!(percent.height, 20.0);

        let pixels = to_pixels(&percent, 800, 600).expect("to_pixels");
        assert_eq!(pixels.bbox(), [80, 60, 160, 120]);
        assert_eq!(pixels.area, 160 * 120);
    }

    #[test]
    fn round_trip_stays_within_one_pixel() {
        let dimensions = [(1, 1), (3, 7), (123, 457), (800, 600), (1921, 1079)];
        for &(image_w, image_h) in &dimensions {
            let boxes = [
                [0, 0, image_w, image_h],
                [0, 0, 1, 1],
                [image_w / 3, image_h / 3, image_w / 2, image_h / 2],
                [image_w - 1, image_h - 1, 1, 1],
            ];
            for bbox in boxes {
                let percent = to_percent(bbox, image_w, image_h).expect("to_percent");
                let pixels = to_pixels(&percent, image_w, image_h).expect("to_pixels");
                let round_tripped = pixels.bbox();
                for (original, restored) in bbox.iter().zip(round_tripped.iter()) {
                    assert!(
                        (original - restored).abs() <= 1,
                        "{bbox:?} -> {round_tripped:?} at {image_w}x{image_h}"
                    );
                }
            }
        }
    }

    #[test]
    fn percent_output_stays_in_bounds() {
        let tolerance = 1e-6;
        let cases = [
            ([0, 0, 640, 480], 640, 480),
            ([100, 50, 540, 430], 640, 480),
            ([639, 479, 1, 1], 640, 480),
        ];
        for (bbox, image_w, image_h) in cases {
            let percent = to_percent(bbox, image_w, image_h).expect("to_percent");
            assert!(percent.x >= -tolerance);
            assert!(percent.y >= -tolerance);
            assert!(percent.x + percent.width <= 100.0 + tolerance);
            assert!(percent.y + percent.height <= 100.0 + tolerance);
        }
    }

    #[test]
    fn area_is_decoupled_from_position_rounding() {
        // A box whose position rounds down but whose extent rounds up.
        let percent = PercentBox {
            x: 10.04,
            y: 10.04,
            width: 20.06,
            height: 20.06,
        };
        let pixels = to_pixels(&percent, 1000, 1000).expect("to_pixels");
        assert_eq!(pixels.x, 100);
        assert_eq!(pixels.width, 201);
        assert_eq!(pixels.area, 201 * 201);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(to_percent([0, 0, 1, 1], 0, 100).is_err());
        assert!(to_percent([0, 0, 1, 1], 100, -5).is_err());
        let percent = PercentBox {
            x: 1.0,
            y: 1.0,
            width: 1.0,
            height: 1.0,
        };
        assert!(to_pixels(&percent, 0, 100).is_err());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let percent = PercentBox {
            x: f64::NAN,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(to_pixels(&percent, 100, 100).is_err());

        let infinite = PercentBox {
            x: 0.0,
            y: 0.0,
            width: f64::INFINITY,
            height: 10.0,
        };
        assert!(to_pixels(&infinite, 100, 100).is_err());
    }
}
