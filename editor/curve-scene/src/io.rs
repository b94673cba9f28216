//! JSON import and export of curve data.
//!
//! The wire format is an array of curve records:
//!
//! ```json
//! [
//!   {
//!     "knots": [{ "x": 0.0, "y": 0.0, "z": 0.0 }, ...],
//!     "r": 0.25,
//!     "sector_count": 128
//!   }
//! ]
//! ```
//!
//! Knot order is preserved; radius and sector count round-trip through
//! the curve's validated setters, so a file with a degenerate radius or
//! sector count is rejected on load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::container::CurveContainer;
use crate::curve::Curve;
use crate::error::SceneResult;

#[derive(Debug, Serialize, Deserialize)]
struct KnotRecord {
    x: f64,
    y: f64,
    z: f64,
}

impl From<&Point3<f64>> for KnotRecord {
    fn from(point: &Point3<f64>) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }
}

impl From<&KnotRecord> for Point3<f64> {
    fn from(record: &KnotRecord) -> Self {
        Self::new(record.x, record.y, record.z)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveRecord {
    knots: Vec<KnotRecord>,
    r: f64,
    sector_count: u32,
}

impl CurveRecord {
    fn from_curve(curve: &Curve) -> Self {
        Self {
            knots: curve.knots().iter().map(KnotRecord::from).collect(),
            r: curve.radius(),
            sector_count: curve.sector_count() as u32,
        }
    }

    fn into_curve(self) -> SceneResult<Curve> {
        let knots = self.knots.iter().map(Point3::from).collect();
        let mut curve = Curve::from_knots(knots);
        curve.set_radius(self.r)?;
        curve.set_sector_count(self.sector_count as usize)?;
        Ok(curve)
    }
}

/// Write the container's curves as JSON.
///
/// # Errors
///
/// Returns an error when serialization or the underlying write fails.
pub fn save_curves<W: Write>(writer: W, container: &CurveContainer) -> SceneResult<()> {
    let records: Vec<CurveRecord> = container.iter().map(CurveRecord::from_curve).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    info!(curves = records.len(), "exported curves");
    Ok(())
}

/// Read curves from JSON into a fresh container.
///
/// # Errors
///
/// Returns an error when the bytes are not valid JSON, a record does not
/// match the wire format, or a record carries degenerate pipe parameters.
pub fn load_curves<R: Read>(reader: R) -> SceneResult<CurveContainer> {
    let records: Vec<CurveRecord> = serde_json::from_reader(reader)?;
    let mut container = CurveContainer::new();
    for record in records {
        container.add_curve(record.into_curve()?);
    }
    info!(curves = container.len(), "imported curves");
    Ok(container)
}

/// Write the container's curves to a JSON file at `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn save_curves_to_path<P: AsRef<Path>>(
    path: P,
    container: &CurveContainer,
) -> SceneResult<()> {
    let file = File::create(path)?;
    save_curves(BufWriter::new(file), container)
}

/// Read curves from a JSON file at `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or parsed.
pub fn load_curves_from_path<P: AsRef<Path>>(path: P) -> SceneResult<CurveContainer> {
    let file = File::open(path)?;
    load_curves(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use approx::assert_relative_eq;

    fn sample_container() -> CurveContainer {
        let mut container = CurveContainer::new();

        let mut first = Curve::from_knots(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.0, 0.5, 0.0),
        ]);
        first.set_radius(0.5).unwrap();
        first.set_sector_count(32).unwrap();
        container.add_curve(first);

        container.add_curve(Curve::from_knots(vec![
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(11.0, 0.0, 0.0),
        ]));

        container
    }

    #[test]
    fn round_trip_preserves_knots_and_parameters() {
        let original = sample_container();
        let mut bytes = Vec::new();
        save_curves(&mut bytes, &original).unwrap();
        let loaded = load_curves(bytes.as_slice()).unwrap();

        assert_eq!(loaded.len(), original.len());
        for (a, b) in original.iter().zip(loaded.iter()) {
            assert_eq!(a.knot_count(), b.knot_count());
            assert_relative_eq!(a.radius(), b.radius(), epsilon = 1e-12);
            assert_eq!(a.sector_count(), b.sector_count());
            for (ka, kb) in a.knots().iter().zip(b.knots()) {
                assert_relative_eq!(*ka, *kb, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn wire_format_field_names() {
        let container = sample_container();
        let mut bytes = Vec::new();
        save_curves(&mut bytes, &container).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"knots\""));
        assert!(text.contains("\"r\""));
        assert!(text.contains("\"sector_count\""));
        assert!(text.contains("\"x\""));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(load_curves(&b"not json"[..]).is_err());
        assert!(load_curves(&b"{\"knots\": []}"[..]).is_err()); // not an array
    }

    #[test]
    fn degenerate_parameters_are_rejected_on_load() {
        let text = r#"[{ "knots": [], "r": 0.0, "sector_count": 8 }]"#;
        assert!(load_curves(text.as_bytes()).is_err());
        let text = r#"[{ "knots": [], "r": 0.25, "sector_count": 2 }]"#;
        assert!(load_curves(text.as_bytes()).is_err());
    }

    #[test]
    fn single_knot_curve_round_trips() {
        let mut container = CurveContainer::new();
        container.add_curve(Curve::from_knots(vec![Point3::new(1.0, 2.0, 3.0)]));
        let mut bytes = Vec::new();
        save_curves(&mut bytes, &container).unwrap();
        let loaded = load_curves(bytes.as_slice()).unwrap();
        assert_eq!(loaded.curve(0).unwrap().knot_count(), 1);
        assert!(loaded.curve(0).unwrap().path().is_empty());
    }
}
