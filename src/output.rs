//! Results output formatting (CSV).

use std::io::Write;

use crate::error::Result;
use crate::sweep::BodeDiagram;

/// Write a sampled frequency response as CSV.
///
/// Format:
/// ```csv
/// Frequency,Magnitude_dB,Phase_deg
/// 10,-0.0003,-0.57
/// 10.233,-0.0003,-0.59
/// ```
pub fn write_bode_csv<W: Write>(diagram: &BodeDiagram, writer: &mut W) -> Result<()> {
    writeln!(writer, "Frequency,Magnitude_dB,Phase_deg")?;
    for point in &diagram.points {
        writeln!(
            writer,
            "{},{},{}",
            point.frequency_hz,
            point.magnitude_db(),
            point.phase_deg()
        )?;
    }
    Ok(())
}

/// Write the characteristic-frequency markers as CSV.
///
/// Format:
/// ```csv
/// Frequency,From_dB,To_dB
/// 1591.5494309189535,-3,-40
/// ```
pub fn write_markers_csv<W: Write>(diagram: &BodeDiagram, writer: &mut W) -> Result<()> {
    writeln!(writer, "Frequency,From_dB,To_dB")?;
    for marker in &diagram.markers {
        writeln!(
            writer,
            "{},{},{}",
            marker.frequency_hz, marker.from_db, marker.to_db
        )?;
    }
    Ok(())
}
