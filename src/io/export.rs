//! CSV and JSON-lines export for snapshot history.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::DashResult;
use crate::metrics::Snapshot;

/// Column header for snapshot CSV export.
pub const HEADER: [&str; 14] = [
    "seq",
    "timestamp_ms",
    "generation_kw",
    "transmission_kw",
    "distribution_kw",
    "consumption_kw",
    "generation_eff_pct",
    "transmission_eff_pct",
    "overall_eff_pct",
    "temperature_c",
    "wind_speed_ms",
    "solar_irradiance_wm2",
    "humidity_pct",
    "alert_count",
];

/// Exports snapshots to a CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_csv(snapshots: &[Snapshot], path: &Path) -> DashResult<()> {
    let file = File::create(path)?;
    write_csv(snapshots, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = snapshots.len(), "csv written");
    Ok(())
}

/// Writes snapshots as CSV to any writer, one row per snapshot.
///
/// Output is deterministic for identical input.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(snapshots: &[Snapshot], writer: impl Write) -> DashResult<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;

    for s in snapshots {
        let p = &s.power_flow;
        let e = &s.efficiency;
        let w = &s.weather;
        wtr.write_record(&[
            s.seq.to_string(),
            s.timestamp_ms.to_string(),
            format!("{:.4}", p.generation_kw),
            format!("{:.4}", p.transmission_kw),
            format!("{:.4}", p.distribution_kw),
            format!("{:.4}", p.consumption_kw),
            format!("{:.3}", e.generation_pct),
            format!("{:.3}", e.transmission_pct),
            format!("{:.3}", e.overall_pct),
            format!("{:.2}", w.temperature_c),
            format!("{:.2}", w.wind_speed_ms),
            format!("{:.1}", w.solar_irradiance_wm2),
            format!("{:.1}", w.humidity_pct),
            s.alerts.len().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes each snapshot as one JSON object per line.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json_lines(snapshots: &[Snapshot], mut writer: impl Write) -> DashResult<()> {
    for s in snapshots {
        serde_json::to_writer(&mut writer, s)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::metrics::SnapshotGenerator;

    fn snapshots(n: u64) -> Vec<Snapshot> {
        let mut g = SnapshotGenerator::new(&DashboardConfig::baseline());
        (0..n).map(|i| g.next(i * 30_000)).collect()
    }

    #[test]
    fn header_row_first() {
        let mut buf = Vec::new();
        assert!(write_csv(&snapshots(1), &mut buf).is_ok());
        let output = String::from_utf8(buf).unwrap_or_default();
        assert_eq!(output.lines().next(), Some(HEADER.join(",").as_str()));
    }

    #[test]
    fn one_row_per_snapshot() {
        let mut buf = Vec::new();
        assert!(write_csv(&snapshots(24), &mut buf).is_ok());
        let output = String::from_utf8(buf).unwrap_or_default();
        assert_eq!(output.lines().count(), 25);
    }

    #[test]
    fn csv_columns_parse() {
        let snaps = snapshots(3);
        let mut buf = Vec::new();
        assert!(write_csv(&snaps, &mut buf).is_ok());

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let mut rows = 0;
        for (record, snap) in rdr.records().zip(&snaps) {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let Some(rec) = rec else { continue };
            assert_eq!(rec.len(), HEADER.len());
            assert_eq!(rec[0].parse::<u64>().ok(), Some(snap.seq));
            for i in 2..13 {
                assert!(rec[i].parse::<f32>().is_ok(), "column {i} should parse");
            }
            assert_eq!(rec[13].parse::<usize>().ok(), Some(snap.alerts.len()));
            rows += 1;
        }
        assert_eq!(rows, 3);
    }

    #[test]
    fn json_lines_one_object_per_snapshot() {
        let snaps = snapshots(4);
        let mut buf = Vec::new();
        assert!(write_json_lines(&snaps, &mut buf).is_ok());
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        let first: Option<serde_json::Value> = serde_json::from_str(lines[0]).ok();
        assert_eq!(
            first.as_ref().and_then(|v| v["seq"].as_u64()),
            Some(0)
        );
        assert!(first.is_some_and(|v| v["efficiency"]["overall_pct"].is_number()));
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!("gridview-export-{}.csv", std::process::id()));
        assert!(export_csv(&snapshots(2), &path).is_ok());
        let text = std::fs::read_to_string(&path).unwrap_or_default();
        assert_eq!(text.lines().count(), 3);
        let _ = std::fs::remove_file(&path);
    }
}
