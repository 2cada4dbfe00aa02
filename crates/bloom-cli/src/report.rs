//! Text and JSON rendering of evaluation results

use std::io::{self, Write};

use bloom_engine::domain::ConfigAdjustment;
use bloom_engine::{EvaluationReport, SweepPoint};

/// One warning line per value changed while clamping the configuration
pub fn write_adjustments<W: Write>(adjustments: &[ConfigAdjustment], out: &mut W) -> io::Result<()> {
    for adjustment in adjustments {
        writeln!(out, "warning: {adjustment}")?;
    }
    Ok(())
}

/// Human readable summary of one evaluation run
pub fn write_report<W: Write>(report: &EvaluationReport, out: &mut W) -> io::Result<()> {
    let filter = &report.config.filter;
    writeln!(
        out,
        "{} filters of 2**{} = {} bits, {} {} hash functions, {} items each",
        report.filters,
        filter.exponent,
        filter.size_bits(),
        filter.hash_count,
        filter.family,
        report.items_inserted
    )?;
    writeln!(out, "Execution took:           {:.3} seconds", report.elapsed_secs)?;
    writeln!(
        out,
        "False Positive average of {:.4} % - total amount of {} False Positives",
        report.false_positive_percent(),
        report.false_positives
    )?;
    writeln!(
        out,
        "Expected rate:            {:.4} % (fill ratio {:.3})",
        report.theoretical_false_positive_rate * 100.0,
        report.fill_ratio
    )?;
    if report.false_negatives > 0 {
        writeln!(
            out,
            "This is really suspicious: {} inserted items were reported absent",
            report.false_negatives
        )?;
    }
    Ok(())
}

/// One line per insert count
pub fn write_sweep<W: Write>(points: &[SweepPoint], out: &mut W) -> io::Result<()> {
    writeln!(out, "{:>10}  {:>12}  {:>12}", "inserted", "observed %", "expected %")?;
    for point in points {
        writeln!(
            out,
            "{:>10}  {:>12.4}  {:>12.4}",
            point.items_inserted,
            point.false_positive_rate * 100.0,
            point.theoretical_false_positive_rate * 100.0
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_engine::{EvaluationConfig, EvaluationService, SequentialSource};

    fn small_report() -> EvaluationReport {
        let config = EvaluationConfig {
            num_filters: 2,
            items_to_insert: 50,
            known_probes: 10,
            unknown_probes: 20,
            ..EvaluationConfig::default()
        };
        EvaluationService::new()
            .run(&config, &SequentialSource::new("r"), &|| {})
            .unwrap()
    }

    #[test]
    fn test_text_report_lines() {
        let mut out = Vec::new();
        write_report(&small_report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("2 filters of 2**16 = 65536 bits, 3 non-cryptographic"));
        assert!(text.contains("Execution took:"));
        assert!(text.contains("False Positive average of"));
        assert!(!text.contains("suspicious"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_value(small_report()).unwrap();

        assert_eq!(json["filters"], 2);
        assert_eq!(json["false_negatives"], 0);
        assert_eq!(json["config"]["filter"]["family"], "non-cryptographic");
    }

    #[test]
    fn test_adjustments_are_written_as_warnings() {
        let adjustments = vec![
            ConfigAdjustment::ExponentRaised { requested: 0, applied: 2 },
            ConfigAdjustment::HashCountLowered { requested: 9, applied: 5 },
        ];
        let mut out = Vec::new();
        write_adjustments(&adjustments, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "warning: size restriction, needs to be bigger, now set to 2**2 = 4 bits\n\
             warning: not enough hash functions available, value set to the max of 5\n"
        );
    }

    #[test]
    fn test_sweep_table() {
        let points = vec![SweepPoint {
            items_inserted: 100,
            unknown_probes: 10,
            false_positives: 1,
            false_positive_rate: 0.1,
            theoretical_false_positive_rate: 0.05,
        }];
        let mut out = Vec::new();
        write_sweep(&points, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().contains("10.0000"));
    }
}
