use crate::dynamics::{StepMetrics, Summary};
use crate::initialization::memory_footprint;
use std::io::{self, Write};

const BOLD: &str = "\x1b[1m";
const GREEN_BACKGROUND: &str = "\x1b[42m";
const RESET: &str = "\x1b[0m";
const RULE: &str = "-----------------------------------------------------";

/// Blank line, memory footprint of the particle arrays, blank line.
pub fn memory_header(n_particles: usize) -> String {
    let bytes: usize = memory_footprint(n_particles);
    format!(
        "\n{}Total memory size:{} {} B, {} KiB, {} MiB\n",
        BOLD,
        RESET,
        bytes,
        bytes >> 10,
        bytes >> 20
    )
}

pub fn table_header() -> String {
    format!(
        "{}{:>5} {:>10} {:>10} {:>8}{}",
        BOLD, "Step", "Time, s", "Interact/s", "GFLOP/s", RESET
    )
}

/// One table row, warm-up steps carry a `*`.
pub fn step_row(metrics: &StepMetrics) -> String {
    format!(
        "{:>5} {:>10} {:>10} {:>8.1} {}",
        metrics.step,
        c_exponential(metrics.elapsed, 3),
        c_exponential(metrics.interactions_per_second, 3),
        metrics.gflops,
        if metrics.warmup { "*" } else { "" }
    )
}

/// Writes one row and flushes, so that each step shows up as soon as it is
/// measured.
pub fn write_step_row<W: Write + ?Sized>(out: &mut W, metrics: &StepMetrics) -> io::Result<()> {
    writeln!(out, "{}", step_row(metrics))?;
    out.flush()
}

pub fn summary_block(summary: &Summary) -> String {
    let mut string: String = String::from(RULE);
    string.push('\n');
    string.push_str(&format!(
        "{}{} {:>4} {}{:>10.1} +- {:.1} GFLOP/s{}",
        BOLD, "Average performance:", "", GREEN_BACKGROUND, summary.mean, summary.std_dev, RESET
    ));
    string.push('\n');
    string.push_str(RULE);
    string
}

/// Formats like printf's `%.{precision}e`: signed exponent with at least two
/// digits, e.g. `1.500e-03`.
pub fn c_exponential(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }
    let formatted: String = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign: char = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_matches_printf() {
        assert_eq!(c_exponential(0.0015, 3), "1.500e-03");
        assert_eq!(c_exponential(123456.0, 3), "1.235e+05");
        assert_eq!(c_exponential(0.0, 3), "0.000e+00");
        assert_eq!(c_exponential(-2.5e-120, 2), "-2.50e-120");
        assert_eq!(c_exponential(f64::INFINITY, 3), "inf");
        assert_eq!(c_exponential(f64::NAN, 3), "nan");
    }

    #[test]
    fn memory_header_reports_all_units() {
        let header = memory_header(16384);
        assert!(header.starts_with('\n'));
        assert!(header.contains("393216 B, 384 KiB, 0 MiB"));
        assert!(memory_header(1 << 20).contains("25165824 B, 24576 KiB, 24 MiB"));
    }

    #[test]
    fn header_columns_are_right_aligned() {
        assert_eq!(
            table_header(),
            "\x1b[1m Step    Time, s Interact/s  GFLOP/s\x1b[0m"
        );
    }

    #[test]
    fn rows_mark_warmup_steps() {
        let warm = StepMetrics {
            step: 0,
            elapsed: 0.25,
            interactions_per_second: 1.0737e9,
            gflops: 24.7,
            warmup: true,
        };
        assert_eq!(step_row(&warm), "    0  2.500e-01  1.074e+09     24.7 *");

        let measured = StepMetrics { warmup: false, step: 12, ..warm };
        assert_eq!(step_row(&measured), "   12  2.500e-01  1.074e+09     24.7 ");
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn rows_are_written_line_by_line() {
        let metrics = StepMetrics {
            step: 4,
            elapsed: 0.5,
            interactions_per_second: 2.0e6,
            gflops: 0.1,
            warmup: false,
        };
        let mut out: Vec<u8> = Vec::new();
        write_step_row(&mut out, &metrics).unwrap();
        write_step_row(&mut out, &metrics).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{0}\n{0}\n", step_row(&metrics)));
    }

    #[test]
    fn failed_writes_are_reported() {
        let metrics = StepMetrics::new(0, 8, 0.5, true);
        let error = write_step_row(&mut Closed, &metrics).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn summary_is_framed_by_rules() {
        let block = summary_block(&Summary {
            mean: 31.34,
            std_dev: 0.52,
            samples: 7,
        });
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[2], RULE);
        assert_eq!(
            lines[1],
            "\x1b[1mAverage performance:      \x1b[42m      31.3 +- 0.5 GFLOP/s\x1b[0m"
        );
    }
}
