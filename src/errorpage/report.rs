//! Exception reports.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::errorpage::pages::ErrorReporter;

const DELIMITER: &str = "* * * * * * * * * * * * * * * * * * * * \n";

/// Write an exception report to `w`: timestamp, the sorted process
/// environment, and the error itself, between delimiter lines.
pub fn dump<W: Write>(w: &mut W, error: &dyn fmt::Display) -> io::Result<()> {
    w.write_all(DELIMITER.as_bytes())?;
    writeln!(
        w,
        "Exception Report: {}\n",
        chrono::Local::now().format("%a %b %e %H:%M:%S %Y")
    )?;

    writeln!(w, "Environment variables:")?;
    let mut vars: Vec<(String, String)> = std::env::vars().collect();
    vars.sort();
    for (key, value) in vars {
        writeln!(w, "  {}: {}", key, value)?;
    }
    writeln!(w)?;

    writeln!(w, "{}", error)?;

    writeln!(w, "\n(End of Exception Report)")?;
    w.write_all(DELIMITER.as_bytes())?;
    Ok(())
}

/// Top-level handler for a dying script: shows the server-error page on
/// stdout and appends the exception report to `log_file`.
///
/// When the log file cannot be opened (or none is configured) the
/// report goes to stderr instead, so look there if you have problems.
pub fn handle_error(reporter: &ErrorReporter, log_file: Option<&Path>, error: &dyn fmt::Display) {
    println!("{}", reporter.server_error_page());

    let opened = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    let outcome = match opened {
        Some(mut fd) => dump(&mut fd, error),
        None => dump(&mut io::stderr().lock(), error),
    };
    if let Err(err) = outcome {
        tracing::error!(%err, "failed to write exception report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_frames_the_report() {
        let mut out = Vec::new();
        dump(&mut out, &"something broke").unwrap();
        let report = String::from_utf8(out).unwrap();

        assert!(report.starts_with(DELIMITER));
        assert!(report.ends_with(DELIMITER));
        assert!(report.contains("Exception Report: "));
        assert!(report.contains("Environment variables:"));
        assert!(report.contains("something broke"));
        assert!(report.contains("(End of Exception Report)"));
    }

    #[test]
    fn environment_is_sorted() {
        std::env::set_var("ZZ_REPORT_TEST", "last");
        std::env::set_var("AA_REPORT_TEST", "first");
        let mut out = Vec::new();
        dump(&mut out, &"x").unwrap();
        let report = String::from_utf8(out).unwrap();
        let first = report.find("AA_REPORT_TEST").unwrap();
        let last = report.find("ZZ_REPORT_TEST").unwrap();
        assert!(first < last);
    }

    #[test]
    fn handle_error_appends_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        let reporter = ErrorReporter::new();
        handle_error(&reporter, Some(&log), &"first failure");
        handle_error(&reporter, Some(&log), &"second failure");
        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.contains("first failure"));
        assert!(contents.contains("second failure"));
    }
}
