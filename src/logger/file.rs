/// Plain-text log file output
///
/// One file per process start under `logs/`. Failures to open the file
/// disable file logging silently; console output is unaffected.
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Directory that receives log files
pub const LOGS_DIR: &str = "logs";

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file for this process
pub fn init_file_logging() {
    if !super::config::get_logger_config().file_logging_enabled {
        return;
    }

    if fs::create_dir_all(LOGS_DIR).is_err() {
        return;
    }

    let path: PathBuf = [
        LOGS_DIR,
        &format!("mailer_{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S")),
    ]
    .iter()
    .collect();

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(BufWriter::new(file));
    }
}

/// Append one line to the log file (no-op when file logging is off)
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = write_line(writer, line);
        }
    }
}

/// Each line reaches disk immediately; the process may die without a
/// graceful shutdown
fn write_line<W: Write>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writeln!(writer, "{}", line)?;
    writer.flush()
}

/// Flush buffered log lines to disk
pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_on_disk_without_explicit_flush() {
        let path = std::env::temp_dir().join(format!("mailer_log_test_{}.log", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut writer = BufWriter::new(file);

        write_line(&mut writer, "[SCHEDULER] [ERROR] Scheduled report failed").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Scheduled report failed"));
        drop(writer);
        let _ = fs::remove_file(&path);
    }
}
