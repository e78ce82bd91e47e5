//! Progress indicators for long imports
//!
//! Bars draw to stderr and stay hidden when stderr is not a terminal, so
//! piping or capturing output never sees them.

use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use std::time::Duration;

/// Spinner counting records as they are written
///
/// Clears itself when dropped, so an import that fails leaves only the error.
pub fn create_import_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_finish(ProgressFinish::AndClear);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {msg} {human_pos} records ({per_sec})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_import_spinner() {
        let pb = create_import_spinner("Importing nucl_gb.accession2taxid");
        pb.inc(3);
        assert_eq!(pb.position(), 3);
        assert!(!pb.is_finished());
        pb.finish_and_clear();
        assert!(pb.is_finished());
    }
}
