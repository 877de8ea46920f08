//! Progress indicators for the nvctl CLI.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over a known number of resources.
pub fn bar(len: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg:<40} [{bar:25}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb.set_message(msg.to_string());
    pb
}
