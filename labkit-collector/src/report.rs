//! Operator console output
//!
//! Submissions are only ever printed. The block layout is what instructors
//! read off the terminal, so it is kept stable.

use std::io::Write;

use labkit_core::Submission;

const RULE_WIDTH: usize = 50;

/// Render the console block for a submission
pub fn format_submission(submission: &Submission) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    format!(
        "\n{heavy}\nRECEPTION DE : {name}\n{light}\nLOGS KUBECTL :\n{logs}\n{heavy}\n\n",
        name = submission.trainee_name(),
        logs = submission.log_text(),
    )
}

/// Print a submission to stdout in one write
///
/// The stdout lock keeps the block contiguous.
pub fn announce(submission: &Submission) {
    let block = format_submission(submission);
    let mut out = std::io::stdout().lock();

    if let Err(e) = out.write_all(block.as_bytes()).and_then(|_| out.flush()) {
        tracing::warn!("Failed to print submission: {}", e);
    }
}

/// Print why a body was turned away
pub fn announce_rejection(reason: &dyn std::fmt::Display) {
    tracing::warn!("Rejected malformed submission: {}", reason);
    println!("Erreur lors de la réception : {}", reason);
}
