use crate::error::RecallError;
use crate::recall::{RecallReport, TaskSnapshot};
use std::fmt::Write;

/// Reply for a finished recall. Full success stays silent.
pub fn render_recall(result: &Result<RecallReport, RecallError>) -> Option<String> {
    match result {
        Ok(report) => report.summary(),
        Err(error) => Some(error.user_message().to_string()),
    }
}

pub fn render_stop(stopped: usize) -> String {
    if stopped == 0 {
        "no active operation".to_string()
    } else {
        format!("stopped {stopped} recall task(s)")
    }
}

pub fn render_status(tasks: &[TaskSnapshot]) -> String {
    if tasks.is_empty() {
        return "no active operation".to_string();
    }

    let mut out = format!("{} recall task(s) running:", tasks.len());
    for task in tasks {
        let _ = write!(
            out,
            "\n- {}/{} done ({} failed){}",
            task.succeeded + task.failed,
            task.total,
            task.failed,
            if task.cancelled { ", stopping" } else { "" }
        );
    }
    out
}
