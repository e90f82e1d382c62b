//! Progress indicators with CI fallback

use super::context::UiContext;
use crate::api::ProgressFn;
use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner. Plain mode prints nothing until it stops.
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else if !self.interactive {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else if !self.interactive {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }

    /// Remove the spinner without a message
    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

/// Byte progress for file uploads.
///
/// An indicatif bar in interactive mode; in plain mode a single line once
/// the body has been sent.
pub struct UploadProgress {
    bar: Option<ProgressBar>,
    label: String,
}

impl UploadProgress {
    pub fn new(ctx: &UiContext, label: &str) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(0);
            if let Ok(bar_style) = ProgressStyle::default_bar().template(
                "  {spinner:.magenta} Uploading {prefix}  {bar:24.magenta/dim} {bytes}/{total_bytes} {elapsed:.dim}",
            ) {
                bar.set_style(bar_style.progress_chars("━╸─"));
            }
            bar.set_prefix(label.to_string());
            Some(bar)
        } else {
            None
        };
        Self {
            bar,
            label: label.to_string(),
        }
    }

    /// Callback to hand to the API client
    pub fn callback(&self) -> ProgressFn {
        match self.bar.clone() {
            Some(bar) => Arc::new(move |sent, total| {
                bar.set_length(total);
                bar.set_position(sent);
            }),
            None => {
                let label = self.label.clone();
                let reported = AtomicBool::new(false);
                Arc::new(move |sent, total| {
                    if sent >= total && !reported.swap(true, Ordering::Relaxed) {
                        println!("  Uploaded {} ({})", label, HumanBytes(total));
                    }
                })
            }
        }
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
