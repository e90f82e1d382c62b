//! Terminal UI
//!
//! Uses `cliclack` for prompts and step logging in a TTY, with plain
//! `[OK]`/`[FAIL]` lines when stdout is piped or running under CI.
//!
//! ```rust,ignore
//! use dmdesk::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect().with_auto_yes(args.yes);
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Fetching accounts...");
//! spinner.stop("12 accounts");
//!
//! ui::key_value(&ctx, "Role", "admin");
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, note, outro_success, remark, section, step_error,
    step_info, step_ok, step_warn, step_warn_hint, table,
};
pub use progress::{TaskSpinner, UploadProgress};
pub use prompts::{confirm, input, password};
pub use theme::{init_theme, DeskTheme};
