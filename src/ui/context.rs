//! Interactive vs scripted terminal detection

use std::io::IsTerminal;

/// Environment variables set by common CI systems
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

/// Decides how output is rendered and whether prompts may block
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
    /// `--yes`: confirmations are approved without asking
    auto_yes: bool,
}

impl UiContext {
    /// Interactive when both stdin and stdout are terminals and no CI
    /// variable is set
    pub fn detect() -> Self {
        let ttys = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let ci = CI_VARS.iter().any(|var| std::env::var_os(var).is_some());
        Self {
            interactive: ttys && !ci,
            auto_yes: false,
        }
    }

    /// Plain output, no prompts
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Spinners, bars and cliclack framing
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}
