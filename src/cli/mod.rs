pub mod embed;
pub mod extract;

pub use embed::*;
pub use extract::*;

/// Output volume for CLI operations, threaded through each call instead of
/// living in process-wide mutable state. `silent` wins over `verbose`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub verbose: bool,
    pub silent: bool,
}

impl OutputOptions {
    /// Normal progress output, suppressed by `--silent`.
    pub fn status(&self, msg: &str) {
        if !self.silent {
            println!("{}", msg);
        }
    }

    /// Detail output, shown only with `--verbose` (and not `--silent`).
    pub fn detail(&self, msg: &str) {
        if self.verbose && !self.silent {
            println!("{}", msg);
        }
    }
}
