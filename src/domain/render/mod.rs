//! Pure renderers turning configuration into copy-paste-ready text.
//!
//! Every function here is deterministic: identical inputs produce
//! byte-identical output. Only the template-backed renderers return a
//! `Result`, and they fail solely when an embedded template is broken.

use std::fmt;

pub mod flags;
pub mod guide;
pub mod health;
pub mod install;
pub mod operator;
pub(crate) mod template;
pub mod tls;
pub mod units;

pub use flags::{FlagOptions, flag_list, render_command, render_flags};
pub use guide::{GuideOptions, cluster_guide};
pub use units::UnitKind;

/// Continuation between flags in multi-line mode.
pub const LINE_CONTINUATION: &str = " \\\n    ";

/// A titled piece of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub title: String,
    pub body: String,
}

impl TextBlock {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        f.write_str(&self.body)?;
        if !self.body.ends_with('\n') {
            writeln!(f)?;
        }
        Ok(())
    }
}
