//! Math resolution
//!
//! Non-visual formats keep math as TeX source between dollar delimiters (see
//! [`delimit`]). Visual formats ask a [`MathRenderer`]; the default one shells
//! out to an external tool that reads TeX on stdin and writes markup on stdout.
//!
//! Whether the tool exists is probed once per [`ExternalMathTool`] and cached.
//! The process-wide [`default_tool`] therefore probes once per process.
//! Renderers fall back to escaped source in a code wrapper when the tool is
//! unavailable; a tool that runs and fails is an error, not a fallback.

use crate::error::FormatError;
use once_cell::sync::{Lazy, OnceCell};
use std::io::Write;
use std::process::{Command, Stdio};

pub const DEFAULT_COMMAND: &str = "katex";
pub const DEFAULT_DISPLAY_FLAG: &str = "--display-mode";

/// Something that can typeset TeX math for visual output.
pub trait MathRenderer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Typeset `tex`; `display` selects block layout.
    fn render(&self, tex: &str, display: bool) -> Result<String, FormatError>;
}

/// External command line math renderer.
#[derive(Debug)]
pub struct ExternalMathTool {
    command: String,
    display_flag: String,
    available: OnceCell<bool>,
}

impl ExternalMathTool {
    pub fn new(command: impl Into<String>, display_flag: impl Into<String>) -> Self {
        ExternalMathTool {
            command: command.into(),
            display_flag: display_flag.into(),
            available: OnceCell::new(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn display_flag(&self) -> &str {
        &self.display_flag
    }
}

impl Default for ExternalMathTool {
    fn default() -> Self {
        ExternalMathTool::new(DEFAULT_COMMAND, DEFAULT_DISPLAY_FLAG)
    }
}

impl MathRenderer for ExternalMathTool {
    fn is_available(&self) -> bool {
        *self.available.get_or_init(|| {
            let found = probe(&self.command);
            log::debug!("math tool {} available: {found}", self.command);
            found
        })
    }

    fn render(&self, tex: &str, display: bool) -> Result<String, FormatError> {
        let mut command = Command::new(&self.command);
        if display {
            command.arg(&self.display_flag);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FormatError::ResourceError(format!("failed to launch {}: {e}", self.command))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(tex.as_bytes()).map_err(|e| {
                FormatError::ResourceError(format!("failed to write to {}: {e}", self.command))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            FormatError::ResourceError(format!("failed to wait for {}: {e}", self.command))
        })?;

        if !output.status.success() {
            return Err(FormatError::ResourceError(format!(
                "{} exited with status {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

#[cfg(feature = "math-tool")]
fn probe(command: &str) -> bool {
    which::which(command).is_ok()
}

#[cfg(not(feature = "math-tool"))]
fn probe(_command: &str) -> bool {
    false
}

/// A renderer that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMathRenderer;

impl MathRenderer for NoMathRenderer {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _tex: &str, _display: bool) -> Result<String, FormatError> {
        Err(FormatError::ResourceError(
            "no math renderer available".to_string(),
        ))
    }
}

static DEFAULT_TOOL: Lazy<ExternalMathTool> = Lazy::new(ExternalMathTool::default);

/// The shared `katex` tool, probed at most once per process.
pub fn default_tool() -> &'static ExternalMathTool {
    &DEFAULT_TOOL
}

/// Wrap TeX in dollar delimiters, escaping literal dollars once.
pub fn delimit(tex: &str, display: bool) -> String {
    let escaped = tex.replace('$', "\\$");
    if display {
        format!("$${escaped}$$")
    } else {
        format!("${escaped}$")
    }
}
