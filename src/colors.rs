//! Terminal color policy.
//!
//! Follows NO_COLOR (https://no-color.org/) and the CLICOLOR conventions:
//! `NO_COLOR` set disables colors, `CLICOLOR_FORCE` non-zero forces them,
//! `CLICOLOR=0` disables them, otherwise colors follow whether stdout is a
//! terminal.

use colored::control;
use std::io::IsTerminal;

/// Decide whether to color output from the relevant environment values
fn colors_enabled(
    no_color: Option<&str>,
    clicolor: Option<&str>,
    clicolor_force: Option<&str>,
    is_tty: bool,
) -> bool {
    if no_color.is_some() {
        return false;
    }
    if clicolor_force.is_some_and(|v| v != "0") {
        return true;
    }
    if clicolor == Some("0") {
        return false;
    }
    is_tty
}

/// Apply the color policy for the whole process. Call early in `main`.
pub fn init_colors() {
    let no_color = std::env::var("NO_COLOR").ok();
    let clicolor = std::env::var("CLICOLOR").ok();
    let clicolor_force = std::env::var("CLICOLOR_FORCE").ok();

    control::set_override(colors_enabled(
        no_color.as_deref(),
        clicolor.as_deref(),
        clicolor_force.as_deref(),
        std::io::stdout().is_terminal(),
    ));
}
