//! Playback element: hands a media URL to an external player.

use std::process::{Command, Stdio};

use anyhow::{Context, Result, ensure};

/// Placeholder replaced by the media URL in a player command.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Splits a player command line into program and arguments, substituting
/// the URL for `{url}` or appending it when no placeholder is present.
///
/// # Errors
///
/// Returns an error if the command line is empty.
pub fn build_command(template: &str, url: &str) -> Result<(String, Vec<String>)> {
    let mut parts: Vec<String> = template.split_whitespace().map(String::from).collect();
    ensure!(!parts.is_empty(), "player command is empty");

    let mut replaced = false;
    for part in &mut parts {
        if part.contains(URL_PLACEHOLDER) {
            *part = part.replace(URL_PLACEHOLDER, url);
            replaced = true;
        }
    }
    if !replaced {
        parts.push(String::from(url));
    }

    let program = parts.remove(0);
    Ok((program, parts))
}

/// Starts playback of `url` without waiting for it to finish.
///
/// Uses the configured player command when given, otherwise the system
/// opener.
///
/// # Errors
///
/// Returns an error if the player cannot be spawned or the opener fails.
pub fn play(url: &str, command: Option<&str>) -> Result<()> {
    match command.filter(|c| !c.trim().is_empty()) {
        Some(template) => {
            let (program, args) = build_command(template, url)?;
            tracing::info!(%program, "starting player");
            let mut child = Command::new(&program)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .with_context(|| format!("failed to spawn player: {program}"))?;
            tracing::debug!(pid = child.id(), "player spawned");
            // Reap in the background.
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        None => {
            tracing::info!("opening trailer with system opener");
            open::that(url).with_context(|| format!("failed to open {url}"))?;
        }
    }
    Ok(())
}

/// Height of a 16:9 frame `width` cells wide.
///
/// Terminal cells are about twice as tall as they are wide.
#[must_use]
pub const fn frame_height(width: u16) -> u16 {
    width.saturating_mul(9) / 32
}
