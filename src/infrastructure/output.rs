use crate::domain::entities::{Attachment, Outcome};
use crate::infrastructure::config::OutputTarget;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const ATTACHMENT_CHUNK_SIZE: usize = 1024;

/// Prints or persists the outcome of the request
pub fn emit<W: Write>(
    outcome: Outcome,
    target: &OutputTarget,
    attachment_dir: &Path,
    out: &mut W,
) -> Result<()> {
    match outcome {
        Outcome::Failure(failure) => {
            writeln!(out, "{}", failure.to_string().red())?;
        }
        Outcome::Attachment(attachment) => {
            let path = attachment_dir.join(&attachment.filename);
            save_attachment(&path, &attachment)?;
            writeln!(
                out,
                "{}",
                format!("Ok, attachment has been saved into {}", attachment.filename).green()
            )?;
        }
        Outcome::Text(text) => match target {
            OutputTarget::Stdout => print_response_body(&text, out)?,
            OutputTarget::File(path) => {
                save_text(path, &text)?;
                writeln!(
                    out,
                    "{}",
                    format!("Ok, response has been saved into {}", path.display()).green()
                )?;
            }
        },
    }
    Ok(())
}

pub fn print_response_body<W: Write>(text: &str, out: &mut W) -> Result<()> {
    writeln!(out, "{}", "Ok, response:".green())?;
    writeln!(out, "{}", text)?;
    Ok(())
}

pub fn save_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text.as_bytes())
        .with_context(|| format!("Failed to write response to {}", path.display()))
}

/// Writes the body in fixed-size chunks, replacing any existing file.
/// The body has already been buffered in memory by the HTTP client.
pub fn save_attachment(path: &Path, attachment: &Attachment) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create attachment file {}", path.display()))?;
    for chunk in attachment.body.chunks(ATTACHMENT_CHUNK_SIZE) {
        file.write_all(chunk)
            .with_context(|| format!("Failed to write attachment to {}", path.display()))?;
    }
    file.flush()?;
    tracing::info!(path = %path.display(), bytes = attachment.body.len(), "attachment saved");
    Ok(())
}
