use crate::domain::value_objects::Payload;
use crate::infrastructure::config::JsonSource;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "> ";

/// Reads and parses a JSON document from a file or from interactive input
pub fn read_json<R: BufRead, W: Write>(source: &JsonSource, input: R, prompt: W) -> Result<Payload> {
    let text = match source {
        JsonSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        JsonSource::Interactive => read_interactive(input, prompt)?,
    };
    tracing::debug!(source = %source, bytes = text.len(), "read JSON document");
    Ok(Payload::parse(&text, &source.to_string())?)
}

/// Collects prompted lines until an empty line or end of input, joined by `\n`
pub fn read_interactive<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> Result<String> {
    let mut lines = Vec::new();
    loop {
        write!(prompt, "{}", PROMPT)?;
        prompt.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RunnerError;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn interactive_lines_are_joined_until_blank() {
        let mut prompt = Vec::new();
        let text = read_interactive(
            Cursor::new("{\r\n  \"a\": [1,\n 2]\n}\n\nignored\n"),
            &mut prompt,
        )
        .unwrap();

        assert_eq!(text, "{\n  \"a\": [1,\n 2]\n}");
        assert_eq!(String::from_utf8(prompt).unwrap(), "> > > > > ");
    }

    #[test]
    fn interactive_end_of_input_terminates() {
        let text = read_interactive(Cursor::new("[true]"), Vec::new()).unwrap();
        assert_eq!(text, "[true]");
    }

    #[test]
    fn interactive_payload_parses() {
        let payload = read_json(
            &JsonSource::Interactive,
            Cursor::new("{\"name\":\n\"value\"}\n\n"),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(payload.0, json!({"name": "value"}));
    }

    #[test]
    fn empty_first_line_is_malformed_json() {
        let err = read_json(&JsonSource::Interactive, Cursor::new("\n{\"a\":1}\n"), Vec::new())
            .unwrap_err();
        match err.downcast_ref::<RunnerError>() {
            Some(RunnerError::MalformedJson { source_name, .. }) => {
                assert_eq!(source_name, "interactive input")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn file_payload_parses_without_touching_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, \"два\", {{\"x\": null}}]").unwrap();

        let payload = read_json(
            &JsonSource::File(file.path().to_path_buf()),
            Cursor::new("should not be read"),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(payload.0, json!([1, "два", {"x": null}]));
    }

    #[test]
    fn malformed_file_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"a\": }}").unwrap();
        let path = file.path().to_path_buf();

        let err = read_json(&JsonSource::File(path.clone()), Cursor::new(""), Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
        assert!(err.downcast_ref::<RunnerError>().is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = read_json(&JsonSource::File(path), Cursor::new(""), Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
