//! `KEY='VALUE'` env file updates.

use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        EnvFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set each key in order, replacing the first line with that key or
    /// appending a new one, then rewrite the whole file.
    ///
    /// A missing file is created.
    pub fn set_values<I, K, V>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("read env file {}", self.path.display()))
            }
        };
        let mut lines = Lines::parse(&content);

        for (key, value) in values {
            let key = key.as_ref();
            lines.set(key, &value.to_string());
            tracing::debug!("env file {}: {}='{}'", self.path.display(), key, value);
        }

        fs::write(&self.path, lines.render())
            .with_context(|| format!("write env file {}", self.path.display()))
    }
}

/// A line and the terminator it was read with, empty on an unterminated
/// last line.
#[derive(Debug, PartialEq, Eq)]
struct Line {
    text: String,
    ending: &'static str,
}

/// File content split into lines, untouched lines render byte for byte.
#[derive(Debug)]
struct Lines {
    lines: Vec<Line>,
    eol: &'static str,
}

impl Lines {
    fn parse(content: &str) -> Self {
        let mut lines = Vec::new();
        let mut rest = content;
        while !rest.is_empty() {
            let line = match rest.find('\n') {
                Some(end) => {
                    let (text, ending) = match rest[..end].strip_suffix('\r') {
                        Some(text) => (text, "\r\n"),
                        None => (&rest[..end], "\n"),
                    };
                    rest = &rest[end + 1..];
                    Line {
                        text: text.to_owned(),
                        ending,
                    }
                }
                None => {
                    let line = Line {
                        text: rest.to_owned(),
                        ending: "",
                    };
                    rest = "";
                    line
                }
            };
            lines.push(line);
        }
        let eol = match lines.first() {
            Some(line) if !line.ending.is_empty() => line.ending,
            _ => "\n",
        };
        Lines { lines, eol }
    }

    /// Key of a line is the text before its first `=`.
    fn set(&mut self, key: &str, value: &str) {
        let text = format!("{}='{}'", key, value);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.text.split('=').next() == Some(key))
        {
            line.text = text;
            return;
        }

        // the new line takes over the last line's terminator
        let ending = match self.lines.last_mut() {
            Some(last) => std::mem::replace(&mut last.ending, self.eol),
            None => self.eol,
        };
        self.lines.push(Line { text, ending });
    }

    fn render(&self) -> String {
        self.lines
            .iter()
            .flat_map(|line| [line.text.as_str(), line.ending])
            .collect()
    }
}
