//! Line sources
//!
//! Batch mode reads a file without a prompt. Interactive mode prints the
//! prompt on standard output before every read; on a terminal it uses a
//! line editor with history, otherwise it reads standard input directly.
//!
//! Lines are handed on as raw bytes, newline included when present.

use crate::config::StartupError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
}

/// A producer of raw lines; `None` means end of input
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, InputError>;
}

/// Read one raw line, newline included
fn read_raw_line(reader: &mut impl BufRead) -> io::Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Lines from a batch file, no prompt
pub struct BatchSource<R> {
    reader: R,
}

impl BatchSource<BufReader<File>> {
    /// Open a batch file for reading
    pub fn open(path: &Path) -> Result<Self, StartupError> {
        let file = File::open(path).map_err(|source| StartupError::OpenBatch {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> BatchSource<R> {
    pub fn new(reader: R) -> Self {
        BatchSource { reader }
    }
}

impl<R: BufRead> LineSource for BatchSource<R> {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, InputError> {
        Ok(read_raw_line(&mut self.reader)?)
    }
}

/// Prompted lines from a plain reader (standard input when not a terminal)
pub struct PromptSource<R, W> {
    prompt: String,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(prompt: impl Into<String>, reader: R, writer: W) -> Self {
        PromptSource {
            prompt: prompt.into(),
            reader,
            writer,
        }
    }
}

impl<R: BufRead, W: Write> LineSource for PromptSource<R, W> {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, InputError> {
        self.writer.write_all(self.prompt.as_bytes())?;
        self.writer.flush()?;
        Ok(read_raw_line(&mut self.reader)?)
    }
}

/// Prompted lines from a terminal line editor
pub struct EditorSource {
    prompt: String,
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new(prompt: impl Into<String>) -> Result<Self, InputError> {
        Ok(EditorSource {
            prompt: prompt.into(),
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, InputError> {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    return Ok(Some(line.into_bytes()));
                }
                // Ctrl-C drops the partial line
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Pick the interactive source for the current standard input
pub fn interactive(prompt: &str) -> Box<dyn LineSource> {
    if io::stdin().is_terminal() {
        match EditorSource::new(prompt) {
            Ok(editor) => return Box::new(editor),
            Err(err) => warn!(error = %err, "line editor unavailable"),
        }
    }
    debug!("reading standard input without line editing");
    Box::new(PromptSource::new(
        prompt,
        io::stdin().lock(),
        io::stdout(),
    ))
}
