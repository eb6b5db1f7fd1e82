use std::io::{self, BufRead, Write};

use roadnet_lib::RoadMap;
use thiserror::Error;
use tracing::debug;

use super::{parse_line, CommandOutput, ParseError};
use crate::output::OutputFormat;

/// Why a single input line was rejected.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("line is not terminated by a newline")]
    Unterminated,

    #[error("line is not valid UTF-8")]
    InvalidEncoding,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Map(#[from] roadnet_lib::Error),
}

/// Counters reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: usize,
    pub rejected: usize,
}

/// Applies input lines to one [`RoadMap`] in order.
#[derive(Debug, Default)]
pub struct Session {
    map: RoadMap,
    format: OutputFormat,
    summary: SessionSummary,
}

impl Session {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            map: RoadMap::new(),
            format,
            summary: SessionSummary::default(),
        }
    }

    pub fn map(&self) -> &RoadMap {
        &self.map
    }

    /// Process every line of `reader`. Descriptions go to `out`, `ERROR n`
    /// lines go to `err`. Only I/O failures abort the session.
    pub fn run<R, W, E>(
        &mut self,
        mut reader: R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<SessionSummary>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            self.process_line(&buffer, out, err)?;
        }
        out.flush()?;
        err.flush()?;
        Ok(self.summary)
    }

    /// Handle one raw line, including its trailing newline when present.
    pub fn process_line<W: Write, E: Write>(
        &mut self,
        raw: &[u8],
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        self.summary.lines += 1;
        let number = self.summary.lines;
        if matches!(raw.first(), Some(b'#') | Some(b'\n')) {
            return Ok(());
        }

        match self.execute(raw) {
            Ok(CommandOutput::Silent) => Ok(()),
            Ok(CommandOutput::Description { id, description }) => {
                self.format.write_description(out, id, description.as_ref())
            }
            Err(error) => {
                debug!(line = number, error = %error, "command rejected");
                self.summary.rejected += 1;
                writeln!(err, "ERROR {number}")
            }
        }
    }

    fn execute(&mut self, raw: &[u8]) -> Result<CommandOutput, LineError> {
        let body = raw.strip_suffix(b"\n").ok_or(LineError::Unterminated)?;
        // City names are UTF-8; legacy single-byte encodings are rejected.
        let line = std::str::from_utf8(body).map_err(|_| LineError::InvalidEncoding)?;
        let command = parse_line(line)?;
        Ok(command.apply(&mut self.map)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (String, String, SessionSummary) {
        let mut session = Session::new(OutputFormat::Text);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = session
            .run(input.as_bytes(), &mut out, &mut err)
            .expect("in-memory io");
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            summary,
        )
    }

    #[test]
    fn comments_and_blank_lines_are_counted_but_skipped() {
        let (out, err, summary) = run("# comment\n\naddRoad;A;B;1;2000\nbogus\n");
        assert_eq!(out, "");
        assert_eq!(err, "ERROR 4\n");
        assert_eq!(summary, SessionSummary { lines: 4, rejected: 1 });
    }

    #[test]
    fn last_line_without_newline_is_rejected() {
        let (out, err, _) = run("addRoad;A;B;1;2000\ngetRouteDescription;1");
        assert_eq!(out, "");
        assert_eq!(err, "ERROR 2\n");
    }

    #[test]
    fn unterminated_comment_is_still_skipped() {
        let (_, err, summary) = run("addRoad;A;B;1;2000\n# trailing");
        assert_eq!(err, "");
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn core_errors_do_not_stop_the_session() {
        let input = "addRoad;A;B;1;2000\naddRoad;A;B;1;2000\nnewRoute;1;A;B\ngetRouteDescription;1\n";
        let (out, err, summary) = run(input);
        assert_eq!(out, "1;A;1;2000;B\n");
        assert_eq!(err, "ERROR 2\n");
        assert_eq!(summary.rejected, 1);
    }

    #[test]
    fn non_utf8_lines_are_rejected() {
        let mut session = Session::new(OutputFormat::Text);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input: &[u8] = b"addRoad;\xa3od\xbc;B;1;2000\naddRoad;A;B;1;2000\n";
        let summary = session
            .run(input, &mut out, &mut err)
            .expect("in-memory io");

        assert_eq!(String::from_utf8(err).unwrap(), "ERROR 1\n");
        assert_eq!(summary, SessionSummary { lines: 2, rejected: 1 });
        assert_eq!(session.map().network().city_count(), 2);
    }
}
