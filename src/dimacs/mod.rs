// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Reading and writing flow problems in DIMACS format.
//!
//! The formats of the first DIMACS implementation challenge are supported
//! for maximum flow (`p max`), min-cost flow (`p min`) and assignment
//! (`p asn`) problems. Node ids in the files start at 1, the ids of the
//! constructed problems at 0.

pub mod asn;
pub mod max;
pub mod min;

use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;

/// Error when reading a file in DIMACS format.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The file does not follow the line syntax.
    #[error("Format error on line {line}: {msg}")]
    Format { line: usize, msg: String },
    /// The file is well-formed but describes an invalid instance.
    #[error("Data error on line {line}: {msg}")]
    Data { line: usize, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Line oriented reader skipping comments and empty lines.
struct DimacsReader<R> {
    io: BufReader<R>,
    buf: String,
    lineno: usize,
}

impl<R: Read> DimacsReader<R> {
    fn new(reader: R) -> Self {
        DimacsReader {
            io: BufReader::new(reader),
            buf: String::new(),
            lineno: 0,
        }
    }

    /// Return the next line that is neither empty nor a comment.
    fn next_line(&mut self) -> Result<Option<Line<'_>>> {
        loop {
            self.buf.clear();
            if self.io.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.lineno += 1;

            match self.buf.split_whitespace().next() {
                Some(d) if !d.starts_with('c') => break,
                _ => continue,
            }
        }

        let mut toks = self.buf.split_whitespace();
        Ok(Some(Line {
            desc: toks.next().unwrap_or_default(),
            toks,
            lineno: self.lineno,
        }))
    }

    /// Return the next line, which must have one of the descriptors `descs`.
    ///
    /// Returns `None` at the end of the file.
    fn next_line_of(&mut self, descs: &[&str]) -> Result<Option<Line<'_>>> {
        match self.next_line()? {
            Some(line) if descs.iter().any(|&d| d == line.desc) => Ok(Some(line)),
            Some(line) => {
                let msg = format!("expected one of '{}', got '{}'", descs.join("', '"), line.desc);
                Err(line.format_error(msg))
            }
            None => Ok(None),
        }
    }

    /// Return the next line, which must exist and have descriptor `desc`.
    fn expect_line(&mut self, desc: &str) -> Result<Line<'_>> {
        let lineno = self.lineno;
        match self.next_line_of(&[desc])? {
            Some(line) => Ok(line),
            None => Err(Error::Format {
                line: lineno,
                msg: format!("unexpected end of file, expected '{}' line", desc),
            }),
        }
    }

    /// Read the problem line `p <kind> <nodes> <arcs>`.
    fn problem(&mut self, kind: &str) -> Result<Problem> {
        let mut line = self.expect_line("p")?;
        let k = line.str()?;
        if k != kind {
            return Err(line.format_error(format!("expected problem type '{}', got '{}'", kind, k)));
        }
        let nnodes = line.number()?;
        let narcs = line.number()?;
        line.end()?;
        Ok(Problem {
            nnodes,
            narcs,
            lineno: line.lineno,
        })
    }

    /// Fail unless the end of the file has been reached.
    fn end(&mut self) -> Result<()> {
        match self.next_line()? {
            Some(line) => {
                let msg = format!("unexpected '{}' line", line.desc);
                Err(line.format_error(msg))
            }
            None => Ok(()),
        }
    }
}

/// The sizes given on the problem line.
struct Problem {
    nnodes: usize,
    narcs: usize,
    lineno: usize,
}

/// The tokens of one line following the descriptor.
struct Line<'a> {
    desc: &'a str,
    toks: SplitWhitespace<'a>,
    lineno: usize,
}

impl<'a> Line<'a> {
    fn format_error<S: Into<String>>(&self, msg: S) -> Error {
        Error::Format {
            line: self.lineno,
            msg: msg.into(),
        }
    }

    fn data_error<S: Into<String>>(&self, msg: S) -> Error {
        Error::Data {
            line: self.lineno,
            msg: msg.into(),
        }
    }

    /// Wrap an error of the problem builder.
    fn rejected(&self, err: crate::Error) -> Error {
        self.data_error(err.to_string())
    }

    fn str(&mut self) -> Result<&'a str> {
        match self.toks.next() {
            Some(tok) => Ok(tok),
            None => Err(self.format_error("missing token")),
        }
    }

    fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let tok = self.str()?;
        tok.parse()
            .map_err(|e| self.format_error(format!("invalid number '{}': {}", tok, e)))
    }

    /// Read a node id in `1..=nnodes` and return it 0-based.
    fn node(&mut self, nnodes: usize) -> Result<usize> {
        let u: usize = self.number()?;
        if u < 1 || u > nnodes {
            return Err(self.data_error(format!("invalid node id {} (must be in 1..={})", u, nnodes)));
        }
        Ok(u - 1)
    }

    /// Read the two end nodes of an arc, loops are rejected.
    fn arc(&mut self, nnodes: usize) -> Result<(usize, usize)> {
        let u = self.node(nnodes)?;
        let v = self.node(nnodes)?;
        if u == v {
            return Err(self.data_error(format!("invalid loop at node {}", u + 1)));
        }
        Ok((u, v))
    }

    fn end(&mut self) -> Result<()> {
        match self.toks.next() {
            Some(tok) => Err(self.format_error(format!("unexpected token '{}' at end of line", tok))),
            None => Ok(()),
        }
    }
}
