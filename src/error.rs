/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Errors raised while building a problem instance.

use thiserror::Error;

/// Error when adding arcs or supplies to a problem instance.
///
/// Malformed instances are rejected when they are built. Problems that
/// are well-formed but cannot be solved are reported through
/// [`Status`](crate::Status) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument is outside of its admissible range.
    #[error("invalid argument: {what} must be {expected}, got {value}")]
    InvalidArgument {
        what: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Error {
    pub(crate) fn invalid<T: ToString>(what: &'static str, expected: &'static str, value: T) -> Self {
        Error::InvalidArgument {
            what,
            expected,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
