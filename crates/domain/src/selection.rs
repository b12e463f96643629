//! Selection expressions over an ordered board listing.
//!
//! An expression is either `all` or a comma separated list of segments:
//!
//! * `start-end` picks positions `start..=end`, counted from the start of the
//!   listing (position 1 is the oldest item). Out of bounds ranges are clipped
//!   to the available span and never fail.
//! * `n` picks the single `n`-th item counted from the end (1 is the most
//!   recent item). Indices are validated: `0` or anything past the listing
//!   fails with [`DomainError::IndexOutOfRange`].
//!
//! The asymmetry between permissive ranges and strict indices is observable
//! behavior that callers rely on. Keep both halves as they are.
//!
//! Segments that are neither a range nor a bare index are skipped.

use std::str::FromStr;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Inclusive 1-based range counted from the start of the listing.
    Range { start: usize, end: usize },
    /// 1-based index counted from the end of the listing.
    FromEnd(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionExpression {
    All,
    Segments(Vec<Segment>),
}

impl SelectionExpression {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let mut segments = Vec::new();
        for raw in input.split(',') {
            let raw = raw.trim();
            if let Some((start, end)) = raw.split_once('-') {
                let (Some(start), Some(end)) = (parse_bound(start), parse_bound(end)) else {
                    continue;
                };
                if start > end {
                    return Err(DomainError::InvalidRange {
                        segment: raw.to_string(),
                        start,
                        end,
                    });
                }
                segments.push(Segment::Range { start, end });
            } else if let Some(index) = parse_bound(raw) {
                segments.push(Segment::FromEnd(index));
            }
        }

        Ok(Self::Segments(segments))
    }

    /// Applies the expression to `items`, concatenating segment outputs in
    /// the order the segments were written. `items` is left untouched.
    pub fn resolve<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, DomainError> {
        let segments = match self {
            Self::All => return Ok(items.to_vec()),
            Self::Segments(segments) => segments,
        };

        let len = items.len();
        let mut selected = Vec::new();
        for segment in segments {
            match *segment {
                Segment::Range { start, end } => {
                    let from = start.saturating_sub(1);
                    let to = end.min(len);
                    if from < to {
                        selected.extend_from_slice(&items[from..to]);
                    }
                }
                Segment::FromEnd(index) => {
                    if index == 0 || index > len {
                        return Err(DomainError::IndexOutOfRange { index, len });
                    }
                    selected.push(items[len - index].clone());
                }
            }
        }

        Ok(selected)
    }
}

impl FromStr for SelectionExpression {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

pub fn select<T: Clone>(expression: &str, items: &[T]) -> Result<Vec<T>, DomainError> {
    SelectionExpression::parse(expression)?.resolve(items)
}

fn parse_bound(value: &str) -> Option<usize> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    // All digits: anything too large for usize is past every listing.
    Some(value.parse().unwrap_or(usize::MAX))
}
