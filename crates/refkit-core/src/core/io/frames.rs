use crate::core::models::frame::Frame;
use crate::core::models::record::{Record, classify};
use std::io::{self, Write};
use std::mem;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// What to do with a line that appears where a count line is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedCountPolicy {
    /// Drop the line, log a warning, and keep looking for a count line.
    #[default]
    Skip,
    /// Abort the run with [`FrameError::MalformedCount`].
    Fail,
}

impl FromStr for MalformedCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "unknown malformed-count policy '{}' (expected 'skip' or 'fail')",
                other
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Expected a line count on line {line}, found '{content}'")]
    MalformedCount { line: usize, content: String },
    #[error("Line count on line {line} is not followed by a comment line")]
    TruncatedFrame { line: usize },
}

#[derive(Debug)]
enum AssemblerState {
    SeekingCount,
    InComment { declared_count: i64, line: usize },
    Accumulating(Frame),
    Done,
}

/// Groups a stream of lines into [`Frame`]s.
///
/// The assembler is a three-state machine: it seeks a count line, takes the next line verbatim
/// as the comment, then accumulates body lines until the next count line or end of input. Only
/// the frame currently being accumulated is buffered.
pub struct FrameAssembler<I> {
    lines: I,
    policy: MalformedCountPolicy,
    state: AssemblerState,
    line_number: usize,
    skipped_lines: usize,
}

impl<I> FrameAssembler<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, policy: MalformedCountPolicy) -> Self {
        Self {
            lines,
            policy,
            state: AssemblerState::SeekingCount,
            line_number: 0,
            skipped_lines: 0,
        }
    }

    /// Number of lines dropped so far under [`MalformedCountPolicy::Skip`].
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn finish(&mut self) -> Option<Result<Frame, FrameError>> {
        match mem::replace(&mut self.state, AssemblerState::Done) {
            AssemblerState::Accumulating(frame) => Some(Ok(frame)),
            AssemblerState::InComment { line, .. } => match self.policy {
                MalformedCountPolicy::Skip => {
                    warn!(
                        "Line count on line {} has no comment line before end of input; dropping it.",
                        line
                    );
                    self.skipped_lines += 1;
                    None
                }
                MalformedCountPolicy::Fail => Some(Err(FrameError::TruncatedFrame { line })),
            },
            AssemblerState::SeekingCount | AssemblerState::Done => None,
        }
    }
}

impl<I> Iterator for FrameAssembler<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, AssemblerState::Done) {
                return None;
            }
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.state = AssemblerState::Done;
                    return Some(Err(FrameError::Io(e)));
                }
                None => return self.finish(),
            };
            self.line_number += 1;

            match mem::replace(&mut self.state, AssemblerState::Done) {
                AssemblerState::SeekingCount => {
                    let classified = classify(line);
                    match classified.record {
                        Record::Count(declared_count) => {
                            self.state = AssemblerState::InComment {
                                declared_count,
                                line: self.line_number,
                            };
                        }
                        _ => match self.policy {
                            MalformedCountPolicy::Skip => {
                                warn!(
                                    "Expected a line count on line {}; skipping the line.",
                                    self.line_number
                                );
                                self.skipped_lines += 1;
                                self.state = AssemblerState::SeekingCount;
                            }
                            MalformedCountPolicy::Fail => {
                                return Some(Err(FrameError::MalformedCount {
                                    line: self.line_number,
                                    content: classified.raw,
                                }));
                            }
                        },
                    }
                }
                AssemblerState::InComment { declared_count, .. } => {
                    self.state = AssemblerState::Accumulating(Frame::new(declared_count, line));
                }
                AssemblerState::Accumulating(mut frame) => {
                    let classified = classify(line);
                    if let Record::Count(declared_count) = classified.record {
                        self.state = AssemblerState::InComment {
                            declared_count,
                            line: self.line_number,
                        };
                        return Some(Ok(frame));
                    }
                    frame.body.push(classified.raw);
                    self.state = AssemblerState::Accumulating(frame);
                }
                AssemblerState::Done => return None,
            }
        }
    }
}

/// Writes a frame as count line, comment line, and body lines.
pub fn write_frame(writer: &mut impl Write, frame: &Frame) -> io::Result<()> {
    writeln!(writer, "{}", frame.declared_count)?;
    writeln!(writer, "{}", frame.comment)?;
    for line in &frame.body {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
