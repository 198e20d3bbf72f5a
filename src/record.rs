//! Move logging.
//!
//! The manager hands every accepted move to a [`MoveSink`]. Two sinks are
//! provided: [`MoveLog`] keeps records in memory, [`CsvSink`] appends them to a
//! CSV file using the numeric side codes from [`Side::code`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::board::{Coord, Side};

/// One accepted placement and its consequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub side: Side,
    pub coord: Coord,
    /// Row-major grid after the move
    pub grid: Vec<Side>,
    /// `Side::None` while the game continues
    pub outcome: Side,
}

/// Destination for move records, in move order.
pub trait MoveSink {
    fn record(&mut self, record: &MoveRecord) -> io::Result<()>;
}

/// In-memory move history.
#[derive(Clone, Debug, Default)]
pub struct MoveLog {
    pub records: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Outcome of the last recorded move, if any.
    pub fn final_outcome(&self) -> Option<Side> {
        self.records.last().map(|r| r.outcome)
    }
}

impl MoveSink for MoveLog {
    fn record(&mut self, record: &MoveRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// CSV move log.
///
/// Columns: `side,row,col,outcome,c0,...,c{size*size-1}`.
pub struct CsvSink<W: Write> {
    out: W,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: &Path, size: usize) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), size)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(mut out: W, size: usize) -> io::Result<Self> {
        let mut header = String::from("side,row,col,outcome");
        for i in 0..size * size {
            header.push_str(&format!(",c{i}"));
        }
        writeln!(out, "{header}")?;
        out.flush()?;
        Ok(Self { out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MoveSink for CsvSink<W> {
    fn record(&mut self, record: &MoveRecord) -> io::Result<()> {
        let cells: Vec<String> = record.grid.iter().map(|s| s.code().to_string()).collect();
        writeln!(
            self.out,
            "{},{},{},{},{}",
            record.side.code(),
            record.coord.0,
            record.coord.1,
            record.outcome.code(),
            cells.join(",")
        )?;
        // Flushed per move so a game cut short still leaves a readable file
        self.out.flush()
    }
}
