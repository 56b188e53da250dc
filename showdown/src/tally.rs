//! Tally showdowns between two players, one line of input per showdown.
//!
//! Each line holds player 1's hand in its first 15 characters and player
//! 2's hand in the rest, e.g. `8C TS KC 9H 4S 7D 2S 5D 3S AC`. Lines are
//! independent of each other, so they can be evaluated sequentially with
//! `tally` or split across worker threads with `par_tally`.

use log::{debug, info, warn};
use std::{
    fmt,
    io::{self, BufRead},
    iter::Sum,
    ops::Add,
    panic, thread,
};
use thiserror::Error;

use crate::game::{
    HandError,
    constants::PLAYER_ONE_WIDTH,
    entities::{Hand, MatchResult},
    functional::{parse_hand, showdown},
};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LineError {
    #[error("player {player}'s hand is malformed: {error}")]
    Hand { player: u8, error: HandError },
    #[error("can't split the line at byte 15, it falls inside a character")]
    SplitInsideCharacter,
    #[error("line is too short ({len} characters)")]
    TooShort { len: usize },
}

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("can't read input: {0}")]
    Io(#[from] io::Error),
    #[error("line {line_number}: {error}")]
    Line { line_number: usize, error: LineError },
    #[error("line {line_number}: hands are tied")]
    UnresolvedTie { line_number: usize },
}

/// What to do with a line that can't be parsed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LinePolicy {
    #[default]
    Abort,
    /// Log the line and move on.
    Skip,
}

/// What to do when both hands are tied on every value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TiePolicy {
    /// Neither player is credited, the tie is counted separately.
    #[default]
    Count,
    Reject,
}

#[derive(Debug)]
pub struct TallyConfig {
    pub on_malformed: LinePolicy,
    pub on_tie: TiePolicy,
    /// Number of worker threads. Only used by `par_tally`.
    pub jobs: usize,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            on_malformed: LinePolicy::default(),
            on_tie: TiePolicy::default(),
            jobs: 1,
        }
    }
}

/// Running totals. Tallies from separate chunks of input can be added
/// together in any order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub player1: usize,
    pub player2: usize,
    pub ties: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Player1 => self.player1 += 1,
            MatchResult::Player2 => self.player2 += 1,
            MatchResult::Tie => self.ties += 1,
        }
    }

    /// Number of lines that were played or skipped.
    pub fn lines(&self) -> usize {
        self.player1 + self.player2 + self.ties + self.skipped
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            player1: self.player1 + rhs.player1,
            player2: self.player2 + rhs.player2,
            ties: self.ties + rhs.ties,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player 1: {}", self.player1)?;
        write!(f, "Player 2: {}", self.player2)
    }
}

/// Split a line into player 1's and player 2's hands.
///
/// # Examples
///
/// ```
/// use showdown::tally::parse_line;
///
/// let (hand1, hand2) = parse_line("5H 5C 6S 7S KD 2C 3S 8S 8D TD").unwrap();
/// assert_eq!(hand1.to_string(), "5H 5C 6S 7S KD");
/// assert_eq!(hand2.to_string(), "2C 3S 8S 8D TD");
/// ```
pub fn parse_line(line: &str) -> Result<(Hand, Hand), LineError> {
    if line.len() < PLAYER_ONE_WIDTH {
        return Err(LineError::TooShort {
            len: line.chars().count(),
        });
    }
    let Some((hand1, hand2)) = line.split_at_checked(PLAYER_ONE_WIDTH) else {
        return Err(LineError::SplitInsideCharacter);
    };
    let hand1 = parse_hand(hand1).map_err(|error| LineError::Hand { player: 1, error })?;
    let hand2 = parse_hand(hand2).map_err(|error| LineError::Hand { player: 2, error })?;
    Ok((hand1, hand2))
}

/// Play out a single line.
pub fn play_line(line: &str) -> Result<MatchResult, LineError> {
    let (hand1, hand2) = parse_line(line)?;
    Ok(showdown(&hand1, &hand2))
}

fn record_line(
    tally: &mut Tally,
    line_number: usize,
    line: &str,
    config: &TallyConfig,
) -> Result<(), TallyError> {
    match play_line(line) {
        Ok(MatchResult::Tie) if config.on_tie == TiePolicy::Reject => {
            Err(TallyError::UnresolvedTie { line_number })
        }
        Ok(result) => {
            debug!("line {line_number}: {result}");
            tally.record(result);
            Ok(())
        }
        Err(error) => match config.on_malformed {
            LinePolicy::Abort => Err(TallyError::Line { line_number, error }),
            LinePolicy::Skip => {
                warn!("skipping line {line_number}: {error}");
                tally.skipped += 1;
                Ok(())
            }
        },
    }
}

/// Read lines until the end of input, tallying each showdown.
pub fn tally<R: BufRead>(reader: R, config: &TallyConfig) -> Result<Tally, TallyError> {
    let mut tally = Tally::default();
    for (idx, line) in reader.lines().enumerate() {
        record_line(&mut tally, idx + 1, &line?, config)?;
    }
    info!("tallied {} lines", tally.lines());
    Ok(tally)
}

/// Same as `tally`, but lines are evaluated on `config.jobs` threads.
///
/// The whole input is read up front and split into contiguous chunks, one
/// per thread. Each thread tallies its own chunk and the partial tallies
/// are summed. When a line fails, the error for the earliest failing line
/// is returned, just like `tally`.
pub fn par_tally<R: BufRead>(reader: R, config: &TallyConfig) -> Result<Tally, TallyError> {
    let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
    let num_tasks = config.jobs.max(1);
    let lines_per_task = lines.len().div_ceil(num_tasks).max(1);

    let partials: Vec<Result<Tally, TallyError>> = thread::scope(|s| {
        let handles: Vec<_> = lines
            .chunks(lines_per_task)
            .enumerate()
            .map(|(task_id, chunk)| {
                let start = task_id * lines_per_task;
                s.spawn(move || -> Result<Tally, TallyError> {
                    let mut tally = Tally::default();
                    for (idx, line) in chunk.iter().enumerate() {
                        record_line(&mut tally, start + idx + 1, line, config)?;
                    }
                    debug!("task {task_id} tallied {} lines", tally.lines());
                    Ok(tally)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    });

    let tally: Tally = partials.into_iter().sum::<Result<Tally, TallyError>>()?;
    info!("tallied {} lines with {num_tasks} tasks", tally.lines());
    Ok(tally)
}

/// Tally with `par_tally` when more than one job is configured.
pub fn run<R: BufRead>(reader: R, config: &TallyConfig) -> Result<Tally, TallyError> {
    if config.jobs > 1 {
        par_tally(reader, config)
    } else {
        tally(reader, config)
    }
}
