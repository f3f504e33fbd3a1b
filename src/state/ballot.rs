//! Voting-booth ballot: one choice per position, then review and submit.
//!
//! DESIGN
//! ======
//! `BoothStep` makes the booth's phases explicit. Selections can only change
//! while `Choosing`, and a submission can only be produced from `Review`,
//! which is unreachable while any position lacks a choice.

#[cfg(test)]
#[path = "ballot_test.rs"]
mod ballot_test;

use crate::net::types::{ElectionBallot, ElectionDetail, Position};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BallotError {
    #[error("Please make a selection for all positions before submitting")]
    Incomplete { missing: Vec<String> },
    #[error("candidate {0} is not standing for this position")]
    UnknownCandidate(String),
    #[error("position {0} does not exist")]
    UnknownPosition(usize),
    #[error("the ballot can no longer be changed")]
    Locked,
    #[error("the ballot has no positions")]
    Empty,
}

/// Where the voter is in the booth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoothStep {
    /// Picking a candidate for the position at this index.
    Choosing(usize),
    /// Every position chosen; confirmation dialog open.
    Review,
    /// Submission in flight.
    Submitting,
    /// Vote recorded.
    Submitted,
}

/// Chosen candidate for one position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BallotChoice {
    pub position_id: String,
    pub candidate_id: String,
}

/// Completed ballot handed to the submission service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BallotSubmission {
    pub election_id: String,
    pub choices: Vec<BallotChoice>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub election: ElectionDetail,
    positions: Vec<Position>,
    selections: Vec<Option<String>>,
    step: BoothStep,
}

impl Ballot {
    /// Open a fresh ballot on the first position.
    ///
    /// # Errors
    ///
    /// Returns [`BallotError::Empty`] when there is nothing to vote on.
    pub fn new(ballot: ElectionBallot) -> Result<Self, BallotError> {
        if ballot.positions.is_empty() {
            return Err(BallotError::Empty);
        }
        let selections = vec![None; ballot.positions.len()];
        Ok(Self {
            election: ballot.election,
            positions: ballot.positions,
            selections,
            step: BoothStep::Choosing(0),
        })
    }

    pub fn step(&self) -> BoothStep {
        self.step
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Index of the position on screen; the last one outside `Choosing`.
    pub fn current_index(&self) -> usize {
        match self.step {
            BoothStep::Choosing(index) => index,
            _ => self.positions.len() - 1,
        }
    }

    pub fn current_position(&self) -> &Position {
        &self.positions[self.current_index()]
    }

    pub fn selection(&self, index: usize) -> Option<&str> {
        self.selections.get(index)?.as_deref()
    }

    pub fn is_last(&self) -> bool {
        self.current_index() + 1 == self.positions.len()
    }

    /// Titles of positions still without a choice.
    pub fn missing_positions(&self) -> Vec<String> {
        self.positions
            .iter()
            .zip(&self.selections)
            .filter(|(_, chosen)| chosen.is_none())
            .map(|(position, _)| position.title.clone())
            .collect()
    }

    /// Percentage of positions reached, counting the current one.
    pub fn progress_percent(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let ratio = (self.current_index() + 1) as f64 / self.positions.len() as f64;
        ratio * 100.0
    }

    fn choosing(&self) -> Result<usize, BallotError> {
        match self.step {
            BoothStep::Choosing(index) => Ok(index),
            _ => Err(BallotError::Locked),
        }
    }

    /// Choose `candidate_id` for the position on screen.
    ///
    /// # Errors
    ///
    /// Fails outside `Choosing` or when the candidate is not on this slate.
    pub fn select(&mut self, candidate_id: &str) -> Result<(), BallotError> {
        let index = self.choosing()?;
        if !self.positions[index].has_candidate(candidate_id) {
            return Err(BallotError::UnknownCandidate(candidate_id.to_owned()));
        }
        self.selections[index] = Some(candidate_id.to_owned());
        Ok(())
    }

    /// Jump to the position at `index`.
    ///
    /// # Errors
    ///
    /// Fails outside `Choosing` or for an out-of-range index.
    pub fn go_to(&mut self, index: usize) -> Result<(), BallotError> {
        self.choosing()?;
        if index >= self.positions.len() {
            return Err(BallotError::UnknownPosition(index));
        }
        self.step = BoothStep::Choosing(index);
        Ok(())
    }

    /// Step back one position; a no-op on the first.
    ///
    /// # Errors
    ///
    /// Fails outside `Choosing`.
    pub fn previous(&mut self) -> Result<(), BallotError> {
        let index = self.choosing()?;
        self.step = BoothStep::Choosing(index.saturating_sub(1));
        Ok(())
    }

    /// Advance one position, or open review from the last one.
    ///
    /// # Errors
    ///
    /// Returns [`BallotError::Incomplete`] when review is requested while
    /// positions are still unchosen.
    pub fn next(&mut self) -> Result<(), BallotError> {
        let index = self.choosing()?;
        if index + 1 < self.positions.len() {
            self.step = BoothStep::Choosing(index + 1);
            return Ok(());
        }
        let missing = self.missing_positions();
        if !missing.is_empty() {
            return Err(BallotError::Incomplete { missing });
        }
        self.step = BoothStep::Review;
        Ok(())
    }

    /// Close the review dialog and return to the last position.
    pub fn back_to_ballot(&mut self) {
        if self.step == BoothStep::Review {
            self.step = BoothStep::Choosing(self.positions.len() - 1);
        }
    }

    /// Lock the ballot and produce the submission.
    ///
    /// # Errors
    ///
    /// Fails unless the ballot is in `Review`.
    pub fn begin_submit(&mut self) -> Result<BallotSubmission, BallotError> {
        if self.step != BoothStep::Review {
            return Err(BallotError::Locked);
        }
        let choices = self
            .positions
            .iter()
            .zip(&self.selections)
            .map(|(position, chosen)| {
                chosen.as_ref().map(|candidate_id| BallotChoice {
                    position_id: position.id.clone(),
                    candidate_id: candidate_id.clone(),
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| BallotError::Incomplete {
                missing: self.missing_positions(),
            })?;
        self.step = BoothStep::Submitting;
        Ok(BallotSubmission {
            election_id: self.election.id.clone(),
            choices,
        })
    }

    /// Record the outcome of the submission started by [`Ballot::begin_submit`].
    ///
    /// Failure reopens review so the voter can retry.
    pub fn finish_submit(&mut self, accepted: bool) {
        if self.step == BoothStep::Submitting {
            self.step = if accepted { BoothStep::Submitted } else { BoothStep::Review };
        }
    }
}
