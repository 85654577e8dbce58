use crate::domain::model::{Assignment, History, Participant};
use rand::seq::SliceRandom;
use rand::Rng;

/// Checks whether `giver -> receiver` may be added to `assignment`.
///
/// Rejects self pairing, a repeat of the giver's previous-round receiver, and
/// a receiver that is already taken. Pure: no state besides the arguments.
pub fn is_valid_assignment(
    giver: &Participant,
    receiver: &Participant,
    assignment: &Assignment,
    history: &History,
) -> bool {
    if giver == receiver {
        return false;
    }
    if history.previous_receiver(giver.email()) == Some(receiver.email()) {
        return false;
    }
    !assignment.has_receiver(receiver)
}

/// Randomized backtracking search for a derangement of the roster that also
/// avoids every previous-round pairing.
pub struct SecretSantaAssigner<'a> {
    participants: &'a [Participant],
    history: &'a History,
}

struct SearchState<'a> {
    available: Vec<&'a Participant>,
    assignment: Assignment,
    backtracks: u64,
}

impl<'a> SecretSantaAssigner<'a> {
    pub fn new(participants: &'a [Participant], history: &'a History) -> Self {
        Self {
            participants,
            history,
        }
    }

    /// Runs the search with the thread-local generator.
    pub fn assign(&self) -> Option<Assignment> {
        self.assign_with(&mut rand::thread_rng())
    }

    /// Returns a complete assignment, or `None` when no permutation satisfies
    /// the constraints for this roster and history.
    pub fn assign_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Assignment> {
        let mut state = SearchState {
            available: self.participants.iter().collect(),
            assignment: Assignment::new(),
            backtracks: 0,
        };

        let found = self.backtrack(0, &mut state, rng);
        tracing::debug!(
            participants = self.participants.len(),
            backtracks = state.backtracks,
            found,
            "secret santa search finished"
        );

        found.then_some(state.assignment)
    }

    fn backtrack<R: Rng + ?Sized>(
        &self,
        depth: usize,
        state: &mut SearchState<'a>,
        rng: &mut R,
    ) -> bool {
        let Some(giver) = self.participants.get(depth) else {
            return true;
        };

        state.available.shuffle(rng);
        // 以快照掃描，回溯時放回的候選者不會擾亂本層順序
        let candidates = state.available.clone();

        for receiver in candidates {
            if !is_valid_assignment(giver, receiver, &state.assignment, self.history) {
                continue;
            }

            state.assignment.push(giver.clone(), receiver.clone());
            if let Some(pos) = state.available.iter().position(|p| *p == receiver) {
                state.available.swap_remove(pos);
            }

            if self.backtrack(depth + 1, state, rng) {
                return true;
            }

            state.assignment.pop();
            state.available.push(receiver);
            state.backtracks += 1;
        }

        false
    }
}

/// Convenience wrapper around [`SecretSantaAssigner::assign_with`].
pub fn assign<R: Rng + ?Sized>(
    participants: &[Participant],
    history: &History,
    rng: &mut R,
) -> Option<Assignment> {
    SecretSantaAssigner::new(participants, history).assign_with(rng)
}
