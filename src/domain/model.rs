use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A member of the gift exchange. Identity is the email address; the display
/// name takes no part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    email: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

/// Previous round's giver email -> receiver email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    previous: HashMap<String, String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, giver: impl Into<String>, receiver: impl Into<String>) {
        self.previous.insert(giver.into(), receiver.into());
    }

    pub fn previous_receiver(&self, giver_email: &str) -> Option<&str> {
        self.previous.get(giver_email).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.previous
            .iter()
            .map(|(giver, receiver)| (giver.as_str(), receiver.as_str()))
    }
}

impl<G, R> FromIterator<(G, R)> for History
where
    G: Into<String>,
    R: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (G, R)>>(iter: I) -> Self {
        let mut history = History::new();
        for (giver, receiver) in iter {
            history.insert(giver, receiver);
        }
        history
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub giver: Participant,
    pub receiver: Participant,
}

impl Pairing {
    pub fn new(giver: Participant, receiver: Participant) -> Self {
        Self { giver, receiver }
    }
}

/// Giver -> receiver pairings, kept in the order the givers were processed.
///
/// During the search this holds a partial, tentative assignment; once handed
/// back to a caller it covers the whole roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    pairings: Vec<Pairing>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn receiver_for(&self, giver: &Participant) -> Option<&Participant> {
        self.pairings
            .iter()
            .find(|pairing| &pairing.giver == giver)
            .map(|pairing| &pairing.receiver)
    }

    pub fn has_receiver(&self, receiver: &Participant) -> bool {
        self.pairings.iter().any(|pairing| &pairing.receiver == receiver)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing> {
        self.pairings.iter()
    }

    pub(crate) fn push(&mut self, giver: Participant, receiver: Participant) {
        self.pairings.push(Pairing::new(giver, receiver));
    }

    pub(crate) fn pop(&mut self) -> Option<Pairing> {
        self.pairings.pop()
    }
}

impl FromIterator<Pairing> for Assignment {
    fn from_iter<I: IntoIterator<Item = Pairing>>(iter: I) -> Self {
        Self {
            pairings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Pairing;
    type IntoIter = std::slice::Iter<'a, Pairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.iter()
    }
}

/// Roster plus the previous round, as handed from the extract stage to the
/// assignment engine.
#[derive(Debug, Clone)]
pub struct ParticipantRegistry {
    pub source: String,
    pub participants: Vec<Participant>,
    pub history: History,
}

impl ParticipantRegistry {
    pub fn new(source: impl Into<String>, participants: Vec<Participant>, history: History) -> Self {
        Self {
            source: source.into(),
            participants,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_participant_identity_is_email() {
        let alice = Participant::new("Alice", "alice@acme.com");
        let alias = Participant::new("Alice Liddell", "alice@acme.com");
        let bob = Participant::new("Bob", "bob@acme.com");

        assert_eq!(alice, alias);
        assert_ne!(alice, bob);

        let set: HashSet<Participant> = [alice, alias, bob].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_history_lookup() {
        let history: History = [("alice@acme.com", "bob@acme.com")].into_iter().collect();
        assert_eq!(history.previous_receiver("alice@acme.com"), Some("bob@acme.com"));
        assert_eq!(history.previous_receiver("bob@acme.com"), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_assignment_lookup() {
        let alice = Participant::new("Alice", "alice@acme.com");
        let bob = Participant::new("Bob", "bob@acme.com");
        let mut assignment = Assignment::new();
        assignment.push(alice.clone(), bob.clone());

        assert_eq!(assignment.receiver_for(&alice), Some(&bob));
        assert_eq!(assignment.receiver_for(&bob), None);
        assert!(assignment.has_receiver(&bob));
        assert!(!assignment.has_receiver(&alice));

        assert!(assignment.pop().is_some());
        assert!(assignment.is_empty());
    }
}
