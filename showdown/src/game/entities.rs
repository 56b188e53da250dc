use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt::{self},
    str::FromStr,
};

use super::{
    CardError, HandError,
    constants::HAND_SIZE,
    functional,
};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
    // Suit characters aren't validated. Anything else is kept as-is so
    // the card still prints the way it was written.
    Other(char),
}

impl Suit {
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade].into_iter()
    }
}

impl From<char> for Suit {
    fn from(value: char) -> Self {
        match value {
            'C' => Self::Club,
            'D' => Self::Diamond,
            'H' => Self::Heart,
            'S' => Self::Spade,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => 'C',
            Self::Diamond => 'D',
            Self::Heart => 'H',
            Self::Spade => 'S',
            Self::Other(c) => *c,
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a uInt8 value (deuce=2u8 ... ace=14u8)
/// and a suit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match functional::value_to_char(self.0) {
            Some(value) => write!(f, "{value}{}", self.1),
            None => write!(f, "{}{}", self.0, self.1),
        }
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        functional::parse_card(s)
    }
}

/// Hand categories from weakest to strongest. A higher category always
/// beats a lower one regardless of card values.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl Rank {
    /// Returns all ranks, weakest first.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
            Self::RoyalFlush => "royal flush",
        };
        write!(f, "{repr}")
    }
}

/// Exactly five cards dealt to one player.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hand([Card; HAND_SIZE]);

impl Hand {
    pub fn new(cards: [Card; HAND_SIZE]) -> Self {
        Self(cards)
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.0
    }

    /// Card values in increasing order.
    pub fn values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self.0.iter().map(|card| card.0).collect();
        values.sort_unstable();
        values
    }

    pub fn counts(&self) -> ValueCounts {
        self.0.iter().map(|card| card.0).collect()
    }
}

impl From<[Card; HAND_SIZE]> for Hand {
    fn from(value: [Card; HAND_SIZE]) -> Self {
        Self::new(value)
    }
}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        functional::parse_hand(s)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .0
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{repr}")
    }
}

/// Number of times each card value appears in a hand.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueCounts(BTreeMap<Value, usize>);

impl ValueCounts {
    /// Total number of cards counted.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// The highest value appearing exactly `count` times.
    pub fn value_with_count(&self, count: usize) -> Option<Value> {
        self.0
            .iter()
            .rev()
            .find_map(|(value, n)| (*n == count).then_some(*value))
    }

    /// All values appearing exactly `count` times, highest first.
    pub fn values_with_count(&self, count: usize) -> Vec<Value> {
        self.0
            .iter()
            .rev()
            .filter_map(|(value, n)| (*n == count).then_some(*value))
            .collect()
    }

    /// Occurrence counts of the distinct values in increasing order.
    /// A two pair hand has a profile of `[1, 2, 2]`.
    pub fn profile(&self) -> Vec<usize> {
        let mut profile: Vec<usize> = self.0.values().copied().collect();
        profile.sort_unstable();
        profile
    }
}

impl FromIterator<Value> for ValueCounts {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut counts: BTreeMap<Value, usize> = BTreeMap::new();
        for value in iter {
            *counts.entry(value).or_insert(0) += 1;
        }
        Self(counts)
    }
}

/// A classified hand along with the groupings needed to break ties
/// between hands of the same rank.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Evaluation {
    pub rank: Rank,
    pub counts: ValueCounts,
    /// Card values in increasing order.
    pub values: Vec<Value>,
}

/// The outcome of comparing player 1's hand against player 2's.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatchResult {
    Player1,
    Player2,
    Tie,
}

impl From<Ordering> for MatchResult {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Greater => Self::Player1,
            Ordering::Less => Self::Player2,
            Ordering::Equal => Self::Tie,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "player 1 wins"),
            Self::Player2 => write!(f, "player 2 wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}
