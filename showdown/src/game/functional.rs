use std::cmp::Ordering;

use super::{
    CardError, HandError,
    constants::{HAND_SIZE, MAX_VALUE, MIN_VALUE, ROYAL_FLUSH_LOW, VALUE_CHARS},
    entities::{Card, Evaluation, Hand, MatchResult, Rank, Suit, Value, ValueCounts},
};

/// Look up the numeric value of a card value character.
pub fn value_from_char(c: char) -> Option<Value> {
    VALUE_CHARS
        .iter()
        .position(|v| *v == c)
        .map(|idx| idx as Value + MIN_VALUE)
}

/// Inverse of `value_from_char`.
pub fn value_to_char(value: Value) -> Option<char> {
    value
        .checked_sub(MIN_VALUE)
        .and_then(|idx| VALUE_CHARS.get(idx as usize))
        .copied()
}

/// Parse a two character card token (value then suit).
///
/// # Examples
///
/// ```
/// use showdown::{entities::{Card, Suit}, functional::parse_card};
///
/// assert_eq!(parse_card("TD"), Ok(Card(10, Suit::Diamond)));
/// assert!(parse_card("1D").is_err());
/// ```
pub fn parse_card(token: &str) -> Result<Card, CardError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(value), Some(suit), None) => {
            let value = value_from_char(value).ok_or(CardError::InvalidCard { value })?;
            Ok(Card(value, Suit::from(suit)))
        }
        _ => Err(CardError::InvalidToken {
            token: token.to_string(),
        }),
    }
}

/// Parse five whitespace separated card tokens into a hand.
pub fn parse_hand(s: &str) -> Result<Hand, HandError> {
    let cards = s
        .split_whitespace()
        .map(parse_card)
        .collect::<Result<Vec<Card>, CardError>>()?;
    let count = cards.len();
    let cards: [Card; HAND_SIZE] = cards
        .try_into()
        .map_err(|_| HandError::WrongCardCount { count })?;
    Ok(Hand::new(cards))
}

fn is_straight(values: &[Value]) -> bool {
    // Values are plain integers so an ace never plays low.
    values.windows(2).all(|w| w[1].checked_sub(w[0]) == Some(1))
}

fn is_flush(hand: &Hand) -> bool {
    let [first, rest @ ..] = hand.cards();
    rest.iter().all(|card| card.1 == first.1)
}

fn matches_rank(
    rank: Rank,
    values: &[Value],
    counts: &ValueCounts,
    straight: bool,
    flush: bool,
) -> bool {
    match rank {
        Rank::RoyalFlush => straight && flush && values.first() == Some(&ROYAL_FLUSH_LOW),
        Rank::StraightFlush => straight && flush && values.first() != Some(&ROYAL_FLUSH_LOW),
        Rank::FourOfAKind => counts.value_with_count(4).is_some(),
        Rank::FullHouse => {
            counts.value_with_count(3).is_some() && counts.value_with_count(2).is_some()
        }
        Rank::Flush => flush,
        Rank::Straight => straight,
        Rank::ThreeOfAKind => counts.value_with_count(3).is_some(),
        Rank::TwoPair => counts.profile() == [1, 2, 2],
        Rank::OnePair => counts.value_with_count(2).is_some(),
        Rank::HighCard => true,
    }
}

/// Whether the hand meets the requirements of the given rank on its own,
/// without regard to stronger ranks it may also meet.
pub fn satisfies(hand: &Hand, rank: Rank) -> bool {
    let values = hand.values();
    let straight = is_straight(&values);
    matches_rank(rank, &values, &hand.counts(), straight, is_flush(hand))
}

/// Classify a hand.
///
/// Each rank's requirements are checked from the strongest rank down and
/// the first rank the hand meets is its rank. Weaker requirements, such as
/// holding a pair, are also met by stronger hands, so order matters.
///
/// # Examples
///
/// ```
/// use showdown::{entities::{Hand, Rank}, functional::eval};
///
/// let hand: Hand = "3C 3D 3S 8H 8C".parse().unwrap();
/// assert_eq!(eval(&hand).rank, Rank::FullHouse);
/// ```
pub fn eval(hand: &Hand) -> Evaluation {
    let values = hand.values();
    let counts = hand.counts();
    let straight = is_straight(&values);
    let flush = is_flush(hand);
    let rank = Rank::ranks()
        .rev()
        .find(|rank| matches_rank(*rank, &values, &counts, straight, flush))
        .unwrap_or(Rank::HighCard);
    Evaluation {
        rank,
        counts,
        values,
    }
}

/// Values compared, in order, to settle a tie between two hands of the
/// given rank.
fn tie_break_key(rank: Rank, evaluation: &Evaluation) -> Vec<Value> {
    let counts = &evaluation.counts;
    match rank {
        Rank::HighCard | Rank::Straight | Rank::Flush | Rank::StraightFlush | Rank::RoyalFlush => {
            evaluation.values.iter().rev().copied().collect()
        }
        // Pairs from highest to lowest, then the remaining cards.
        Rank::OnePair | Rank::TwoPair => counts
            .values_with_count(2)
            .into_iter()
            .chain(counts.values_with_count(1))
            .collect(),
        Rank::ThreeOfAKind => counts
            .values_with_count(3)
            .into_iter()
            .chain(counts.values_with_count(1))
            .collect(),
        Rank::FourOfAKind => counts
            .values_with_count(4)
            .into_iter()
            .chain(counts.values_with_count(1))
            .collect(),
        // The triple, then the pair.
        Rank::FullHouse => counts
            .values_with_count(3)
            .into_iter()
            .chain(counts.values_with_count(2))
            .collect(),
    }
}

/// Compare two hands sharing the same rank. The returned ordering is
/// hand 1 relative to hand 2; `Ordering::Equal` means the hands are tied
/// on every value that matters for the rank.
pub fn tie_break(rank: Rank, hand1: &Evaluation, hand2: &Evaluation) -> Ordering {
    tie_break_key(rank, hand1).cmp(&tie_break_key(rank, hand2))
}

/// Decide which of two hands wins. Ranks are compared first and the tie
/// breaker is only consulted when both hands share a rank.
///
/// # Examples
///
/// ```
/// use showdown::{entities::{Hand, MatchResult}, functional::showdown};
///
/// let hand1: Hand = "KS KD 5H 6C 2S".parse().unwrap();
/// let hand2: Hand = "KH KC 9S 3D 2D".parse().unwrap();
/// assert_eq!(showdown(&hand1, &hand2), MatchResult::Player2);
/// ```
pub fn showdown(hand1: &Hand, hand2: &Hand) -> MatchResult {
    let hand1 = eval(hand1);
    let hand2 = eval(hand2);
    let ordering = hand1
        .rank
        .cmp(&hand2.rank)
        .then_with(|| tie_break(hand1.rank, &hand1, &hand2));
    ordering.into()
}

/// Create a new, unshuffled deck of cards. Handy for sampling or
/// enumerating hands.
///
/// # Examples
///
/// ```
/// use showdown::functional::new_deck;
///
/// let deck = new_deck();
/// assert_eq!(deck.len(), 52);
/// ```
pub fn new_deck() -> [Card; 52] {
    let mut deck: [Card; 52] = [Card(MIN_VALUE, Suit::Club); 52];
    for (i, value) in (MIN_VALUE..=MAX_VALUE).enumerate() {
        for (j, suit) in Suit::suits().enumerate() {
            deck[4 * i + j] = Card(value, suit);
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use rand::{seq::SliceRandom, thread_rng};

    use super::{eval, new_deck, parse_hand, satisfies, showdown, tie_break};
    use crate::game::{
        CardError, HandError,
        entities::{Card, Hand, MatchResult, Rank},
    };

    struct TestHand {
        expected_rank: Rank,
        cards: &'static str,
    }

    macro_rules! eval_and_showdown_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (test_hand1, test_hand2, expected_result) = $value;
                let hand1: Hand = test_hand1.cards.parse().unwrap();
                let hand2: Hand = test_hand2.cards.parse().unwrap();
                assert_eq!(test_hand1.expected_rank, eval(&hand1).rank);
                assert_eq!(test_hand2.expected_rank, eval(&hand2).rank);
                assert_eq!(expected_result, showdown(&hand1, &hand2));
            }
        )*
        }
    }

    eval_and_showdown_tests! {
        one_pair_loses_on_highest_remaining_card: (
            TestHand{expected_rank: Rank::OnePair, cards: "KS KD 5H 6C 2S"},
            TestHand{expected_rank: Rank::OnePair, cards: "KH KC 9S 3D 2D"},
            MatchResult::Player2,
        ),
        one_pair_loses_on_pair_value: (
            TestHand{expected_rank: Rank::OnePair, cards: "5H 5C 6S 7S KD"},
            TestHand{expected_rank: Rank::OnePair, cards: "2C 3S 8S 8D TD"},
            MatchResult::Player2,
        ),
        one_pair_wins_on_last_kicker: (
            TestHand{expected_rank: Rank::OnePair, cards: "9S 9D 8H 4C 3S"},
            TestHand{expected_rank: Rank::OnePair, cards: "9H 9C 8S 4D 2D"},
            MatchResult::Player1,
        ),
        two_pair_loses_on_higher_pair: (
            TestHand{expected_rank: Rank::TwoPair, cards: "JS JD 4H 4C 9S"},
            TestHand{expected_rank: Rank::TwoPair, cards: "QS QD 3H 3C 9D"},
            MatchResult::Player2,
        ),
        two_pair_wins_on_lower_pair: (
            TestHand{expected_rank: Rank::TwoPair, cards: "QS QD 5H 5C 2S"},
            TestHand{expected_rank: Rank::TwoPair, cards: "QH QC 4S 4D AD"},
            MatchResult::Player1,
        ),
        two_pair_wins_on_kicker: (
            TestHand{expected_rank: Rank::TwoPair, cards: "QS QD 5H 5C TS"},
            TestHand{expected_rank: Rank::TwoPair, cards: "QH QC 5S 5D 9D"},
            MatchResult::Player1,
        ),
        three_of_a_kind_wins_on_triple: (
            TestHand{expected_rank: Rank::ThreeOfAKind, cards: "8S 8D 8H 2C 3S"},
            TestHand{expected_rank: Rank::ThreeOfAKind, cards: "7S 7D 7H AC KS"},
            MatchResult::Player1,
        ),
        three_of_a_kind_loses_on_kicker: (
            TestHand{expected_rank: Rank::ThreeOfAKind, cards: "8S 8D 8H AC 3S"},
            TestHand{expected_rank: Rank::ThreeOfAKind, cards: "8S 8D 8H AC 4S"},
            MatchResult::Player2,
        ),
        four_of_a_kind_wins_on_quad: (
            TestHand{expected_rank: Rank::FourOfAKind, cards: "7S 7D 7H 7C 2S"},
            TestHand{expected_rank: Rank::FourOfAKind, cards: "6S 6D 6H 6C AS"},
            MatchResult::Player1,
        ),
        four_of_a_kind_loses_on_kicker: (
            TestHand{expected_rank: Rank::FourOfAKind, cards: "7S 7D 7H 7C 2S"},
            TestHand{expected_rank: Rank::FourOfAKind, cards: "7S 7D 7H 7C 3S"},
            MatchResult::Player2,
        ),
        full_house_wins_on_triple: (
            TestHand{expected_rank: Rank::FullHouse, cards: "4S 4D 4H 2C 2S"},
            TestHand{expected_rank: Rank::FullHouse, cards: "3S 3D 3H AC AS"},
            MatchResult::Player1,
        ),
        full_house_loses_on_pair: (
            TestHand{expected_rank: Rank::FullHouse, cards: "4S 4D 4H 2C 2S"},
            TestHand{expected_rank: Rank::FullHouse, cards: "4S 4D 4H 3C 3S"},
            MatchResult::Player2,
        ),
        flush_wins_to_straight: (
            TestHand{expected_rank: Rank::Flush, cards: "2H 5H 7H 9H JH"},
            TestHand{expected_rank: Rank::Straight, cards: "5S 6D 7H 8C 9S"},
            MatchResult::Player1,
        ),
        flush_loses_to_flush: (
            TestHand{expected_rank: Rank::Flush, cards: "2D 5D 6D 7D 8D"},
            TestHand{expected_rank: Rank::Flush, cards: "3C 5C 6C 7C 8C"},
            MatchResult::Player2,
        ),
        straight_wins_to_straight: (
            TestHand{expected_rank: Rank::Straight, cards: "6S 7D 8H 9C TS"},
            TestHand{expected_rank: Rank::Straight, cards: "5S 6D 7H 8C 9S"},
            MatchResult::Player1,
        ),
        straight_flush_wins_to_four_of_a_kind: (
            TestHand{expected_rank: Rank::StraightFlush, cards: "9C TC JC QC KC"},
            TestHand{expected_rank: Rank::FourOfAKind, cards: "AS AD AH AC KS"},
            MatchResult::Player1,
        ),
        royal_flush_wins_to_straight_flush: (
            TestHand{expected_rank: Rank::StraightFlush, cards: "9C TC JC QC KC"},
            TestHand{expected_rank: Rank::RoyalFlush, cards: "TS JS QS KS AS"},
            MatchResult::Player2,
        ),
        royal_flush_ties_with_royal_flush: (
            TestHand{expected_rank: Rank::RoyalFlush, cards: "TD JD QD KD AD"},
            TestHand{expected_rank: Rank::RoyalFlush, cards: "TS JS QS KS AS"},
            MatchResult::Tie,
        ),
        high_card_wins_to_high_card: (
            TestHand{expected_rank: Rank::HighCard, cards: "2C 5H 7D 9H KS"},
            TestHand{expected_rank: Rank::HighCard, cards: "3C 5D 7C 9S QS"},
            MatchResult::Player1,
        ),
        high_card_ties_with_high_card: (
            TestHand{expected_rank: Rank::HighCard, cards: "2C 5H 7D 9H KS"},
            TestHand{expected_rank: Rank::HighCard, cards: "2D 5C 7H 9S KD"},
            MatchResult::Tie,
        ),
        high_card_loses_to_one_pair: (
            TestHand{expected_rank: Rank::HighCard, cards: "AC KH QD JH 9S"},
            TestHand{expected_rank: Rank::OnePair, cards: "2C 2H 3D 4H 5S"},
            MatchResult::Player2,
        ),
        ace_low_run_is_high_card: (
            TestHand{expected_rank: Rank::HighCard, cards: "AC 2H 3D 4H 5S"},
            TestHand{expected_rank: Rank::HighCard, cards: "KC 2H 3D 4H 5S"},
            MatchResult::Player1,
        ),
        ace_low_suited_run_is_flush: (
            TestHand{expected_rank: Rank::Flush, cards: "AC 2C 3C 4C 5C"},
            TestHand{expected_rank: Rank::Straight, cards: "2S 3H 4D 5H 6S"},
            MatchResult::Player1,
        ),
    }

    #[test]
    fn boundary_hands() {
        let rank = |cards: &str| eval(&cards.parse::<Hand>().unwrap()).rank;
        assert_eq!(rank("TH JH QH KH AH"), Rank::RoyalFlush);
        assert_eq!(rank("9H TH JH QH KH"), Rank::StraightFlush);
        assert_eq!(rank("7H 7D 7S 7C 2H"), Rank::FourOfAKind);
        assert_eq!(rank("3H 3D 3S 8C 8H"), Rank::FullHouse);
        assert_eq!(rank("3H 3D 3S 8C 9H"), Rank::ThreeOfAKind);
        assert_eq!(rank("TH JD QH KH AH"), Rank::Straight);
    }

    #[test]
    fn tie_break_leaves_evaluations_untouched() {
        let hand1 = eval(&"QS QD 3H 3C 9D".parse::<Hand>().unwrap());
        let hand2 = eval(&"QH QC 3S 3D 8D".parse::<Hand>().unwrap());
        let (before1, before2) = (hand1.clone(), hand2.clone());
        assert!(tie_break(Rank::TwoPair, &hand1, &hand2).is_gt());
        assert_eq!(hand1, before1);
        assert_eq!(hand2, before2);
    }

    #[test]
    fn malformed_hands() {
        assert_eq!(
            parse_hand("AS KS QS JS"),
            Err(HandError::WrongCardCount { count: 4 })
        );
        assert_eq!(
            parse_hand("AS KS QS JS TS 9S"),
            Err(HandError::WrongCardCount { count: 6 })
        );
        assert_eq!(
            parse_hand("AS KS QS JS XS"),
            Err(HandError::Card(CardError::InvalidCard { value: 'X' }))
        );
        assert_eq!(
            parse_hand("AS KS QS JSTS"),
            Err(HandError::Card(CardError::InvalidToken {
                token: "JSTS".to_string()
            }))
        );
    }

    #[test]
    fn deck_is_complete() {
        let mut deck = new_deck().to_vec();
        deck.sort();
        deck.dedup();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.first().map(|card| card.0), Some(2));
        assert_eq!(deck.last().map(|card| card.0), Some(14));
    }

    fn sample_hand(deck: &mut [Card; 52]) -> Hand {
        deck.shuffle(&mut thread_rng());
        let [a, b, c, d, e, ..] = *deck;
        [a, b, c, d, e].into()
    }

    #[test]
    fn eval_never_meets_a_stronger_rank() {
        let mut deck = new_deck();
        for _ in 0..10_000 {
            let hand = sample_hand(&mut deck);
            let evaluation = eval(&hand);
            assert_eq!(evaluation, eval(&hand));
            assert_eq!(evaluation.counts.total(), 5);
            assert!(satisfies(&hand, evaluation.rank));
            for stronger in Rank::ranks().filter(|rank| *rank > evaluation.rank) {
                assert!(
                    !satisfies(&hand, stronger),
                    "{hand} is a {} but also meets {stronger}",
                    evaluation.rank
                );
            }
        }
    }

    #[test]
    fn showdown_is_antisymmetric() {
        let mut deck = new_deck();
        for _ in 0..10_000 {
            let hand1 = sample_hand(&mut deck);
            let hand2 = sample_hand(&mut deck);
            let expected = match showdown(&hand1, &hand2) {
                MatchResult::Player1 => MatchResult::Player2,
                MatchResult::Player2 => MatchResult::Player1,
                MatchResult::Tie => MatchResult::Tie,
            };
            assert_eq!(showdown(&hand2, &hand1), expected);
            assert_eq!(showdown(&hand1, &hand1), MatchResult::Tie);
        }
    }

    #[test]
    fn eval_all_hands() {
        let deck = new_deck();
        let mut counts = [0usize; 10];
        for c1 in 0..52 {
            for c2 in (c1 + 1)..52 {
                for c3 in (c2 + 1)..52 {
                    for c4 in (c3 + 1)..52 {
                        for c5 in (c4 + 1)..52 {
                            let hand =
                                Hand::new([deck[c1], deck[c2], deck[c3], deck[c4], deck[c5]]);
                            counts[eval(&hand).rank as usize] += 1;
                        }
                    }
                }
            }
        }

        // Ace low runs aren't straights, so they count as high cards
        // or flushes.
        assert_eq!(counts[Rank::HighCard as usize], 1_303_560);
        assert_eq!(counts[Rank::OnePair as usize], 1_098_240);
        assert_eq!(counts[Rank::TwoPair as usize], 123_552);
        assert_eq!(counts[Rank::ThreeOfAKind as usize], 54_912);
        assert_eq!(counts[Rank::Straight as usize], 9_180);
        assert_eq!(counts[Rank::Flush as usize], 5_112);
        assert_eq!(counts[Rank::FullHouse as usize], 3_744);
        assert_eq!(counts[Rank::FourOfAKind as usize], 624);
        assert_eq!(counts[Rank::StraightFlush as usize], 32);
        assert_eq!(counts[Rank::RoyalFlush as usize], 4);
        assert_eq!(counts.iter().sum::<usize>(), 2_598_960);
    }
}
