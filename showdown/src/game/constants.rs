// Every hand is dealt exactly five cards.
pub const HAND_SIZE: usize = 5;
// Width of the first player's hand within an input line. The second
// player's hand is whatever follows.
pub const PLAYER_ONE_WIDTH: usize = 15;
// Characters used for card values, from deuce to ace. A value's
// position in the table plus two is its numeric value.
pub const VALUE_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];
pub const MIN_VALUE: u8 = 2;
pub const MAX_VALUE: u8 = 14;
// The lowest card of a royal flush.
pub const ROYAL_FLUSH_LOW: u8 = 10;
