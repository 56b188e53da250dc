pub mod tally;
pub use tally::{LineError, LinePolicy, Tally, TallyConfig, TallyError, TiePolicy};

pub mod game;
pub use game::{
    CardError, HandError,
    constants::{self, HAND_SIZE, PLAYER_ONE_WIDTH},
    entities::{self, Card, Hand, MatchResult, Rank, Suit},
    functional,
};
