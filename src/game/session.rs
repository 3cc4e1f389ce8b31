/// The player's bankroll and current bet, persisting across rounds within one
/// process run. The bankroll starts at 1000 and is mutated only when a round
/// settles; the bet is fixed for the lifetime of the session, there is no
/// bet-adjustment path during play.
#[derive(Debug, Clone)]
pub struct Session {
    bankroll: i64,
    bet: i64,
}

impl Session {
    pub const STARTING_BANKROLL: i64 = 1000;
    pub const FIXED_BET: i64 = 5;

    /// Associated function to create a new `Session` with the reference
    /// starting bankroll and bet.
    pub fn new() -> Session {
        Session::with_stakes(Session::STARTING_BANKROLL, Session::FIXED_BET)
    }

    /// Associated function to create a new `Session` with a chosen starting
    /// bankroll and bet.
    pub fn with_stakes(bankroll: i64, bet: i64) -> Session {
        Session { bankroll, bet }
    }

    /// Getter method for the current bankroll.
    pub fn bankroll(&self) -> i64 {
        self.bankroll
    }

    /// Getter method for the bet placed on each round.
    pub fn bet(&self) -> i64 {
        self.bet
    }

    /// Applies a settlement delta to the bankroll.
    pub fn apply(&mut self, delta: i64) {
        self.bankroll += delta;
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
