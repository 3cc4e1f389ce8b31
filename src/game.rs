//! Module that implements the round engine for a single-player game of
//! blackjack: the shoe, both hands, the session bankroll and the state machine
//! that moves one round from the deal through settlement and into the next.

pub mod card;
pub mod dealer;
pub mod hand;
pub mod outcome;
pub mod session;
pub mod shoe;

pub mod prelude {
    pub use crate::game::card::{Card, Rank, Suit};
    pub use crate::game::hand::{hand_value, Hand};
    pub use crate::game::outcome::{resolve, Outcome, Settlement};
    pub use crate::game::session::Session;
    pub use crate::game::shoe::Shoe;
    pub use crate::game::{
        EngineConfig, EngineConfigBuilder, EngineEvent, HitReport, RoundEngine, RoundPhase,
        RoundSnapshot, StandReport,
    };
    pub use crate::GameError;
}

use crate::GameError;
use card::Card;
use hand::Hand;
use serde::Serialize;
use session::Session;
use shoe::Shoe;
use std::sync::mpsc::{self, Receiver, Sender};

/// The phase a round is in. `Settled` is transient: settlement immediately
/// deals the next round, so between calls the engine only ever rests in
/// `NotStarted` (before the first deal) or `PlayerTurn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    NotStarted,
    PlayerTurn,
    Settled,
}

/// One-way notifications fired by the engine for optional display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Reshuffled,
}

/// An immutable view of the table for the presentation layer to render.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSnapshot {
    pub dealer_hand: Vec<Card>,
    pub player_hand: Vec<Card>,
    pub dealer_total: u32,
    pub player_total: u32,
}

/// What a `hit` produced. When `busted` is set the round has already settled
/// as a flat loss and the next round has been dealt; `bankroll_delta` and
/// `next_round` are populated so the caller can re-render in one step.
#[derive(Debug, Clone, Serialize)]
pub struct HitReport {
    pub player_hand: Vec<Card>,
    pub player_total: u32,
    pub busted: bool,
    pub bankroll: i64,
    pub bankroll_delta: Option<i64>,
    pub next_round: Option<RoundSnapshot>,
}

/// What a `stand` produced: the dealer's played-out hand, the settlement and
/// the freshly dealt next round.
#[derive(Debug, Clone, Serialize)]
pub struct StandReport {
    pub dealer_hand: Vec<Card>,
    pub dealer_total: u32,
    pub player_total: u32,
    pub outcome: outcome::Outcome,
    pub message: String,
    pub bankroll: i64,
    pub next_round: RoundSnapshot,
}

/// Struct for configuring a `RoundEngine`.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub starting_bankroll: i64,
    pub bet: i64,
    pub shoe_seed: Option<u64>,
}

impl EngineConfig {
    /// Associated method for returning a new `EngineConfigBuilder` object.
    pub fn new() -> EngineConfigBuilder {
        EngineConfigBuilder {
            starting_bankroll: None,
            bet: None,
            shoe_seed: None,
        }
    }
}

impl Default for EngineConfig {
    /// Returns the reference configuration: a bankroll of 1000 and a fixed
    /// bet of 5, with an entropy-seeded shoe.
    fn default() -> Self {
        EngineConfig::new().build()
    }
}

/// Struct to implement the builder pattern for `EngineConfig`.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfigBuilder {
    starting_bankroll: Option<i64>,
    bet: Option<i64>,
    shoe_seed: Option<u64>,
}

impl EngineConfigBuilder {
    /// Method for changing the starting bankroll of the session.
    pub fn starting_bankroll(&mut self, bankroll: i64) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    /// Method for changing the bet placed on every round.
    pub fn bet(&mut self, bet: i64) -> &mut Self {
        self.bet = Some(bet);
        self
    }

    /// Method for fixing the shoe's shuffle order to a seed, for
    /// reproducible play.
    pub fn shoe_seed(&mut self, seed: u64) -> &mut Self {
        self.shoe_seed = Some(seed);
        self
    }

    /// Method for building an `EngineConfig` object from the given builder.
    pub fn build(&mut self) -> EngineConfig {
        EngineConfig {
            starting_bankroll: self.starting_bankroll.unwrap_or(Session::STARTING_BANKROLL),
            bet: self.bet.unwrap_or(Session::FIXED_BET),
            shoe_seed: self.shoe_seed,
        }
    }
}

/// The round engine. Owns the shoe, the dealer's and player's hands and the
/// session bankroll, and drives one round at a time through `start_round`,
/// `hit` and `stand`. Settlement always deals the next round before
/// returning, so a caller sees an in-progress round at all times after the
/// first deal.
pub struct RoundEngine {
    shoe: Shoe,
    dealer_hand: Hand,
    player_hand: Hand,
    session: Session,
    phase: RoundPhase,
    events: Option<Sender<EngineEvent>>,
}

impl RoundEngine {
    /// Associated function to create a new `RoundEngine` from a config. No
    /// round is dealt until `start_round` is called.
    pub fn new(config: EngineConfig) -> RoundEngine {
        let shoe = match config.shoe_seed {
            Some(seed) => Shoe::seeded(seed),
            None => Shoe::new(),
        };
        RoundEngine {
            shoe,
            dealer_hand: Hand::new(),
            player_hand: Hand::new(),
            session: Session::with_stakes(config.starting_bankroll, config.bet),
            phase: RoundPhase::NotStarted,
            events: None,
        }
    }

    /// Method for subscribing to the engine's one-way event notifications.
    /// Each call replaces any previous subscriber. Sends are fire-and-forget;
    /// a dropped receiver is ignored.
    pub fn events(&mut self) -> Receiver<EngineEvent> {
        let (sender, receiver) = mpsc::channel();
        self.events = Some(sender);
        receiver
    }

    /// Deals the opening hands of a round: one card to the dealer, then two to
    /// the player. Returns an error if a round is already in progress.
    pub fn start_round(&mut self) -> Result<RoundSnapshot, GameError> {
        if self.phase == RoundPhase::PlayerTurn {
            return Err(GameError::RoundInProgress);
        }
        self.begin_round();
        Ok(self.snapshot())
    }

    /// Deals one card to the player. If the hand goes over 21 the round ends
    /// immediately as a flat loss of the bet, without dealer play, and the
    /// next round is dealt. Returns an error if no round is in progress.
    pub fn hit(&mut self) -> Result<HitReport, GameError> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(GameError::NoRoundInProgress);
        }
        let card = self.draw_card();
        self.player_hand.push(card);
        let player_total = self.player_hand.value();
        if player_total > 21 {
            let bet = self.session.bet();
            let player_hand = self.player_hand.cards().to_vec();
            self.phase = RoundPhase::Settled;
            self.session.apply(-bet);
            let bankroll = self.session.bankroll();
            self.begin_round();
            return Ok(HitReport {
                player_hand,
                player_total,
                busted: true,
                bankroll,
                bankroll_delta: Some(-bet),
                next_round: Some(self.snapshot()),
            });
        }
        Ok(HitReport {
            player_hand: self.player_hand.cards().to_vec(),
            player_total,
            busted: false,
            bankroll: self.session.bankroll(),
            bankroll_delta: None,
            next_round: None,
        })
    }

    /// Stops the player's turn: the dealer draws to 17 or above, the round is
    /// resolved and settled against the bankroll, and the next round is dealt.
    /// Returns an error if no round is in progress.
    pub fn stand(&mut self) -> Result<StandReport, GameError> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(GameError::NoRoundInProgress);
        }
        let reshuffles_before = self.shoe.reshuffle_count();
        dealer::play_out(&mut self.dealer_hand, &mut self.shoe);
        for _ in reshuffles_before..self.shoe.reshuffle_count() {
            self.notify(EngineEvent::Reshuffled);
        }

        let dealer_total = self.dealer_hand.value();
        let player_total = self.player_hand.value();
        let settlement = outcome::resolve(dealer_total, player_total, self.session.bet());

        self.phase = RoundPhase::Settled;
        self.session.apply(settlement.delta);
        let dealer_hand = self.dealer_hand.cards().to_vec();
        self.begin_round();

        Ok(StandReport {
            dealer_hand,
            dealer_total,
            player_total,
            outcome: settlement.outcome,
            message: settlement.message,
            bankroll: self.session.bankroll(),
            next_round: self.snapshot(),
        })
    }

    /// Getter method for an immutable snapshot of both hands and their totals.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            dealer_hand: self.dealer_hand.cards().to_vec(),
            player_hand: self.player_hand.cards().to_vec(),
            dealer_total: self.dealer_hand.value(),
            player_total: self.player_hand.value(),
        }
    }

    /// Getter method for the session bankroll.
    pub fn bankroll(&self) -> i64 {
        self.session.bankroll()
    }

    /// Getter method for the bet placed on each round.
    pub fn bet(&self) -> i64 {
        self.session.bet()
    }

    /// Getter method for the engine's current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Getter method for the number of shoe reshuffles so far.
    pub fn reshuffle_count(&self) -> u32 {
        self.shoe.reshuffle_count()
    }

    /// Discards both hands and deals the opening cards of a fresh round:
    /// dealer first, then the player twice.
    fn begin_round(&mut self) {
        self.dealer_hand = Hand::new();
        self.player_hand = Hand::new();
        let card = self.draw_card();
        self.dealer_hand.push(card);
        let card = self.draw_card();
        self.player_hand.push(card);
        let card = self.draw_card();
        self.player_hand.push(card);
        self.phase = RoundPhase::PlayerTurn;
    }

    /// Draws one card, forwarding a reshuffle notification if the shoe rebuilt
    /// itself for this draw.
    fn draw_card(&mut self) -> Card {
        let reshuffles_before = self.shoe.reshuffle_count();
        let card = self.shoe.draw();
        if self.shoe.reshuffle_count() > reshuffles_before {
            self.notify(EngineEvent::Reshuffled);
        }
        card
    }

    fn notify(&self, event: EngineEvent) {
        if let Some(sender) = &self.events {
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::outcome::Outcome;
    use super::*;

    fn seeded_engine(seed: u64) -> RoundEngine {
        RoundEngine::new(EngineConfig::new().shoe_seed(seed).build())
    }

    #[test]
    fn start_round_deals_one_and_two() {
        let mut engine = seeded_engine(42);
        let snapshot = engine.start_round().unwrap();
        assert_eq!(snapshot.dealer_hand.len(), 1);
        assert_eq!(snapshot.player_hand.len(), 2);
        assert_eq!(snapshot.dealer_total, hand::hand_value(&snapshot.dealer_hand));
        assert_eq!(snapshot.player_total, hand::hand_value(&snapshot.player_hand));
        assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
        assert_eq!(engine.bankroll(), 1000);
    }

    #[test]
    fn hit_before_start_is_an_invalid_state() {
        let mut engine = seeded_engine(42);
        assert_eq!(engine.hit().unwrap_err(), GameError::NoRoundInProgress);
        assert_eq!(engine.stand().unwrap_err(), GameError::NoRoundInProgress);
    }

    #[test]
    fn start_round_twice_is_an_invalid_state() {
        let mut engine = seeded_engine(42);
        engine.start_round().unwrap();
        assert_eq!(
            engine.start_round().unwrap_err(),
            GameError::RoundInProgress
        );
    }

    #[test]
    fn stand_settles_and_deals_the_next_round() {
        let mut engine = seeded_engine(42);
        engine.start_round().unwrap();
        let report = engine.stand().unwrap();

        assert!(report.dealer_total >= dealer::DEALER_STAND_TOTAL);
        let expected_bankroll = match report.outcome {
            Outcome::Win => 1010,
            Outcome::Push => 1005,
            Outcome::Loss => 995,
        };
        assert_eq!(report.bankroll, expected_bankroll);
        assert_eq!(engine.bankroll(), expected_bankroll);

        // The next round is already dealt from the same shoe.
        assert_eq!(report.next_round.dealer_hand.len(), 1);
        assert_eq!(report.next_round.player_hand.len(), 2);
        assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    }

    #[test]
    fn dealer_bust_pays_double_on_stand() {
        // Scan seeds for a round whose dealer busts, then check the payout.
        for seed in 0..200 {
            let mut engine = seeded_engine(seed);
            engine.start_round().unwrap();
            let report = engine.stand().unwrap();
            if report.dealer_total > 21 {
                assert_eq!(report.outcome, Outcome::Win);
                assert_eq!(report.bankroll, 1010);
                return;
            }
        }
        panic!("no dealer bust found across 200 seeds");
    }

    #[test]
    fn busting_on_a_hit_loses_the_bet_immediately() {
        let mut engine = seeded_engine(42);
        engine.start_round().unwrap();
        // Hit until the hand busts; the engine settles and re-deals on its own.
        let mut hits = 0;
        loop {
            let report = engine.hit().unwrap();
            if report.busted {
                assert!(report.player_total > 21);
                assert_eq!(report.bankroll_delta, Some(-5));
                assert_eq!(report.bankroll, 995);
                let next = report
                    .next_round
                    .expect("bust report carries the next round");
                assert_eq!(next.dealer_hand.len(), 1);
                assert_eq!(next.player_hand.len(), 2);
                assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
                break;
            }
            assert!(report.player_total <= 21);
            assert_eq!(report.bankroll_delta, None);
            assert!(report.next_round.is_none());
            hits += 1;
            assert!(hits < 20, "hand should have busted by now");
        }
    }

    #[test]
    fn reshuffles_are_notified() {
        let mut engine = seeded_engine(42);
        let events = engine.events();
        engine.start_round().unwrap();
        // Standing 200 rounds burns through the shoe several times over.
        for _ in 0..200 {
            engine.stand().unwrap();
        }
        assert!(engine.reshuffle_count() >= 1);
        let mut notified = 0;
        while events.try_recv().is_ok() {
            notified += 1;
        }
        assert_eq!(notified, engine.reshuffle_count());
    }

    #[test]
    fn snapshots_serialize_for_the_presentation_layer() {
        let mut engine = seeded_engine(42);
        let snapshot = engine.start_round().unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("dealer_hand"));
        assert!(json.contains("player_total"));
    }

    #[test]
    fn config_builder_defaults_match_the_reference_game() {
        let config = EngineConfig::default();
        assert_eq!(config.starting_bankroll, 1000);
        assert_eq!(config.bet, 5);
        assert!(config.shoe_seed.is_none());
    }
}
