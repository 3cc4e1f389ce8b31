use crate::game::card::{Card, Rank, Suit};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Number of 52-card decks the shoe is built from.
pub const DECKS_PER_SHOE: usize = 8;
/// Number of cards in a single deck.
pub const CARDS_PER_DECK: usize = 52;
/// Cards dealt since the last full reshuffle before the shoe is rebuilt,
/// 3.5 decks worth of an 8 deck shoe (3.5 * 52 * 8).
pub const RESHUFFLE_THRESHOLD: u32 = 1456;
/// If fewer than this many cards physically remain, the shoe rebuilds before drawing.
const LOW_CARD_GUARD: usize = 4;

lazy_static! {
    /// A single ordered 52-card deck, the template the shoe is populated from.
    static ref DECK_TEMPLATE: Vec<Card> = {
        let mut cards = Vec::with_capacity(CARDS_PER_DECK);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    };
}

/// An ordered, shuffled supply of cards built from `DECKS_PER_SHOE` decks.
/// Cards are dealt from the front; the shoe rebuilds and reshuffles itself
/// once the dealt-count threshold is reached or the supply runs low, so
/// `draw` never fails.
pub struct Shoe {
    cards: Vec<Card>,
    cards_dealt: u32,
    reshuffle_count: u32,
    rng: StdRng,
}

impl Shoe {
    /// Associated function to create a new `Shoe`, populated and shuffled
    /// with entropy from the operating system.
    pub fn new() -> Shoe {
        Shoe::from_rng(StdRng::from_entropy())
    }

    /// Associated function to create a new `Shoe` with a deterministic card
    /// order derived from `seed`.
    pub fn seeded(seed: u64) -> Shoe {
        Shoe::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Shoe {
        let mut shoe = Shoe {
            cards: Vec::with_capacity(DECKS_PER_SHOE * CARDS_PER_DECK),
            cards_dealt: 0,
            reshuffle_count: 0,
            rng,
        };
        shoe.fill();
        shoe
    }

    /// Discards any undealt cards, repopulates the full shoe and applies a
    /// uniformly random shuffle.
    fn fill(&mut self) {
        self.cards.clear();
        for _ in 0..DECKS_PER_SHOE {
            self.cards.extend_from_slice(&DECK_TEMPLATE);
        }
        self.cards.shuffle(&mut self.rng);
    }

    fn reshuffle(&mut self) {
        self.fill();
        self.reshuffle_count += 1;
    }

    /// Removes and returns the front card of the shoe. If the dealt-count has
    /// reached `RESHUFFLE_THRESHOLD`, or fewer than `LOW_CARD_GUARD` cards
    /// remain, the shoe is rebuilt and reshuffled first. Only the threshold
    /// path resets the dealt-count; the low-card guard keeps counting, so the
    /// threshold stays reachable across guard rebuilds.
    pub fn draw(&mut self) -> Card {
        if self.cards_dealt >= RESHUFFLE_THRESHOLD {
            self.reshuffle();
            self.cards_dealt = 0;
        } else if self.cards.len() < LOW_CARD_GUARD {
            self.reshuffle();
        }
        let card = self.cards.remove(0);
        self.cards_dealt += 1;
        card
    }

    /// Getter method for the number of cards physically left in the shoe.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Getter method for the number of cards dealt since the last threshold reshuffle.
    pub fn cards_dealt(&self) -> u32 {
        self.cards_dealt
    }

    /// Getter method for the number of reshuffles performed since the shoe was created.
    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffle_count
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Shoe::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_shoe_holds_eight_decks() {
        let shoe = Shoe::seeded(42);
        assert_eq!(shoe.remaining(), DECKS_PER_SHOE * CARDS_PER_DECK);
        assert_eq!(shoe.cards_dealt(), 0);
        assert_eq!(shoe.reshuffle_count(), 0);
    }

    #[test]
    fn draw_consumes_from_the_front() {
        let mut shoe = Shoe::seeded(42);
        let _ = shoe.draw();
        assert_eq!(shoe.remaining(), DECKS_PER_SHOE * CARDS_PER_DECK - 1);
        assert_eq!(shoe.cards_dealt(), 1);
    }

    #[test]
    fn same_seed_deals_the_same_cards() {
        let mut a = Shoe::seeded(7);
        let mut b = Shoe::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn low_card_guard_rebuilds_without_resetting_the_count() {
        let mut shoe = Shoe::seeded(3);
        // After 413 draws only 3 cards remain, so the 414th draw rebuilds.
        for _ in 0..413 {
            let _ = shoe.draw();
        }
        assert_eq!(shoe.remaining(), 3);
        assert_eq!(shoe.reshuffle_count(), 0);
        let _ = shoe.draw();
        assert_eq!(shoe.reshuffle_count(), 1);
        assert_eq!(shoe.cards_dealt(), 414);
        assert_eq!(shoe.remaining(), DECKS_PER_SHOE * CARDS_PER_DECK - 1);
    }

    #[test]
    fn threshold_reshuffle_fires_on_the_next_draw() {
        let mut shoe = Shoe::seeded(11);
        for _ in 0..RESHUFFLE_THRESHOLD {
            let _ = shoe.draw();
        }
        assert_eq!(shoe.cards_dealt(), RESHUFFLE_THRESHOLD);
        let guard_rebuilds = shoe.reshuffle_count();
        let _ = shoe.draw();
        assert_eq!(shoe.reshuffle_count(), guard_rebuilds + 1);
        assert_eq!(shoe.cards_dealt(), 1);
    }
}
