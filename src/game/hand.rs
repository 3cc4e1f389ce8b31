use crate::game::card::{Card, Rank};

/// An ordered sequence of cards belonging to either the dealer or the player.
/// Created empty at the start of a round, grows only by appending cards dealt
/// from the shoe, and is discarded at round end.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Associated function to create a new empty `Hand`.
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    /// Method for receiving a card dealt from the shoe.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Getter method for the cards currently in the hand.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Getter method for the number of cards in the hand.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Method that computes the best numeric value of the hand under the
    /// ace-flexible scoring rule, see `hand_value`.
    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    /// Returns true if the hand's value exceeds 21.
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }
}

/// Computes the value of a hand of cards. Base rank values are summed with an
/// ace counting as 11; if the hand holds at least one ace and the base sum plus
/// 10 does not exceed 21, exactly 10 is added. At most one ace ever receives
/// the soft adjustment, however many aces are present. Values over 21 are
/// returned as-is and mean bust; interpreting them is left to the caller.
pub fn hand_value(cards: &[Card]) -> u32 {
    let mut value = 0;
    let mut has_ace = false;
    for card in cards {
        value += card.value();
        if card.rank() == Rank::Ace {
            has_ace = true;
        }
    }
    if has_ace && value + 10 <= 21 {
        value += 10;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::Suit;

    fn hand_of(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Clubs)).collect()
    }

    #[test]
    fn number_cards_sum_directly() {
        assert_eq!(hand_value(&hand_of(&[Rank::Two, Rank::Three])), 5);
        assert_eq!(hand_value(&hand_of(&[Rank::Ten, Rank::Seven])), 17);
        assert_eq!(hand_value(&hand_of(&[Rank::King, Rank::Queen, Rank::Two])), 22);
    }

    #[test]
    fn soft_ace_adjustment_applies_once() {
        // Ace + Six is a soft seventeen.
        assert_eq!(hand_value(&hand_of(&[Rank::Ace, Rank::Six])), 17);
        // Ace + Nine: base 20, the adjustment would bust, so it stays 20.
        assert_eq!(hand_value(&hand_of(&[Rank::Ace, Rank::Nine])), 20);
        // Ace + King: base 21, blackjack.
        assert_eq!(hand_value(&hand_of(&[Rank::Ace, Rank::King])), 21);
    }

    #[test]
    fn two_aces_are_not_softened() {
        // Base 22, a +10 would bust, so no adjustment applies. The evaluator
        // deliberately does not count each ace down from 11 to 1.
        assert_eq!(hand_value(&hand_of(&[Rank::Ace, Rank::Ace])), 22);
        assert_eq!(
            hand_value(&hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine])),
            31
        );
    }

    #[test]
    fn bust_values_are_returned_unmodified() {
        let cards = hand_of(&[Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(hand_value(&cards), 25);
        let mut hand = Hand::new();
        for card in cards {
            hand.push(card);
        }
        assert!(hand.is_bust());
    }

    #[test]
    fn hand_grows_by_appending() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        hand.push(Card::new(Rank::Four, Suit::Hearts));
        hand.push(Card::new(Rank::Nine, Suit::Spades));
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.value(), 13);
        assert!(!hand.is_bust());
    }
}
