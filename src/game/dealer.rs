use crate::game::hand::Hand;
use crate::game::shoe::Shoe;

/// The total at or above which the dealer stops drawing.
pub const DEALER_STAND_TOTAL: u32 = 17;

/// Plays out the dealer's hand: while its value is below 17 a card is drawn
/// from the shoe and appended. Any value of 17 or more halts the loop, a bust
/// included; no soft/hard seventeen distinction is made.
pub fn play_out(hand: &mut Hand, shoe: &mut Shoe) {
    while hand.value() < DEALER_STAND_TOTAL {
        hand.push(shoe.draw());
    }
}
