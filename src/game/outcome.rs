use serde::Serialize;
use std::fmt::Display;

/// The result of a settled round from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Push,
    Loss,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Push => write!(f, "push"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// The settlement of a stood round: the outcome, the bankroll delta to apply
/// and a display message for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub delta: i64,
    pub message: String,
}

/// Compares final hand values and settles the bet. Precedence: a dealer bust
/// pays the player `2 * bet` even if the player is also over 21 (a house-rule
/// quirk of this engine, kept deliberately); a higher non-bust player total
/// pays `2 * bet`; equal totals push and return the stake; anything else,
/// a player bust against a standing dealer included, loses the bet.
pub fn resolve(dealer_total: u32, player_total: u32, bet: i64) -> Settlement {
    if dealer_total > 21 || (dealer_total < player_total && player_total <= 21) {
        Settlement {
            outcome: Outcome::Win,
            delta: 2 * bet,
            message: format!("You win £{}", 2 * bet),
        }
    } else if player_total == dealer_total {
        Settlement {
            outcome: Outcome::Push,
            delta: bet,
            message: format!("It's a draw. You get back your bet of £{}", bet),
        }
    } else {
        Settlement {
            outcome: Outcome::Loss,
            delta: -bet,
            message: format!("You lose £{}", bet),
        }
    }
}
