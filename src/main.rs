use blackjack_engine::prelude::*;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

/// Play blackjack against the dealer in the console.
#[derive(Parser)]
#[command(name = "blackjack")]
struct Cli {
    /// Starting bankroll for the session
    #[arg(long, default_value_t = 1000)]
    bankroll: i64,
    /// Amount bet on every round
    #[arg(long, default_value_t = 5)]
    bet: i64,
    /// Fix the shoe's shuffle order for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

fn print_hand(title: &str, cards: &[Card], total: u32) {
    println!("{}", title);
    for card in cards {
        println!("  {}", card);
    }
    println!("Total: {}", total);
}

fn print_round(snapshot: &RoundSnapshot, bankroll: i64, bet: i64) {
    println!();
    print_hand("Dealer's hand:", &snapshot.dealer_hand, snapshot.dealer_total);
    print_hand("Player's hand:", &snapshot.player_hand, snapshot.player_total);
    println!("Money: £{}   Bet: £{}", bankroll, bet);
}

fn drain_events(events: &Receiver<EngineEvent>) {
    while let Ok(EngineEvent::Reshuffled) = events.try_recv() {
        println!("Deck reshuffled");
    }
}

fn main() {
    let cli = Cli::parse();

    let mut builder = EngineConfig::new();
    builder.starting_bankroll(cli.bankroll).bet(cli.bet);
    if let Some(seed) = cli.seed {
        builder.shoe_seed(seed);
    }
    let mut engine = RoundEngine::new(builder.build());
    let events = engine.events();

    let snapshot = match engine.start_round() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    drain_events(&events);
    print_round(&snapshot, engine.bankroll(), engine.bet());

    let stdin = io::stdin();
    loop {
        print!("hit, stand or quit? ");
        let _ = io::stdout().flush();
        let line = match stdin.lock().lines().next() {
            Some(Ok(line)) => line,
            _ => break,
        };

        let result = match line.trim().to_lowercase().as_str() {
            "h" | "hit" => engine.hit().map(|report| {
                drain_events(&events);
                if report.busted {
                    print_hand("Player's hand:", &report.player_hand, report.player_total);
                    println!("You are bust! You lose £{}", engine.bet());
                    print_round(
                        report.next_round.as_ref().expect("bust deals a new round"),
                        report.bankroll,
                        engine.bet(),
                    );
                } else {
                    print_round(&engine.snapshot(), report.bankroll, engine.bet());
                }
            }),
            "s" | "stand" => engine.stand().map(|report| {
                drain_events(&events);
                print_hand("Dealer's hand:", &report.dealer_hand, report.dealer_total);
                println!("{}", report.message);
                print_round(&report.next_round, report.bankroll, engine.bet());
            }),
            "q" | "quit" => break,
            other => {
                println!("unrecognized command: {other}");
                continue;
            }
        };

        if let Err(e) = result {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }

    println!("You leave the table with £{}", engine.bankroll());
}
