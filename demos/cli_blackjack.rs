//! CLI blackjack example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjcasino::{
    Card, DEFAULT_STARTING_CREDITS, GameOptions, Hand, InMemoryHistory, InMemoryWallet, Phase,
    Settlement, Suit, Table, TableError,
};

const USER: &str = "player";

fn main() {
    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = GameOptions::default();
    let wallet = InMemoryWallet::with_balance(USER, DEFAULT_STARTING_CREDITS);
    let mut table = Table::new(options, seed, USER, wallet, InMemoryHistory::new());

    loop {
        let money = table.balance().unwrap_or(0);
        if money < options.min_bet {
            println!("You are out of credits. Game over.");
            break;
        }

        let max = money.min(options.max_bet);
        let Some(bet) = prompt_usize(&format!(
            "Bet amount ({}-{max}, 0 to quit): ",
            options.min_bet
        )) else {
            break;
        };

        if bet == 0 {
            break;
        }

        let mut settlement = match table.place_bet(bet) {
            Ok(settlement) => settlement,
            Err(err) => {
                println!("Bet error: {err}");
                continue;
            }
        };

        while settlement.is_none() && table.phase() == Phase::PlayerTurn {
            print_table(&table);

            println!("Actions: [h]hit [s]stand [a]advice [q]quit");
            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => table.hit(),
                "s" | "stand" => table.stand().map(Some),
                "a" | "advice" => {
                    match table.advice() {
                        Ok(advice) => println!(
                            "Advice: {} ({:.0}%) {}",
                            advice.action,
                            advice.confidence * 100.0,
                            advice.reasoning
                        ),
                        Err(err) => println!("Advice error: {err}"),
                    }
                    continue;
                }
                "q" | "quit" => {
                    print_statistics(&table);
                    return;
                }
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            match result {
                Ok(next) => settlement = next,
                Err(err) => println!("Action error: {err}"),
            }
        }

        print_table(&table);
        if let Some(settlement) = settlement {
            print_settlement(&settlement, bet);
        }

        if let Err(TableError::RoundInProgress) = table.clear_round() {
            println!("Round could not be cleared.");
            break;
        }
    }

    print_statistics(&table);
    println!("Goodbye.");
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(table: &Table<InMemoryWallet, InMemoryHistory>) {
    let Some(round) = table.round() else {
        return;
    };

    println!("\nDeck: {} cards remaining", round.deck().len());
    println!(
        "\nDealer: {} (value {})",
        format_hand(round.dealer_hand()),
        round.dealer_hand().value()
    );
    println!(
        "Player: {} (value {}{}) | bet {}",
        format_hand(round.player_hand()),
        round.player_hand().value(),
        if round.player_hand().is_soft() { ", soft" } else { "" },
        round.wager()
    );
    println!();
}

fn print_settlement(settlement: &Settlement, bet: usize) {
    let outcome = settlement.outcome;
    println!(
        "Round {} complete: {} ({})",
        settlement.round,
        outcome.kind().as_str(),
        outcome.reason
    );
    println!("Payout: {} (net {})", outcome.payout, outcome.net(bet));
    if let Some(err) = settlement.credit_warning {
        println!("Warning: payout not credited: {err}");
    }
}

fn print_statistics(table: &Table<InMemoryWallet, InMemoryHistory>) {
    let stats = table.history().statistics();
    if stats.total_games == 0 {
        return;
    }
    println!(
        "\nGames {} | won {} | lost {} | pushed {} | win rate {:.1}% | net {} | blackjacks {}",
        stats.total_games,
        stats.wins,
        stats.losses,
        stats.pushes,
        stats.win_rate,
        stats.net_winnings,
        stats.blackjack_count
    );
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    if card.is_concealed() {
        return colorize("??", "90");
    }
    let color_code = match card.suit() {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
