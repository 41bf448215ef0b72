// src/bin/table_dev_cli.rs
//
// Dev-CLI: четыре пассивных бота, три раунда подряд, текстовый след каждого раунда.

use poker_table::domain::{Chips, Player, Table, TableConfig};
use poker_table::engine::PassiveStrategy;
use poker_table::infra::SystemRng;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    init_logging();

    let mut table = match Table::new(TableConfig::standard()) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Error: {}", e);
            return;
        }
    };

    for (id, name) in ["Alice", "Bob", "Carol", "Dave"].into_iter().enumerate() {
        if let Err(e) = table.add_player(Player::new(id as u64 + 1, name, Chips(100)), PassiveStrategy) {
            tracing::error!("Error: {}", e);
            return;
        }
    }

    let mut rng = SystemRng;
    for round in 1..=3 {
        println!();
        println!("================ ROUND {round} =================");

        if let Err(e) = table.start_round(&mut rng) {
            tracing::error!("Error: {}", e);
            return;
        }

        for line in table.history().transcript() {
            println!("{line}");
        }

        // Демо-выплата: без оценки рук весь банк получает первое оставшееся место.
        let winner = table.contesting_seats().first().copied();
        match table.settle_pot() {
            Ok(pot) => {
                if let Some(player) = winner.and_then(|seat| table.player_mut(seat)) {
                    player.add_chips(pot);
                    println!("[CLI] {} забирает {}", player.name, pot);
                }
            }
            Err(e) => {
                tracing::error!("Error: {}", e);
                return;
            }
        }
    }

    println!();
    for player in table.players() {
        println!("{}: {} chips", player.name, player.chips());
    }
}
