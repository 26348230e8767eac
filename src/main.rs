//! Vanity Salt Miner CLI
//!
//! Searches salts until the CREATE3-derived deployment address matches the
//! pattern(s). A found salt embeds the signer and cross-chain protection, so
//! submitting it to the factory from that signer reproduces the address.

use std::process;
use std::sync::atomic::Ordering;

use clap::Parser;

use createx_vanity::{Config, SearchConfig, SearchPool, SearchReport};

fn main() {
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    let patterns = match config.compiled_patterns() {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    println!("Vanity Salt Miner");
    println!("=================");
    for pattern in &patterns {
        println!("Pattern:    {} ({})", pattern, pattern.difficulty_description());
    }
    println!("Signer:     {}", config.signer_address());
    println!("Factory:    {}", config.factory_address());
    println!("Chain id:   {}", config.chain_id());
    println!("Attempts:   {}", format_number(config.max_attempts));
    println!("Workers:    {}", config.worker_count());
    println!("Target:     {} address(es)", config.count);
    println!();

    let search = SearchConfig {
        signer: config.signer_address(),
        factory: config.factory_address(),
        chain_id: config.chain_id(),
        patterns,
        max_attempts: config.max_attempts,
        workers: config.worker_count(),
    };

    let pool = match SearchPool::new(search) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Search error: {}", e);
            process::exit(1);
        }
    };

    let stop_flag = pool.stop_flag_clone();
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    })
    .expect("set Ctrl-C handler");

    println!("Searching... (Press Ctrl+C to stop)\n");

    let budget = config.count as u64;
    let budget_flag = pool.stop_flag_clone();
    let report = match pool.run_with(|progress| {
        println!(
            "Tried {} salts, {} match(es) so far",
            format_number(progress.total_attempts),
            progress.total_matches
        );
        if budget > 0 && progress.total_matches >= budget {
            budget_flag.store(true, Ordering::Relaxed);
        }
    }) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            process::exit(1);
        }
    };

    print_report(&report);
}

fn print_report(report: &SearchReport) {
    let mut index = 0;
    for group in &report.patterns {
        println!("=== Pattern {} ===", group.pattern);
        if !group.found() {
            println!("No match in the searched range.");
            println!();
            continue;
        }
        for m in &group.matches {
            index += 1;
            println!("Match #{}", index);
            println!("Address:    {}", m.address_checksum());
            println!("Salt:       {}", m.salt_hex());
        }
        println!();
    }

    println!("--- Final Statistics ---");
    println!("Total salts tried:  {}", format_number(report.attempts));
    println!("Total matches:      {}", report.matches.len());
    println!("Time elapsed:       {:.2}s", report.elapsed.as_secs_f64());
    println!(
        "Average speed:      {}/s",
        format_number(report.attempts_per_second() as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
