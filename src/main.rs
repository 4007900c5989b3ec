// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::Result;
use songsmith::{Chord, ChordProgression, Composition, CompositionConfig, Note};

fn print_usage() {
    println!("songsmith - programmatic MIDI composition");
    println!();
    println!("Usage: songsmith [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --demo <FILE>            Write a demo ii-V-I progression to FILE");
    println!("  --config <YAML> <FILE>   Build a composition from a YAML config and write it");
    println!("  --help                   Show this help message");
}

/// A ii-V-I in C: Dm9 -> G7 -> Cmaj9
fn demo_progression() -> Result<ChordProgression> {
    let chord = |pitches: &[u8]| -> Result<Chord> {
        let notes = pitches
            .iter()
            .map(|&p| Note::new(p, 64, 480, 0))
            .collect::<songsmith::Result<Vec<Note>>>()?;
        Ok(Chord::new(notes))
    };

    Ok(ChordProgression::new(vec![
        chord(&[62, 65, 69, 72, 76])?,
        chord(&[67, 71, 74, 77])?,
        chord(&[60, 64, 67, 71, 74])?,
    ]))
}

fn write_demo(filename: &str) -> Result<()> {
    let mut composition = Composition::new();
    composition.add_program_change(0, 4)?; // electric piano
    composition.add_chord_progression(&demo_progression()?)?;
    composition.save(filename)?;
    println!("Wrote demo progression to {}", filename);
    Ok(())
}

fn write_from_config(config_path: &str, filename: &str) -> Result<()> {
    let config = CompositionConfig::load(config_path)?;
    let mut composition = config.build()?;
    composition.add_chord_progression(&demo_progression()?)?;
    composition.save(filename)?;
    println!("Wrote '{}' to {}", config.name, filename);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--demo") => {
            let filename = args.get(2).map(String::as_str).unwrap_or("demo.mid");
            write_demo(filename)
        }
        Some("--config") => match (args.get(2), args.get(3)) {
            (Some(config_path), Some(filename)) => write_from_config(config_path, filename),
            _ => {
                print_usage();
                std::process::exit(1);
            }
        },
        Some("--help") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
}
