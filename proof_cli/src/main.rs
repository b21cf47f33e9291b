//! # Proofcalc CLI Application
//!
//! Interactive terminal front end for the sourdough calculators. Each section
//! prompts for its inputs (showing the last-used value as the default), runs
//! the formula, prints the rounded result, and persists the session so the
//! next run starts from the same values.
//!
//! The session file path is the first CLI argument, else the
//! `SOURDOUGH_SESSION` environment variable, else `sourdough.sdc` in the
//! current directory.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use proof_core::display::{
    format_hours, format_hydration, format_inoculation, format_water_temp, water_advisory,
};
use proof_core::file_io::{load_session, save_session, SessionLock};
use proof_core::formulas::{bulk, starter, water, FlourType, HydrationBand, MixerMethod};
use proof_core::session::Session;

fn main() -> ExitCode {
    println!("Proofcalc - Sourdough Baking Calculator");
    println!("=======================================");
    println!();

    let path = session_path();
    let mut session = match load_or_new(&path) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error loading session {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let lock = match SessionLock::acquire(&path) {
        Ok(lock) => Some(lock),
        Err(e) => {
            eprintln!("Warning: {}", e);
            eprintln!("Continuing without saving (read-only).");
            eprintln!();
            None
        }
    };
    let read_only = lock.is_none();

    loop {
        println!();
        println!("  [1] Water temperature    [2] Starter peak time");
        println!("  [3] Bulk fermentation    [4] Settings");
        println!("  [5] Show session (JSON)  [q] Quit");
        print!("> ");

        match parse_menu_choice(read_line()) {
            MenuChoice::Water => run_water(&mut session),
            MenuChoice::Starter => run_starter(&mut session),
            MenuChoice::Bulk => run_bulk(&mut session),
            MenuChoice::Settings => run_settings(&mut session),
            MenuChoice::ShowSession => {
                show_session(&session);
                continue;
            }
            MenuChoice::Quit => break,
            MenuChoice::Redisplay => continue,
            MenuChoice::Unknown(other) => {
                println!("Unknown choice: {}", other);
                continue;
            }
        }

        persist(&mut session, &path, read_only);
    }

    drop(lock);
    ExitCode::SUCCESS
}

/// One round of the main menu.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuChoice {
    Water,
    Starter,
    Bulk,
    Settings,
    ShowSession,
    Quit,
    Redisplay,
    Unknown(String),
}

/// Map a line of menu input to an action. `None` means stdin is closed
/// (piped input exhausted, Ctrl-D), which quits rather than looping.
fn parse_menu_choice(line: Option<String>) -> MenuChoice {
    let line = match line {
        Some(line) => line,
        None => return MenuChoice::Quit,
    };
    match line.as_str() {
        "1" => MenuChoice::Water,
        "2" => MenuChoice::Starter,
        "3" => MenuChoice::Bulk,
        "4" => MenuChoice::Settings,
        "5" => MenuChoice::ShowSession,
        "q" | "Q" => MenuChoice::Quit,
        "" => MenuChoice::Redisplay,
        other => MenuChoice::Unknown(other.to_string()),
    }
}

/// Resolve the session file path: CLI arg, env var, or default.
fn session_path() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }
    if let Ok(env) = std::env::var("SOURDOUGH_SESSION") {
        return PathBuf::from(env);
    }
    PathBuf::from("sourdough.sdc")
}

/// Load the session, starting fresh if the file does not exist yet.
fn load_or_new(path: &Path) -> Result<Session, proof_core::CalcError> {
    if path.exists() {
        load_session(path)
    } else {
        Ok(Session::new())
    }
}

/// Dump the current session as JSON (the same shape as the session file).
fn show_session(session: &Session) {
    match serde_json::to_string_pretty(session) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Save the session back to disk, unless running read-only.
fn persist(session: &mut Session, path: &Path, read_only: bool) {
    if read_only {
        return;
    }
    session.touch();
    if let Err(e) = save_session(session, path) {
        eprintln!("Warning: failed to save session: {}", e);
    }
}

// ---------------------------------------------------------------------------
// Calculator sections
// ---------------------------------------------------------------------------

fn run_water(session: &mut Session) {
    println!();
    println!("--- Water temperature ---");

    let w = &mut session.water;
    w.desired_dough_temp_c = prompt_f64("Desired dough temp (°C)", w.desired_dough_temp_c);
    w.room_temp_c = prompt_f64("Room temp (°C)", w.room_temp_c);
    w.flour_temp_c = prompt_f64("Flour temp (°C)", w.flour_temp_c);
    w.preferment_enabled = prompt_bool("Preferment in dough?", w.preferment_enabled);
    if w.preferment_enabled {
        w.preferment_temp_c = prompt_f64("Preferment temp (°C)", w.preferment_temp_c);
    }
    w.mixer = prompt_mixer(w.mixer);
    if w.mixer == MixerMethod::Custom {
        w.custom_friction_c = prompt_custom_friction(w.custom_friction_c);
    }

    match water::calculate(w) {
        Ok(result) => {
            println!();
            println!("  Water temperature: {}", format_water_temp(result.water_temp_c));
            if let Some(advisory) = water_advisory(result.water_temp_c) {
                println!("  Note: {}", advisory.message());
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_starter(session: &mut Session) {
    println!();
    println!("--- Starter peak time ---");

    let s = &mut session.starter;
    s.seed_g = prompt_f64("Seed amount (g)", s.seed_g);
    s.flour_g = prompt_f64("Flour amount (g)", s.flour_g);
    s.water_g = prompt_f64("Water amount (g)", s.water_g);
    s.culture_temp_c = prompt_f64("Culture temp (°C)", s.culture_temp_c);
    s.flour_type = prompt_flour_type(s.flour_type);

    let input = session
        .starter
        .to_input(session.settings.starter_coefficients());
    match starter::calculate(&input) {
        Ok(result) => {
            println!();
            println!("  Peak in:     {}", format_hours(result.peak_hours));
            println!("  Inoculation: {} %", format_inoculation(result.inoculation_percent));
            println!("  Hydration:   {} %", format_hydration(result.hydration_percent));
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_bulk(session: &mut Session) {
    println!();
    println!("--- Bulk fermentation ---");

    let b = &mut session.bulk;
    b.starter_percent = prompt_f64("Starter (% of flour)", b.starter_percent);
    b.dough_temp_c = prompt_f64("Dough temp (°C)", b.dough_temp_c);
    b.flour_type = prompt_flour_type(b.flour_type);
    b.hydration_band = prompt_hydration_band(b.hydration_band);
    b.salt_percent = prompt_f64("Salt (% of flour)", b.salt_percent);

    let input = session.bulk.to_input(session.settings.bulk_coefficients());
    match bulk::calculate(&input) {
        Ok(result) => {
            println!();
            println!("  Bulk fermentation: {}", format_hours(result.bulk_hours));
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_settings(session: &mut Session) {
    println!();
    println!("--- Settings (model coefficients) ---");
    println!("These feed the starter and bulk formulas.");

    let s = &mut session.settings;
    s.st_k = prompt_f64("Starter base scale k", s.st_k);
    s.st_a = prompt_f64("Starter exponent alpha", s.st_a);
    s.q10 = prompt_f64("Q10 temperature coefficient", s.q10);
    s.st_tref = prompt_f64("Starter reference temp (°C)", s.st_tref);
    s.b_c = prompt_f64("Bulk base scale c", s.b_c);
    s.b_b = prompt_f64("Bulk exponent beta", s.b_b);

    println!();
    println!("  Settings updated.");
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

/// Read one trimmed line from stdin. Returns `None` when stdin is closed
/// or unreadable, so callers can tell EOF apart from a blank line.
fn read_line() -> Option<String> {
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{} [{}]: ", prompt, default);
    read_line().unwrap_or_default().parse().unwrap_or(default)
}

fn prompt_bool(prompt: &str, default: bool) -> bool {
    print!("{} (y/n) [{}]: ", prompt, if default { "y" } else { "n" });
    match read_line().unwrap_or_default().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Custom friction factor prompt. Empty input keeps the stored value;
/// non-numeric entries coerce to 0.
fn prompt_custom_friction(default: Option<f64>) -> Option<f64> {
    print!("Custom friction (°C) [{}]: ", default.unwrap_or(0.0));
    let text = read_line().unwrap_or_default();
    if text.is_empty() {
        return default;
    }
    Some(text.parse().unwrap_or(0.0))
}

fn prompt_mixer(default: MixerMethod) -> MixerMethod {
    let label = match default {
        MixerMethod::Hand => "hand",
        MixerMethod::Planetary => "planetary",
        MixerMethod::Spiral => "spiral",
        MixerMethod::Custom => "custom",
    };
    print!("Mixer (hand/planetary/spiral/custom) [{}]: ", label);
    match read_line().unwrap_or_default().to_lowercase().as_str() {
        "hand" | "h" => MixerMethod::Hand,
        "planetary" | "p" => MixerMethod::Planetary,
        "spiral" | "s" => MixerMethod::Spiral,
        "custom" | "c" => MixerMethod::Custom,
        _ => default,
    }
}

fn prompt_flour_type(default: FlourType) -> FlourType {
    let label = match default {
        FlourType::White => "white",
        FlourType::Whole => "whole",
    };
    print!("Flour type (white/whole) [{}]: ", label);
    match read_line().unwrap_or_default().to_lowercase().as_str() {
        "white" => FlourType::White,
        "whole" => FlourType::Whole,
        _ => default,
    }
}

fn prompt_hydration_band(default: HydrationBand) -> HydrationBand {
    let label = match default {
        HydrationBand::Stiff => "stiff",
        HydrationBand::Standard => "standard",
        HydrationBand::High => "high",
    };
    print!("Hydration band (stiff/standard/high) [{}]: ", label);
    match read_line().unwrap_or_default().to_lowercase().as_str() {
        "stiff" => HydrationBand::Stiff,
        "standard" => HydrationBand::Standard,
        "high" => HydrationBand::High,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_stdin_quits_menu() {
        // Exhausted piped input must exit the loop, not respin it
        assert_eq!(parse_menu_choice(None), MenuChoice::Quit);
    }

    #[test]
    fn test_blank_line_redisplays_menu() {
        assert_eq!(parse_menu_choice(Some(String::new())), MenuChoice::Redisplay);
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(parse_menu_choice(Some("1".to_string())), MenuChoice::Water);
        assert_eq!(parse_menu_choice(Some("2".to_string())), MenuChoice::Starter);
        assert_eq!(parse_menu_choice(Some("3".to_string())), MenuChoice::Bulk);
        assert_eq!(parse_menu_choice(Some("4".to_string())), MenuChoice::Settings);
        assert_eq!(
            parse_menu_choice(Some("5".to_string())),
            MenuChoice::ShowSession
        );
        assert_eq!(parse_menu_choice(Some("q".to_string())), MenuChoice::Quit);
        assert_eq!(parse_menu_choice(Some("Q".to_string())), MenuChoice::Quit);
        assert_eq!(
            parse_menu_choice(Some("x".to_string())),
            MenuChoice::Unknown("x".to_string())
        );
    }
}
