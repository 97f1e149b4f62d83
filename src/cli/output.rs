//! Output formatting utilities for CLI.

use serde::Serialize;
use sleuth::board::{Board, Coord};
use sleuth::game::{Game, GameStatus, TurnReport};
use sleuth::simulation::GameResult;
use std::collections::BTreeSet;

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult, seat_names: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    match (result.winner, &result.winner_name) {
        (Some(winner), Some(name)) => {
            output.push_str(&format!("  Winner: Seat {} ({name})\n", winner + 1));
        }
        _ => output.push_str("  Winner: none (unsolved)\n"),
    }
    output.push_str(&format!("  Solution: {}\n", result.solution));
    output.push_str(&format!("  Turns: {}\n", result.turns_played));
    output.push_str(&format!(
        "  Suggestions: {} ({} unrefuted)\n",
        result.suggestions, result.unrefuted_suggestions
    ));
    output.push_str(&format!("  Wrong accusations: {}\n\n", result.wrong_accusations));

    for (i, name) in seat_names.iter().enumerate() {
        let mark = if result.winner == Some(i) { " *" } else { "" };
        output.push_str(&format!("  Seat {}: {name}{mark}\n", i + 1));
    }

    output
}

/// Format one turn of a running game as a single log line.
pub(super) fn format_turn(game: &Game, report: &TurnReport) -> String {
    let name = game.player(report.player).map_or("?", |p| p.name.as_str());
    let mut line = format!("Turn {:>3} {name:<20}", report.turn);

    if let Some(accusation) = &report.accusation {
        let verdict = if accusation.correct { "correct" } else { "wrong" };
        line.push_str(&format!(" accuses {} ({verdict})", accusation.guess));
        return line;
    }
    if let Some(roll) = report.roll {
        line.push_str(&format!(" rolls {roll}, {} targets", report.targets));
    }
    match report.moved_to {
        Some(to) => line.push_str(&format!(", {} -> {to}", report.from)),
        None => line.push_str(", stays"),
    }
    if let Some(suggestion) = &report.suggestion {
        line.push_str(&format!(", suggests {}", suggestion.guess));
        match &suggestion.disproof {
            Some(disproof) => {
                let holder = game.player(disproof.holder).map_or("?", |p| p.name.as_str());
                line.push_str(&format!(", {holder} shows a card"));
            }
            None => line.push_str(", nobody can refute"),
        }
    }
    line
}

/// Render the board as ASCII with `targets` marked `@` and `start` marked `S`.
///
/// Walkways print `.`, doors their glyph, room centers `*`, other room tiles
/// the room initial and unused tiles a space.
pub(super) fn render_board(board: &Board, initials: &[char], start: Coord, targets: &BTreeSet<Coord>) -> String {
    let mut output = String::new();
    for row in 0..board.height() {
        for col in 0..board.width() {
            let coord = Coord::new(row, col);
            let Some(cell) = board.cell(coord) else {
                continue;
            };
            let glyph = if coord == start {
                'S'
            } else if targets.contains(&coord) {
                '@'
            } else if let Some(direction) = cell.tile.door_direction() {
                direction.glyph()
            } else if cell.tile.is_walkway() {
                '.'
            } else if cell.tile.is_center() {
                '*'
            } else {
                cell.tile
                    .room_id()
                    .and_then(|id| initials.get(id.index()).copied())
                    .unwrap_or(' ')
            };
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Win count per seat.
    pub(super) wins: Vec<u64>,
    /// Games nobody solved.
    pub(super) unsolved: u64,
    /// Total turns across all games.
    total_turns: u64,
    /// Total turns across solved games.
    solved_turns: u64,
    /// Total suggestions made.
    suggestions: u64,
    /// Suggestions nobody could refute.
    unrefuted: u64,
    /// Total wrong accusations.
    wrong_accusations: u64,
}

impl TournamentStats {
    /// Create new stats for n seats.
    pub(super) fn new(num_seats: usize) -> Self {
        Self {
            wins: vec![0; num_seats],
            ..Self::default()
        }
    }

    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);
        self.suggestions += u64::from(result.suggestions);
        self.unrefuted += u64::from(result.unrefuted_suggestions);
        self.wrong_accusations += u64::from(result.wrong_accusations);

        match result.status {
            GameStatus::Won { winner } => {
                if let Some(wins) = self.wins.get_mut(winner) {
                    *wins += 1;
                }
                self.solved_turns += u64::from(result.turns_played);
            }
            GameStatus::InProgress | GameStatus::Unsolved => self.unsolved += 1,
        }
    }

    /// Merge stats accumulated on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        for (mine, theirs) in self.wins.iter_mut().zip(&other.wins) {
            *mine += theirs;
        }
        self.unsolved += other.unsolved;
        self.total_turns += other.total_turns;
        self.solved_turns += other.solved_turns;
        self.suggestions += other.suggestions;
        self.unrefuted += other.unrefuted;
        self.wrong_accusations += other.wrong_accusations;
    }

    /// Get win rate for a seat (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn win_rate(&self, seat: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get the share of unsolved games (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn unsolved_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.unsolved as f64 / self.games_played as f64
    }

    /// Get average game length.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Get average length of solved games.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_solved_turns(&self) -> f64 {
        let solved = self.games_played - self.unsolved;
        if solved == 0 {
            return 0.0;
        }
        self.solved_turns as f64 / solved as f64
    }

    /// Get average suggestions per game.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_suggestions(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.suggestions as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Per-seat statistics.
    seats: Vec<JsonTournamentSeat>,
    /// Number of unsolved games.
    unsolved: u64,
    /// Average game length in turns.
    avg_turns: f64,
    /// Average length of solved games.
    avg_solved_turns: f64,
    /// Average suggestions per game.
    avg_suggestions: f64,
    /// Suggestions nobody could refute.
    unrefuted_suggestions: u64,
    /// Total wrong accusations.
    wrong_accusations: u64,
}

/// JSON-serializable per-seat tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentSeat {
    /// Seat number (1-based).
    seat: usize,
    /// Player name.
    name: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonTournamentResult {
    /// Create from stats and seat names.
    pub(super) fn from_stats(stats: &TournamentStats, seat_names: &[String]) -> Self {
        let seats = seat_names
            .iter()
            .enumerate()
            .map(|(i, name)| JsonTournamentSeat {
                seat: i + 1,
                name: name.clone(),
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            seats,
            unsolved: stats.unsolved,
            avg_turns: stats.avg_turns(),
            avg_solved_turns: stats.avg_solved_turns(),
            avg_suggestions: stats.avg_suggestions(),
            unrefuted_suggestions: stats.unrefuted,
            wrong_accusations: stats.wrong_accusations,
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, seat_names: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, name) in seat_names.iter().enumerate() {
        let wins = stats.wins.get(i).copied().unwrap_or(0);
        let rate = stats.win_rate(i) * 100.0;
        output.push_str(&format!("  Seat {} ({name}): {rate:.1}% ({wins} wins)\n", i + 1));
    }
    output.push_str(&format!(
        "  Unsolved: {} ({:.1}%)\n\n",
        stats.unsolved,
        stats.unsolved_rate() * 100.0
    ));

    output.push_str(&format!("Average Game Length: {:.1} turns\n", stats.avg_turns()));
    output.push_str(&format!("Average Solved Game: {:.1} turns\n", stats.avg_solved_turns()));
    output.push_str(&format!(
        "Suggestions: {:.1} per game ({} unrefuted)\n",
        stats.avg_suggestions(),
        stats.unrefuted
    ));
    output.push_str(&format!("Wrong Accusations: {}\n", stats.wrong_accusations));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, seat_names: &[String]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("seat,name,wins,win_rate\n");

    // Data rows
    for (i, name) in seat_names.iter().enumerate() {
        output.push_str(&format!(
            "{},{},{},{:.4}\n",
            i + 1,
            name,
            stats.wins.get(i).copied().unwrap_or(0),
            stats.win_rate(i)
        ));
    }
    output.push_str(&format!(",unsolved,{},{:.4}\n", stats.unsolved, stats.unsolved_rate()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth::cards::{Card, Guess};

    fn result(status: GameStatus, turns: u32) -> GameResult {
        let winner = match status {
            GameStatus::Won { winner } => Some(winner),
            GameStatus::InProgress | GameStatus::Unsolved => None,
        };
        GameResult {
            seed: 1,
            status,
            winner,
            winner_name: winner.map(|w| format!("P{w}")),
            turns_played: turns,
            suggestions: 4,
            unrefuted_suggestions: 1,
            wrong_accusations: 0,
            solution: Guess::new(Card::person("Ada"), Card::weapon("Rope"), Card::room("Hall")),
        }
    }

    #[test]
    fn test_stats_merge() {
        let mut a = TournamentStats::new(2);
        a.add_result(&result(GameStatus::Won { winner: 1 }, 10));
        let mut b = TournamentStats::new(2);
        b.add_result(&result(GameStatus::Unsolved, 30));
        b.add_result(&result(GameStatus::Won { winner: 1 }, 20));
        a.merge(&b);

        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins, vec![0, 2]);
        assert_eq!(a.unsolved, 1);
        assert!((a.avg_turns() - 20.0).abs() < f64::EPSILON);
        assert!((a.avg_solved_turns() - 15.0).abs() < f64::EPSILON);
        assert!((a.avg_suggestions() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_csv_rows() {
        let mut stats = TournamentStats::new(2);
        stats.add_result(&result(GameStatus::Won { winner: 0 }, 10));
        let csv = format_tournament_csv(&stats, &["Ada".to_string(), "Bo".to_string()]);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "seat,name,wins,win_rate");
        assert_eq!(lines[1], "1,Ada,1,1.0000");
        assert_eq!(lines[2], "2,Bo,0,0.0000");
        assert_eq!(lines[3], ",unsolved,0,0.0000");
    }

    #[test]
    fn test_format_text_names_winner() {
        let text = format_text(&result(GameStatus::Won { winner: 0 }, 12), &["Ada".to_string()]);
        assert!(text.contains("Winner: Seat 1 (P0)"));
        assert!(text.contains("Ada with the Rope in the Hall"));
        assert!(text.contains("Seat 1: Ada *"));
    }
}
