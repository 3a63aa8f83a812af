//! Score ranking panel data.

use crate::entity::Hero;
use protocol::snapshot::ScoreLine;
use protocol::{PlayerId, PlayerInfo};
use std::collections::HashMap;

/// Maximum number of displayed lines.
pub const MAX_LINES: usize = 10;

/// Ordered score lines for the scores panel.
///
/// Re-synced after every scoring or damage event rather than every tick.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    lines: Vec<ScoreLine>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ranking: score descending, ties broken by player name
    /// descending.
    pub fn sync(&mut self, heroes: &[Hero], players: &HashMap<PlayerId, PlayerInfo>) {
        let mut ranked: Vec<ScoreLine> = heroes
            .iter()
            .map(|hero| ScoreLine {
                name: players
                    .get(&hero.player_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                score: hero.score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.name.cmp(&a.name)));
        ranked.truncate(MAX_LINES);
        self.lines = ranked;
    }

    pub fn lines(&self) -> &[ScoreLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use protocol::Color;

    fn roster(names: &[(&str, &str)]) -> HashMap<PlayerId, PlayerInfo> {
        names
            .iter()
            .map(|(id, name)| {
                (
                    id.to_string(),
                    PlayerInfo {
                        name: name.to_string(),
                        color: Color::default(),
                    },
                )
            })
            .collect()
    }

    fn hero(id: &str, score: u32) -> Hero {
        let mut hero = Hero::new(id.to_string(), Vec2::new(0.0, 0.0), 70.0);
        hero.score = score;
        hero
    }

    #[test]
    fn ties_break_by_name_descending() {
        let players = roster(&[("1", "Bob"), ("2", "Ann"), ("3", "Zoe")]);
        let heroes = vec![hero("2", 5), hero("3", 3), hero("1", 5)];
        let mut board = ScoreBoard::new();
        board.sync(&heroes, &players);
        let names: Vec<&str> = board.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Ann", "Zoe"]);
    }

    #[test]
    fn panel_is_capped() {
        let entries: Vec<(String, String)> = (0..15)
            .map(|i| (format!("{i}"), format!("player{i:02}")))
            .collect();
        let players = roster(
            &entries
                .iter()
                .map(|(id, name)| (id.as_str(), name.as_str()))
                .collect::<Vec<_>>(),
        );
        let heroes: Vec<Hero> = (0..15).map(|i| hero(&format!("{i}"), i)).collect();
        let mut board = ScoreBoard::new();
        board.sync(&heroes, &players);
        assert_eq!(board.lines().len(), MAX_LINES);
        assert_eq!(board.lines()[0].score, 14);
    }

    #[test]
    fn resync_tracks_new_scores() {
        let players = roster(&[("1", "Bob"), ("2", "Ann")]);
        let mut heroes = vec![hero("1", 0), hero("2", 0)];
        let mut board = ScoreBoard::new();
        board.sync(&heroes, &players);
        assert_eq!(board.lines()[0].name, "Bob");
        heroes[1].score = 2;
        board.sync(&heroes, &players);
        assert_eq!(board.lines()[0].name, "Ann");
        assert_eq!(board.lines()[0].score, 2);
    }
}
