//! Game phase state machine and per-tick orchestration.
//!
//! One `GameScene` is one session attempt: it owns every entity collection
//! and its own seeded RNG, so a scene plus the per-tick inputs fully
//! determines the next state. A restart discards the scene wholesale.

use crate::balance;
use crate::config::Config;
use crate::entity::{Countdown, Hero, HeroState, HeroTuning, Monster, Notif, Star};
use crate::game::validate_input;
use crate::scoreboard::ScoreBoard;
use crate::spawn::SpawnScheduler;
use glam::Vec2;
use protocol::snapshot::{
    HeroView, MonsterView, NotifKind, NotifView, SceneSnapshot, StarView,
};
use protocol::{EventError, GameStep, JoypadInput, PlayerId, PlayerInfo, StepEvent};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info};

/// Countdown length and first-spawn delay on entering the game phase.
const COUNTDOWN_START: u32 = 3;
const FIRST_SPAWN_DELAY: f64 = 3.0;

/// Outcome of one tick: step events to broadcast and inputs that were
/// rejected. A bad event is reported and dropped, never poisoning the tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<StepEvent>,
    pub rejected: Vec<EventError>,
}

/// One session's simulation state.
#[derive(Debug, Clone)]
pub struct GameScene {
    config: Config,
    rng: SmallRng,
    /// Assets gate passed; set once, before the INTRO transition.
    ready: bool,
    step: GameStep,
    start_time: Option<f64>,
    /// Scene-relative time, updated once per tick.
    time: f64,
    heroes: Vec<Hero>,
    stars: Vec<Star>,
    monsters: Vec<Monster>,
    notifs: Vec<Notif>,
    countdown: Option<Countdown>,
    spawner: Option<SpawnScheduler>,
    scoreboard: Option<ScoreBoard>,
    winner: Option<PlayerId>,
    restart_requested: bool,
}

impl GameScene {
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            ready: false,
            step: GameStep::Loading,
            start_time: None,
            time: 0.0,
            heroes: Vec::new(),
            stars: Vec::new(),
            monsters: Vec::new(),
            notifs: Vec::new(),
            countdown: None,
            spawner: None,
            scoreboard: None,
            winner: None,
            restart_requested: false,
        }
    }

    /// Advance the whole scene by one tick.
    ///
    /// `time` is the external monotonic clock; `inputs` are this tick's
    /// queued joypad events in arrival order. Entity ordering within the
    /// tick is fixed: inputs, heroes, monsters, stars, spawns, hero-star
    /// sweep, hero-monster sweep, notifications.
    pub fn update(
        &mut self,
        time: f64,
        players: &HashMap<PlayerId, PlayerInfo>,
        assets_ready: bool,
        inputs: &[(PlayerId, JoypadInput)],
    ) -> TickReport {
        let mut report = TickReport::default();
        if !self.check_ready(assets_ready, players, &mut report) {
            return report;
        }
        let start = *self.start_time.get_or_insert(time);
        self.time = time - start;

        if self.step == GameStep::Intro {
            self.reconcile_players(players, &mut report);
        }

        for (player_id, input) in inputs {
            if let Err(err) = self.apply_input(player_id, *input, players, &mut report) {
                report.rejected.push(err);
            }
        }

        self.advance_heroes();

        if self.step == GameStep::Game {
            self.advance_monsters();
            self.advance_stars();
            self.run_spawns();
            self.check_hero_star_hits(players, &mut report);
            self.check_hero_monster_hits(players);
        }

        self.advance_notifs();
        report
    }

    /// LOADING gate: transitions to INTRO exactly once when the external
    /// loader reports completion.
    fn check_ready(
        &mut self,
        assets_ready: bool,
        players: &HashMap<PlayerId, PlayerInfo>,
        report: &mut TickReport,
    ) -> bool {
        if !self.ready && assets_ready {
            self.ready = true;
            self.set_step(GameStep::Intro, players, report);
        }
        self.ready
    }

    fn set_step(
        &mut self,
        step: GameStep,
        players: &HashMap<PlayerId, PlayerInfo>,
        report: &mut TickReport,
    ) {
        if !self.ready || step == self.step {
            return;
        }
        self.step = step;
        info!(?step, "phase transition");
        match step {
            GameStep::Loading => {}
            GameStep::Intro => {
                self.reconcile_players(players, report);
            }
            GameStep::Game => {
                self.countdown = Some(Countdown::new(COUNTDOWN_START));
                self.spawner = Some(SpawnScheduler::seeded(self.time + FIRST_SPAWN_DELAY));
                let mut board = ScoreBoard::new();
                board.sync(&self.heroes, players);
                self.scoreboard = Some(board);
            }
            GameStep::Victory => {}
        }
        report.events.push(StepEvent { step });
    }

    /// Diff the hero collection against the roster. Only runs during INTRO;
    /// roster changes in other phases wait for the next INTRO.
    fn reconcile_players(
        &mut self,
        players: &HashMap<PlayerId, PlayerInfo>,
        report: &mut TickReport,
    ) {
        if self.step != GameStep::Intro {
            return;
        }
        let mut joined: Vec<&PlayerId> = players
            .keys()
            .filter(|id| !self.heroes.iter().any(|h| h.player_id == id.as_str()))
            .collect();
        // HashMap order is arbitrary; keep hero creation deterministic.
        joined.sort();
        for id in joined {
            self.add_hero(id.clone());
        }

        let before = self.heroes.len();
        self.heroes.retain(|h| players.contains_key(&h.player_id));
        if self.heroes.len() != before {
            debug!(
                removed = before - self.heroes.len(),
                "heroes left during intro"
            );
            // A departure may leave everyone remaining ready.
            self.check_all_ready(players, report);
        }
    }

    fn add_hero(&mut self, player_id: PlayerId) {
        let playground = &self.config.playground;
        let pos = Vec2::new(
            (0.25 + 0.5 * self.rng.random::<f32>()) * playground.width,
            (0.25 + 0.5 * self.rng.random::<f32>()) * playground.height,
        );
        let size = balance::hero_size(&self.config.hero, self.heroes.len() + 1);
        debug!(player = %player_id, "hero joined");
        self.heroes.push(Hero::new(player_id, pos, size));
    }

    /// Apply one joypad event. Invalid events return the error; a player
    /// without a hero (joined mid-game) is a silent no-op.
    fn apply_input(
        &mut self,
        player_id: &str,
        input: JoypadInput,
        players: &HashMap<PlayerId, PlayerInfo>,
        report: &mut TickReport,
    ) -> Result<(), EventError> {
        validate_input(players, player_id, &input)?;
        let Some(idx) = self
            .heroes
            .iter()
            .position(|h| h.player_id == player_id)
        else {
            return Ok(());
        };

        if input.dir_x.is_some() || input.dir_y.is_some() {
            let dir = Vec2::new(input.dir_x.unwrap_or(0.0), input.dir_y.unwrap_or(0.0));
            self.heroes[idx].on_direction_input(dir, self.time);
        }
        if let Some(ready) = input.ready {
            if self.step == GameStep::Intro {
                self.heroes[idx].ready = ready;
                self.check_all_ready(players, report);
            }
        }
        if input.quack.unwrap_or(false)
            && matches!(self.step, GameStep::Intro | GameStep::Game)
        {
            self.quack(idx);
        }
        if input.restart.unwrap_or(false) && self.step == GameStep::Victory {
            self.restart_requested = true;
        }
        Ok(())
    }

    fn check_all_ready(
        &mut self,
        players: &HashMap<PlayerId, PlayerInfo>,
        report: &mut TickReport,
    ) {
        if self.step != GameStep::Intro {
            return;
        }
        if !self.heroes.is_empty() && self.heroes.iter().all(|h| h.ready) {
            self.set_step(GameStep::Game, players, report);
        }
    }

    /// Shove every other hero in quack range away from the quacker.
    fn quack(&mut self, idx: usize) {
        let nb_players = self.heroes.len();
        let cooldown = self.config.hero.quack_cooldown as f64;
        let time = self.time;
        if !self.heroes[idx].try_quack(time, cooldown) {
            return;
        }
        let origin = self.heroes[idx].pos;
        let range = balance::quack_range(&self.config.hero, nb_players);
        let speed = balance::hero_max_speed(&self.config.hero, nb_players);
        debug!(player = %self.heroes[idx].player_id, "quack");
        for (j, other) in self.heroes.iter_mut().enumerate() {
            if j == idx || other.pos.distance(origin) > range {
                continue;
            }
            let dir = Vec2::new(
                if other.pos.x >= origin.x { 1.0 } else { -1.0 },
                if other.pos.y >= origin.y { 1.0 } else { -1.0 },
            );
            other.apply_impulse(dir * speed, time);
        }
    }

    fn advance_heroes(&mut self) {
        let nb_players = self.heroes.len();
        let tuning = HeroTuning {
            size: balance::hero_size(&self.config.hero, nb_players),
            max_speed: balance::hero_max_speed(&self.config.hero, nb_players),
            deceleration: balance::hero_deceleration(&self.config.hero, nb_players),
            paralysis_duration: self.config.hero.paralysis_duration as f64,
        };
        let time = self.time;
        let tick_rate = self.config.game.tick_rate;
        for i in 0..self.heroes.len() {
            // Neighbor positions include this tick's earlier updates, in
            // collection order, so the exclusion clamp is deterministic.
            let others: Vec<Vec2> = self
                .heroes
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, h)| h.pos)
                .collect();
            let playground = &self.config.playground;
            self.heroes[i].advance(time, &tuning, &others, playground, tick_rate);
        }
    }

    fn advance_monsters(&mut self) {
        let cfg = &self.config.monster;
        let field_mid_x = self.config.playground.width / 2.0;
        let tick_rate = self.config.game.tick_rate;
        let time = self.time;
        for monster in &mut self.monsters {
            monster.advance(time, cfg, field_mid_x, tick_rate);
        }
        self.monsters.retain(|m| !m.is_gone());
    }

    fn advance_stars(&mut self) {
        let speed = self.config.star.speed;
        let tick_rate = self.config.game.tick_rate;
        for star in &mut self.stars {
            star.advance(speed, tick_rate);
        }
        self.stars.retain(|s| !s.is_gone());
    }

    fn run_spawns(&mut self) {
        let Some(spawner) = self.spawner.as_mut() else {
            return;
        };
        let nb_players = self.heroes.len();
        let time = self.time;
        if let Some(star) = spawner.poll_star(
            time,
            nb_players,
            &self.config.star,
            &self.config.playground,
            &mut self.rng,
        ) {
            self.stars.push(star);
        }
        if let Some(monster) = spawner.poll_monster(
            time,
            &self.config.monster,
            &self.config.playground,
            &mut self.rng,
        ) {
            self.monsters.push(monster);
        }
    }

    fn check_hero_star_hits(
        &mut self,
        players: &HashMap<PlayerId, PlayerInfo>,
        report: &mut TickReport,
    ) {
        for i in 0..self.heroes.len() {
            if self.heroes[i].state != HeroState::Moving {
                continue;
            }
            let mut j = 0;
            while j < self.stars.len() {
                if !self.heroes[i].hit_box().overlaps(&self.stars[j].hit_box()) {
                    j += 1;
                    continue;
                }
                let star = self.stars.remove(j);
                let score = self.heroes[i].score;
                let text = if score > 0 {
                    format!("{score} + 1")
                } else {
                    "+ 1".to_string()
                };
                self.notifs.push(Notif::new(text, NotifKind::Gain, star.pos));
                self.heroes[i].on_star_hit();
                if let Some(board) = self.scoreboard.as_mut() {
                    board.sync(&self.heroes, players);
                }
                if self.heroes[i].score >= self.config.game.victory_score {
                    self.winner = Some(self.heroes[i].player_id.clone());
                    info!(player = %self.heroes[i].player_id, "victory");
                    self.set_step(GameStep::Victory, players, report);
                    return;
                }
            }
        }
    }

    fn check_hero_monster_hits(&mut self, players: &HashMap<PlayerId, PlayerInfo>) {
        let penalty = self.config.game.monster_score_penalty;
        for i in 0..self.heroes.len() {
            for j in 0..self.monsters.len() {
                if self.heroes[i].state != HeroState::Moving {
                    break;
                }
                if !self.monsters[j].attacking {
                    continue;
                }
                if !self
                    .heroes[i]
                    .hit_box()
                    .overlaps(&self.monsters[j].hit_box())
                {
                    continue;
                }
                let pos = self.heroes[i].pos;
                self.heroes[i].on_monster_hit(self.time, penalty);
                debug!(player = %self.heroes[i].player_id, "monster hit");
                if penalty {
                    self.notifs
                        .push(Notif::new("- 1".to_string(), NotifKind::Loss, pos));
                }
                if let Some(board) = self.scoreboard.as_mut() {
                    board.sync(&self.heroes, players);
                }
            }
        }
    }

    fn advance_notifs(&mut self) {
        let time = self.time;
        let tick_rate = self.config.game.tick_rate;
        for notif in &mut self.notifs {
            notif.advance(time, tick_rate);
        }
        self.notifs.retain(|n| !n.is_done(time));
        if let Some(countdown) = self.countdown.as_mut() {
            if countdown.advance(time) {
                self.countdown = None;
            }
        }
    }

    /// Renderable view of the current tick.
    pub fn snapshot(&self, players: &HashMap<PlayerId, PlayerInfo>) -> SceneSnapshot {
        SceneSnapshot {
            step: self.step,
            time: self.time,
            heroes: self
                .heroes
                .iter()
                .map(|hero| {
                    let player = players.get(&hero.player_id);
                    HeroView {
                        player_id: hero.player_id.clone(),
                        name: player.map(|p| p.name.clone()).unwrap_or_default(),
                        color: player.map(|p| p.color).unwrap_or_default(),
                        x: hero.pos.x,
                        y: hero.pos.y,
                        size: hero.size,
                        facing: hero.facing,
                        visible: hero.visible,
                        paralyzed: hero.state == HeroState::Attacked,
                        score: hero.score,
                    }
                })
                .collect(),
            stars: self
                .stars
                .iter()
                .map(|star| StarView {
                    x: star.pos.x,
                    y: star.pos.y,
                    size: star.size,
                })
                .collect(),
            monsters: self
                .monsters
                .iter()
                .map(|monster| MonsterView {
                    x: monster.pos.x,
                    y: monster.pos.y,
                    size: monster.size,
                    rotation: monster.rotation,
                    jumping: monster.attacking,
                })
                .collect(),
            notifs: self
                .notifs
                .iter()
                .map(|notif| NotifView {
                    text: notif.text.clone(),
                    kind: notif.kind,
                    x: notif.pos.x,
                    y: notif.pos.y,
                })
                .collect(),
            countdown: self.countdown.as_ref().map(|c| c.view(self.time)),
            scoreboard: self
                .scoreboard
                .as_ref()
                .map(|b| b.lines().to_vec())
                .unwrap_or_default(),
            winner: self
                .winner
                .as_ref()
                .and_then(|id| players.get(id))
                .map(|p| p.name.clone()),
        }
    }

    pub fn step(&self) -> GameStep {
        self.step
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// True once a player requested a restart during VICTORY; consumed by
    /// the facade, which replaces the scene.
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }
}
