/// Differing kinds of agents that can play the game
use crate::game::Agent;
use crate::game_state::GameState;
use crate::positions::Square;
use std::io::{stdout, Write};
use text_io::read;

pub struct HumanAgent {}

impl HumanAgent {
    pub fn new() -> Self {
        HumanAgent {}
    }
}

impl Agent for HumanAgent {
    /// Reads coordinates like "e2" / "e4" from the terminal and keeps
    /// asking until the entered move is accepted.
    fn play_move(&self, g: &mut GameState) {
        println!("Your turn: ");
        loop {
            print!("From: ");
            stdout().flush().unwrap();
            let from_raw: String = read!();
            print!("To: ");
            stdout().flush().unwrap();
            let to_raw: String = read!();

            let parsed = from_raw
                .parse::<Square>()
                .and_then(|from| to_raw.parse::<Square>().map(|to| (from, to)));
            let attempt = parsed.and_then(|(from, to)| g.attempt_move(from, to));
            match attempt {
                Ok(_) => break,
                Err(e) => println!("{}", e),
            }
        }
    }
}

pub struct RandomAgent {}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {}
    }
}

impl Agent for RandomAgent {
    fn play_move(&self, state: &mut GameState) {
        state.play_random_turn().expect("no playable moves left");
    }
}

pub struct GreedyMaterialAgent {}

impl GreedyMaterialAgent {
    pub fn new() -> Self {
        GreedyMaterialAgent {}
    }
}

impl Agent for GreedyMaterialAgent {
    /// Picks the move with the best immediate material balance, breaking
    /// ties randomly by shuffling the candidates first.
    fn play_move(&self, state: &mut GameState) {
        use rand::seq::SliceRandom;

        let mut best_move = None;
        let mut best_material_gain: i16 = i16::MIN;
        let player_color = state.current_player();
        let mut moves = state.legal_moves();
        moves.shuffle(&mut rand::thread_rng());

        for (from, to) in moves {
            let mut new_state = state.clone();
            if new_state.attempt_move(from, to).is_err() {
                continue;
            }
            let our_material = new_state.material_value(player_color);
            let enemy_material = new_state.material_value(player_color.opposite());
            let material_gain = our_material as i16 - enemy_material as i16;

            if material_gain > best_material_gain {
                best_move = Some((from, to));
                best_material_gain = material_gain;
            }
        }

        let (from, to) = best_move.expect("no moves left");
        state
            .attempt_move(from, to)
            .expect("chosen move stopped being legal");
    }
}

pub struct SlowAgent<A: Agent> {
    inner: A,
    response_time_millis: u64,
}

impl<A: Agent> SlowAgent<A> {
    pub fn new(agent: A, response_time_millis: u64) -> Self {
        SlowAgent {
            inner: agent,
            response_time_millis,
        }
    }
}

impl<A: Agent> Agent for SlowAgent<A> {
    fn play_move(&self, state: &mut GameState) {
        std::thread::sleep(std::time::Duration::from_millis(self.response_time_millis));
        self.inner.play_move(state)
    }
}
