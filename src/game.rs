use crate::game_state::*;

/// An agent is an object that can play chess by choosing moves appropriate to a
/// current game state.
pub trait Agent {
    fn play_move(&self, state: &mut GameState);
}

pub struct Game<A1: Agent, A2: Agent> {
    white: A1,
    black: A2,
    state: GameState,
}

impl<A1: Agent, A2: Agent> Game<A1, A2> {
    pub fn new(white: A1, black: A2) -> Game<A1, A2> {
        Game {
            white,
            black,
            state: GameState::standard_setup(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Lets the two agents alternate until checkmate or stalemate, printing
    /// the position before every half-move and the verdict at the end.
    pub fn play(&mut self) {
        loop {
            println!("{}", self.state);
            if self.state.status().is_over() {
                break;
            }
            self.white.play_move(&mut self.state);

            println!("{}", self.state);
            if self.state.status().is_over() {
                break;
            }
            self.black.play_move(&mut self.state);
        }
        println!("{}", self.state.status());
    }
}
