use chessgrid::agents::{GreedyMaterialAgent, HumanAgent, SlowAgent};
use chessgrid::Game;

// ---------------------------------------------
// Main
// ---------------------------------------------

/// Interactive demo: you play White from the terminal against a greedy
/// material-counting opponent that takes half a second to "think".
fn main() {
    let mut game = Game::new(
        HumanAgent::new(),
        SlowAgent::new(GreedyMaterialAgent::new(), 500),
    );
    game.play();
}
