//! Triangle demo
//!
//! Opens a window and draws one colored triangle until the window is closed
//! or Escape is pressed.

use gl_engine::prelude::*;

fn main() {
    logging::init(&LoggingConfig::default());

    let logger = Logger::new("game");
    let mut game = Game::new(GlfwPlatform::new(), GameConfig::default(), logger);

    let exit_code = match game.initialize().and_then(|()| game.run()) {
        Ok(()) => game.exit_code(),
        Err(err) => {
            log::error!("Fatal: {err}");
            EXIT_FAILURE
        }
    };

    game.terminate();
    std::process::exit(exit_code);
}
