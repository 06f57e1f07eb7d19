//! Core application loop for the maze explorer.

use std::io::{BufRead, Write};

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use tracing::{info, warn};

use crate::{
    agents::{Agent, RandomAgent, SolverAgent},
    config::{AgentKind, Config},
    events::{self, Command},
    grid::Direction,
    maze::Maze,
    session::{MoveOutcome, Session},
};

/// Whoever decides the moves of a running application.
enum Player {
    /// Moves are read line by line from the input stream.
    Human,
    /// Moves come from an automated agent.
    Automated(Box<dyn Agent>),
}

/// How a run ended.
///
/// This is returned by [`App::run`] whichever way the run stopped: the exit was reached, the input
/// ran out, the player quit or an automated agent gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Whether the exit was reached.
    pub solved: bool,
    /// Number of successful moves.
    pub steps: u32,
}

/// Application state for a single play-through.
///
/// This structure ties the configuration, the running [`Session`] and the move source together. It
/// only talks to the outside world through the reader and writer handed to [`App::run`].
pub struct App {
    /// Options the application was started with.
    config: Config,
    /// Maze being explored.
    session: Session,
    /// Source of moves.
    player: Player,
}

impl App {
    /// Builds the maze and the player described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured dimensions do not describe a valid maze.
    pub fn new(config: Config) -> Result<Self> {
        let maze = match config.seed {
            Some(seed) => Maze::from_seed(config.width, config.height, seed)?,
            None => Maze::new(config.width, config.height)?,
        };
        let player = match config.agent {
            AgentKind::Human => Player::Human,
            AgentKind::Solver => Player::Automated(Box::new(SolverAgent)),
            AgentKind::Random => {
                let rng = config
                    .seed
                    .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
                Player::Automated(Box::new(RandomAgent::new(rng)))
            }
        };

        info!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            agent = ?config.agent,
            "maze ready"
        );

        Ok(Self {
            config,
            session: Session::new(maze),
            player,
        })
    }

    /// Returns the running session.
    ///
    /// Before [`App::run`] this is the freshly built maze with the agent on the start cell; after it,
    /// the session holds the final position, step count and history.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the game until the exit is reached or the player stops.
    ///
    /// Human moves are read from `input`, one command per line; the game also stops at the end of
    /// the input. Automated agents stop after the configured maximum number of steps. A status
    /// report is written to `output` after every move.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] when reading the input or writing the output fails
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<Summary> {
        self.report(&mut output)?;

        while !self.session.is_solved() {
            let direction = match &mut self.player {
                Player::Human => {
                    let mut line = String::new();
                    if input.read_line(&mut line)? == 0 {
                        break;
                    }
                    match events::parse_command(&line) {
                        Command::Move(direction) => direction,
                        Command::Quit => break,
                        Command::Unknown => {
                            writeln!(output, "Unknown command; use w/a/s/d or q.")?;
                            continue;
                        }
                    }
                }
                Player::Automated(agent) => {
                    if self.session.steps() >= self.config.max_steps {
                        warn!(max_steps = self.config.max_steps, "agent gave up");
                        break;
                    }
                    let Some(direction) = agent.next_move(&self.session) else {
                        warn!("agent has no move left");
                        break;
                    };
                    direction
                }
            };

            match self.session.try_move(direction) {
                MoveOutcome::Blocked => {
                    writeln!(output, "A wall blocks the way {}.", direction.name())?;
                }
                MoveOutcome::Moved | MoveOutcome::Solved | MoveOutcome::AlreadySolved => {
                    self.report(&mut output)?;
                }
            }
        }

        let summary = Summary {
            solved: self.session.is_solved(),
            steps: self.session.steps(),
        };
        if summary.solved {
            writeln!(output, "Solved the maze in {} steps.", summary.steps)?;
        } else {
            writeln!(output, "Stopped after {} steps.", summary.steps)?;
        }

        Ok(summary)
    }

    /// Writes the status of the session to `output`.
    ///
    /// The block lists the position, the exit, the Manhattan distance to it, the step count and the
    /// open directions, followed by an empty line.
    fn report<W: Write>(&self, output: &mut W) -> Result<()> {
        let session = &self.session;
        let position = session.position();
        let exit = session.maze().exit();
        let moves: Vec<&str> = session
            .legal_moves()
            .into_iter()
            .map(Direction::name)
            .collect();

        writeln!(output, "Position: ({}, {})", position.x, position.y)?;
        writeln!(output, "Exit: ({}, {})", exit.x, exit.y)?;
        writeln!(
            output,
            "Manhattan distance to exit: {}",
            session.manhattan_to_exit()
        )?;
        writeln!(output, "Steps taken: {}", session.steps())?;
        writeln!(output, "Open directions: {}", moves.join(", "))?;
        writeln!(output)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: i32, height: i32, agent: AgentKind) -> Config {
        Config {
            width,
            height,
            seed: Some(7),
            agent,
            max_steps: 1_000,
        }
    }

    #[test]
    fn test_new_rejects_invalid_dimensions() {
        assert!(App::new(config(0, 3, AgentKind::Human)).is_err());
    }

    #[test]
    fn test_solver_run_reaches_exit() {
        let mut app = App::new(config(9, 9, AgentKind::Solver)).expect("valid configuration");
        let maze = app.session().maze();
        let expected = maze
            .distance(maze.start(), maze.exit())
            .expect("the exit is reachable");
        let mut output = Vec::new();

        let summary = app.run(&b""[..], &mut output).expect("in-memory io cannot fail");

        assert_eq!(
            summary,
            Summary {
                solved: true,
                steps: expected
            }
        );
        let text = String::from_utf8(output).expect("output is utf-8");
        assert!(text.ends_with(&format!("Solved the maze in {expected} steps.\n")));
    }

    #[test]
    fn test_random_run_respects_max_steps() {
        let mut app = App::new(Config {
            max_steps: 3,
            ..config(30, 30, AgentKind::Random)
        })
        .expect("valid configuration");
        let mut output = Vec::new();

        let summary = app.run(&b""[..], &mut output).expect("in-memory io cannot fail");

        assert!(summary.steps <= 3);
    }

    #[test]
    fn test_human_run_stops_at_end_of_input() {
        let mut app = App::new(config(5, 5, AgentKind::Human)).expect("valid configuration");
        let mut output = Vec::new();

        let summary = app
            .run(&b"jump\n"[..], &mut output)
            .expect("in-memory io cannot fail");

        assert_eq!(summary.steps, 0);
        let text = String::from_utf8(output).expect("output is utf-8");
        assert!(text.contains("Unknown command"));
        assert!(text.ends_with("Stopped after 0 steps.\n"));
    }

    #[test]
    fn test_human_run_follows_commands() {
        let mut app = App::new(config(6, 6, AgentKind::Human)).expect("valid configuration");
        let direction = *app
            .session()
            .legal_moves()
            .first()
            .expect("a connected maze offers a move");
        let blocked = Direction::ALL
            .into_iter()
            .find(|candidate| !app.session().legal_moves().contains(candidate));
        let mut script = String::new();
        if let Some(blocked) = blocked {
            script.push_str(blocked.name());
            script.push('\n');
        }
        script.push_str(direction.name());
        script.push_str("\nq\n");
        let mut output = Vec::new();

        let summary = app
            .run(script.as_bytes(), &mut output)
            .expect("in-memory io cannot fail");

        assert_eq!(summary.steps, 1);
        let text = String::from_utf8(output).expect("output is utf-8");
        if let Some(blocked) = blocked {
            assert!(text.contains(&format!("A wall blocks the way {}.", blocked.name())));
        }
    }
}
