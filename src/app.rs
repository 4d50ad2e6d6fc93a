//! Core application state and run loop for the simulation.

use std::sync::mpsc::{self, Receiver};

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    cli::Config,
    coordinator::{Coordinator, RoomConfig},
    events,
    grid::Grid,
    pathfinding::SearchReport,
    ui,
};

/// Event delivered from the room workers to the render loop.
///
/// This enumeration carries one completed worker pass each; the grid included is the pass's
/// rendered view per the configured render-lock mode.
#[derive(Clone, Debug)]
pub(crate) enum RoomEvent {
    /// A generation pass completed.
    Generated {
        /// Number of completed generation passes, counting from 1.
        pass: u64,
        /// The room as left by the pass.
        grid: Grid,
    },
    /// A search pass completed.
    Searched {
        /// Outcome of the pass.
        report: SearchReport,
        /// The room as left by the pass, including its transient markings.
        grid: Grid,
    },
}

/// Application state container for the simulation.
///
/// This structure holds the state from which Ratatui renders the room and to which both the
/// Crossterm events and the worker pass events are applied.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the
    /// user wants to quit the simulation but it starts off `false`.
    pub(crate) exit: bool,
    /// Validated configuration collected from the command line.
    pub(crate) config: Config,
    /// Latest room view received from either worker, if any pass completed yet.
    pub(crate) grid: Option<Grid>,
    /// Number of the latest completed generation pass.
    pub(crate) pass: u64,
    /// Latest search report, if any search pass completed yet.
    pub(crate) report: Option<SearchReport>,
}

impl App {
    /// Creates a new application around a validated configuration.
    pub fn new(config: Config) -> Self {
        Self {
            exit: false,
            config,
            grid: None,
            pass: 0,
            report: None,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function spawns the coordinator, then alternates between draining worker events,
    /// redrawing, and polling input until the user quits. It then signals the cooperative stop
    /// flag and waits for both workers to terminate before returning, after which the terminal
    /// state is restored by the call site.
    ///
    /// # Errors
    ///
    /// Returns terminal I/O errors and worker join failures.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let (sender, receiver) = mpsc::channel();
        let generated_sender = sender.clone();
        let searched_sender = sender;

        let room = Grid::new(usize::from(self.config.rows), usize::from(self.config.cols));
        let room_config = RoomConfig {
            density: self.config.density,
            generation_cadence: self.config.generation_cadence(),
            search_cadence: self.config.search_cadence(),
            render_while_locked: self.config.render_while_locked,
        };
        let coordinator = Coordinator::spawn(
            room,
            room_config,
            move |pass, grid| {
                let _ = generated_sender.send(RoomEvent::Generated {
                    pass,
                    grid: grid.clone(),
                });
            },
            move |report, grid| {
                let _ = searched_sender.send(RoomEvent::Searched {
                    report: *report,
                    grid: grid.clone(),
                });
            },
        );

        while !self.exit {
            self.drain_room_events(&receiver);
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        coordinator.stop();
        coordinator.join()?;

        Ok(())
    }

    /// Applies all pending worker pass events to the render state.
    fn drain_room_events(&mut self, receiver: &Receiver<RoomEvent>) {
        for event in receiver.try_iter() {
            match event {
                RoomEvent::Generated { pass, grid } => {
                    self.pass = pass;
                    self.grid = Some(grid);
                }
                RoomEvent::Searched { report, grid } => {
                    self.report = Some(report);
                    self.grid = Some(grid);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    /// Builds an application around the default configuration.
    fn test_app() -> App {
        App::new(Config::try_parse_from(["mazelock"]).expect("defaults are valid"))
    }

    #[test]
    fn test_new_app_has_no_room_yet() {
        let app = test_app();

        assert!(!app.exit);
        assert!(app.grid.is_none());
        assert!(app.report.is_none());
        assert_eq!(app.pass, 0);
    }

    #[test]
    fn test_drain_applies_latest_events() {
        let mut app = test_app();
        let (sender, receiver) = mpsc::channel();

        sender
            .send(RoomEvent::Generated {
                pass: 1,
                grid: Grid::new(3, 3),
            })
            .expect("receiver alive");
        sender
            .send(RoomEvent::Searched {
                report: SearchReport::NoPath,
                grid: Grid::new(3, 3),
            })
            .expect("receiver alive");
        sender
            .send(RoomEvent::Generated {
                pass: 2,
                grid: Grid::new(3, 3),
            })
            .expect("receiver alive");

        app.drain_room_events(&receiver);

        assert_eq!(app.pass, 2);
        assert_eq!(app.report, Some(SearchReport::NoPath));
        assert!(app.grid.is_some());
    }
}
