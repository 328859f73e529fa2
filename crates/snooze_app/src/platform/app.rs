use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use snooze_core::{update, AppState, Msg};
use snooze_logging::{snooze_info, snooze_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::persistence::load_credential;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::render;
use super::logging;

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::initialize(config.log_destination);
    snooze_info!("Starting against {}", config.api.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx, &config).context("failed to start engine")?;
    let lines = spawn_stdin_reader();

    let mut shell = Shell {
        state: AppState::new(),
        runner,
        out: io::stdout(),
    };
    shell.println(HELP)?;
    shell.dispatch(Msg::AppStarted {
        stored: load_credential(&config.state_dir),
    })?;

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            shell.dispatch(msg)?;
        }

        match lines.recv_timeout(Duration::from_millis(50)) {
            Ok(line) => match parse_command(&line, &shell.state.view()) {
                Ok(Some(Command::Msg(msg))) => shell.dispatch(msg)?,
                Ok(Some(Command::Help)) => shell.println(HELP)?,
                Ok(Some(Command::Quit)) => break,
                Ok(None) => {}
                Err(err) => shell.println(&format!("! {err}"))?,
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    snooze_info!("Shutting down");
    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl Shell {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        self.runner.run(effects);

        if was_dirty {
            for line in render(&view) {
                self.println(&line)?;
            }
        }
        Ok(())
    }

    fn println(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

/// Reads stdin on its own thread so engine results keep flowing while the
/// prompt waits.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    snooze_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });
    line_rx
}
