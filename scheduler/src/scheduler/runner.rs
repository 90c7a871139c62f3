use super::{display::DisplayTerminal, ScheduleResult, Ticks};
use std::{io, time::Duration};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    Restart,
    Tick,
    None,
}

/// Replays a finished schedule tick by tick on the terminal.
pub struct ScheduleRunner<'a> {
    terminal: DisplayTerminal,
    result: &'a ScheduleResult,
    tick: Ticks,
    paused: bool,
}

impl<'a> ScheduleRunner<'a> {
    pub fn new(result: &'a ScheduleResult, tick_rate: Duration) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new(tick_rate)?;

        Ok(Self {
            terminal,
            result,
            tick: 0,
            paused: false,
        })
    }

    fn advance(&mut self) {
        if self.tick < self.result.makespan() {
            self.tick += 1;
        }
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.terminal.draw(self.result, self.tick, self.paused)?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.advance(),
            RunnerEvent::Restart => self.tick = 0,
            RunnerEvent::Tick if !self.paused => self.advance(),
            _ => {}
        }
        Ok(true)
    }
}
