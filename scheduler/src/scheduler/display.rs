use super::{runner::RunnerEvent, Pid, ScheduleResult, Ticks};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    fmt::Write,
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const PALETTE: [Color; 7] = [
    Color::LightBlue,
    Color::LightGreen,
    Color::Yellow,
    Color::LightRed,
    Color::LightMagenta,
    Color::LightCyan,
    Color::Blue,
];

/// Width of one tick in the Gantt bar, in terminal cells.
const TICK_WIDTH: usize = 3;

fn pid_color(pid: Pid) -> Color {
    PALETTE[(pid as usize - 1) % PALETTE.len()]
}

fn pid_list(pids: &[Pid]) -> String {
    if pids.is_empty() {
        return "-".to_owned();
    }
    pids.iter()
        .map(|pid| format!("P{pid}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, result: &ScheduleResult, tick: Ticks, paused: bool) -> Result<(), io::Error> {
        let snapshot = result.snapshot(tick);
        let makespan = result.makespan();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(5),
                    Constraint::Length(4),
                    Constraint::Min(5),
                ])
                .split(f.size());

            let status = if paused { "paused" } else { "running" };
            let header = Paragraph::new(match snapshot.running {
                Some(pid) => format!("t = {tick}/{makespan} | P{pid} on the CPU | {status}"),
                None if tick >= makespan => format!("t = {tick}/{makespan} | All processes completed."),
                None => format!("t = {tick}/{makespan} | CPU idle | {status}"),
            })
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(result.algorithm.name())
                    .border_type(BorderType::Rounded),
            );
            f.render_widget(header, chunks[0]);

            let states = Paragraph::new(vec![
                Spans::from(vec![
                    Span::styled("Ready     ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(pid_list(&snapshot.ready), Style::default().fg(Color::Yellow)),
                ]),
                Spans::from(vec![
                    Span::styled("Running   ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        pid_list(&snapshot.running.map(|pid| vec![pid]).unwrap_or_default()),
                        Style::default().fg(Color::LightGreen),
                    ),
                ]),
                Spans::from(vec![
                    Span::styled("Completed ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(pid_list(&snapshot.completed), Style::default().fg(Color::Gray)),
                ]),
            ])
            .block(Block::default().borders(Borders::ALL).title("Process States"));
            f.render_widget(states, chunks[1]);

            let mut bar = Vec::new();
            let mut axis = Vec::new();
            // Everything up to and including the current tick
            let shown = (tick + 1).min(makespan);
            for segment in result.timeline.iter().filter(|segment| segment.start < shown) {
                let end = segment.end.min(shown);
                let width = (end - segment.start) as usize * TICK_WIDTH;
                let (label, style) = match segment.pid {
                    Some(pid) => (
                        format!("P{pid}"),
                        Style::default().bg(pid_color(pid)).fg(Color::Black),
                    ),
                    None => ("idle".to_owned(), Style::default().fg(Color::DarkGray)),
                };
                bar.push(Span::styled(format!("{label:^width$}"), style));
                axis.push(Span::raw(format!("{:<width$}", segment.start)));
            }
            let gantt = Paragraph::new(vec![Spans::from(bar), Spans::from(axis)])
                .block(Block::default().borders(Borders::ALL).title("Gantt"));
            f.render_widget(gantt, chunks[2]);

            let items = result.process_table.iter().map(|row| {
                let state = result
                    .state_of(row.pid, tick)
                    .map(|state| format!("{state:?}"))
                    .unwrap_or_default();
                Row::new(vec![
                    Cell::from(format!("P{}", row.pid))
                        .style(Style::default().add_modifier(Modifier::BOLD).fg(pid_color(row.pid))),
                    Cell::from(row.arrival.to_string()),
                    Cell::from(row.burst.to_string()),
                    Cell::from(row.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".to_owned())),
                    Cell::from(row.start.to_string()),
                    Cell::from(row.end.to_string()),
                    Cell::from(row.turnaround.to_string()),
                    Cell::from(row.waiting.to_string()),
                    Cell::from(state),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID", "Arrival", "Burst", "Priority", "Start", "End", "Turnaround", "Waiting", "State",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(4),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(6),
                    Constraint::Length(6),
                    Constraint::Length(11),
                    Constraint::Length(8),
                    Constraint::Length(11),
                ])
                .block(
                    Block::default()
                        .title(format!(
                            "Avg turnaround {:.2} | Avg waiting {:.2}",
                            result.average_turnaround, result.average_waiting
                        ))
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[3]);
        })?;

        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // Get the user's input and return a matching event
        let Ok(event) = self.input_rx.recv() else {
            return RunnerEvent::Quit;
        };

        match event {
            DisplayEvent::Input(key) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') => RunnerEvent::Quit,
                KeyCode::Char('p') => RunnerEvent::Pause,
                KeyCode::Char('r') => RunnerEvent::Resume,
                KeyCode::Char('s') => RunnerEvent::Step,
                KeyCode::Char('0') => RunnerEvent::Restart,
                _ => RunnerEvent::None,
            },
            DisplayEvent::Input(_) => RunnerEvent::None,
            DisplayEvent::Tick => RunnerEvent::Tick,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Renders a finished schedule as plain text.
pub fn plain_table(result: &ScheduleResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.algorithm.name());
    if let Some(quantum) = result.quantum {
        let _ = writeln!(out, "Quantum: {quantum}");
    }
    let _ = writeln!(
        out,
        "{:>4} {:>8} {:>6} {:>9} {:>6} {:>6} {:>11} {:>8}",
        "PID", "Arrival", "Burst", "Priority", "Start", "End", "Turnaround", "Waiting"
    );
    for row in &result.process_table {
        let priority = row.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".to_owned());
        let _ = writeln!(
            out,
            "{:>4} {:>8} {:>6} {:>9} {:>6} {:>6} {:>11} {:>8}",
            format!("P{}", row.pid),
            row.arrival,
            row.burst,
            priority,
            row.start,
            row.end,
            row.turnaround,
            row.waiting
        );
    }

    let gantt: Vec<String> = result
        .timeline
        .iter()
        .map(|segment| match segment.pid {
            Some(pid) => format!("[{}-{} P{pid}]", segment.start, segment.end),
            None => format!("[{}-{} idle]", segment.start, segment.end),
        })
        .collect();
    let _ = writeln!(out, "Gantt: {}", gantt.join(" "));
    let _ = writeln!(out, "Completion order: {}", pid_list(&result.completed));
    let _ = writeln!(out, "Average turnaround: {:.2}", result.average_turnaround);
    let _ = writeln!(out, "Average waiting: {:.2}", result.average_waiting);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{simulate, Algorithm, ProcessSpec, SimulationRequest};

    #[test]
    fn plain_table_lists_rows_and_averages() {
        let result = simulate(&SimulationRequest::new(
            Algorithm::Fcfs,
            vec![ProcessSpec::new(0, 5), ProcessSpec::new(7, 3)],
        ))
        .unwrap();

        let text = plain_table(&result);
        assert!(text.starts_with("First-Come-First-Served\n"));
        assert!(text.contains("Gantt: [0-5 P1] [5-7 idle] [7-10 P2]"));
        assert!(text.contains("Completion order: P1 P2"));
        assert!(text.contains("Average waiting: 0.00"));
    }
}
