use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use cadence::{LoopStats, Renderer, StepPolicy};

use crate::scene::BallPit;

/// Owns the terminal for the run. Raw mode, the alternate screen, mouse
/// capture and keyboard enhancement are all released in `Drop`, so every
/// exit path restores the terminal, early error returns included.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    enhanced_keys: bool,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        // Key releases need the enhancement protocol; not every terminal has it.
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            enhanced_keys,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced_keys {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            stdout,
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        );
        let _ = terminal::disable_raw_mode();
    }
}

pub struct Dashboard {
    guard: TerminalGuard,
    policy: StepPolicy,
    started: Instant,
}

impl Dashboard {
    pub fn new(policy: StepPolicy) -> io::Result<Self> {
        Ok(Self {
            guard: TerminalGuard::new()?,
            policy,
            started: Instant::now(),
        })
    }
}

impl Renderer<BallPit> for Dashboard {
    fn render(&mut self, scene: &BallPit, alpha: f32, stats: &LoopStats) {
        let policy = self.policy;
        let uptime = self.started.elapsed().as_secs();
        let result = self.guard.terminal_mut().draw(|frame| {
            draw(frame, scene, alpha, stats, &policy, uptime);
        });
        if let Err(e) = result {
            log::error!("draw failed: {}", e);
        }
    }
}

fn draw(
    frame: &mut Frame,
    scene: &BallPit,
    alpha: f32,
    stats: &LoopStats,
    policy: &StepPolicy,
    uptime_secs: u64,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], scene, stats, uptime_secs);
    render_accumulator(frame, chunks[1], alpha);
    render_scheduler(frame, chunks[2], stats, policy);
    render_balls(frame, chunks[3], scene, alpha);
    render_help(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect, scene: &BallPit, stats: &LoopStats, uptime: u64) {
    let title = format!(" Cadence Sandbox - Uptime: {} ", format_duration(uptime));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = format!(
        "Frame: {}  |  FPS: {:.0}  |  Balls: {}",
        stats.frames, stats.fps, scene.ball_count()
    );

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_accumulator(frame: &mut Frame, area: Rect, alpha: f32) {
    let block = Block::default()
        .title(" Accumulator ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let ratio = alpha.clamp(0.0, 1.0) as f64;
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!("{:.0}% of a step accrued", ratio * 100.0));

    frame.render_widget(gauge, area);
}

fn render_scheduler(frame: &mut Frame, area: Rect, stats: &LoopStats, policy: &StepPolicy) {
    let block = Block::default()
        .title(" Scheduler ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        stat_line(
            "Quantum: ",
            format!(
                "{:.2}ms (cap {} steps/frame)",
                policy.fixed_quantum() * 1000.0,
                policy.max_steps_per_frame()
            ),
        ),
        stat_line("Steps: ", format!("{}", stats.steps)),
        stat_line("Capped frames: ", format!("{}", stats.capped_frames)),
        stat_line("Sim lag: ", format!("{:.1}ms", stats.sim_lag * 1000.0)),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_balls(frame: &mut Frame, area: Rect, scene: &BallPit, alpha: f32) {
    let block = Block::default()
        .title(" Balls ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let mut lines = Vec::new();
    for (i, ball) in scene.balls().iter().enumerate() {
        let position = ball.render_position(alpha);
        let bar_len = ((position.y / 10.0).clamp(0.0, 1.0) * 24.0) as usize;
        lines.push(Line::from(vec![
            Span::styled(format!("ball {:02}  ", i), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("y {:6.2}  x {:6.2}  ", position.y, position.x),
                Style::default().fg(Color::White),
            ),
            Span::styled("█".repeat(bar_len), Style::default().fg(Color::Blue)),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "no balls - press Space",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("Space/click: drop ball  |  arrows/wasd: steer newest  |  q/Esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
