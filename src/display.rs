use crate::framebuffer::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use log::warn;
use std::io;
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is used by the interpreter to show the frame buffer. It should
/// abstract the implementation details, so a variety of kinds of screen would
/// work. It only ever sees complete frames, never one half-drawn.
pub trait Display {
    /// render a finished frame
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error>;
}

// store useful metadata about the terminal canvas
struct Resolution(usize, usize);

impl Resolution {
    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// canvas coordinates of each lit pixel; y grows downwards on the
    /// CHIP-8 but upwards on the canvas
    fn points_from_frame(&self, frame: &FrameBuffer) -> Vec<(f64, f64)> {
        frame
            .lit_pixels()
            .map(|(x, y)| (x as f64, -1.0 * y as f64))
            .collect()
    }
}

/// monochrome display in a terminal, rendered using TUI and crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            warn!("couldn't restore the terminal: {}", e);
        }
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        render(&mut self.terminal, &self.resolution, frame)
    }
}

/// Paint `frame` as a bordered canvas. This assumes a 1:1 ratio between
/// terminal cells and chip-8 pixels; a terminal smaller than that only
/// shows the top-left part.
fn render<B: Backend>(
    terminal: &mut Terminal<B>,
    resolution: &Resolution,
    frame: &FrameBuffer,
) -> Result<(), io::Error> {
    let lit = resolution.points_from_frame(frame);

    terminal.draw(|f| {
        let wanted = Rect::new(0, 0, 2 + resolution.0 as u16, 2 + resolution.1 as u16);
        let area = wanted.intersection(f.size());

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .title("CHIP-8")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black)),
            )
            .x_bounds(resolution.x_bounds())
            .y_bounds(resolution.y_bounds())
            .marker(Marker::Block)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &lit,
                    color: Color::White,
                });
            });
        f.render_widget(canvas, area);
    })?;
    Ok(())
}

/// useful for testing non-display routines; remembers what it was given
#[derive(Default)]
pub struct DummyDisplay {
    pub frames_drawn: usize,
    pub last_frame: Option<FrameBuffer>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        self.frames_drawn += 1;
        self.last_frame = Some(*frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui::backend::TestBackend;

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_blank_frame_has_no_points() {
        let r = Resolution(64, 32);
        assert!(r.points_from_frame(&FrameBuffer::new()).is_empty());
    }

    #[test]
    fn test_points_flip_y() {
        let r = Resolution(64, 32);
        let mut frame = FrameBuffer::new();
        frame.set_pixel(5, 3, true);
        frame.set_pixel(63, 31, true);
        assert_eq!(
            r.points_from_frame(&frame),
            vec![(5.0, -3.0), (63.0, -31.0)]
        );
    }

    fn full_frame() -> FrameBuffer {
        let mut frame = FrameBuffer::new();
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                frame.set_pixel(x, y, true);
            }
        }
        frame
    }

    #[test]
    fn test_render_into_default_size_terminal() -> Result<(), io::Error> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        render(&mut terminal, &Resolution(64, 32), &full_frame())
    }

    #[test]
    fn test_render_into_tiny_terminal() -> Result<(), io::Error> {
        let mut terminal = Terminal::new(TestBackend::new(10, 3))?;
        render(&mut terminal, &Resolution(64, 32), &full_frame())
    }

    #[test]
    fn test_render_into_large_terminal() -> Result<(), io::Error> {
        let mut terminal = Terminal::new(TestBackend::new(100, 40))?;
        render(&mut terminal, &Resolution(64, 32), &full_frame())
    }

    #[test]
    fn test_dummy_display_keeps_last_frame() -> Result<(), io::Error> {
        let mut d = DummyDisplay::new();
        let mut frame = FrameBuffer::new();
        frame.set_pixel(1, 1, true);
        d.draw(&frame)?;
        assert_eq!(d.frames_drawn, 1);
        assert_eq!(d.last_frame, Some(frame));
        Ok(())
    }
}
