use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::domain::weather::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Fixed-size character raster with per-cell colors.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, background: Rgb) -> Self {
        let width = usize::from(width);
        let height = usize::from(height);
        Self {
            width,
            height,
            cells: vec![
                Cell {
                    ch: ' ',
                    fg: background,
                    bg: background,
                };
                width * height
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    pub fn paint(&mut self, x: isize, y: isize, ch: char, fg: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (ux, uy) = (x.unsigned_abs(), y.unsigned_abs());
        if ux >= self.width || uy >= self.height {
            return;
        }
        let cell = &mut self.cells[uy * self.width + ux];
        cell.ch = ch;
        cell.fg = fg;
    }

    pub fn fill_row_bg(&mut self, y: usize, bg: Rgb) {
        if y >= self.height {
            return;
        }
        let start = y * self.width;
        for cell in &mut self.cells[start..start + self.width] {
            cell.bg = bg;
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .collect()
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            let Ok(dy) = u16::try_from(y) else { break };
            if dy >= area.height {
                break;
            }
            for (x, cell) in row.iter().enumerate() {
                let Ok(dx) = u16::try_from(x) else { break };
                if dx >= area.width {
                    break;
                }
                if let Some(target) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    target.set_char(cell.ch);
                    target.set_fg(color(cell.fg));
                    target.set_bg(color(cell.bg));
                }
            }
        }
    }
}
