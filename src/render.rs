use crate::types::{CutPlacement, StockPlan};
use crate::units::format_dimension;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;
const BAR_WIDTH: usize = 60;

/// ASCII drawing of a sheet plan, scaled to fit 80x40 characters.
pub fn render_sheet(plan: &StockPlan) -> String {
    let stock = plan.stock.rect();
    if stock.length <= 0.0 || stock.width <= 0.0 {
        return String::new();
    }

    let scale = f64::min(MAX_WIDTH / stock.length, MAX_HEIGHT / stock.width);
    let grid_w = (stock.length * scale).round() as usize;
    let grid_h = (stock.width * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    // Draw stock border first
    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for cut in &plan.cuts {
        let CutPlacement::Sheet {
            length,
            width,
            x,
            y,
            ..
        } = cut.placement
        else {
            continue;
        };
        let sx = (x * scale).round() as usize;
        let sy = (y * scale).round() as usize;
        let sw = (length * scale).round() as usize;
        let sh = (width * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        // Label
        let label = format!("{}x{}", format_dimension(length), format_dimension(width));
        let label_chars: Vec<char> = label.chars().collect();

        if sw > 2 && sh > 0 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let half = label_chars.len() / 2;
            let start_x = cx.saturating_sub(half);

            for (i, &ch) in label_chars.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

/// One-line bar of a linear plan: a `=` segment per cut, `|` between cuts,
/// `.` for the offcut.
pub fn render_linear(plan: &StockPlan) -> String {
    let stock = plan.stock_length();
    if stock <= 0.0 {
        return String::new();
    }

    let scale = BAR_WIDTH as f64 / stock;
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    let mut used = 0;
    bar.push('[');
    for (i, cut) in plan.cuts.iter().enumerate() {
        if i > 0 && used < BAR_WIDTH {
            bar.push('|');
            used += 1;
        }
        let cells = ((cut.placement.length() * scale).round() as usize)
            .max(1)
            .min(BAR_WIDTH - used);
        bar.extend(std::iter::repeat_n('=', cells));
        used += cells;
    }
    bar.extend(std::iter::repeat_n('.', BAR_WIDTH - used));
    bar.push(']');
    bar.push('\n');
    bar
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    // Horizontal edges
    for i in x..=x + w {
        if i < cols {
            if y < rows {
                grid[y][i] = if grid[y][i] == '|' || grid[y][i] == '+' {
                    '+'
                } else {
                    '-'
                };
            }
            if y + h < rows {
                grid[y + h][i] = if grid[y + h][i] == '|' || grid[y + h][i] == '+' {
                    '+'
                } else {
                    '-'
                };
            }
        }
    }

    // Vertical edges
    for j in y..=y + h {
        if j < rows {
            if x < cols {
                grid[j][x] = if grid[j][x] == '-' || grid[j][x] == '+' {
                    '+'
                } else {
                    '|'
                };
            }
            if x + w < cols {
                grid[j][x + w] = if grid[j][x + w] == '-' || grid[j][x + w] == '+' {
                    '+'
                } else {
                    '|'
                };
            }
        }
    }

    // Corners
    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
