/// ASCII line renderer for terminal display
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use springmesh_core::{Camera, Mesh};

const VERTEX_GLYPH: char = 'o';

/// Draws mesh edges as character lines.
///
/// Screen points from the camera viewport are scaled onto the character
/// grid with y pointing up.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.char_buffer[row * self.width + col])
        } else {
            None
        }
    }

    /// Rasterize every edge of `mesh`; edges with an endpoint that cannot be
    /// projected are left out.
    pub fn render_mesh(&mut self, mesh: &Mesh, camera: &Camera) {
        let params = camera.params();
        let (vp_width, vp_height) = (params.viewport_width, params.viewport_height);
        let to_cell = |(x, y): (f64, f64)| {
            (
                x / vp_width * self.width as f64,
                (1.0 - y / vp_height) * self.height as f64,
            )
        };

        let mut cells = Vec::with_capacity(mesh.edge_count());
        for (a, b) in mesh.segments() {
            if let (Ok(a), Ok(b)) = (camera.project(a), camera.project(b)) {
                cells.push((to_cell(a), to_cell(b)));
            }
        }
        for &(a, b) in &cells {
            self.draw_line(a, b);
        }
        for &(a, b) in &cells {
            self.plot(a, VERTEX_GLYPH);
            self.plot(b, VERTEX_GLYPH);
        }
    }

    /// DDA line between two points in cell coordinates, clipped to the
    /// grid first so only the visible part is stepped.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let glyph = line_glyph(dx, dy);
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps == 0 {
            self.plot(from, glyph);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot((from.0 + dx * t, from.1 + dy * t), glyph);
        }
    }

    /// Liang-Barsky clip of a segment against `[0, width] x [0, height]`.
    fn clip(&self, from: (f64, f64), to: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        let bounds = [
            (-dx, from.0),
            (dx, self.width as f64 - from.0),
            (-dy, from.1),
            (dy, self.height as f64 - from.1),
        ];
        for (p, q) in bounds {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
        let (w, h) = (self.width as f64, self.height as f64);
        let at = |t: f64| ((from.0 + dx * t).clamp(0.0, w), (from.1 + dy * t).clamp(0.0, h));
        Some((at(t0), at(t1)))
    }

    fn plot(&mut self, (x, y): (f64, f64), glyph: char) {
        let (col, row) = (x.floor(), y.floor());
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.width && row < self.height {
            self.char_buffer[row * self.width + col] = glyph;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];
                let color = match c {
                    ' ' => Color::Reset,
                    VERTEX_GLYPH => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Character that best follows a line with the given cell-space slope;
/// rows grow downward.
fn line_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use springmesh_core::{Edge, Vector3, ViewParameters};

    fn row_string(r: &AsciiRenderer, row: usize) -> String {
        (0..r.width).map(|c| r.cell(c, row).unwrap()).collect()
    }

    #[test]
    fn test_horizontal_line() {
        let mut r = AsciiRenderer::new(10, 3);
        r.draw_line((1.5, 1.5), (6.5, 1.5));
        assert_eq!(row_string(&r, 1), " ------   ");
        assert_eq!(row_string(&r, 0), "          ");
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_glyph(0.0, 5.0), '|');
        assert_eq!(line_glyph(3.0, 3.0), '\\');
        assert_eq!(line_glyph(3.0, -3.0), '/');
        assert_eq!(line_glyph(-3.0, 0.5), '-');
    }

    #[test]
    fn test_offscreen_points_are_clipped() {
        let mut r = AsciiRenderer::new(4, 4);
        r.draw_line((-3.0, 1.0), (10.0, 1.0));
        assert_eq!(row_string(&r, 1), "----");
    }

    #[test]
    fn test_long_lines_keep_their_visible_part() {
        let mut r = AsciiRenderer::new(4, 4);
        r.draw_line((-5000.0, 1.0), (3.0, 1.0));
        assert_eq!(row_string(&r, 1), "----");
        r.clear();
        r.draw_line((0.5, 0.5), (1e9, 1e9));
        assert_eq!(r.cell(0, 0), Some('\\'));
        assert_eq!(r.cell(3, 3), Some('\\'));
        r.clear();
        // entirely above the grid
        r.draw_line((-1e9, -2.0), (1e9, -2.0));
        assert!((0..4).all(|row| row_string(&r, row) == "    "));
    }

    #[test]
    fn test_render_mesh_marks_vertices() {
        let target = Vector3::new(0.0, 0.0, 0.0);
        let camera = Camera::new(ViewParameters {
            target,
            ..ViewParameters::default()
        })
        .unwrap();
        let mesh = Mesh::new(
            vec![Vector3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)],
            vec![Edge::new(0, 1)],
        )
        .unwrap();

        let mut r = AsciiRenderer::new(41, 21);
        r.render_mesh(&mesh, &camera);
        let middle = row_string(&r, 10);
        assert_eq!(middle.matches('o').count(), 2);
        assert!(middle.contains("o-"));
        assert_eq!(r.cell(20, 10), Some('-'));
    }
}
