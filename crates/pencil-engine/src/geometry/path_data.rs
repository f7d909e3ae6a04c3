//! SVG path-data (`d` attribute) parser.
//!
//! Supports the full command set (`M L H V C S Q T A Z`, absolute and
//! relative), implicit command repetition, and the compact number syntax
//! (`1-2`, `.5.5`, `1e-3`, concatenated arc flags). Arcs are converted to
//! quadratic béziers by lyon; the result is a plain `lyon::path::Path`.

use lyon::geom::{ArcFlags, QuadraticBezierSegment, SvgArc};
use lyon::math::{point, vector, Angle, Point};
use lyon::path::Path;
use thiserror::Error;

/// Why a path-data string could not be parsed. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathDataError {
    #[error("path data must start with a moveto, found '{found}' at {pos}")]
    MissingMoveTo { found: char, pos: usize },
    #[error("unexpected character '{found}' at {pos}")]
    UnexpectedChar { found: char, pos: usize },
    #[error("expected a number for '{command}' at {pos}")]
    ExpectedNumber { command: char, pos: usize },
    #[error("expected an arc flag (0 or 1) at {pos}")]
    InvalidFlag { pos: usize },
}

/// Parse path data into a lyon path. An empty string yields an empty path.
pub fn parse_path_data(d: &str) -> Result<Path, PathDataError> {
    let mut parser = PathDataParser::new(d);
    parser.run()?;
    Ok(parser.build())
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Begin(Point),
    Line(Point),
    Quadratic(Point, Point),
    Cubic(Point, Point, Point),
    End { close: bool },
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn skip_separators(&mut self) {
        while self.pos < self.data.len()
            && (self.data[self.pos].is_ascii_whitespace() || self.data[self.pos] == b',')
        {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn eat_digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn number(&mut self, command: char) -> Result<f32, PathDataError> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits |= self.eat_digits();
        }
        if !digits {
            self.pos = start;
            return Err(PathDataError::ExpectedNumber { command, pos: start });
        }

        // Exponent only counts when digits follow; "1e" leaves the 'e' alone.
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            if !self.eat_digits() {
                self.pos = mark;
            }
        }

        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .ok_or(PathDataError::ExpectedNumber { command, pos: start })
    }

    fn flag(&mut self) -> Result<bool, PathDataError> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(PathDataError::InvalidFlag { pos: self.pos }),
        }
    }
}

struct PathDataParser<'a> {
    cursor: Cursor<'a>,
    segments: Vec<Segment>,
    current: Point,
    subpath_start: Point,
    open: bool,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl<'a> PathDataParser<'a> {
    fn new(d: &'a str) -> Self {
        Self {
            cursor: Cursor { data: d.as_bytes(), pos: 0 },
            segments: Vec::new(),
            current: point(0.0, 0.0),
            subpath_start: point(0.0, 0.0),
            open: false,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
        }
    }

    fn run(&mut self) -> Result<(), PathDataError> {
        let mut previous: Option<u8> = None;

        loop {
            self.cursor.skip_separators();
            let Some(byte) = self.cursor.peek() else {
                break;
            };
            let pos = self.cursor.pos;

            let command = if byte.is_ascii_alphabetic() {
                self.cursor.pos += 1;
                byte
            } else {
                // Extra coordinates repeat the previous command; after a
                // moveto they are linetos.
                match previous {
                    Some(b'M') => b'L',
                    Some(b'm') => b'l',
                    Some(c) if !matches!(c, b'Z' | b'z') => c,
                    _ => {
                        return Err(PathDataError::UnexpectedChar { found: byte as char, pos });
                    }
                }
            };

            if previous.is_none() && !matches!(command, b'M' | b'm') {
                return Err(PathDataError::MissingMoveTo { found: command as char, pos });
            }

            self.apply(command, pos)?;
            previous = Some(command);
        }

        Ok(())
    }

    fn read_point(&mut self, command: char, relative: bool) -> Result<Point, PathDataError> {
        let x = self.cursor.number(command)?;
        let y = self.cursor.number(command)?;
        Ok(if relative {
            point(self.current.x + x, self.current.y + y)
        } else {
            point(x, y)
        })
    }

    fn apply(&mut self, command: u8, pos: usize) -> Result<(), PathDataError> {
        let relative = command.is_ascii_lowercase();
        let name = command as char;

        match command.to_ascii_uppercase() {
            b'M' => {
                let to = self.read_point(name, relative)?;
                self.move_to(to);
            }
            b'L' => {
                let to = self.read_point(name, relative)?;
                self.line_to(to);
            }
            b'H' => {
                let x = self.cursor.number(name)?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(point(x, self.current.y));
            }
            b'V' => {
                let y = self.cursor.number(name)?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(point(self.current.x, y));
            }
            b'C' => {
                let ctrl1 = self.read_point(name, relative)?;
                let ctrl2 = self.read_point(name, relative)?;
                let to = self.read_point(name, relative)?;
                self.cubic_to(ctrl1, ctrl2, to);
            }
            b'S' => {
                let ctrl1 = self.reflect(self.last_cubic_ctrl);
                let ctrl2 = self.read_point(name, relative)?;
                let to = self.read_point(name, relative)?;
                self.cubic_to(ctrl1, ctrl2, to);
            }
            b'Q' => {
                let ctrl = self.read_point(name, relative)?;
                let to = self.read_point(name, relative)?;
                self.quadratic_to(ctrl, to);
            }
            b'T' => {
                let ctrl = self.reflect(self.last_quad_ctrl);
                let to = self.read_point(name, relative)?;
                self.quadratic_to(ctrl, to);
            }
            b'A' => {
                let rx = self.cursor.number(name)?;
                let ry = self.cursor.number(name)?;
                let rotation = self.cursor.number(name)?;
                let large_arc = self.cursor.flag()?;
                let sweep = self.cursor.flag()?;
                let to = self.read_point(name, relative)?;
                self.arc_to(rx, ry, rotation, ArcFlags { large_arc, sweep }, to);
            }
            b'Z' => self.close(),
            _ => return Err(PathDataError::UnexpectedChar { found: name, pos }),
        }

        Ok(())
    }

    fn reflect(&self, ctrl: Option<Point>) -> Point {
        match ctrl {
            Some(c) => point(2.0 * self.current.x - c.x, 2.0 * self.current.y - c.y),
            None => self.current,
        }
    }

    fn ensure_open(&mut self) {
        if !self.open {
            self.segments.push(Segment::Begin(self.current));
            self.subpath_start = self.current;
            self.open = true;
        }
    }

    fn move_to(&mut self, to: Point) {
        if self.open {
            self.segments.push(Segment::End { close: false });
        }
        self.segments.push(Segment::Begin(to));
        self.current = to;
        self.subpath_start = to;
        self.open = true;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
    }

    fn line_to(&mut self, to: Point) {
        self.ensure_open();
        self.segments.push(Segment::Line(to));
        self.current = to;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.ensure_open();
        self.segments.push(Segment::Cubic(ctrl1, ctrl2, to));
        self.current = to;
        self.last_cubic_ctrl = Some(ctrl2);
        self.last_quad_ctrl = None;
    }

    fn quadratic_to(&mut self, ctrl: Point, to: Point) {
        self.ensure_open();
        self.segments.push(Segment::Quadratic(ctrl, to));
        self.current = to;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = Some(ctrl);
    }

    fn arc_to(&mut self, rx: f32, ry: f32, rotation: f32, flags: ArcFlags, to: Point) {
        if to == self.current {
            // Zero-length arcs are omitted.
            self.last_cubic_ctrl = None;
            self.last_quad_ctrl = None;
            return;
        }
        if rx == 0.0 || ry == 0.0 {
            self.line_to(to);
            return;
        }

        self.ensure_open();
        let arc = SvgArc {
            from: self.current,
            to,
            radii: vector(rx.abs(), ry.abs()),
            x_rotation: Angle::degrees(rotation),
            flags,
        };
        let segments = &mut self.segments;
        arc.for_each_quadratic_bezier(&mut |q: &QuadraticBezierSegment<f32>| {
            segments.push(Segment::Quadratic(q.ctrl, q.to));
        });

        self.current = to;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
    }

    fn close(&mut self) {
        if self.open {
            self.segments.push(Segment::End { close: true });
            self.open = false;
        }
        self.current = self.subpath_start;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
    }

    fn build(self) -> Path {
        let mut builder = Path::builder();
        for segment in self.segments {
            match segment {
                Segment::Begin(at) => {
                    builder.begin(at);
                }
                Segment::Line(to) => {
                    builder.line_to(to);
                }
                Segment::Quadratic(ctrl, to) => {
                    builder.quadratic_bezier_to(ctrl, to);
                }
                Segment::Cubic(ctrl1, ctrl2, to) => {
                    builder.cubic_bezier_to(ctrl1, ctrl2, to);
                }
                Segment::End { close } => builder.end(close),
            }
        }
        if self.open {
            builder.end(false);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::path::PathEvent;

    fn events(d: &str) -> Vec<PathEvent> {
        parse_path_data(d).expect("valid path data").iter().collect()
    }

    #[test]
    fn absolute_lines_and_close() {
        let ev = events("M0,0 L10,0 L10,10 Z");
        assert_eq!(ev.len(), 4);
        assert!(matches!(ev[0], PathEvent::Begin { at } if at == point(0.0, 0.0)));
        assert!(matches!(ev[3], PathEvent::End { close: true, .. }));
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        let ev = events("m 5 5 10 0 0 10");
        // Begin, two lines, end
        assert_eq!(ev.len(), 4);
        match ev[2] {
            PathEvent::Line { from, to } => {
                assert_eq!(from, point(15.0, 5.0));
                assert_eq!(to, point(15.0, 15.0));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn compact_numbers() {
        let ev = events("M.5.5L-1-2l1e1,0");
        match ev[2] {
            PathEvent::Line { from, to } => {
                assert_eq!(from, point(-1.0, -2.0));
                assert_eq!(to, point(9.0, -2.0));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn horizontal_and_vertical() {
        let ev = events("M1 1 H 5 v 3 h -2 V 0");
        let ends: Vec<_> = ev
            .iter()
            .filter_map(|e| match e {
                PathEvent::Line { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(
            ends,
            vec![point(5.0, 1.0), point(5.0, 4.0), point(3.0, 4.0), point(3.0, 0.0)]
        );
    }

    #[test]
    fn smooth_cubic_reflects_control() {
        let ev = events("M0 0 C 0 10 10 10 10 0 S 20 -10 20 0");
        match ev[2] {
            PathEvent::Cubic { ctrl1, .. } => assert_eq!(ctrl1, point(10.0, -10.0)),
            other => panic!("expected a cubic, got {other:?}"),
        }
    }

    #[test]
    fn arc_with_concatenated_flags() {
        let path = parse_path_data("M0 0 a10 10 0 0110 10").unwrap();
        let last = path.iter().filter_map(|e| match e {
            PathEvent::Quadratic { to, .. } => Some(to),
            _ => None,
        }).last();
        let last = last.expect("arc produced curves");
        assert!((last.x - 10.0).abs() < 1e-3);
        assert!((last.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn drawing_after_close_starts_new_subpath() {
        let ev = events("M0 0 L4 0 Z L0 4");
        let begins = ev.iter().filter(|e| matches!(e, PathEvent::Begin { .. })).count();
        assert_eq!(begins, 2);
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert!(events("").is_empty());
        assert!(events("   ").is_empty());
    }

    #[test]
    fn rejects_missing_moveto() {
        assert!(matches!(
            parse_path_data("L 1 1"),
            Err(PathDataError::MissingMoveTo { found: 'L', pos: 0 })
        ));
    }

    #[test]
    fn rejects_missing_number() {
        assert!(matches!(
            parse_path_data("M 1"),
            Err(PathDataError::ExpectedNumber { command: 'M', .. })
        ));
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(matches!(
            parse_path_data("M0 0 X 1 1"),
            Err(PathDataError::UnexpectedChar { found: 'X', .. })
        ));
    }

    #[test]
    fn rejects_bad_arc_flag() {
        assert!(matches!(
            parse_path_data("M0 0 A 5 5 0 2 0 10 10"),
            Err(PathDataError::InvalidFlag { .. })
        ));
    }
}
