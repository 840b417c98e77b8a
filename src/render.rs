//! Plain-text grid frames for the non-interactive runner.

use nu_ansi_term::Style;

use crate::engine::Turtle;
use crate::geometry::Coord;
use crate::theme::catppuccin::Mocha;

pub const MARKED: char = '#';
pub const CLEAR: char = '.';

/// Render the grid one row per line. The turtle's cell shows its heading arrow.
/// With `color`, cells are styled with ANSI escapes.
pub fn render_grid(turtle: &Turtle, color: bool) -> String {
    let pos = turtle.position();
    let mut out = String::new();

    for (y, row) in turtle.grid().rows().enumerate() {
        for (x, &marked) in row.iter().enumerate() {
            let here = Coord::new(x as i32, y as i32) == pos;
            let glyph = if here {
                turtle.heading().arrow()
            } else if marked {
                MARKED
            } else {
                CLEAR
            };

            if color {
                let style = match (here, marked) {
                    (true, true) => Style::new().fg(Mocha::GREEN).bold().underline(),
                    (true, false) => Style::new().fg(Mocha::GREEN).bold(),
                    (false, true) => Style::new().fg(Mocha::TEXT),
                    (false, false) => Style::new().fg(Mocha::SURFACE2),
                };
                out.push_str(&style.paint(glyph.to_string()).to_string());
            } else {
                out.push(glyph);
            }
        }
        out.push('\n');
    }
    out
}

/// One-line summary of the turtle state.
pub fn status_line(turtle: &Turtle) -> String {
    let next = turtle
        .peek()
        .map(|i| i.mnemonic())
        .unwrap_or("-");
    format!(
        "step {} | pos {} | heading {} | next {} | marked {}",
        turtle.steps_taken(),
        turtle.position(),
        turtle.heading(),
        next,
        turtle.grid().marked_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn renders_marks_and_turtle_arrow() {
        let program = parse("E_SET E_FWD").unwrap();
        let mut turtle = Turtle::new(Coord::new(3, 2), Coord::new(0, 1), program).unwrap();
        turtle.step().unwrap();
        turtle.step().unwrap();
        assert_eq!(render_grid(&turtle, false), "...\n#>.\n");
    }

    #[test]
    fn colored_output_keeps_glyphs() {
        let program = parse("").unwrap();
        let turtle = Turtle::new(Coord::new(2, 1), Coord::new(1, 0), program).unwrap();
        let colored = render_grid(&turtle, true);
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains('>'));
        assert!(colored.contains('.'));
    }

    #[test]
    fn status_line_names_next_instruction() {
        let program = parse("E_ROL").unwrap();
        let turtle = Turtle::new(Coord::new(2, 2), Coord::new(0, 0), program).unwrap();
        assert_eq!(
            status_line(&turtle),
            "step 0 | pos (0, 0) | heading east | next E_ROL | marked 0"
        );
    }
}
