use std::io::{self, Write};

use ottsweeper_core::{CellIndex, GameState, Snapshot, VisibleKind};

/// Glyph per tile-sheet slot, see [`VisibleKind::sprite_index`].
const GLYPHS: [char; 15] = [
    '.', '1', '2', '3', '4', '5', '6', '7', '8', '*', 'X', '!', '#', 'F', '?',
];

pub(crate) fn glyph(kind: VisibleKind) -> char {
    GLYPHS[usize::from(kind.sprite_index())]
}

const fn face(state: GameState) -> &'static str {
    match state {
        GameState::Normal => ":)",
        GameState::Loss => "X(",
        GameState::Win => "B)",
    }
}

/// Three-digit display counter, clamped like a seven-segment panel.
fn counter(value: i64) -> String {
    format!("{:03}", value.clamp(-99, 999))
}

/// Draws the header and grid. Covered cells listed in `pressed` are drawn as if held down.
pub(crate) fn draw<W: Write>(
    snapshot: &Snapshot,
    pressed: &[CellIndex],
    out: &mut W,
) -> io::Result<()> {
    let (width, _) = snapshot.size;

    writeln!(
        out,
        "[{}]  {}  [{}]",
        counter(snapshot.mines_left),
        face(snapshot.state),
        counter(snapshot.time.as_secs().try_into().unwrap_or(i64::MAX)),
    )?;

    write!(out, "   ")?;
    for x in 0..width {
        write!(out, "{}", x % 10)?;
    }
    writeln!(out)?;

    for (y, row) in snapshot.rows().enumerate() {
        write!(out, "{:>2} ", y)?;
        for (x, &kind) in row.iter().enumerate() {
            let index = y * usize::from(width) + x;
            let kind = match kind {
                VisibleKind::Covered | VisibleKind::Unknown if pressed.contains(&index) => {
                    VisibleKind::Revealed(0)
                }
                kind => kind,
            };
            write!(out, "{}", glyph(kind))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
