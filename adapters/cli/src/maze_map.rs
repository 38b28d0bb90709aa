//! Text map of the whole maze.

use warp_adventure_core::{Direction, MazeGraph, RoomCoord};

/// Draws every room as a two-character cell with walls between closed rooms.
///
/// `@` marks the player's room and `*` the objective room.
pub(crate) fn render_maze(maze: &MazeGraph, player: RoomCoord, objective: RoomCoord) -> String {
    let mut out = String::new();

    for y in 0..maze.rows() {
        for x in 0..maze.columns() {
            let room = RoomCoord::new(x, y);
            out.push('+');
            out.push_str(if maze.connections(room).contains(Direction::North) {
                "  "
            } else {
                "--"
            });
        }
        out.push_str("+\n");

        for x in 0..maze.columns() {
            let room = RoomCoord::new(x, y);
            out.push(if maze.connections(room).contains(Direction::West) {
                ' '
            } else {
                '|'
            });
            out.push_str(if room == player {
                "@ "
            } else if room == objective {
                "* "
            } else {
                "  "
            });
        }
        out.push_str("|\n");
    }

    for _ in 0..maze.columns() {
        out.push_str("+--");
    }
    out.push_str("+\n");
    out
}
