use crate::chess::{Bitboard, Board, Piece, Role, Square};

const ORTHOGONAL: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ADJACENT: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The squares the piece on `whence` may move to.
///
/// Moves are generated under simplified rules: there is no notion of check,
/// so a king may walk into an attacked square or be left attacked,
/// and there is no castling, en passant or promotion.
/// An empty `whence` has no destinations.
pub fn destinations(board: &Board, whence: Square) -> Bitboard {
    let Some(piece) = board[whence] else {
        return Bitboard::empty();
    };

    match piece.role {
        Role::Pawn => pawn(board, whence, piece),
        Role::Knight => leap(board, whence, piece, &KNIGHT),
        Role::Bishop => slide(board, whence, piece, &DIAGONAL),
        Role::Rook => slide(board, whence, piece, &ORTHOGONAL),
        Role::Queen => {
            slide(board, whence, piece, &ORTHOGONAL) | slide(board, whence, piece, &DIAGONAL)
        }
        Role::King => leap(board, whence, piece, &ADJACENT),
    }
}

/// Whether `piece` may end its move on `sq`, that is the square is empty or holds an enemy.
fn is_open(board: &Board, sq: Square, piece: Piece) -> bool {
    board[sq].map_or(true, |p| p.is_enemy_of(&piece))
}

fn pawn(board: &Board, whence: Square, piece: Piece) -> Bitboard {
    let dr = piece.color.forward();
    let mut bb = Bitboard::empty();

    if let Some(one) = whence.shift(dr, 0).filter(|&sq| board[sq].is_none()) {
        bb = bb.with(one);

        if whence.row() == piece.color.pawn_row() {
            if let Some(two) = one.shift(dr, 0).filter(|&sq| board[sq].is_none()) {
                bb = bb.with(two);
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(sq) = whence.shift(dr, dc) {
            if board[sq].is_some_and(|p| p.is_enemy_of(&piece)) {
                bb = bb.with(sq);
            }
        }
    }

    bb
}

fn leap(board: &Board, whence: Square, piece: Piece, steps: &[(isize, isize)]) -> Bitboard {
    steps
        .iter()
        .filter_map(|&(dr, dc)| whence.shift(dr, dc))
        .filter(|&sq| is_open(board, sq, piece))
        .collect()
}

fn slide(board: &Board, whence: Square, piece: Piece, rays: &[(isize, isize)]) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &(dr, dc) in rays {
        let mut sq = whence;
        while let Some(next) = sq.shift(dr, dc) {
            match board[next] {
                None => bb = bb.with(next),
                Some(p) => {
                    if p.is_enemy_of(&piece) {
                        bb = bb.with(next);
                    }

                    break;
                }
            }

            sq = next;
        }
    }

    bb
}
