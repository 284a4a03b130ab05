use std::collections::HashMap;
use std::sync::LazyLock;

/// Canonical chess moves used as sequence digits.
///
/// The position of a move in this list is its digit value. Never reorder,
/// remove or insert entries: every sequence ever issued depends on it.
#[rustfmt::skip]
pub const CANONICAL_MOVES: [&str; 231] = [
    // Pawn moves
    "a3", "a4", "a5", "a6", "b3", "b4", "b5", "b6",
    "c3", "c4", "c5", "c6", "d3", "d4", "d5", "d6",
    "e3", "e4", "e5", "e6", "f3", "f4", "f5", "f6",
    "g3", "g4", "g5", "g6", "h3", "h4", "h5", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    // Knight moves
    "Na3", "Nc3", "Nd2", "Ne2", "Nf3", "Ng3", "Nh3", "Na6",
    "Nb4", "Nc6", "Nd7", "Ne5", "Nf6", "Ng5", "Nh4", "Nb8",
    "Nd4", "Nd5", "Ne4", "Nf4", "Ng4", "Nh5", "Na5", "Nb6",
    "Nc5", "Ne7", "Ng6", "Nh7", "Nb1", "Ng1",
    // Bishop moves
    "Bc4", "Bb5", "Ba6", "Bd3", "Be2", "Bf4", "Bg5", "Bh6",
    "Bf1", "Bg2", "Bh3", "Ba3", "Bb2", "Bc1", "Bd2", "Be3",
    "Ba7", "Bb8", "Bc8", "Bd8", "Be7", "Bf8", "Bg8", "Bh8",
    // Rook moves
    "Ra3", "Ra4", "Ra5", "Ra6", "Rd1", "Re1", "Rf1", "Rg1",
    "Rc1", "Rb1", "Rh1", "Rd3", "Re3", "Rf3", "Rg3", "Rh3",
    "Ra8", "Rb8", "Rc8", "Rd8", "Re8", "Rf8", "Rg8", "Rh8",
    // Queen moves
    "Qd4", "Qe2", "Qf3", "Qg4", "Qh4", "Qh5", "Qa4", "Qb3",
    "Qc2", "Qd3", "Qe4", "Qf5", "Qg6", "Qh7", "Qd2", "Qe3",
    "Qa5", "Qb6", "Qc7", "Qd8", "Qe8", "Qf8", "Qg8", "Qh8",
    // King moves
    "Kd2", "Ke2", "Kf1", "Kg1", "Kh1", "Kf2", "Kg2", "Kh2",
    "Kd7", "Ke7", "Kf8", "Kg8", "Kh8",
    // Castling
    "O-O", "O-O-O",
    // Captures
    "exd5", "exf5", "dxe5", "dxc5", "cxd4", "fxe5", "gxf6", "hxg5",
    "Bxf7", "Nxe5", "Nxd5", "Qxd5", "Rxe8", "Bxe6", "Nxc6", "Qxh7",
    "axb5", "bxa6", "cxb5", "Bxc6", "Rxd8", "Qxf7",
    // Checks
    "Qh4+", "Bb5+", "Nf6+", "Rd8+", "Bg5+", "Qd8+", "Rf7+", "Ne7+",
    "Bc4+", "Nc6+", "Qe7+", "Ra8+", "Bh6+", "Ng5+",
    // Promotions
    "e8=Q", "a8=Q", "h8=Q", "d8=Q", "e8=N", "a8=N", "h8=N",
    "b8=Q", "c8=Q", "f8=Q", "g8=Q",
    // Middlegame moves
    "Nf5", "Qd7", "Qe7", "Qf6", "Qg7", "Ra7", "Rb7", "Rc7",
    "Rf7", "Rg7", "Rh7", "Bb6", "Bc5", "Bd6", "Be5", "Bf6",
    "Bg7", "Nf7", "Nh6", "Qf4", "Qe5",
    // En passant
    "exd6", "dxe6", "fxe6", "exf6", "dxc6", "cxd6",
];

static CANONICAL: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(&CANONICAL_MOVES));

/// An ordered, closed set of tokens with a reverse index.
#[derive(Debug)]
pub struct Vocabulary {
    tokens: &'static [&'static str],
    index: HashMap<&'static str, usize>,
}

impl Vocabulary {
    fn new(tokens: &'static [&'static str]) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| (*token, position))
            .collect();
        Self { tokens, index }
    }

    /// The process-wide chess move vocabulary.
    pub fn canonical() -> &'static Vocabulary {
        &CANONICAL
    }

    /// Number of tokens, i.e. the numeric base of the encoding.
    pub fn base(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the token for a digit value.
    pub fn token(&self, digit: usize) -> Option<&'static str> {
        self.tokens.get(digit).copied()
    }

    /// Returns the digit value of a token. Matching is exact and case-sensitive.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn tokens(&self) -> &'static [&'static str] {
        self.tokens
    }

    /// Whether `separator` occurs inside any token.
    pub(crate) fn collides_with(&self, separator: char) -> bool {
        self.tokens.iter().any(|token| token.contains(separator))
    }
}
