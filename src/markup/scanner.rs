//! Subscript/superscript marker rendering.
//!
//! Curated text uses `>` and `<` as informal span markers: `">x<"`
//! marks `x` as a subscript and `"<x>"` marks it as a superscript. This
//! scanner converts those spans to paired `<SUB>`/`<SUP>` tags and
//! escapes every marker that never finds its partner, so no raw bracket
//! survives in the output.

const SUB_OPEN: &str = "<SUB>";
const SUB_CLOSE: &str = "</SUB>";
const SUP_OPEN: &str = "<SUP>";
const SUP_CLOSE: &str = "</SUP>";
const LT: &str = "&lt;";
const GT: &str = "&gt;";

/// One unit of scanner output. Marker characters start life as `Text`
/// and are rewritten to `Markup` once their fate is known.
enum Piece {
    Text(char),
    Markup(&'static str),
    /// Boundary between input pieces; invisible to marker matching.
    Break,
}

/// Single-pass scan state: at most one unmatched marker of each kind is
/// remembered, by its index into the output.
struct Scanner {
    out: Vec<Piece>,
    pending_open: Option<usize>,
    pending_close: Option<usize>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            out: Vec::new(),
            pending_open: None,
            pending_close: None,
        }
    }

    fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '<' => self.open_marker(),
                '>' => self.close_marker(),
                other => self.out.push(Piece::Text(other)),
            }
        }
    }

    /// A `<` closes a pending `>` into a subscript span, otherwise it
    /// becomes the new pending `<` (escaping any it displaces).
    fn open_marker(&mut self) {
        if let Some(start) = self.pending_close.take() {
            self.out[start] = Piece::Markup(SUB_OPEN);
            self.out.push(Piece::Markup(SUB_CLOSE));
        } else {
            if let Some(stale) = self.pending_open.replace(self.out.len()) {
                self.out[stale] = Piece::Markup(LT);
            }
            self.out.push(Piece::Text('<'));
        }
    }

    /// A `>` closes a pending `<` into a superscript span, otherwise it
    /// becomes the new pending `>` (escaping any it displaces).
    fn close_marker(&mut self) {
        if let Some(start) = self.pending_open.take() {
            self.out[start] = Piece::Markup(SUP_OPEN);
            self.out.push(Piece::Markup(SUP_CLOSE));
        } else {
            if let Some(stale) = self.pending_close.replace(self.out.len()) {
                self.out[stale] = Piece::Markup(GT);
            }
            self.out.push(Piece::Text('>'));
        }
    }

    fn piece_break(&mut self) {
        self.out.push(Piece::Break);
    }

    /// Escape whatever is still pending at end of input.
    fn finish(mut self) -> Vec<Piece> {
        if let Some(idx) = self.pending_open.take() {
            self.out[idx] = Piece::Markup(LT);
        }
        if let Some(idx) = self.pending_close.take() {
            self.out[idx] = Piece::Markup(GT);
        }
        self.out
    }
}

/// Render subscript/superscript markers in `text`.
///
/// Pure function of its input; text without markers comes back
/// unchanged.
///
/// ```
/// use web_support::markup::sub_sup;
///
/// assert_eq!(sub_sup("Do >subscript< here"), "Do <SUB>subscript</SUB> here");
/// assert_eq!(sub_sup("and <super> too"), "and <SUP>super</SUP> too");
/// ```
pub fn sub_sup(text: &str) -> String {
    let mut scanner = Scanner::new();
    scanner.feed(text);
    let mut rendered = String::with_capacity(text.len());
    for piece in scanner.finish() {
        match piece {
            Piece::Text(ch) => rendered.push(ch),
            Piece::Markup(tag) => rendered.push_str(tag),
            Piece::Break => {}
        }
    }
    rendered
}

/// Render markers across a list of strings as if they were one text.
///
/// Equivalent to joining the pieces with a delimiter absent from all of
/// them, rendering, and splitting again: markers pair up across piece
/// boundaries, and exactly `pieces.len()` strings come back.
pub fn sub_sup_lines<S: AsRef<str>>(pieces: &[S]) -> Vec<String> {
    if pieces.is_empty() {
        return Vec::new();
    }

    let mut scanner = Scanner::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            scanner.piece_break();
        }
        scanner.feed(piece.as_ref());
    }

    let mut lines = Vec::with_capacity(pieces.len());
    let mut current = String::new();
    for piece in scanner.finish() {
        match piece {
            Piece::Text(ch) => current.push(ch),
            Piece::Markup(tag) => current.push_str(tag),
            Piece::Break => lines.push(std::mem::take(&mut current)),
        }
    }
    lines.push(current);
    lines
}
