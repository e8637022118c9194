//! Line-safe, byte-bounded pagination of a text document.

/// Hard per-message byte budget; every page stays strictly below it.
pub const PAGE_BUDGET: usize = 1500;

/// Line-break markup the destination renders.
pub const LINE_BREAK: &str = "<br/>";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub text: String,
}

impl Page {
    pub fn title(&self, subject: &str) -> String {
        format!("{}: {}", subject, self.number)
    }
}

/// Mark every newline with the destination's break markup.
pub fn normalize(contents: &str) -> String {
    contents.replace('\n', &format!("{LINE_BREAK}\n"))
}

pub fn paginate(contents: &str) -> Vec<Page> {
    paginate_with(contents, PAGE_BUDGET)
}

/// Greedily pack whole lines into pages below `budget` bytes. A line that
/// cannot fit on a page of its own is split on character boundaries.
pub fn paginate_with(contents: &str, budget: usize) -> Vec<Page> {
    let normalized = normalize(contents);
    let mut pages = Vec::new();
    let mut current = String::new();

    for line in normalized.split_inclusive('\n') {
        for piece in split_oversized(line, budget) {
            if !current.is_empty() && current.len() + piece.len() >= budget {
                pages.push(Page { number: pages.len(), text: std::mem::take(&mut current) });
            }
            current.push_str(piece);
        }
    }
    if !current.is_empty() {
        pages.push(Page { number: pages.len(), text: current });
    }
    pages
}

// Pieces of at most `budget - 1` bytes; always at least one char each.
fn split_oversized(line: &str, budget: usize) -> Vec<&str> {
    let max = budget.saturating_sub(1).max(1);
    if line.len() <= max {
        return vec![line];
    }
    let mut pieces = Vec::new();
    let mut rest = line;
    while rest.len() > max {
        let mut cut = max;
        while !rest.is_char_boundary(cut) { cut -= 1; }
        if cut == 0 {
            cut = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}
