//! Splits text into pieces the TTS endpoint accepts
//!
//! Pieces end at sentence or clause punctuation where possible, then at
//! whitespace, and only as a last resort in the middle of a word. Lengths are
//! counted in characters so Devanagari text is not cut mid-codepoint.

/// Characters after which a piece may end
const BREAK_AFTER: &[char] = &[
    '.', '!', '?', '।', '॥', ',', ';', ':', '\n', '—', '…', ')', ']',
];

/// Split `text` into non-empty trimmed pieces of at most `max_chars` characters
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pieces = Vec::new();

    for segment in segments(text) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        pack_segment(segment, max_chars, &mut pieces);
    }

    merge_short(pieces, max_chars)
}

/// Sentence or clause segments, punctuation kept with the preceding text
fn segments(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if BREAK_AFTER.contains(&ch) {
            let end = idx + ch.len_utf8();
            out.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Break one segment at word boundaries so no piece exceeds the limit
fn pack_segment(segment: &str, max_chars: usize, pieces: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0;

    for word in segment.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(max_chars) {
                pieces.push(part.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            pieces.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }
}

/// Join neighbouring pieces while they still fit, to keep request count low
fn merge_short(pieces: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if let Some(last) = merged.last_mut() {
            if last.chars().count() + 1 + piece.chars().count() <= max_chars {
                last.push(' ');
                last.push_str(&piece);
                continue;
            }
        }
        merged.push(piece);
    }
    merged
}
