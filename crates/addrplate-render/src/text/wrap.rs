//! Greedy word wrap for multi-line plate blocks.

use std::collections::VecDeque;

/// A piece of a word that may start a new line. `spaced` chunks begin a word and are joined to
/// the previous chunk with a space; the rest continue a hyphenated compound.
#[derive(Debug, Clone, Copy)]
struct Chunk<'a> {
    text: &'a str,
    spaced: bool,
}

/// Packs whitespace-separated words into lines of at most `max_chars` characters.
///
/// Hyphenated compounds may break right after a hyphen that sits between two letters
/// (`Кирило-` / `Мефодіївська`). Chunks are otherwise never split: one longer than `max_chars`
/// gets a line of its own. Blank input yields no lines.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks: VecDeque<Chunk<'_>> = text.split_whitespace().flat_map(word_chunks).collect();
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    while let Some(chunk) = chunks.pop_front() {
        let chunk_len = chunk.text.chars().count();
        if cur.is_empty() {
            cur.push_str(chunk.text);
            cur_len = chunk_len;
            continue;
        }
        let gap = usize::from(chunk.spaced);
        if cur_len + gap + chunk_len <= max_chars {
            if chunk.spaced {
                cur.push(' ');
            }
            cur.push_str(chunk.text);
            cur_len += gap + chunk_len;
        } else {
            out.push(std::mem::take(&mut cur));
            chunks.push_front(chunk);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Splits `word` after every hyphen that has a letter on both sides.
fn word_chunks(word: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut iter = word.char_indices().peekable();
    while let Some((idx, ch)) = iter.next() {
        let next = iter.peek().map(|&(_, c)| c);
        if ch == '-'
            && prev.is_some_and(char::is_alphabetic)
            && next.is_some_and(char::is_alphabetic)
        {
            let end = idx + ch.len_utf8();
            out.push(Chunk {
                text: &word[start..end],
                spaced: start == 0,
            });
            start = end;
        }
        prev = Some(ch);
    }
    out.push(Chunk {
        text: &word[start..],
        spaced: start == 0,
    });
    out
}
