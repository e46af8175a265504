//! Reply chunking for turn-based voice/SMS channels.
//!
//! Interpreter output regularly runs to several paragraphs; SMS and voice
//! frames do not. [`chunk`] splits a reply into bounded-length fragments,
//! preferring sentence boundaries so each frame reads as a whole thought.

/// Splits `text` into ordered chunks of at most `max_len` characters.
///
/// Sentences are accumulated greedily; a sentence that would overflow the
/// current chunk starts the next one. A single sentence longer than
/// `max_len` is hard-split into `max_len`-sized pieces. Empty input yields
/// an empty vector, and `max_len == 0` yields no chunks at all.
#[must_use]
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    if max_len == 0 {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut buf = String::new();
    let mut buf_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if sentence_len > max_len {
            if !buf.is_empty() {
                chunks.push(std::mem::take(&mut buf));
                buf_len = 0;
            }
            hard_split(&sentence, max_len, &mut chunks);
            continue;
        }

        // One joining space when appending to a non-empty buffer.
        let sep = usize::from(!buf.is_empty());
        if buf_len + sep + sentence_len > max_len {
            chunks.push(std::mem::take(&mut buf));
            buf.push_str(&sentence);
            buf_len = sentence_len;
        } else {
            if sep == 1 {
                buf.push(' ');
            }
            buf.push_str(&sentence);
            buf_len += sep + sentence_len;
        }
    }

    if !buf.is_empty() {
        chunks.push(buf);
    }
    chunks
}

/// Splits text into sentences, keeping terminal punctuation with each
/// sentence. A punctuation run (`...`, `?!`) ends a sentence only when
/// followed by whitespace or end of input, so "v1.2" stays intact.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek().is_none_or(|next| next.is_whitespace()) {
                push_trimmed(&mut sentences, &current);
                current.clear();
            }
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_owned());
    }
}

/// Fragments an oversized sentence into pieces of exactly `max_len`
/// characters (the last piece carries the remainder).
fn hard_split(sentence: &str, max_len: usize, out: &mut Vec<String>) {
    let mut piece = String::new();
    let mut count = 0usize;
    for c in sentence.chars() {
        piece.push(c);
        count += 1;
        if count == max_len {
            out.push(std::mem::take(&mut piece));
            count = 0;
        }
    }
    if !piece.is_empty() {
        out.push(piece);
    }
}
