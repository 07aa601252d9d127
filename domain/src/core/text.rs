//! Text helpers used when streamed content is echoed into logs.

/// Single-line preview of `s` limited to `max_chars` characters.
///
/// Newlines are flattened to spaces and an ellipsis is appended when the
/// text was cut. Counting is per `char`, so multibyte text is never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(s.len().min(max_chars * 4));
    let mut chars = s.chars();
    for _ in 0..max_chars {
        match chars.next() {
            Some('\n') | Some('\r') => out.push(' '),
            Some(c) => out.push(c),
            None => return out,
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn exact_length_has_no_ellipsis() {
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(preview("hello world", 5), "hello…");
    }

    #[test]
    fn newlines_are_flattened() {
        assert_eq!(preview("a\nb\r\nc", 10), "a b  c");
    }

    #[test]
    fn multibyte_is_cut_on_char_boundary() {
        assert_eq!(preview("あのね", 2), "あの…");
    }

    #[test]
    fn empty_input() {
        assert_eq!(preview("", 3), "");
    }
}
