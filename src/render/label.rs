//! Text helpers for drawn labels.

const ELLIPSIS: char = '…';

/// Greedy word wrap into at most `max_lines` lines of about `max_chars`.
///
/// A single word longer than `max_chars` keeps its own line unbroken. When
/// words are left over, the last line is cut to `max_chars - 1` characters
/// and gets an ellipsis.
pub fn wrap_label(s: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let words: Vec<&str> = s.split_whitespace().collect();
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();

    for w in &words {
        let test = if cur.is_empty() {
            w.to_string()
        } else {
            format!("{} {}", cur, w)
        };
        if char_len(&test) <= max_chars {
            cur = test;
        } else {
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            cur = w.to_string();
            if lines.len() + 1 == max_lines {
                break;
            }
        }
        if lines.len() + 1 == max_lines && char_len(&cur) > max_chars {
            break;
        }
    }
    if !cur.is_empty() && lines.len() < max_lines {
        lines.push(cur);
    }

    let used: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
    if used < words.len() {
        if let Some(last) = lines.last_mut() {
            let keep = if char_len(last) > 1 {
                max_chars.saturating_sub(1).max(1)
            } else {
                1
            };
            let mut cut: String = last.chars().take(keep).collect();
            cut.push(ELLIPSIS);
            *last = cut;
        }
    }

    if lines.is_empty() {
        let mut cut: String = s.trim().chars().take(max_chars.saturating_sub(1)).collect();
        cut.push(ELLIPSIS);
        lines.push(cut);
    }
    lines
}

/// Escape text for XML / HTML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_label_is_one_line() {
        assert_eq!(wrap_label("Drone", 10, 2), vec!["Drone"]);
        assert_eq!(wrap_label("Hatch Normal", 12, 2), vec!["Hatch Normal"]);
    }

    #[test]
    fn two_words_split_over_two_lines() {
        assert_eq!(wrap_label("Egg (Ovomorph)", 10, 2), vec!["Egg", "(Ovomorph)"]);
    }

    #[test]
    fn leftover_words_truncate_the_last_line() {
        assert_eq!(
            wrap_label("Implantation: Facehugger + Human", 10, 2),
            vec!["Implantation:", "Facehugge…"]
        );
    }

    #[test]
    fn long_first_word_stays_whole() {
        assert_eq!(wrap_label("Bloodburster", 10, 2), vec!["Bloodburster"]);
    }

    #[test]
    fn blank_label_becomes_an_ellipsis() {
        assert_eq!(wrap_label("   ", 10, 2), vec!["…"]);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
