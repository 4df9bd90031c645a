pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Render the first mismatching line with two lines of context each side.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;
    let missing = "<missing>";
    let line = |lines: &[String], i: usize| {
        lines.get(i).map_or(missing, String::as_str).to_string()
    };
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    let Some(first) = (0..max).find(|&i| line(expected, i) != line(actual, i)) else {
        return out;
    };
    let start = first.saturating_sub(2);
    let end = (first + 3).min(max);
    let _ = writeln!(&mut out, "first mismatch at event {}:", first + 1);
    for i in start..end {
        let marker = if i == first { ">" } else { " " };
        let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", i + 1, line(expected, i));
        let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", i + 1, line(actual, i));
    }
    out
}
