/// Find the first TLE in a CelesTrak text response.
///
/// Returns the optional object name line and the two element lines. A `1 ` line
/// only counts when the very next non-empty line starts with `2 `.
pub fn parse_first_tle(content: &str) -> Option<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    for i in 0..lines.len() {
        if !lines[i].starts_with("1 ") {
            continue;
        }
        if i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            let name = i
                .checked_sub(1)
                .map(|p| lines[p])
                .filter(|l| !l.starts_with("1 ") && !l.starts_with("2 "))
                .map(String::from);
            return Some((name, lines[i].to_string(), lines[i + 1].to_string()));
        }
    }

    None
}
