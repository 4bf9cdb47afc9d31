use crate::models::OutputTable;

/// Case-insensitive match with `*` wildcards. A pattern without `*`
/// matches any label containing it.
pub fn wildcard_match(pat: &str, text: &str) -> bool {
    let pat = pat.to_lowercase();
    let text = text.to_lowercase();
    if !pat.contains('*') {
        return text.contains(&pat);
    }

    let parts: Vec<&str> = pat.split('*').collect();
    let (first, last) = (parts[0], parts[parts.len() - 1]);
    if !text.starts_with(first) {
        return false;
    }
    let mut pos = first.len();
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() { continue; }
        match text[pos..].find(part) {
            Some(found) => pos += found + part.len(),
            None => return false,
        }
    }
    text[pos..].ends_with(last)
}

/// Channels whose label matches `pattern`, in index order.
pub fn find_outputs<'a>(table: &'a OutputTable, pattern: &str) -> Vec<(usize, &'a str)> {
    if pattern.trim().is_empty() {
        return table.iter().collect();
    }
    table.iter().filter(|(_, label)| wildcard_match(pattern, label)).collect()
}
