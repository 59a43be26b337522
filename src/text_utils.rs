use chrono::NaiveDate;

/// File name (without suffix) for a new post: `20240229_post_title_of_mine`.
pub fn post_file_stem(title: &str, date: &NaiveDate) -> String {
    let title = unidecode::unidecode(title);
    let alpha_chars: String = title.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut url = String::new();
    let mut prev_char = None;

    for c in alpha_chars.trim_matches('_').chars() {
        if c != '_' || prev_char != Some('_') {
            url.push(c);
        }
        prev_char = Some(c);
    }

    let date = date.format("%Y%m%d");

    if url.is_empty() {
        return date.to_string();
    }
    format!("{}_{}", date, url)
}

/// Splits `a, b,c` style lists given on the command line.
pub fn split_labels(labels: &[String]) -> Vec<String> {
    labels.iter()
        .flat_map(|label| label.split(','))
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}
