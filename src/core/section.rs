use once_cell::sync::Lazy;
use regex::Regex;

static UNIT_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[unit_(\w+)\]").unwrap());

/// Yields `(unit_name, header_line_index)` for every `[unit_<name>]` header,
/// in source order. Other headers are skipped here; the record parser stops
/// at them.
pub fn unit_sections<'a, S: AsRef<str>>(
    lines: &'a [S],
) -> impl Iterator<Item = (String, usize)> + 'a {
    lines.iter().enumerate().filter_map(|(index, line)| {
        UNIT_HEADER
            .captures(line.as_ref())
            .map(|caps| (caps[1].to_string(), index))
    })
}

/// True for any line that opens a bracketed section, unit or not.
pub fn is_section_header(line: &str) -> bool {
    line.trim_start().starts_with('[')
}
