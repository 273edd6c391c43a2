//! Markdown scanning helpers shared by the validators.
//!
//! Deliberately line-oriented: the validators only need headings, link
//! targets, fence boundaries, and prose text, so a full markdown parser would
//! be more surface than signal. Fenced code is excluded from headings, links,
//! word counts, and prose.

/// One heading with its level and 1-based line number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeadingRecord {
    pub level: usize,
    pub text: String,
    pub line: usize,
}

/// One link target with its 1-based line number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkRef {
    pub target: String,
    pub line: usize,
}

/// Language tag of a fence-opening line, or `None` for non-fence lines.
///
/// Returns `Some("")` for a bare ` ``` ` line; callers toggle fence state on
/// every `Some`.
pub fn parse_fence_lang(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("```")?;
    Some(rest.trim())
}

/// Extract headings outside fenced code.
pub fn headings(body: &str) -> Vec<HeadingRecord> {
    let mut records = Vec::new();
    let mut in_fence = false;

    for (idx, line) in body.lines().enumerate() {
        if parse_fence_lang(line).is_some() {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some((level, text)) = parse_heading(line) {
            records.push(HeadingRecord {
                level,
                text: text.to_string(),
                line: idx + 1,
            });
        }
    }

    records
}

fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some((level, rest.trim()))
}

/// Extract `[label](target)` link targets outside fenced code, skipping image
/// embeds (`![...](...)`).
pub fn links(body: &str) -> Vec<LinkRef> {
    let mut refs = Vec::new();
    let mut in_fence = false;

    for (idx, line) in body.lines().enumerate() {
        if parse_fence_lang(line).is_some() {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        for target in link_targets(line) {
            refs.push(LinkRef {
                target,
                line: idx + 1,
            });
        }
    }

    refs
}

fn link_targets(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'[' || (i > 0 && bytes[i - 1] == b'!') {
            i += 1;
            continue;
        }
        let Some(label_end) = find_byte(bytes, b']', i + 1) else {
            break;
        };
        if bytes.get(label_end + 1) != Some(&b'(') {
            i = label_end + 1;
            continue;
        }
        let Some(target_end) = find_byte(bytes, b')', label_end + 2) else {
            break;
        };

        let mut target = line[label_end + 2..target_end].trim();
        // Drop an optional title: [x](/posts/a "title").
        if let Some((before, _)) = target.split_once(' ') {
            target = before;
        }
        out.push(target.to_string());
        i = target_end + 1;
    }

    out
}

fn find_byte(bytes: &[u8], needle: u8, start: usize) -> Option<usize> {
    bytes[start..]
        .iter()
        .position(|b| *b == needle)
        .map(|offset| start + offset)
}

/// Word count of the body with fenced code excluded.
pub fn word_count(body: &str) -> usize {
    prose(body).split_whitespace().count()
}

/// Body text with fenced code and heading lines removed, joined with spaces.
///
/// This is the text the voice and SEO checks run over.
pub fn prose(body: &str) -> String {
    let mut out = String::new();
    let mut in_fence = false;

    for line in body.lines() {
        if parse_fence_lang(line).is_some() {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || parse_heading(line).is_some() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(line.trim());
    }

    out
}

/// First non-empty prose paragraph.
pub fn first_paragraph(body: &str) -> Option<String> {
    let mut in_fence = false;
    let mut paragraph = String::new();

    for line in body.lines() {
        if parse_fence_lang(line).is_some() {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || parse_heading(line).is_some() {
            continue;
        }
        if line.trim().is_empty() {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(line.trim());
    }

    (!paragraph.is_empty()).then_some(paragraph)
}

/// Split prose into sentences on `.`, `!`, and `?` boundaries.
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let sentence = current.trim().to_string();
            if sentence.chars().any(char::is_alphanumeric) {
                out.push(sentence);
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if tail.chars().any(char::is_alphanumeric) {
        out.push(tail.to_string());
    }

    out
}

/// Line number of the first fence opened without a language tag, if any.
pub fn first_untagged_fence(body: &str) -> Option<usize> {
    let mut in_fence = false;
    for (idx, line) in body.lines().enumerate() {
        if let Some(lang) = parse_fence_lang(line) {
            if !in_fence && lang.is_empty() {
                return Some(idx + 1);
            }
            in_fence = !in_fence;
        }
    }
    None
}
