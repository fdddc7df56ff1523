//! Reusable label-cleaning primitives shared by the agency pipelines.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Locale;
use super::pattern::{PatternRule, replace_each};

static SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*/\s*").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

// Greedy prefix: only the last "vers" / "à destination de" counts.
static KEEP_TO_FR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:.*\s)?(?:vers|à destination de)\s+(\S.*)$").expect("valid regex")
});

static SAINT: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::literal(r"(?i)\bste\b\.?", "Sainte"),
        PatternRule::literal(r"(?i)\bst\b\.?", "Saint"),
    ]
});

static BOUND_PHRASES_FR: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::literal(r"(?i)\(\s*direction\s+(nord|sud|est|ouest)\s*\)", "$1"),
        PatternRule::literal(r"(?i)\bdirection\s+(nord|sud|est|ouest)\b", "$1"),
    ]
});

// Hyphenated place names ("Laval-Ouest") are not bounds.
static BOUND_WORDS_FR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|[\s(])(nord|sud|est|ouest)\b([^-]|$)").expect("valid regex")
});

static STREET_TYPES_FR_CA: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::literal(r"(?i)\b(?:av|ave)\b\.?", "Avenue"),
        PatternRule::literal(r"(?i)\b(?:boul|boulv|bd|blvd)\b\.?", "Boulevard"),
        PatternRule::literal(r"(?i)\bch\b\.?", "Chemin"),
        PatternRule::literal(r"(?i)\b(?:mtée|mtee|mte)\b\.?", "Montée"),
        PatternRule::literal(r"(?i)\bpl\b\.?", "Place"),
        PatternRule::literal(r"(?i)\bprom\b\.?", "Promenade"),
        PatternRule::literal(r"(?i)\brte\b\.?", "Route"),
        PatternRule::literal(r"(?i)\bterr\b\.?", "Terrasse"),
        PatternRule::literal(r"(?i)\bcrois\b\.?", "Croissant"),
        PatternRule::literal(r"(?i)\brg\b\.?", "Rang"),
        PatternRule::literal(r"(?i)\baut\b\.?", "Autoroute"),
    ]
});

static ET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bet\b").expect("valid regex"));

const FUNCTION_WORDS_FR: &[&str] = &[
    "à", "au", "aux", "de", "des", "du", "en", "et", "la", "le", "les", "par", "pour", "sous",
    "sur", "vers",
];

const FUNCTION_WORDS_EN: &[&str] = &[
    "and", "at", "by", "for", "in", "of", "on", "the", "to",
];

/// Trims and turns every whitespace run (tabs, newlines, `\u{a0}`) into one
/// ASCII space, the only separator the phrase patterns expect.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// `"A/B"`, `"A  /B"` → `"A / B"`.
pub fn clean_slashes(text: &str) -> String {
    SLASHES.replace_all(text, " / ").into_owned()
}

/// Keeps the destination of `"X vers Y"` / `"X à destination de Y"`.
pub fn keep_to_fr(text: &str) -> String {
    KEEP_TO_FR.replace(text, "$1").into_owned()
}

/// `St` / `Ste` (optionally dotted) → `Saint` / `Sainte`.
pub fn clean_saint(text: &str) -> String {
    replace_each(text, &SAINT)
}

/// `"(direction Nord)"`, `"direction nord"`, `"Nord"` → `"N"`; `Ouest` is `O`.
pub fn clean_bounds_fr(text: &str) -> String {
    let mut current = replace_each(text, &BOUND_PHRASES_FR);
    // Matches consume their neighbours, so adjacent bounds need another pass.
    while BOUND_WORDS_FR.is_match(&current) {
        current = BOUND_WORDS_FR
            .replace_all(&current, |caps: &Captures<'_>| {
                let bound = match caps[2].to_lowercase().as_str() {
                    "nord" => "N",
                    "sud" => "S",
                    "est" => "E",
                    _ => "O",
                };
                format!("{}{bound}{}", &caps[1], &caps[3])
            })
            .into_owned();
    }
    current
}

/// Expands French-Canadian street-type abbreviations (`av` → `Avenue`).
pub fn clean_street_types_fr_ca(text: &str) -> String {
    replace_each(text, &STREET_TYPES_FR_CA)
}

/// `et` → `&`.
pub fn clean_et(text: &str) -> String {
    ET.replace_all(text, "&").into_owned()
}

/// Final display cleanup: whitespace collapsed and trimmed, words capitalized,
/// locale function words lower-cased unless they open the label (or a
/// `/`-separated alternative).
///
/// Words written entirely in upper case are lower-cased first; single
/// letters (`E`, `N`) are left alone.
pub fn clean_label(locale: Locale, text: &str) -> String {
    let collapsed = collapse_whitespace(text);

    let function_words = match locale {
        Locale::Fr => FUNCTION_WORDS_FR,
        Locale::En => FUNCTION_WORDS_EN,
    };

    let mut words = Vec::new();
    let mut leading = true;
    for word in collapsed.split(' ') {
        words.push(clean_word(word, leading, function_words));
        leading = word == "/";
    }
    words.join(" ")
}

fn clean_word(word: &str, leading: bool, function_words: &[&str]) -> String {
    word.split('-')
        .enumerate()
        .map(|(i, part)| clean_part(part, leading && i == 0, function_words))
        .collect::<Vec<_>>()
        .join("-")
}

fn clean_part(part: &str, leading: bool, function_words: &[&str]) -> String {
    let lower = part.to_lowercase();
    let part = if is_upper_case_word(part) {
        lower.as_str()
    } else {
        part
    };
    if !leading && function_words.contains(&lower.as_str()) {
        return lower;
    }
    if let Some((article, rest)) = split_elision(part) {
        let article = article.to_lowercase();
        let article = if leading {
            capitalize(&article)
        } else {
            article
        };
        return format!("{article}{}", capitalize(rest));
    }
    capitalize(part)
}

fn is_upper_case_word(part: &str) -> bool {
    let letters: Vec<char> = part.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// `"l'école"` → `("l'", "école")`; also `d'` and the typographic apostrophe.
fn split_elision(part: &str) -> Option<(&str, &str)> {
    let mut chars = part.char_indices();
    let (_, first) = chars.next()?;
    let (_, apostrophe) = chars.next()?;
    let (split, _) = chars.next()?;
    let elides = matches!(first, 'l' | 'L' | 'd' | 'D') && matches!(apostrophe, '\'' | '’');
    elides.then(|| part.split_at(split))
}

/// Upper-cases the first alphanumeric character if it is a letter.
fn capitalize(part: &str) -> String {
    match part.char_indices().find(|(_, c)| c.is_alphanumeric()) {
        Some((i, c)) if c.is_alphabetic() => {
            let (head, tail) = part.split_at(i);
            let rest = &tail[c.len_utf8()..];
            format!("{head}{}{rest}", c.to_uppercase())
        }
        _ => part.to_string(),
    }
}
