//! The Porter stemming algorithm (M.F. Porter, 1980).
//!
//! Includes the two well-known departures of the reference implementation:
//! `bli` → `ble` and `logi` → `log` in step 2.

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Stem one lowercase word. Words of one or two letters come back unchanged.
pub fn stem(word: &str) -> String {
    let mut w: Vec<char> = word.chars().collect();
    if w.len() <= 2 {
        return word.to_string();
    }

    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    replace_first(&mut w, STEP2);
    replace_first(&mut w, STEP3);
    step4(&mut w);
    step5(&mut w);

    w.into_iter().collect()
}

fn is_consonant(w: &[char], i: usize) -> bool {
    match w[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences: [C](VC){m}[V].
fn measure(w: &[char]) -> usize {
    let n = w.len();
    let mut i = 0;
    while i < n && is_consonant(w, i) {
        i += 1;
    }

    let mut m = 0;
    loop {
        while i < n && !is_consonant(w, i) {
            i += 1;
        }
        if i >= n {
            return m;
        }
        while i < n && is_consonant(w, i) {
            i += 1;
        }
        m += 1;
    }
}

fn has_vowel(w: &[char]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

/// consonant-vowel-consonant, where the last consonant is not w, x or y
fn ends_cvc(w: &[char]) -> bool {
    let n = w.len();
    n >= 3
        && is_consonant(w, n - 1)
        && !is_consonant(w, n - 2)
        && is_consonant(w, n - 3)
        && !matches!(w[n - 1], 'w' | 'x' | 'y')
}

/// Length of the stem left once `suffix` is removed, if `w` ends with it.
fn stem_len(w: &[char], suffix: &str) -> Option<usize> {
    let n = suffix.chars().count();
    if n > w.len() {
        return None;
    }
    let start = w.len() - n;
    w[start..].iter().copied().eq(suffix.chars()).then_some(start)
}

fn set_suffix(w: &mut Vec<char>, stem: usize, replacement: &str) {
    w.truncate(stem);
    w.extend(replacement.chars());
}

fn step1a(w: &mut Vec<char>) {
    if let Some(stem) = stem_len(w, "sses") {
        set_suffix(w, stem, "ss");
    } else if let Some(stem) = stem_len(w, "ies") {
        set_suffix(w, stem, "i");
    } else if stem_len(w, "ss").is_none() {
        if let Some(stem) = stem_len(w, "s") {
            w.truncate(stem);
        }
    }
}

fn step1b(w: &mut Vec<char>) {
    if let Some(stem) = stem_len(w, "eed") {
        if measure(&w[..stem]) > 0 {
            w.pop();
        }
        return;
    }

    let stem = match stem_len(w, "ed").or_else(|| stem_len(w, "ing")) {
        Some(stem) if has_vowel(&w[..stem]) => stem,
        _ => return,
    };
    w.truncate(stem);

    if ["at", "bl", "iz"].iter().any(|s| stem_len(w, s).is_some()) {
        w.push('e');
    } else if ends_double_consonant(w) {
        if !matches!(w.last(), Some('l' | 's' | 'z')) {
            w.pop();
        }
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push('e');
    }
}

fn step1c(w: &mut [char]) {
    if let Some(stem) = stem_len(w, "y") {
        if has_vowel(&w[..stem]) {
            w[stem] = 'i';
        }
    }
}

/// The first matching suffix decides; it is replaced only when the stem has m > 0.
fn replace_first(w: &mut Vec<char>, rules: &[(&str, &str)]) {
    for &(suffix, replacement) in rules {
        if let Some(stem) = stem_len(w, suffix) {
            if measure(&w[..stem]) > 0 {
                set_suffix(w, stem, replacement);
            }
            return;
        }
    }
}

fn step4(w: &mut Vec<char>) {
    for &suffix in STEP4 {
        if let Some(stem) = stem_len(w, suffix) {
            let removable = measure(&w[..stem]) > 1
                && (suffix != "ion" || (stem > 0 && matches!(w[stem - 1], 's' | 't')));
            if removable {
                w.truncate(stem);
            }
            return;
        }
    }
}

fn step5(w: &mut Vec<char>) {
    if w.last() == Some(&'e') {
        let m = measure(w);
        if m > 1 || (m == 1 && !ends_cvc(&w[..w.len() - 1])) {
            w.pop();
        }
    }
    if w.last() == Some(&'l') && ends_double_consonant(w) && measure(w) > 1 {
        w.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stems(cases: &[(&str, &str)]) {
        for &(word, expected) in cases {
            assert_eq!(stem(word), expected, "stem({})", word);
        }
    }

    #[test]
    fn test_measure() {
        let m = |s: &str| measure(&s.chars().collect::<Vec<_>>());
        assert_eq!(m("tr"), 0);
        assert_eq!(m("tree"), 0);
        assert_eq!(m("trouble"), 1);
        assert_eq!(m("oats"), 1);
        assert_eq!(m("troubles"), 2);
        assert_eq!(m("private"), 2);
    }

    #[test]
    fn test_plurals_and_participles() {
        assert_stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("hopping", "hop"),
            ("falling", "fall"),
            ("filing", "file"),
        ]);
    }

    #[test]
    fn test_ly_adverbs_keep_their_i() {
        assert_stems(&[
            ("quickly", "quickli"),
            ("fairly", "fairli"),
            ("happy", "happi"),
            ("sky", "sky"),
        ]);
    }

    #[test]
    fn test_derivational_suffixes() {
        assert_stems(&[
            ("relational", "relat"),
            ("generously", "gener"),
            ("hopefulness", "hope"),
            ("controlling", "control"),
            ("adjustment", "adjust"),
            ("adoption", "adopt"),
        ]);
    }

    #[test]
    fn test_short_words_untouched() {
        assert_stems(&[("is", "is"), ("as", "as"), ("a", "a")]);
    }
}
