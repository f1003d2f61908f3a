use serde::{Deserialize, Serialize};

/// Achievement verbs emphasized in the rendered résumé:
/// achieve, improve, develop, manage, create, implement.
pub const HIGHLIGHT_KEYWORDS: [&str; 6] = ["달성", "개선", "개발", "관리", "생성", "구현"];

/// A run of item text, either plain or an emphasized keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Fragment {
    Plain(String),
    Keyword(String),
}

#[cfg(test)]
impl Fragment {
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Plain(text) | Fragment::Keyword(text) => text,
        }
    }
}

/// Splits `text` on single spaces and tags words that exactly equal one of
/// `HIGHLIGHT_KEYWORDS`. Concatenating the fragments yields `text` unchanged.
pub fn highlight(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut plain = String::new();

    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            plain.push(' ');
        }
        if HIGHLIGHT_KEYWORDS.contains(&word) {
            if !plain.is_empty() {
                fragments.push(Fragment::Plain(std::mem::take(&mut plain)));
            }
            fragments.push(Fragment::Keyword(word.to_string()));
        } else {
            plain.push_str(word);
        }
    }
    if !plain.is_empty() {
        fragments.push(Fragment::Plain(plain));
    }
    fragments
}

/// A single unhighlighted fragment, for sections that skip emphasis.
pub fn plain(text: &str) -> Vec<Fragment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Fragment::Plain(text.to_string())]
    }
}
