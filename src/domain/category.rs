//! General category lookups backed by the Unicode tables of `regex`

use std::sync::OnceLock;

use regex::Regex;

struct Categories {
    unassigned: Regex,
    /// Mn and Me: the marks with joining type T
    transparent_mark: Regex,
}

impl Categories {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            unassigned: Regex::new(r"\A\p{Unassigned}\z")?,
            transparent_mark: Regex::new(r"\A[\p{Nonspacing_Mark}\p{Enclosing_Mark}]\z")?,
        })
    }
}

fn categories() -> Option<&'static Categories> {
    static CATEGORIES: OnceLock<Option<Categories>> = OnceLock::new();
    CATEGORIES
        .get_or_init(|| Categories::compile().ok())
        .as_ref()
}

fn matches(c: char, pick: fn(&Categories) -> &Regex) -> bool {
    let mut buf = [0u8; 4];
    categories().is_some_and(|cats| pick(cats).is_match(c.encode_utf8(&mut buf)))
}

/// General_Category Cn.
pub fn is_unassigned(c: char) -> bool {
    matches(c, |cats| &cats.unassigned)
}

/// General_Category Mn or Me.
pub fn is_transparent_mark(c: char) -> bool {
    matches(c, |cats| &cats.transparent_mark)
}
