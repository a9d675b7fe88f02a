//! Character whitelist flattening.
//!
//! Tesseract reads the whitelist as one run of characters, so any mix of
//! strings and character lists is concatenated in the order given.

/// Tesseract variable that restricts the recognized character set.
pub const WHITELIST_VARIABLE: &str = "tessedit_char_whitelist";

/// Something that contributes characters to a whitelist.
pub trait CharList {
    fn push_chars(&self, out: &mut String);
}

impl CharList for str {
    fn push_chars(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl CharList for String {
    fn push_chars(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl CharList for char {
    fn push_chars(&self, out: &mut String) {
        out.push(*self);
    }
}

impl<T: CharList + ?Sized> CharList for &T {
    fn push_chars(&self, out: &mut String) {
        (**self).push_chars(out);
    }
}

impl<T: CharList> CharList for [T] {
    fn push_chars(&self, out: &mut String) {
        for item in self {
            item.push_chars(out);
        }
    }
}

impl<T: CharList, const N: usize> CharList for [T; N] {
    fn push_chars(&self, out: &mut String) {
        self.as_slice().push_chars(out);
    }
}

impl<T: CharList> CharList for Vec<T> {
    fn push_chars(&self, out: &mut String) {
        self.as_slice().push_chars(out);
    }
}

/// Flatten every list into one whitelist string, preserving order.
pub fn build_whitelist<I>(lists: I) -> String
where
    I: IntoIterator,
    I::Item: CharList,
{
    let mut whitelist = String::new();
    for list in lists {
        list.push_chars(&mut whitelist);
    }
    whitelist
}

/// The single directive written to the temporary config file.
pub fn config_directive(whitelist: &str) -> String {
    format!("{} {}", WHITELIST_VARIABLE, whitelist)
}
