/// Render one recognition result for stdout.
///
/// A single image prints its text alone. With several images each block gets a
/// `==> path <==` header, separated from the previous block by a blank line.
pub fn format_result(image: &str, text: &str, multiple: bool, first: bool) -> String {
    if !multiple {
        return format!("{}\n", text);
    }

    let separator = if first { "" } else { "\n" };
    format!("{}==> {} <==\n{}\n", separator, image, text)
}
