use unicode_preview_engine::{TextStyle, stylize};

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "## Section\n\nParagraph with **some** content.\n\n| A | B |\n| - | - |\n| x | y |\n\n- Bullet point\n- Another item\n\n";
    base.repeat(size)
}

/// A crude preview renderer: headings become bold and underlined, strong
/// emphasis turns into bold letters, table rows are boxed.
#[allow(dead_code)]
pub fn render_preview(markdown: &str) -> String {
    let mut out = String::new();
    for line in markdown.lines() {
        if let Some(title) = line.strip_prefix("## ") {
            out.push_str(&stylize(title, TextStyle::Bold));
            out.push('\n');
            out.push_str(&"─".repeat(title.chars().count()));
        } else if line.starts_with("| -") {
            out.push_str("    ├───┼───┤");
        } else if line.starts_with('|') {
            out.push_str("    ");
            out.push_str(&line.replace('|', "│"));
        } else {
            let mut styled = String::new();
            for (i, part) in line.split("**").enumerate() {
                if i % 2 == 1 {
                    styled.push_str(&stylize(part, TextStyle::Bold));
                } else {
                    styled.push_str(part);
                }
            }
            out.push_str(&styled.replace("- ", "• "));
        }
        out.push('\n');
    }
    out
}
