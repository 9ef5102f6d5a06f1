// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_wikitext_content(size: usize) -> String {
    let base = "== Section ==\n'''Term''' is a ''thing'' with {{cite|a|b}} and [[Link|label]].\n* Bullet point\n*# Nested item\n: Indented ~~~~\n<ref name=x>[http://example.org ref]</ref>\n----\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_ambiguous_emphasis(lines: usize) -> String {
    let mut content = String::new();
    for line in 0..lines {
        if line % 2 == 0 {
            content.push_str("'''''Any''' may apply.''\n");
        } else {
            content.push_str("in ''a'''''A''' out\n");
        }
    }
    content
}

#[allow(dead_code)]
pub fn generate_nested_templates(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        content.push_str(&format!("{{{{t{level}|p{level}|"));
    }
    content.push_str("''core''");
    content.push_str(&"}}".repeat(depth));
    content
}
