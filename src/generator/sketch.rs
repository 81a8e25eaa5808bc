//! Assemble fragment buffers into an Arduino sketch.

use super::fragments::CodeFragmentSet;

fn indent_lines(out: &mut String, code: &str) {
    for line in code.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Render a complete `.ino` sketch.
///
/// `#include` lines come first, followed by the remaining definitions in
/// insertion order, then `setup()` and `loop()`.
pub fn render_sketch(fragments: &CodeFragmentSet) -> String {
    let mut out = String::with_capacity(1024);

    let (includes, globals): (Vec<&String>, Vec<&String>) = fragments
        .definitions
        .values()
        .partition(|code| code.trim_start().starts_with("#include"));
    for code in &includes {
        out.push_str(code.trim_end());
        out.push('\n');
    }
    if !includes.is_empty() && !globals.is_empty() {
        out.push('\n');
    }
    for code in &globals {
        out.push_str(code.trim_end());
        out.push('\n');
    }
    if !fragments.definitions.is_empty() {
        out.push('\n');
    }

    out.push_str("void setup() {\n");
    for code in fragments.setups.values() {
        indent_lines(&mut out, code);
    }
    out.push_str("}\n\n");

    out.push_str("void loop() {\n");
    for code in fragments.body.values() {
        indent_lines(&mut out, code);
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sketch() {
        let sketch = render_sketch(&CodeFragmentSet::new());
        assert_eq!(sketch, "void setup() {\n}\n\nvoid loop() {\n}\n");
    }
}
