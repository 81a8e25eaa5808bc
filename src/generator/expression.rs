//! Resolve value blocks into C++ expressions.

use crate::model::Block;
use log::warn;

/// Generate the expression for a value block.
///
/// Returns `None` for blocks that do not produce a value or whose field is
/// blank; callers treat that the same as an empty input and substitute their
/// default.
pub fn value_to_code(block: &Block) -> Option<String> {
    match block.block_type.as_str() {
        "math_number" => non_blank(block.field("NUM")),
        "text" => Some(quote_text(block.field("TEXT").unwrap_or(""))),
        "variables_get" => non_blank(block.field("VAR")),
        "math_arithmetic" => Some(arithmetic(block)),
        other => {
            warn!("Block {} of type {} has no value to generate", block.id, other);
            None
        }
    }
}

fn non_blank(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Generate the expression connected to a value input, if any.
pub fn input_to_code(block: &Block, input: &str) -> Option<String> {
    block.input_target(input).and_then(value_to_code)
}

fn arithmetic(block: &Block) -> String {
    let a = input_to_code(block, "A").unwrap_or_else(|| "0".to_string());
    let b = input_to_code(block, "B").unwrap_or_else(|| "0".to_string());
    match block.field("OP").unwrap_or("ADD") {
        "ADD" => format!("({} + {})", a, b),
        "MINUS" => format!("({} - {})", a, b),
        "MULTIPLY" => format!("({} * {})", a, b),
        "DIVIDE" => format!("({} / {})", a, b),
        "POWER" => format!("pow({}, {})", a, b),
        other => {
            warn!("Block {} has unknown arithmetic operator {}, using ADD", block.id, other);
            format!("({} + {})", a, b)
        }
    }
}

/// Quote text as a C string literal.
fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                // Split the literal so a following hex digit is not absorbed.
                out.push_str(&format!("\\x{:02x}\"\"", c as u32));
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
