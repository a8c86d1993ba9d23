use super::expression::Term;

/// Renders `name(a, b, c)`, the syntax shared by literals and ground actions.
pub fn build_call_string(name: &str, args: &[Term]) -> String {
    let first = args.iter().take(1).fold(String::new(), |acc, item| acc + item.as_str());
    let args = args.iter().skip(1).fold(first, |acc, item| acc + ", " + item.as_str());
    format!("{}({})", name, args)
}
