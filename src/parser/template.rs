// Author: kelexine (https://github.com/kelexine)
// parser/template.rs -- Masking of `<...>` template argument lists

/// A source line with every outermost `<...>` span replaced by `__TPL<n>__`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedLine {
    pub text: String,
    /// (placeholder, original bracketed text) in order of appearance.
    pub templates: Vec<(String, String)>,
}

impl MaskedLine {
    /// Substitute every placeholder of this line back into `s`.
    pub fn demask(&self, s: &str) -> String {
        let mut out = s.to_string();
        for (placeholder, original) in &self.templates {
            out = out.replace(placeholder, original);
        }
        out
    }

    #[cfg(test)]
    pub fn lookup(&self, placeholder: &str) -> Option<&str> {
        self.templates
            .iter()
            .find(|(p, _)| p == placeholder)
            .map(|(_, o)| o.as_str())
    }
}

/// Mask balanced top-level `<...>` spans.
///
/// Nested brackets are absorbed into the outer placeholder. A `>` without an
/// open `<` is copied through, and an unclosed `<` leaves the rest of the line
/// untouched.
pub fn mask_templates(line: &str) -> MaskedLine {
    let chars: Vec<char> = line.chars().collect();
    let mut text = String::with_capacity(line.len());
    let mut templates = Vec::new();

    let mut depth = 0usize;
    let mut span_start = 0usize;
    let mut copied_to = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '<' => {
                if depth == 0 {
                    span_start = i;
                }
                depth += 1;
            }
            '>' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let placeholder = format!("__TPL{}__", templates.len());
                    text.extend(&chars[copied_to..span_start]);
                    text.push_str(&placeholder);
                    templates.push((placeholder, chars[span_start..=i].iter().collect()));
                    copied_to = i + 1;
                }
            }
            _ => {}
        }
    }
    text.extend(&chars[copied_to..]);

    MaskedLine { text, templates }
}
