//! Template formatting and term joining for log lines.

use super::{LogEntry, LogError};
use crate::core::Term;

/// Fill a `{}` / `{N}` template with `args`.
///
/// Literal text becomes `Text` terms and placeholders become the argument
/// terms themselves, so entity references survive into the entry. `{{` and
/// `}}` escape braces. The entry's delimiter is empty.
///
/// ```
/// use rust_gsm::core::{PlayerId, Term};
/// use rust_gsm::log::format_entry;
///
/// let entry = format_entry("{} deals {1} damage to {0}", &[PlayerId(1).into(), 3i64.into()]).unwrap();
/// assert_eq!(entry.to_string(), "Player 1 deals 3 damage to Player 1");
/// assert_eq!(entry.terms[0], Term::Player(PlayerId(1)));
/// ```
///
/// # Errors
///
/// `LogError::Format` for unbalanced braces, a non-numeric placeholder or a
/// missing argument.
pub fn format_entry(template: &str, args: &[Term]) -> Result<LogEntry, LogError> {
    let mut terms = Vec::new();
    let mut text = String::new();
    let mut next_auto = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => {
                            return Err(LogError::Format(format!(
                                "unclosed placeholder in '{template}'"
                            )))
                        }
                    }
                }
                let index = if field.is_empty() {
                    next_auto += 1;
                    next_auto - 1
                } else {
                    field.trim().parse::<usize>().map_err(|_| {
                        LogError::Format(format!("unknown placeholder '{{{field}}}'"))
                    })?
                };
                let arg = args.get(index).ok_or_else(|| {
                    LogError::Format(format!(
                        "placeholder {index} has no argument ({} given)",
                        args.len()
                    ))
                })?;
                if !text.is_empty() {
                    terms.push(Term::Text(std::mem::take(&mut text)));
                }
                terms.push(arg.clone());
            }
            '}' => {
                return Err(LogError::Format(format!(
                    "unmatched '}}' in '{template}'"
                )))
            }
            c => text.push(c),
        }
    }
    if !text.is_empty() {
        terms.push(Term::Text(text));
    }
    Ok(LogEntry::new(terms).with_delimiter(""))
}

/// Join terms into a readable list: `a, b and c`.
///
/// `conjunction` replaces the last separator (pass it with its spaces, e.g.
/// `" and "`). The entry's delimiter is empty.
///
/// ```
/// use rust_gsm::core::Term;
/// use rust_gsm::log::join_terms;
///
/// let names: Vec<Term> = vec!["ann".into(), "bo".into(), "cy".into()];
/// assert_eq!(join_terms(&names, ", ", Some(" and ")).to_string(), "ann, bo and cy");
/// assert_eq!(join_terms(&names[..2], ", ", Some(" or ")).to_string(), "ann or bo");
/// assert_eq!(join_terms(&names, "/", None).to_string(), "ann/bo/cy");
/// ```
#[must_use]
pub fn join_terms(items: &[Term], sep: &str, conjunction: Option<&str>) -> LogEntry {
    let mut terms = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            let last = i + 1 == items.len();
            let joiner = match conjunction {
                Some(conj) if last => conj,
                _ => sep,
            };
            terms.push(Term::from(joiner));
        }
        terms.push(item.clone());
    }
    LogEntry::new(terms).with_delimiter("")
}
