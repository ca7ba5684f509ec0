/// Printf-style row templates restricted to string arguments.
///
/// Supported directives:
///
/// - `%s` and the other printf conversions (`d i u x X o e E f F g G c`); every
///   value is a string, so the conversion letter only selects the slot
/// - flags `-` (left-align) and `0` (zero-pad); `+`, space and `#` are accepted
///   and ignored
/// - width and `.precision` (precision truncates)
/// - positional `%N%` and `%N$s` (1-based)
/// - `%%` for a literal percent sign
use thiserror::Error;

/// Errors raised while parsing or applying a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The template text itself is malformed.
    #[error("bad format string at position {position}: {reason}")]
    BadFormatString {
        /// Byte offset of the offending `%`.
        position: usize,
        /// What was wrong.
        reason: &'static str,
    },

    /// The template references more slots than the row has columns.
    #[error("format string refers to {referenced} arguments but only {supplied} were supplied")]
    TooFewArguments {
        /// Highest slot number the template uses.
        referenced: usize,
        /// Number of column values available.
        supplied: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Spec {
    left: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot { index: usize, spec: Spec },
}

/// A parsed template, ready to be applied to rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    slots: usize,
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

const CONVERSIONS: &str = "sdiuxXoeEfFgGc";

impl Template {
    /// Parse template text.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::BadFormatString` for an unterminated directive, an
    /// unknown conversion, or a zero positional index.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut next_sequential = 0;
        let mut slots = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.next_if(|&(_, c)| c == '%').is_some() {
                literal.push('%');
                continue;
            }

            let bad = |reason| FormatError::BadFormatString { position, reason };

            let (positional, finished) = take_position(&mut chars).map_err(bad)?;
            let spec = if finished {
                Spec::default()
            } else {
                take_spec(&mut chars).map_err(bad)?
            };

            let index = positional.unwrap_or_else(|| {
                let i = next_sequential;
                next_sequential += 1;
                i
            });
            slots = slots.max(index + 1);

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Slot { index, spec });
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments, slots })
    }

    /// Append a newline unless the template already ends with one.
    pub fn ensure_trailing_newline(&mut self) {
        if let Some(Segment::Literal(text)) = self.segments.last_mut() {
            if !text.ends_with('\n') {
                text.push('\n');
            }
        } else {
            self.segments.push(Segment::Literal("\n".to_owned()));
        }
    }

    /// Substitute `args` into the template. Values beyond the slot count are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::TooFewArguments` if fewer values than slots are given.
    pub fn render(&self, args: &[&str]) -> Result<String, FormatError> {
        if self.slots > args.len() {
            return Err(FormatError::TooFewArguments {
                referenced: self.slots,
                supplied: args.len(),
            });
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot { index, spec } => {
                    spec.apply(args.get(*index).copied().unwrap_or_default(), &mut out);
                }
            }
        }
        Ok(out)
    }
}

impl Spec {
    fn apply(self, value: &str, out: &mut String) {
        let value: String = match self.precision {
            Some(p) => value.chars().take(p).collect(),
            None => value.to_owned(),
        };
        let pad = self
            .width
            .map_or(0, |w| w.saturating_sub(value.chars().count()));

        if self.left {
            out.push_str(&value);
            out.extend(std::iter::repeat_n(' ', pad));
        } else {
            let fill = if self.zero { '0' } else { ' ' };
            out.extend(std::iter::repeat_n(fill, pad));
            out.push_str(&value);
        }
    }
}

/// Consume a `N%` or `N$` positional prefix, if present.
///
/// Returns the zero-based index and whether the directive is already complete
/// (the `%N%` form has no conversion part).
fn take_position(chars: &mut Chars<'_>) -> Result<(Option<usize>, bool), &'static str> {
    let mut probe = chars.clone();
    let Some(n) = take_number(&mut probe) else {
        return Ok((None, false));
    };
    let finished = match probe.peek() {
        Some(&(_, '%')) => true,
        Some(&(_, '$')) => false,
        _ => return Ok((None, false)),
    };
    probe.next();
    if n == 0 {
        return Err("argument positions start at 1");
    }
    *chars = probe;
    Ok((Some(n - 1), finished))
}

fn take_spec(chars: &mut Chars<'_>) -> Result<Spec, &'static str> {
    let mut spec = Spec::default();

    while let Some((_, flag)) = chars.next_if(|&(_, c)| matches!(c, '-' | '0' | '+' | ' ' | '#')) {
        match flag {
            '-' => spec.left = true,
            '0' => spec.zero = true,
            _ => {}
        }
    }
    spec.width = take_number(chars);
    if chars.next_if(|&(_, c)| c == '.').is_some() {
        spec.precision = Some(take_number(chars).unwrap_or(0));
    }

    match chars.next() {
        Some((_, c)) if CONVERSIONS.contains(c) => Ok(spec),
        Some(_) => Err("unknown conversion"),
        None => Err("unterminated directive"),
    }
}

fn take_number(chars: &mut Chars<'_>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some((_, c)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
        let digit = c.to_digit(10).map_or(0, |d| d as usize);
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }
    value
}
