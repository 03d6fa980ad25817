//! printf-style message templates
//!
//! Backs the `*f` call shape (`infof("-->%s<--", &[&"x"])`). Every argument
//! is rendered through its `Display` implementation, so `%s`, `%v` and `%d`
//! are interchangeable. Malformed templates never fail; the problem is
//! spelled out inline instead:
//!
//! | input            | output              |
//! |------------------|---------------------|
//! | `%s`, no args    | `%!s(MISSING)`      |
//! | `%z` with `x`    | `%!z(x)`            |
//! | unused args      | `%!(EXTRA a, b)`    |
//! | trailing `%`     | `%!(NOVERB)`        |
//! | width > 1e6      | `%!(BADWIDTH)`      |
//! | precision > 65535| `%!(BADPREC)`       |

use std::fmt::{Display, Write as _};
use std::iter::Peekable;
use std::str::Chars;

/// Widths above this are rejected instead of allocated
const MAX_WIDTH: usize = 1_000_000;

/// `std::fmt` panics on precisions above `u16::MAX`
const MAX_PRECISION: usize = u16::MAX as usize;

#[derive(Debug, Default)]
struct Directive {
    left: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

/// Render `template`, substituting `args` positionally
#[must_use]
pub fn render(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let directive = parse_directive(&mut chars);
        if directive.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if directive.bad_precision {
            out.push_str("%!(BADPREC)");
        }
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };

        let Some(arg) = args.next() else {
            let _ = write!(out, "%!{verb}(MISSING)");
            continue;
        };

        match verb {
            's' | 'v' | 'd' => {
                pad_into(&mut out, &directive, &with_precision(*arg, directive.precision));
            }
            'q' => pad_into(
                &mut out,
                &directive,
                &format!("{:?}", with_precision(*arg, directive.precision)),
            ),
            other => {
                let _ = write!(out, "%!{other}({arg})");
            }
        }
    }

    let extra: Vec<String> = args.map(ToString::to_string).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }

    out
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Directive {
    let mut directive = Directive::default();

    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => directive.left = true,
            '0' => directive.zero = true,
            _ => break,
        }
        chars.next();
    }

    directive.width = parse_number(chars);
    if directive.width.is_some_and(|w| w > MAX_WIDTH) {
        directive.width = None;
        directive.bad_width = true;
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let precision = parse_number(chars).unwrap_or(0);
        if precision > MAX_PRECISION {
            directive.bad_precision = true;
        } else {
            directive.precision = Some(precision);
        }
    }

    directive
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
    }
    value
}

fn with_precision(arg: &dyn Display, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{arg:.p$}"),
        None => arg.to_string(),
    }
}

fn pad_into(out: &mut String, directive: &Directive, text: &str) {
    let len = text.chars().count();
    let fill = directive.width.map_or(0, |w| w.saturating_sub(len));

    if fill == 0 {
        out.push_str(text);
    } else if directive.left {
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if directive.zero {
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text),
        };
        out.push_str(sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(text);
    }
}
